mod common;

use std::sync::atomic::Ordering;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    TEST_PASSWORD, body_string, cookie_value, flash, form_post, get, location, set_cookie,
    setup_test_app,
};
use tasknest_auth::verify_session_token;
use tasknest_core::verify_password;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_success() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(form_post(
            "/register",
            "email=alice%40example.com&password=secret123&username=alice",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));
    assert_eq!(
        flash(&response, "success").as_deref(),
        Some("You have successfully registered!!")
    );

    let user = app.users.get("alice@example.com").unwrap();
    assert_eq!(user.username, "alice");
    assert_ne!(user.password, "secret123");
    assert!(verify_password("secret123", &user.password).unwrap());
}

#[tokio::test]
async fn test_register_empty_field_creates_nothing() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(form_post(
            "/register",
            "email=alice%40example.com&password=secret123&username=",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/register"));
    assert_eq!(
        flash(&response, "error").as_deref(),
        Some("Fields cannot be empty")
    );
    assert_eq!(app.users.creates.load(Ordering::SeqCst), 0);
    assert_eq!(app.users.len(), 0);
}

#[tokio::test]
async fn test_register_whitespace_only_field_is_empty() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(form_post(
            "/register",
            "email=alice%40example.com&password=+++&username=alice",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(location(&response).as_deref(), Some("/register"));
    assert_eq!(app.users.len(), 0);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = setup_test_app();
    app.users.seed("bob@example.com", "bob");

    let response = app
        .router
        .oneshot(form_post(
            "/register",
            "email=bob%40example.com&password=another&username=bobby",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/register"));
    assert_eq!(
        flash(&response, "error").as_deref(),
        Some("the email is already in use")
    );
    assert_eq!(app.users.len(), 1);
}

#[tokio::test]
async fn test_register_store_unavailable_renders_500() {
    let app = setup_test_app();
    app.users.unavailable.store(true, Ordering::SeqCst);

    let response = app
        .router
        .oneshot(form_post(
            "/register",
            "email=alice%40example.com&password=secret123&username=alice",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // Not a session-bound handler
    assert!(set_cookie(&response, "jwt").is_none());

    let body = body_string(response).await;
    assert!(body.contains("<title>Tasknest | Error 500</title>"));
}

#[tokio::test]
async fn test_login_success_sets_session() {
    let app = setup_test_app();
    let user = app.users.seed("carol@example.com", "carol");

    let mut request = form_post(
        "/login",
        &format!("email=carol%40example.com&password={}", TEST_PASSWORD.replace(' ', "+")),
        None,
    );
    request
        .headers_mut()
        .insert("x-timezone", "Europe/Lisbon".parse().unwrap());

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/todo"));
    assert_eq!(
        flash(&response, "success").as_deref(),
        Some("You have successfully logged in!!")
    );

    let cookie = set_cookie(&response, "jwt").unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));

    let token = cookie_value(&response, "jwt").unwrap();
    let claims = verify_session_token(&token, &app.jwt_config).unwrap();
    assert_eq!(claims.id, user.id);
    assert_eq!(claims.username, "carol");
    assert_eq!(claims.tzone, "Europe/Lisbon");
}

#[tokio::test]
async fn test_login_without_timezone_defaults_to_utc() {
    let app = setup_test_app();
    app.users.seed("dave@example.com", "dave");

    let response = app
        .router
        .oneshot(form_post(
            "/login",
            &format!("email=dave%40example.com&password={}", TEST_PASSWORD.replace(' ', "+")),
            None,
        ))
        .await
        .unwrap();

    let token = cookie_value(&response, "jwt").unwrap();
    let claims = verify_session_token(&token, &app.jwt_config).unwrap();
    assert_eq!(claims.tzone, "UTC");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = setup_test_app();
    app.users.seed("carol@example.com", "carol");

    let response = app
        .router
        .oneshot(form_post(
            "/login",
            "email=carol%40example.com&password=wrong",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));
    assert_eq!(flash(&response, "error").as_deref(), Some("Incorrect password"));
    assert!(set_cookie(&response, "jwt").is_none());
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(form_post(
            "/login",
            "email=nobody%40example.com&password=whatever",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(location(&response).as_deref(), Some("/login"));
    assert_eq!(
        flash(&response, "error").as_deref(),
        Some("there is no user with that email")
    );
    assert!(set_cookie(&response, "jwt").is_none());
}

#[tokio::test]
async fn test_login_empty_fields() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(form_post("/login", "email=&password=", None))
        .await
        .unwrap();

    assert_eq!(location(&response).as_deref(), Some("/login"));
    assert_eq!(
        flash(&response, "error").as_deref(),
        Some("Fields cannot be empty")
    );
}

#[tokio::test]
async fn test_login_missing_field_reads_as_empty() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(form_post("/login", "email=a", None))
        .await
        .unwrap();

    assert_eq!(location(&response).as_deref(), Some("/login"));
    assert_eq!(
        flash(&response, "error").as_deref(),
        Some("Fields cannot be empty")
    );
}

#[tokio::test]
async fn test_login_without_form_content_type_is_json_500() {
    let app = setup_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .body(Body::from("email=a"))
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert!(response.headers().get("x-errmsg").is_none());

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["code"], 500);
    assert_eq!(body["message"], "Unknown server error");
}

#[tokio::test]
async fn test_protected_path_without_session_redirects() {
    let app = setup_test_app();

    for uri in ["/todo", "/create", "/edit?id=1"] {
        let response = app.router.clone().oneshot(get(uri, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response).as_deref(), Some("/login"), "{uri}");
        assert_eq!(
            flash(&response, "error").as_deref(),
            Some("You are not authorized"),
            "{uri}"
        );
    }

    assert_eq!(app.todos.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_protected_path_with_foreign_token_redirects() {
    let app = setup_test_app();
    let token = tasknest_auth::create_session_token(
        1,
        "mallory",
        "UTC",
        &tasknest_config::JwtConfig::new("someone_elses_secret"),
    )
    .unwrap();

    let response = app
        .router
        .oneshot(get("/todo", Some(&format!("jwt={token}"))))
        .await
        .unwrap();

    assert_eq!(location(&response).as_deref(), Some("/login"));
    assert_eq!(app.todos.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_home_navigation_follows_session() {
    let app = setup_test_app();

    let anonymous = app.router.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(anonymous.status(), StatusCode::OK);
    let body = body_string(anonymous).await;
    assert!(body.contains(r#"<a href="/login">Login</a>"#));
    assert!(!body.contains("Logout"));

    let cookie = app.session_for(1, "erin");
    let signed_in = app.router.oneshot(get("/", Some(&cookie))).await.unwrap();
    let body = body_string(signed_in).await;
    assert!(body.contains("Logout"));
    assert!(!body.contains(r#"<a href="/login">Login</a>"#));
}

#[tokio::test]
async fn test_flash_is_shown_and_consumed() {
    let app = setup_test_app();

    // "Incorrect password", base64url
    let response = app
        .router
        .oneshot(get("/login", Some("error=SW5jb3JyZWN0IHBhc3N3b3Jk")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let expired = set_cookie(&response, "error").unwrap();
    assert!(expired.starts_with("error=;"));
    assert!(expired.contains("Max-Age=0"));

    let body = body_string(response).await;
    assert!(body.contains(r#"<div class="flash flash-error">Incorrect password</div>"#));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = setup_test_app();
    let cookie = app.session_for(1, "frank");

    let response = app
        .router
        .oneshot(form_post("/logout", "", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));
    assert_eq!(
        flash(&response, "success").as_deref(),
        Some("You have successfully logged out!!")
    );

    let cleared = set_cookie(&response, "jwt").unwrap();
    assert!(cleared.starts_with("jwt=;"));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_without_session_is_rejected() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(form_post("/logout", "", None))
        .await
        .unwrap();

    assert_eq!(location(&response).as_deref(), Some("/login"));
    assert_eq!(
        flash(&response, "error").as_deref(),
        Some("You are not authorized")
    );
}

#[tokio::test]
async fn test_unknown_path_renders_404() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(get("/does-not-exist", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get("x-handler").is_none());
    assert!(response.headers().get("x-errmsg").is_none());

    let body = body_string(response).await;
    assert!(body.contains("<title>Tasknest | Error 404</title>"));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(get("/assets/css/styles.css", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(".flash-error"));
}
