use axum::Form;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tasknest_core::{ApiError, AppError};
use tracing::{info, instrument};

use crate::context::RequestContext;
use crate::flash::{FlashKind, get_messages, redirect_with_flash};
use crate::handler::render_view;
use crate::session::{clear_session, session_cookie};
use crate::state::AppState;
use crate::validator::check_form;
use crate::view_data;

use super::model::{LoginForm, RegisterForm};
use super::service::{AuthService, LoginError, RegisterError};

pub const TIMEZONE_HEADER: &str = "x-timezone";

/// IANA zone sent by the browser, `UTC` when absent or blank.
fn client_timezone(headers: &HeaderMap) -> String {
    headers
        .get(TIMEZONE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|tz| !tz.is_empty())
        .unwrap_or("UTC")
        .to_string()
}

async fn public_page(
    state: &AppState,
    ctx: &RequestContext,
    jar: CookieJar,
    view: &str,
    title: &str,
) -> Result<Response, AppError> {
    let (jar, messages) = get_messages(jar);
    let data = view_data! {
        "title" => title,
        "fromProtected" => ctx.from_protected,
        "username" => ctx.user.username,
        "errMsg" => messages.error,
        "succMsg" => messages.success,
    };

    let page = render_view(state.views.as_ref(), view, &data)?;
    Ok((jar, page).into_response())
}

pub async fn home(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
) -> Result<Response, AppError> {
    public_page(&state, &ctx, jar, "home", "").await
}

pub async fn register(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
) -> Result<Response, AppError> {
    public_page(&state, &ctx, jar, "register", "| Register").await
}

pub async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
) -> Result<Response, AppError> {
    public_page(&state, &ctx, jar, "login", "| Login").await
}

#[instrument(skip_all)]
pub async fn register_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let form = form.trimmed();
    if let Err(message) = check_form(&form) {
        return Ok(redirect_with_flash(jar, FlashKind::Error, message, "/register"));
    }

    match AuthService::register_user(state.users.as_ref(), form).await {
        Ok(user) => {
            info!(user_id = user.id, "User registered");
            Ok(redirect_with_flash(
                jar,
                FlashKind::Success,
                "You have successfully registered!!",
                "/login",
            ))
        }
        Err(RegisterError::EmailTaken) => Ok(redirect_with_flash(
            jar,
            FlashKind::Error,
            RegisterError::EmailTaken.to_string(),
            "/register",
        )),
        Err(RegisterError::Store(err)) => Err(ApiError::from(err).into()),
        Err(err @ RegisterError::Hash(_)) => {
            Err(ApiError::internal(format!("error 500: {err}")).into())
        }
    }
}

#[instrument(skip_all)]
pub async fn login_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let form = form.trimmed();
    if let Err(message) = check_form(&form) {
        return Ok(redirect_with_flash(jar, FlashKind::Error, message, "/login"));
    }

    let tzone = client_timezone(&headers);
    let result =
        AuthService::login_user(state.users.as_ref(), &state.jwt_config, form, &tzone).await;

    match result {
        Ok(session) => {
            info!(user_id = session.user.id, tzone = %tzone, "User logged in");
            let jar = jar.add(session_cookie(
                session.token,
                state.jwt_config.session_expiry,
            ));
            Ok(redirect_with_flash(
                jar,
                FlashKind::Success,
                "You have successfully logged in!!",
                "/todo",
            ))
        }
        Err(err @ (LoginError::UnknownEmail | LoginError::WrongPassword)) => Ok(
            redirect_with_flash(jar, FlashKind::Error, err.to_string(), "/login"),
        ),
        Err(LoginError::Store(err)) => Err(ApiError::from(err).into()),
        Err(err @ (LoginError::Hash(_) | LoginError::Token(_))) => {
            Err(ApiError::internal(format!("error 500: {err}")).into())
        }
    }
}

pub async fn logout(jar: CookieJar) -> Result<Response, AppError> {
    let jar = clear_session(jar);

    Ok(redirect_with_flash(
        jar,
        FlashKind::Success,
        "You have successfully logged out!!",
        "/login",
    ))
}

/// Catch-all for unmatched paths.
pub async fn not_found() -> Result<Response, AppError> {
    Err(ApiError::not_found("error 404: not found").into())
}
