//! The `jwt` session cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use tasknest_auth::{SessionClaims, TokenError, verify_session_token};
use tasknest_config::JwtConfig;
use time::{Duration, OffsetDateTime};

pub const SESSION_COOKIE: &str = "jwt";

/// Outcome of inspecting the session cookie of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    NoCookie,
    Rejected(TokenError),
    Valid(SessionClaims),
}

impl SessionCheck {
    pub fn inspect(jar: &CookieJar, jwt_config: &JwtConfig) -> Self {
        let Some(cookie) = jar.get(SESSION_COOKIE).filter(|c| !c.value().is_empty()) else {
            return SessionCheck::NoCookie;
        };

        match verify_session_token(cookie.value(), jwt_config) {
            Ok(claims) => SessionCheck::Valid(claims),
            Err(err) => SessionCheck::Rejected(err),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, SessionCheck::Valid(_))
    }
}

/// HttpOnly cookie carrying a freshly issued token.
pub fn session_cookie(token: String, lifetime_seconds: i64) -> Cookie<'static> {
    let lifetime = Duration::seconds(lifetime_seconds);
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .max_age(lifetime)
        .expires(OffsetDateTime::now_utc() + lifetime)
        .build()
}

/// Overwrites `name` with an already-expired cookie so the client drops it.
pub fn expire_cookie(jar: CookieJar, name: &'static str) -> CookieJar {
    let mut cookie = Cookie::build((name, "")).path("/").build();
    cookie.make_removal();
    jar.add(cookie)
}

pub fn clear_session(jar: CookieJar) -> CookieJar {
    expire_cookie(jar, SESSION_COOKIE)
}
