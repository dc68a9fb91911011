use axum::extract::Request;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use tasknest_config::JwtConfig;
use tracing::info;

use crate::context::{UserData, with_user_data};
use crate::flash::{FlashKind, redirect_with_flash};
use crate::middleware::stack::{BoxFuture, Middleware, Next};
use crate::session::SessionCheck;

/// Paths that require a valid session.
pub const PROTECTED_PATHS: &[&str] = &["/todo", "/create", "/edit", "/delete", "/logout"];

pub const NOT_AUTHORIZED: &str = "You are not authorized";

/// Session guard for protected paths.
///
/// Requests outside the protected set pass through untouched. On a protected path a
/// missing, malformed, foreign or expired `jwt` cookie ends the chain with an error
/// flash and a redirect to `/login`; a valid one attaches the caller's [`UserData`]
/// to the request before delegating.
#[derive(Debug, Clone)]
pub struct RequireSession {
    jwt_config: JwtConfig,
    protected: Vec<String>,
}

impl RequireSession {
    pub fn new(jwt_config: JwtConfig) -> Self {
        Self::with_paths(jwt_config, PROTECTED_PATHS.iter().copied())
    }

    pub fn with_paths<'p>(jwt_config: JwtConfig, paths: impl IntoIterator<Item = &'p str>) -> Self {
        Self {
            jwt_config,
            protected: paths.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|p| p == path)
    }
}

impl Middleware for RequireSession {
    fn handle<'a>(&'a self, mut req: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            if !self.is_protected(req.uri().path()) {
                return next.run(req).await;
            }

            let jar = CookieJar::from_headers(req.headers());

            match SessionCheck::inspect(&jar, &self.jwt_config) {
                SessionCheck::Valid(claims) => {
                    with_user_data(&mut req, UserData::from(claims));
                    next.run(req).await
                }
                rejected => {
                    info!(
                        path = %req.uri().path(),
                        reason = ?rejected,
                        "Session rejected"
                    );
                    redirect_with_flash(jar, FlashKind::Error, NOT_AUTHORIZED, "/login")
                }
            }
        })
    }
}
