use axum::extract::Request;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use tasknest_config::JwtConfig;

use crate::context::with_from_protected;
use crate::middleware::stack::{BoxFuture, Middleware, Next};
use crate::session::SessionCheck;

/// Marks whether the caller holds a valid session, for UI branching.
///
/// Never rejects: every request reaches the next stage with the protected-origin
/// flag set to the result of the session check.
#[derive(Debug, Clone)]
pub struct ClassifySession {
    jwt_config: JwtConfig,
}

impl ClassifySession {
    pub fn new(jwt_config: JwtConfig) -> Self {
        Self { jwt_config }
    }
}

impl Middleware for ClassifySession {
    fn handle<'a>(&'a self, mut req: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            let jar = CookieJar::from_headers(req.headers());
            let valid = SessionCheck::inspect(&jar, &self.jwt_config).is_valid();

            with_from_protected(&mut req, valid);
            next.run(req).await
        })
    }
}
