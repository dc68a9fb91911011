use std::env;

/// Upper bound on a session token's lifetime, in seconds.
pub const MAX_SESSION_EXPIRY: i64 = 3600;

/// Issuer written into and required from every session token.
pub const TOKEN_ISSUER: &str = "tasknest";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub session_expiry: i64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            session_expiry: env::var("JWT_SESSION_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(clamp_expiry)
                .unwrap_or(MAX_SESSION_EXPIRY), // 1 hour
            issuer: TOKEN_ISSUER.to_string(),
        }
    }

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            session_expiry: MAX_SESSION_EXPIRY,
            issuer: TOKEN_ISSUER.to_string(),
        }
    }
}

fn clamp_expiry(seconds: i64) -> i64 {
    seconds.clamp(1, MAX_SESSION_EXPIRY)
}
