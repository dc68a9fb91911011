//! One-shot flash messages carried across a redirect in a cookie.
//!
//! The body is base64url-encoded into a session cookie named after its kind. Reading
//! a message overwrites the cookie with an expired one, so each message is delivered
//! at most once. A missing cookie reads as an empty body.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use tracing::debug;

use crate::session::expire_cookie;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Error,
    Success,
}

impl FlashKind {
    pub fn cookie_name(self) -> &'static str {
        match self {
            FlashKind::Error => "error",
            FlashKind::Success => "success",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlashError {
    #[error("flash cookie is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

pub fn set_flash(jar: CookieJar, kind: FlashKind, body: impl AsRef<[u8]>) -> CookieJar {
    let cookie = Cookie::build((kind.cookie_name(), URL_SAFE.encode(body)))
        .path("/")
        .build();
    jar.add(cookie)
}

/// Sets a flash message and redirects to `to` with 303 See Other.
pub fn redirect_with_flash(
    jar: CookieJar,
    kind: FlashKind,
    body: impl AsRef<[u8]>,
    to: &str,
) -> Response {
    (set_flash(jar, kind, body), Redirect::to(to)).into_response()
}

/// Takes the flash message of `kind`, expiring its cookie.
///
/// On a decode failure the cookie is left untouched and the error is returned.
pub fn read_flash(jar: CookieJar, kind: FlashKind) -> Result<(CookieJar, Vec<u8>), FlashError> {
    let Some(cookie) = jar.get(kind.cookie_name()) else {
        return Ok((jar, Vec::new()));
    };

    let body = URL_SAFE.decode(cookie.value())?;

    Ok((expire_cookie(jar, kind.cookie_name()), body))
}

/// Both flash messages of a request, as display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashMessages {
    pub error: String,
    pub success: String,
}

/// Reads the error and success messages, turning absent or undecodable ones into
/// empty strings.
pub fn get_messages(jar: CookieJar) -> (CookieJar, FlashMessages) {
    let (jar, error) = take_lossy(jar, FlashKind::Error);
    let (jar, success) = take_lossy(jar, FlashKind::Success);

    (jar, FlashMessages { error, success })
}

fn take_lossy(jar: CookieJar, kind: FlashKind) -> (CookieJar, String) {
    match read_flash(jar.clone(), kind) {
        Ok((jar, body)) => (jar, String::from_utf8_lossy(&body).into_owned()),
        Err(err) => {
            debug!(flash = kind.cookie_name(), error = %err, "Ignoring unreadable flash cookie");
            (jar, String::new())
        }
    }
}
