//! Per-request values attached by the middleware and read by handlers.
//!
//! Two independent slots live in the request extensions, each keyed by a private
//! newtype so nothing else stored there can collide with them:
//!
//! - the authenticated user's [`UserData`], written by the session guard on
//!   protected paths
//! - the protected-origin flag, written by the session classifier on every request
//!
//! Reading a slot that was never written yields its zero value (empty identity,
//! `false`). Handlers receive both as one immutable [`RequestContext`].

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{Extensions, HeaderMap, Method, header};
use serde::Serialize;
use tasknest_auth::SessionClaims;

/// Identity of the caller, recovered from a verified session token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub timezone: String,
}

impl From<SessionClaims> for UserData {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            timezone: claims.tzone,
        }
    }
}

#[derive(Debug, Clone)]
struct IdentitySlot(UserData);

#[derive(Debug, Clone, Copy)]
struct FromProtectedSlot(bool);

pub fn with_user_data(req: &mut Request, user: UserData) {
    req.extensions_mut().insert(IdentitySlot(user));
}

pub fn user_data(extensions: &Extensions) -> UserData {
    extensions
        .get::<IdentitySlot>()
        .map(|slot| slot.0.clone())
        .unwrap_or_default()
}

pub fn with_from_protected(req: &mut Request, from_protected: bool) {
    req.extensions_mut().insert(FromProtectedSlot(from_protected));
}

pub fn from_protected(extensions: &Extensions) -> bool {
    extensions
        .get::<FromProtectedSlot>()
        .map(|slot| slot.0)
        .unwrap_or_default()
}

/// Snapshot of both slots, handed to handlers as an extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user: UserData,
    pub from_protected: bool,
}

impl RequestContext {
    pub fn from_extensions(extensions: &Extensions) -> Self {
        Self {
            user: user_data(extensions),
            from_protected: from_protected(extensions),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_extensions(&parts.extensions))
    }
}

/// Request fields that end up in log lines.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub host: String,
    pub user_agent: String,
    pub method: Method,
    pub path: String,
}

impl RequestMeta {
    pub fn capture(req: &Request) -> Self {
        Self {
            host: host(req.headers())
                .or_else(|| req.uri().host().map(str::to_string))
                .unwrap_or_default(),
            user_agent: header_str(req.headers(), header::USER_AGENT.as_str()).unwrap_or_default(),
            method: req.method().clone(),
            path: req.uri().path().to_string(),
        }
    }
}

fn host(headers: &HeaderMap) -> Option<String> {
    header_str(headers, header::HOST.as_str())
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
