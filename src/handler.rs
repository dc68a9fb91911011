//! Handler adapter and error dispatch.
//!
//! Every route handler is registered through [`adapt`], which pairs it with a
//! [`HandlerLabel`]. The adapter runs the handler and then:
//!
//! - logs the outcome (`Handler Info` or `Handler Error`) with the request fields
//! - writes the label and any error message into the trailer headers read back by
//!   the logging wrapper
//! - turns a failed handler's [`Fault`] into the matching error view, or into the
//!   JSON fallback when no view applies or the view itself fails to render
//! - ends the session when a session-bound handler fails with a typed 500
//!
//! Handlers signal failure by returning [`AppError`](tasknest_core::AppError); its
//! response carries the [`Fault`] in its extensions. An error response without a
//! fault, such as an extractor rejection, is treated as an unexpected fault.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use axum::Json;
use axum::extract::Request;
use axum::handler::Handler;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tasknest_core::{AppError, Fault};
use tracing::{error, info};

use crate::context::{RequestContext, RequestMeta};
use crate::session::clear_session;
use crate::state::AppState;
use crate::view_data;
use crate::views::{ERROR_400_VIEW, ERROR_404_VIEW, ERROR_500_VIEW, ViewData, ViewRenderer};

/// Trailer header naming the handler that produced the response.
pub const HANDLER_HEADER: &str = "x-handler";
/// Trailer header carrying the error message of a failed handler.
pub const ERRMSG_HEADER: &str = "x-errmsg";

/// Name under which a handler is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerLabel {
    pub name: &'static str,
    /// A 500 from this handler means the caller's data became unreachable while they
    /// were signed in, so the session is cleared.
    pub ends_session_on_failure: bool,
}

impl HandlerLabel {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            ends_session_on_failure: false,
        }
    }

    pub const fn session_bound(name: &'static str) -> Self {
        Self {
            name,
            ends_session_on_failure: true,
        }
    }
}

/// Wraps `handler` so its outcome is logged and dispatched under `label`.
pub fn adapt<H, T>(label: HandlerLabel, handler: H) -> Adapted<H, T>
where
    H: Handler<T, AppState>,
{
    Adapted {
        label,
        handler,
        _marker: PhantomData,
    }
}

pub struct Adapted<H, T> {
    label: HandlerLabel,
    handler: H,
    _marker: PhantomData<fn() -> T>,
}

impl<H: Clone, T> Clone for Adapted<H, T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            handler: self.handler.clone(),
            _marker: PhantomData,
        }
    }
}

impl<H, T> Handler<T, AppState> for Adapted<H, T>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    type Future = Pin<Box<dyn Future<Output = Response> + Send>>;

    fn call(self, req: Request, state: AppState) -> Self::Future {
        Box::pin(async move {
            let meta = RequestMeta::capture(&req);
            let ctx = RequestContext::from_extensions(req.extensions());
            let jar = CookieJar::from_headers(req.headers());

            let response = self.handler.call(req, state.clone()).await;

            dispatch(self.label, &meta, &ctx, jar, state.views.as_ref(), response)
        })
    }
}

/// Logs `response` and, when it carries a [`Fault`], replaces it with the error page.
pub fn dispatch(
    label: HandlerLabel,
    meta: &RequestMeta,
    ctx: &RequestContext,
    jar: CookieJar,
    views: &dyn ViewRenderer,
    mut response: Response,
) -> Response {
    let fault = response
        .extensions_mut()
        .remove::<Fault>()
        .or_else(|| rejection_fault(response.status()));

    let Some(fault) = fault else {
        info!(
            host = %meta.host,
            user_agent = %meta.user_agent,
            method = %meta.method,
            path = %meta.path,
            handler = label.name,
            status = response.status().as_u16(),
            "Handler Info"
        );
        set_trailer(response.headers_mut(), HANDLER_HEADER, label.name);
        return response;
    };

    let status = fault.status();
    error!(
        host = %meta.host,
        user_agent = %meta.user_agent,
        method = %meta.method,
        path = %meta.path,
        handler = label.name,
        status = status.as_u16(),
        error = %fault.message(),
        "Handler Error"
    );

    let mut trailers = HeaderMap::new();
    set_trailer(&mut trailers, HANDLER_HEADER, label.name);
    set_trailer(&mut trailers, ERRMSG_HEADER, fault.message());

    let mut from_protected = ctx.from_protected;
    let mut jar = jar;
    if label.ends_session_on_failure
        && matches!(fault, Fault::Api(_))
        && status == StatusCode::INTERNAL_SERVER_ERROR
    {
        jar = clear_session(jar);
        from_protected = false;
    }

    let page = match &fault {
        Fault::Api(err) => render_error_page(views, err.status, from_protected),
        Fault::Unexpected(_) => None,
    };

    match page {
        Some(page) => (trailers, jar, page).into_response(),
        None => (trailers, jar, json_fallback()).into_response(),
    }
}

/// An error response without a [`Fault`] was produced before the handler body ran,
/// e.g. by a rejecting `Form` or `Query` extractor.
fn rejection_fault(status: StatusCode) -> Option<Fault> {
    (status.is_client_error() || status.is_server_error())
        .then(|| Fault::Unexpected(format!("request rejected: {status}")))
}

fn error_view(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some(ERROR_400_VIEW),
        StatusCode::NOT_FOUND => Some(ERROR_404_VIEW),
        StatusCode::INTERNAL_SERVER_ERROR => Some(ERROR_500_VIEW),
        _ => None,
    }
}

fn render_error_page(
    views: &dyn ViewRenderer,
    status: StatusCode,
    from_protected: bool,
) -> Option<Response> {
    let view = error_view(status)?;
    let data = view_data! {
        "isError" => true,
        "fromProtected" => from_protected,
        "title" => format!("| Error {}", status.as_u16()),
    };

    match views.render(view, &data) {
        Ok(body) => Some((status, Html(body)).into_response()),
        Err(err) => {
            error!(view, error = %err, "Error view failed to render");
            None
        }
    }
}

/// Body used when no error view can be trusted to render.
pub fn json_fallback() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "status": "failure",
            "message": "Unknown server error",
            "code": 500,
        })),
    )
        .into_response()
}

/// Renders a page for a handler, treating a render failure as unexpected.
pub fn render_view(
    views: &dyn ViewRenderer,
    view: &str,
    data: &ViewData,
) -> Result<Html<String>, AppError> {
    views.render(view, data).map(Html).map_err(AppError::unexpected)
}

fn set_trailer(headers: &mut HeaderMap, name: &'static str, value: &str) {
    let visible: String = value
        .chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect();

    if let Ok(value) = HeaderValue::from_str(&visible) {
        headers.insert(name, value);
    }
}
