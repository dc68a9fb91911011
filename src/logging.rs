use std::fs;
use std::path::Path;
use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::response::Response;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::context::RequestMeta;
use crate::handler::{ERRMSG_HEADER, HANDLER_HEADER};
use crate::middleware::stack::{BoxFuture, Middleware, Next};

/// Outermost pipeline stage: one structured line per request.
///
/// The handler label and error message are read from the trailer headers the
/// handler adapter leaves on the response, then removed before the response goes
/// out. Responses that never reached an adapted handler (static assets, session
/// redirects) carry no label and are logged as `Assets Info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRequests;

impl Middleware for LogRequests {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            let start = Instant::now();
            let meta = RequestMeta::capture(&req);
            let request_id = uuid::Uuid::new_v4().to_string();

            let mut response = next.run(req).await;

            let latency = format!("{:.2}µs", start.elapsed().as_secs_f64() * 1_000_000.0);
            let status = response.status().as_u16();
            let handler = take_trailer(response.headers_mut(), HANDLER_HEADER);
            let errmsg = take_trailer(response.headers_mut(), ERRMSG_HEADER);

            match (&handler, &errmsg) {
                (_, Some(errmsg)) => error!(
                    request_id = %request_id,
                    host = %meta.host,
                    latency = %latency,
                    method = %meta.method,
                    path = %meta.path,
                    status,
                    user_agent = %meta.user_agent,
                    handler = handler.as_deref().unwrap_or_default(),
                    error = %errmsg,
                    "Handler Error"
                ),
                (Some(handler), None) => info!(
                    request_id = %request_id,
                    host = %meta.host,
                    latency = %latency,
                    method = %meta.method,
                    path = %meta.path,
                    status,
                    user_agent = %meta.user_agent,
                    handler = %handler,
                    "Handler Info"
                ),
                (None, None) => info!(
                    request_id = %request_id,
                    host = %meta.host,
                    latency = %latency,
                    method = %meta.method,
                    path = %meta.path,
                    status,
                    user_agent = %meta.user_agent,
                    "Assets Info"
                ),
            }

            response
        })
    }
}

fn take_trailer(headers: &mut HeaderMap, name: &str) -> Option<String> {
    headers
        .remove(name)
        .and_then(|value| value.to_str().ok().map(str::to_string))
}

/// Console output plus daily-rotated files under `log_dir`.
///
/// The filter comes from `RUST_LOG`, else `LOG_LEVEL`, else `info`.
pub fn init_tracing(log_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(log_dir)?;

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{level},sqlx=warn")))?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    // Errors only, plain text
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "tasknest.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "tasknest.json");

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new(format!("{level},sqlx=warn")));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()?;

    info!(log_dir = %log_dir.display(), "Tracing initialized");
    Ok(())
}
