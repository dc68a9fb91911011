use axum::Router;
use tower_http::services::ServeDir;

use crate::handler::{HandlerLabel, adapt};
use crate::logging::LogRequests;
use crate::middleware::auth::RequireSession;
use crate::middleware::flag::ClassifySession;
use crate::middleware::stack::Stack;
use crate::modules::auth::controller::not_found;
use crate::modules::auth::router::init_auth_router;
use crate::modules::todos::router::init_todos_router;
use crate::state::AppState;

pub const NOT_FOUND: HandlerLabel = HandlerLabel::new("not_found");

/// Routes only, without the pipeline stages.
pub fn init_routes(state: AppState, assets_dir: &std::path::Path) -> Router {
    Router::new()
        .merge(init_auth_router())
        .merge(init_todos_router())
        .nest_service("/assets", ServeDir::new(assets_dir))
        .fallback(adapt(NOT_FOUND, not_found))
        .with_state(state)
}

/// The application: logging, session classification and the session guard, in
/// that order, around the routes.
pub fn init_router(state: AppState, assets_dir: &std::path::Path) -> Router {
    let jwt_config = state.jwt_config.clone();

    let pipeline = Stack::new(init_routes(state, assets_dir))
        .with(LogRequests)
        .with(ClassifySession::new(jwt_config.clone()))
        .with(RequireSession::new(jwt_config));

    Router::new().fallback_service(pipeline)
}
