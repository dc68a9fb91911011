use axum::Router;
use axum::routing::{get, post};

use crate::handler::{HandlerLabel, adapt};
use crate::state::AppState;

use super::controller::{home, login, login_post, logout, register, register_post};

pub const HOME: HandlerLabel = HandlerLabel::new("home");
pub const REGISTER: HandlerLabel = HandlerLabel::new("register");
pub const REGISTER_POST: HandlerLabel = HandlerLabel::new("register_post");
pub const LOGIN: HandlerLabel = HandlerLabel::new("login");
pub const LOGIN_POST: HandlerLabel = HandlerLabel::new("login_post");
pub const LOGOUT: HandlerLabel = HandlerLabel::new("logout");

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/", get(adapt(HOME, home)))
        .route(
            "/register",
            get(adapt(REGISTER, register)).post(adapt(REGISTER_POST, register_post)),
        )
        .route(
            "/login",
            get(adapt(LOGIN, login)).post(adapt(LOGIN_POST, login_post)),
        )
        .route("/logout", post(adapt(LOGOUT, logout)))
}
