use axum::Router;
use axum::routing::{delete, get};

use crate::handler::{HandlerLabel, adapt};
use crate::state::AppState;

use super::controller::{
    create_todo, create_todo_post, delete_todo, edit_todo, edit_todo_post, todo_list,
};

pub const TODO_LIST: HandlerLabel = HandlerLabel::session_bound("todo_list");
pub const CREATE_TODO: HandlerLabel = HandlerLabel::new("create_todo");
pub const CREATE_TODO_POST: HandlerLabel = HandlerLabel::session_bound("create_todo_post");
pub const EDIT_TODO: HandlerLabel = HandlerLabel::session_bound("edit_todo");
pub const EDIT_TODO_POST: HandlerLabel = HandlerLabel::session_bound("edit_todo_post");
pub const DELETE_TODO: HandlerLabel = HandlerLabel::session_bound("delete_todo");

pub fn init_todos_router() -> Router<AppState> {
    Router::new()
        .route("/todo", get(adapt(TODO_LIST, todo_list)))
        .route(
            "/create",
            get(adapt(CREATE_TODO, create_todo)).post(adapt(CREATE_TODO_POST, create_todo_post)),
        )
        .route(
            "/edit",
            get(adapt(EDIT_TODO, edit_todo)).post(adapt(EDIT_TODO_POST, edit_todo_post)),
        )
        .route("/delete", delete(adapt(DELETE_TODO, delete_todo)))
}
