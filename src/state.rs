use std::sync::Arc;

use tasknest_config::JwtConfig;
use tasknest_db::SqlitePool;

use crate::modules::todos::service::{TodoService, TodoStore};
use crate::modules::users::service::{UserService, UserStore};
use crate::views::{HtmlViews, ViewRenderer};

/// Dependencies shared by every handler, wired once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub todos: Arc<dyn TodoStore>,
    pub views: Arc<dyn ViewRenderer>,
    pub jwt_config: JwtConfig,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        todos: Arc<dyn TodoStore>,
        views: Arc<dyn ViewRenderer>,
        jwt_config: JwtConfig,
    ) -> Self {
        Self {
            users,
            todos,
            views,
            jwt_config,
        }
    }

    /// SQLite-backed stores and the built-in HTML views.
    pub fn from_pool(db: SqlitePool, jwt_config: JwtConfig) -> Self {
        Self::new(
            Arc::new(UserService::new(db.clone())),
            Arc::new(TodoService::new(db)),
            Arc::new(HtmlViews),
            jwt_config,
        )
    }
}
