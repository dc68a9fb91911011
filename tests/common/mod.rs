#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use http_body_util::BodyExt;
use tasknest::modules::todos::model::{NewTodo, Todo, TodoUpdate};
use tasknest::modules::todos::service::TodoStore;
use tasknest::modules::users::model::{NewUser, User};
use tasknest::modules::users::service::UserStore;
use tasknest::router::init_router;
use tasknest::state::AppState;
use tasknest::views::HtmlViews;
use tasknest_auth::create_session_token;
use tasknest_config::JwtConfig;
use tasknest_core::hash_password;
use tasknest_db::{StoreError, init_memory_pool};

pub const TEST_SECRET: &str = "integration_test_secret";
pub const TEST_PASSWORD: &str = "correct horse";

/// In-memory users. Flip `unavailable` to simulate a lost database.
#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<User>>,
    pub unavailable: AtomicBool,
    pub creates: AtomicUsize,
}

impl MemoryUsers {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, email: &str) -> Option<User> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    /// Inserts an account whose password is [`TEST_PASSWORD`].
    pub fn seed(&self, email: &str, username: &str) -> User {
        let mut rows = self.rows.lock().unwrap();
        let user = User {
            id: rows.len() as i64 + 1,
            email: email.to_string(),
            password: hash_password(TEST_PASSWORD).unwrap(),
            username: username.to_string(),
        };
        rows.push(user.clone());
        user
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("users table unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("email".into()));
        }

        let created = User {
            id: rows.len() as i64 + 1,
            email: user.email,
            password: user.password_hash,
            username: user.username,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.check()?;
        self.get(email).ok_or(StoreError::NotFound)
    }
}

/// In-memory todos. `calls` counts every store operation.
#[derive(Default)]
pub struct MemoryTodos {
    rows: Mutex<Vec<Todo>>,
    pub unavailable: AtomicBool,
    pub calls: AtomicUsize,
}

impl MemoryTodos {
    pub fn all(&self) -> Vec<Todo> {
        self.rows.lock().unwrap().clone()
    }

    pub fn seed(&self, owner: i64, title: &str) -> Todo {
        let mut rows = self.rows.lock().unwrap();
        let todo = Todo {
            id: rows.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            created_by: owner,
            title: title.to_string(),
            description: None,
            status: false,
            created_at: chrono::Utc::now().naive_utc(),
        };
        rows.push(todo.clone());
        todo
    }

    fn check(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("todos table unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MemoryTodos {
    async fn create(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        self.check()?;
        let mut created = self.seed(todo.created_by, &todo.title);
        created.description = todo.description;

        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|t| t.id == created.id) {
            *row = created.clone();
        }
        Ok(created)
    }

    async fn list_by_owner(&self, owner: i64) -> Result<Vec<Todo>, StoreError> {
        self.check()?;
        let mut todos: Vec<Todo> = self
            .all()
            .into_iter()
            .filter(|t| t.created_by == owner)
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(todos)
    }

    async fn get_by_id_for_owner(&self, id: i64, owner: i64) -> Result<Todo, StoreError> {
        self.check()?;
        self.all()
            .into_iter()
            .find(|t| t.id == id && t.created_by == owner)
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, change: TodoUpdate) -> Result<Todo, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == change.id && t.created_by == change.created_by)
            .ok_or(StoreError::NotFound)?;

        row.title = change.title;
        row.description = change.description;
        row.status = change.status;
        Ok(row.clone())
    }

    async fn delete_by_id_for_owner(&self, id: i64, owner: i64) -> Result<(), StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| !(t.id == id && t.created_by == owner));

        if before - rows.len() != 1 {
            return Err(StoreError::NoRowsAffected);
        }
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUsers>,
    pub todos: Arc<MemoryTodos>,
    pub jwt_config: JwtConfig,
}

impl TestApp {
    /// A `jwt=<token>` cookie header value for the given identity.
    pub fn session_for(&self, id: i64, username: &str) -> String {
        let token = create_session_token(id, username, "UTC", &self.jwt_config).unwrap();
        format!("jwt={token}")
    }
}

pub fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

pub fn setup_test_app() -> TestApp {
    let users = Arc::new(MemoryUsers::default());
    let todos = Arc::new(MemoryTodos::default());
    let jwt_config = jwt_config();

    let state = AppState::new(
        users.clone(),
        todos.clone(),
        Arc::new(HtmlViews),
        jwt_config.clone(),
    );

    TestApp {
        router: init_router(state, &assets_dir()),
        users,
        todos,
        jwt_config,
    }
}

/// The full application over a fresh in-memory SQLite database.
pub async fn setup_sqlite_app() -> Router {
    let db = init_memory_pool().await.unwrap();
    let state = AppState::from_pool(db, jwt_config());
    init_router(state, &assets_dir())
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn delete(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn location<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// All `Set-Cookie` headers on the response.
pub fn set_cookies<B>(response: &Response<B>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// The `Set-Cookie` header for `name`, if any.
pub fn set_cookie<B>(response: &Response<B>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&prefix))
}

/// Value part of the `Set-Cookie` header for `name`.
pub fn cookie_value<B>(response: &Response<B>, name: &str) -> Option<String> {
    let header = set_cookie(response, name)?;
    let pair = header.split(';').next()?;
    pair.split_once('=').map(|(_, value)| value.to_string())
}

/// Decoded body of the flash cookie `kind` set by the response.
pub fn flash<B>(response: &Response<B>, kind: &str) -> Option<String> {
    let encoded = cookie_value(response, kind)?;
    let bytes = URL_SAFE.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
