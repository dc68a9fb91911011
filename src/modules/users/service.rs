use async_trait::async_trait;
use tasknest_db::{SqlitePool, StoreError};

use crate::modules::users::model::{NewUser, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no account uses `email`.
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError>;
}

#[derive(Debug, Clone)]
pub struct UserService {
    db: SqlitePool,
}

impl UserService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UserService {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, username)
            VALUES (?, ?, ?)
            RETURNING id, email, password, username
            "#,
        )
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.username)
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, username
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound)
    }
}
