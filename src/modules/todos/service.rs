use async_trait::async_trait;
use tasknest_db::{SqlitePool, StoreError};

use crate::modules::todos::model::{NewTodo, Todo, TodoUpdate};

/// Todo records, always scoped to their owner.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create(&self, todo: NewTodo) -> Result<Todo, StoreError>;

    /// Newest first.
    async fn list_by_owner(&self, owner: i64) -> Result<Vec<Todo>, StoreError>;

    async fn get_by_id_for_owner(&self, id: i64, owner: i64) -> Result<Todo, StoreError>;

    /// Returns the updated row, or [`StoreError::NotFound`] when the owner has no
    /// todo with that id.
    async fn update(&self, change: TodoUpdate) -> Result<Todo, StoreError>;

    /// Fails with [`StoreError::NoRowsAffected`] unless exactly one row was removed.
    async fn delete_by_id_for_owner(&self, id: i64, owner: i64) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct TodoService {
    db: SqlitePool,
}

impl TodoService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoStore for TodoService {
    async fn create(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (created_by, title, description)
            VALUES (?, ?, ?)
            RETURNING id, created_by, title, description, status, created_at
            "#,
        )
        .bind(todo.created_by)
        .bind(todo.title)
        .bind(todo.description)
        .fetch_one(&self.db)
        .await?;

        Ok(todo)
    }

    async fn list_by_owner(&self, owner: i64) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, created_by, title, description, status, created_at
            FROM todos
            WHERE created_by = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await?;

        Ok(todos)
    }

    async fn get_by_id_for_owner(&self, id: i64, owner: i64) -> Result<Todo, StoreError> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, created_by, title, description, status, created_at
            FROM todos
            WHERE id = ? AND created_by = ?
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn update(&self, change: TodoUpdate) -> Result<Todo, StoreError> {
        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = ?, description = ?, status = ?
            WHERE id = ? AND created_by = ?
            RETURNING id, created_by, title, description, status, created_at
            "#,
        )
        .bind(change.title)
        .bind(change.description)
        .bind(change.status)
        .bind(change.id)
        .bind(change.created_by)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_by_id_for_owner(&self, id: i64, owner: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ? AND created_by = ?")
            .bind(id)
            .bind(owner)
            .execute(&self.db)
            .await?;

        if result.rows_affected() != 1 {
            return Err(StoreError::NoRowsAffected);
        }

        Ok(())
    }
}
