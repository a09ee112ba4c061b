//! Todo repository
//!
//! Each operation is a single statement:
//! - update: COALESCE keeps columns the request did not supply
//! - delete: RETURNING hands back the removed row

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use pdfdesk_core::{Todo, TodoCreate, TodoUpdate};

use super::{DbError, PgRepository, TodoFilter, TodoRepository};
use crate::models::Pagination;

fn todo_from_row(row: &PgRow) -> Todo {
    Todo {
        id: row.get("id"),
        name: row.get("name"),
        completed: row.get("completed"),
    }
}

#[async_trait]
impl TodoRepository for PgRepository {
    async fn list_todos(&self, filter: TodoFilter, page: Pagination) -> Result<Vec<Todo>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, completed
            FROM todos
            WHERE ($1::BOOLEAN IS NULL OR completed = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.completed)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.iter().map(todo_from_row).collect())
    }

    async fn get_todo(&self, id: i32) -> Result<Todo, DbError> {
        let row = sqlx::query("SELECT id, name, completed FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DbError::todo_not_found(id))?;

        Ok(todo_from_row(&row))
    }

    async fn create_todo(&self, todo: TodoCreate) -> Result<Todo, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO todos (name, completed)
            VALUES ($1, $2)
            RETURNING id, name, completed
            "#,
        )
        .bind(&todo.name)
        .bind(todo.completed)
        .fetch_one(self.pool())
        .await?;

        Ok(todo_from_row(&row))
    }

    async fn update_todo(&self, id: i32, update: TodoUpdate) -> Result<Todo, DbError> {
        let row = sqlx::query(
            r#"
            UPDATE todos
            SET name = COALESCE($2, name),
                completed = COALESCE($3, completed)
            WHERE id = $1
            RETURNING id, name, completed
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.completed)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| DbError::todo_not_found(id))?;

        Ok(todo_from_row(&row))
    }

    async fn delete_todo(&self, id: i32) -> Result<Todo, DbError> {
        let row = sqlx::query("DELETE FROM todos WHERE id = $1 RETURNING id, name, completed")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DbError::todo_not_found(id))?;

        Ok(todo_from_row(&row))
    }
}
