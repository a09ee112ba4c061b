//! Repository traits and their PostgreSQL implementation
//!
//! Handlers only see the traits, so the same router runs against
//! [`PgRepository`] in production and [`crate::db::InMemoryRepository`]
//! in tests and `--in-memory` mode.

pub mod pdfs;
pub mod todos;

use async_trait::async_trait;
use sqlx::PgPool;

use pdfdesk_core::{Pdf, PdfRequest, PdfUpdate, Todo, TodoCreate, TodoUpdate};

use crate::models::Pagination;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn todo_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "Todo",
            id: id.to_string(),
        }
    }

    pub fn pdf_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "PDF",
            id: id.to_string(),
        }
    }
}

/// Optional filter for todo listings
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoFilter {
    pub completed: Option<bool>,
}

/// Optional filter for PDF listings
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfFilter {
    pub selected: Option<bool>,
}

/// Todo persistence
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Lists todos in id order, after `filter`, windowed by `page`.
    async fn list_todos(&self, filter: TodoFilter, page: Pagination) -> Result<Vec<Todo>, DbError>;

    async fn get_todo(&self, id: i32) -> Result<Todo, DbError>;

    async fn create_todo(&self, todo: TodoCreate) -> Result<Todo, DbError>;

    /// Applies the fields present in `update`; absent fields keep their value.
    async fn update_todo(&self, id: i32, update: TodoUpdate) -> Result<Todo, DbError>;

    /// Removes the row and returns what was deleted.
    async fn delete_todo(&self, id: i32) -> Result<Todo, DbError>;
}

/// PDF persistence
#[async_trait]
pub trait PdfRepository: Send + Sync {
    async fn list_pdfs(&self, filter: PdfFilter, page: Pagination) -> Result<Vec<Pdf>, DbError>;

    async fn get_pdf(&self, id: i32) -> Result<Pdf, DbError>;

    async fn create_pdf(&self, pdf: PdfRequest) -> Result<Pdf, DbError>;

    async fn update_pdf(&self, id: i32, update: PdfUpdate) -> Result<Pdf, DbError>;

    async fn delete_pdf(&self, id: i32) -> Result<(), DbError>;
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
