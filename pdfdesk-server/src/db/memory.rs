//! In-memory repository implementation.
//!
//! Backs the router in tests and in `pdfdesk serve --in-memory`. Ids come
//! from per-table counters that only move forward, so deleted ids are never
//! handed out again.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use pdfdesk_core::{Pdf, PdfRequest, PdfUpdate, Todo, TodoCreate, TodoUpdate};

use super::repos::{DbError, PdfFilter, PdfRepository, TodoFilter, TodoRepository};
use crate::models::Pagination;

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory storage backend.
///
/// Data is not persisted and is lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    todos: Arc<RwLock<Table<Todo>>>,
    pdfs: Arc<RwLock<Table<Pdf>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored PDF rows.
    pub async fn pdf_count(&self) -> usize {
        self.pdfs.read().await.rows.len()
    }
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn list_todos(&self, filter: TodoFilter, page: Pagination) -> Result<Vec<Todo>, DbError> {
        let table = self.todos.read().await;
        let matching = table
            .rows
            .values()
            .filter(|t| filter.completed.map_or(true, |c| t.completed == c));
        Ok(page.apply(matching).cloned().collect())
    }

    async fn get_todo(&self, id: i32) -> Result<Todo, DbError> {
        let table = self.todos.read().await;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::todo_not_found(id))
    }

    async fn create_todo(&self, todo: TodoCreate) -> Result<Todo, DbError> {
        let mut table = self.todos.write().await;
        let id = table.next_id();
        let todo = Todo::from_create(id, todo);
        table.rows.insert(id, todo.clone());
        Ok(todo)
    }

    async fn update_todo(&self, id: i32, update: TodoUpdate) -> Result<Todo, DbError> {
        let mut table = self.todos.write().await;
        let todo = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DbError::todo_not_found(id))?;
        update.apply_to(todo);
        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: i32) -> Result<Todo, DbError> {
        let mut table = self.todos.write().await;
        table
            .rows
            .remove(&id)
            .ok_or_else(|| DbError::todo_not_found(id))
    }
}

#[async_trait]
impl PdfRepository for InMemoryRepository {
    async fn list_pdfs(&self, filter: PdfFilter, page: Pagination) -> Result<Vec<Pdf>, DbError> {
        let table = self.pdfs.read().await;
        let matching = table
            .rows
            .values()
            .filter(|p| filter.selected.map_or(true, |s| p.selected == s));
        Ok(page.apply(matching).cloned().collect())
    }

    async fn get_pdf(&self, id: i32) -> Result<Pdf, DbError> {
        let table = self.pdfs.read().await;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::pdf_not_found(id))
    }

    async fn create_pdf(&self, pdf: PdfRequest) -> Result<Pdf, DbError> {
        let mut table = self.pdfs.write().await;
        let id = table.next_id();
        let pdf = Pdf::from_request(id, pdf);
        table.rows.insert(id, pdf.clone());
        Ok(pdf)
    }

    async fn update_pdf(&self, id: i32, update: PdfUpdate) -> Result<Pdf, DbError> {
        let mut table = self.pdfs.write().await;
        let pdf = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DbError::pdf_not_found(id))?;
        update.apply_to(pdf);
        Ok(pdf.clone())
    }

    async fn delete_pdf(&self, id: i32) -> Result<(), DbError> {
        let mut table = self.pdfs.write().await;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::pdf_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(name: &str) -> TodoCreate {
        TodoCreate {
            name: name.to_string(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn default_repository_starts_empty() {
        let repo = InMemoryRepository::default();

        let todos = repo
            .list_todos(TodoFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert!(todos.is_empty());
        assert_eq!(repo.pdf_count().await, 0);

        let first = repo.create_todo(todo("first")).await.unwrap();
        assert_eq!(first.id, 1);
    }

    #[tokio::test]
    async fn ids_are_monotonic_and_never_reused() {
        let repo = InMemoryRepository::new();

        let first = repo.create_todo(todo("a")).await.unwrap();
        let second = repo.create_todo(todo("b")).await.unwrap();
        repo.delete_todo(second.id).await.unwrap();
        let third = repo.create_todo(todo("c")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn list_applies_skip_and_limit_in_id_order() {
        let repo = InMemoryRepository::new();
        for name in ["one", "two", "three", "four", "five"] {
            repo.create_todo(todo(name)).await.unwrap();
        }

        let page = repo
            .list_todos(TodoFilter::default(), Pagination::new(2, 1))
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "three");
    }

    #[tokio::test]
    async fn completed_filter() {
        let repo = InMemoryRepository::new();
        let done = repo.create_todo(todo("done")).await.unwrap();
        repo.create_todo(todo("open")).await.unwrap();
        repo.update_todo(
            done.id,
            TodoUpdate {
                name: None,
                completed: Some(true),
            },
        )
        .await
        .unwrap();

        let completed = repo
            .list_todos(TodoFilter { completed: Some(true) }, Pagination::default())
            .await
            .unwrap();

        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].name, "done");
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let repo = InMemoryRepository::new();

        assert!(matches!(
            repo.get_todo(42).await,
            Err(DbError::NotFound { resource: "Todo", .. })
        ));
        assert!(matches!(
            repo.update_pdf(42, PdfUpdate::default()).await,
            Err(DbError::NotFound { resource: "PDF", .. })
        ));
        assert!(matches!(
            repo.delete_pdf(42).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn pdf_partial_update() {
        let repo = InMemoryRepository::new();
        let pdf = repo
            .create_pdf(PdfRequest {
                name: "spec.pdf".into(),
                selected: false,
                file: "spec.pdf".into(),
            })
            .await
            .unwrap();

        let updated = repo
            .update_pdf(
                pdf.id,
                PdfUpdate {
                    name: Some("final.pdf".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "final.pdf");
        assert_eq!(updated.file, "spec.pdf");
        assert!(!updated.selected);
        assert_eq!(repo.pdf_count().await, 1);
    }
}
