//! Todo endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use pdfdesk_core::{Todo, TodoCreate, TodoUpdate};

use crate::db::TodoFilter;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{ListParams, Pagination};

/// Query string for `GET /todos/`
#[derive(Debug, Default, Deserialize)]
pub struct ListTodosQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub completed: Option<bool>,
}

impl ListTodosQuery {
    fn split(self) -> (TodoFilter, Pagination) {
        let page = Pagination::from(ListParams {
            skip: self.skip,
            limit: self.limit,
        });
        let filter = TodoFilter {
            completed: self.completed,
        };
        (filter, page)
    }
}

/// GET /todos/ - list todos in id order
async fn list_todos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTodosQuery>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let (filter, page) = query.split();
    let todos = state.todos.list_todos(filter, page).await?;
    Ok(Json(todos))
}

/// POST /todos/ - create a todo
async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TodoCreate>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.todos.create_todo(req).await?;
    tracing::debug!(id = todo.id, "Created todo");
    Ok(Json(todo))
}

/// GET /todos/{id}
async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.todos.get_todo(id).await?))
}

/// PUT /todos/{id} - partial update
async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<TodoUpdate>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.todos.update_todo(id, req).await?))
}

/// DELETE /todos/{id} - returns the deleted row
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.todos.delete_todo(id).await?;
    tracing::debug!(id, "Deleted todo");
    Ok(Json(todo))
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::http::routes::test_support::{send, TestApp};

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let app = TestApp::new();

        let (status, created) = send(
            &app.router,
            "POST",
            "/todos/",
            Some(json!({"name": "write report"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["completed"], false);

        let uri = format!("/todos/{}", created["id"]);
        let (status, fetched) = send(&app.router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn partial_update_keeps_name() {
        let app = TestApp::new();
        let (_, created) = send(
            &app.router,
            "POST",
            "/todos",
            Some(json!({"name": "buy milk"})),
        )
        .await;

        let uri = format!("/todos/{}", created["id"]);
        let (status, updated) =
            send(&app.router, "PUT", &uri, Some(json!({"completed": true}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "buy milk");
        assert_eq!(updated["completed"], true);
    }

    #[tokio::test]
    async fn delete_returns_row_then_404() {
        let app = TestApp::new();
        let (_, created) = send(
            &app.router,
            "POST",
            "/todos/",
            Some(json!({"name": "temp", "completed": true})),
        )
        .await;
        let uri = format!("/todos/{}", created["id"]);

        let (status, deleted) = send(&app.router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, created);

        let (status, body) = send(&app.router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Todo not found");
    }

    #[tokio::test]
    async fn missing_ids_are_404_not_5xx() {
        let app = TestApp::new();
        for method in ["GET", "DELETE"] {
            let (status, body) = send(&app.router, method, "/todos/999", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, "Todo not found");
        }
        let (status, _) =
            send(&app.router, "PUT", "/todos/999", Some(json!({"name": "x"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn skip_and_limit_window_the_listing() {
        let app = TestApp::new();
        for name in ["one", "two", "three", "four", "five"] {
            send(&app.router, "POST", "/todos/", Some(json!({"name": name}))).await;
        }

        let (status, page) = send(&app.router, "GET", "/todos/?skip=2&limit=1", None).await;
        assert_eq!(status, StatusCode::OK);
        let page = page.as_array().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["name"], "three");

        let (_, all) = send(&app.router, "GET", "/todos/", None).await;
        assert_eq!(all.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn completed_filter() {
        let app = TestApp::new();
        send(
            &app.router,
            "POST",
            "/todos/",
            Some(json!({"name": "done", "completed": true})),
        )
        .await;
        send(&app.router, "POST", "/todos/", Some(json!({"name": "open"}))).await;

        let (_, done) = send(&app.router, "GET", "/todos/?completed=true", None).await;
        let done = done.as_array().unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0]["name"], "done");
    }

    #[tokio::test]
    async fn missing_name_is_rejected() {
        let app = TestApp::new();
        let (status, _) =
            send(&app.router, "POST", "/todos/", Some(json!({"completed": true}))).await;
        assert!(status.is_client_error());
    }
}
