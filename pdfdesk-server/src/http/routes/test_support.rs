//! Router test helpers

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::db::InMemoryRepository;
use crate::http::server::{build_router, AppState, ServerConfig};
use crate::storage::{MemoryObjectStore, ObjectStore};

pub const BUCKET: &str = "test-bucket";

/// Router wired to in-memory backends, with handles kept for assertions.
pub struct TestApp {
    pub router: Router,
    pub repo: InMemoryRepository,
    pub objects: MemoryObjectStore,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_objects(MemoryObjectStore::new(BUCKET))
    }

    pub fn with_objects(objects: MemoryObjectStore) -> Self {
        let repo = InMemoryRepository::new();
        let router = Self::router_for(repo.clone(), Arc::new(objects.clone()));
        Self {
            router,
            repo,
            objects,
        }
    }

    pub fn router_for(repo: InMemoryRepository, objects: Arc<dyn ObjectStore>) -> Router {
        let repo = Arc::new(repo);
        let state = AppState::new(repo.clone(), repo, objects);
        build_router(state, &ServerConfig::default())
    }
}

/// Send a request and return status plus the body parsed as JSON
/// (or as a JSON string when the body is plain text).
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    json: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match json {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    assert_eq!(
        response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
        "*",
        "missing CORS header on {} {}",
        method,
        uri
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}
