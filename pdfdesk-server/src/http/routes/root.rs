//! Greeting and diagnostic endpoints

use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

const GREETING: &str = "Hello Todo World - Your CRUD API is ready!";

#[derive(Serialize)]
pub struct CorsTestResponse {
    pub message: &'static str,
    pub cors_headers: &'static str,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct PreflightResponse {
    pub message: &'static str,
}

#[derive(Deserialize)]
pub struct ItemQuery {
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct ItemResponse {
    pub item_id: i64,
    pub q: Option<String>,
}

/// GET /
async fn greeting() -> Json<&'static str> {
    Json(GREETING)
}

/// GET /cors-test
async fn cors_test() -> Json<CorsTestResponse> {
    Json(CorsTestResponse {
        message: "CORS is working!",
        cors_headers: "Should be present in response",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// OPTIONS /cors-test without CORS request headers
async fn cors_test_preflight() -> Json<PreflightResponse> {
    Json(PreflightResponse {
        message: "CORS preflight successful",
    })
}

/// GET /items/{item_id}
async fn read_item(Path(item_id): Path<i64>, Query(query): Query<ItemQuery>) -> Json<ItemResponse> {
    Json(ItemResponse { item_id, q: query.q })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(greeting))
        .route("/cors-test", get(cors_test).options(cors_test_preflight))
        .route("/items/{item_id}", get(read_item))
}
