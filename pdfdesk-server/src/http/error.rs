//! API error type with IntoResponse
//!
//! Errors render as `text/plain` bodies carrying the message, with the
//! matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::repos::DbError;
use crate::storage::ObjectStoreError;

const INTERNAL_MESSAGE: &str = "Internal Server Error";
const CREDENTIALS_MESSAGE: &str = "Error in AWS credentials";
const STORAGE_UNAVAILABLE_MESSAGE: &str = "Error uploading file to object storage";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// Malformed request (400)
    BadRequest { message: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Object store failure (500, logged)
    ObjectStore(ObjectStoreError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::NotFound { resource } => {
                (StatusCode::NOT_FOUND, format!("{} not found", resource))
            }
            Self::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into()),
            Self::ObjectStore(e) if e.is_credentials() => (
                StatusCode::INTERNAL_SERVER_ERROR,
                CREDENTIALS_MESSAGE.into(),
            ),
            Self::ObjectStore(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                STORAGE_UNAVAILABLE_MESSAGE.into(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            // Log the actual error, return a fixed message
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::ObjectStore(e) => tracing::error!("Object store error: {}", e),
            _ => {}
        }

        self.status_and_message().into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, .. } => Self::NotFound { resource },
            _ => Self::Database(e),
        }
    }
}

impl From<ObjectStoreError> for ApiError {
    fn from(e: ObjectStoreError) -> Self {
        Self::ObjectStore(e)
    }
}
