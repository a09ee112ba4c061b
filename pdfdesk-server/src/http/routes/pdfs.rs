//! PDF endpoints, including multipart upload to the object store

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::Deserialize;

use pdfdesk_core::{Pdf, PdfRequest, PdfUpdate};

use crate::db::PdfFilter;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{ListParams, Pagination};

/// Query string for `GET /pdfs/`
#[derive(Debug, Default, Deserialize)]
pub struct ListPdfsQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub selected: Option<bool>,
}

impl ListPdfsQuery {
    fn split(self) -> (PdfFilter, Pagination) {
        let page = Pagination::from(ListParams {
            skip: self.skip,
            limit: self.limit,
        });
        let filter = PdfFilter {
            selected: self.selected,
        };
        (filter, page)
    }
}

/// Query string for `POST /pdfs/upload`
#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    pub key: Option<String>,
}

/// Parts collected from an upload body
#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    contents: Option<Bytes>,
    key: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    form.file_name = field.file_name().map(str::to_owned);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(e.body_text()))?;
                    form.contents = Some(data);
                }
                "key" => {
                    let key = field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(e.body_text()))?;
                    form.key = Some(key);
                }
                other => tracing::debug!(field = other, "Ignoring multipart field"),
            }
        }

        Ok(form)
    }
}

/// GET /pdfs/ - list PDFs in id order
async fn list_pdfs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListPdfsQuery>,
) -> Result<Json<Vec<Pdf>>, ApiError> {
    let (filter, page) = query.split();
    Ok(Json(state.pdfs.list_pdfs(filter, page).await?))
}

/// POST /pdfs/ - create a PDF row from an existing reference
async fn create_pdf(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PdfRequest>,
) -> Result<Json<Pdf>, ApiError> {
    let pdf = state.pdfs.create_pdf(req).await?;
    tracing::debug!(id = pdf.id, "Created PDF");
    Ok(Json(pdf))
}

/// GET /pdfs/{id}
async fn get_pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Pdf>, ApiError> {
    Ok(Json(state.pdfs.get_pdf(id).await?))
}

/// PUT /pdfs/{id} - partial update
async fn update_pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<PdfUpdate>,
) -> Result<Json<Pdf>, ApiError> {
    Ok(Json(state.pdfs.update_pdf(id, req).await?))
}

/// DELETE /pdfs/{id} - returns `true`
async fn delete_pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<bool>, ApiError> {
    state.pdfs.delete_pdf(id).await?;
    tracing::debug!(id, "Deleted PDF");
    Ok(Json(true))
}

/// POST /pdfs/upload - store the file, then record it
///
/// The row is only inserted once the object store has accepted the bytes.
async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    multipart: Multipart,
) -> Result<Json<Pdf>, ApiError> {
    let form = UploadForm::read(multipart).await?;

    let contents = form
        .contents
        .ok_or_else(|| ApiError::bad_request("Missing 'file' part"))?;
    let file_name = form
        .file_name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Uploaded file has no file name"))?;
    let key = query
        .key
        .or(form.key)
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| file_name.clone());

    let url = state.objects.put(&key, contents).await?;
    tracing::info!(key = %key, url = %url, "Uploaded PDF");

    let pdf = state
        .pdfs
        .create_pdf(PdfRequest {
            name: file_name,
            selected: false,
            file: url,
        })
        .await?;
    Ok(Json(pdf))
}

/// PDF routes
pub fn router(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/pdfs", get(list_pdfs).post(create_pdf))
        .route("/pdfs/", get(list_pdfs).post(create_pdf))
        .route(
            "/pdfs/upload",
            post(upload_pdf).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/pdfs/{id}",
            get(get_pdf).put(update_pdf).delete(delete_pdf),
        )
}
