//! PDF repository

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use pdfdesk_core::{Pdf, PdfRequest, PdfUpdate};

use super::{DbError, PdfFilter, PdfRepository, PgRepository};
use crate::models::Pagination;

fn pdf_from_row(row: &PgRow) -> Pdf {
    Pdf {
        id: row.get("id"),
        name: row.get("name"),
        selected: row.get("selected"),
        file: row.get("file"),
    }
}

#[async_trait]
impl PdfRepository for PgRepository {
    async fn list_pdfs(&self, filter: PdfFilter, page: Pagination) -> Result<Vec<Pdf>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, selected, file
            FROM pdfs
            WHERE ($1::BOOLEAN IS NULL OR selected = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.selected)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.iter().map(pdf_from_row).collect())
    }

    async fn get_pdf(&self, id: i32) -> Result<Pdf, DbError> {
        let row = sqlx::query("SELECT id, name, selected, file FROM pdfs WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DbError::pdf_not_found(id))?;

        Ok(pdf_from_row(&row))
    }

    async fn create_pdf(&self, pdf: PdfRequest) -> Result<Pdf, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO pdfs (name, selected, file)
            VALUES ($1, $2, $3)
            RETURNING id, name, selected, file
            "#,
        )
        .bind(&pdf.name)
        .bind(pdf.selected)
        .bind(&pdf.file)
        .fetch_one(self.pool())
        .await?;

        Ok(pdf_from_row(&row))
    }

    async fn update_pdf(&self, id: i32, update: PdfUpdate) -> Result<Pdf, DbError> {
        let row = sqlx::query(
            r#"
            UPDATE pdfs
            SET name = COALESCE($2, name),
                selected = COALESCE($3, selected),
                file = COALESCE($4, file)
            WHERE id = $1
            RETURNING id, name, selected, file
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.selected)
        .bind(update.file)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| DbError::pdf_not_found(id))?;

        Ok(pdf_from_row(&row))
    }

    async fn delete_pdf(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM pdfs WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::pdf_not_found(id));
        }
        Ok(())
    }
}
