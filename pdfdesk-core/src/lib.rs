//! pdfdesk-core: schema types and configuration shared by the server and CLI.

pub mod config;
pub mod error;
pub mod models;

pub use config::{DatabaseSettings, ObjectStoreSettings, Settings};
pub use error::{CoreError, Result};
pub use models::{Pdf, PdfRequest, PdfUpdate, Todo, TodoCreate, TodoUpdate};
