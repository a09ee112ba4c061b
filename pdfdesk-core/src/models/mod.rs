//! Resource schemas
//!
//! Each resource has a stored representation plus the request shapes
//! accepted by the HTTP layer. Update variants carry `Option` fields so
//! absent keys leave the stored value untouched.

pub mod pdf;
pub mod todo;

pub use pdf::{Pdf, PdfRequest, PdfUpdate};
pub use todo::{Todo, TodoCreate, TodoUpdate};
