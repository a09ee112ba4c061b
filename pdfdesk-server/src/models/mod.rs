//! Request-side helper types

pub mod pagination;

pub use pagination::{ListParams, Pagination};
