//! Route handlers organized by resource

pub mod health;
pub mod pdfs;
pub mod root;
pub mod todos;

#[cfg(test)]
pub(crate) mod test_support;
