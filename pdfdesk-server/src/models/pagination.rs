//! Offset/limit pagination

use serde::Deserialize;

/// Default number of rows returned by list endpoints
pub const DEFAULT_LIMIT: u32 = 100;

/// Offset/limit window over a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Rows to skip
    pub skip: u32,
    /// Maximum rows to return
    pub limit: u32,
}

impl Pagination {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        self.skip as u64
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Window an already-ordered iterator.
    pub fn apply<I: Iterator>(&self, items: I) -> impl Iterator<Item = I::Item> {
        items.skip(self.skip as usize).take(self.limit as usize)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query parameters for pagination (`?skip=&limit=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl From<ListParams> for Pagination {
    fn from(params: ListParams) -> Self {
        Self::new(params.skip.unwrap_or(0), params.limit.unwrap_or(DEFAULT_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_list_endpoints() {
        let p = Pagination::from(ListParams::default());
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 100);
    }

    #[test]
    fn apply_windows_in_order() {
        let p = Pagination::new(2, 1);
        let window: Vec<_> = p.apply(1..=5).collect();
        assert_eq!(window, vec![3]);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.apply(1..=5).count(), 0);
    }

    #[test]
    fn skip_past_end_is_empty() {
        let p = Pagination::new(10, 5);
        assert_eq!(p.apply(1..=5).count(), 0);
    }
}
