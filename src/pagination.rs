//! This module defines the common functionality for paging data.

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions to return per page when not specified in a
    /// request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

impl PaginationConfig {
    /// Coerce a requested page number to a usable value.
    ///
    /// Missing values and zero fall back to the default page.
    pub fn resolve_page(&self, page: Option<u64>) -> u64 {
        page.filter(|&page| page >= 1).unwrap_or(self.default_page)
    }

    /// Coerce a requested page size to a usable value.
    ///
    /// Missing values and zero fall back to the default page size.
    pub fn resolve_page_size(&self, per_page: Option<u64>) -> u64 {
        per_page
            .filter(|&per_page| per_page >= 1)
            .unwrap_or(self.default_page_size)
    }
}
