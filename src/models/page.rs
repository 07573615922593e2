//! Pagination parameters shared by the list endpoints

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// List query parameters (API). Page index is zero-based.
#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index (default: 0)
    #[serde(default)]
    #[validate(range(min = 0, message = "Page index cannot be negative."))]
    pub page_index: i64,
    /// Items per page (default: 10). Zero yields an empty page with the total count.
    #[serde(default = "default_page_size")]
    #[validate(range(min = 0, message = "Page size cannot be negative."))]
    pub page_size: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A window `[index * size, index * size + size)` over an ordered table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub index: i64,
    pub size: i64,
}

impl Page {
    pub fn new(index: i64, size: i64) -> Self {
        Self { index, size }
    }

    pub fn offset(&self) -> i64 {
        self.index.saturating_mul(self.size)
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

impl From<PageQuery> for Page {
    fn from(q: PageQuery) -> Self {
        Self::new(q.page_index, q.page_size)
    }
}
