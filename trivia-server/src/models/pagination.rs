//! Offset/limit pagination over question lists

use serde::Deserialize;

/// Default page size when only `page` is given
pub const DEFAULT_LIMIT: u32 = 10;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Build pagination from optional query values.
    ///
    /// Returns `None` when neither value is present, meaning "no pagination".
    /// A missing page defaults to 1 and a missing limit to 10.
    pub fn from_params(page: Option<u32>, limit: Option<u32>) -> Option<Self> {
        if page.is_none() && limit.is_none() {
            return None;
        }
        Some(Self::new(page.unwrap_or(1), limit.unwrap_or(DEFAULT_LIMIT)))
    }

    /// Zero-based offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Slice `[offset, offset + limit)` out of `items`.
    ///
    /// Page 0 has no items.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if self.page == 0 {
            return &[];
        }
        let len = items.len() as u64;
        let start = self.offset().min(len);
        let end = start.saturating_add(u64::from(self.limit)).min(len);
        &items[start as usize..end as usize]
    }
}

/// Query parameters for pagination
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PaginationParams {
    pub fn resolve(self) -> Option<Pagination> {
        Pagination::from_params(self.page, self.limit)
    }
}
