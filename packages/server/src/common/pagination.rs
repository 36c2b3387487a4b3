//! Page-number pagination types
//!
//! Search responses are paged by `page` (1-based) and `page_size`. Paging is
//! forgiving by contract: a page below 1 is clamped to 1, an unusable page size
//! falls back to the configured default, and a page past the end is simply
//! empty. None of these is an error.
//!
//! # Usage
//!
//! ```rust
//! use directory_core::common::pagination::{PageArgs, PageSettings};
//!
//! let args = PageArgs { page: Some(0), page_size: Some(-5) };
//! let validated = args.validate(&PageSettings::default());
//! assert_eq!(validated.page, 1);
//! assert_eq!(validated.page_size, 10);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Settings
// ============================================================================

/// Bounds applied to caller-supplied page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

// ============================================================================
// Pagination Arguments
// ============================================================================

/// Raw pagination input as received from a caller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageArgs {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageArgs {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Normalize the arguments. Never fails.
    pub fn validate(&self, settings: &PageSettings) -> ValidatedPageArgs {
        let page = self.page.unwrap_or(1).clamp(1, u32::MAX as i64) as u32;

        let page_size = match self.page_size {
            Some(size) if size >= 1 && size <= settings.max_page_size as i64 => size as u32,
            _ => settings.default_page_size.max(1),
        };

        ValidatedPageArgs { page, page_size }
    }
}

/// Validated and normalized pagination arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPageArgs {
    /// 1-based page number.
    pub page: u32,
    /// Number of items per page (1..=max).
    pub page_size: u32,
}

impl ValidatedPageArgs {
    /// Number of items skipped before this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.page_size as usize)
    }

    /// Number of pages needed for `total` items.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size as usize)
    }

    /// Cut this page out of an already filtered and ordered result set.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_args_defaults() {
        let validated = PageArgs::default().validate(&PageSettings::default());
        assert_eq!(validated.page, 1);
        assert_eq!(validated.page_size, 10);
    }

    #[test]
    fn test_page_clamped_to_one() {
        let settings = PageSettings::default();
        assert_eq!(PageArgs::new(0, 10).validate(&settings).page, 1);
        assert_eq!(PageArgs::new(-3, 10).validate(&settings).page, 1);
    }

    #[test]
    fn test_invalid_page_size_falls_back_to_default() {
        let settings = PageSettings {
            default_page_size: 20,
            max_page_size: 50,
        };
        assert_eq!(PageArgs::new(1, 0).validate(&settings).page_size, 20);
        assert_eq!(PageArgs::new(1, 51).validate(&settings).page_size, 20);
        assert_eq!(PageArgs::new(1, 50).validate(&settings).page_size, 50);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let validated = PageArgs::new(4, 5).validate(&PageSettings::default());
        let items: Vec<i32> = (1..=12).collect();
        assert!(validated.slice(items).is_empty());
    }

    #[test]
    fn test_slice_and_total_pages() {
        let validated = PageArgs::new(3, 5).validate(&PageSettings::default());
        let items: Vec<i32> = (1..=12).collect();
        assert_eq!(validated.slice(items), vec![11, 12]);
        assert_eq!(validated.total_pages(12), 3);
        assert_eq!(validated.total_pages(0), 0);
    }
}
