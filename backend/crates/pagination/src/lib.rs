//! Offset pagination primitives for catalogue listings.
//!
//! A [`PageRequest`] names a zero-based page together with a page size that
//! can be capped by the caller. A [`Page`] carries one slice of results plus
//! the totals a client needs to walk the remaining pages.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::bounded(1, 100, 50).unwrap();
//! assert_eq!(request.page_size(), 50);
//! assert_eq!(request.offset(), 50);
//!
//! let page = Page::new(vec!["b"], request, 51);
//! assert_eq!(page.total_pages(), 2);
//! assert!(!page.has_next());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The effective page size was zero.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Zero-based page request.
///
/// ## Invariants
/// - `page_size` is always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request for `page` holding at most `page_size` items.
    ///
    /// # Errors
    /// Returns [`PageRequestError::ZeroPageSize`] when `page_size` is zero.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self { page, page_size })
    }

    /// Build a request whose page size is silently capped at `max_page_size`.
    ///
    /// # Errors
    /// Returns [`PageRequestError::ZeroPageSize`] when the capped page size
    /// is zero.
    pub const fn bounded(
        page: u32,
        page_size: u32,
        max_page_size: u32,
    ) -> Result<Self, PageRequestError> {
        let capped = if page_size > max_page_size {
            max_page_size
        } else {
            page_size
        };
        Self::new(page, capped)
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items preceding the first item of this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }
}

/// One page of results plus navigation totals.
///
/// Serialises as
/// `{"content":[...],"page":0,"pageSize":50,"totalElements":N,"totalPages":P}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    content: Vec<T>,
    page: u32,
    page_size: u32,
    total_elements: u64,
    total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from its content, the request that produced it and
    /// the total number of elements across all pages.
    #[must_use]
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page,
            page_size: request.page_size,
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(request.page_size)),
        }
    }

    /// Items on this page, in store order.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size used to slice the results.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Number of pages needed to hold every item.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Whether a later page holds more items.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Transform every item while keeping the navigation totals.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
