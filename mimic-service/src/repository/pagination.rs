//! Query filters and page-window arithmetic
//!
//! A [`QueryFilter`] is the caller's immutable description of which records it
//! wants: an optional "modified since" cut-off and an optional page window.
//! The page window is a single [`PageRequest`], so a filter can never carry a
//! page number without a page size or the other way around.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Query parameter carrying the 1-based page number
pub const PAGE_PARAM: &str = "page";
/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "pageSize";
/// Query parameter carrying the RFC 3339 "modified since" timestamp
pub const MODIFIED_SINCE_PARAM: &str = "modifiedSince";

/// A page window: 1-based page number plus page size, both at least 1
///
/// # Example
///
/// ```rust
/// use mimic_service::repository::PageRequest;
///
/// let page = PageRequest::new(3, 20).unwrap();
/// assert_eq!(page.offset(), 40);
/// assert_eq!(page.limit(), 20);
/// assert!(PageRequest::new(0, 20).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Create a page window, rejecting a zero page number or page size
    #[must_use]
    pub const fn new(number: u32, size: u32) -> Option<Self> {
        if number == 0 || size == 0 {
            None
        } else {
            Some(Self { number, size })
        }
    }

    /// The 1-based page number
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// The page size
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of records to skip: `(page - 1) * pageSize`
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.number as u64 - 1) * self.size as u64
    }

    /// Number of records to take
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size as u64
    }

    /// The following page with the same size
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            number: self.number.saturating_add(1),
            size: self.size,
        }
    }

    /// The preceding page with the same size, if this is not the first page
    #[must_use]
    pub const fn previous(&self) -> Option<Self> {
        if self.number > 1 {
            Some(Self {
                number: self.number - 1,
                size: self.size,
            })
        } else {
            None
        }
    }
}

/// Immutable filter over the word collection
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use mimic_service::repository::{PageRequest, QueryFilter};
///
/// let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let filter = QueryFilter::new()
///     .with_modified_since(since)
///     .with_page(PageRequest::new(2, 10).unwrap());
///
/// assert_eq!(filter.page().map(|p| p.number()), Some(2));
/// assert_eq!(filter.modified_since(), Some(since));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryFilter {
    modified_since: Option<DateTime<Utc>>,
    page: Option<PageRequest>,
}

impl QueryFilter {
    /// A filter matching every record, unpaginated
    #[must_use]
    pub const fn new() -> Self {
        Self {
            modified_since: None,
            page: None,
        }
    }

    /// Keep only records created or updated strictly after `since`
    #[must_use]
    pub fn with_modified_since(mut self, since: DateTime<Utc>) -> Self {
        self.modified_since = Some(since);
        self
    }

    /// Window the filtered set to a single page
    #[must_use]
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    /// The "modified since" cut-off, if any
    #[must_use]
    pub fn modified_since(&self) -> Option<DateTime<Utc>> {
        self.modified_since
    }

    /// The requested page window, if pagination was requested
    #[must_use]
    pub fn page(&self) -> Option<PageRequest> {
        self.page
    }

    /// Whether a record with the given timestamps passes the filter
    ///
    /// A record qualifies when either its creation or its last-update
    /// timestamp is strictly newer than the cut-off, so a record created after
    /// the cut-off and never updated is included.
    #[must_use]
    pub fn matches(&self, created_at: DateTime<Utc>, updated_at: Option<DateTime<Utc>>) -> bool {
        match self.modified_since {
            None => true,
            Some(since) => created_at > since || updated_at.is_some_and(|updated| updated > since),
        }
    }

    /// The filter as query parameters, in `page`, `pageSize`, `modifiedSince` order
    ///
    /// Absent values are omitted. Feeding these pairs back through the
    /// collection query parser reproduces an equal filter.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(page) = self.page {
            pairs.push((PAGE_PARAM, page.number().to_string()));
            pairs.push((PAGE_SIZE_PARAM, page.size().to_string()));
        }
        if let Some(since) = self.modified_since {
            pairs.push((
                MODIFIED_SINCE_PARAM,
                since.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ));
        }
        pairs
    }
}

/// Page statistics for a windowed result set
///
/// Serialized both into the collection body and, separately, as the
/// `X-Pagination` response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub page_size: u32,
    /// Number of records matching the filter, before windowing
    pub total_count: u64,
    /// `ceil(total_count / page_size)`
    pub total_pages: u32,
}

impl PaginationMetadata {
    /// Build metadata for `page` over a filtered set of `total_count` records
    ///
    /// # Example
    ///
    /// ```rust
    /// use mimic_service::repository::{PageRequest, PaginationMetadata};
    ///
    /// let meta = PaginationMetadata::new(PageRequest::new(1, 10).unwrap(), 25);
    /// assert_eq!(meta.total_pages, 3);
    /// assert!(meta.has_next());
    /// assert!(!meta.has_previous());
    /// ```
    #[must_use]
    pub fn new(page: PageRequest, total_count: u64) -> Self {
        Self {
            page: page.number(),
            page_size: page.size(),
            total_count,
            total_pages: calculate_total_pages(total_count, page.size()),
        }
    }

    /// The window these statistics describe
    #[must_use]
    pub fn request(&self) -> Option<PageRequest> {
        PageRequest::new(self.page, self.page_size)
    }

    /// `page + 1 <= total_pages`
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// `page - 1 > 0`
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Calculate total pages, rounding up
fn calculate_total_pages(total: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total.div_ceil(page_size);
    pages.min(u64::from(u32::MAX)) as u32
}
