//! Paged result container

use serde::Serialize;

use super::pagination::PaginationMetadata;
use crate::links::Link;

/// A page of results with optional pagination statistics and collection links
///
/// Serializes as `{ "results": [...], "pagination": {...}, "links": [...] }`;
/// `pagination` is omitted for unpaginated listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResult<T> {
    /// Records in the requested window, in stable order
    pub results: Vec<T>,
    /// Page statistics, present only when a page window was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMetadata>,
    /// Collection-level links
    pub links: Vec<Link>,
}

impl<T> PagedResult<T> {
    /// Create a result with no links attached yet
    pub fn new(results: Vec<T>, pagination: Option<PaginationMetadata>) -> Self {
        Self {
            results,
            pagination,
            links: Vec::new(),
        }
    }

    /// Create an unpaginated result
    pub fn unpaged(results: Vec<T>) -> Self {
        Self::new(results, None)
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether this page holds no records
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Transform every record, keeping pagination and links
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            results: self.results.into_iter().map(f).collect(),
            pagination: self.pagination,
            links: self.links,
        }
    }

    /// Append collection links
    #[must_use]
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links.extend(links);
        self
    }
}
