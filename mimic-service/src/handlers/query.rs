//! Collection query parameters
//!
//! # Example
//!
//! ```rust
//! use mimic_service::handlers::WordQuery;
//!
//! let query: WordQuery = serde_urlencoded::from_str("page=2&pageSize=10").unwrap();
//! let filter = query.into_filter(100).unwrap();
//! assert_eq!(filter.page().map(|p| p.offset()), Some(10));
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use super::error::{ApiError, ApiOperation};
use crate::repository::{PageRequest, QueryFilter, PAGE_PARAM, PAGE_SIZE_PARAM};

/// Raw `page`, `pageSize` and `modifiedSince` query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordQuery {
    /// Page number (1-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of items per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Only records created or updated after this instant
    ///
    /// Accepts RFC 3339, or an ISO 8601 date or local date-time read as UTC.
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_since: Option<DateTime<Utc>>,
}

impl WordQuery {
    /// Check the parameters and build the repository filter
    ///
    /// Pagination is all-or-nothing: `page` and `pageSize` must be given
    /// together, both at least 1, and the page size may not exceed
    /// `max_page_size`.
    pub fn into_filter(self, max_page_size: u32) -> Result<QueryFilter, ApiError> {
        let invalid = |message: String| ApiError::invalid_input(ApiOperation::List, message);

        let mut filter = QueryFilter::new();
        if let Some(since) = self.modified_since {
            filter = filter.with_modified_since(since);
        }

        match (self.page, self.page_size) {
            (None, None) => Ok(filter),
            (Some(_), None) | (None, Some(_)) => Err(invalid(format!(
                "'{PAGE_PARAM}' and '{PAGE_SIZE_PARAM}' must be provided together"
            ))),
            (Some(_), Some(size)) if size > max_page_size => Err(invalid(format!(
                "'{PAGE_SIZE_PARAM}' must not exceed {max_page_size}"
            ))),
            (Some(number), Some(size)) => PageRequest::new(number, size)
                .map(|page| filter.with_page(page))
                .ok_or_else(|| {
                    invalid(format!(
                        "'{PAGE_PARAM}' and '{PAGE_SIZE_PARAM}' must be at least 1"
                    ))
                }),
        }
    }
}

/// Parse a `modifiedSince` value
///
/// `2024-01-01T00:00:00Z` and `2024-01-01T02:00:00+02:00` are taken as
/// given; `2024-01-01T00:00:00` and `2024-01-01` have no offset and are
/// read as UTC, the date alone as its midnight.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(local) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(local.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
}
