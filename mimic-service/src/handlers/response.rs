//! Response envelopes for the word handlers

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::repository::PagedResult;

/// Header carrying the pagination metadata of a collection response
pub static X_PAGINATION: HeaderName = HeaderName::from_static("x-pagination");

/// 200 OK with a page of results
///
/// The body is the serialized [`PagedResult`]. When the page carries
/// pagination metadata it is also sent, as compact JSON, in the
/// `X-Pagination` header.
#[derive(Debug, Clone)]
pub struct CollectionResponse<T>(pub PagedResult<T>);

impl<T> CollectionResponse<T> {
    /// Wrap a page
    pub fn new(page: PagedResult<T>) -> Self {
        Self(page)
    }

    /// The wrapped page
    pub fn page(&self) -> &PagedResult<T> {
        &self.0
    }
}

impl<T: Serialize> IntoResponse for CollectionResponse<T> {
    fn into_response(self) -> Response {
        let header = self
            .0
            .pagination
            .as_ref()
            .and_then(|meta| serde_json::to_string(meta).ok())
            .and_then(|json| HeaderValue::from_str(&json).ok());

        let mut response = (StatusCode::OK, Json(self.0)).into_response();
        if let Some(value) = header {
            response.headers_mut().insert(X_PAGINATION.clone(), value);
        }
        response
    }
}

/// 200 OK with a single representation as the bare JSON body
#[derive(Debug, Clone)]
pub struct ItemResponse<T> {
    /// The response data
    pub data: T,
}

impl<T> ItemResponse<T> {
    /// Create a new item response
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ItemResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.data)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{PageRequest, PaginationMetadata};

    #[test]
    fn test_collection_sets_pagination_header() {
        let meta = PaginationMetadata::new(PageRequest::new(1, 2).unwrap(), 5);
        let response = CollectionResponse::new(PagedResult::new(vec![1, 2], Some(meta))).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response.headers().get("x-pagination").unwrap().to_str().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(header).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({"page": 1, "pageSize": 2, "totalCount": 5, "totalPages": 3})
        );
    }

    #[test]
    fn test_unpaged_collection_has_no_header() {
        let response = CollectionResponse::new(PagedResult::unpaged(vec![1])).into_response();
        assert!(response.headers().get("x-pagination").is_none());
    }
}
