//! Handler trait definitions for REST CRUD patterns
//!
//! [`CollectionHandler`] is the orchestration seam between the HTTP adapters
//! and storage. It uses RPITIT so implementations can use plain `async fn`.
//! Each method ends in exactly one terminal outcome: a typed success response
//! or an [`ApiError`].

use std::future::Future;

use super::error::ApiError;
use super::response::{CollectionResponse, ItemResponse};
use crate::repository::QueryFilter;
use crate::responses::{Created, NoContent};

/// Standard REST collection handler
///
/// # Type Parameters
///
/// - `Id`: The identifier type of the resource
/// - `Dto`: The outbound representation
/// - `Payload`: The inbound write body; `None` means the client sent `null`
pub trait CollectionHandler<Id, Dto, Payload>: Send + Sync {
    /// List resources matching `filter`
    ///
    /// An empty result is reported as not found.
    fn list(
        &self,
        filter: QueryFilter,
    ) -> impl Future<Output = Result<CollectionResponse<Dto>, ApiError>> + Send;

    /// Get one resource with its `self`, `update` and `delete` links
    fn get(&self, id: Id) -> impl Future<Output = Result<ItemResponse<Dto>, ApiError>> + Send;

    /// Validate and store a new resource
    fn create(
        &self,
        payload: Option<Payload>,
    ) -> impl Future<Output = Result<Created<Dto>, ApiError>> + Send;

    /// Replace an existing resource
    ///
    /// Existence is checked before the payload, so an unknown `id` is
    /// reported as not found even when the payload is also invalid.
    fn update(
        &self,
        id: Id,
        payload: Option<Payload>,
    ) -> impl Future<Output = Result<ItemResponse<Dto>, ApiError>> + Send;

    /// Deactivate an existing resource
    fn delete(&self, id: Id) -> impl Future<Output = Result<NoContent, ApiError>> + Send;
}
