//! Repository trait definitions
//!
//! Storage access goes through these traits only. They use RPITIT (Return
//! Position Impl Trait In Traits) so implementations can be written with plain
//! `async fn` and no `async_trait` boxing.
//!
//! - [`Repository`]: listing through a [`QueryFilter`], lookup, create, update
//! - [`SoftDeleteRepository`]: deactivation without physical removal
//! - [`WordRepository`]: the bundle of bounds the word handlers need

use std::future::Future;

use super::error::RepositoryError;
use super::paged::PagedResult;
use super::pagination::QueryFilter;
use crate::model::{NewWord, Word, WordId};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Base repository trait
///
/// # Type Parameters
///
/// - `Id`: The identifier type for the entity
/// - `Entity`: The stored entity type returned from queries
/// - `Create`: The validated data used to create a new entity
pub trait Repository<Id, Entity, Create>: Send + Sync {
    /// List entities matching `filter`
    ///
    /// Filtering happens before windowing. When the filter carries a page
    /// window, the returned pagination metadata counts the whole filtered set;
    /// a page past the end yields no records but still-correct metadata.
    /// Without a page window every filtered record is returned and no metadata
    /// is attached. Records are ordered by identifier ascending.
    fn list_all(
        &self,
        filter: &QueryFilter,
    ) -> impl Future<Output = RepositoryResult<PagedResult<Entity>>> + Send;

    /// Find an entity by its identifier
    ///
    /// Returns `Ok(None)` if the entity does not exist.
    fn find_by_id(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Persist a new entity
    ///
    /// The store assigns the identifier, marks the entity active and stamps its
    /// creation time.
    fn create(&self, data: Create) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Replace an existing entity
    ///
    /// The caller has already merged the immutable fields from the stored
    /// record. The store stamps the update time.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if no entity has the given identifier.
    fn update(&self, entity: Entity) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Check that the store is reachable
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send {
        async { Ok(()) }
    }
}

/// Repositories whose delete keeps the record and clears its active flag
pub trait SoftDeleteRepository<Id, Entity, Create>: Repository<Id, Entity, Create> {
    /// Mark an entity inactive
    ///
    /// The record stays retrievable by identifier. Deleting an entity that is
    /// already inactive succeeds.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if no entity has the given identifier.
    fn soft_delete(&self, id: &Id) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// Storage backing the word API
///
/// Blanket-implemented for every cloneable soft-delete repository of words, so
/// handlers and router state can be generic over a single bound.
pub trait WordRepository:
    SoftDeleteRepository<WordId, Word, NewWord> + Clone + 'static
{
}

impl<T> WordRepository for T where T: SoftDeleteRepository<WordId, Word, NewWord> + Clone + 'static {}
