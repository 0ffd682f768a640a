//! In-memory word store
//!
//! Records live in a `BTreeMap` keyed by identifier, so iteration order is the
//! identifier order the query contract requires. Every operation holds one
//! lock guard for its whole duration: reads count and window from the same
//! snapshot, and writes are never observed half-applied.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryOperation};
use super::paged::PagedResult;
use super::pagination::{PaginationMetadata, QueryFilter};
use super::traits::{Repository, RepositoryResult, SoftDeleteRepository};
use crate::model::{NewWord, Word, WordId};

const ENTITY: &str = "Word";

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug)]
struct StoreInner {
    words: BTreeMap<WordId, Word>,
    next_id: WordId,
}

/// Word store backed by process memory
///
/// Cloning is cheap and clones share the same records.
#[derive(Clone)]
pub struct MemoryWordStore {
    inner: Arc<RwLock<StoreInner>>,
    clock: Clock,
}

impl fmt::Debug for MemoryWordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryWordStore")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl Default for MemoryWordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWordStore {
    /// Create an empty store using the system clock
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Create an empty store that reads timestamps from `clock`
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                words: BTreeMap::new(),
                next_id: 1,
            })),
            clock: Arc::new(clock),
        }
    }

    /// Number of stored records, active or not
    pub async fn len(&self) -> usize {
        self.inner.read().await.words.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.words.is_empty()
    }

    /// Update timestamp for a record, never earlier than its creation
    fn touch(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        (self.clock)().max(created_at)
    }
}

impl Repository<WordId, Word, NewWord> for MemoryWordStore {
    async fn list_all(&self, filter: &QueryFilter) -> RepositoryResult<PagedResult<Word>> {
        let guard = self.inner.read().await;
        let matching = guard
            .words
            .values()
            .filter(|word| filter.matches(word.created_at, word.updated_at));

        let Some(page) = filter.page() else {
            return Ok(PagedResult::unpaged(matching.cloned().collect()));
        };

        let total_count = matching.clone().count() as u64;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let results = matching.skip(skip).take(take).cloned().collect();

        Ok(PagedResult::new(
            results,
            Some(PaginationMetadata::new(page, total_count)),
        ))
    }

    async fn find_by_id(&self, id: &WordId) -> RepositoryResult<Option<Word>> {
        Ok(self.inner.read().await.words.get(id).cloned())
    }

    async fn create(&self, data: NewWord) -> RepositoryResult<Word> {
        let mut guard = self.inner.write().await;
        let id = guard.next_id;
        guard.next_id += 1;

        let word = Word {
            id,
            name: data.name,
            score: data.score,
            active: true,
            created_at: (self.clock)(),
            updated_at: None,
        };
        guard.words.insert(id, word.clone());
        Ok(word)
    }

    async fn update(&self, entity: Word) -> RepositoryResult<Word> {
        let mut guard = self.inner.write().await;
        let slot = guard.words.get_mut(&entity.id).ok_or_else(|| {
            RepositoryError::not_found(ENTITY, entity.id.to_string())
                .with_operation(RepositoryOperation::Update)
        })?;

        let updated_at = self.touch(entity.created_at);
        *slot = Word {
            updated_at: Some(updated_at),
            ..entity
        };
        Ok(slot.clone())
    }
}

impl SoftDeleteRepository<WordId, Word, NewWord> for MemoryWordStore {
    async fn soft_delete(&self, id: &WordId) -> RepositoryResult<()> {
        let mut guard = self.inner.write().await;
        let word = guard.words.get_mut(id).ok_or_else(|| {
            RepositoryError::not_found(ENTITY, id.to_string())
                .with_operation(RepositoryOperation::SoftDelete)
        })?;

        word.active = false;
        word.updated_at = Some(self.touch(word.created_at));
        Ok(())
    }
}
