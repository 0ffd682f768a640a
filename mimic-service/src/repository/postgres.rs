//! PostgreSQL word store
//!
//! Available with the `database` feature. Listing counts and windows inside a
//! single `REPEATABLE READ` transaction so that the pagination metadata and the
//! returned rows describe the same snapshot.

use sqlx::PgPool;

use super::error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
use super::paged::PagedResult;
use super::pagination::{PaginationMetadata, QueryFilter};
use super::traits::{Repository, RepositoryResult, SoftDeleteRepository};
use crate::model::{NewWord, Word, WordId};

const ENTITY: &str = "Word";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS words (
    id          BIGSERIAL PRIMARY KEY,
    name        TEXT        NOT NULL,
    score       INTEGER     NOT NULL,
    active      BOOLEAN     NOT NULL DEFAULT TRUE,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NULL
)"#;

const FILTER_CLAUSE: &str =
    "($1::timestamptz IS NULL OR created_at > $1 OR updated_at > $1)";

/// Word store backed by a PostgreSQL pool
///
/// Connections are acquired from the pool per call and returned on drop.
#[derive(Debug, Clone)]
pub struct PgWordStore {
    pool: PgPool,
}

impl PgWordStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `words` table if it does not exist
    pub async fn migrate(&self) -> RepositoryResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| from_sqlx(RepositoryOperation::Migrate, e))?;
        tracing::info!("Word table ready");
        Ok(())
    }
}

/// Classify a driver error
///
/// Only pool timeouts and transport failures come out retriable; bad
/// configuration, rejected credentials and query errors do not.
pub(crate) fn from_sqlx(operation: RepositoryOperation, err: sqlx::Error) -> RepositoryError {
    let message = err.to_string();
    match err {
        sqlx::Error::PoolTimedOut => RepositoryError::timeout(operation, message),
        sqlx::Error::Io(_) | sqlx::Error::PoolClosed | sqlx::Error::Tls(_) => {
            RepositoryError::connection_failed(operation, message)
        }
        sqlx::Error::RowNotFound => {
            RepositoryError::new(operation, RepositoryErrorKind::NotFound, message)
        }
        _ => RepositoryError::database_error(operation, message),
    }
}

fn to_i64(operation: RepositoryOperation, value: u64) -> RepositoryResult<i64> {
    i64::try_from(value).map_err(|_| {
        RepositoryError::new(
            operation,
            RepositoryErrorKind::Other,
            format!("page window value {} exceeds the supported range", value),
        )
    })
}

impl Repository<WordId, Word, NewWord> for PgWordStore {
    async fn list_all(&self, filter: &QueryFilter) -> RepositoryResult<PagedResult<Word>> {
        let op = RepositoryOperation::ListAll;
        let since = filter.modified_since();

        let Some(page) = filter.page() else {
            let words = sqlx::query_as::<_, Word>(&format!(
                "SELECT id, name, score, active, created_at, updated_at FROM words \
                 WHERE {FILTER_CLAUSE} ORDER BY id ASC"
            ))
            .bind(since)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| from_sqlx(op, e))?;
            return Ok(PagedResult::unpaged(words));
        };

        let limit = to_i64(op, page.limit())?;
        let offset = to_i64(op, page.offset())?;

        let mut tx = self.pool.begin().await.map_err(|e| from_sqlx(op, e))?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await
            .map_err(|e| from_sqlx(op, e))?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM words WHERE {FILTER_CLAUSE}"
        ))
        .bind(since)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| from_sqlx(op, e))?;

        let words = sqlx::query_as::<_, Word>(&format!(
            "SELECT id, name, score, active, created_at, updated_at FROM words \
             WHERE {FILTER_CLAUSE} ORDER BY id ASC LIMIT $2 OFFSET $3"
        ))
        .bind(since)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| from_sqlx(op, e))?;

        tx.commit().await.map_err(|e| from_sqlx(op, e))?;

        let total_count = u64::try_from(total).unwrap_or_default();
        Ok(PagedResult::new(
            words,
            Some(PaginationMetadata::new(page, total_count)),
        ))
    }

    async fn find_by_id(&self, id: &WordId) -> RepositoryResult<Option<Word>> {
        sqlx::query_as::<_, Word>(
            "SELECT id, name, score, active, created_at, updated_at FROM words WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| from_sqlx(RepositoryOperation::FindById, e))
    }

    async fn create(&self, data: NewWord) -> RepositoryResult<Word> {
        sqlx::query_as::<_, Word>(
            "INSERT INTO words (name, score, active, created_at) VALUES ($1, $2, TRUE, now()) \
             RETURNING id, name, score, active, created_at, updated_at",
        )
        .bind(&data.name)
        .bind(data.score)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| from_sqlx(RepositoryOperation::Create, e))
    }

    async fn update(&self, entity: Word) -> RepositoryResult<Word> {
        sqlx::query_as::<_, Word>(
            "UPDATE words SET name = $2, score = $3, active = $4, \
             updated_at = GREATEST(now(), created_at) WHERE id = $1 \
             RETURNING id, name, score, active, created_at, updated_at",
        )
        .bind(entity.id)
        .bind(&entity.name)
        .bind(entity.score)
        .bind(entity.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| from_sqlx(RepositoryOperation::Update, e))?
        .ok_or_else(|| {
            RepositoryError::not_found(ENTITY, entity.id.to_string())
                .with_operation(RepositoryOperation::Update)
        })
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| from_sqlx(RepositoryOperation::Ping, e))
    }
}

impl SoftDeleteRepository<WordId, Word, NewWord> for PgWordStore {
    async fn soft_delete(&self, id: &WordId) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE words SET active = FALSE, updated_at = GREATEST(now(), created_at) \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| from_sqlx(RepositoryOperation::SoftDelete, e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, id.to_string())
                .with_operation(RepositoryOperation::SoftDelete));
        }
        Ok(())
    }
}
