//! Word entity, write payload and response DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::links::{Link, Resource};

/// Store-assigned word identifier
pub type WordId = i64;

/// A stored word record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Word {
    pub id: WordId,
    pub name: String,
    pub score: i32,
    /// Cleared by soft delete
    pub active: bool,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// `None` until the first mutation
    pub updated_at: Option<DateTime<Utc>>,
}

impl Word {
    /// Apply validated client fields onto this record
    ///
    /// Identifier, active flag and timestamps are kept from `self`; the store
    /// stamps `updated_at` when the result is persisted.
    #[must_use]
    pub fn revise(self, changes: NewWord) -> Self {
        Self {
            name: changes.name,
            score: changes.score,
            ..self
        }
    }
}

/// Validated data for a new or replaced word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWord {
    pub name: String,
    pub score: i32,
}

/// Inbound write body
///
/// Every field is optional at the deserialization layer so that a missing
/// field surfaces as a field-level validation error instead of a rejected
/// body. `score` is read as `i64` for the same reason: an out-of-range number
/// is a validation failure, not malformed JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WordPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
}

/// Outbound word representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDto {
    pub id: WordId,
    pub name: String,
    pub score: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub links: Vec<Link>,
}

impl Resource for WordDto {
    type Id = WordId;

    fn resource_id(&self) -> WordId {
        self.id
    }

    fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links.extend(links);
        self
    }
}
