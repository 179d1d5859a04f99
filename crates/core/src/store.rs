//! Storage seams used by the resolver and the scoring flow.
//!
//! The core never talks to a database directly. Callers inject
//! implementations of these traits: the Postgres-backed ones live in the db
//! crate, and [`crate::memory`] provides process-local versions.

use async_trait::async_trait;

use crate::matching::Character;
use crate::media::{MediaKey, MediaTraitMapping};
use crate::question::Question;

/// Failure reported by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored record is malformed: {0}")]
    Malformed(String),
}

/// Hand-authored, fully trusted title mappings.
#[async_trait]
pub trait CuratedMediaSource: Send + Sync {
    async fn get(&self, key: &MediaKey) -> Result<Option<MediaTraitMapping>, StoreError>;
}

/// Previously inferred mappings, keyed by normalized title and type.
#[async_trait]
pub trait MediaTraitCache: Send + Sync {
    async fn get(&self, key: &MediaKey) -> Result<Option<MediaTraitMapping>, StoreError>;

    /// Insert or supersede the mapping stored under `mapping.key()`.
    async fn put(&self, mapping: &MediaTraitMapping) -> Result<(), StoreError>;
}

/// Read-only view of the question bank and character catalog.
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    /// Questions ordered by id, optionally truncated to `limit`.
    async fn questions(&self, limit: Option<i64>) -> Result<Vec<Question>, StoreError>;

    /// Characters ordered by name, optionally filtered to one universe.
    async fn characters(
        &self,
        universe: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Character>, StoreError>;

    /// Every character belonging to any of `universes`.
    async fn characters_in(&self, universes: &[String]) -> Result<Vec<Character>, StoreError>;
}
