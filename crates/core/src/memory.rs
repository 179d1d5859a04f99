//! Process-local implementations of the storage seams.
//!
//! Used by tests and by deployments that do not need the cache to outlive
//! the process. All types are cheap to wrap in `Arc` and safe to share.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::matching::Character;
use crate::media::{MediaKey, MediaTraitMapping};
use crate::question::Question;
use crate::store::{ContentCatalog, CuratedMediaSource, MediaTraitCache, StoreError};

// ---------------------------------------------------------------------------
// Mapping stores
// ---------------------------------------------------------------------------

/// In-memory mapping cache. `put` upserts by key.
#[derive(Debug, Default)]
pub struct InMemoryMediaCache {
    entries: RwLock<HashMap<MediaKey, MediaTraitMapping>>,
}

impl InMemoryMediaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl MediaTraitCache for InMemoryMediaCache {
    async fn get(&self, key: &MediaKey) -> Result<Option<MediaTraitMapping>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, mapping: &MediaTraitMapping) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(mapping.key(), mapping.clone());
        Ok(())
    }
}

/// Fixed set of curated mappings, loaded once.
#[derive(Debug, Default)]
pub struct InMemoryCuratedSource {
    entries: HashMap<MediaKey, MediaTraitMapping>,
}

impl InMemoryCuratedSource {
    pub fn new(mappings: impl IntoIterator<Item = MediaTraitMapping>) -> Self {
        Self {
            entries: mappings.into_iter().map(|m| (m.key(), m)).collect(),
        }
    }
}

#[async_trait]
impl CuratedMediaSource for InMemoryCuratedSource {
    async fn get(&self, key: &MediaKey) -> Result<Option<MediaTraitMapping>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable question bank and character catalog held in memory.
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
    questions: Vec<Question>,
    characters: Vec<Character>,
}

impl StaticCatalog {
    pub fn new(mut questions: Vec<Question>, mut characters: Vec<Character>) -> Self {
        questions.sort_by_key(|q| q.id);
        characters.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            questions,
            characters,
        }
    }
}

#[async_trait]
impl ContentCatalog for StaticCatalog {
    async fn questions(&self, limit: Option<i64>) -> Result<Vec<Question>, StoreError> {
        let take = limit.map_or(self.questions.len(), |l| l.max(0) as usize);
        Ok(self.questions.iter().take(take).cloned().collect())
    }

    async fn characters(
        &self,
        universe: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Character>, StoreError> {
        Ok(self
            .characters
            .iter()
            .filter(|c| universe.map_or(true, |u| c.universe == u))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn characters_in(&self, universes: &[String]) -> Result<Vec<Character>, StoreError> {
        Ok(self
            .characters
            .iter()
            .filter(|c| universes.contains(&c.universe))
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
