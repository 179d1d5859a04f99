//! Postgres implementations of the core storage traits.

use async_trait::async_trait;
use traitmatch_core::matching::Character;
use traitmatch_core::media::{MappingSource, MediaKey, MediaTraitMapping};
use traitmatch_core::question::Question;
use traitmatch_core::store::{ContentCatalog, CuratedMediaSource, MediaTraitCache, StoreError};

use crate::repositories::{CharacterRepo, CuratedMediaRepo, MediaTraitCacheRepo, QuestionRepo};
use crate::DbPool;

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Question bank and character catalog read from Postgres.
#[derive(Clone)]
pub struct PgContentCatalog {
    pool: DbPool,
}

impl PgContentCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentCatalog for PgContentCatalog {
    async fn questions(&self, limit: Option<i64>) -> Result<Vec<Question>, StoreError> {
        QuestionRepo::list(&self.pool, limit)
            .await
            .map_err(backend)?
            .into_iter()
            .map(|row| row.into_domain())
            .collect()
    }

    async fn characters(
        &self,
        universe: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Character>, StoreError> {
        CharacterRepo::list(&self.pool, universe, limit)
            .await
            .map_err(backend)?
            .into_iter()
            .map(|row| row.into_domain())
            .collect()
    }

    async fn characters_in(&self, universes: &[String]) -> Result<Vec<Character>, StoreError> {
        CharacterRepo::list_in_universes(&self.pool, universes)
            .await
            .map_err(backend)?
            .into_iter()
            .map(|row| row.into_domain())
            .collect()
    }
}

/// `media_trait_cache` table.
#[derive(Clone)]
pub struct PgMediaTraitCache {
    pool: DbPool,
}

impl PgMediaTraitCache {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaTraitCache for PgMediaTraitCache {
    async fn get(&self, key: &MediaKey) -> Result<Option<MediaTraitMapping>, StoreError> {
        MediaTraitCacheRepo::find(&self.pool, key)
            .await
            .map_err(backend)?
            .map(|row| row.into_domain(MappingSource::Inferred))
            .transpose()
    }

    async fn put(&self, mapping: &MediaTraitMapping) -> Result<(), StoreError> {
        MediaTraitCacheRepo::upsert(&self.pool, mapping)
            .await
            .map_err(backend)
    }
}

/// `curated_media_traits` table.
#[derive(Clone)]
pub struct PgCuratedMediaSource {
    pool: DbPool,
}

impl PgCuratedMediaSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CuratedMediaSource for PgCuratedMediaSource {
    async fn get(&self, key: &MediaKey) -> Result<Option<MediaTraitMapping>, StoreError> {
        CuratedMediaRepo::find(&self.pool, key)
            .await
            .map_err(backend)?
            .map(|row| row.into_domain(MappingSource::Curated))
            .transpose()
    }
}
