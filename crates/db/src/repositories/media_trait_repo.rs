//! Repositories for the `curated_media_traits` and `media_trait_cache`
//! tables.

use sqlx::PgPool;
use traitmatch_core::media::{MediaKey, MediaTraitMapping};

use crate::models::media_trait::MediaTraitRow;

const CACHE_COLUMNS: &str =
    "normalized_title, media_type, input, canonical_title, confidence, traits, notes, created_at";

/// Curated rows carry no `input` or `confidence`; they are projected so
/// both tables decode into [`MediaTraitRow`].
const CURATED_COLUMNS: &str = "normalized_title, media_type, canonical_title AS input, \
     canonical_title, 1.0::DOUBLE PRECISION AS confidence, traits, notes, created_at";

/// Inferred mappings. Writes are upserts keyed by `(normalized_title, media_type)`.
pub struct MediaTraitCacheRepo;

impl MediaTraitCacheRepo {
    pub async fn find(pool: &PgPool, key: &MediaKey) -> Result<Option<MediaTraitRow>, sqlx::Error> {
        let query = format!(
            "SELECT {CACHE_COLUMNS} FROM media_trait_cache
             WHERE normalized_title = $1 AND media_type = $2"
        );
        sqlx::query_as::<_, MediaTraitRow>(&query)
            .bind(key.normalized_title())
            .bind(key.media_type().as_str())
            .fetch_optional(pool)
            .await
    }

    /// Insert or supersede the mapping stored under its key.
    pub async fn upsert(pool: &PgPool, mapping: &MediaTraitMapping) -> Result<(), sqlx::Error> {
        let traits = serde_json::to_value(mapping.traits)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        sqlx::query(
            "INSERT INTO media_trait_cache
                (normalized_title, media_type, input, canonical_title, confidence, traits, notes, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (normalized_title, media_type) DO UPDATE SET
                input = EXCLUDED.input,
                canonical_title = EXCLUDED.canonical_title,
                confidence = EXCLUDED.confidence,
                traits = EXCLUDED.traits,
                notes = EXCLUDED.notes,
                created_at = EXCLUDED.created_at",
        )
        .bind(&mapping.normalized_title)
        .bind(mapping.media_type.as_str())
        .bind(&mapping.input)
        .bind(&mapping.canonical_title)
        .bind(mapping.confidence)
        .bind(traits)
        .bind(&mapping.notes)
        .bind(mapping.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM media_trait_cache")
            .fetch_one(pool)
            .await
    }
}

/// Hand-authored mappings.
pub struct CuratedMediaRepo;

impl CuratedMediaRepo {
    pub async fn find(pool: &PgPool, key: &MediaKey) -> Result<Option<MediaTraitRow>, sqlx::Error> {
        let query = format!(
            "SELECT {CURATED_COLUMNS} FROM curated_media_traits
             WHERE normalized_title = $1 AND media_type = $2"
        );
        sqlx::query_as::<_, MediaTraitRow>(&query)
            .bind(key.normalized_title())
            .bind(key.media_type().as_str())
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace a curated mapping.
    pub async fn upsert(pool: &PgPool, mapping: &MediaTraitMapping) -> Result<(), sqlx::Error> {
        let traits = serde_json::to_value(mapping.traits)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        sqlx::query(
            "INSERT INTO curated_media_traits
                (normalized_title, media_type, canonical_title, traits, notes)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (normalized_title, media_type) DO UPDATE SET
                canonical_title = EXCLUDED.canonical_title,
                traits = EXCLUDED.traits,
                notes = EXCLUDED.notes,
                created_at = NOW()",
        )
        .bind(&mapping.normalized_title)
        .bind(mapping.media_type.as_str())
        .bind(&mapping.canonical_title)
        .bind(traits)
        .bind(&mapping.notes)
        .execute(pool)
        .await?;
        Ok(())
    }
}
