//! Title mapping rows shared by the curated and cache tables.

use serde::Serialize;
use sqlx::FromRow;
use traitmatch_core::media::{MappingSource, MediaTraitMapping, MediaType};
use traitmatch_core::store::StoreError;
use traitmatch_core::trait_vector::TraitVector;
use traitmatch_core::types::Timestamp;

/// A row from `media_trait_cache`, or from `curated_media_traits` with
/// `input` and `confidence` projected in the query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaTraitRow {
    pub normalized_title: String,
    pub media_type: String,
    pub input: String,
    pub canonical_title: String,
    pub confidence: f64,
    pub traits: serde_json::Value,
    pub notes: String,
    pub created_at: Timestamp,
}

impl MediaTraitRow {
    pub fn into_domain(self, source: MappingSource) -> Result<MediaTraitMapping, StoreError> {
        let media_type = MediaType::parse(&self.media_type)
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        let traits: TraitVector = serde_json::from_value(self.traits).map_err(|e| {
            StoreError::Malformed(format!(
                "mapping '{}' has invalid traits: {e}",
                self.normalized_title
            ))
        })?;

        Ok(MediaTraitMapping {
            input: self.input,
            normalized_title: self.normalized_title,
            canonical_title: self.canonical_title,
            media_type,
            confidence: self.confidence,
            traits,
            notes: self.notes,
            source,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(media_type: &str) -> MediaTraitRow {
        MediaTraitRow {
            normalized_title: "inception".into(),
            media_type: media_type.into(),
            input: "Inception".into(),
            canonical_title: "Inception (2010)".into(),
            confidence: 0.85,
            traits: serde_json::to_value(TraitVector::neutral()).unwrap(),
            notes: String::new(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn converts_with_requested_source() {
        let m = row("movie").into_domain(MappingSource::Inferred).unwrap();
        assert_eq!(m.media_type, MediaType::Movie);
        assert_eq!(m.source, MappingSource::Inferred);
        assert_eq!(m.key().normalized_title(), "inception");
    }

    #[test]
    fn unknown_media_type_is_malformed() {
        let err = row("podcast").into_domain(MappingSource::Curated).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
