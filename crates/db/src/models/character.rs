//! Character catalog row.

use serde::Serialize;
use sqlx::FromRow;
use traitmatch_core::matching::Character;
use traitmatch_core::store::StoreError;
use traitmatch_core::trait_vector::TraitVector;
use traitmatch_core::types::Timestamp;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterRow {
    pub id: i64,
    pub name: String,
    pub alias: Option<String>,
    pub universe: String,
    pub series: String,
    pub image_url: String,
    pub bio: String,
    /// JSONB object keyed by trait name.
    pub traits: serde_json::Value,
    pub created_at: Timestamp,
}

impl CharacterRow {
    pub fn into_domain(self) -> Result<Character, StoreError> {
        let traits: TraitVector = serde_json::from_value(self.traits).map_err(|e| {
            StoreError::Malformed(format!("character '{}' has invalid traits: {e}", self.name))
        })?;

        Ok(Character {
            name: self.name,
            alias: self.alias,
            universe: self.universe,
            series: self.series,
            image_url: self.image_url,
            bio: self.bio,
            traits,
        })
    }
}
