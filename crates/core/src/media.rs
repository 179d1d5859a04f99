//! Media titles, normalized cache keys, and trait mappings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::trait_vector::TraitVector;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// MediaType
// ---------------------------------------------------------------------------

/// Kind of free-text title being resolved.
///
/// `Person` covers the named-preference fields (actors, cricketer,
/// personality); only `Song` and `Movie` are accepted by the public mapping
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Song,
    Movie,
    Person,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Song => "song",
            Self::Movie => "movie",
            Self::Person => "person",
        }
    }

    /// Parse a stored or submitted type name.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "song" => Ok(Self::Song),
            "movie" => Ok(Self::Movie),
            "person" => Ok(Self::Person),
            other => Err(CoreError::Validation(format!(
                "Type must be song, movie or person, got '{other}'"
            ))),
        }
    }

    /// Whether this is a song or movie title.
    pub fn is_media(&self) -> bool {
        matches!(self, Self::Song | Self::Movie)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Title normalization
// ---------------------------------------------------------------------------

/// Trim, case-fold and collapse internal whitespace runs to one space.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cache identity of a title: normalized text plus media type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaKey {
    normalized_title: String,
    media_type: MediaType,
}

impl MediaKey {
    /// Normalize `title`; blank titles are rejected.
    pub fn new(title: &str, media_type: MediaType) -> Result<Self, CoreError> {
        let normalized_title = normalize_title(title);
        if normalized_title.is_empty() {
            return Err(CoreError::Validation("Title must not be blank".into()));
        }
        Ok(Self {
            normalized_title,
            media_type,
        })
    }

    pub fn normalized_title(&self) -> &str {
        &self.normalized_title
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.media_type, self.normalized_title)
    }
}

// ---------------------------------------------------------------------------
// MediaTraitMapping
// ---------------------------------------------------------------------------

/// Where a mapping came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingSource {
    /// Hand-authored, fully trusted.
    Curated,
    /// Produced by the inference collaborator (or its neutral fallback).
    Inferred,
}

impl MappingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Curated => "curated",
            Self::Inferred => "inferred",
        }
    }
}

/// A resolved title. Records are immutable; re-resolution produces a new
/// record that supersedes the previous one under the same [`MediaKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaTraitMapping {
    /// The title exactly as submitted.
    pub input: String,
    pub normalized_title: String,
    pub canonical_title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Confidence reported at resolution time. Low-confidence inferences keep
    /// their original value even though `traits` was blended toward neutral.
    pub confidence: f64,
    pub traits: TraitVector,
    pub notes: String,
    pub source: MappingSource,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

impl MediaTraitMapping {
    pub fn key(&self) -> MediaKey {
        MediaKey {
            normalized_title: self.normalized_title.clone(),
            media_type: self.media_type,
        }
    }

    /// Whether this is a degraded fallback produced without a usable inference.
    pub fn is_degraded(&self) -> bool {
        self.source == MappingSource::Inferred && self.confidence == 0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn normalize_trims_folds_and_collapses() {
        assert_eq!(normalize_title("  Bohemian   Rhapsody\t"), "bohemian rhapsody");
        assert_eq!(normalize_title("INCEPTION"), "inception");
        assert_eq!(normalize_title("The\n Dark  Knight"), "the dark knight");
    }

    #[test]
    fn equivalent_titles_share_a_key() {
        let a = MediaKey::new("  The Dark   Knight ", MediaType::Movie).unwrap();
        let b = MediaKey::new("the dark knight", MediaType::Movie).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn same_title_different_type_differs() {
        let song = MediaKey::new("Titanium", MediaType::Song).unwrap();
        let movie = MediaKey::new("Titanium", MediaType::Movie).unwrap();
        assert_ne!(song, movie);
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_matches!(
            MediaKey::new("   ", MediaType::Song),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn media_type_parse_and_display() {
        assert_eq!(MediaType::parse("song").unwrap(), MediaType::Song);
        assert_eq!(MediaType::parse("person").unwrap(), MediaType::Person);
        assert!(MediaType::parse("book").is_err());
        assert_eq!(MediaType::Movie.to_string(), "movie");
        assert!(MediaType::Movie.is_media());
        assert!(!MediaType::Person.is_media());
    }

    #[test]
    fn mapping_serializes_with_wire_field_names() {
        let mapping = MediaTraitMapping {
            input: "Inception ".into(),
            normalized_title: "inception".into(),
            canonical_title: "Inception (2010)".into(),
            media_type: MediaType::Movie,
            confidence: 0.9,
            traits: TraitVector::neutral(),
            notes: String::new(),
            source: MappingSource::Inferred,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(json["type"], "movie");
        assert_eq!(json["source"], "inferred");
        assert!(json["createdAt"].is_string());
        assert_eq!(json["traits"]["humor"], 0.5);
    }
}
