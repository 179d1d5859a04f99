//! Personality trait dimensions and the fixed-size vector built over them.
//!
//! The dimension set is closed: every [`TraitVector`] carries exactly one
//! value per [`TraitDimension`], each within `[0.0, 1.0]`. Vectors are
//! serialized as JSON objects keyed by dimension name so catalog rows,
//! inference responses and API payloads share one shape.

use std::fmt;
use std::ops::Index;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of trait dimensions.
pub const TRAIT_COUNT: usize = 10;

/// Value used for a dimension with no signal.
pub const NEUTRAL_VALUE: f64 = 0.5;

// ---------------------------------------------------------------------------
// TraitDimension
// ---------------------------------------------------------------------------

/// One personality trait axis. Discriminants give the canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitDimension {
    Introversion = 0,
    Humor = 1,
    Bravery = 2,
    Loyalty = 3,
    Ambition = 4,
    Compassion = 5,
    Cunning = 6,
    Responsibility = 7,
    Sarcasm = 8,
    Optimism = 9,
}

impl TraitDimension {
    /// Every dimension in canonical order.
    pub const ALL: [TraitDimension; TRAIT_COUNT] = [
        Self::Introversion,
        Self::Humor,
        Self::Bravery,
        Self::Loyalty,
        Self::Ambition,
        Self::Compassion,
        Self::Cunning,
        Self::Responsibility,
        Self::Sarcasm,
        Self::Optimism,
    ];

    /// Position of this dimension inside a [`TraitVector`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name used in JSON payloads and database rows.
    pub fn name(self) -> &'static str {
        match self {
            Self::Introversion => "introversion",
            Self::Humor => "humor",
            Self::Bravery => "bravery",
            Self::Loyalty => "loyalty",
            Self::Ambition => "ambition",
            Self::Compassion => "compassion",
            Self::Cunning => "cunning",
            Self::Responsibility => "responsibility",
            Self::Sarcasm => "sarcasm",
            Self::Optimism => "optimism",
        }
    }

    /// Resolve a lowercase dimension name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

impl fmt::Display for TraitDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// TraitVector
// ---------------------------------------------------------------------------

/// A point in `[0, 1]^10`, one value per [`TraitDimension`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "TraitMap")]
pub struct TraitVector([f64; TRAIT_COUNT]);

impl TraitVector {
    /// Build a vector, rejecting non-finite or out-of-range values.
    pub fn new(values: [f64; TRAIT_COUNT]) -> Result<Self, CoreError> {
        for dim in TraitDimension::ALL {
            let value = values[dim.index()];
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidTraitVector(format!(
                    "{dim} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }
        Ok(Self(values))
    }

    /// Build a vector by clamping every value into `[0, 1]`.
    ///
    /// NaN collapses to `0.0`.
    pub fn clamped(values: [f64; TRAIT_COUNT]) -> Self {
        Self(values.map(clamp_unit))
    }

    /// Build a clamped vector from a per-dimension function.
    pub fn from_fn(mut f: impl FnMut(TraitDimension) -> f64) -> Self {
        Self(TraitDimension::ALL.map(|dim| clamp_unit(f(dim))))
    }

    /// All dimensions at [`NEUTRAL_VALUE`].
    pub fn neutral() -> Self {
        Self([NEUTRAL_VALUE; TRAIT_COUNT])
    }

    /// All dimensions at zero.
    pub fn zero() -> Self {
        Self([0.0; TRAIT_COUNT])
    }

    /// Return a copy with one dimension replaced.
    pub fn with(mut self, dim: TraitDimension, value: f64) -> Result<Self, CoreError> {
        self.0[dim.index()] = value;
        Self::new(self.0)
    }

    pub fn get(&self, dim: TraitDimension) -> f64 {
        self.0[dim.index()]
    }

    /// Raw values in canonical dimension order.
    pub fn values(&self) -> &[f64; TRAIT_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitDimension, f64)> + '_ {
        TraitDimension::ALL.into_iter().map(|dim| (dim, self.get(dim)))
    }

    /// Linear interpolation toward `target`: `weight = 0` keeps `self`,
    /// `weight = 1` yields `target`.
    pub fn blend_toward(&self, target: &TraitVector, weight: f64) -> TraitVector {
        let weight = clamp_unit(weight);
        Self::from_fn(|dim| (1.0 - weight) * self.get(dim) + weight * target.get(dim))
    }

    pub fn dot(&self, other: &TraitVector) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

impl Default for TraitVector {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Index<TraitDimension> for TraitVector {
    type Output = f64;

    fn index(&self, dim: TraitDimension) -> &f64 {
        &self.0[dim.index()]
    }
}

impl Serialize for TraitVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TRAIT_COUNT))?;
        for (dim, value) in self.iter() {
            map.serialize_entry(dim.name(), &value)?;
        }
        map.end()
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

// ---------------------------------------------------------------------------
// TraitMap (wire shape)
// ---------------------------------------------------------------------------

/// Named-field wire shape of a trait vector. Every dimension is required;
/// unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TraitMap {
    pub introversion: f64,
    pub humor: f64,
    pub bravery: f64,
    pub loyalty: f64,
    pub ambition: f64,
    pub compassion: f64,
    pub cunning: f64,
    pub responsibility: f64,
    pub sarcasm: f64,
    pub optimism: f64,
}

impl TraitMap {
    /// Values in canonical dimension order.
    pub fn into_values(self) -> [f64; TRAIT_COUNT] {
        [
            self.introversion,
            self.humor,
            self.bravery,
            self.loyalty,
            self.ambition,
            self.compassion,
            self.cunning,
            self.responsibility,
            self.sarcasm,
            self.optimism,
        ]
    }
}

impl TryFrom<TraitMap> for TraitVector {
    type Error = CoreError;

    fn try_from(map: TraitMap) -> Result<Self, Self::Error> {
        TraitVector::new(map.into_values())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
