//! Weighted composition of the answer, media and preference signals.

use crate::trait_vector::{TraitVector, TRAIT_COUNT};

/// Nominal share of the quiz answers.
pub const ANSWER_WEIGHT: f64 = 0.6;

/// Nominal share of resolved songs and movies combined.
pub const MEDIA_WEIGHT: f64 = 0.3;

/// Nominal share of the named preferences (actors, cricketer, personality).
pub const PREFERENCE_WEIGHT: f64 = 0.1;

/// Merge the three signal classes into the final vector.
///
/// Entries are averaged within their class. A class with no entries gives
/// up its weight, which is spread proportionally over the remaining
/// classes, so with no media and no preferences the result equals
/// `answers`.
pub fn compose(
    answers: &TraitVector,
    media: &[TraitVector],
    preferences: &[TraitVector],
) -> TraitVector {
    let mut classes: Vec<(f64, TraitVector)> = vec![(ANSWER_WEIGHT, *answers)];
    if let Some(mean) = mean(media) {
        classes.push((MEDIA_WEIGHT, mean));
    }
    if let Some(mean) = mean(preferences) {
        classes.push((PREFERENCE_WEIGHT, mean));
    }

    if classes.len() == 1 {
        return *answers;
    }

    let total: f64 = classes.iter().map(|(w, _)| w).sum();
    TraitVector::from_fn(|dim| {
        classes
            .iter()
            .map(|(weight, vector)| (weight / total) * vector.get(dim))
            .sum()
    })
}

/// Per-dimension mean, or `None` for an empty class.
fn mean(vectors: &[TraitVector]) -> Option<TraitVector> {
    if vectors.is_empty() {
        return None;
    }

    let mut sums = [0.0_f64; TRAIT_COUNT];
    for vector in vectors {
        for (slot, value) in sums.iter_mut().zip(vector.values()) {
            *slot += value;
        }
    }
    let n = vectors.len() as f64;
    Some(TraitVector::clamped(sums.map(|s| s / n)))
}
