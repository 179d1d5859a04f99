//! Character catalog entries and similarity ranking.
//!
//! Ranking is a pure function of the final vector, the catalog and the
//! caller's universe selection. Ordering is similarity descending with ties
//! broken by ascending name, so replaying the same inputs always yields the
//! same ranks.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::trait_vector::TraitVector;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Results returned in global mode when the caller gives no `top_n`.
pub const DEFAULT_TOP_N: usize = 9;

/// Results returned per universe in grouped mode.
pub const GROUPED_TOP_N: usize = 3;

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub universe: String,
    #[serde(default)]
    pub series: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub bio: String,
    pub traits: TraitVector,
}

// ---------------------------------------------------------------------------
// Similarity
// ---------------------------------------------------------------------------

/// Cosine similarity of two trait vectors, clamped to `[0, 1]`.
///
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &TraitVector, b: &TraitVector) -> f64 {
    let norm_a = a.magnitude();
    let norm_b = b.magnitude();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (a.dot(b) / (norm_a * norm_b)).max(0.0).min(1.0)
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// How `/score` results are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// One ranked list across every selected universe.
    Global,
    /// Top matches per selected universe.
    #[default]
    Grouped,
}

/// One ranked character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub character: Character,
    pub similarity: f64,
    /// 1-based position within its list.
    pub rank: usize,
}

/// Rank every character in any of `universes` and keep the best `top_n`.
pub fn rank_global(
    final_vector: &TraitVector,
    characters: &[Character],
    universes: &[String],
    top_n: usize,
) -> Vec<MatchResult> {
    let candidates = characters
        .iter()
        .filter(|c| universes.iter().any(|u| *u == c.universe));
    rank(final_vector, candidates, top_n)
}

/// Rank each selected universe independently, keeping [`GROUPED_TOP_N`] per
/// universe. Universes appear in the caller's order; repeats are dropped and
/// a universe with no characters maps to an empty list.
pub fn rank_grouped(
    final_vector: &TraitVector,
    characters: &[Character],
    universes: &[String],
) -> IndexMap<String, Vec<MatchResult>> {
    let mut grouped = IndexMap::new();
    for universe in universes {
        if grouped.contains_key(universe) {
            continue;
        }
        let candidates = characters.iter().filter(|c| c.universe == *universe);
        grouped.insert(universe.clone(), rank(final_vector, candidates, GROUPED_TOP_N));
    }
    grouped
}

fn rank<'a>(
    final_vector: &TraitVector,
    candidates: impl Iterator<Item = &'a Character>,
    top_n: usize,
) -> Vec<MatchResult> {
    let mut scored: Vec<(&Character, f64)> = candidates
        .map(|c| (c, cosine_similarity(final_vector, &c.traits)))
        .collect();

    scored.sort_by(|(a, sa), (b, sb)| {
        sb.partial_cmp(sa)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    scored
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, (character, similarity))| MatchResult {
            character: character.clone(),
            similarity,
            rank: i + 1,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trait_vector::TraitDimension;

    fn vector(bravery: f64, humor: f64) -> TraitVector {
        TraitVector::neutral()
            .with(TraitDimension::Bravery, bravery)
            .unwrap()
            .with(TraitDimension::Humor, humor)
            .unwrap()
    }

    fn character(name: &str, universe: &str, traits: TraitVector) -> Character {
        Character {
            name: name.to_string(),
            alias: None,
            universe: universe.to_string(),
            series: String::new(),
            image_url: String::new(),
            bio: String::new(),
            traits,
        }
    }

    fn universes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // -- cosine_similarity --------------------------------------------------

    #[test]
    fn cosine_of_vector_with_itself_is_one() {
        let v = vector(0.8, 0.3);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        let v = vector(0.8, 0.3);
        assert_eq!(cosine_similarity(&v, &TraitVector::zero()), 0.0);
        assert_eq!(cosine_similarity(&TraitVector::zero(), &TraitVector::zero()), 0.0);
    }

    #[test]
    fn cosine_stays_within_unit_range() {
        let a = TraitVector::zero().with(TraitDimension::Humor, 1.0).unwrap();
        let b = TraitVector::zero().with(TraitDimension::Bravery, 1.0).unwrap();
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        let c = vector(1.0, 1.0);
        let s = cosine_similarity(&a, &c);
        assert!((0.0..=1.0).contains(&s));
    }

    // -- rank_global --------------------------------------------------------

    #[test]
    fn close_character_ranks_above_distant_one() {
        let user = vector(0.8, 0.3);
        let catalog = vec![
            character("Jester", "Marvel", vector(0.1, 0.9)),
            character("Captain", "Marvel", vector(0.9, 0.2)),
        ];

        let ranked = rank_global(&user, &catalog, &universes(&["Marvel"]), DEFAULT_TOP_N);

        assert_eq!(ranked[0].character.name, "Captain");
        assert_eq!(ranked[0].rank, 1);
        assert!(ranked[0].similarity > 0.99);
        assert_eq!(ranked[1].character.name, "Jester");
        assert_eq!(ranked[1].rank, 2);
        assert!(ranked[1].similarity < ranked[0].similarity);
    }

    #[test]
    fn ties_are_broken_by_name() {
        let user = vector(0.8, 0.3);
        let same = vector(0.7, 0.4);
        let catalog = vec![
            character("Zed", "A", same),
            character("Amy", "B", same),
            character("Mia", "A", same),
        ];

        let ranked = rank_global(&user, &catalog, &universes(&["A", "B"]), DEFAULT_TOP_N);
        let names: Vec<&str> = ranked.iter().map(|m| m.character.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Mia", "Zed"]);
        let ranks: Vec<usize> = ranked.iter().map(|m| m.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn global_is_deterministic_and_respects_top_n() {
        let user = vector(0.6, 0.6);
        let catalog: Vec<Character> = (0..20)
            .map(|i| character(&format!("C{i:02}"), "U", vector(i as f64 / 20.0, 0.5)))
            .collect();

        let first = rank_global(&user, &catalog, &universes(&["U"]), 5);
        let second = rank_global(&user, &catalog, &universes(&["U"]), 5);
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn global_excludes_unselected_universes() {
        let user = vector(0.5, 0.5);
        let catalog = vec![
            character("In", "Selected", vector(0.5, 0.5)),
            character("Out", "Other", vector(0.5, 0.5)),
        ];
        let ranked = rank_global(&user, &catalog, &universes(&["Selected"]), DEFAULT_TOP_N);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].character.name, "In");
    }

    // -- rank_grouped -------------------------------------------------------

    #[test]
    fn grouped_keeps_caller_order_and_top_three() {
        let user = vector(0.8, 0.3);
        let mut catalog: Vec<Character> = (0..5)
            .map(|i| character(&format!("HP{i}"), "Harry Potter", vector(0.2 * i as f64, 0.3)))
            .collect();
        catalog.push(character("Ross", "Friends", vector(0.2, 0.9)));

        let grouped = rank_grouped(
            &user,
            &catalog,
            &universes(&["Friends", "Harry Potter", "Friends", "Empty"]),
        );

        let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Friends", "Harry Potter", "Empty"]);
        assert_eq!(grouped["Friends"].len(), 1);
        assert_eq!(grouped["Harry Potter"].len(), GROUPED_TOP_N);
        assert_eq!(grouped["Harry Potter"][0].rank, 1);
        assert!(grouped["Empty"].is_empty());
    }

    #[test]
    fn grouped_ranks_each_universe_independently() {
        let user = vector(0.9, 0.1);
        let catalog = vec![
            character("Weak A", "A", vector(0.1, 0.9)),
            character("Strong B", "B", vector(0.9, 0.1)),
        ];
        let grouped = rank_grouped(&user, &catalog, &universes(&["A", "B"]));
        assert_eq!(grouped["A"][0].character.name, "Weak A");
        assert_eq!(grouped["A"][0].rank, 1);
        assert_eq!(grouped["B"][0].rank, 1);
    }

    #[test]
    fn character_deserializes_with_optional_fields_missing() {
        let json = r#"{"name":"Luna","universe":"Harry Potter","traits":{
            "introversion":0.7,"humor":0.5,"bravery":0.6,"loyalty":0.8,"ambition":0.3,
            "compassion":0.8,"cunning":0.2,"responsibility":0.5,"sarcasm":0.1,"optimism":0.9}}"#;
        let c: Character = serde_json::from_str(json).unwrap();
        assert_eq!(c.alias, None);
        assert!(c.bio.is_empty());
        assert_eq!(c.traits[TraitDimension::Optimism], 0.9);
    }
}
