//! Response shape of a scored submission.

use indexmap::IndexMap;
use serde::Serialize;

use crate::matching::MatchResult;
use crate::trait_vector::TraitVector;

/// Ranked output in the shape chosen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Ranking {
    #[serde(rename = "matches")]
    Global(Vec<MatchResult>),
    #[serde(rename = "topMatches")]
    Grouped(IndexMap<String, Vec<MatchResult>>),
}

/// Serializes as `{ "matches": [...], "finalVector": {...} }` or
/// `{ "topMatches": {...}, "finalVector": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    #[serde(flatten)]
    pub ranking: Ranking,
    #[serde(rename = "finalVector")]
    pub final_vector: TraitVector,
}

pub fn assemble(ranking: Ranking, final_vector: TraitVector) -> QuizResult {
    QuizResult {
        ranking,
        final_vector,
    }
}
