//! Question bank entities and submitted answers.

use serde::{Deserialize, Serialize};

use crate::trait_vector::TraitDimension;
use crate::types::QuestionId;

/// A quiz question mapped to exactly one trait dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// Prompt text shown to the user.
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "trait")]
    pub dimension: TraitDimension,
    pub options: Vec<AnswerOption>,
}

/// One selectable answer. `score` is the weight contributed toward the
/// question's dimension; authored values outside `[0, 1]` are clamped
/// during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    pub score: f64,
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// A `(question_id, option_id)` pair submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub option_id: String,
}
