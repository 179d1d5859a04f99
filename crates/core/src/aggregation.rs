//! Quiz answer aggregation into a raw trait vector.
//!
//! Each answered question contributes its selected option's score to the
//! question's dimension; dimensions are averaged independently. Dimensions
//! without any mapped question stay at [`NEUTRAL_VALUE`] so a partial
//! question bank never drags the vector toward zero.

use std::collections::{BTreeMap, HashMap};

use crate::error::CoreError;
use crate::question::{Answer, Question};
use crate::trait_vector::{TraitVector, NEUTRAL_VALUE, TRAIT_COUNT};
use crate::types::QuestionId;

/// Aggregate `answers` against the delivered `questions`.
///
/// - Every delivered question must be answered (`IncompleteSubmission`).
/// - A repeated `question_id` keeps its last occurrence.
/// - Unknown question or option ids fail with `UnknownReference`.
pub fn aggregate(answers: &[Answer], questions: &[Question]) -> Result<TraitVector, CoreError> {
    let by_id: HashMap<QuestionId, &Question> = questions.iter().map(|q| (q.id, q)).collect();

    // BTreeMap keeps accumulation order independent of submission order.
    let mut latest: BTreeMap<QuestionId, &str> = BTreeMap::new();
    for answer in answers {
        latest.insert(answer.question_id, answer.option_id.as_str());
    }

    if latest.len() < by_id.len() {
        return Err(CoreError::IncompleteSubmission {
            answered: latest.len(),
            required: by_id.len(),
        });
    }

    let mut sums = [0.0_f64; TRAIT_COUNT];
    let mut counts = [0_usize; TRAIT_COUNT];

    for (question_id, option_id) in latest {
        let question = by_id.get(&question_id).ok_or_else(|| {
            CoreError::UnknownReference(format!("question {question_id} is not in the active set"))
        })?;
        let option = question.option(option_id).ok_or_else(|| {
            CoreError::UnknownReference(format!(
                "option '{option_id}' does not belong to question {question_id}"
            ))
        })?;

        let slot = question.dimension.index();
        sums[slot] += option.score;
        counts[slot] += 1;
    }

    Ok(TraitVector::from_fn(|dim| {
        let slot = dim.index();
        if counts[slot] == 0 {
            NEUTRAL_VALUE
        } else {
            sums[slot] / counts[slot] as f64
        }
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
