//! End-to-end scoring of one quiz submission.
//!
//! submission -> aggregate answers -> resolve titles (bounded, parallel)
//! -> compose -> rank -> assemble.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};

use crate::aggregation::aggregate;
use crate::composer::compose;
use crate::error::CoreError;
use crate::matching::{rank_global, rank_grouped, MatchMode, DEFAULT_TOP_N};
use crate::media::{MediaKey, MediaType};
use crate::question::{Answer, Question};
use crate::resolver::MediaTraitResolver;
use crate::result::{assemble, QuizResult, Ranking};
use crate::store::ContentCatalog;
use crate::submission::{QuizSubmission, MAX_TOP_N};
use crate::trait_vector::TraitVector;
use crate::types::QuestionId;

/// Maximum title resolutions in flight for one submission.
pub const MAX_CONCURRENT_RESOLUTIONS: usize = 5;

/// Score `submission` against the catalog.
///
/// Input errors (`Validation`, `IncompleteSubmission`, `UnknownReference`)
/// are returned as-is. Title resolution never fails the submission; a title
/// that cannot be resolved contributes a neutral vector.
pub async fn score_submission(
    submission: &QuizSubmission,
    catalog: &dyn ContentCatalog,
    resolver: &MediaTraitResolver,
) -> Result<QuizResult, CoreError> {
    submission.validate()?;

    let bank = catalog
        .questions(None)
        .await
        .map_err(|e| CoreError::Internal(format!("failed to load question bank: {e}")))?;
    let delivered = delivered_questions(bank, submission)?;
    let answer_vector = aggregate(&submission.answers, &delivered)?;

    let (media, preferences) = resolve_titles(submission, resolver).await;
    let final_vector = compose(&answer_vector, &media, &preferences);

    let universes = submission.selected_universes();
    let characters = catalog
        .characters_in(&universes)
        .await
        .map_err(|e| CoreError::Internal(format!("failed to load characters: {e}")))?;

    let ranking = match submission.mode {
        MatchMode::Global => {
            let top_n = submission.top_n.unwrap_or(DEFAULT_TOP_N).clamp(1, MAX_TOP_N);
            Ranking::Global(rank_global(&final_vector, &characters, &universes, top_n))
        }
        MatchMode::Grouped => Ranking::Grouped(rank_grouped(&final_vector, &characters, &universes)),
    };

    tracing::info!(
        questions = delivered.len(),
        media = media.len(),
        preferences = preferences.len(),
        candidates = characters.len(),
        mode = ?submission.mode,
        "Scored submission"
    );

    Ok(assemble(ranking, final_vector))
}

/// The questions the user was shown.
///
/// Explicit `question_ids` win, then a `question_count` echo of the fetch
/// size. Without either, the delivered set is the shortest prefix of the
/// id-ordered bank covering every answered question, which is what
/// `GET /questions?count=N` hands out.
fn delivered_questions(
    bank: Vec<Question>,
    submission: &QuizSubmission,
) -> Result<Vec<Question>, CoreError> {
    if let Some(ids) = submission.question_ids.as_deref() {
        return select_by_id(&bank, ids);
    }

    if let Some(count) = submission.question_count {
        return Ok(bank.into_iter().take(count).collect());
    }

    answered_prefix(bank, &submission.answers)
}

fn select_by_id(bank: &[Question], ids: &[QuestionId]) -> Result<Vec<Question>, CoreError> {
    let mut seen = HashSet::new();
    let mut delivered = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            continue;
        }
        delivered.push(find_question(bank, *id)?.clone());
    }
    Ok(delivered)
}

fn answered_prefix(mut bank: Vec<Question>, answers: &[Answer]) -> Result<Vec<Question>, CoreError> {
    let mut len = 0;
    for answer in answers {
        let position = bank
            .iter()
            .position(|q| q.id == answer.question_id)
            .ok_or_else(|| not_in_bank(answer.question_id))?;
        len = len.max(position + 1);
    }
    bank.truncate(len);
    Ok(bank)
}

fn find_question(bank: &[Question], id: QuestionId) -> Result<&Question, CoreError> {
    bank.iter().find(|q| q.id == id).ok_or_else(|| not_in_bank(id))
}

fn not_in_bank(id: QuestionId) -> CoreError {
    CoreError::UnknownReference(format!("question {id} is not in the active set"))
}

/// Resolve every distinct title and split the vectors into the media and
/// preference classes, in submission order.
async fn resolve_titles(
    submission: &QuizSubmission,
    resolver: &MediaTraitResolver,
) -> (Vec<TraitVector>, Vec<TraitVector>) {
    let mut seen = HashSet::new();
    let titles: Vec<(String, MediaType)> = submission
        .titles()
        .into_iter()
        .filter(|(title, media_type)| {
            MediaKey::new(title, *media_type)
                .map(|key| seen.insert(key))
                .unwrap_or(false)
        })
        .map(|(title, media_type)| (title.to_string(), media_type))
        .collect();

    let resolved: Vec<(MediaType, TraitVector)> = stream::iter(titles)
        .map(|(title, media_type)| async move {
            let traits = match resolver.resolve(&title, media_type).await {
                Ok(mapping) => mapping.traits,
                Err(err) => {
                    tracing::warn!(title = %title, media_type = %media_type, error = %err, "Falling back to neutral vector");
                    TraitVector::neutral()
                }
            };
            (media_type, traits)
        })
        .buffered(MAX_CONCURRENT_RESOLUTIONS)
        .collect()
        .await;

    let mut media = Vec::new();
    let mut preferences = Vec::new();
    for (media_type, traits) in resolved {
        if media_type.is_media() {
            media.push(traits);
        } else {
            preferences.push(traits);
        }
    }
    (media, preferences)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
