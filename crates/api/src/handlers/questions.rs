//! Handler for the question bank.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use traitmatch_core::listing::{clamp_limit, MAX_QUESTION_COUNT};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    /// Number of questions to deliver. Absent returns the whole bank.
    pub count: Option<i64>,
}

/// GET /api/questions?count=N
///
/// Questions ordered by id.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<QuestionsQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params
        .count
        .map(|c| clamp_limit(Some(c), MAX_QUESTION_COUNT, MAX_QUESTION_COUNT));
    let questions = state.catalog.questions(limit).await?;
    Ok(Json(questions))
}
