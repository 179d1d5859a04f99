use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use traitmatch_core::scoring::score_submission;
use traitmatch_core::submission::QuizSubmission;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/score
///
/// Score a completed quiz. Returns `{ topMatches, finalVector }` in grouped
/// mode (the default) or `{ matches, finalVector }` in global mode.
pub async fn score(
    State(state): State<AppState>,
    payload: Result<Json<QuizSubmission>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(submission) = payload?;
    let result = score_submission(&submission, state.catalog.as_ref(), &state.resolver).await?;
    Ok(Json(result))
}
