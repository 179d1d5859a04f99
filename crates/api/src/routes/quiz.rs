//! Route definitions for the quiz flow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{characters, questions, scoring};
use crate::state::AppState;

/// Quiz routes mounted at the API root.
///
/// ```text
/// GET    /questions         -> list_questions
/// GET    /characters        -> list_characters
/// POST   /score             -> score
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(questions::list_questions))
        .route("/characters", get(characters::list_characters))
        .route("/score", post(scoring::score))
}
