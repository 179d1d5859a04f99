//! Handler for the character catalog.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use traitmatch_core::listing::{
    clamp_limit, universe_filter, DEFAULT_CHARACTER_LIMIT, MAX_CHARACTER_LIMIT,
};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CharactersQuery {
    pub universe: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/characters?universe=&limit=
///
/// `universe=All` (or no universe) lists across every universe.
pub async fn list_characters(
    State(state): State<AppState>,
    Query(params): Query<CharactersQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_CHARACTER_LIMIT, MAX_CHARACTER_LIMIT);
    let universe = universe_filter(params.universe.as_deref());
    let characters = state.catalog.characters(universe, limit).await?;
    Ok(Json(characters))
}
