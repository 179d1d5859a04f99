//! Handler for mapping a single title to traits.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use traitmatch_core::error::CoreError;
use traitmatch_core::media::MediaType;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MapMediaRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: String,
    /// Re-run inference even when a curated or cached mapping exists.
    #[serde(default)]
    pub refresh: bool,
}

/// Only songs and movies are accepted here; people are resolved as part of
/// scoring.
fn parse_media_type(value: &str) -> Result<MediaType, CoreError> {
    match MediaType::parse(value.trim()) {
        Ok(media_type) if media_type.is_media() => Ok(media_type),
        _ => Err(CoreError::Validation("Type must be song or movie".into())),
    }
}

/// POST /api/media/map
///
/// Resolve one title and return its mapping.
pub async fn map_media(
    State(state): State<AppState>,
    payload: Result<Json<MapMediaRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload?;
    let media_type = parse_media_type(&body.media_type)?;

    let mapping = if body.refresh {
        tracing::info!(title = %body.title, media_type = %media_type, "Forcing re-resolution");
        state.resolver.refresh(&body.title, media_type).await?
    } else {
        state.resolver.resolve(&body.title, media_type).await?
    };

    Ok(Json(mapping))
}
