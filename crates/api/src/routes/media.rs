use axum::routing::post;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Title mapping routes mounted at `/media`.
///
/// ```text
/// POST   /map               -> map_media
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/map", post(media::map_media))
}
