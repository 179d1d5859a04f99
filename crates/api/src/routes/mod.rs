pub mod health;
pub mod media;
pub mod quiz;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /questions                 GET  question bank (?count=N)
/// /characters                GET  character catalog (?universe=&limit=)
/// /score                     POST score a quiz submission
///
/// /media/map                 POST resolve one song or movie title
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(quiz::router())
        .nest("/media", media::router())
}
