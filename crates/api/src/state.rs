use std::sync::Arc;

use traitmatch_core::resolver::MediaTraitResolver;
use traitmatch_core::store::ContentCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. `None` when running over in-memory stores.
    pub pool: Option<traitmatch_db::DbPool>,
    /// Question bank and character catalog.
    pub catalog: Arc<dyn ContentCatalog>,
    /// Title resolver shared by every request, so single-flight spans
    /// concurrent submissions.
    pub resolver: MediaTraitResolver,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
