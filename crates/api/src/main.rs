use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use traitmatch_api::config::{GeminiConfig, ServerConfig};
use traitmatch_api::router::build_app_router;
use traitmatch_api::state::AppState;
use traitmatch_core::classifier::TraitClassifier;
use traitmatch_core::resolver::{MediaTraitResolver, ResolverSettings};
use traitmatch_db::stores::{PgContentCatalog, PgCuratedMediaSource, PgMediaTraitCache};
use traitmatch_inference::api::GeminiApi;
use traitmatch_inference::classifier::{DisabledClassifier, GeminiClassifier};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "traitmatch_api=debug,traitmatch_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = traitmatch_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    traitmatch_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    traitmatch_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Resolver ---
    let resolver = MediaTraitResolver::new(
        Arc::new(PgCuratedMediaSource::new(pool.clone())),
        Arc::new(PgMediaTraitCache::new(pool.clone())),
        build_classifier(&config.gemini),
        ResolverSettings::default(),
    );

    // --- App state ---
    let state = AppState {
        pool: Some(pool.clone()),
        catalog: Arc::new(PgContentCatalog::new(pool)),
        resolver: resolver.clone(),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    drain_inference(&resolver, Duration::from_secs(config.shutdown_timeout_secs)).await;

    tracing::info!("Graceful shutdown complete");
}

/// Gemini when a key is configured, otherwise a classifier that always
/// reports itself unavailable.
fn build_classifier(gemini: &GeminiConfig) -> Arc<dyn TraitClassifier> {
    match &gemini.api_key {
        Some(key) => {
            tracing::info!(model = %gemini.model, "Gemini inference enabled");
            let api = GeminiApi::with_base_url(
                gemini.base_url.clone(),
                key.clone(),
                gemini.model.clone(),
            );
            Arc::new(GeminiClassifier::new(api))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, uncurated titles will resolve neutral");
            Arc::new(DisabledClassifier)
        }
    }
}

/// Give detached inference tasks a chance to finish and populate the cache.
async fn drain_inference(resolver: &MediaTraitResolver, limit: Duration) {
    let drained = tokio::time::timeout(limit, async {
        while resolver.in_flight_count() > 0 {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    })
    .await;

    if drained.is_err() {
        tracing::warn!(
            in_flight = resolver.in_flight_count(),
            "Shutdown timeout reached with inference still in flight"
        );
    }
}

/// Resolves once the process is asked to stop.
async fn shutdown_signal() {
    let signal = wait_for_signal().await;
    tracing::info!(signal, "Shutdown requested, no longer accepting connections");
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.expect("Failed to install Ctrl-C handler");
            "SIGINT"
        }
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl-C handler");
    "Ctrl-C"
}
