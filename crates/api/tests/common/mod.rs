#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use traitmatch_api::config::{GeminiConfig, ServerConfig};
use traitmatch_api::router::build_app_router;
use traitmatch_api::state::AppState;
use traitmatch_core::classifier::{Classification, ClassifierError, TraitClassifier};
use traitmatch_core::matching::Character;
use traitmatch_core::media::{MappingSource, MediaKey, MediaTraitMapping, MediaType};
use traitmatch_core::memory::{InMemoryCuratedSource, InMemoryMediaCache, StaticCatalog};
use traitmatch_core::question::{AnswerOption, Question};
use traitmatch_core::resolver::{MediaTraitResolver, ResolverSettings};
use traitmatch_core::trait_vector::{TraitDimension, TraitVector};

/// Build a test `ServerConfig` with safe defaults and inference disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        gemini: GeminiConfig::disabled(),
    }
}

// ---------------------------------------------------------------------------
// Stub classifier
// ---------------------------------------------------------------------------

/// Returns a humor-heavy vector with confidence 0.9 for every title, except
/// titles containing "unknown", which report the collaborator unavailable.
#[derive(Default)]
pub struct StubClassifier {
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TraitClassifier for StubClassifier {
    async fn classify(
        &self,
        title: &str,
        _media_type: MediaType,
    ) -> Result<Classification, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if title.to_lowercase().contains("unknown") {
            return Err(ClassifierError::Unavailable("stub offline".into()));
        }
        Ok(Classification {
            traits: TraitVector::neutral()
                .with(TraitDimension::Humor, 1.0)
                .unwrap(),
            confidence: 0.9,
            canonical_title: Some(title.trim().to_string()),
            notes: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn question(id: i64, prompt: &str, dimension: TraitDimension) -> Question {
    Question {
        id,
        prompt: prompt.to_string(),
        dimension,
        options: vec![
            AnswerOption {
                id: "a".into(),
                text: "Very much".into(),
                score: 1.0,
            },
            AnswerOption {
                id: "b".into(),
                text: "Not at all".into(),
                score: 0.0,
            },
        ],
    }
}

/// Neutral everywhere except humor and bravery.
fn character(name: &str, universe: &str, humor: f64, bravery: f64) -> Character {
    Character {
        name: name.to_string(),
        alias: None,
        universe: universe.to_string(),
        series: String::new(),
        image_url: String::new(),
        bio: String::new(),
        traits: TraitVector::neutral()
            .with(TraitDimension::Humor, humor)
            .unwrap()
            .with(TraitDimension::Bravery, bravery)
            .unwrap(),
    }
}

/// Two questions (humor, bravery) and five characters across two universes.
pub fn test_catalog() -> StaticCatalog {
    StaticCatalog::new(
        vec![
            question(2, "Would you charge into danger?", TraitDimension::Bravery),
            question(1, "Do you crack jokes in tense moments?", TraitDimension::Humor),
        ],
        vec![
            character("Chandler Bing", "Friends", 1.0, 0.0),
            character("Monica Geller", "Friends", 0.5, 0.5),
            character("Ross Geller", "Friends", 0.0, 1.0),
            character("Harry Potter", "Harry Potter", 0.0, 1.0),
            character("Hermione Granger", "Harry Potter", 0.5, 0.5),
        ],
    )
}

/// A curated song with bravery pinned high.
pub fn curated_mapping() -> MediaTraitMapping {
    let key = MediaKey::new("Bohemian Rhapsody", MediaType::Song).unwrap();
    MediaTraitMapping {
        input: "Bohemian Rhapsody".into(),
        normalized_title: key.normalized_title().to_string(),
        canonical_title: "Bohemian Rhapsody".into(),
        media_type: MediaType::Song,
        confidence: 1.0,
        traits: TraitVector::neutral()
            .with(TraitDimension::Bravery, 0.9)
            .unwrap(),
        notes: "Operatic defiance".into(),
        source: MappingSource::Curated,
        created_at: chrono::Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Router plus handles on the collaborators the tests inspect.
pub struct TestApp {
    pub router: Router,
    pub classifier: Arc<StubClassifier>,
    pub cache: Arc<InMemoryMediaCache>,
    pub resolver: MediaTraitResolver,
}

/// Build the full application router over in-memory stores.
///
/// Uses the same `build_app_router` as `main.rs`, so integration tests
/// exercise the production middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery).
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let classifier = Arc::new(StubClassifier::default());
    let cache = Arc::new(InMemoryMediaCache::new());

    let resolver = MediaTraitResolver::new(
        Arc::new(InMemoryCuratedSource::new([curated_mapping()])),
        cache.clone(),
        classifier.clone(),
        ResolverSettings::default(),
    );

    let state = AppState {
        pool: None,
        catalog: Arc::new(test_catalog()),
        resolver: resolver.clone(),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        classifier,
        cache,
        resolver,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
