//! Free-text title resolution into trait vectors.
//!
//! Lookup order is curated store, then cache, then the inference
//! collaborator. Inference is single-flight per [`MediaKey`] for the whole
//! process: concurrent callers asking for the same key share one outbound
//! call. The call runs on a detached task, so a caller that goes away does
//! not cancel it and its result still lands in the cache.
//!
//! | Outcome                          | Returned vector          | Cached |
//! |----------------------------------|--------------------------|--------|
//! | curated hit                      | curated, confidence 1.0  | -      |
//! | cache hit                        | cached record            | -      |
//! | confidence >= threshold          | as inferred              | yes    |
//! | confidence <  threshold          | blended 50% to neutral   | yes    |
//! | error or timeout                 | neutral, confidence 0    | no     |

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::classifier::{Classification, TraitClassifier};
use crate::error::CoreError;
use crate::media::{MappingSource, MediaKey, MediaTraitMapping, MediaType};
use crate::store::{CuratedMediaSource, MediaTraitCache};
use crate::trait_vector::TraitVector;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Inferences below this confidence are blended toward neutral.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.4;

/// Interpolation weight toward neutral applied to low-confidence vectors.
pub const LOW_CONFIDENCE_BLEND: f64 = 0.5;

/// Upper bound on a single inference call.
pub const INFERENCE_TIMEOUT: Duration = Duration::from_secs(5);

/// Confidence attached to curated mappings.
pub const CURATED_CONFIDENCE: f64 = 1.0;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub inference_timeout: Duration,
    pub low_confidence_threshold: f64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            inference_timeout: INFERENCE_TIMEOUT,
            low_confidence_threshold: LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Shared result of one in-flight inference. `Err` carries a reason when the
/// detached task itself died.
type Flight = Shared<BoxFuture<'static, Result<MediaTraitMapping, String>>>;

/// Resolves titles to [`MediaTraitMapping`]s. Cheap to clone; clones share
/// stores, classifier and the in-flight table.
#[derive(Clone)]
pub struct MediaTraitResolver {
    inner: Arc<ResolverInner>,
}

struct ResolverInner {
    curated: Arc<dyn CuratedMediaSource>,
    cache: Arc<dyn MediaTraitCache>,
    classifier: Arc<dyn TraitClassifier>,
    settings: ResolverSettings,
    in_flight: Mutex<HashMap<MediaKey, Flight>>,
}

impl MediaTraitResolver {
    pub fn new(
        curated: Arc<dyn CuratedMediaSource>,
        cache: Arc<dyn MediaTraitCache>,
        classifier: Arc<dyn TraitClassifier>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            inner: Arc::new(ResolverInner {
                curated,
                cache,
                classifier,
                settings,
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Resolve `title` of the given type.
    ///
    /// Only fails for a blank title or when the detached inference task was
    /// lost; collaborator failures degrade to a neutral mapping instead.
    pub async fn resolve(
        &self,
        title: &str,
        media_type: MediaType,
    ) -> Result<MediaTraitMapping, CoreError> {
        let key = MediaKey::new(title, media_type)?;

        if let Some(mapping) = self.inner.lookup_curated(&key).await {
            tracing::debug!(key = %key, "Resolved from curated store");
            return Ok(mapping);
        }

        if let Some(mapping) = self.inner.lookup_cache(&key).await {
            tracing::debug!(key = %key, "Resolved from cache");
            return Ok(mapping);
        }

        self.infer_shared(key, title, false).await
    }

    /// Re-run inference for `title`, skipping curated and cached entries.
    /// A successful result supersedes the cached record.
    pub async fn refresh(
        &self,
        title: &str,
        media_type: MediaType,
    ) -> Result<MediaTraitMapping, CoreError> {
        let key = MediaKey::new(title, media_type)?;
        self.infer_shared(key, title, true).await
    }

    /// Number of inferences currently in flight.
    pub fn in_flight_count(&self) -> usize {
        self.inner.in_flight().len()
    }

    async fn infer_shared(
        &self,
        key: MediaKey,
        title: &str,
        force: bool,
    ) -> Result<MediaTraitMapping, CoreError> {
        let flight = {
            let mut in_flight = self.inner.in_flight();
            match in_flight.get(&key) {
                Some(existing) => {
                    tracing::debug!(key = %key, "Joining in-flight inference");
                    existing.clone()
                }
                None => {
                    let flight = spawn_inference(Arc::clone(&self.inner), key.clone(), title, force);
                    in_flight.insert(key, flight.clone());
                    flight
                }
            }
        };

        flight
            .await
            .map_err(|reason| CoreError::ResolutionUnavailable {
                title: title.to_string(),
                reason,
            })
    }
}

/// Start the inference for `key` on a detached task and return a shareable
/// handle to its result. The task removes its own in-flight entry when done.
fn spawn_inference(inner: Arc<ResolverInner>, key: MediaKey, title: &str, force: bool) -> Flight {
    let title = title.trim().to_string();
    let handle = tokio::spawn(async move {
        let _entry = InFlightEntry {
            inner: Arc::clone(&inner),
            key: key.clone(),
        };
        inner.infer(&key, &title, force).await
    });

    async move { handle.await.map_err(|e| format!("inference task failed: {e}")) }
        .boxed()
        .shared()
}

/// Removes the in-flight entry for `key` when the inference task finishes,
/// including when it panics.
struct InFlightEntry {
    inner: Arc<ResolverInner>,
    key: MediaKey,
}

impl Drop for InFlightEntry {
    fn drop(&mut self) {
        self.inner.in_flight().remove(&self.key);
    }
}

impl ResolverInner {
    fn in_flight(&self) -> MutexGuard<'_, HashMap<MediaKey, Flight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn lookup_curated(&self, key: &MediaKey) -> Option<MediaTraitMapping> {
        match self.curated.get(key).await {
            Ok(Some(mut mapping)) => {
                mapping.source = MappingSource::Curated;
                mapping.confidence = CURATED_CONFIDENCE;
                Some(mapping)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Curated lookup failed, continuing");
                None
            }
        }
    }

    async fn lookup_cache(&self, key: &MediaKey) -> Option<MediaTraitMapping> {
        match self.cache.get(key).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    /// Body of one inference flight.
    async fn infer(&self, key: &MediaKey, title: &str, force: bool) -> MediaTraitMapping {
        // Another flight for this key may have finished between the caller's
        // cache miss and this flight being registered.
        if !force {
            if let Some(mapping) = self.lookup_cache(key).await {
                return mapping;
            }
        }

        let started = Instant::now();
        let outcome = tokio::time::timeout(
            self.settings.inference_timeout,
            self.classifier.classify(title, key.media_type()),
        )
        .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let classification = match outcome {
            Ok(Ok(classification)) => classification,
            Ok(Err(err)) => {
                tracing::warn!(key = %key, elapsed_ms, error = %err, "Inference failed, using neutral vector");
                return degraded(key, title, &err.to_string());
            }
            Err(_) => {
                tracing::warn!(key = %key, elapsed_ms, "Inference timed out, using neutral vector");
                return degraded(key, title, "inference timed out");
            }
        };

        let mapping = self.accept(key, title, classification);
        tracing::info!(
            key = %key,
            confidence = mapping.confidence,
            elapsed_ms,
            "Inferred trait mapping"
        );

        if let Err(err) = self.cache.put(&mapping).await {
            tracing::warn!(key = %key, error = %err, "Failed to persist mapping to cache");
        }

        mapping
    }

    /// Turn a classification into a cacheable mapping, blending
    /// low-confidence vectors toward neutral while keeping the reported
    /// confidence.
    fn accept(&self, key: &MediaKey, title: &str, classification: Classification) -> MediaTraitMapping {
        let confidence = classification.confidence.max(0.0).min(1.0);
        let traits = if confidence < self.settings.low_confidence_threshold {
            classification
                .traits
                .blend_toward(&TraitVector::neutral(), LOW_CONFIDENCE_BLEND)
        } else {
            classification.traits
        };

        let canonical_title = classification
            .canonical_title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| title.to_string());

        MediaTraitMapping {
            input: title.to_string(),
            normalized_title: key.normalized_title().to_string(),
            canonical_title,
            media_type: key.media_type(),
            confidence,
            traits,
            notes: classification.notes.unwrap_or_default(),
            source: MappingSource::Inferred,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Neutral fallback used when no inference is available. Never cached.
fn degraded(key: &MediaKey, title: &str, reason: &str) -> MediaTraitMapping {
    MediaTraitMapping {
        input: title.to_string(),
        normalized_title: key.normalized_title().to_string(),
        canonical_title: title.to_string(),
        media_type: key.media_type(),
        confidence: 0.0,
        traits: TraitVector::neutral(),
        notes: format!("Inference unavailable: {reason}"),
        source: MappingSource::Inferred,
        created_at: chrono::Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
