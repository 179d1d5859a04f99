//! Capability interface for the external trait-inference collaborator.

use async_trait::async_trait;

use crate::media::MediaType;
use crate::trait_vector::TraitVector;

/// What the collaborator returned for one title.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub traits: TraitVector,
    /// Self-reported confidence in `[0, 1]`.
    pub confidence: f64,
    /// Canonical title when the collaborator recognised the input.
    pub canonical_title: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// The collaborator could not be reached or rejected the request.
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered with something that is not a usable vector.
    #[error("Classifier returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Maps one free-text title to a trait vector.
///
/// Implementations must be cheap to share across tasks; the resolver calls
/// them from detached tasks and bounds each call with its own timeout.
#[async_trait]
pub trait TraitClassifier: Send + Sync {
    async fn classify(
        &self,
        title: &str,
        media_type: MediaType,
    ) -> Result<Classification, ClassifierError>;
}
