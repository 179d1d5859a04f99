//! [`TraitClassifier`] implementations backed by Gemini.

use async_trait::async_trait;

use traitmatch_core::classifier::{Classification, ClassifierError, TraitClassifier};
use traitmatch_core::media::MediaType;

use crate::api::{GeminiApi, GeminiApiError};
use crate::parse::parse_classification;
use crate::prompt::build_prompt;

/// Classifies titles by prompting a Gemini model.
#[derive(Clone)]
pub struct GeminiClassifier {
    api: GeminiApi,
}

impl GeminiClassifier {
    pub fn new(api: GeminiApi) -> Self {
        Self { api }
    }
}

impl From<GeminiApiError> for ClassifierError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            GeminiApiError::Request(e) => ClassifierError::Unavailable(e.to_string()),
            GeminiApiError::ApiError { status, body } => {
                ClassifierError::Unavailable(format!("status {status}: {body}"))
            }
        }
    }
}

#[async_trait]
impl TraitClassifier for GeminiClassifier {
    async fn classify(
        &self,
        title: &str,
        media_type: MediaType,
    ) -> Result<Classification, ClassifierError> {
        let prompt = build_prompt(title, media_type);
        tracing::debug!(title, media_type = %media_type, model = self.api.model(), "Requesting trait mapping");

        let response = self.api.generate_content(&prompt).await?;
        let text = response
            .text()
            .ok_or_else(|| ClassifierError::InvalidResponse("empty response".into()))?;

        parse_classification(&text)
    }
}

/// Stand-in used when no API key is configured. Every call fails, so the
/// resolver degrades uncurated titles to the neutral vector.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledClassifier;

#[async_trait]
impl TraitClassifier for DisabledClassifier {
    async fn classify(
        &self,
        _title: &str,
        _media_type: MediaType,
    ) -> Result<Classification, ClassifierError> {
        Err(ClassifierError::Unavailable(
            "no inference API key configured".into(),
        ))
    }
}
