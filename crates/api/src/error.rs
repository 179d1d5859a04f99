use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use traitmatch_core::error::CoreError;
use traitmatch_core::store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `traitmatch_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The catalog or a mapping store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body was not the expected JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::IncompleteSubmission { .. } => (
                    StatusCode::BAD_REQUEST,
                    "INCOMPLETE_SUBMISSION",
                    core.to_string(),
                ),
                CoreError::UnknownReference(msg) => {
                    (StatusCode::BAD_REQUEST, "UNKNOWN_REFERENCE", msg.clone())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::ResolutionUnavailable { title, reason } => {
                    tracing::warn!(title = %title, reason = %reason, "Resolution unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "RESOLUTION_UNAVAILABLE",
                        format!("Could not resolve '{title}'"),
                    )
                }
                CoreError::InvalidTraitVector(msg) => {
                    tracing::error!(error = %msg, "Invalid trait vector");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Storage errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
