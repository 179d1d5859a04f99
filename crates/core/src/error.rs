#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Incomplete submission: answered {answered} of {required} questions")]
    IncompleteSubmission { answered: usize, required: usize },

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    #[error("Resolution unavailable for '{title}': {reason}")]
    ResolutionUnavailable { title: String, reason: String },

    #[error("Invalid trait vector: {0}")]
    InvalidTraitVector(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
