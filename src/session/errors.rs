use crate::api::ApiError;

// ============================================================================
// Session Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}
