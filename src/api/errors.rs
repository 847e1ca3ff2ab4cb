// ============================================================================
// Remote Call Errors
// ============================================================================

/// Generic remote-call failure. Callers surface it and keep prior state.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request could not be completed: {0}")]
    Transport(String),

    #[error("Server responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}
