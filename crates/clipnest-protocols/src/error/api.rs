//! Remote API client errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or non-success status. The session layer treats
    /// every rejection uniformly, so the message is the whole payload.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The backend answered but the body was not the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
