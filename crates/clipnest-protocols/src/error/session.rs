//! Save-session errors.

use thiserror::Error;

use super::{ExtractError, RouterError};

#[derive(Debug, Error)]
pub enum SessionError {
    /// No valid signed-in session. The gate redirects to the external
    /// sign-in page and the flow halts; nothing else runs.
    #[error("Authentication required")]
    AuthRequired,

    /// Update or delete was attempted before any successful quick save.
    /// Rejected locally; no remote call is issued.
    #[error("No active saved item")]
    NoActiveItem,

    /// A remote call failed. Displayable and non-fatal.
    #[error("Remote call failed: {0}")]
    Remote(String),

    /// Page extraction failed before any save could start.
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    /// The cross-context transport failed underneath the session.
    #[error(transparent)]
    Transport(#[from] RouterError),
}
