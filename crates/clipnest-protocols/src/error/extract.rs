//! Page extraction errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The page location is not an http(s) URL, so there is nothing to save.
    #[error("Invalid page protocol: {0}")]
    InvalidProtocol(String),

    /// The page document could not be read.
    #[error("Failed to read page document: {0}")]
    DomRead(String),
}
