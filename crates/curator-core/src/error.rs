//! Domain errors

use curator_shared::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Absent, expired, and malformed session ids all collapse into this.
    #[error("Session not found or expired")]
    SessionNotFound,

    #[error("No apps selected")]
    EmptySelection,

    #[error("Invalid apps selected: {0:?}")]
    UnknownItems(Vec<ItemId>),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Stored session payload is corrupt: {0}")]
    CorruptPayload(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::SessionNotFound)
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(e: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(e.to_string())
    }
}
