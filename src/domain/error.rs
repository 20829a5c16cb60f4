// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Failed to decode response: {0}")]
    DecodeFailed(String),
    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),
    #[error("Note not found: {0}")]
    NoteNotFound(i64),
}

impl DomainError {
    /// True for failures of the remote round-trip itself.
    ///
    /// Transport, status and decode errors all collapse into the same
    /// "operation failed" outcome for the view.
    pub fn is_operation_failure(&self) -> bool {
        matches!(
            self,
            DomainError::RequestFailed(_)
                | DomainError::Status { .. }
                | DomainError::DecodeFailed(_)
        )
    }
}
