// src/error.rs
// Error taxonomy for the orchestration engine

use thiserror::Error;

use crate::types::OperationOutcome;

/// Everything that can go wrong with one operation.
///
/// Each kind resolves to a normalized failed outcome; no kind is fatal to
/// the process and none may leave the controller's in-flight flag set.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Rejected before any state change or network activity.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Another operation is in flight; requests are rejected, not queued.
    #[error("an operation is already in progress, try again when it finishes")]
    Busy,

    /// The request could not be delivered after all retry attempts.
    #[error("transformation service unreachable: {0}")]
    Transport(String),

    /// The service answered but declined the request. Authoritative,
    /// never retried.
    #[error("transformation service declined the request: {0}")]
    ServiceDecline(String),
}

impl OperationError {
    pub fn into_outcome(self) -> OperationOutcome {
        OperationOutcome::failed(self.to_string())
    }
}
