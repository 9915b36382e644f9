//! Claims domain errors

use thiserror::Error;

use core_kernel::{MoneyError, PortError};

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Claim state invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Repository error: {0}")]
    Repository(#[from] PortError),
}

impl ClaimError {
    /// Returns true if the target claim does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            ClaimError::ClaimNotFound(_) => true,
            ClaimError::Repository(_) => false,
            _ => false,
        }
    }
}
