//! Ports infrastructure
//!
//! Domain crates define their own port traits (for example the claims
//! repository) on top of the marker trait and error type here, so that an
//! in-memory adapter and a database adapter can be swapped freely.
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait ClaimRepository: DomainPort {
//!     async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;
//! }
//! ```

use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },
}

impl PortError {
    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }
}

/// Marker trait for all domain ports
///
/// Ports must be shareable across tasks.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_conflict() {
        let error = PortError::conflict("claim CLM-1 already exists");
        assert!(matches!(error, PortError::Conflict { .. }));
        assert_eq!(error.to_string(), "Conflict: claim CLM-1 already exists");
    }
}
