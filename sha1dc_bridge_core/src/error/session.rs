//! Session table error types

use crate::session::SessionHandle;
use thiserror::Error;

/// Errors raised by the session table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Handle was never issued, or its session has been released
    #[error("Invalid session handle {handle}")]
    InvalidHandle { handle: SessionHandle },

    /// The allocator refused to grow the session table
    #[error("Failed to allocate session storage: {message}")]
    AllocationFailed { message: String },

    /// Configured session limit reached
    #[error("Session limit reached: {limit} sessions are live")]
    LimitReached { limit: usize },
}

impl SessionError {
    /// Create an invalid handle error
    pub fn invalid_handle(handle: SessionHandle) -> Self {
        Self::InvalidHandle { handle }
    }

    /// Create an allocation failure error
    pub fn allocation_failed(message: impl Into<String>) -> Self {
        Self::AllocationFailed {
            message: message.into(),
        }
    }

    /// Create a session limit error
    pub fn limit_reached(limit: usize) -> Self {
        Self::LimitReached { limit }
    }

    /// Whether the failure surfaces to the host as a null handle
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            Self::AllocationFailed { .. } | Self::LimitReached { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_handle_error() {
        let error = SessionError::invalid_handle(SessionHandle::from_raw(0x1_0000_0003));
        assert!(error.to_string().contains("Invalid session handle"));
        assert!(!error.is_allocation_failure());
    }

    #[test]
    fn test_allocation_failures() {
        assert!(SessionError::allocation_failed("out of memory").is_allocation_failure());
        assert!(SessionError::limit_reached(4).is_allocation_failure());
        assert!(SessionError::limit_reached(4).to_string().contains('4'));
    }
}
