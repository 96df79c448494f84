//! Error types for the SHA-1 collision-detection bridge
//!
//! Errors are split by concern: session table failures, load-time carrier
//! registration failures, and configuration failures. None of them cross the
//! C boundary as values; the `ffi` layer flattens them into null handles,
//! booleans and load status codes.

use thiserror::Error;

pub mod config;
pub mod registration;
pub mod session;

pub use self::config::ConfigError;
pub use self::registration::RegistrationError;
pub use self::session::SessionError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the bridge
#[derive(Error, Debug)]
pub enum Error {
    /// Session table errors
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Result carrier registration errors
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(ConfigError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionHandle;
    use std::error::Error as StdError;

    #[test]
    fn test_session_error_is_transparent() {
        let error: Error = SessionError::invalid_handle(SessionHandle::from_raw(42)).into();
        assert!(error.to_string().contains("Invalid session handle"));
        assert!(matches!(error, Error::Session(SessionError::InvalidHandle { .. })));
    }

    #[test]
    fn test_registration_error_wrapping() {
        let error: Error = RegistrationError::missing_field("part1", "J").into();
        assert!(error.to_string().contains("part1"));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_config_error_from_figment() {
        let figment_err = figment::Error::from("bad value".to_string());
        let error: Error = figment_err.into();
        assert!(matches!(error, Error::Config(ConfigError::Extract(_))));
        assert!(error.to_string().contains("bad value"));
    }
}
