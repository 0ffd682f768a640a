//! Service-level error type
//!
//! Covers startup and infrastructure failures: configuration, I/O, store
//! preparation and pool creation. Request handling has its own error type,
//! [`ApiError`](crate::handlers::ApiError), which knows how to become an HTTP
//! response.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store error outside the request path
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Database pool could not be created
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
