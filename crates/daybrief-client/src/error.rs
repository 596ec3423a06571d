//! Client error types.

use thiserror::Error;

use daybrief_core::TracingError;
use daybrief_providers::ProviderError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Calendar source error.
    #[error("calendar source error: {0}")]
    Provider(#[from] ProviderError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Logging could not be set up.
    #[error("logging setup failed: {0}")]
    Tracing(#[from] TracingError),

    /// The run finished but reported problems, and strict mode is on.
    #[error("sync finished with {0} issue(s)")]
    Issues(usize),
}

impl ClientError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            ClientError::config("no snapshot").to_string(),
            "configuration error: no snapshot"
        );
        assert_eq!(
            ClientError::Issues(2).to_string(),
            "sync finished with 2 issue(s)"
        );
        let err = ClientError::from(ProviderError::not_found("calendar 'x'"));
        assert_eq!(err.to_string(), "calendar source error: not_found: calendar 'x'");
    }
}
