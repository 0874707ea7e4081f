//! Checkout error types

use thiserror::Error;

/// Error type for checkout operations
///
/// Every variant carries an operator-facing message; failures are caught
/// at component boundaries and displayed, never left to tear down the
/// session.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Lookup found nothing (recoverable)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local validation failure, no network call was made
    #[error("{0}")]
    Validation(String),

    /// Network or HTTP failure (retryable by the operator)
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A precondition of the operation is missing
    #[error("{0}")]
    MissingPrecondition(String),

    /// Response did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        Self::BackendUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

/// Result type for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
