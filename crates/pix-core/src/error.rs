//! # Gateway Error Types
//!
//! Typed error handling for PIX gateway operations.
//! Every fallible operation returns `Result<T, GatewayError>`.

use crate::identity::GatewayIdentity;
use thiserror::Error;

/// Core error type for gateway selection and payment operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Invalid or contradictory gateway configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The chosen gateway has no secret configured
    #[error("Missing credential for gateway {gateway}")]
    MissingCredential { gateway: GatewayIdentity },

    /// Caller-supplied payment data failed basic shape checks
    #[error("Validation error: {0}")]
    Validation(String),

    /// Provider rejected our credentials (HTTP 401)
    #[error("Authentication with {gateway} failed, check the API key")]
    Auth { gateway: GatewayIdentity },

    /// Any other provider-side failure: non-success status, network, bad body
    #[error("Upstream error [{gateway}]: {message}")]
    Upstream {
        gateway: GatewayIdentity,
        message: String,
    },
}

impl GatewayError {
    /// Shorthand for an upstream failure
    pub fn upstream(gateway: GatewayIdentity, message: impl Into<String>) -> Self {
        GatewayError::Upstream {
            gateway,
            message: message.into(),
        }
    }

    /// Returns true if the caller may reasonably retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Upstream { .. })
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Configuration(_) => 500,
            GatewayError::MissingCredential { .. } => 500,
            GatewayError::Validation(_) => 400,
            GatewayError::Auth { .. } => 502,
            GatewayError::Upstream { .. } => 502,
        }
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
