//! Error types and failure classification for the pricing crate.
//!
//! This module provides:
//! - [`PricingError`]: The error enum for all upstream price lookups
//! - [`FailureClass`]: Classification used to map errors to codes and statuses

mod class;

pub use class::FailureClass;

use thiserror::Error;

/// Errors that can occur while fetching prices from an upstream provider.
#[derive(Error, Debug)]
pub enum PricingError {
    /// The provider is missing its base URL or credentials.
    #[error("Provider not configured: {provider}")]
    NotConfigured {
        /// The provider that is not configured
        provider: String,
    },

    /// The provider answered with a non-success status or an error body.
    #[error("Upstream error: {provider} - HTTP {status}")]
    Upstream {
        /// The provider that returned the error
        provider: String,
        /// HTTP status of the upstream response
        status: u16,
        /// Structured error code from the response body, if any
        code: Option<String>,
        /// Human-readable message from the response body, if any
        message: Option<String>,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider could not be reached.
    #[error("Network error: {provider} - {message}")]
    Network {
        /// The provider that could not be reached
        provider: String,
        /// Transport error description
        message: String,
    },

    /// The provider answered with a body that could not be decoded.
    #[error("Malformed response: {provider} - {message}")]
    MalformedResponse {
        /// The provider that returned the body
        provider: String,
        /// Decoding failure description
        message: String,
    },

    /// The metal symbol is not one the spot-price provider supports.
    #[error("Unsupported metal symbol: {0}")]
    UnsupportedSymbol(String),
}

impl PricingError {
    /// Convert a transport error from `reqwest`, separating timeouts from
    /// other network failures.
    pub fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::Network {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// The structured upstream error code, when the provider sent one.
    pub fn upstream_code(&self) -> Option<&str> {
        match self {
            Self::Upstream { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The upstream message, when the provider sent one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::Upstream { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Returns the failure class for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemassure_pricing::errors::{FailureClass, PricingError};
    ///
    /// let error = PricingError::Timeout { provider: "GEMGUIDE".to_string() };
    /// assert_eq!(error.failure_class(), FailureClass::Timeout);
    /// ```
    pub fn failure_class(&self) -> FailureClass {
        match self {
            Self::NotConfigured { .. } => FailureClass::NotConfigured,
            Self::Upstream { status, code, .. } => {
                FailureClass::from_upstream(*status, code.as_deref())
            }
            Self::Timeout { .. } => FailureClass::Timeout,
            Self::Network { .. } => FailureClass::Transport,
            Self::MalformedResponse { .. } => FailureClass::Malformed,
            Self::UnsupportedSymbol(_) => FailureClass::Input,
        }
    }
}
