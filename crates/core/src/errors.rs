//! Core error types for the estimate pipeline.

use gemassure_pricing::{FailureClass, PricingError};
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for an estimate computation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Gem pricing failed: {0}")]
    GemPricing(#[source] PricingError),

    #[error("Metal pricing failed: {0}")]
    MetalPricing(#[source] PricingError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("'{0}' must not be negative")]
    NegativeWeight(&'static str),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0} is too large to compute")]
    ValueOutOfRange(&'static str),
}

impl Error {
    /// Failure class used to choose the HTTP status.
    pub fn failure_class(&self) -> FailureClass {
        match self {
            Error::GemPricing(e) | Error::MetalPricing(e) => e.failure_class(),
            Error::Validation(_) => FailureClass::Input,
        }
    }

    /// Machine-readable code reported to the caller.
    ///
    /// Upstream codes pass through unchanged. Local failures get a code naming
    /// the branch that failed. Unclassified upstream answers without a code
    /// yield `None`.
    pub fn code(&self) -> Option<String> {
        match self {
            Error::Validation(ValidationError::NegativeWeight(_)) => {
                Some("invalid_weight".to_string())
            }
            Error::Validation(ValidationError::InvalidBody(_)) => {
                Some("invalid_request_body".to_string())
            }
            Error::Validation(ValidationError::ValueOutOfRange(_)) => {
                Some("value_out_of_range".to_string())
            }
            Error::GemPricing(e) => pricing_code(e, "gem"),
            Error::MetalPricing(e) => pricing_code(e, "metal"),
        }
    }

    /// Message from the upstream, if it sent one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Error::GemPricing(e) | Error::MetalPricing(e) => e.upstream_message(),
            Error::Validation(_) => None,
        }
    }
}

fn pricing_code(err: &PricingError, branch: &str) -> Option<String> {
    if let Some(code) = err.upstream_code() {
        return Some(code.to_string());
    }
    match err {
        PricingError::Upstream { status, .. } if *status >= 500 => Some("server_error".to_string()),
        PricingError::Upstream { .. } => None,
        PricingError::Timeout { .. } => Some("upstream_timeout".to_string()),
        PricingError::Network { .. } => Some(format!("{}_service_unreachable", branch)),
        PricingError::MalformedResponse { .. } => Some("malformed_upstream_response".to_string()),
        PricingError::NotConfigured { .. } => Some(format!("{}_service_not_configured", branch)),
        PricingError::UnsupportedSymbol(_) => Some("unsupported_metal".to_string()),
    }
}
