//! GemAssure Pricing Crate
//!
//! Clients for the two upstream price sources the estimate service depends on:
//!
//! - a gem-grading price guide (GemGuide) that returns a diamond price table
//!   or a colored-gem price band for a given gem identity
//! - a precious-metal spot-price service (Metal Price API) keyed by currency pair
//!
//! # Architecture
//!
//! ```text
//! +------------------+       +----------------------+
//! |  Estimate core   | ----> |  GemPriceProvider    | --> GemGuide REST API
//! |                  |       +----------------------+
//! |                  |       +----------------------+
//! |                  | ----> |  MetalPriceProvider  | --> Metal Price API
//! +------------------+       +----------------------+
//! ```
//!
//! Providers return the parsed result together with the raw upstream payload so
//! callers can echo it back for traceability. Failures are reported as
//! [`PricingError`], classified by [`FailureClass`].

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{FailureClass, PricingError};
pub use models::{
    decimal_from_json, GemPriceQuote, GemPriceResult, GemQuery, MetalSymbol, PriceCell, SpotRate,
};
pub use provider::gem_guide::{GemGuideConfig, GemGuideProvider};
pub use provider::metal_price_api::MetalPriceApiProvider;
pub use provider::{GemPriceProvider, MetalPriceProvider};
