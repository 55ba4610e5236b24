//! Price provider trait definitions.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::PricingError;
use crate::models::{GemPriceQuote, GemQuery, MetalSymbol, SpotRate};

/// Source of gem prices keyed by gem identity.
#[async_trait]
pub trait GemPriceProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Whether the provider has what it needs to make requests.
    fn is_configured(&self) -> bool;

    /// Look up prices for a gem.
    ///
    /// Diamonds yield a [`GemPriceResult::DiamondTable`](crate::GemPriceResult),
    /// other gems a [`GemPriceResult::ColoredPrices`](crate::GemPriceResult).
    async fn get_gem_prices(&self, query: &GemQuery) -> Result<GemPriceQuote, PricingError>;
}

/// Source of precious-metal spot rates keyed by currency pair.
#[async_trait]
pub trait MetalPriceProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Whether the provider has what it needs to make requests.
    fn is_configured(&self) -> bool;

    /// Fetch the latest rate for one metal against `base`.
    async fn get_spot_rate(&self, symbol: MetalSymbol, base: &str)
        -> Result<SpotRate, PricingError>;

    /// Fetch the latest rates payload for several metals, undecoded.
    async fn get_latest_raw(
        &self,
        base: &str,
        symbols: &[MetalSymbol],
    ) -> Result<Value, PricingError>;
}
