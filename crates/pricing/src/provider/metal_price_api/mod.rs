//! Metal Price API provider for precious metal spot rates.
//!
//! This provider fetches live rates from the Metal Price API `latest` endpoint.
//! It supports the following metals:
//! - XAU (Gold)
//! - XAG (Silver)
//! - XPT (Platinum)
//! - XPD (Palladium)
//!
//! The API answers `{"success": true, "base": "USD", "timestamp": ..., "rates": {"XAU": ...}}`
//! where each rate is expressed per one unit of the base currency.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::PricingError;
use crate::models::{decimal_from_json, MetalSymbol, SpotRate};
use crate::provider::http::{build_client, error_fields, read_json};
use crate::provider::MetalPriceProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "METAL_PRICE_API";

/// Public API root used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://api.metalpriceapi.com/v1";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Metal Price API provider for precious metals spot rates.
///
/// # Example
///
/// ```ignore
/// use gemassure_pricing::{MetalPriceApiProvider, MetalSymbol};
///
/// let provider = MetalPriceApiProvider::new(Some("your_api_key".to_string()));
/// let spot = provider.get_spot_rate(MetalSymbol::Gold, "USD").await?;
/// ```
pub struct MetalPriceApiProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MetalPriceApiProvider {
    /// Create a new Metal Price API provider with the given API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: build_client(REQUEST_TIMEOUT),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    /// Point the provider at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.base_url = trimmed.to_string();
        }
        self
    }

    /// Replace the default request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    /// Decode the rate for `symbol` out of a `latest` payload.
    ///
    /// An explicit `success: false` is an upstream error. A payload that lacks
    /// a usable rate for the symbol yields `rate: None`.
    fn parse_spot_rate(
        raw: Value,
        symbol: MetalSymbol,
        base: &str,
    ) -> Result<SpotRate, PricingError> {
        if raw.get("success").and_then(Value::as_bool) == Some(false) {
            let (code, message) = error_fields(&raw);
            return Err(PricingError::Upstream {
                provider: PROVIDER_ID.to_string(),
                status: 200,
                code,
                message,
            });
        }

        let rate = raw
            .get("rates")
            .and_then(|rates| rates.get(symbol.as_str()))
            .and_then(decimal_from_json);
        if rate.is_none() {
            warn!(
                provider = PROVIDER_ID,
                symbol = symbol.as_str(),
                "rate missing from spot-price payload"
            );
        }

        let timestamp = raw
            .get("timestamp")
            .and_then(Value::as_i64)
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0));

        let base = raw
            .get("base")
            .and_then(Value::as_str)
            .unwrap_or(base)
            .to_string();

        Ok(SpotRate {
            symbol,
            base,
            rate,
            timestamp,
            raw,
        })
    }
}

#[async_trait]
impl MetalPriceProvider for MetalPriceApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn get_spot_rate(
        &self,
        symbol: MetalSymbol,
        base: &str,
    ) -> Result<SpotRate, PricingError> {
        let raw = self.get_latest_raw(base, &[symbol]).await?;
        Self::parse_spot_rate(raw, symbol, base)
    }

    async fn get_latest_raw(
        &self,
        base: &str,
        symbols: &[MetalSymbol],
    ) -> Result<Value, PricingError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PricingError::NotConfigured {
                provider: PROVIDER_ID.to_string(),
            })?;

        let currencies = symbols
            .iter()
            .map(MetalSymbol::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/latest", self.base_url);
        debug!(provider = PROVIDER_ID, %base, %currencies, "requesting spot rates");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", api_key),
                ("base", base),
                ("currencies", currencies.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PricingError::from_reqwest(PROVIDER_ID, e))?;

        read_json(PROVIDER_ID, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_provider_id() {
        let provider = MetalPriceApiProvider::new(Some("test_key".to_string()));
        assert_eq!(provider.id(), "METAL_PRICE_API");
    }

    #[test]
    fn test_is_configured() {
        assert!(MetalPriceApiProvider::new(Some("test_key".to_string())).is_configured());
        assert!(!MetalPriceApiProvider::new(None).is_configured());
        assert!(!MetalPriceApiProvider::new(Some(String::new())).is_configured());
    }

    #[test]
    fn test_blank_base_url_keeps_default() {
        let provider = MetalPriceApiProvider::new(None).with_base_url("  ");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        let provider = MetalPriceApiProvider::new(None).with_base_url("http://localhost:9000/v1/");
        assert_eq!(provider.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn test_parse_spot_rate() {
        let raw = json!({
            "success": true,
            "base": "USD",
            "timestamp": 1700000000,
            "rates": {"XAU": 0.00055}
        });
        let spot = MetalPriceApiProvider::parse_spot_rate(raw, MetalSymbol::Gold, "USD").unwrap();
        assert_eq!(spot.rate, Some(dec!(0.00055)));
        assert_eq!(spot.base, "USD");
        assert!(spot.timestamp.is_some());
    }

    #[test]
    fn test_missing_rate_degrades_to_none() {
        let raw = json!({"success": true, "base": "USD", "rates": {"XAG": 0.04}});
        let spot = MetalPriceApiProvider::parse_spot_rate(raw, MetalSymbol::Gold, "USD").unwrap();
        assert_eq!(spot.rate, None);

        let spot =
            MetalPriceApiProvider::parse_spot_rate(json!({}), MetalSymbol::Gold, "USD").unwrap();
        assert_eq!(spot.rate, None);
        assert_eq!(spot.base, "USD");
    }

    #[test]
    fn test_unsuccessful_payload_is_upstream_error() {
        let raw = json!({"success": false, "error": {"statusCode": 101, "message": "Invalid API Key"}});
        let err =
            MetalPriceApiProvider::parse_spot_rate(raw, MetalSymbol::Gold, "USD").unwrap_err();
        assert_eq!(err.upstream_message(), Some("Invalid API Key"));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails() {
        let provider = MetalPriceApiProvider::new(None);
        let err = provider
            .get_spot_rate(MetalSymbol::Gold, "USD")
            .await
            .unwrap_err();
        assert!(matches!(err, PricingError::NotConfigured { .. }));
    }

    #[tokio::test]
    async fn test_fetches_spot_rate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("api_key", "test_key"))
            .and(query_param("base", "USD"))
            .and(query_param("currencies", "XPT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "base": "USD",
                "timestamp": 1700000000,
                "rates": {"XPT": 0.0011}
            })))
            .mount(&server)
            .await;

        let provider =
            MetalPriceApiProvider::new(Some("test_key".to_string())).with_base_url(server.uri());
        let spot = provider
            .get_spot_rate(MetalSymbol::Platinum, "USD")
            .await
            .unwrap();
        assert_eq!(spot.rate, Some(dec!(0.0011)));
    }

    #[tokio::test]
    async fn test_http_failure_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider =
            MetalPriceApiProvider::new(Some("test_key".to_string())).with_base_url(server.uri());
        let err = provider
            .get_latest_raw("USD", &MetalSymbol::ALL)
            .await
            .unwrap_err();
        assert!(matches!(err, PricingError::Upstream { status: 503, .. }));
    }
}
