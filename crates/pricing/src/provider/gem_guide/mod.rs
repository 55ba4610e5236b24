//! GemGuide price-guide provider.
//!
//! # API Endpoints
//!
//! - Diamonds: `{base}/diamonds/prices?shape={cut}&color={color}&clarity={clarity}&weight={carat}`
//! - Colored gems: `{base}/gems/prices?gem={gem_type}&weight={carat}`
//!
//! Requests authenticate with HTTP basic auth (username + API key).
//!
//! # Response Format
//!
//! Diamonds answer with a price table whose row 1 holds `[high, mid, low]`;
//! a `"-"` high cell means the guide lists no ceiling. Colored gems answer
//! with an object whose `"5"` key holds one price or a `[low, high]` band.
//! Errors come back as non-2xx responses with a `code` such as
//! `invalid_clarity` or `user_unauthenticated`.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::PricingError;
use crate::models::{GemPriceQuote, GemPriceResult, GemQuery};
use crate::provider::http::{build_client, read_json};
use crate::provider::GemPriceProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "GEMGUIDE";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the GemGuide API.
#[derive(Clone, Debug, Default)]
pub struct GemGuideConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

/// GemGuide provider for diamond and colored-gem prices.
///
/// # Example
///
/// ```ignore
/// use gemassure_pricing::{GemGuideConfig, GemGuideProvider, GemQuery};
///
/// let provider = GemGuideProvider::new(GemGuideConfig {
///     base_url: Some("https://api.gemguide.example/v1".to_string()),
///     username: Some("appraiser".to_string()),
///     api_key: Some("your_api_key".to_string()),
///     timeout: None,
/// });
/// let quote = provider.get_gem_prices(&query).await?;
/// ```
pub struct GemGuideProvider {
    client: Client,
    base_url: Option<String>,
    username: String,
    api_key: Option<String>,
}

impl GemGuideProvider {
    pub fn new(config: GemGuideConfig) -> Self {
        let client = build_client(config.timeout.unwrap_or(REQUEST_TIMEOUT));
        let base_url = config
            .base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Self {
            client,
            base_url,
            username: config.username.unwrap_or_default(),
            api_key: config.api_key.filter(|key| !key.is_empty()),
        }
    }

    /// Endpoint path and query pairs for a gem query. Absent attributes are
    /// left out so the guide can report which one is missing.
    fn request_parts(query: &GemQuery) -> (&'static str, Vec<(&'static str, String)>) {
        let mut params = Vec::new();
        match query {
            GemQuery::Diamond {
                cut,
                color,
                clarity,
                carat,
            } => {
                push_param(&mut params, "shape", cut.as_deref());
                push_param(&mut params, "color", color.as_deref());
                push_param(&mut params, "clarity", clarity.as_deref());
                if let Some(carat) = carat {
                    params.push(("weight", carat.normalize().to_string()));
                }
                ("diamonds/prices", params)
            }
            GemQuery::Colored { gem_type, carat } => {
                params.push(("gem", gem_type.clone()));
                if let Some(carat) = carat {
                    params.push(("weight", carat.normalize().to_string()));
                }
                ("gems/prices", params)
            }
        }
    }
}

fn push_param(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

#[async_trait]
impl GemPriceProvider for GemGuideProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }

    async fn get_gem_prices(&self, query: &GemQuery) -> Result<GemPriceQuote, PricingError> {
        let (base_url, api_key) = match (&self.base_url, &self.api_key) {
            (Some(base_url), Some(api_key)) => (base_url, api_key),
            _ => {
                return Err(PricingError::NotConfigured {
                    provider: PROVIDER_ID.to_string(),
                })
            }
        };

        let (path, params) = Self::request_parts(query);
        let url = format!("{}/{}", base_url, path);
        debug!(provider = PROVIDER_ID, %url, "requesting gem prices");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(api_key))
            .query(&params)
            .send()
            .await
            .map_err(|e| PricingError::from_reqwest(PROVIDER_ID, e))?;

        let raw = read_json(PROVIDER_ID, response).await?;

        let result = match query {
            GemQuery::Diamond { .. } => GemPriceResult::diamond_from_json(&raw),
            GemQuery::Colored { .. } => GemPriceResult::colored_from_json(&raw),
        }
        .ok_or_else(|| PricingError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: "unexpected price payload shape".to_string(),
        })?;

        Ok(GemPriceQuote { result, raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceCell;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> GemGuideProvider {
        GemGuideProvider::new(GemGuideConfig {
            base_url: Some(format!("{}/", server.uri())),
            username: Some("appraiser".to_string()),
            api_key: Some("test_key".to_string()),
            timeout: Some(Duration::from_secs(2)),
        })
    }

    fn diamond_query() -> GemQuery {
        GemQuery::Diamond {
            cut: Some("Round".to_string()),
            color: Some("G".to_string()),
            clarity: Some("VS1".to_string()),
            carat: Some(dec!(1.0)),
        }
    }

    #[test]
    fn test_provider_id() {
        let provider = GemGuideProvider::new(GemGuideConfig::default());
        assert_eq!(provider.id(), "GEMGUIDE");
    }

    #[test]
    fn test_is_configured_needs_url_and_key() {
        assert!(!GemGuideProvider::new(GemGuideConfig::default()).is_configured());
        let provider = GemGuideProvider::new(GemGuideConfig {
            base_url: Some("https://gems.example".to_string()),
            api_key: Some(String::new()),
            ..Default::default()
        });
        assert!(!provider.is_configured());
    }

    #[test]
    fn test_diamond_request_parts_skip_missing_attributes() {
        let query = GemQuery::Diamond {
            cut: Some("Round".to_string()),
            color: None,
            clarity: Some("VS1".to_string()),
            carat: Some(dec!(1.50)),
        };
        let (path, params) = GemGuideProvider::request_parts(&query);
        assert_eq!(path, "diamonds/prices");
        assert_eq!(
            params,
            vec![
                ("shape", "Round".to_string()),
                ("clarity", "VS1".to_string()),
                ("weight", "1.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_colored_request_parts() {
        let query = GemQuery::Colored {
            gem_type: "Ruby".to_string(),
            carat: None,
        };
        let (path, params) = GemGuideProvider::request_parts(&query);
        assert_eq!(path, "gems/prices");
        assert_eq!(params, vec![("gem", "Ruby".to_string())]);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails_without_request() {
        let provider = GemGuideProvider::new(GemGuideConfig::default());
        let err = provider.get_gem_prices(&diamond_query()).await.unwrap_err();
        assert!(matches!(err, PricingError::NotConfigured { .. }));
    }

    #[tokio::test]
    async fn test_fetches_diamond_table() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/diamonds/prices"))
            .and(query_param("shape", "Round"))
            .and(query_param("clarity", "VS1"))
            .and(header_exists("authorization"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([null, ["4500", "3000", "2000"]])),
            )
            .mount(&server)
            .await;

        let quote = provider_for(&server)
            .get_gem_prices(&diamond_query())
            .await
            .unwrap();

        match quote.result {
            GemPriceResult::DiamondTable(rows) => {
                assert_eq!(rows[1][1], PriceCell::Price(dec!(3000)));
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(quote.raw, json!([null, ["4500", "3000", "2000"]]));
    }

    #[tokio::test]
    async fn test_structured_error_is_decoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/diamonds/prices"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": "invalid_clarity",
                "message": "Unknown clarity grade"
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .get_gem_prices(&diamond_query())
            .await
            .unwrap_err();

        assert_eq!(err.upstream_code(), Some("invalid_clarity"));
        assert_eq!(err.upstream_message(), Some("Unknown clarity grade"));
    }

    #[tokio::test]
    async fn test_wrong_payload_shape_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gems/prices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["not", "an", "object"])))
            .mount(&server)
            .await;

        let query = GemQuery::Colored {
            gem_type: "Ruby".to_string(),
            carat: Some(dec!(2)),
        };
        let err = provider_for(&server).get_gem_prices(&query).await.unwrap_err();
        assert!(matches!(err, PricingError::MalformedResponse { .. }));
    }
}
