use std::sync::Arc;

use async_trait::async_trait;
use gemassure_pricing::{GemPriceProvider, GemQuery, MetalPriceProvider, PricingError};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use super::error_messages::human_message;
use super::estimate_model::{
    apply_markup, ErrorResponse, EstimateFailure, EstimateRequest, EstimateResponse,
    MetalBreakdown, RawPayloads,
};
use super::estimate_traits::EstimateServiceTrait;
use super::gem_valuation::{gem_value, GemValue};
use crate::errors::{Error, Result, ValidationError};
use crate::metals::{metal_config, to_troy_ounces, MetalConfig};
use crate::request_log::{LogEntry, LoggedError, RequestLogSink};

/// Currency every spot rate is requested against.
const QUOTE_CURRENCY: &str = "USD";

/// Unit assumed when the request does not name one.
const DEFAULT_METAL_UNIT: &str = "grams";

struct GemValuation {
    value: GemValue,
    raw: Value,
}

struct MetalValuation {
    value: Decimal,
    breakdown: MetalBreakdown,
    raw: Value,
}

pub struct EstimateService {
    gem_provider: Arc<dyn GemPriceProvider>,
    metal_provider: Arc<dyn MetalPriceProvider>,
    request_log: Arc<dyn RequestLogSink>,
}

impl EstimateService {
    pub fn new(
        gem_provider: Arc<dyn GemPriceProvider>,
        metal_provider: Arc<dyn MetalPriceProvider>,
        request_log: Arc<dyn RequestLogSink>,
    ) -> Self {
        EstimateService {
            gem_provider,
            metal_provider,
            request_log,
        }
    }

    async fn value_gem(&self, query: Option<GemQuery>) -> Result<Option<GemValuation>> {
        let Some(query) = query else {
            return Ok(None);
        };

        let quote = self
            .gem_provider
            .get_gem_prices(&query)
            .await
            .map_err(Error::GemPricing)?;

        let value = gem_value(&quote.result).ok_or_else(|| {
            Error::GemPricing(PricingError::MalformedResponse {
                provider: self.gem_provider.id().to_string(),
                message: "price table has no usable mid price".to_string(),
            })
        })?;

        Ok(Some(GemValuation {
            value,
            raw: quote.raw,
        }))
    }

    /// Resolve the alloy and weight to price, if the request names both.
    fn metal_lookup(request: &EstimateRequest) -> Option<(&'static MetalConfig, Decimal)> {
        let metal_type = request.metal_type()?;
        let weight = request.metal_weight?;
        match metal_config(metal_type) {
            Some(config) => Some((config, weight)),
            None => {
                warn!("Unknown metal type '{}', metal value set to 0", metal_type);
                None
            }
        }
    }

    async fn value_metal(
        &self,
        lookup: Option<(&'static MetalConfig, Decimal)>,
        unit: &str,
    ) -> Result<Option<MetalValuation>> {
        let Some((config, weight)) = lookup else {
            return Ok(None);
        };

        let weight_in_ounces = to_troy_ounces(weight, unit);
        let spot = self
            .metal_provider
            .get_spot_rate(config.currency_symbol, QUOTE_CURRENCY)
            .await
            .map_err(Error::MetalPricing)?;

        let value = match spot.rate {
            Some(rate) => rate
                .checked_mul(weight_in_ounces)
                .and_then(|v| v.checked_mul(config.purity_fraction))
                .ok_or(ValidationError::ValueOutOfRange("metal value"))?,
            None => Decimal::ZERO,
        };

        Ok(Some(MetalValuation {
            value,
            breakdown: MetalBreakdown {
                metal_type: config.label.to_string(),
                currency_symbol: config.currency_symbol,
                purity_fraction: config.purity_fraction,
                weight_in_ounces,
                spot_rate: spot.rate,
                spot_rate_timestamp: spot.timestamp,
            },
            raw: spot.raw,
        }))
    }

    async fn evaluate(
        &self,
        request: &EstimateRequest,
        request_id: Uuid,
    ) -> Result<EstimateResponse> {
        request.validate()?;

        let unit = request.metal_unit().unwrap_or(DEFAULT_METAL_UNIT);
        let (gem, metal) = futures::join!(
            self.value_gem(request.gem_query()),
            self.value_metal(Self::metal_lookup(request), unit)
        );
        let gem = gem?;
        let metal = metal?;

        let gemstone_value = gem.as_ref().map_or(Decimal::ZERO, |g| g.value.value);
        let metal_value = metal.as_ref().map_or(Decimal::ZERO, |m| m.value);
        let total_value = apply_markup(gemstone_value, metal_value, request.is_retail())
            .ok_or(ValidationError::ValueOutOfRange("total value"))?;

        let (range, gem_raw) = match gem {
            Some(g) => (g.value.range, Some(g.raw)),
            None => (None, None),
        };
        let (breakdown, metal_raw) = match metal {
            Some(m) => (Some(m.breakdown), Some(m.raw)),
            None => (None, None),
        };

        Ok(EstimateResponse {
            ok: true,
            request_id,
            gemstone_value,
            metal_value,
            total_value,
            range,
            metal: breakdown,
            raw: RawPayloads {
                gem: gem_raw,
                metal: metal_raw,
            },
            input: request.clone(),
        })
    }

    fn failure(err: &Error, request_id: Uuid) -> (EstimateFailure, LoggedError) {
        let code = err.code();
        let message = human_message(code.as_deref(), err.upstream_message());
        let response = ErrorResponse {
            ok: false,
            error: message.clone(),
            code: code.clone(),
            request_id: Some(request_id),
        };
        let logged = LoggedError {
            message,
            code,
            detail: err.to_string(),
        };
        (
            EstimateFailure {
                response,
                class: err.failure_class(),
            },
            logged,
        )
    }

    async fn record(&self, entry: LogEntry) {
        if let Err(e) = self.request_log.append(&entry).await {
            warn!("Failed to append request log entry {}: {}", entry.id, e);
        }
    }
}

#[async_trait]
impl EstimateServiceTrait for EstimateService {
    async fn compute_estimate(
        &self,
        request: EstimateRequest,
    ) -> std::result::Result<EstimateResponse, EstimateFailure> {
        let request_id = Uuid::new_v4();
        let request_json = serde_json::to_value(&request).unwrap_or(Value::Null);
        debug!("Computing estimate {}: {}", request_id, request_json);

        match self.evaluate(&request, request_id).await {
            Ok(response) => {
                info!(
                    "Estimate {} computed: total {}",
                    request_id, response.total_value
                );
                let response_json = serde_json::to_value(&response).unwrap_or(Value::Null);
                self.record(LogEntry::response(request_id, request_json, response_json))
                    .await;
                Ok(response)
            }
            Err(err) => {
                warn!("Estimate {} failed: {}", request_id, err);
                let (failure, logged) = Self::failure(&err, request_id);
                self.record(LogEntry::error(request_id, request_json, logged))
                    .await;
                Err(failure)
            }
        }
    }

    async fn reject_request(&self, raw_body: Value, reason: String) -> EstimateFailure {
        let request_id = Uuid::new_v4();
        let err = Error::from(ValidationError::InvalidBody(reason));
        warn!("Estimate {} rejected: {}", request_id, err);
        let (failure, logged) = Self::failure(&err, request_id);
        self.record(LogEntry::error(request_id, raw_body, logged))
            .await;
        failure
    }
}
