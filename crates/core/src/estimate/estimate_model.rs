use chrono::{DateTime, Utc};
use gemassure_pricing::{decimal_from_json, FailureClass, GemQuery, MetalSymbol};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ValidationError;

/// Fixed multiplier for retail (as opposed to wholesale) estimates.
pub const RETAIL_MARKUP: Decimal = dec!(1.4);

/// Appraisal request as submitted by the form.
///
/// Every field is optional; which ones matter depends on the branch taken.
/// Blank strings count as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimateRequest {
    pub gem_type: Option<String>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub carat: Option<Decimal>,
    pub cut: Option<String>,
    pub color: Option<String>,
    pub clarity: Option<String>,
    pub metal_type: Option<String>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub metal_weight: Option<Decimal>,
    pub metal_unit: Option<String>,
    pub is_retail: Option<bool>,
}

/// Form fields arrive as numbers or numeric strings; blank means absent.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => decimal_from_json(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected a number, got {}", value))),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl EstimateRequest {
    pub fn gem_type(&self) -> Option<&str> {
        present(&self.gem_type)
    }

    pub fn metal_type(&self) -> Option<&str> {
        present(&self.metal_type)
    }

    pub fn metal_unit(&self) -> Option<&str> {
        present(&self.metal_unit)
    }

    pub fn is_retail(&self) -> bool {
        self.is_retail.unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.carat.is_some_and(|c| c < Decimal::ZERO) {
            return Err(ValidationError::NegativeWeight("carat"));
        }
        if self.metal_weight.is_some_and(|w| w < Decimal::ZERO) {
            return Err(ValidationError::NegativeWeight("metalWeight"));
        }
        Ok(())
    }

    /// Gem guide query for this request, or `None` when no gem was given.
    pub fn gem_query(&self) -> Option<GemQuery> {
        let gem_type = self.gem_type()?;
        if GemQuery::is_diamond(gem_type) {
            Some(GemQuery::Diamond {
                cut: present(&self.cut).map(str::to_string),
                color: present(&self.color).map(str::to_string),
                clarity: present(&self.clarity).map(str::to_string),
                carat: self.carat,
            })
        } else {
            Some(GemQuery::Colored {
                gem_type: gem_type.to_string(),
                carat: self.carat,
            })
        }
    }
}

/// How the metal value was derived.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalBreakdown {
    pub metal_type: String,
    pub currency_symbol: MetalSymbol,
    pub purity_fraction: Decimal,
    pub weight_in_ounces: Decimal,
    pub spot_rate: Option<Decimal>,
    /// When the upstream quoted the rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_rate_timestamp: Option<DateTime<Utc>>,
}

/// Upstream payloads echoed back for traceability.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RawPayloads {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gem: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub ok: bool,
    pub request_id: Uuid,
    pub gemstone_value: Decimal,
    pub metal_value: Decimal,
    pub total_value: Decimal,
    /// `[low]` or `[low, high]`; absent when the guide gave a single price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<Decimal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal: Option<MetalBreakdown>,
    pub raw: RawPayloads,
    pub input: EstimateRequest,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: Option<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            code,
            request_id: None,
        }
    }
}

/// A failed estimate: the body for the caller and the class for the status.
#[derive(Clone, Debug, PartialEq)]
pub struct EstimateFailure {
    pub response: ErrorResponse,
    pub class: FailureClass,
}

/// Sum two component values, applying the retail markup when asked.
/// Returns `None` if the total does not fit in a `Decimal`.
pub fn apply_markup(
    gemstone_value: Decimal,
    metal_value: Decimal,
    retail: bool,
) -> Option<Decimal> {
    let base = gemstone_value.checked_add(metal_value)?;
    if retail {
        base.checked_mul(RETAIL_MARKUP)
    } else {
        Some(base)
    }
}
