use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::errors::PricingError;

/// Precious metals priced by the spot-price provider, keyed by their
/// ISO 4217 currency symbol.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum MetalSymbol {
    #[serde(rename = "XAU")]
    Gold,
    #[serde(rename = "XAG")]
    Silver,
    #[serde(rename = "XPT")]
    Platinum,
    #[serde(rename = "XPD")]
    Palladium,
}

impl MetalSymbol {
    pub const ALL: [MetalSymbol; 4] = [
        MetalSymbol::Gold,
        MetalSymbol::Silver,
        MetalSymbol::Platinum,
        MetalSymbol::Palladium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetalSymbol::Gold => "XAU",
            MetalSymbol::Silver => "XAG",
            MetalSymbol::Platinum => "XPT",
            MetalSymbol::Palladium => "XPD",
        }
    }
}

impl fmt::Display for MetalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetalSymbol {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XAU" => Ok(MetalSymbol::Gold),
            "XAG" => Ok(MetalSymbol::Silver),
            "XPT" => Ok(MetalSymbol::Platinum),
            "XPD" => Ok(MetalSymbol::Palladium),
            other => Err(PricingError::UnsupportedSymbol(other.to_string())),
        }
    }
}

/// Latest spot rate for one metal against a base currency.
///
/// `rate` is whatever the provider reports for the symbol. It is `None` when
/// the payload decoded but did not carry a usable rate.
#[derive(Clone, Debug)]
pub struct SpotRate {
    pub symbol: MetalSymbol,
    pub base: String,
    pub rate: Option<Decimal>,
    pub timestamp: Option<DateTime<Utc>>,
    pub raw: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip_through_str() {
        for symbol in MetalSymbol::ALL {
            assert_eq!(symbol.as_str().parse::<MetalSymbol>().unwrap(), symbol);
        }
        assert_eq!("xau".parse::<MetalSymbol>().unwrap(), MetalSymbol::Gold);
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let err = "BTC".parse::<MetalSymbol>().unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedSymbol(s) if s == "BTC"));
    }

    #[test]
    fn test_symbol_serializes_as_currency_code() {
        assert_eq!(
            serde_json::to_value(MetalSymbol::Platinum).unwrap(),
            serde_json::json!("XPT")
        );
    }
}
