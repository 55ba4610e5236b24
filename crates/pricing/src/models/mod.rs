//! Pricing models
//!
//! - `gem` - Gem identity queries and the price structures the gem guide returns
//! - `metal` - Supported metal symbols and spot rates

mod gem;
mod metal;

pub use gem::{GemPriceQuote, GemPriceResult, GemQuery, PriceCell, COLORED_GEM_GRADE_KEY};
pub use metal::{MetalSymbol, SpotRate};

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Read a price out of a JSON value.
///
/// Accepts JSON numbers and numeric strings. Strings may carry a leading `$`
/// and thousands separators (`"$4,500"`). Anything else yields `None`.
pub fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches('$')
                .chars()
                .filter(|c| *c != ',')
                .collect();
            parse_decimal(&cleaned)
        }
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
