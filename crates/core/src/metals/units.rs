//! Metal weight conversion to troy ounces.
//!
//! Spot prices are quoted per troy ounce, so every weight is normalized to
//! that unit before it is multiplied by a rate.

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Grams in one troy ounce, as used by the appraisal form.
pub const GRAMS_PER_TROY_OUNCE: Decimal = dec!(28.3495);

/// Pennyweights in one troy ounce.
pub const DWT_PER_TROY_OUNCE: Decimal = dec!(20);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WeightUnit {
    Grams,
    Pennyweight,
    TroyOunces,
}

impl WeightUnit {
    /// Parse a unit label. Returns `None` for labels that are not recognised.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "grams" | "gram" | "g" | "gr" => Some(WeightUnit::Grams),
            "dwt" | "pennyweight" | "pennyweights" => Some(WeightUnit::Pennyweight),
            "oz" | "ozt" | "ounce" | "ounces" | "troy oz" | "troy ounce" | "troy ounces" => {
                Some(WeightUnit::TroyOunces)
            }
            _ => None,
        }
    }

    pub fn to_troy_ounces(self, weight: Decimal) -> Decimal {
        match self {
            WeightUnit::Grams => weight / GRAMS_PER_TROY_OUNCE,
            WeightUnit::Pennyweight => weight / DWT_PER_TROY_OUNCE,
            WeightUnit::TroyOunces => weight,
        }
    }
}

/// Convert `weight` expressed in `unit` to troy ounces.
///
/// Unrecognised units are converted as grams, with a warning.
pub fn to_troy_ounces(weight: Decimal, unit: &str) -> Decimal {
    let unit = WeightUnit::from_label(unit).unwrap_or_else(|| {
        warn!("Unrecognised metal weight unit '{}', converting as grams", unit);
        WeightUnit::Grams
    });
    unit.to_troy_ounces(weight)
}
