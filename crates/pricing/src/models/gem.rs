use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::decimal_from_json;

/// Key under which the gem guide reports colored-gem prices.
pub const COLORED_GEM_GRADE_KEY: &str = "5";

/// Marker the gem guide puts in the high-price cell when there is no ceiling.
const NO_CEILING_MARKER: &str = "-";

/// Gem identity sent to the gem guide.
///
/// Diamonds are priced by shape, color, clarity and weight; every other gem
/// only by its name and weight. Fields stay optional so that a missing value
/// reaches the upstream, which answers with a specific error code.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GemQuery {
    #[serde(rename_all = "camelCase")]
    Diamond {
        cut: Option<String>,
        color: Option<String>,
        clarity: Option<String>,
        carat: Option<Decimal>,
    },
    #[serde(rename_all = "camelCase")]
    Colored {
        gem_type: String,
        carat: Option<Decimal>,
    },
}

impl GemQuery {
    /// Whether a gem type names a diamond (case-insensitive).
    pub fn is_diamond(gem_type: &str) -> bool {
        gem_type.trim().eq_ignore_ascii_case("diamond")
    }
}

/// One cell of a diamond price table.
#[derive(Clone, Debug, PartialEq)]
pub enum PriceCell {
    Price(Decimal),
    /// The `"-"` marker: the guide lists no upper price.
    NoCeiling,
    Empty,
}

impl PriceCell {
    pub fn from_json(value: &Value) -> Self {
        if let Value::String(s) = value {
            if s.trim() == NO_CEILING_MARKER {
                return Self::NoCeiling;
            }
        }
        match decimal_from_json(value) {
            Some(price) => Self::Price(price),
            None => Self::Empty,
        }
    }

    pub fn price(&self) -> Option<Decimal> {
        match self {
            Self::Price(p) => Some(*p),
            _ => None,
        }
    }
}

/// Parsed gem guide answer.
#[derive(Clone, Debug, PartialEq)]
pub enum GemPriceResult {
    /// Rows of `[high, mid, low]` cells. Null rows become empty vectors.
    DiamondTable(Vec<Vec<PriceCell>>),
    /// Zero, one or two prices (a single price or a `[low, high]` band).
    ColoredPrices(Vec<Decimal>),
}

impl GemPriceResult {
    /// Interpret a diamond price table payload.
    ///
    /// Returns `None` when the payload is not an array.
    pub fn diamond_from_json(raw: &Value) -> Option<Self> {
        let rows = raw.as_array()?;
        let table = rows
            .iter()
            .map(|row| match row.as_array() {
                Some(cells) => cells.iter().map(PriceCell::from_json).collect(),
                None => Vec::new(),
            })
            .collect();
        Some(Self::DiamondTable(table))
    }

    /// Interpret a colored-gem payload.
    ///
    /// Prices are read from the array under [`COLORED_GEM_GRADE_KEY`]; a missing
    /// key yields no prices. Returns `None` when the payload is not an object.
    pub fn colored_from_json(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;
        let prices = object
            .get(COLORED_GEM_GRADE_KEY)
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(decimal_from_json).collect())
            .unwrap_or_default();
        Some(Self::ColoredPrices(prices))
    }
}

/// Gem guide answer plus the raw payload it was parsed from.
#[derive(Clone, Debug)]
pub struct GemPriceQuote {
    pub result: GemPriceResult,
    pub raw: Value,
}
