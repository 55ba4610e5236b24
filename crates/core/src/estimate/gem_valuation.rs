//! Reduction of gem guide price structures to a single value and range.

use gemassure_pricing::{GemPriceResult, PriceCell};
use rust_decimal::Decimal;

/// Row of the diamond table that holds the prices for the requested stone.
const PRICE_ROW: usize = 1;
const HIGH: usize = 0;
const MID: usize = 1;
const LOW: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct GemValue {
    pub value: Decimal,
    pub range: Option<Vec<Decimal>>,
}

/// Value a diamond from its price table.
///
/// The mid price is the value. The range is `[low, high]` with absent cells
/// dropped; a `"-"` high cell means no ceiling, so the range then holds only
/// the low bound. Returns `None` when the table has no mid price.
pub fn diamond_value(table: &[Vec<PriceCell>]) -> Option<GemValue> {
    let row = table.get(PRICE_ROW)?;
    let cell = |i: usize| row.get(i).and_then(PriceCell::price);

    let value = cell(MID)?;
    let range = [cell(LOW), cell(HIGH)].into_iter().flatten().collect();

    Some(GemValue {
        value,
        range: Some(range),
    })
}

/// Value a colored gem from its price band.
///
/// Two prices are averaged and reported as the range; one price is the value
/// with no range; no price is worth zero. Returns `None` when the band is too
/// large to average.
pub fn colored_value(prices: &[Decimal]) -> Option<GemValue> {
    match prices {
        [] => Some(GemValue {
            value: Decimal::ZERO,
            range: None,
        }),
        [single] => Some(GemValue {
            value: *single,
            range: None,
        }),
        // The guide documents at most two prices; value the outer band.
        [low, .., high] => Some(GemValue {
            value: mean(*low, *high)?,
            range: Some(vec![*low, *high]),
        }),
    }
}

fn mean(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_add(b)?.checked_div(Decimal::TWO)
}

/// Value any gem guide result. `None` means the payload carried no usable price.
///
/// Prices too large to combine also yield `None`.
pub fn gem_value(result: &GemPriceResult) -> Option<GemValue> {
    match result {
        GemPriceResult::DiamondTable(table) => diamond_value(table),
        GemPriceResult::ColoredPrices(prices) => colored_value(prices),
    }
}
