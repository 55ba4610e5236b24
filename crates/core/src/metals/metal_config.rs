//! Alloy table mapping a metal label to its spot-price symbol and purity.
//!
//! The table is built once and never mutated. Lookups ignore case and
//! surrounding whitespace, so "14K gold " and "14k Gold" resolve alike.

use std::collections::HashMap;

use gemassure_pricing::MetalSymbol;
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Spot-price symbol and pure-metal fraction for one alloy label.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalConfig {
    pub label: &'static str,
    pub currency_symbol: MetalSymbol,
    /// Fraction of pure metal, in (0, 1].
    pub purity_fraction: Decimal,
}

fn entry(
    label: &'static str,
    currency_symbol: MetalSymbol,
    purity_fraction: Decimal,
) -> MetalConfig {
    MetalConfig {
        label,
        currency_symbol,
        purity_fraction,
    }
}

lazy_static! {
    static ref METAL_CONFIGS: Vec<MetalConfig> = vec![
        entry("24k Gold", MetalSymbol::Gold, dec!(0.999)),
        entry("22k Gold", MetalSymbol::Gold, dec!(0.916)),
        entry("18k Gold", MetalSymbol::Gold, dec!(0.750)),
        entry("14k Gold", MetalSymbol::Gold, dec!(0.585)),
        entry("10k Gold", MetalSymbol::Gold, dec!(0.417)),
        entry("Gold", MetalSymbol::Gold, dec!(0.999)),
        entry("Fine Silver", MetalSymbol::Silver, dec!(0.999)),
        entry("Sterling Silver", MetalSymbol::Silver, dec!(0.925)),
        entry("Silver", MetalSymbol::Silver, dec!(0.999)),
        entry("950 Platinum", MetalSymbol::Platinum, dec!(0.950)),
        entry("900 Platinum", MetalSymbol::Platinum, dec!(0.900)),
        entry("Platinum", MetalSymbol::Platinum, dec!(0.950)),
        entry("950 Palladium", MetalSymbol::Palladium, dec!(0.950)),
        entry("500 Palladium", MetalSymbol::Palladium, dec!(0.500)),
        entry("Palladium", MetalSymbol::Palladium, dec!(0.950)),
    ];
    static ref BY_LABEL: HashMap<String, &'static MetalConfig> = METAL_CONFIGS
        .iter()
        .map(|config| (config.label.to_lowercase(), config))
        .collect();
}

/// Look up an alloy by its human label.
pub fn metal_config(label: &str) -> Option<&'static MetalConfig> {
    BY_LABEL.get(&label.trim().to_lowercase()).copied()
}

/// Every known alloy, in display order.
pub fn all_metal_configs() -> &'static [MetalConfig] {
    &METAL_CONFIGS
}
