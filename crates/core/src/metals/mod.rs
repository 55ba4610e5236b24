//! Metals module - alloy lookup table and weight conversion.

mod metal_config;
mod units;

pub use metal_config::{all_metal_configs, metal_config, MetalConfig};
pub use units::{to_troy_ounces, WeightUnit, DWT_PER_TROY_OUNCE, GRAMS_PER_TROY_OUNCE};
