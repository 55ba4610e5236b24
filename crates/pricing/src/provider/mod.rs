//! Price provider abstractions and implementations.
//!
//! This module contains:
//! - The `GemPriceProvider` and `MetalPriceProvider` traits
//! - Shared response decoding for upstream JSON APIs
//! - Concrete providers (GemGuide, Metal Price API)

mod http;
mod traits;

pub mod gem_guide;
pub mod metal_price_api;

pub use traits::{GemPriceProvider, MetalPriceProvider};
