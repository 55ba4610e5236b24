//! Estimate module - request/response models, valuation rules, and the service.

mod error_messages;
mod estimate_model;
mod estimate_service;
mod estimate_traits;
mod gem_valuation;

pub use error_messages::{human_message, UNKNOWN_ERROR_MESSAGE};
pub use estimate_model::{
    apply_markup, ErrorResponse, EstimateFailure, EstimateRequest, EstimateResponse,
    MetalBreakdown, RawPayloads, RETAIL_MARKUP,
};
pub use estimate_service::EstimateService;
pub use estimate_traits::EstimateServiceTrait;
pub use gem_valuation::{colored_value, diamond_value, gem_value, GemValue};
