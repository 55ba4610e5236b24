use async_trait::async_trait;
use serde_json::Value;

use super::estimate_model::{EstimateFailure, EstimateRequest, EstimateResponse};

/// Trait defining the contract for estimate operations.
#[async_trait]
pub trait EstimateServiceTrait: Send + Sync {
    /// Value a request. Exactly one log entry is written whatever the outcome.
    async fn compute_estimate(
        &self,
        request: EstimateRequest,
    ) -> Result<EstimateResponse, EstimateFailure>;

    /// Record and answer a request whose body could not be read.
    async fn reject_request(&self, raw_body: Value, reason: String) -> EstimateFailure;
}
