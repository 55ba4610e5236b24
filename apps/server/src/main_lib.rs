use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use gemassure_core::estimate::{EstimateService, EstimateServiceTrait};
use gemassure_pricing::{
    GemGuideConfig, GemGuideProvider, GemPriceProvider, MetalPriceApiProvider, MetalPriceProvider,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, request_log::FileRequestLog};

pub struct AppState {
    pub estimate_service: Arc<dyn EstimateServiceTrait>,
    pub gem_provider: Arc<dyn GemPriceProvider>,
    pub metal_provider: Arc<dyn MetalPriceProvider>,
    /// Answer every failed estimate with 400 instead of a class-specific status.
    pub legacy_error_status: bool,
    pub options_set: BTreeMap<&'static str, bool>,
}

pub fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let request_log = FileRequestLog::open(&config.estimate_log_path)
        .await
        .with_context(|| {
            format!(
                "Failed to open estimate log at {}",
                config.estimate_log_path.display()
            )
        })?;
    tracing::info!("Estimate log in use: {}", request_log.path().display());

    let gem_provider: Arc<dyn GemPriceProvider> = Arc::new(GemGuideProvider::new(GemGuideConfig {
        base_url: config.gemguide_base_url.clone(),
        username: config.gemguide_username.clone(),
        api_key: config.gemguide_api_key.clone(),
        timeout: Some(config.upstream_timeout),
    }));
    let metal_provider: Arc<dyn MetalPriceProvider> = Arc::new(
        MetalPriceApiProvider::new(config.metalprice_api_key.clone())
            .with_base_url(config.metalprice_base_url.clone())
            .with_timeout(config.upstream_timeout),
    );

    if !gem_provider.is_configured() {
        tracing::warn!("GemGuide credentials not set; gem estimates will fail");
    }
    if !metal_provider.is_configured() {
        tracing::warn!("METALPRICE_API_KEY not set; metal estimates will fail");
    }

    let estimate_service: Arc<dyn EstimateServiceTrait> = Arc::new(EstimateService::new(
        gem_provider.clone(),
        metal_provider.clone(),
        Arc::new(request_log),
    ));

    Ok(Arc::new(AppState {
        estimate_service,
        gem_provider,
        metal_provider,
        legacy_error_status: config.legacy_error_status,
        options_set: config.options_set.clone(),
    }))
}
