use std::{
    collections::BTreeMap,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use anyhow::{bail, Context};
use gemassure_pricing::provider::metal_price_api::DEFAULT_BASE_URL as DEFAULT_METALPRICE_BASE_URL;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_PATH: &str = "./logs/estimates.jsonl";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Every option the server reads, reported by the debug route.
pub const RECOGNISED_OPTIONS: &[&str] = &[
    "PORT",
    "HOST",
    "APP_ENV",
    "GEMGUIDE_BASE_URL",
    "GEMGUIDE_API_KEY",
    "GEMGUIDE_USERNAME",
    "METALPRICE_BASE_URL",
    "METALPRICE_API_KEY",
    "ESTIMATE_LOG_PATH",
    "UPSTREAM_TIMEOUT_MS",
    "REQUEST_TIMEOUT_MS",
    "CORS_ALLOW_ORIGINS",
    "LEGACY_ERROR_STATUS",
    "ENABLE_DEBUG_ROUTES",
    "STATIC_DIR",
    "LOG_FORMAT",
    "RUST_LOG",
];

pub struct Config {
    pub listen_addr: SocketAddr,
    pub app_env: String,
    pub gemguide_base_url: Option<String>,
    pub gemguide_username: Option<String>,
    pub gemguide_api_key: Option<String>,
    pub metalprice_base_url: String,
    pub metalprice_api_key: Option<String>,
    pub estimate_log_path: PathBuf,
    pub upstream_timeout: Duration,
    pub request_timeout: Duration,
    pub cors_allow: Vec<String>,
    pub legacy_error_status: bool,
    pub enable_debug_routes: bool,
    pub static_dir: Option<PathBuf>,
    /// Which recognised options were set, without their values.
    pub options_set: BTreeMap<&'static str, bool>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let app_env = var("APP_ENV").unwrap_or_else(|| "development".into());
        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT '{}'", raw))?,
            None if app_env.eq_ignore_ascii_case("production") => {
                bail!("PORT must be set when APP_ENV=production")
            }
            None => {
                tracing::warn!("PORT not set, falling back to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };
        let host: IpAddr = var("HOST")
            .unwrap_or_else(|| "0.0.0.0".into())
            .parse()
            .context("Invalid HOST")?;

        let cors_allow = var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let options_set = RECOGNISED_OPTIONS
            .iter()
            .map(|key| (*key, var(*key).is_some()))
            .collect();

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            app_env,
            gemguide_base_url: var("GEMGUIDE_BASE_URL"),
            gemguide_username: var("GEMGUIDE_USERNAME"),
            gemguide_api_key: var("GEMGUIDE_API_KEY"),
            metalprice_base_url: var("METALPRICE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_METALPRICE_BASE_URL.into()),
            metalprice_api_key: var("METALPRICE_API_KEY"),
            estimate_log_path: PathBuf::from(
                var("ESTIMATE_LOG_PATH").unwrap_or_else(|| DEFAULT_LOG_PATH.into()),
            ),
            upstream_timeout: millis(&var, "UPSTREAM_TIMEOUT_MS", DEFAULT_UPSTREAM_TIMEOUT_MS)?,
            request_timeout: millis(&var, "REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?,
            cors_allow,
            legacy_error_status: flag(&var, "LEGACY_ERROR_STATUS"),
            enable_debug_routes: flag(&var, "ENABLE_DEBUG_ROUTES"),
            static_dir: var("STATIC_DIR").map(PathBuf::from),
            options_set,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

fn millis(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> anyhow::Result<Duration> {
    let ms = match var(key) {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("Invalid {} '{}'", key, raw))?,
        None => default,
    };
    Ok(Duration::from_millis(ms))
}

fn flag(var: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    var(key).is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.metalprice_base_url, "https://api.metalpriceapi.com/v1");
        assert_eq!(
            config.estimate_log_path,
            PathBuf::from("./logs/estimates.jsonl")
        );
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.cors_allow, vec!["*".to_string()]);
        assert!(!config.legacy_error_status);
        assert!(!config.enable_debug_routes);
        assert!(config.static_dir.is_none());
        assert!(config.gemguide_api_key.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_requires_port() {
        let err = config_from(&[("APP_ENV", "production")])
            .err()
            .expect("missing port must fail");
        assert!(err.to_string().contains("PORT"));

        let config = config_from(&[("APP_ENV", "production"), ("PORT", "8081")]).unwrap();
        assert_eq!(config.listen_addr.port(), 8081);
        assert!(config.is_production());
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("UPSTREAM_TIMEOUT_MS", "soon")]).is_err());
        assert!(config_from(&[("HOST", "not-an-ip")]).is_err());
    }

    #[test]
    fn test_flags_and_lists() {
        let config = config_from(&[
            ("LEGACY_ERROR_STATUS", "TRUE"),
            ("ENABLE_DEBUG_ROUTES", "1"),
            ("CORS_ALLOW_ORIGINS", "https://a.example, ,https://b.example"),
            ("REQUEST_TIMEOUT_MS", "1500"),
        ])
        .unwrap();
        assert!(config.legacy_error_status);
        assert!(config.enable_debug_routes);
        assert_eq!(
            config.cors_allow,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config_from(&[("GEMGUIDE_API_KEY", "   "), ("METALPRICE_API_KEY", "k")])
            .unwrap();
        assert!(config.gemguide_api_key.is_none());
        assert_eq!(config.metalprice_api_key.as_deref(), Some("k"));
        assert!(!config.options_set["GEMGUIDE_API_KEY"]);
        assert!(config.options_set["METALPRICE_API_KEY"]);
    }
}
