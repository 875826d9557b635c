//! Gateway configuration, read from the environment at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `SHELFGATE_BIND_ADDR` | `0.0.0.0:4000` |
//! | `SHELFGATE_CATALOG_URL` | `https://world.openfoodfacts.org` |
//! | `SHELFGATE_INVENTORY_URL` | `http://localhost:8080` |
//! | `SHELFGATE_UPSTREAM_TIMEOUT_MS` | `10000` |
//! | `SHELFGATE_DECREMENT_POLICY` | `mirror_increment` |
//! | `SHELFGATE_GRAPHIQL` | `true` |
//! | `SHELFGATE_LOG_FORMAT` | `json` |

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use shelfgate_observability::LogFormat;
use shelfgate_products::DecrementPolicy;

pub const ENV_BIND_ADDR: &str = "SHELFGATE_BIND_ADDR";
pub const ENV_CATALOG_URL: &str = "SHELFGATE_CATALOG_URL";
pub const ENV_INVENTORY_URL: &str = "SHELFGATE_INVENTORY_URL";
pub const ENV_UPSTREAM_TIMEOUT_MS: &str = "SHELFGATE_UPSTREAM_TIMEOUT_MS";
pub const ENV_DECREMENT_POLICY: &str = "SHELFGATE_DECREMENT_POLICY";
pub const ENV_GRAPHIQL: &str = "SHELFGATE_GRAPHIQL";
pub const ENV_LOG_FORMAT: &str = "SHELFGATE_LOG_FORMAT";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
pub const DEFAULT_CATALOG_URL: &str = "https://world.openfoodfacts.org";
pub const DEFAULT_INVENTORY_URL: &str = "http://localhost:8080";
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

/// Everything the gateway needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    /// Catalog base URL, without trailing slash.
    pub catalog_url: String,
    /// Inventory base URL, without trailing slash.
    pub inventory_url: String,
    pub upstream_timeout: Duration,
    pub decrement_policy: DecrementPolicy,
    /// Serve the GraphiQL explorer on `GET /graphql`.
    pub graphiql: bool,
    pub log_format: LogFormat,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 4000)),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            inventory_url: DEFAULT_INVENTORY_URL.to_string(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            decrement_policy: DecrementPolicy::default(),
            graphiql: true,
            log_format: LogFormat::default(),
        }
    }
}

impl GatewayConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; unset or blank keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_BIND_ADDR) {
            config.bind_addr = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(ENV_BIND_ADDR, format!("{raw:?}: {e}")))?;
        }

        if let Some(raw) = get(ENV_CATALOG_URL) {
            config.catalog_url = parse_base_url(ENV_CATALOG_URL, &raw)?;
        }

        if let Some(raw) = get(ENV_INVENTORY_URL) {
            config.inventory_url = parse_base_url(ENV_INVENTORY_URL, &raw)?;
        }

        if let Some(raw) = get(ENV_UPSTREAM_TIMEOUT_MS) {
            let ms: u64 = raw.trim().parse().map_err(|e| {
                ConfigError::invalid(ENV_UPSTREAM_TIMEOUT_MS, format!("{raw:?}: {e}"))
            })?;
            if ms == 0 {
                return Err(ConfigError::invalid(ENV_UPSTREAM_TIMEOUT_MS, "must be greater than zero"));
            }
            config.upstream_timeout = Duration::from_millis(ms);
        }

        if let Some(raw) = get(ENV_DECREMENT_POLICY) {
            config.decrement_policy = raw
                .parse()
                .map_err(|e: String| ConfigError::invalid(ENV_DECREMENT_POLICY, e))?;
        }

        if let Some(raw) = get(ENV_GRAPHIQL) {
            config.graphiql = parse_bool(ENV_GRAPHIQL, &raw)?;
        }

        if let Some(raw) = get(ENV_LOG_FORMAT) {
            config.log_format = raw
                .parse()
                .map_err(|e: String| ConfigError::invalid(ENV_LOG_FORMAT, e))?;
        }

        Ok(config)
    }
}

fn parse_base_url(key: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::invalid(key, format!("{raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::invalid(key, format!("unsupported scheme {other:?}"))),
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, format!("{raw:?} is not a boolean"))),
    }
}
