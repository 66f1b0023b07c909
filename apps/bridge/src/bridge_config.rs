use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use eventspout_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Bridge process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub webhook_base_url: Option<String>,
    pub webhook_api_key: String,
    pub allowed_events: Option<String>,
    pub directory_base_url: Option<String>,
    pub directory_api_key: String,
    pub include_groups: bool,
    pub include_attributes: bool,
    pub bridge_host: String,
    pub bridge_port: u16,
    pub http_timeout_secs: u64,
}

impl BridgeConfig {
    /// Loads and validates configuration from the process environment.
    pub fn load() -> AppResult<Self> {
        let webhook_base_url = optional_env("WEBHOOK_BASE_URL");
        if let Some(webhook_base_url) = &webhook_base_url {
            validate_url("WEBHOOK_BASE_URL", webhook_base_url)?;
        }
        let webhook_api_key = env::var("WEBHOOK_API_KEY").unwrap_or_default();
        let allowed_events = optional_env("WEBHOOK_ALLOWED_EVENTS");

        let directory_base_url = optional_env("USER_DIRECTORY_BASE_URL");
        if let Some(directory_base_url) = &directory_base_url {
            validate_url("USER_DIRECTORY_BASE_URL", directory_base_url)?;
        }
        let directory_api_key = env::var("USER_DIRECTORY_API_KEY").unwrap_or_default();

        let include_groups = parse_env_bool("ENRICH_USER_GROUPS", true)?;
        let include_attributes = parse_env_bool("ENRICH_USER_ATTRIBUTES", true)?;

        let bridge_host = env::var("BRIDGE_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let bridge_port = parse_env_u16("BRIDGE_PORT", 3002)?;
        let http_timeout_secs = parse_env_u64("HTTP_TIMEOUT_SECS", 15)?;

        if http_timeout_secs == 0 {
            return Err(AppError::Validation(
                "HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            webhook_base_url,
            webhook_api_key,
            allowed_events,
            directory_base_url,
            directory_api_key,
            include_groups,
            include_attributes,
            bridge_host,
            bridge_port,
            http_timeout_secs,
        })
    }

    /// Returns the ingress bind address.
    pub fn socket_address(&self) -> AppResult<SocketAddr> {
        let host = IpAddr::from_str(&self.bridge_host).map_err(|error| {
            AppError::Internal(format!(
                "invalid BRIDGE_HOST '{}': {error}",
                self.bridge_host
            ))
        })?;
        Ok(SocketAddr::from((host, self.bridge_port)))
    }
}

/// Initializes the tracing subscriber from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn validate_url(name: &str, value: &str) -> AppResult<()> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}")))
}

fn parse_env_bool(name: &str, default: bool) -> AppResult<bool> {
    match env::var(name) {
        Ok(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(AppError::Validation(format!(
                "invalid {name} value '{other}': expected true or false"
            ))),
        },
        Err(_) => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> AppResult<u16> {
    match env::var(name) {
        Ok(value) => value.parse::<u16>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
