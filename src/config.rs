use std::env;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

// Default configuration constants
pub const DEFAULT_API_BASE_URL: &str = "https://api-ce.kroger.com/v1";
pub const DEFAULT_LOCATION_ID: &str = "09700491";
pub const DEFAULT_FULFILLMENT: &str = "csp";
pub const DEFAULT_CHAIN: &str = "HART";
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
pub const MAX_SEARCH_LIMIT: u32 = 50;
pub const DEFAULT_TOKEN_SCOPE: &str = "product.compact";
pub const DEFAULT_PREFERRED_BRAND: &str = "harris teeter";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const CLIENT_ID_VAR: &str = "KROGER_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "KROGER_CLIENT_SECRET";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("Invalid value for {name}: '{value}' ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Everything the token provider and the search client need for one run.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub token_scope: Option<String>,
    pub location_id: String,
    pub search_limit: u32,
    pub fulfillment: Option<String>,
    pub chain: Option<String>,
    pub preferred_brand: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_api_base_url(),
            client_id: require(CLIENT_ID_VAR)?,
            client_secret: require(CLIENT_SECRET_VAR)?,
            token_scope: get_token_scope(),
            location_id: get_location_id(),
            search_limit: get_search_limit()?,
            fulfillment: get_fulfillment(),
            chain: get_chain(),
            preferred_brand: get_preferred_brand(),
            timeout: get_timeout()?,
        })
    }

    pub fn token_url(&self) -> String {
        format!("{}/connect/oauth2/token", self.base_url)
    }

    pub fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    /// Override the configured result limit, e.g. from `--limit`.
    pub fn with_search_limit(mut self, limit: u32) -> Result<Self, ConfigError> {
        self.search_limit = validate_limit("--limit", &limit.to_string())?;
        Ok(self)
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("KROGER_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_location_id() -> String {
    env::var("KROGER_LOCATION_ID")
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOCATION_ID.to_string())
}

pub fn get_fulfillment() -> Option<String> {
    optional_with_default("KROGER_FULFILLMENT", DEFAULT_FULFILLMENT)
}

pub fn get_chain() -> Option<String> {
    optional_with_default("KROGER_CHAIN", DEFAULT_CHAIN)
}

pub fn get_token_scope() -> Option<String> {
    optional_with_default("KROGER_TOKEN_SCOPE", DEFAULT_TOKEN_SCOPE)
}

pub fn get_preferred_brand() -> String {
    env::var("KROGER_PREFERRED_BRAND").unwrap_or_else(|_| DEFAULT_PREFERRED_BRAND.to_string())
}

pub fn get_search_limit() -> Result<u32, ConfigError> {
    match env::var("KROGER_SEARCH_LIMIT") {
        Ok(raw) => validate_limit("KROGER_SEARCH_LIMIT", &raw),
        Err(_) => Ok(DEFAULT_SEARCH_LIMIT),
    }
}

pub fn get_timeout() -> Result<Duration, ConfigError> {
    let Ok(raw) = env::var("KROGER_TIMEOUT_SECS") else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid {
            name: "KROGER_TIMEOUT_SECS",
            value: raw,
            reason: "expected a positive number of seconds",
        }),
    }
}

/// Unset falls back to `default`; set-but-empty turns the parameter off.
fn optional_with_default(name: &str, default: &str) -> Option<String> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn validate_limit(name: &'static str, raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if (1..=MAX_SEARCH_LIMIT).contains(&n) => Ok(n),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: "expected a number between 1 and 50",
        }),
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
