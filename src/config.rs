/*
 * Responsibility
 * - read process configuration from the environment (PORT, OPA_*, LOG_*)
 * - validate values once at startup (fail to start when missing/invalid)
 * - everything here is immutable after startup and passed explicitly
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_OPA_URL: &str = "http://localhost:8181";
const DEFAULT_OPA_POLICY_PATH: &str = "httpapi/allow";
const DEFAULT_OPA_TIMEOUT_MS: u64 = 2_000;
const MAX_OPA_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where and how to reach the policy engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySettings {
    /// Base URL without a trailing slash, e.g. `http://localhost:8181`.
    pub base_url: String,
    /// Decision document path below `/v1/data/`, e.g. `httpapi/allow`.
    pub policy_path: String,
    pub timeout: Duration,
}

impl PolicySettings {
    pub fn new(base_url: &str, policy_path: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            policy_path: policy_path.trim_matches('/').to_string(),
            timeout,
        }
    }

    /// `{base_url}/v1/data/{policy_path}`
    pub fn decision_url(&self) -> String {
        format!("{}/v1/data/{}", self.base_url, self.policy_path)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub log_level: String,
    pub log_format: LogFormat,

    pub policy: PolicySettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup (env in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let log_level = lookup("LOG_LEVEL")
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "info".to_string());

        let log_format = match lookup("LOG_FORMAT")
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            "" | "text" | "pretty" => LogFormat::Text,
            _ => return Err(ConfigError::Invalid("LOG_FORMAT")),
        };

        let opa_url = lookup("OPA_URL").unwrap_or_else(|| DEFAULT_OPA_URL.to_string());
        let parsed = Url::parse(opa_url.trim()).map_err(|_| ConfigError::Invalid("OPA_URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid("OPA_URL"));
        }

        let policy_path =
            lookup("OPA_POLICY_PATH").unwrap_or_else(|| DEFAULT_OPA_POLICY_PATH.to_string());
        if policy_path.trim().trim_matches('/').is_empty() {
            return Err(ConfigError::Missing("OPA_POLICY_PATH"));
        }

        let timeout_ms = match lookup("OPA_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| (1..=MAX_OPA_TIMEOUT_MS).contains(ms))
                .ok_or(ConfigError::Invalid("OPA_TIMEOUT_MS"))?,
            None => DEFAULT_OPA_TIMEOUT_MS,
        };

        let policy = PolicySettings::new(
            opa_url.trim(),
            policy_path.trim(),
            Duration::from_millis(timeout_ms),
        );

        Ok(Self {
            addr,
            app_env,
            log_level,
            log_format,
            policy,
        })
    }
}
