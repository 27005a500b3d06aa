//! Configuration module
//!
//! Server and CLI configuration read from the environment (and an optional
//! `.env` file). Values that fail to parse fall back to their defaults;
//! missing settings a backend requires are reported by [`Config::validate`].

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::store_types::StoreBackend;

const SERVER_PORT: u16 = 3000;
const STORE_TIMEOUT_MS: u64 = 5000;
const TRUSTED_PROXY_COUNT: usize = 1;
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Default `source` tag stamped on stored submissions
pub const DEFAULT_SUBMISSION_SOURCE: &str = "website_contact_form";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub store_backend: StoreBackend,
    pub redis_url: Option<String>,
    pub kv_rest_api_url: Option<String>,
    pub kv_rest_api_token: Option<String>,
    pub store_timeout_ms: u64,
    pub trusted_proxy_count: usize,
    pub max_body_bytes: usize,
    pub submission_source: String,
    pub static_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            store_backend: StoreBackend::Memory,
            redis_url: None,
            kv_rest_api_url: None,
            kv_rest_api_token: None,
            store_timeout_ms: STORE_TIMEOUT_MS,
            trusted_proxy_count: TRUSTED_PROXY_COUNT,
            max_body_bytes: MAX_BODY_BYTES,
            submission_source: DEFAULT_SUBMISSION_SOURCE.to_string(),
            static_dir: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = non_empty("ENVIRONMENT")
            .or_else(|| non_empty("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match non_empty("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let store_backend = match non_empty("STORE_BACKEND") {
            Some(value) => value.parse::<StoreBackend>()?,
            None => StoreBackend::Memory,
        };

        Ok(Config {
            server_port,
            environment,
            store_backend,
            redis_url: non_empty("REDIS_URL"),
            kv_rest_api_url: non_empty("KV_REST_API_URL"),
            kv_rest_api_token: non_empty("KV_REST_API_TOKEN"),
            store_timeout_ms: non_empty("STORE_TIMEOUT_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(STORE_TIMEOUT_MS),
            trusted_proxy_count: non_empty("TRUSTED_PROXY_COUNT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(TRUSTED_PROXY_COUNT),
            max_body_bytes: non_empty("MAX_BODY_BYTES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(MAX_BODY_BYTES),
            submission_source: non_empty("SUBMISSION_SOURCE")
                .unwrap_or_else(|| DEFAULT_SUBMISSION_SOURCE.to_string()),
            static_dir: non_empty("STATIC_DIR").map(PathBuf::from),
            log_format: non_empty("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.store_timeout_ms == 0 {
            return Err(anyhow::anyhow!("STORE_TIMEOUT_MS must be greater than 0"));
        }

        if self.max_body_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_BODY_BYTES must be greater than 0"));
        }

        match self.store_backend {
            StoreBackend::Memory => {}
            StoreBackend::Redis => {
                let url = self.redis_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("REDIS_URL must be set when using the redis store backend")
                })?;
                if !(url.starts_with("redis://") || url.starts_with("rediss://")) {
                    return Err(anyhow::anyhow!(
                        "REDIS_URL must start with redis:// or rediss://"
                    ));
                }
            }
            StoreBackend::Upstash => {
                let url = self.kv_rest_api_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!(
                        "KV_REST_API_URL must be set when using the upstash store backend"
                    )
                })?;
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(anyhow::anyhow!("KV_REST_API_URL must be an http(s) URL"));
                }
                if self.kv_rest_api_token.is_none() {
                    return Err(anyhow::anyhow!(
                        "KV_REST_API_TOKEN must be set when using the upstash store backend"
                    ));
                }
            }
        }

        if let Some(dir) = &self.static_dir {
            if !dir.is_dir() {
                return Err(anyhow::anyhow!(
                    "STATIC_DIR does not point to a directory: {}",
                    dir.display()
                ));
            }
        }

        Ok(())
    }
}
