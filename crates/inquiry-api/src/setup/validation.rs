//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use inquiry_core::{Config, StoreBackend};

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.store_backend == StoreBackend::Memory {
        tracing::warn!(
            "STORE_BACKEND=memory in production - submissions will be lost on restart"
        );
    }

    if config.trusted_proxy_count > 10 {
        tracing::warn!(
            trusted_proxy_count = config.trusted_proxy_count,
            "TRUSTED_PROXY_COUNT is very high - ensure this matches your actual proxy setup"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_store_settings_fail() {
        let config = Config {
            store_backend: StoreBackend::Upstash,
            kv_rest_api_url: Some("https://kv.example.com".to_string()),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());

        let config = Config {
            max_body_bytes: 0,
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
