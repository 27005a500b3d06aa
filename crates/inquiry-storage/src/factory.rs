use crate::memory::MemoryStore;
#[cfg(feature = "store-redis")]
use crate::RedisStore;
#[cfg(feature = "store-upstash")]
use crate::UpstashStore;
use crate::{KvStore, StoreBackend, StoreError, StoreResult};
use inquiry_core::Config;
use std::sync::Arc;

/// Create a store backend based on configuration
pub async fn create_store(config: &Config) -> StoreResult<Arc<dyn KvStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; submissions are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }

        #[cfg(feature = "store-redis")]
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| StoreError::Config("REDIS_URL not configured".to_string()))?;

            let store = RedisStore::connect(url, config.store_timeout()).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-redis"))]
        StoreBackend::Redis => Err(StoreError::Config(
            "Redis store backend not available (store-redis feature not enabled)".to_string(),
        )),

        #[cfg(feature = "store-upstash")]
        StoreBackend::Upstash => {
            let url = config
                .kv_rest_api_url
                .as_deref()
                .ok_or_else(|| StoreError::Config("KV_REST_API_URL not configured".to_string()))?;
            let token = config.kv_rest_api_token.as_deref().ok_or_else(|| {
                StoreError::Config("KV_REST_API_TOKEN not configured".to_string())
            })?;

            let store = UpstashStore::new(url, token, config.store_timeout())?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-upstash"))]
        StoreBackend::Upstash => Err(StoreError::Config(
            "Upstash store backend not available (store-upstash feature not enabled)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_config_builds_memory_store() {
        let store = create_store(&Config::default()).await.unwrap();
        assert_eq!(store.backend_type(), StoreBackend::Memory);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_redis_url_is_config_error() {
        let config = Config {
            store_backend: StoreBackend::Redis,
            ..Config::default()
        };
        assert!(matches!(
            create_store(&config).await,
            Err(StoreError::Config(_))
        ));
    }
}
