use crate::traits::{KvStore, StoreError, StoreResult};
use crate::StoreBackend;
use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, RedisError};
use std::time::Duration;

/// Redis store backed by a multiplexed, auto-reconnecting connection
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    timeout: Duration,
}

impl RedisStore {
    /// Connect to `redis_url`
    ///
    /// `timeout` bounds both connecting and every individual command.
    pub async fn connect(redis_url: &str, timeout: Duration) -> StoreResult<Self> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(timeout)
            .set_response_timeout(timeout);

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Config(format!("Invalid REDIS_URL: {}", e)))?;

        let connection = client
            .get_connection_manager_with_config(config)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!("Connected to Redis store");

        Ok(RedisStore {
            connection,
            timeout,
        })
    }

    fn command_error(&self, err: RedisError) -> StoreError {
        if err.is_timeout() {
            return StoreError::Timeout(self.timeout);
        }
        command_error(err)
    }
}

fn command_error(err: RedisError) -> StoreError {
    if err.is_connection_dropped() || err.is_connection_refusal() || err.is_io_error() {
        StoreError::Connection(err.to_string())
    } else if err.kind() == redis::ErrorKind::TypeError {
        StoreError::WrongType(err.to_string())
    } else {
        StoreError::Command(err.to_string())
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection.clone();
        conn.get::<_, Option<String>>(key).await.map_err(|e| self.command_error(e))
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> StoreResult<()> {
        let mut conn = self.connection.clone();
        match ttl {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
                .await
                .map_err(|e| self.command_error(e)),
            None => conn
                .set::<_, _, ()>(key, value)
                .await
                .map_err(|e| self.command_error(e)),
        }
    }

    async fn lpush(&self, key: &str, value: &str) -> StoreResult<u64> {
        let mut conn = self.connection.clone();
        conn.lpush::<_, _, u64>(key, value)
            .await
            .map_err(|e| self.command_error(e))
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>> {
        let mut conn = self.connection.clone();
        conn.lrange::<_, Vec<String>>(key, start, stop)
            .await
            .map_err(|e| self.command_error(e))
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.connection.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| self.command_error(e))
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Redis
    }
}
