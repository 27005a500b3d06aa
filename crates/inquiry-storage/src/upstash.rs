use crate::traits::{KvStore, StoreError, StoreResult};
use crate::StoreBackend;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Upstash / Vercel KV store reached through its REST API
///
/// Every operation is one `POST {base_url}` whose body is the Redis command
/// as a JSON array, authenticated with a bearer token.
#[derive(Clone, Debug)]
pub struct UpstashStore {
    client: Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

/// Upstash replies with `{"result": ...}` on success and `{"error": "..."}` otherwise
#[derive(Debug, Deserialize)]
struct RestReply<T> {
    result: Option<T>,
    error: Option<String>,
}

impl UpstashStore {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| StoreError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            timeout,
        })
    }

    async fn command<T: DeserializeOwned>(&self, args: &[&str]) -> StoreResult<Option<T>> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let reply: RestReply<T> = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        if let Some(error) = reply.error {
            if error.starts_with("WRONGTYPE") {
                return Err(StoreError::WrongType(error));
            }
            return Err(StoreError::Command(error));
        }

        if !status.is_success() {
            return Err(StoreError::Command(format!(
                "{} failed with status {}",
                args.first().copied().unwrap_or("command"),
                status
            )));
        }

        Ok(reply.result)
    }

    fn transport_error(&self, err: reqwest::Error) -> StoreError {
        if err.is_timeout() {
            StoreError::Timeout(self.timeout)
        } else if err.is_connect() {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Command(err.to_string())
        }
    }
}

#[async_trait]
impl KvStore for UpstashStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.command::<String>(&["GET", key]).await
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> StoreResult<()> {
        match ttl {
            Some(ttl) => {
                let secs = ttl.as_secs().max(1).to_string();
                self.command::<String>(&["SET", key, &value, "EX", &secs])
                    .await?;
            }
            None => {
                self.command::<String>(&["SET", key, &value]).await?;
            }
        }
        Ok(())
    }

    async fn lpush(&self, key: &str, value: &str) -> StoreResult<u64> {
        Ok(self
            .command::<u64>(&["LPUSH", key, value])
            .await?
            .unwrap_or(0))
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>> {
        let (start, stop) = (start.to_string(), stop.to_string());
        Ok(self
            .command::<Vec<String>>(&["LRANGE", key, &start, &stop])
            .await?
            .unwrap_or_default())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.command::<String>(&["PING"]).await.map(|_| ())
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Upstash
    }
}
