use anyhow::{Context, Result};
use async_trait::async_trait;
use inquiry_core::models::{ContactFailure, ContactPayload, ContactReply};
use reqwest::Client;
use std::time::Duration;

/// Path of the contact endpoint on the API server
pub const CONTACT_PATH: &str = "/api/contact";

/// Sends a contact payload and returns the server's reply
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &ContactPayload) -> Result<ContactReply>;
}

/// HTTP transport for `POST /api/contact`
#[derive(Clone, Debug)]
pub struct ContactClient {
    client: Client,
    base_url: String,
}

impl ContactClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: INQUIRY_API_URL, default `http://localhost:3000`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("INQUIRY_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ContactClient {
    /// Error replies (400/405/500) carry a JSON body too; they are returned as
    /// `Ok(ContactReply::Failure)`. Only transport problems and bodies that
    /// are not a contact reply are errors.
    async fn send(&self, payload: &ContactPayload) -> Result<ContactReply> {
        let url = format!("{}{}", self.base_url, CONTACT_PATH);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        let reply: ContactReply = serde_json::from_str(&text).with_context(|| {
            format!("Unexpected response from server (status {}): {}", status, text)
        })?;

        // Success needs both a 2xx status and `success: true`
        match reply {
            ContactReply::Success(_) if !status.is_success() => {
                tracing::warn!(status = %status, "Success body on an error status");
                Ok(ContactReply::Failure(ContactFailure::new(format!(
                    "Server responded with status {}",
                    status
                ))))
            }
            reply => Ok(reply),
        }
    }
}
