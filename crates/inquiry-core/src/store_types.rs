use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Key-value store backend types
///
/// Defined in core because configuration selects it and both the server and
/// the CLI build their store from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local store; contents are lost on restart
    Memory,
    Redis,
    /// Upstash / Vercel KV REST API
    Upstash,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            "upstash" | "vercel-kv" | "kv" => Ok(StoreBackend::Upstash),
            _ => Err(anyhow::anyhow!("Invalid store backend: {}", s)),
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Upstash => write!(f, "upstash"),
        }
    }
}
