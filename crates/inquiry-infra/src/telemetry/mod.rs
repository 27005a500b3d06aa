//! Tracing initialization
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` (overridable with
//! `RUST_LOG`) and a human-readable or JSON `fmt` layer.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry, DEFAULT_FILTER};
