//! Inquiry Infrastructure Library
//!
//! Shared infrastructure used by the HTTP server and the CLI:
//! - Middleware (request ID, CORS headers, security headers)
//! - Telemetry initialization

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{
    cors_headers_middleware, get_request_id, request_id_middleware, security_headers_middleware,
    RequestId,
};

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry};
