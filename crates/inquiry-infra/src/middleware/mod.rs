//! Shared HTTP middleware for Inquiry services

pub mod cors;
pub mod request_id;
pub mod security_headers;

pub use cors::cors_headers_middleware;
pub use request_id::{get_request_id, request_id_middleware, RequestId};
pub use security_headers::security_headers_middleware;
