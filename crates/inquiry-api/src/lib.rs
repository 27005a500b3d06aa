//! Inquiry API Library
//!
//! HTTP surface of the contact-form intake service: the contact handler,
//! health probes, OpenAPI document and application setup.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod utils;

// Re-exports
pub use error::HttpAppError;
pub use services::ContactService;
pub use state::AppState;
