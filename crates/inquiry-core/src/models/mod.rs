//! Data models for the contact pipeline
//!
//! Wire types for the contact endpoint, the stored submission record, and
//! the bookkeeping records written next to it.

mod analytics;
mod contact;
mod error_log;
mod submission;

pub use analytics::*;
pub use contact::*;
pub use error_log::*;
pub use submission::*;
