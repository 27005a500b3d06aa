//! Application state shared by every handler.
//!
//! Immutable after startup: the configuration and the store, reached through
//! the persistence gateway.

use inquiry_core::Config;
use inquiry_storage::{KvStore, SubmissionGateway};
use std::sync::Arc;

use crate::services::ContactService;

pub struct AppState {
    pub config: Config,
    pub gateway: SubmissionGateway,
    pub contact: ContactService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn KvStore>) -> Self {
        let gateway = SubmissionGateway::new(store);
        let contact = ContactService::new(gateway.clone(), config.submission_source.clone());
        Self {
            config,
            gateway,
            contact,
        }
    }
}
