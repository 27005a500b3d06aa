//! Test helpers: build the real router over a test store.
//!
//! Run from workspace root: `cargo test -p inquiry-api`.

#![allow(dead_code)]

pub mod stores;

use axum_test::TestServer;
use inquiry_api::setup::routes;
use inquiry_api::state::AppState;
use inquiry_core::Config;
use inquiry_storage::{KvStore, MemoryStore, SubmissionGateway};
use std::sync::Arc;

pub use stores::{FailOn, FailingStore};

pub const CONTACT_PATH: &str = "/api/contact";

/// Test application: server plus the store it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<dyn KvStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Read-side access to whatever the server stored
    pub fn gateway(&self) -> SubmissionGateway {
        SubmissionGateway::new(self.store.clone())
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(Config::default(), Arc::new(MemoryStore::new()))
}

pub fn setup_failing_app(fail_on: FailOn) -> TestApp {
    setup_test_app_with(Config::default(), Arc::new(FailingStore::new(fail_on)))
}

pub fn setup_test_app_with(config: Config, store: Arc<dyn KvStore>) -> TestApp {
    let state = Arc::new(AppState::new(config, store.clone()));
    let app = routes::setup_routes(state).expect("router");
    let server = TestServer::new(app).expect("test server");
    TestApp { server, store }
}
