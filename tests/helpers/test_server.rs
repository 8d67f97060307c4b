// Test Server Helpers
//
// Builds the production wiring (`AppState::configure`) on top of the
// in-memory repositories. Contract tests talk to it over real HTTP with
// actix-test; service tests use the services directly.

use actix_web::App;

pub use actix_test::TestServer;

use thaibill::config::BillingConfig;
use thaibill::core::{AccessPolicy, Identity, Owner};
use thaibill::middleware::RequestId;
use thaibill::AppState;

use super::in_memory::{InMemoryStore, StaticKeys};

pub const KEY_A: &str = "test-key-a";
pub const KEY_B: &str = "test-key-b";
pub const OWNER_A: &str = "user-a";
pub const OWNER_B: &str = "user-b";

/// Application state and the tables behind it
pub struct TestContext {
    pub state: AppState,
    pub store: InMemoryStore,
}

pub fn test_context() -> TestContext {
    test_context_with(BillingConfig::default())
}

pub fn test_context_with(billing: BillingConfig) -> TestContext {
    let store = InMemoryStore::default();
    let keys = StaticKeys::new(&[(KEY_A, OWNER_A), (KEY_B, OWNER_B)]);
    let state = AppState::new(store.repositories(keys), &billing);
    TestContext { state, store }
}

pub fn owner(id: &str) -> Owner {
    Owner::Tenant(Identity::new(id).unwrap())
}

pub fn owner_a() -> Owner {
    owner(OWNER_A)
}

pub fn owner_b() -> Owner {
    owner(OWNER_B)
}

/// Spawn a real HTTP test server over in-memory storage
///
/// Identity is mandatory; `KEY_A` and `KEY_B` resolve to two owners.
pub fn spawn_test_server() -> (TestServer, InMemoryStore) {
    spawn_test_server_with(AccessPolicy::Mandatory)
}

pub fn spawn_test_server_with(access_policy: AccessPolicy) -> (TestServer, InMemoryStore) {
    let context = test_context_with(BillingConfig {
        access_policy,
        ..BillingConfig::default()
    });
    let state = context.state;

    let srv = actix_test::start(move || {
        let state = state.clone();
        App::new()
            .configure(move |cfg| state.configure(cfg))
            .wrap(RequestId)
    });

    (srv, context.store)
}
