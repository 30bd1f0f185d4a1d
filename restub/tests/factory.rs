//! Memoization behavior of the client factory.

use std::sync::Arc;

use restub::{ClientFactory, Service, StubClient, StubConfig, Transport};
use restub_memory::MemoryStore;

struct Repositories {
    client: StubClient,
}

impl Service for Repositories {
    fn from_client(client: StubClient) -> Self {
        Repositories { client }
    }
}

struct Issues {
    client: StubClient,
}

impl Service for Issues {
    fn from_client(client: StubClient) -> Self {
        Issues { client }
    }
}

fn factory() -> ClientFactory {
    let transport = Transport::new(
        "http://localhost:9/api/".parse().unwrap(),
        Arc::new(MemoryStore::with_default_quota()),
    );
    ClientFactory::new(transport)
}

#[test]
fn repeated_get_returns_the_same_instance() {
    let factory = factory();
    let config = StubConfig::new();
    let first = factory.get::<Repositories>(&config);
    let second = factory.get::<Repositories>(&config);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        first.client.base_url().as_str(),
        "http://localhost:9/api/"
    );
}

#[test]
fn separately_built_equal_configs_share_one_stub() {
    let factory = factory();
    let first = factory.get::<Repositories>(&StubConfig::new().auth_token("t").page_size(50));
    let second = factory.get::<Repositories>(&StubConfig::new().auth_token("t").page_size(50));
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn each_config_field_yields_a_distinct_stub() {
    let factory = factory();
    let base = factory.get::<Repositories>(&StubConfig::new());

    let variants = [
        StubConfig::new().bypass_cache(),
        StubConfig::new().accept("application/vnd.api+json"),
        StubConfig::new().auth_token("secret"),
        StubConfig::new().page_size(50),
    ];
    for config in variants {
        let other = factory.get::<Repositories>(&config);
        assert!(!Arc::ptr_eq(&base, &other));
    }
}

#[test]
fn stubs_of_distinct_interfaces_do_not_collide() {
    let factory = factory();
    let config = StubConfig::new();
    let repos = factory.get::<Repositories>(&config);
    let issues = factory.get::<Issues>(&config);
    // Same configuration, different interfaces: both resolve to their own
    // entry and keep working independently.
    assert_eq!(
        repos.client.base_url().as_str(),
        issues.client.base_url().as_str()
    );
    assert!(Arc::ptr_eq(&repos, &factory.get::<Repositories>(&config)));
    assert!(Arc::ptr_eq(&issues, &factory.get::<Issues>(&config)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_first_use_yields_one_canonical_instance() {
    let factory = Arc::new(factory());
    let mut handles = Vec::new();
    for _ in 0..16 {
        let factory = Arc::clone(&factory);
        handles.push(tokio::spawn(async move {
            factory.get::<Repositories>(&StubConfig::new().page_size(100))
        }));
    }

    let mut stubs = Vec::new();
    for handle in handles {
        stubs.push(handle.await.unwrap());
    }
    let canonical = factory.get::<Repositories>(&StubConfig::new().page_size(100));
    for stub in stubs {
        assert!(Arc::ptr_eq(&stub, &canonical));
    }
}
