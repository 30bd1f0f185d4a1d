//! # restub
//!
//! Cached typed REST client stubs over a `reqwest` middleware pipeline.
//!
//! A [`ClientFactory`] hands out stubs of statically registered interface
//! types, memoized per configuration: requesting the same stub twice is a
//! pure lookup, and every distinct configuration gets its own derived client
//! branched off one shared [`Transport`]. Each derived client carries an
//! ordered middleware chain that injects authentication and pagination
//! parameters, bounds upstream cache freshness to a two-second window, and
//! consults a shared response store.
//!
//! ```no_run
//! use std::sync::Arc;
//! use restub::{ClientFactory, Service, StubClient, StubConfig, Transport};
//! use restub_memory::MemoryStore;
//!
//! struct Repositories {
//!     client: StubClient,
//! }
//!
//! impl Service for Repositories {
//!     fn from_client(client: StubClient) -> Self {
//!         Repositories { client }
//!     }
//! }
//!
//! # async fn example() -> Result<(), reqwest_middleware::Error> {
//! let transport = Transport::new(
//!     "https://api.example.com".parse().unwrap(),
//!     Arc::new(MemoryStore::with_default_quota()),
//! );
//! let factory = ClientFactory::new(transport);
//!
//! let repos = factory.get::<Repositories>(&StubConfig::new().page_size(50));
//! let response = repos.client.get("/repositories").send().await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod factory;
pub mod middleware;
mod pipeline;
pub mod service;
pub mod transport;

pub use config::StubConfig;
pub use factory::ClientFactory;
pub use middleware::augment::DEFAULT_ACCEPT;
pub use middleware::cache::CACHE_STATUS_HEADER;
pub use middleware::pagination::{PageLinks, PageRequest};
pub use service::Service;
pub use transport::{StubClient, Transport};

// Re-export the foundation types for convenience
pub use restub_core::{
    AuthTokenProvider, DirectiveSet, FRESHNESS_WINDOW, NoAuth, NoopTracker, ResponseStore,
    ServiceDescriptor, StaticToken, StoreError, StoredResponse, StubIdentity, VisitedUrlTracker,
    clamp_freshness,
};

/// Re-export of the derived client type stubs are built over.
pub use reqwest_middleware::ClientWithMiddleware;
