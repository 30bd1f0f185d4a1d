//! The stub cache and its orchestrating factory.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use restub_core::{AuthTokenProvider, NoAuth, NoopTracker, StubIdentity, VisitedUrlTracker};

use crate::config::StubConfig;
use crate::pipeline;
use crate::service::Service;
use crate::transport::{StubClient, Transport};

/// Hands out memoized stubs, at most one per distinct identity.
///
/// The identity covers the stub's interface type and every configuration
/// parameter; requesting the same tuple twice returns the same `Arc`.
/// Construction is single-flight: under concurrent first use of one
/// identity, exactly one derived client and stub are built and every caller
/// receives it. Entries are never evicted; they live for the process.
pub struct ClientFactory {
    transport: Transport,
    auth: Arc<dyn AuthTokenProvider>,
    tracker: Arc<dyn VisitedUrlTracker>,
    stubs: DashMap<StubIdentity, Arc<dyn Any + Send + Sync>>,
}

impl ClientFactory {
    /// Creates a factory over the shared transport, without ambient
    /// authentication or URL tracking.
    pub fn new(transport: Transport) -> Self {
        ClientFactory {
            transport,
            auth: Arc::new(NoAuth),
            tracker: Arc::new(NoopTracker),
            stubs: DashMap::new(),
        }
    }

    /// Sets the ambient auth token provider.
    pub fn auth_provider(mut self, auth: Arc<dyn AuthTokenProvider>) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the visited-URL tracker.
    pub fn url_tracker(mut self, tracker: Arc<dyn VisitedUrlTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    /// Returns the shared transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Returns the stub of `S` configured by `config`, building it on first
    /// use.
    ///
    /// Building a stub assembles a fresh derived client with its own
    /// middleware chain, which is not free; the entry lock guarantees it
    /// happens at most once per identity. Construction performs no I/O, so
    /// holding the lock across it is fine — but the lock is held while
    /// [`Service::from_client`] runs, so `from_client` must not call back
    /// into the same factory or it can deadlock on the map's internal
    /// locking. Request collaborating stubs after construction instead.
    pub fn get<S: Service>(&self, config: &StubConfig) -> Arc<S> {
        let identity = config.identity(S::descriptor());
        let entry = self
            .stubs
            .entry(identity)
            .or_insert_with(|| {
                tracing::debug!(service = %S::descriptor(), "building stub");
                let client = pipeline::assemble(
                    &self.transport,
                    config,
                    Arc::clone(&self.auth),
                    Arc::clone(&self.tracker),
                );
                let stub =
                    S::from_client(StubClient::new(client, self.transport.base_url().clone()));
                Arc::new(stub) as Arc<dyn Any + Send + Sync>
            })
            .clone();

        // The identity embeds S's TypeId, so the entry can only hold an S.
        Arc::downcast::<S>(entry).unwrap_or_else(|_| unreachable!("stub type pinned by identity"))
    }
}

impl std::fmt::Debug for ClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientFactory")
            .field("transport", &self.transport)
            .field("stubs", &self.stubs.len())
            .finish()
    }
}
