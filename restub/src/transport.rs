//! The shared transport and the client handed to stubs.

use std::sync::Arc;

use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use restub_core::ResponseStore;

/// The process-wide transport every derived client branches off.
///
/// Exactly one instance should exist per process, created explicitly before
/// any stub is requested. It owns the shared `reqwest` client (and with it
/// the connection pool), the API base URL, and the response store handle.
/// Derived clients clone the `reqwest` handle and add middleware; the shared
/// instance itself is never mutated and stays usable concurrently.
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn ResponseStore>,
}

impl Transport {
    /// Creates the transport for `base_url` backed by `store`.
    pub fn new(base_url: Url, store: Arc<dyn ResponseStore>) -> Self {
        Transport {
            http: reqwest::Client::new(),
            base_url,
            store,
        }
    }

    /// Creates the transport over a pre-configured `reqwest` client.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        store: Arc<dyn ResponseStore>,
    ) -> Self {
        Transport {
            http,
            base_url,
            store,
        }
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Branches a raw, middleware-free client builder off the shared
    /// instance, for callers that need the pooled transport without the
    /// stub pipeline.
    pub fn derived_builder(&self) -> ClientBuilder {
        ClientBuilder::new(self.http.clone())
    }

    pub(crate) fn store(&self) -> &Arc<dyn ResponseStore> {
        &self.store
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// The fully assembled derived client a stub is built over.
///
/// Wraps the middleware chain together with the base URL so stub methods can
/// address endpoints by path.
#[derive(Clone)]
pub struct StubClient {
    http: ClientWithMiddleware,
    base_url: Url,
}

impl StubClient {
    pub(crate) fn new(http: ClientWithMiddleware, base_url: Url) -> Self {
        StubClient { http, base_url }
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the underlying middleware client.
    pub fn http(&self) -> &ClientWithMiddleware {
        &self.http
    }

    /// Resolves `path` against the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Starts a request with `method` against `path`.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.endpoint(path))
    }

    /// Starts a `GET` request against `path`.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(reqwest::Method::GET, path)
    }

    /// Starts a `POST` request against `path`.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(reqwest::Method::POST, path)
    }
}

impl std::fmt::Debug for StubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restub_memory::MemoryStore;

    #[test]
    fn endpoint_joins_without_doubled_slashes() {
        let transport = Transport::new(
            "http://localhost:1234/api/".parse().unwrap(),
            Arc::new(MemoryStore::new(1024)),
        );
        let client = StubClient::new(
            transport.derived_builder().build(),
            transport.base_url().clone(),
        );
        assert_eq!(client.endpoint("/repositories"), "http://localhost:1234/api/repositories");
        assert_eq!(client.endpoint("repositories"), "http://localhost:1234/api/repositories");
    }
}
