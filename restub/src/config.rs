//! Per-stub configuration surface.

use std::num::NonZeroU32;

use restub_core::{ServiceDescriptor, StubIdentity};
use smol_str::SmolStr;

/// Configuration parameters for one stub.
///
/// Every field is optional; the default configuration reads through the
/// cache, authenticates with the ambient token if one exists, and leaves
/// page size and accept header to the server's defaults.
///
/// ```
/// use restub::StubConfig;
///
/// let config = StubConfig::new()
///     .auth_token("ghp_example")
///     .page_size(100);
/// # let _ = config;
/// ```
#[derive(Clone, Debug, Default)]
pub struct StubConfig {
    pub(crate) bypass_cache: bool,
    pub(crate) accept: Option<SmolStr>,
    pub(crate) auth_token: Option<SmolStr>,
    pub(crate) page_size: Option<NonZeroU32>,
}

impl StubConfig {
    /// Creates the neutral configuration.
    pub fn new() -> Self {
        StubConfig::default()
    }

    /// Disables cache reads for every request made through the stub.
    ///
    /// Responses are still written to the shared store, so non-bypassing
    /// stubs observe the refreshed data.
    pub fn bypass_cache(mut self) -> Self {
        self.bypass_cache = true;
        self
    }

    /// Overrides the accept header used when a request carries none.
    pub fn accept(mut self, accept: impl Into<SmolStr>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Overrides the ambient auth token for this stub.
    pub fn auth_token(mut self, token: impl Into<SmolStr>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Requests `page_size` items per page via the `per_page` parameter.
    ///
    /// Panics if `page_size` is zero; the parameter is positive by contract.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(NonZeroU32::new(page_size).expect("page size must be positive"));
        self
    }

    pub(crate) fn identity(&self, service: ServiceDescriptor) -> StubIdentity {
        StubIdentity::new(
            service,
            self.bypass_cache,
            self.accept.clone(),
            self.auth_token.clone(),
            self.page_size,
        )
    }
}
