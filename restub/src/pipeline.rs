//! Assembles the ordered middleware chain for one stub configuration.

use std::sync::Arc;

use reqwest_middleware::ClientWithMiddleware;
use restub_core::{AuthTokenProvider, VisitedUrlTracker};

use crate::config::StubConfig;
use crate::middleware::{
    CacheBypass, CacheStatusLogger, FreshnessClamp, HttpCache, Pagination, RequestAugmenter,
    RequestLogger,
};
use crate::transport::Transport;

/// Builds a derived client for `config`, branched off the shared transport.
///
/// Stage order is load-bearing, outermost first:
///
/// 1. pagination — later stages see the final request shape;
/// 2. augmentation — auth, `per_page`, accept, URL tracking, all before the
///    cache key is derived from the URL;
/// 3. diagnostics (debug builds only) — request lines and cache status;
/// 4. bypass (opt-in) — tags reads as uncacheable before the cache stage
///    looks;
/// 5. cache — answers from the store or forwards to the network;
/// 6. freshness clamp — below the cache stage, so it only sees network
///    responses and rewrites them before they are stored.
pub(crate) fn assemble(
    transport: &Transport,
    config: &StubConfig,
    auth: Arc<dyn AuthTokenProvider>,
    tracker: Arc<dyn VisitedUrlTracker>,
) -> ClientWithMiddleware {
    let mut builder = transport
        .derived_builder()
        .with(Pagination)
        .with(RequestAugmenter::new(
            config.auth_token.clone(),
            config.accept.clone(),
            config.page_size,
            auth,
            tracker,
        ));

    if cfg!(debug_assertions) {
        builder = builder.with(RequestLogger).with(CacheStatusLogger);
    }
    if config.bypass_cache {
        builder = builder.with(CacheBypass);
    }

    builder
        .with(HttpCache::new(transport.store().clone()))
        .with(FreshnessClamp)
        .build()
}
