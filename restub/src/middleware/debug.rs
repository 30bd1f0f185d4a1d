//! Diagnostic stages, assembled only into debug builds.
//!
//! Observability only: both stages pass requests and responses through
//! untouched and propagate errors unchanged after logging them.

use std::time::Instant;

use async_trait::async_trait;
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

use super::cache::CACHE_STATUS_HEADER;

/// Logs the request and response lines, BASIC style.
pub(crate) struct RequestLogger;

#[async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = req.method().clone();
        let url = req.url().clone();
        let start = Instant::now();
        tracing::debug!(%method, %url, "--> request");

        let result = next.run(req, extensions).await;
        match &result {
            Ok(response) => tracing::debug!(
                %method,
                %url,
                status = %response.status(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "<-- response",
            ),
            Err(error) => tracing::debug!(%method, %url, %error, "<-- failed"),
        }
        result
    }
}

/// Logs whether a response was served from the network or the local cache.
pub(crate) struct CacheStatusLogger;

#[async_trait]
impl Middleware for CacheStatusLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let url = req.url().clone();
        let response = next.run(req, extensions).await?;
        let status = response
            .headers()
            .get(CACHE_STATUS_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("NONE");
        tracing::debug!(%url, cache = status, "cache status");
        Ok(response)
    }
}
