//! Network-level freshness clamp stage.
//!
//! Placed innermost by the assembler, so it only ever sees responses that
//! actually reached the network: cache hits are answered by the cache stage
//! above it. Running below the cache stage also means the rewritten header
//! is what gets stored.

use async_trait::async_trait;
use http::Extensions;
use http::header::CACHE_CONTROL;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use restub_core::{DirectiveSet, clamp_freshness};

pub(crate) struct FreshnessClamp;

#[async_trait]
impl Middleware for FreshnessClamp {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let mut response = next.run(req, extensions).await?;
        let directives = DirectiveSet::from_headers(response.headers());
        if let Some(clamped) = clamp_freshness(&directives) {
            response
                .headers_mut()
                .insert(CACHE_CONTROL, clamped.to_header_value());
        }
        Ok(response)
    }
}
