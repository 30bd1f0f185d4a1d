//! Cross-cutting request augmentation.
//!
//! Injects the authorization header, the `per_page` query parameter, and a
//! default accept header, then reports the final URL to the visited-URL
//! tracker — exactly once per outgoing attempt, after all rewrites.

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use http::Extensions;
use http::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use restub_core::{AuthTokenProvider, VisitedUrlTracker};
use smol_str::SmolStr;

/// Accept header applied when neither the caller nor the stub configuration
/// provides one.
pub const DEFAULT_ACCEPT: &str = "application/json";

pub(crate) struct RequestAugmenter {
    token_override: Option<SmolStr>,
    accept_override: Option<SmolStr>,
    page_size: Option<NonZeroU32>,
    auth: Arc<dyn AuthTokenProvider>,
    tracker: Arc<dyn VisitedUrlTracker>,
}

impl RequestAugmenter {
    pub(crate) fn new(
        token_override: Option<SmolStr>,
        accept_override: Option<SmolStr>,
        page_size: Option<NonZeroU32>,
        auth: Arc<dyn AuthTokenProvider>,
        tracker: Arc<dyn VisitedUrlTracker>,
    ) -> Self {
        RequestAugmenter {
            token_override,
            accept_override,
            page_size,
            auth,
            tracker,
        }
    }
}

#[async_trait]
impl Middleware for RequestAugmenter {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        // Per-stub override wins over the ambient token; with neither, the
        // request goes out unauthenticated. A resolved token is always set,
        // replacing whatever was there.
        let token = self
            .token_override
            .clone()
            .or_else(|| self.auth.auth_token());
        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Token {token}")) {
                Ok(value) => {
                    req.headers_mut().insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!(
                    "auth token is not a valid header value, sending unauthenticated"
                ),
            }
        }

        if let Some(page_size) = self.page_size {
            req.url_mut()
                .query_pairs_mut()
                .append_pair("per_page", &page_size.to_string());
        }

        if !req.headers().contains_key(ACCEPT) {
            let accept = match &self.accept_override {
                Some(accept) => HeaderValue::from_str(accept).ok(),
                None => Some(HeaderValue::from_static(DEFAULT_ACCEPT)),
            };
            match accept {
                Some(value) => {
                    req.headers_mut().append(ACCEPT, value);
                }
                None => tracing::warn!("configured accept header is not a valid header value"),
            }
        }

        self.tracker.track(req.url().as_str());
        next.run(req, extensions).await
    }
}
