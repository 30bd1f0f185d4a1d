//! The HTTP cache stage.
//!
//! Consults the shared response store: a fresh stored entry answers the
//! request without touching the network; a network response is buffered,
//! written back when cacheable, and replayed to the caller. Every response
//! is marked with [`CACHE_STATUS_HEADER`] so outer stages and callers can
//! tell a local answer from a network one.
//!
//! A request carrying `Cache-Control: no-cache` skips the read but not the
//! write — that is what the bypass stage relies on. Store failures degrade
//! to a miss with a warning; they never mask the response or a transport
//! error.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::Extensions;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next, Result};
use restub_core::{DirectiveSet, ResponseStore, StoredResponse};

/// Header marking whether a response was served from the local store.
pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache-status");

const HIT: HeaderValue = HeaderValue::from_static("HIT");
const MISS: HeaderValue = HeaderValue::from_static("MISS");

pub(crate) struct HttpCache {
    store: Arc<dyn ResponseStore>,
}

impl HttpCache {
    pub(crate) fn new(store: Arc<dyn ResponseStore>) -> Self {
        HttpCache { store }
    }
}

#[async_trait]
impl Middleware for HttpCache {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = req.method().clone();
        let key = format!("{} {}", method, req.url());

        let read_allowed =
            method == Method::GET && !DirectiveSet::from_headers(req.headers()).no_cache();
        if read_allowed {
            match self.store.get(&key).await {
                Ok(Some(stored)) if stored.is_fresh() => {
                    tracing::debug!(url = %req.url(), "serving response from local cache");
                    let (status, headers, body) = stored.into_parts();
                    return Ok(rebuild(status, headers, body, HIT));
                }
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!(%error, "response store read failed, treating as miss")
                }
            }
        }

        let response = next.run(req, extensions).await?;

        if method == Method::GET
            && response.status() == StatusCode::OK
            && !DirectiveSet::from_headers(response.headers()).no_store()
        {
            let (stored, response) = buffer(response).await?;
            if let Err(error) = self.store.put(&key, stored).await {
                tracing::warn!(%error, "response store write failed");
            }
            return Ok(response);
        }

        let mut response = response;
        response.headers_mut().insert(CACHE_STATUS_HEADER, MISS);
        Ok(response)
    }
}

/// Drains the network response so its body can be stored, and replays an
/// identical response (marked as a miss) to the caller.
async fn buffer(mut response: Response) -> Result<(StoredResponse, Response)> {
    let status = response.status();
    let headers = response.headers().clone();
    let extensions = std::mem::take(response.extensions_mut());
    let body = response
        .bytes()
        .await
        .map_err(reqwest_middleware::Error::Reqwest)?;

    let stored = StoredResponse::new(status, headers.clone(), body.clone());
    let mut replay = rebuild(status, headers, body, MISS);
    *replay.extensions_mut() = extensions;
    Ok((stored, replay))
}

fn rebuild(status: StatusCode, headers: HeaderMap, body: Bytes, marker: HeaderValue) -> Response {
    let mut response = http::Response::new(reqwest::Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response.headers_mut().insert(CACHE_STATUS_HEADER, marker);
    response.into()
}
