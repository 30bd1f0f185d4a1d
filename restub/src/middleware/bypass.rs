//! Opt-in cache-bypass stage.
//!
//! Marks every outgoing request with `Cache-Control: no-cache`, which makes
//! the cache stage skip its read. Writes are unaffected: the network
//! response is still stored and visible to non-bypassing stubs.

use async_trait::async_trait;
use http::Extensions;
use http::header::{CACHE_CONTROL, HeaderValue};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

pub(crate) struct CacheBypass;

#[async_trait]
impl Middleware for CacheBypass {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        req.headers_mut()
            .append(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        next.run(req, extensions).await
    }
}
