//! Link-style pagination stage.
//!
//! Request side: a [`PageRequest`] extension attached by the caller is
//! rewritten into the `page` query parameter. Response side: the RFC 8288
//! `Link` header is parsed into [`PageLinks`] and exposed through the
//! response's extensions, so callers can follow a listing without parsing
//! headers themselves.
//!
//! This stage runs first so every later stage sees the final request shape.

use async_trait::async_trait;
use http::Extensions;
use http::header::LINK;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

/// The page a caller wants, attached via
/// [`RequestBuilder::with_extension`](reqwest_middleware::RequestBuilder::with_extension).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest(pub u32);

/// Continuation metadata parsed from a response's `Link` header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub prev: Option<String>,
    /// URL of the first page, if any.
    pub first: Option<String>,
    /// URL of the last page, if any.
    pub last: Option<String>,
}

impl PageLinks {
    /// Returns whether the header declared no traversal links at all.
    pub fn is_empty(&self) -> bool {
        *self == PageLinks::default()
    }

    pub(crate) fn parse(header: &str) -> Self {
        let mut links = PageLinks::default();
        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let Some(target) = parts.next() else { continue };
            let target = target.trim();
            if !(target.starts_with('<') && target.ends_with('>')) {
                continue;
            }
            let url = &target[1..target.len() - 1];
            for parameter in parts {
                let Some((name, value)) = parameter.split_once('=') else {
                    continue;
                };
                if name.trim() != "rel" {
                    continue;
                }
                match value.trim().trim_matches('"') {
                    "next" => links.next = Some(url.to_owned()),
                    "prev" => links.prev = Some(url.to_owned()),
                    "first" => links.first = Some(url.to_owned()),
                    "last" => links.last = Some(url.to_owned()),
                    _ => {}
                }
            }
        }
        links
    }
}

pub(crate) struct Pagination;

#[async_trait]
impl Middleware for Pagination {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        if let Some(PageRequest(page)) = extensions.get::<PageRequest>().copied() {
            req.url_mut()
                .query_pairs_mut()
                .append_pair("page", &page.to_string());
        }

        let mut response = next.run(req, extensions).await?;

        if let Some(header) = response.headers().get(LINK).and_then(|v| v.to_str().ok()) {
            let links = PageLinks::parse(header);
            if !links.is_empty() {
                response.extensions_mut().insert(links);
            }
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_github_style_link_header() {
        let links = PageLinks::parse(
            "<https://api.example.com/repositories?page=3>; rel=\"next\", \
             <https://api.example.com/repositories?page=12>; rel=\"last\"",
        );
        assert_eq!(
            links.next.as_deref(),
            Some("https://api.example.com/repositories?page=3")
        );
        assert_eq!(
            links.last.as_deref(),
            Some("https://api.example.com/repositories?page=12")
        );
        assert!(links.prev.is_none());
        assert!(links.first.is_none());
    }

    #[test]
    fn unknown_relations_are_skipped() {
        let links = PageLinks::parse("<https://api.example.com/x>; rel=\"canonical\"");
        assert!(links.is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let links = PageLinks::parse("not-a-link; rel=\"next\", <https://a>; rel=prev");
        assert!(links.next.is_none());
        assert_eq!(links.prev.as_deref(), Some("https://a"));
    }
}
