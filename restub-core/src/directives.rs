//! Parsed representation of a `Cache-Control` header.
//!
//! Only the directives the freshness clamp and the cache stage act on are
//! modeled. Unknown directives are skipped; a malformed or missing header
//! parses to an empty set, never an error.

use std::fmt;
use std::time::Duration;

use http::HeaderMap;
use http::header::{CACHE_CONTROL, HeaderValue};

/// The directives of a `Cache-Control` header, parsed into durations and
/// flags.
///
/// Absence is meaningful: a directive the origin did not declare stays
/// `None`/`false` and must not be serialized back as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    pub(crate) max_age: Option<Duration>,
    pub(crate) max_stale: Option<Duration>,
    pub(crate) min_fresh: Option<Duration>,
    pub(crate) no_cache: bool,
    pub(crate) no_store: bool,
    pub(crate) no_transform: bool,
}

impl DirectiveSet {
    /// Parses the `Cache-Control` header(s) of `headers`.
    ///
    /// Tolerant by design: unparseable values and unknown directives are
    /// treated as "not declared".
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut set = DirectiveSet::default();
        for value in headers.get_all(CACHE_CONTROL) {
            let Ok(value) = value.to_str() else { continue };
            for directive in value.split(',') {
                let directive = directive.trim();
                let (name, argument) = match directive.split_once('=') {
                    Some((name, argument)) => {
                        (name.trim(), Some(argument.trim().trim_matches('"')))
                    }
                    None => (directive, None),
                };
                match name.to_ascii_lowercase().as_str() {
                    "max-age" => set.max_age = parse_seconds(argument),
                    "max-stale" => set.max_stale = parse_seconds(argument),
                    "min-fresh" => set.min_fresh = parse_seconds(argument),
                    "no-cache" => set.no_cache = true,
                    "no-store" => set.no_store = true,
                    "no-transform" => set.no_transform = true,
                    _ => {}
                }
            }
        }
        set
    }

    /// Returns the declared `max-age`, if any.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Returns the declared `max-stale`, if any.
    pub fn max_stale(&self) -> Option<Duration> {
        self.max_stale
    }

    /// Returns the declared `min-fresh`, if any.
    pub fn min_fresh(&self) -> Option<Duration> {
        self.min_fresh
    }

    /// Returns whether `no-cache` was declared.
    pub fn no_cache(&self) -> bool {
        self.no_cache
    }

    /// Returns whether `no-store` was declared.
    pub fn no_store(&self) -> bool {
        self.no_store
    }

    /// Returns whether `no-transform` was declared.
    pub fn no_transform(&self) -> bool {
        self.no_transform
    }

    /// Returns whether no directive at all was declared.
    pub fn is_empty(&self) -> bool {
        *self == DirectiveSet::default()
    }

    /// Serializes the set back to a header value.
    pub fn to_header_value(&self) -> HeaderValue {
        // Serialization emits fixed tokens and integers only.
        HeaderValue::from_str(&self.to_string())
            .expect("directive serialization is a valid header value")
    }
}

fn parse_seconds(argument: Option<&str>) -> Option<Duration> {
    argument?.parse::<u64>().ok().map(Duration::from_secs)
}

impl fmt::Display for DirectiveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut emit = |f: &mut fmt::Formatter<'_>, directive: &dyn fmt::Display| {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{directive}")
        };
        if let Some(max_age) = self.max_age {
            emit(f, &format_args!("max-age={}", max_age.as_secs()))?;
        }
        if let Some(max_stale) = self.max_stale {
            emit(f, &format_args!("max-stale={}", max_stale.as_secs()))?;
        }
        if let Some(min_fresh) = self.min_fresh {
            emit(f, &format_args!("min-fresh={}", min_fresh.as_secs()))?;
        }
        if self.no_cache {
            emit(f, &"no-cache")?;
        }
        if self.no_store {
            emit(f, &"no-store")?;
        }
        if self.no_transform {
            emit(f, &"no-transform")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn parses_durations_and_flags() {
        let set = DirectiveSet::from_headers(&headers(
            "max-age=60, max-stale=30, min-fresh=5, no-cache, no-store, no-transform",
        ));
        assert_eq!(set.max_age(), Some(Duration::from_secs(60)));
        assert_eq!(set.max_stale(), Some(Duration::from_secs(30)));
        assert_eq!(set.min_fresh(), Some(Duration::from_secs(5)));
        assert!(set.no_cache());
        assert!(set.no_store());
        assert!(set.no_transform());
    }

    #[test]
    fn missing_header_is_empty_not_an_error() {
        let set = DirectiveSet::from_headers(&HeaderMap::new());
        assert!(set.is_empty());
    }

    #[test]
    fn malformed_values_are_not_declared() {
        let set = DirectiveSet::from_headers(&headers("max-age=soon, min-fresh, private"));
        assert!(set.max_age().is_none());
        assert!(set.min_fresh().is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn case_and_whitespace_are_tolerated() {
        let set = DirectiveSet::from_headers(&headers("Max-Age = 10 ,NO-STORE"));
        assert_eq!(set.max_age(), Some(Duration::from_secs(10)));
        assert!(set.no_store());
    }

    #[test]
    fn multiple_headers_accumulate() {
        let mut map = headers("max-age=60");
        map.append(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        let set = DirectiveSet::from_headers(&map);
        assert_eq!(set.max_age(), Some(Duration::from_secs(60)));
        assert!(set.no_cache());
    }

    #[test]
    fn serialization_round_trips() {
        let set = DirectiveSet::from_headers(&headers("max-age=2, max-stale=30, no-store"));
        assert_eq!(set.to_string(), "max-age=2, max-stale=30, no-store");
        let mut map = HeaderMap::new();
        map.insert(CACHE_CONTROL, set.to_header_value());
        assert_eq!(DirectiveSet::from_headers(&map), set);
    }
}
