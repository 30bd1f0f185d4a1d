//! Bounded rewriting of response freshness.
//!
//! Origin servers may declare a longer freshness window than is useful for a
//! client that just mutated server-side state and immediately re-reads it.
//! Clamping `max-age` to a small window makes such mutations visible within
//! a bounded delay while entity-tag validators keep the now-frequent
//! revalidations cheap. Every other directive the origin declared is carried
//! through untouched.

use std::time::Duration;

use crate::directives::DirectiveSet;

/// Upper bound applied to a declared `max-age`.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(2);

/// Tightens `directives` so the declared freshness never exceeds
/// [`FRESHNESS_WINDOW`].
///
/// Returns the rewritten set, or `None` when the input already satisfies the
/// bound and the response should pass through unchanged. A set with no
/// `max-age` is never given one: clamping only tightens an existing bound.
pub fn clamp_freshness(directives: &DirectiveSet) -> Option<DirectiveSet> {
    let max_age = directives.max_age?;
    if max_age <= FRESHNESS_WINDOW {
        return None;
    }
    Some(DirectiveSet {
        max_age: Some(FRESHNESS_WINDOW),
        max_stale: directives.max_stale,
        min_fresh: directives.min_fresh,
        no_cache: directives.no_cache,
        no_store: directives.no_store,
        no_transform: directives.no_transform,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;
    use http::header::{CACHE_CONTROL, HeaderValue};

    fn parse(value: &str) -> DirectiveSet {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_str(value).unwrap());
        DirectiveSet::from_headers(&headers)
    }

    #[test]
    fn long_max_age_is_clamped() {
        let clamped = clamp_freshness(&parse("max-age=60")).unwrap();
        assert_eq!(clamped.max_age(), Some(FRESHNESS_WINDOW));
    }

    #[test]
    fn tight_max_age_passes_through() {
        assert!(clamp_freshness(&parse("max-age=1")).is_none());
        assert!(clamp_freshness(&parse("max-age=2")).is_none());
    }

    #[test]
    fn clamping_is_idempotent() {
        let once = clamp_freshness(&parse("max-age=60, max-stale=30")).unwrap();
        assert!(clamp_freshness(&once).is_none());
    }

    #[test]
    fn other_directives_are_carried_verbatim() {
        let clamped =
            clamp_freshness(&parse("max-age=60, max-stale=30, min-fresh=5, no-cache")).unwrap();
        assert_eq!(clamped.max_stale(), Some(Duration::from_secs(30)));
        assert_eq!(clamped.min_fresh(), Some(Duration::from_secs(5)));
        assert!(clamped.no_cache());
        assert!(!clamped.no_store());
        assert!(!clamped.no_transform());
        assert_eq!(clamped.to_string(), "max-age=2, max-stale=30, min-fresh=5, no-cache");
    }

    #[test]
    fn absence_stays_absence() {
        let clamped = clamp_freshness(&parse("max-age=600, no-store, no-transform")).unwrap();
        assert_eq!(clamped.max_stale(), None);
        assert_eq!(clamped.min_fresh(), None);
        assert_eq!(clamped.to_string(), "max-age=2, no-store, no-transform");
    }

    #[test]
    fn no_max_age_is_never_synthesized() {
        assert!(clamp_freshness(&parse("no-store")).is_none());
        assert!(clamp_freshness(&DirectiveSet::default()).is_none());
    }
}
