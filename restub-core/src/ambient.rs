//! Ambient process-wide collaborators consulted by the request augmenter.
//!
//! Both are injected into the client factory rather than reached for through
//! globals, so tests and embedders can substitute their own.

use smol_str::SmolStr;

/// Read-only source of the ambient auth token.
///
/// A missing token is not an error; requests proceed unauthenticated and the
/// remote API's own authorization surface takes over.
pub trait AuthTokenProvider: Send + Sync {
    /// Returns the current ambient token, if one exists.
    fn auth_token(&self) -> Option<SmolStr>;
}

/// Provider for processes without ambient authentication.
pub struct NoAuth;

impl AuthTokenProvider for NoAuth {
    fn auth_token(&self) -> Option<SmolStr> {
        None
    }
}

/// Provider returning one fixed token.
pub struct StaticToken(SmolStr);

impl StaticToken {
    /// Creates a provider for `token`.
    pub fn new(token: impl Into<SmolStr>) -> Self {
        StaticToken(token.into())
    }
}

impl AuthTokenProvider for StaticToken {
    fn auth_token(&self) -> Option<SmolStr> {
        Some(self.0.clone())
    }
}

/// Fire-and-forget sink for the final URL of every outgoing attempt.
pub trait VisitedUrlTracker: Send + Sync {
    /// Records `url`. No return value is consulted.
    fn track(&self, url: &str);
}

/// Tracker that drops every URL.
pub struct NoopTracker;

impl VisitedUrlTracker for NoopTracker {
    fn track(&self, _url: &str) {}
}
