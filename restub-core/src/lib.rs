#![warn(missing_docs)]
//! # restub-core
//!
//! Transport-free foundation for the restub client layer.
//!
//! This crate provides the types the `restub` factory and its middleware
//! stages are built on, without depending on any particular HTTP client:
//!
//! - **Identity** ([`StubIdentity`], [`ServiceDescriptor`]) — the structured
//!   key that memoizes one constructed stub per distinct configuration.
//! - **Freshness** ([`DirectiveSet`], [`clamp_freshness`]) — parsing and
//!   bounded rewriting of `Cache-Control` response headers.
//! - **Storage** ([`ResponseStore`], [`StoredResponse`]) — the capability the
//!   response cache engine must provide. The engine itself (disk layout,
//!   eviction under a byte quota) lives behind this trait.
//! - **Ambient collaborators** ([`AuthTokenProvider`], [`VisitedUrlTracker`])
//!   — process-wide state the request augmenter consults, injected rather
//!   than reached for globally.

pub mod ambient;
pub mod clamp;
pub mod directives;
pub mod error;
pub mod identity;
pub mod store;

pub use ambient::{AuthTokenProvider, NoAuth, NoopTracker, StaticToken, VisitedUrlTracker};
pub use clamp::{FRESHNESS_WINDOW, clamp_freshness};
pub use directives::DirectiveSet;
pub use error::StoreError;
pub use identity::{ServiceDescriptor, StubIdentity};
pub use store::{ResponseStore, StoreResult, StoredResponse};
