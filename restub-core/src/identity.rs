//! Stub identity types and key derivation.
//!
//! A stub is memoized by the full tuple of its interface descriptor and its
//! configuration parameters. The identity is a structured key with derived
//! `Eq`/`Hash` over every field, so two identities are equal iff all fields
//! are equal — there is no formatted-string representation in the key path
//! and therefore no field-boundary collisions.
//!
//! Token and accept-header equality is plain string equality. Two
//! differently-formatted but semantically equivalent header values are
//! distinct identities on purpose: they configure distinct clients.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::num::NonZeroU32;

use smol_str::SmolStr;

/// Identifies a stub interface type.
///
/// The `TypeId` of the stub type makes the descriptor collision-free across
/// interfaces; the type name is carried along for log output only.
///
/// ```
/// use restub_core::ServiceDescriptor;
///
/// struct Repositories;
/// struct Issues;
///
/// let a = ServiceDescriptor::of::<Repositories>();
/// let b = ServiceDescriptor::of::<Issues>();
/// assert_ne!(a, b);
/// assert_eq!(a, ServiceDescriptor::of::<Repositories>());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ServiceDescriptor {
    id: TypeId,
    name: &'static str,
}

impl ServiceDescriptor {
    /// Creates the descriptor for the stub type `S`.
    pub fn of<S: Any>() -> Self {
        ServiceDescriptor {
            id: TypeId::of::<S>(),
            name: type_name::<S>(),
        }
    }

    /// Returns the stub type's name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Trailing path segment is enough to tell stubs apart in logs.
        f.write_str(self.name.rsplit("::").next().unwrap_or(self.name))
    }
}

/// The memoization key for one constructed stub.
///
/// Every configuration field participates in equality and hashing. Omitting
/// one would share a client across configurations — most dangerously a
/// token-scoped client across different tokens.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StubIdentity {
    service: ServiceDescriptor,
    bypass_cache: bool,
    accept: Option<SmolStr>,
    token: Option<SmolStr>,
    page_size: Option<NonZeroU32>,
}

impl StubIdentity {
    /// Creates an identity from a descriptor and configuration parameters.
    ///
    /// The descriptor is always present; every other field defaults to its
    /// neutral value when the caller left it unset.
    pub fn new(
        service: ServiceDescriptor,
        bypass_cache: bool,
        accept: Option<SmolStr>,
        token: Option<SmolStr>,
        page_size: Option<NonZeroU32>,
    ) -> Self {
        StubIdentity {
            service,
            bypass_cache,
            accept,
            token,
            page_size,
        }
    }

    /// Returns the interface descriptor.
    pub fn service(&self) -> ServiceDescriptor {
        self.service
    }

    /// Returns whether cache reads are bypassed for this stub.
    pub fn bypass_cache(&self) -> bool {
        self.bypass_cache
    }

    /// Returns the accept-header override, if any.
    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }

    /// Returns the per-stub auth token override, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the configured page size, if any.
    pub fn page_size(&self) -> Option<NonZeroU32> {
        self.page_size
    }
}

impl fmt::Display for StubIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Token values stay out of log output.
        write!(
            f,
            "{} bypass={} accept={} token={} per_page={}",
            self.service,
            self.bypass_cache,
            self.accept.as_deref().unwrap_or("-"),
            if self.token.is_some() { "<set>" } else { "-" },
            self.page_size.map(|n| n.get()).unwrap_or(0),
        )
    }
}
