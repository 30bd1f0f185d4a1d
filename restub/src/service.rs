//! The stub construction seam.

use restub_core::ServiceDescriptor;

use crate::transport::StubClient;

/// A statically registered stub interface.
///
/// Each stub is a concrete type that knows how to build itself over a fully
/// assembled derived client. The factory never inspects the stub beyond its
/// descriptor.
///
/// ```
/// use restub::{Service, StubClient};
///
/// struct Issues {
///     client: StubClient,
/// }
///
/// impl Service for Issues {
///     fn from_client(client: StubClient) -> Self {
///         Issues { client }
///     }
/// }
/// ```
pub trait Service: Sized + Send + Sync + 'static {
    /// Returns the descriptor identifying this interface in the stub cache.
    fn descriptor() -> ServiceDescriptor {
        ServiceDescriptor::of::<Self>()
    }

    /// Builds the callable stub over the derived client.
    ///
    /// Runs under the factory's per-identity construction lock, so it must
    /// not request other stubs from the same factory.
    fn from_client(client: StubClient) -> Self;
}
