//! The authentication strategy capability interface.

use crate::client::BoxFuture;

/// An interchangeable mechanism for establishing and checking the caller's
/// authorization with the upstream provider.
///
/// Implementations should answer [`is_authorized`](Self::is_authorized) with
/// an O(1) in-memory check when possible and fall back to a persisted-state
/// read otherwise.
pub trait AuthStrategy: Send + Sync {
    /// The strategy's configuration name (e.g. "google_cloud", "direct").
    fn name(&self) -> &str;

    /// Returns whether the caller is currently authenticated.
    fn is_authorized(&self) -> BoxFuture<'_, bool>;

    /// Attempts to load persisted credentials from durable storage.
    ///
    /// Returns whether a usable credential set was found. Storage errors are
    /// logged and reported as `false`, never propagated: an unreadable
    /// credential file is indistinguishable from an absent one for the
    /// caller.
    fn load_persisted(&self) -> BoxFuture<'_, bool>;
}
