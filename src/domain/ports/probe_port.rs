//! Port for verifying that an avatar image actually loads.

use async_trait::async_trait;

use crate::domain::errors::ProbeError;

/// Port for probing avatar image URLs.
///
/// A probe behaves like an in-page image preload: it resolves once the
/// resource either loads or errors, and carries no client-side timeout of
/// its own. Callers never cancel an in-flight probe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageProbe: Send + Sync {
    /// Fetches `url`, resolving `Ok` only when the image loaded.
    async fn probe(&self, url: &str) -> Result<(), ProbeError>;
}
