//! HTTP adapter for avatar image probes.

use async_trait::async_trait;
use tracing::trace;

use crate::domain::errors::ProbeError;
use crate::domain::ports::ImageProbe;

/// Probes avatar URLs with GET requests.
///
/// Requests carry no timeout on purpose: like an in-page image preload, a
/// probe that never answers simply never commits anything. Relative URLs
/// (the default `/avatars/` root produces them) need an origin to resolve
/// against.
pub struct HttpImageProbe {
    client: reqwest::Client,
    origin: Option<String>,
}

impl std::fmt::Debug for HttpImageProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageProbe")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl HttpImageProbe {
    /// Creates a probe client.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ProbeError::network)?;
        Ok(Self {
            client,
            origin: None,
        })
    }

    /// Sets the origin prepended to relative probe URLs, e.g.
    /// `https://chat.example.org`.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    fn resolve(&self, url: &str) -> String {
        match &self.origin {
            Some(origin) if url.starts_with('/') => format!("{origin}{url}"),
            _ => url.to_owned(),
        }
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn probe(&self, url: &str) -> Result<(), ProbeError> {
        let target = self.resolve(url);
        trace!(url = %target, "probing image");

        let response = self
            .client
            .get(&target)
            .send()
            .await
            .map_err(ProbeError::network)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeError::Status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefixes_relative_urls() {
        let probe = HttpImageProbe::new()
            .unwrap()
            .with_origin("https://chat.example.org");

        assert_eq!(
            probe.resolve("/avatars/small/alice.png"),
            "https://chat.example.org/avatars/small/alice.png"
        );
    }

    #[test]
    fn test_resolve_leaves_absolute_urls_alone() {
        let probe = HttpImageProbe::new()
            .unwrap()
            .with_origin("https://chat.example.org");

        assert_eq!(
            probe.resolve("https://cdn.example/small/alice.png"),
            "https://cdn.example/small/alice.png"
        );
    }

    #[test]
    fn test_resolve_without_origin_is_identity() {
        let probe = HttpImageProbe::new().unwrap();
        assert_eq!(
            probe.resolve("/avatars/small/alice.png"),
            "/avatars/small/alice.png"
        );
    }
}
