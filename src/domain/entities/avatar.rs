//! Avatar URL pairs and the actions the engine can take on a user.

/// Slot name for the small thumbnail shown in user lists.
pub const SLOT_SMALL: &str = "small";

/// Slot name for the large image shown in profile views.
pub const SLOT_LARGE: &str = "large";

/// The pair of avatar URLs the engine manages for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUrls {
    small: String,
    large: String,
}

impl AvatarUrls {
    /// Builds a pair from already-derived URLs.
    #[must_use]
    pub fn new(small: impl Into<String>, large: impl Into<String>) -> Self {
        Self {
            small: small.into(),
            large: large.into(),
        }
    }

    /// Derives the URL pair for an account under the served avatar root.
    ///
    /// The account name is lowercased so that nick-case drift between login
    /// sessions maps to one stored image. The base is concatenated as given;
    /// hosts configure it with a trailing slash (the default is `/avatars/`).
    #[must_use]
    pub fn derive(base: &str, account: &str) -> Self {
        let account = account.to_lowercase();
        Self {
            small: format!("{base}{SLOT_SMALL}/{account}.png"),
            large: format!("{base}{SLOT_LARGE}/{account}.png"),
        }
    }

    /// URL for the small thumbnail slot.
    #[must_use]
    pub fn small(&self) -> &str {
        &self.small
    }

    /// URL for the large image slot.
    #[must_use]
    pub fn large(&self) -> &str {
        &self.large
    }
}

/// Outcome of evaluating a user's avatar state against an event.
///
/// Logout clears are not an evaluation outcome; the router issues them
/// directly through the ownership service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarAction {
    /// Leave the record untouched.
    Skip,
    /// Verify the derived URLs and commit them if the image loads.
    SetUrls(AvatarUrls),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_builds_small_and_large() {
        let urls = AvatarUrls::derive("/avatars/", "alice");
        assert_eq!(urls.small(), "/avatars/small/alice.png");
        assert_eq!(urls.large(), "/avatars/large/alice.png");
    }

    #[test]
    fn test_derive_lowercases_account() {
        let urls = AvatarUrls::derive("/avatars/", "AlIcE");
        assert_eq!(urls.small(), "/avatars/small/alice.png");
        assert_eq!(urls.large(), "/avatars/large/alice.png");
    }

    #[test]
    fn test_derive_concatenates_base_as_given() {
        let urls = AvatarUrls::derive("https://cdn.example/a", "bob");
        assert_eq!(urls.small(), "https://cdn.example/asmall/bob.png");

        let urls = AvatarUrls::derive("https://cdn.example/a/", "bob");
        assert_eq!(urls.small(), "https://cdn.example/a/small/bob.png");
    }
}
