//! Slot ownership tracking via the URL-prefix convention.

use crate::domain::entities::{SLOT_LARGE, SLOT_SMALL, UserRecord};

/// Decides which avatar slot values this engine owns.
///
/// Ownership is purely a string predicate on the current slot value: owned
/// means non-empty and prefixed by the configured avatar root. Other
/// extensions write into the same `avatar` mapping, and a stored tag would
/// be invisible to them; the prefix test is the one convention every writer
/// can honor without coordination.
pub struct AvatarOwnership;

impl AvatarOwnership {
    /// Whether `value` was written by this engine under `base`.
    ///
    /// An empty base would claim every value, so it owns nothing instead.
    #[must_use]
    pub fn is_owned(base: &str, value: &str) -> bool {
        !base.is_empty() && !value.is_empty() && value.starts_with(base)
    }

    /// Whether both UI-required slots currently hold engine-owned URLs.
    #[must_use]
    pub fn owns_required_slots(base: &str, user: &UserRecord) -> bool {
        Self::is_owned(base, user.slot(SLOT_SMALL)) && Self::is_owned(base, user.slot(SLOT_LARGE))
    }

    /// Blanks every engine-owned slot, whatever its name. Foreign values and
    /// already-empty slots stay as they are.
    pub fn clear_owned(base: &str, user: &mut UserRecord) {
        for (_, value) in user.slots_mut() {
            if Self::is_owned(base, value) {
                value.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/avatars/";

    #[test]
    fn test_owned_requires_prefix_and_content() {
        assert!(AvatarOwnership::is_owned(BASE, "/avatars/small/bob.png"));
        assert!(!AvatarOwnership::is_owned(BASE, "/cdn/x.png"));
        assert!(!AvatarOwnership::is_owned(BASE, ""));
    }

    #[test]
    fn test_empty_base_owns_nothing() {
        assert!(!AvatarOwnership::is_owned("", "/avatars/small/bob.png"));
        assert!(!AvatarOwnership::is_owned("", "anything"));
    }

    #[test]
    fn test_owns_required_slots_needs_both() {
        let mut user = UserRecord::new("bob");
        user.set_slot(SLOT_SMALL, "/avatars/small/bob.png");
        assert!(!AvatarOwnership::owns_required_slots(BASE, &user));

        user.set_slot(SLOT_LARGE, "/avatars/large/bob.png");
        assert!(AvatarOwnership::owns_required_slots(BASE, &user));
    }

    #[test]
    fn test_clear_owned_blanks_owned_slots() {
        let mut user = UserRecord::new("bob");
        user.set_slot(SLOT_SMALL, "/avatars/small/bob.png");
        user.set_slot(SLOT_LARGE, "/avatars/large/bob.png");

        AvatarOwnership::clear_owned(BASE, &mut user);
        assert_eq!(user.slot(SLOT_SMALL), "");
        assert_eq!(user.slot(SLOT_LARGE), "");
    }

    #[test]
    fn test_clear_owned_preserves_foreign_values() {
        let mut user = UserRecord::new("bob");
        user.set_slot(SLOT_SMALL, "/avatars/small/bob.png");
        user.set_slot(SLOT_LARGE, "/cdn/x.png");

        AvatarOwnership::clear_owned(BASE, &mut user);
        assert_eq!(user.slot(SLOT_SMALL), "");
        assert_eq!(user.slot(SLOT_LARGE), "/cdn/x.png");
    }

    #[test]
    fn test_clear_owned_covers_custom_slot_names() {
        let mut user = UserRecord::new("bob");
        user.set_slot("banner", "/avatars/banner/bob.png");
        user.set_slot("badge", "/cdn/badge.png");

        AvatarOwnership::clear_owned(BASE, &mut user);
        assert_eq!(user.slot("banner"), "");
        assert_eq!(user.slot("badge"), "/cdn/badge.png");
    }
}
