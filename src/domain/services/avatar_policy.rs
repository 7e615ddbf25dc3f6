//! Decision logic mapping user state to an avatar action.

use crate::domain::entities::{AvatarAction, AvatarUrls, UserRecord};
use crate::domain::services::AvatarOwnership;

/// Pure decision function evaluated once per triggering event.
///
/// The policy never mutates anything; it reports what should happen and the
/// loader carries it out. Logout clears are issued by the event router
/// directly, so `decide` only ever answers `Skip` or `SetUrls`.
pub struct AvatarPolicy;

impl AvatarPolicy {
    /// Decides the action for `user` under the avatar root `base`.
    ///
    /// `force` bypasses the already-resolved check so a fresh login always
    /// re-derives its URLs. An empty base disables the engine: nothing can
    /// be owned under it, and every pass would re-probe.
    #[must_use]
    pub fn decide(user: &UserRecord, base: &str, force: bool) -> AvatarAction {
        let Some(account) = user.account() else {
            return AvatarAction::Skip;
        };
        if base.is_empty() {
            return AvatarAction::Skip;
        }
        if !force && AvatarOwnership::owns_required_slots(base, user) {
            return AvatarAction::Skip;
        }
        AvatarAction::SetUrls(AvatarUrls::derive(base, account))
    }
}
