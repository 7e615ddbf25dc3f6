//! Executes avatar URL commits, with optional load verification.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::domain::entities::{
    AvatarUrls, NetworkId, SLOT_LARGE, SLOT_SMALL, SharedUser, UserRecord,
};
use crate::domain::ports::{ImageProbe, SettingsProvider};

/// Message sent when an avatar probe finishes.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// Network the probed user belongs to.
    pub network: NetworkId,
    /// Nick the probe was issued for.
    pub nick: String,
    /// The small-slot URL captured when the probe was issued.
    pub url: String,
    /// Whether the image loaded.
    pub ok: bool,
}

/// Carries out `SetUrls` actions decided by the policy.
///
/// With `preload_avatars` on, the derived small URL is probed first and the
/// pair committed only once the image actually loads; otherwise the commit
/// is immediate. Probes are never cancelled and carry no timeout; staleness
/// is handled at commit time instead (see [`AvatarLoader::finish`]).
pub struct AvatarLoader {
    settings: Arc<dyn SettingsProvider>,
    prober: Arc<dyn ImageProbe>,
    outcome_tx: mpsc::UnboundedSender<ProbeOutcome>,
    pending: HashSet<(NetworkId, String, String)>,
}

impl std::fmt::Debug for AvatarLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarLoader")
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl AvatarLoader {
    /// Creates a loader that reports probe completions on `outcome_tx`.
    #[must_use]
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        prober: Arc<dyn ImageProbe>,
        outcome_tx: mpsc::UnboundedSender<ProbeOutcome>,
    ) -> Self {
        Self {
            settings,
            prober,
            outcome_tx,
            pending: HashSet::new(),
        }
    }

    /// Applies a `SetUrls` action for `user`.
    ///
    /// Issues at most one probe per (network, nick, URL) at a time; a
    /// duplicate request while one is in flight is dropped.
    pub fn apply(&mut self, network: NetworkId, nick: &str, user: &SharedUser, urls: &AvatarUrls) {
        if !self.settings.preload_avatars() {
            let mut record = user.write();
            record.set_slot(SLOT_SMALL, urls.small());
            record.set_slot(SLOT_LARGE, urls.large());
            self.fill_empty_slots(&mut record);
            debug!(nick = %nick, small = %urls.small(), "committed avatar urls without probing");
            return;
        }

        let key = (network, nick.to_lowercase(), urls.small().to_owned());
        if !self.pending.insert(key) {
            trace!(nick = %nick, url = %urls.small(), "probe already in flight");
            return;
        }

        let prober = Arc::clone(&self.prober);
        let outcome_tx = self.outcome_tx.clone();
        let url = urls.small().to_owned();
        let nick = nick.to_owned();
        debug!(nick = %nick, url = %url, "probing avatar");
        tokio::spawn(async move {
            let ok = match prober.probe(&url).await {
                Ok(()) => true,
                Err(err) => {
                    debug!(nick = %nick, url = %url, error = %err, "avatar probe failed");
                    false
                }
            };
            let _ = outcome_tx.send(ProbeOutcome {
                network,
                nick,
                url,
                ok,
            });
        });
    }

    /// Commits or discards a finished probe.
    ///
    /// The desired URL is re-derived from the user's current account before
    /// anything is written; a probe that no longer matches (the account
    /// changed or logged out mid-flight) is discarded wholesale, fallback
    /// included. `user` is `None` when the host already forgot the user.
    pub fn finish(&mut self, outcome: &ProbeOutcome, user: Option<&SharedUser>) {
        self.pending.remove(&(
            outcome.network,
            outcome.nick.to_lowercase(),
            outcome.url.clone(),
        ));

        let Some(user) = user else {
            trace!(nick = %outcome.nick, "probed user no longer known");
            return;
        };

        let mut record = user.write();
        let Some(account) = record.account().map(str::to_owned) else {
            debug!(nick = %outcome.nick, "discarding probe for logged-out user");
            return;
        };

        let current = AvatarUrls::derive(&self.settings.avatars_url(), &account);
        if current.small() != outcome.url {
            debug!(
                nick = %outcome.nick,
                probed = %outcome.url,
                current = %current.small(),
                "discarding stale probe"
            );
            return;
        }

        if outcome.ok {
            record.set_slot(SLOT_SMALL, current.small());
            record.set_slot(SLOT_LARGE, current.large());
            debug!(nick = %outcome.nick, small = %current.small(), "committed avatar urls");
        } else {
            self.fill_empty_slots(&mut record);
        }
    }

    /// Number of probes currently in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Sets the configured default image on any UI slot still empty. Slots
    /// holding a value, whoever wrote it, are left alone.
    fn fill_empty_slots(&self, record: &mut UserRecord) {
        let fallback = self.settings.default_avatar_url();
        if fallback.is_empty() {
            return;
        }
        for slot in [SLOT_SMALL, SLOT_LARGE] {
            if record.slot(slot).is_empty() {
                record.set_slot(slot, fallback.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ProbeError;
    use crate::domain::ports::keys;
    use crate::domain::ports::mocks::{MockImageProbe, MockSettings};

    const NET: NetworkId = NetworkId(1);

    fn loader_with(
        settings: MockSettings,
        probe: MockImageProbe,
    ) -> (AvatarLoader, mpsc::UnboundedReceiver<ProbeOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (AvatarLoader::new(Arc::new(settings), Arc::new(probe), tx), rx)
    }

    fn alice() -> SharedUser {
        UserRecord::new("Alice").with_account("Alice").into_shared()
    }

    fn alice_urls() -> AvatarUrls {
        AvatarUrls::derive("/avatars/", "Alice")
    }

    #[tokio::test]
    async fn test_commits_immediately_when_preload_disabled() {
        let settings = MockSettings::new().with(keys::PRELOAD_AVATARS, false);
        let (mut loader, _rx) = loader_with(settings, MockImageProbe::new());
        let user = alice();

        loader.apply(NET, "Alice", &user, &alice_urls());

        assert_eq!(user.read().slot(SLOT_SMALL), "/avatars/small/alice.png");
        assert_eq!(user.read().slot(SLOT_LARGE), "/avatars/large/alice.png");
        assert_eq!(loader.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_probe_success_commits_both_slots() {
        let mut probe = MockImageProbe::new();
        probe.expect_probe().returning(|_| Ok(()));
        let (mut loader, mut rx) = loader_with(MockSettings::new(), probe);
        let user = alice();

        loader.apply(NET, "Alice", &user, &alice_urls());
        assert_eq!(user.read().slot(SLOT_SMALL), "");
        assert_eq!(loader.pending_count(), 1);

        let outcome = rx.recv().await.unwrap();
        assert!(outcome.ok);
        loader.finish(&outcome, Some(&user));

        assert_eq!(user.read().slot(SLOT_SMALL), "/avatars/small/alice.png");
        assert_eq!(user.read().slot(SLOT_LARGE), "/avatars/large/alice.png");
        assert_eq!(loader.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_probe_failure_fills_defaults_for_empty_slots() {
        let settings = MockSettings::new().with(keys::DEFAULT_AVATAR_URL, "/static/default.png");
        let mut probe = MockImageProbe::new();
        probe.expect_probe().returning(|_| Err(ProbeError::Status(404)));
        let (mut loader, mut rx) = loader_with(settings, probe);
        let user = alice();

        loader.apply(NET, "Alice", &user, &alice_urls());
        let outcome = rx.recv().await.unwrap();
        assert!(!outcome.ok);
        loader.finish(&outcome, Some(&user));

        assert_eq!(user.read().slot(SLOT_SMALL), "/static/default.png");
        assert_eq!(user.read().slot(SLOT_LARGE), "/static/default.png");
    }

    #[tokio::test]
    async fn test_probe_failure_without_default_leaves_slots_alone() {
        let mut probe = MockImageProbe::new();
        probe.expect_probe().returning(|_| Err(ProbeError::Status(404)));
        let (mut loader, mut rx) = loader_with(MockSettings::new(), probe);
        let user = alice();

        loader.apply(NET, "Alice", &user, &alice_urls());
        let outcome = rx.recv().await.unwrap();
        loader.finish(&outcome, Some(&user));

        assert_eq!(user.read().slot(SLOT_SMALL), "");
        assert_eq!(user.read().slot(SLOT_LARGE), "");
    }

    #[tokio::test]
    async fn test_fallback_never_overwrites_foreign_value() {
        let settings = MockSettings::new().with(keys::DEFAULT_AVATAR_URL, "/static/default.png");
        let mut probe = MockImageProbe::new();
        probe.expect_probe().returning(|_| Err(ProbeError::network("refused")));
        let (mut loader, mut rx) = loader_with(settings, probe);
        let user = alice();
        user.write().set_slot(SLOT_LARGE, "/cdn/x.png");

        loader.apply(NET, "Alice", &user, &alice_urls());
        let outcome = rx.recv().await.unwrap();
        loader.finish(&outcome, Some(&user));

        assert_eq!(user.read().slot(SLOT_SMALL), "/static/default.png");
        assert_eq!(user.read().slot(SLOT_LARGE), "/cdn/x.png");
    }

    #[tokio::test]
    async fn test_stale_probe_is_discarded_after_account_change() {
        let mut probe = MockImageProbe::new();
        probe.expect_probe().returning(|_| Ok(()));
        let (mut loader, mut rx) = loader_with(MockSettings::new(), probe);
        let user = alice();

        loader.apply(NET, "Alice", &user, &alice_urls());
        user.write().set_account(Some("Bob"));

        let outcome = rx.recv().await.unwrap();
        loader.finish(&outcome, Some(&user));

        assert_eq!(user.read().slot(SLOT_SMALL), "");
        assert_eq!(user.read().slot(SLOT_LARGE), "");
        assert_eq!(loader.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_probe_for_logged_out_user_is_discarded() {
        let settings = MockSettings::new().with(keys::DEFAULT_AVATAR_URL, "/static/default.png");
        let mut probe = MockImageProbe::new();
        probe.expect_probe().returning(|_| Ok(()));
        let (mut loader, mut rx) = loader_with(settings, probe);
        let user = alice();

        loader.apply(NET, "Alice", &user, &alice_urls());
        user.write().set_account(None);

        let outcome = rx.recv().await.unwrap();
        loader.finish(&outcome, Some(&user));

        // No commit and no fallback either; the probe simply dies.
        assert_eq!(user.read().slot(SLOT_SMALL), "");
        assert_eq!(user.read().slot(SLOT_LARGE), "");
    }

    #[tokio::test]
    async fn test_duplicate_probe_is_not_issued() {
        let mut probe = MockImageProbe::new();
        probe.expect_probe().returning(|_| Ok(()));
        let (mut loader, mut rx) = loader_with(MockSettings::new(), probe);
        let user = alice();

        loader.apply(NET, "Alice", &user, &alice_urls());
        loader.apply(NET, "Alice", &user, &alice_urls());
        assert_eq!(loader.pending_count(), 1);

        let outcome = rx.recv().await.unwrap();
        loader.finish(&outcome, Some(&user));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unknown_user_still_releases_pending() {
        let mut probe = MockImageProbe::new();
        probe.expect_probe().returning(|_| Ok(()));
        let (mut loader, mut rx) = loader_with(MockSettings::new(), probe);
        let user = alice();

        loader.apply(NET, "Alice", &user, &alice_urls());
        let outcome = rx.recv().await.unwrap();
        loader.finish(&outcome, None);

        assert_eq!(loader.pending_count(), 0);
        assert_eq!(user.read().slot(SLOT_SMALL), "");
    }
}
