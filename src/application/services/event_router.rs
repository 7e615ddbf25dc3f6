//! Routes host events into avatar evaluations.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::application::services::avatar_loader::{AvatarLoader, ProbeOutcome};
use crate::domain::entities::{AvatarAction, AvatarUrls, NetworkId};
use crate::domain::events::NetworkEvent;
use crate::domain::ports::{ImageProbe, SettingsProvider, UserDirectory};
use crate::domain::services::{AvatarOwnership, AvatarPolicy};

/// A write queued during an event pass, applied once the pass ends.
///
/// The host may be mid-render while its event handlers run, so the pass
/// itself only reads; every record write goes through this queue.
#[derive(Debug)]
enum DeferredMutation {
    MarkChecked {
        network: NetworkId,
        nick: String,
    },
    Apply {
        network: NetworkId,
        nick: String,
        urls: AvatarUrls,
    },
    ClearOwned {
        network: NetworkId,
        nick: String,
    },
}

/// Subscribes the engine to host events and drives the whole pipeline.
///
/// One router instance owns the loader and both channel receivers; events
/// and probe completions are interleaved on a single task, so a handler
/// always runs to completion before the next one starts.
pub struct EventRouter {
    settings: Arc<dyn SettingsProvider>,
    directory: Arc<dyn UserDirectory>,
    loader: AvatarLoader,
    deferred: Vec<DeferredMutation>,
    event_rx: mpsc::UnboundedReceiver<NetworkEvent>,
    outcome_rx: mpsc::UnboundedReceiver<ProbeOutcome>,
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("loader", &self.loader)
            .field("deferred", &self.deferred.len())
            .finish_non_exhaustive()
    }
}

impl EventRouter {
    /// Creates the router and the sender the host delivers events with.
    #[must_use]
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        directory: Arc<dyn UserDirectory>,
        prober: Arc<dyn ImageProbe>,
    ) -> (Self, mpsc::UnboundedSender<NetworkEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let loader = AvatarLoader::new(Arc::clone(&settings), prober, outcome_tx);

        let router = Self {
            settings,
            directory,
            loader,
            deferred: Vec::new(),
            event_rx,
            outcome_rx,
        };
        (router, event_tx)
    }

    /// Drives the engine until the host drops its event sender.
    ///
    /// Checks the master switch once on entry, the same way the host only
    /// registers event handlers for an enabled extension. When the host
    /// hangs up, still-outstanding probes are abandoned unapplied.
    pub async fn run(mut self) {
        if !self.settings.set_avatars() {
            info!("avatar syncing disabled by settings");
            return;
        }
        info!("avatar engine started");

        loop {
            tokio::select! {
                event = self.event_rx.recv() => {
                    let Some(event) = event else { break };
                    self.process(&event);
                }
                Some(outcome) = self.outcome_rx.recv() => {
                    self.handle_outcome(&outcome);
                }
            }
        }

        info!("avatar engine stopped");
    }

    /// Handles one host event: decisions are computed synchronously against
    /// current record state, and the resulting writes are applied after the
    /// pass is over.
    pub fn process(&mut self, event: &NetworkEvent) {
        debug!(event = event.name(), network = %event.network(), "handling host event");
        self.handle(event);
        self.flush();
    }

    fn handle(&mut self, event: &NetworkEvent) {
        match event {
            NetworkEvent::AccountChanged {
                network,
                nick,
                account,
            } => {
                let logged_in = account.as_deref().is_some_and(|name| !name.is_empty());
                if !logged_in {
                    self.deferred.push(DeferredMutation::ClearOwned {
                        network: *network,
                        nick: nick.clone(),
                    });
                }
                // A fresh login always re-derives. After a logout the record
                // has no account and the evaluation settles to a no-op.
                self.evaluate(*network, nick, true);
            }
            NetworkEvent::ChannelJoined { network, nick } => {
                self.evaluate(*network, nick, false);
            }
            NetworkEvent::UserListReceived { network, nicks } => {
                for nick in nicks {
                    let checked = self
                        .directory
                        .user(*network, nick)
                        .is_some_and(|user| user.read().avatar_checked());
                    if checked {
                        self.evaluate(*network, nick, false);
                    } else {
                        trace!(network = %network, nick = %nick, "wholist user never resolved; left for its own events");
                    }
                }
            }
            NetworkEvent::AvatarRecordCreated { network, nick } => {
                self.evaluate(*network, nick, false);
            }
        }
    }

    /// Runs the policy for one user and queues whatever it decides.
    fn evaluate(&mut self, network: NetworkId, nick: &str, force: bool) {
        let Some(user) = self.directory.user(network, nick) else {
            trace!(network = %network, nick = %nick, "event for unknown user ignored");
            return;
        };

        let base = self.settings.avatars_url();
        let record = user.read();
        let action = AvatarPolicy::decide(&record, &base, force);
        let logged_in = record.account().is_some();
        drop(record);

        if logged_in {
            self.deferred.push(DeferredMutation::MarkChecked {
                network,
                nick: nick.to_owned(),
            });
        }

        match action {
            AvatarAction::Skip => {
                trace!(network = %network, nick = %nick, force, "nothing to do");
            }
            AvatarAction::SetUrls(urls) => {
                debug!(network = %network, nick = %nick, small = %urls.small(), force, "avatar urls derived");
                self.deferred.push(DeferredMutation::Apply {
                    network,
                    nick: nick.to_owned(),
                    urls,
                });
            }
        }
    }

    /// Applies the writes queued by the current pass, in queue order.
    fn flush(&mut self) {
        for mutation in std::mem::take(&mut self.deferred) {
            match mutation {
                DeferredMutation::MarkChecked { network, nick } => {
                    if let Some(user) = self.directory.user(network, &nick) {
                        user.write().mark_avatar_checked();
                    }
                }
                DeferredMutation::Apply {
                    network,
                    nick,
                    urls,
                } => {
                    if let Some(user) = self.directory.user(network, &nick) {
                        self.loader.apply(network, &nick, &user, &urls);
                    }
                }
                DeferredMutation::ClearOwned { network, nick } => {
                    if let Some(user) = self.directory.user(network, &nick) {
                        AvatarOwnership::clear_owned(&self.settings.avatars_url(), &mut user.write());
                        debug!(network = %network, nick = %nick, "cleared owned avatar slots");
                    }
                }
            }
        }
    }

    fn handle_outcome(&mut self, outcome: &ProbeOutcome) {
        let user = self.directory.user(outcome.network, &outcome.nick);
        self.loader.finish(outcome, user.as_ref());
    }
}
