//! Port for looking up user records held by the host client.

use crate::domain::entities::{NetworkId, SharedUser};

/// Port into the host client's per-network user registry.
///
/// Lookups take the nick as the host reported it in an event; adapters
/// decide how to normalize case. `None` means the user is already gone,
/// which the engine treats as a silent skip.
pub trait UserDirectory: Send + Sync {
    /// Resolves a nick on a network to its shared record.
    fn user(&self, network: NetworkId, nick: &str) -> Option<SharedUser>;
}
