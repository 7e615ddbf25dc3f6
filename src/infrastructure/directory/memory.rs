//! In-memory user directory.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::entities::{NetworkId, SharedUser, UserRecord};
use crate::domain::ports::UserDirectory;

/// Per-network user registry backed by a map.
///
/// Nicks are keyed lowercased, so lookups are case-insensitive the way nick
/// comparison behaves on the wire. Hosts with their own registry implement
/// [`UserDirectory`] over it directly; this one serves standalone embeddings
/// and tests.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    users: RwLock<HashMap<(NetworkId, String), SharedUser>>,
}

impl MemoryDirectory {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a record, returning its shared handle.
    pub fn insert(&self, network: NetworkId, record: UserRecord) -> SharedUser {
        let key = (network, record.nick().to_lowercase());
        let user = record.into_shared();
        self.users.write().insert(key, Arc::clone(&user));
        user
    }

    /// Forgets a record; later events for it become silent no-ops.
    pub fn remove(&self, network: NetworkId, nick: &str) {
        self.users.write().remove(&(network, nick.to_lowercase()));
    }

    /// Number of known users across all networks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Whether no users are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl UserDirectory for MemoryDirectory {
    fn user(&self, network: NetworkId, nick: &str) -> Option<SharedUser> {
        self.users
            .read()
            .get(&(network, nick.to_lowercase()))
            .cloned()
    }
}
