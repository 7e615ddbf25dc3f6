//! Chat user record shared between the host client and the engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Identifier of a chat network connection within the host client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkId(pub u64);

impl NetworkId {
    /// The raw host-assigned identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NetworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NetworkId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A user entity as the host client sees it.
///
/// The host owns creation and destruction of records; this engine only
/// writes avatar slot values and the `avatar_checked` marker. Slot values
/// use the empty string for "unset", and a missing slot key reads the same
/// as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    nick: String,
    account: Option<String>,
    avatar: BTreeMap<String, String>,
    avatar_checked: bool,
}

impl UserRecord {
    /// Creates a fresh record with no account and no avatar slots.
    #[must_use]
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            account: None,
            avatar: BTreeMap::new(),
            avatar_checked: false,
        }
    }

    /// Builder form of [`UserRecord::set_account`].
    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.set_account(Some(&account.into()));
        self
    }

    /// The display-cased nick the host knows this user by.
    #[must_use]
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// The authenticated account name, or `None` when not logged in.
    #[must_use]
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Updates the account name. Hosts that signal logout with an empty
    /// string are normalized to `None`.
    pub fn set_account(&mut self, account: Option<&str>) {
        self.account = account
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
    }

    /// Current value of an avatar slot; empty string when unset.
    #[must_use]
    pub fn slot(&self, name: &str) -> &str {
        self.avatar.get(name).map_or("", String::as_str)
    }

    /// Writes an avatar slot value; the empty string marks it unset.
    pub fn set_slot(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.avatar.insert(name.into(), value.into());
    }

    /// All slot entries, unset ones included, in stable name order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.avatar
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub(crate) fn slots_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.avatar
            .iter_mut()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Whether an avatar decision has already been made for this user.
    /// Wholist processing only touches users with this marker set.
    #[must_use]
    pub const fn avatar_checked(&self) -> bool {
        self.avatar_checked
    }

    /// Records that an avatar decision has been made for this user.
    pub fn mark_avatar_checked(&mut self) {
        self.avatar_checked = true;
    }

    /// Wraps the record for sharing with the host client.
    #[must_use]
    pub fn into_shared(self) -> SharedUser {
        Arc::new(RwLock::new(self))
    }
}

/// Handle to a user record shared between the host and the engine.
pub type SharedUser = Arc<RwLock<UserRecord>>;
