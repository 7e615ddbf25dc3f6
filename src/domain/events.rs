//! Host client events the engine reacts to.

use crate::domain::entities::NetworkId;

/// An event forwarded by the host client.
///
/// Variants carry the bare facts the engine needs; the host keeps the rest
/// of its event payloads to itself. `name` returns the identifier the event
/// travels under on the host's internal bus, which is what the structured
/// logs report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NetworkEvent {
    /// A user's authentication state changed. `account` is `None` (or empty,
    /// which reads the same) on logout.
    AccountChanged {
        network: NetworkId,
        nick: String,
        account: Option<String>,
    },
    /// A user joined a channel we are in.
    ChannelJoined { network: NetworkId, nick: String },
    /// The server delivered the member list of a channel.
    UserListReceived {
        network: NetworkId,
        nicks: Vec<String>,
    },
    /// The backing store created a fresh avatar record for an account.
    AvatarRecordCreated { network: NetworkId, nick: String },
}

impl NetworkEvent {
    /// The host bus name of this event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AccountChanged { .. } => "irc.account",
            Self::ChannelJoined { .. } => "irc.join",
            Self::UserListReceived { .. } => "irc.wholist",
            Self::AvatarRecordCreated { .. } => "user.avatar",
        }
    }

    /// The network connection the event arrived on.
    #[must_use]
    pub const fn network(&self) -> NetworkId {
        match self {
            Self::AccountChanged { network, .. }
            | Self::ChannelJoined { network, .. }
            | Self::UserListReceived { network, .. }
            | Self::AvatarRecordCreated { network, .. } => *network,
        }
    }
}
