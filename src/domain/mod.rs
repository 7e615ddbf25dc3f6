//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Host event definitions.
pub mod events;
/// Port definitions.
pub mod ports;
/// Stateless decision services.
pub mod services;

pub use entities::{NetworkId, SharedUser, UserRecord};
pub use errors::ProbeError;
pub use events::NetworkEvent;
pub use ports::{ImageProbe, SettingsProvider, UserDirectory};
