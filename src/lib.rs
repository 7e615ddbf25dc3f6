//! Avatar synchronization engine for chat-client extensions.
//!
//! Reconciles login, join, wholist, and avatar-record events against each
//! user's cached avatar slots, deciding when to derive fresh image URLs,
//! verify they load, and commit them without clobbering values written by
//! other extensions sharing the same records.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use avatarsync::application::EventRouter;
//! use avatarsync::domain::entities::{NetworkId, UserRecord};
//! use avatarsync::domain::events::NetworkEvent;
//! use avatarsync::infrastructure::{AvatarSettings, HttpImageProbe, MemoryDirectory};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Arc::new(AvatarSettings::default());
//! let directory = Arc::new(MemoryDirectory::new());
//! let probe = Arc::new(HttpImageProbe::new()?.with_origin("https://chat.example.org"));
//!
//! directory.insert(NetworkId(1), UserRecord::new("alice").with_account("alice"));
//!
//! let (router, events) = EventRouter::new(settings, directory, probe);
//! tokio::spawn(router.run());
//!
//! events.send(NetworkEvent::AccountChanged {
//!     network: NetworkId(1),
//!     nick: "alice".into(),
//!     account: Some("alice".into()),
//! })?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer orchestrating the avatar pipeline.
pub mod application;
/// Domain layer containing entities, events, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = "avatarsync";
