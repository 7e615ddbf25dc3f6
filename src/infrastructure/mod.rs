//! Infrastructure layer with external service adapters.

/// User directory adapters.
pub mod directory;
/// HTTP probing.
pub mod http;
/// Settings adapters.
pub mod settings;

pub use directory::MemoryDirectory;
pub use http::HttpImageProbe;
pub use settings::{AvatarSettings, SettingsError};
