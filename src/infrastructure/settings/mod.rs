mod avatar_settings;

pub use avatar_settings::{AvatarSettings, SettingsError};
