//! Port for reading host client settings.

/// A host setting value.
///
/// The host keeps its settings store untyped; the engine understands strings
/// and booleans and treats anything else as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SettingValue {
    Str(String),
    Bool(bool),
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Setting keys the engine reads from the host.
pub mod keys {
    /// Root URL the avatar server is reachable under.
    pub const AVATARS_URL: &str = "avatars_url";
    /// Whether derived URLs are verified by an image probe before commit.
    pub const PRELOAD_AVATARS: &str = "preload_avatars";
    /// Image applied to slots still empty after a failed probe.
    pub const DEFAULT_AVATAR_URL: &str = "default_avatar_url";
    /// Master switch for the whole engine.
    pub const SET_AVATARS: &str = "set_avatars";
}

/// Port into the host client's settings store.
///
/// Only `setting` needs an implementation; the typed accessors coerce raw
/// values and fall back to the engine defaults on a missing or wrong-typed
/// entry.
pub trait SettingsProvider: Send + Sync {
    /// Raw value of a setting, or `None` when the host has no entry.
    fn setting(&self, key: &str) -> Option<SettingValue>;

    /// Root URL avatars are served under, trailing slash included.
    fn avatars_url(&self) -> String {
        match self.setting(keys::AVATARS_URL) {
            Some(SettingValue::Str(url)) => url,
            _ => "/avatars/".to_owned(),
        }
    }

    /// Whether derived URLs must load successfully before being committed.
    fn preload_avatars(&self) -> bool {
        match self.setting(keys::PRELOAD_AVATARS) {
            Some(SettingValue::Bool(enabled)) => enabled,
            _ => true,
        }
    }

    /// Fallback image for slots a failed probe left empty. An empty string
    /// (the default) disables the fallback.
    fn default_avatar_url(&self) -> String {
        match self.setting(keys::DEFAULT_AVATAR_URL) {
            Some(SettingValue::Str(url)) => url,
            _ => String::new(),
        }
    }

    /// Master switch; when off the engine ignores every event.
    fn set_avatars(&self) -> bool {
        match self.setting(keys::SET_AVATARS) {
            Some(SettingValue::Bool(enabled)) => enabled,
            _ => true,
        }
    }
}
