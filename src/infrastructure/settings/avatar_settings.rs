//! Settings snapshot parsed from a host-provided document.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ports::{SettingValue, SettingsProvider, keys};

/// Failure to parse a settings document.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SettingsError {
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("json deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Engine settings in document form.
///
/// Hosts with a live settings store implement [`SettingsProvider`] over it
/// directly; this snapshot suits embeddings that configure the engine once
/// from a TOML or JSON fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarSettings {
    /// Root URL the avatar server is reachable under.
    #[serde(default = "default_avatars_url")]
    pub avatars_url: String,

    /// Whether derived URLs are verified by a probe before commit.
    #[serde(default = "default_true")]
    pub preload_avatars: bool,

    /// Fallback image for slots a failed probe left empty. Empty disables
    /// the fallback.
    #[serde(default)]
    pub default_avatar_url: String,

    /// Master switch for the engine.
    #[serde(default = "default_true")]
    pub set_avatars: bool,
}

fn default_avatars_url() -> String {
    "/avatars/".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AvatarSettings {
    fn default() -> Self {
        Self {
            avatars_url: default_avatars_url(),
            preload_avatars: true,
            default_avatar_url: String::new(),
            set_avatars: true,
        }
    }
}

impl AvatarSettings {
    /// Parses settings from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the document does not parse.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Parses settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the document does not parse.
    pub fn from_json_str(content: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(content)?)
    }
}

impl SettingsProvider for AvatarSettings {
    fn setting(&self, key: &str) -> Option<SettingValue> {
        match key {
            keys::AVATARS_URL => Some(SettingValue::Str(self.avatars_url.clone())),
            keys::PRELOAD_AVATARS => Some(SettingValue::Bool(self.preload_avatars)),
            keys::DEFAULT_AVATAR_URL => Some(SettingValue::Str(self.default_avatar_url.clone())),
            keys::SET_AVATARS => Some(SettingValue::Bool(self.set_avatars)),
            _ => None,
        }
    }
}
