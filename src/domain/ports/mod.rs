mod directory_port;
mod probe_port;
mod settings_port;

pub use directory_port::UserDirectory;
pub use probe_port::ImageProbe;
pub use settings_port::{SettingValue, SettingsProvider, keys};
