use std::path::Path;
use std::time::Duration;

use moonraker_thumbnail::models::DEFAULT_MOONRAKER_PORT;
use moonraker_thumbnail::MoonrakerConfig;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Connection settings for the Klipper/Moonraker host, stored as TOML
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PrinterSettings {
    pub host: String,
    pub port: u16,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_MOONRAKER_PORT,
            connect_timeout_secs: 5,
            request_timeout_secs: 15,
        }
    }
}

impl PrinterSettings {
    /// Converts to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Loads settings from `path`; a missing file gives the defaults
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_moonraker_config(&self) -> MoonrakerConfig {
        MoonrakerConfig {
            host: self.host.clone(),
            port: self.port,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
