//! CLI settings with persistence
//!
//! Settings are saved to `~/.config/meshport/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use meshport_core::Severity;
use meshport_render::MaterialConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All CLI settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub assets: AssetSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("meshport"))
    }

    /// Get the default settings file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from `path`, or return defaults if it is missing or malformed
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Material library configuration derived from the asset settings
    pub fn material_config(&self) -> MaterialConfig {
        MaterialConfig {
            default_texture: self.assets.default_texture.clone(),
            strict_textures: self.assets.strict_textures,
        }
    }
}

/// Where assets are read from and how missing textures are handled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Base directory relative scene names are resolved against
    pub root: PathBuf,
    /// Texture bound to materials without one (a white placeholder if unset)
    pub default_texture: Option<String>,
    /// Fail the import when a referenced texture cannot be loaded
    pub strict_textures: bool,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            default_texture: None,
            strict_textures: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: Severity,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: Severity::Info,
        }
    }
}
