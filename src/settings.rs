//! Bot settings
//!
//! Stored as JSON next to the binary. A missing or unreadable file means
//! defaults, never a hard failure.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bot::Projection;
use crate::consts::{DEFAULT_VIEW_ANGLE_X, DEFAULT_VIEW_ANGLE_Y};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io: {0}")]
    Io(#[from] io::Error),
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Bot settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    // === Viewport ===
    pub screen_width: u32,
    pub screen_height: u32,
    /// Horizontal view extent in world units
    pub view_angle_x: f32,
    /// Vertical view extent in world units
    pub view_angle_y: f32,

    // === Threats ===
    /// Radius multiplier applied to every threat
    pub threat_scale: f32,
    /// Treat the map edges as threats once the map size is known
    pub avoid_map_edges: bool,

    /// Name sent with the spawn command
    pub player_name: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            view_angle_x: DEFAULT_VIEW_ANGLE_X,
            view_angle_y: DEFAULT_VIEW_ANGLE_Y,
            threat_scale: 1.0,
            avoid_map_edges: true,
            player_name: String::new(),
        }
    }
}

impl BotSettings {
    pub fn projection(&self) -> Projection {
        Projection {
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            view_angle_x: self.view_angle_x,
            view_angle_y: self.view_angle_y,
        }
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| serde_json::from_str(&json).map_err(SettingsError::from));

        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("agario-bot-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_defaults_match_projection_defaults() {
        let settings = BotSettings::default();
        assert_eq!(settings.projection(), Projection::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let settings = BotSettings {
            threat_scale: 1.5,
            avoid_map_edges: false,
            player_name: "bot".into(),
            ..BotSettings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(BotSettings::load_from(&path), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = temp_path("missing");
        assert_eq!(BotSettings::load_from(&path), BotSettings::default());
    }

    #[test]
    fn test_partial_and_broken_files() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "threat_scale": 2.0 }"#).unwrap();
        let settings = BotSettings::load_from(&path);
        assert_eq!(settings.threat_scale, 2.0);
        assert_eq!(settings.screen_width, 1920);

        fs::write(&path, "not json").unwrap();
        assert_eq!(BotSettings::load_from(&path), BotSettings::default());
        let _ = fs::remove_file(&path);
    }
}
