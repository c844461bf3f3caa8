//! Host settings and preferences
//!
//! Loaded from JSON on native builds; the web host always uses defaults.
//! Nothing here changes the number of questions per game.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Host preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed for reproducible runs (random when absent)
    pub seed: Option<u64>,

    // === HUD ===
    /// Show elapsed time while playing
    pub show_timer: bool,
    /// Print right/wrong after each answer
    pub show_feedback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            show_timer: true,
            show_feedback: false,
        }
    }
}

impl Settings {
    /// Environment variable naming an alternate settings file
    pub const PATH_ENV: &'static str = "NUMBER_RUSH_SETTINGS";
    /// Settings file looked up in the working directory
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    const DEFAULT_FILE: &'static str = "number_rush_settings.json";

    /// Seed to use for a new game
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| Self::DEFAULT_FILE.into());
        Self::load_from(&path)
    }

    /// Web stub
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        log::info!("Using default settings");
        Self::default()
    }
}
