//! Run options
//!
//! Physics tuning is compiled in (`crate::consts`); these only control how
//! a run is hosted. Read from `WATER_SWIMMER_SETTINGS` as JSON.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SUBSTEPS;

/// Host-level options for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the texture files
    pub asset_dir: PathBuf,
    /// Food layout seed; taken from the clock when unset
    pub seed: Option<u64>,
    /// Catch-up steps allowed per frame
    pub max_substeps: u32,
    /// Target frames per second for the host loop
    pub frame_rate: u32,
    /// Stop after this many frames even if the run is still going
    pub max_frames: Option<u64>,
    /// Frames to keep presenting after the run ends, before quitting
    pub linger_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            seed: None,
            max_substeps: MAX_SUBSTEPS,
            frame_rate: 60,
            max_frames: None,
            linger_frames: 120,
        }
    }
}

impl Settings {
    /// Environment variable the settings JSON is read from
    pub const ENV_VAR: &'static str = "WATER_SWIMMER_SETTINGS";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from the environment, falling back to defaults
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::ENV_VAR);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed {}: {}", Self::ENV_VAR, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Wall-clock seconds per host frame
    pub fn frame_seconds(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}
