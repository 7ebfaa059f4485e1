//! Tunable settings for the orrery.
//!
//! Every field has a default matching the stock viewer. An optional JSON file
//! can override any subset of them:
//!
//! ```json
//! {
//!   "focus_duration": 2.0,
//!   "star_count": 2000,
//!   "facts_dir": "assets/facts"
//! }
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::error::SimError;

/// Errors raised while loading a config file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(SimError),
}

/// Scene-wide settings. Inserted as a resource at startup.
#[derive(Resource, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OrreryConfig {
    /// Seconds (real time) a camera focus transition takes
    pub focus_duration: f64,
    /// Focus distance as a multiple of the target's radius
    pub focus_distance_factor: f64,
    /// Speed multiplier at startup
    pub initial_speed: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Default camera position (looking at the origin)
    pub camera_start: [f64; 3],
    pub camera_min_distance: f64,
    pub camera_max_distance: f64,
    pub camera_fov_deg: f32,
    pub star_count: usize,
    pub star_seed: u64,
    /// Inner and outer radius of the starfield shell
    pub star_shell: [f32; 2],
    /// Starfield spin in radians per real second while running
    pub star_spin: f32,
    /// Directory holding per-body fact JSON files
    pub facts_dir: String,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            focus_duration: 1.5,
            focus_distance_factor: 5.0,
            initial_speed: 1.0,
            min_speed: 0.001,
            max_speed: 100.0,
            camera_start: [0.0, 70.0, 70.0],
            camera_min_distance: 5.0,
            camera_max_distance: 100.0,
            camera_fov_deg: 75.0,
            star_count: 5000,
            star_seed: 0x5EED_0F_57A5,
            star_shell: [100.0, 300.0],
            // 0.0001 rad per frame at 60 fps
            star_spin: 0.006,
            facts_dir: "assets/facts".to_string(),
        }
    }
}

impl OrreryConfig {
    /// Location checked by `main` for an override file.
    pub const DEFAULT_PATH: &'static str = "assets/orrery.json";

    /// Parse and validate a JSON override. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load `path` if it exists, falling back to defaults on any problem.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = |operation: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidInput { operation, value })
            }
        };

        positive("focus_duration", self.focus_duration)?;
        positive("focus_distance_factor", self.focus_distance_factor)?;
        positive("min_speed", self.min_speed)?;
        positive("max_speed", self.max_speed)?;
        positive("camera_min_distance", self.camera_min_distance)?;
        positive("camera_fov_deg", self.camera_fov_deg as f64)?;

        if self.max_speed < self.min_speed {
            return Err(SimError::InvalidInput {
                operation: "max_speed",
                value: self.max_speed,
            });
        }
        if !(self.min_speed..=self.max_speed).contains(&self.initial_speed) {
            return Err(SimError::InvalidInput {
                operation: "initial_speed",
                value: self.initial_speed,
            });
        }
        if !(self.camera_max_distance >= self.camera_min_distance) {
            return Err(SimError::InvalidInput {
                operation: "camera_max_distance",
                value: self.camera_max_distance,
            });
        }
        if self.camera_start.iter().any(|c| !c.is_finite()) {
            return Err(SimError::InvalidInput {
                operation: "camera_start",
                value: f64::NAN,
            });
        }
        let [inner, outer] = self.star_shell;
        if !(inner >= 0.0 && inner <= outer && outer.is_finite()) {
            return Err(SimError::InvalidInput {
                operation: "star_shell",
                value: inner as f64,
            });
        }
        Ok(())
    }

    pub fn camera_start(&self) -> bevy::math::DVec3 {
        bevy::math::DVec3::from_array(self.camera_start)
    }
}
