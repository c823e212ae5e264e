//! Playback, camera and controls options with TOML preset support.
//!
//! Options serialize to/from TOML so a viewer can ship named presets
//! alongside its scene exports. Every section uses `#[serde(default)]`, so
//! a preset may override a single field.

mod animation;
mod camera;
mod controls;

use std::path::Path;

pub use animation::{AnimationOptions, DEFAULT_DURATION_MS};
pub use camera::CameraOptions;
pub use controls::{ControlsOptions, DeviceTarget};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ShowreelError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Keyframe playback parameters.
    pub animation: AnimationOptions,
    /// Camera projection defaults and model framing.
    pub camera: CameraOptions,
    /// Orbit controls tuning.
    pub controls: ControlsOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ShowreelError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ShowreelError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ShowreelError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ShowreelError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(ShowreelError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
