//! Engine-wide settings.
//!
//! Stored as JSON in `<config dir>/pointer_interactions/settings.json`. Missing
//! fields take their defaults, so older files keep loading.

use crate::constants::{
    MIN_DT_SECS, POINTER_MOVE_TOLERANCE, RESIZE_MARGIN_MOUSE, RESIZE_MARGIN_TOUCH,
    SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};
use crate::error::InteractionResult;
use crate::interaction::PointerType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Frame per-event deltas are measured in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaSource {
    #[default]
    Page,
    Client,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Client distance a pressed pointer must move before an action starts
    pub pointer_move_tolerance: f64,
    pub delta_source: DeltaSource,
    pub resize_margin_mouse: f64,
    pub resize_margin_touch: f64,
    /// Floor for the velocity time step, in seconds
    pub min_dt_secs: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            pointer_move_tolerance: POINTER_MOVE_TOLERANCE,
            delta_source: DeltaSource::Page,
            resize_margin_mouse: RESIZE_MARGIN_MOUSE,
            resize_margin_touch: RESIZE_MARGIN_TOUCH,
            min_dt_secs: MIN_DT_SECS,
        }
    }
}

impl InteractionSettings {
    pub fn from_json(json: &str) -> InteractionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> InteractionResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        debug!(path = %path.display(), "Loaded interaction settings");
        Ok(settings)
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> InteractionResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        debug!(path = %path.display(), "Saved interaction settings");
        Ok(())
    }

    /// Load from `path`, falling back to defaults if it is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Unreadable settings, using defaults");
            Self::default()
        })
    }

    /// Resize grab margin for a pointer type
    pub fn resize_margin(&self, pointer_type: PointerType) -> f64 {
        match pointer_type {
            PointerType::Touch => self.resize_margin_touch,
            PointerType::Mouse | PointerType::Pen => self.resize_margin_mouse,
        }
    }
}

/// `<config dir>/pointer_interactions/settings.json`, if the platform has a
/// config dir
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}
