//! Viewer Settings
//!
//! All tunables of the viewer live in [`ViewerSettings`]. Every field has a
//! default, so a settings file only needs the keys it wants to override.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rigview::config::ViewerSettings;
//!
//! // Defaults: the five bundled animations, keys 1-5, 0.5 s fade-in
//! let settings = ViewerSettings::default();
//!
//! // Or from disk, overriding only what the file names
//! let settings = ViewerSettings::from_json_file("viewer.json")?
//!     .with_title("Animation Preview");
//! ```
//!
//! A minimal settings file:
//!
//! ```json
//! {
//!   "initial_asset": "Praying",
//!   "fade_duration": 0.25,
//!   "catalog": { "root": "assets/models", "format": "json", "extension": "json" }
//! }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::assets::AssetCatalog;
use crate::errors::{Result, ViewerError};
use crate::viewer::input::KeyBindings;

/// Default cross-fade length, in seconds, when a clip is activated.
pub const DEFAULT_FADE_DURATION: f32 = 0.5;

// ---------------------------------------------------------------------------
// CameraSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 1.0,
            far: 2000.0,
            position: Vec3::new(100.0, 200.0, 300.0),
            target: Vec3::new(0.0, 100.0, 0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// StageSettings
// ---------------------------------------------------------------------------

/// The persistent part of the scene: backdrop, lights, floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    /// Packed `0xRRGGBB` background and fog colour.
    pub background: u32,
    pub fog_near: f32,
    pub fog_far: f32,
    pub light_intensity: f32,
    pub shadows: bool,
    pub ground_size: f32,
    pub ground_color: u32,
    pub grid_divisions: u32,
    pub grid_opacity: f32,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            background: 0x00a0_a0a0,
            fog_near: 200.0,
            fog_far: 1000.0,
            light_intensity: 5.0,
            shadows: true,
            ground_size: 2000.0,
            ground_color: 0x0099_9999,
            grid_divisions: 20,
            grid_opacity: 0.2,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewerSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,

    pub catalog: AssetCatalog,
    /// Asset shown at startup. Falls back to the first catalog entry.
    pub initial_asset: Option<String>,

    /// Fade-in length applied whenever a clip is activated.
    pub fade_duration: f32,
    pub keys: KeyBindings,

    pub camera: CameraSettings,
    pub stage: StageSettings,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            title: "Rigview".to_string(),
            width: 1280,
            height: 720,
            catalog: AssetCatalog::default(),
            initial_asset: None,
            fade_duration: DEFAULT_FADE_DURATION,
            keys: KeyBindings::default(),
            camera: CameraSettings::default(),
            stage: StageSettings::default(),
        }
    }
}

impl ViewerSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: AssetCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_initial_asset(mut self, name: impl Into<String>) -> Self {
        self.initial_asset = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_fade_duration(mut self, seconds: f32) -> Self {
        self.fade_duration = seconds;
        self
    }

    /// The asset to load at startup, if the catalog has any.
    #[must_use]
    pub fn startup_asset(&self) -> Option<&str> {
        self.initial_asset
            .as_deref()
            .or_else(|| self.catalog.get(0))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fade_duration >= 0.0 && self.fade_duration.is_finite()) {
            return Err(ViewerError::InvalidSettings(format!(
                "fade_duration must be a non-negative number, got {}",
                self.fade_duration
            )));
        }
        if let Some(name) = &self.initial_asset
            && !self.catalog.contains(name)
        {
            return Err(ViewerError::InvalidSettings(format!(
                "initial_asset '{name}' is not in the catalog"
            )));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(ViewerError::InvalidSettings(
                "camera clip planes must satisfy 0 < near < far".to_string(),
            ));
        }
        Ok(())
    }
}
