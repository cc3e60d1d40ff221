//! Application configuration loaded from an optional YAML file.
//!
//! Every section falls back to its default when omitted, so a file only needs
//! to name the values it overrides:
//! ```yaml
//! window:
//!   width: 1280
//!   height: 720
//! camera:
//!   movement_speed: 5.0
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub timing: TimingConfig,
    pub controls: ControlsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Radiosity Renderer".into(),
            width: 800,
            height: 600,
        }
    }
}

impl WindowConfig {
    /// Width over height of the initial window.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Initial camera state and tuning. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: 45.0,
            zoom_min: 1.0,
            zoom_max: 45.0,
        }
    }
}

/// Perspective clip planes. The field of view comes from the camera zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Upper bound on a single frame delta, in seconds.
    pub max_frame_delta: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_frame_delta: 0.1,
        }
    }
}

/// Physical key names bound to each logical control.
///
/// Names follow winit's `KeyCode` variant names (`KeyW`, `Space`, `Escape`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub up: String,
    pub down: String,
    pub quit: String,
    pub toggle_cursor: String,
    pub toggle_wireframe: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            forward: "KeyW".into(),
            backward: "KeyS".into(),
            left: "KeyA".into(),
            right: "KeyD".into(),
            up: "Space".into(),
            down: "ControlLeft".into(),
            quit: "Escape".into(),
            toggle_cursor: "KeyN".into(),
            toggle_wireframe: "KeyM".into(),
        }
    }
}

impl ControlsConfig {
    /// `(control name, key name)` pairs in declaration order.
    pub fn bindings(&self) -> [(&'static str, &str); 9] {
        [
            ("forward", self.forward.as_str()),
            ("backward", self.backward.as_str()),
            ("left", self.left.as_str()),
            ("right", self.right.as_str()),
            ("up", self.up.as_str()),
            ("down", self.down.as_str()),
            ("quit", self.quit.as_str()),
            ("toggle_cursor", self.toggle_cursor.as_str()),
            ("toggle_wireframe", self.toggle_wireframe.as_str()),
        ]
    }
}

impl AppConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml(&data)?;
        tracing::debug!("loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window", "width and height must be non-zero"));
        }

        let cam = &self.camera;
        if !cam.position.is_finite() {
            return Err(invalid("camera.position", "must be finite"));
        }
        if !(cam.yaw.is_finite() && cam.pitch.is_finite()) {
            return Err(invalid("camera.yaw/pitch", "must be finite"));
        }
        if !(cam.movement_speed.is_finite() && cam.movement_speed >= 0.0) {
            return Err(invalid("camera.movement_speed", "must be >= 0"));
        }
        if !cam.mouse_sensitivity.is_finite() {
            return Err(invalid("camera.mouse_sensitivity", "must be finite"));
        }
        if !(cam.zoom_min > 0.0 && cam.zoom_min <= cam.zoom_max && cam.zoom_max < 180.0) {
            return Err(invalid(
                "camera.zoom_min/zoom_max",
                format!(
                    "need 0 < zoom_min <= zoom_max < 180, got [{}, {}]",
                    cam.zoom_min, cam.zoom_max
                ),
            ));
        }
        if !cam.zoom.is_finite() {
            return Err(invalid("camera.zoom", "must be finite"));
        }

        let proj = &self.projection;
        if !(proj.near > 0.0 && proj.far > proj.near) {
            return Err(invalid(
                "projection",
                format!("need 0 < near < far, got near={} far={}", proj.near, proj.far),
            ));
        }

        let max_delta = self.timing.max_frame_delta;
        if max_delta.is_nan() || max_delta <= 0.0 {
            return Err(invalid("timing.max_frame_delta", "must be > 0"));
        }

        let bindings = self.controls.bindings();
        for (i, (name, key)) in bindings.iter().enumerate() {
            if key.trim().is_empty() {
                return Err(invalid("controls", format!("`{name}` has no key bound")));
            }
            if let Some((other, _)) = bindings[..i].iter().find(|(_, k)| k == key) {
                return Err(invalid(
                    "controls",
                    format!("`{key}` is bound to both `{other}` and `{name}`"),
                ));
            }
        }

        Ok(())
    }
}
