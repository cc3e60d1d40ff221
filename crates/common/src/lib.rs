//! Shared types and application configuration.
//!
//! # Invariants
//! - Every configuration section has a usable default.
//! - A loaded configuration is validated before it is handed out.

pub mod config;
pub mod types;

pub use config::{
    AppConfig, CameraConfig, ConfigError, ControlsConfig, ProjectionConfig, TimingConfig,
    WindowConfig,
};
pub use types::Transform;
