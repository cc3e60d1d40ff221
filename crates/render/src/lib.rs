//! Rendering adapter: the demo scene and the view a draw layer consumes.
//!
//! # Invariants
//! - Renderers never mutate the camera or the scene.
//! - Render views derive entirely from camera state, aspect and clip planes.

mod renderer;
mod scene;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use scene::{Light, Scene, SceneObject};

pub fn crate_info() -> &'static str {
    "radiosity-render v0.1.0"
}
