//! Input handling: per-frame key polling and cursor/scroll events mapped onto the camera.
//!
//! # Invariants
//! - Exactly one [`Input`] owns and mutates the [`Camera`](radiosity_camera::Camera).
//! - The first cursor sample after construction (or a tracking reset) never turns the camera.
//! - Toggle controls flip once per press, however long the key is held.

pub mod control;
pub mod input;
pub mod replay;
pub mod timer;

pub use control::{Control, CursorMode, InputHost};
pub use input::{Input, MouseTracking};
pub use replay::{InputEvent, ReplayReport, ScriptError, ScriptedHost, load_script, parse_script, replay};
pub use timer::FrameTimer;
