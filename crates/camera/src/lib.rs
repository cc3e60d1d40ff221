//! Free-fly camera driven by movement, look and zoom deltas.
//!
//! # Invariants
//! - The front/up/right basis is orthonormal after every mutation.
//! - Pitch stays within the pitch limit whenever constraining is requested.
//! - Zoom stays within its configured range after every mutation.

mod camera;

pub use camera::{Camera, CameraMovement, PITCH_LIMIT};
