use radiosity_camera::CameraMovement;
use serde::{Deserialize, Serialize};

/// A logical control the host can report as pressed.
///
/// Physical keys are bound to controls by the host, so [`Input`](crate::Input)
/// never sees raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    /// Ask the host loop to terminate.
    Quit,
    /// Flip between a captured (hidden) and a free cursor.
    ToggleCursor,
    /// Flip wireframe rendering.
    ToggleWireframe,
}

impl Control {
    pub const ALL: [Control; 9] = [
        Control::Forward,
        Control::Backward,
        Control::Left,
        Control::Right,
        Control::Up,
        Control::Down,
        Control::Quit,
        Control::ToggleCursor,
        Control::ToggleWireframe,
    ];

    /// The camera movement this control drives, if it is a movement control.
    pub fn movement(self) -> Option<CameraMovement> {
        match self {
            Control::Forward => Some(CameraMovement::Forward),
            Control::Backward => Some(CameraMovement::Backward),
            Control::Left => Some(CameraMovement::Left),
            Control::Right => Some(CameraMovement::Right),
            Control::Up => Some(CameraMovement::Up),
            Control::Down => Some(CameraMovement::Down),
            Control::Quit | Control::ToggleCursor | Control::ToggleWireframe => None,
        }
    }
}

/// How the host should present the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    /// Hidden and held by the window; cursor motion only drives the camera.
    #[default]
    Captured,
    /// Visible and free to leave the window.
    Normal,
}

impl CursorMode {
    pub fn toggled(self) -> Self {
        match self {
            CursorMode::Captured => CursorMode::Normal,
            CursorMode::Normal => CursorMode::Captured,
        }
    }
}

/// The windowing layer as seen by [`Input`](crate::Input).
pub trait InputHost {
    /// Whether the key bound to `control` is currently held.
    fn is_pressed(&self, control: Control) -> bool;

    /// Ask the host loop to stop after the current frame.
    fn request_close(&mut self);

    /// Apply a cursor presentation mode.
    fn set_cursor_mode(&mut self, mode: CursorMode);
}
