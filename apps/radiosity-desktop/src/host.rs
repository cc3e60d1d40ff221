use crate::bindings::KeyBindings;
use radiosity_input::{Control, CursorMode, Input, InputHost};
use std::collections::HashSet;
use std::sync::Arc;
use winit::keyboard::KeyCode;
use winit::window::{CursorGrabMode, Window};

/// The winit window seen through [`InputHost`].
///
/// Key state is accumulated from keyboard events and polled once per frame.
pub struct DesktopHost {
    bindings: KeyBindings,
    keys_held: HashSet<KeyCode>,
    window: Option<Arc<Window>>,
    close_requested: bool,
}

impl DesktopHost {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            keys_held: HashSet::new(),
            window: None,
            close_requested: false,
        }
    }

    pub fn attach(&mut self, window: Arc<Window>) {
        self.window = Some(window);
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }
    }

    /// Drop all held keys, e.g. when focus is lost and releases will not arrive.
    pub fn release_all(&mut self) {
        self.keys_held.clear();
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

impl InputHost for DesktopHost {
    fn is_pressed(&self, control: Control) -> bool {
        self.bindings
            .key(control)
            .is_some_and(|key| self.keys_held.contains(&key))
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        if let Some(window) = &self.window {
            apply_cursor_mode(window, mode);
        }
    }
}

/// Cursor position handed to [`Input::mouse_callback`].
///
/// While the cursor is captured the position is virtual: it is advanced by raw
/// device motion, so looking around is not bounded by the window edges and
/// keeps working where the grab locks the cursor in place. Window cursor
/// positions only drive the camera while the cursor is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pointer {
    x: f64,
    y: f64,
}

impl Pointer {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn cursor_moved(&mut self, input: &mut Input, x: f64, y: f64) {
        if input.cursor_mode() != CursorMode::Normal {
            return;
        }
        self.x = x;
        self.y = y;
        input.mouse_callback(x, y);
    }

    pub fn device_motion(&mut self, input: &mut Input, dx: f64, dy: f64) {
        if input.cursor_mode() != CursorMode::Captured {
            return;
        }
        self.x += dx;
        self.y += dy;
        input.mouse_callback(self.x, self.y);
    }
}

pub fn apply_cursor_mode(window: &Window, mode: CursorMode) {
    match mode {
        CursorMode::Captured => {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
            if let Err(e) = grabbed {
                tracing::warn!("cursor grab unavailable: {e}");
            }
            window.set_cursor_visible(false);
        }
        CursorMode::Normal => {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                tracing::warn!("cursor release failed: {e}");
            }
            window.set_cursor_visible(true);
        }
    }
}
