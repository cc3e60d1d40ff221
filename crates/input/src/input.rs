use crate::control::{Control, CursorMode, InputHost};
use radiosity_camera::Camera;

/// First-mouse tracking state.
///
/// The last cursor position only exists once tracking has begun, so no offset
/// can ever be computed against an uninitialised position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MouseTracking {
    /// No cursor sample seen yet; the next one is recorded without turning the camera.
    #[default]
    Uninitialized,
    Tracking { last_x: f32, last_y: f32 },
}

/// Rising-edge detector for toggle controls.
#[derive(Debug, Clone, Copy, Default)]
struct Latch {
    held: bool,
}

impl Latch {
    fn rising(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.held;
        self.held = pressed;
        fired
    }
}

/// Translates polled key state and cursor/scroll events into camera commands.
///
/// Owns its [`Camera`] for its whole lifetime; the host reads it back through
/// [`Input::camera`] when building a frame.
#[derive(Debug, Clone)]
pub struct Input {
    camera: Camera,
    cursor_mode: CursorMode,
    wireframe: bool,
    mouse: MouseTracking,
    alive: bool,
    cursor_toggle: Latch,
    wireframe_toggle: Latch,
}

impl Input {
    /// Bind a new input handler to `camera`. The cursor starts captured.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            cursor_mode: CursorMode::Captured,
            wireframe: false,
            mouse: MouseTracking::Uninitialized,
            alive: true,
            cursor_toggle: Latch::default(),
            wireframe_toggle: Latch::default(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn mouse_tracking(&self) -> MouseTracking {
        self.mouse
    }

    /// False once a quit has been requested.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Poll the host's key state once for this frame and issue camera commands.
    ///
    /// Every held movement control moves the camera by `delta_time`. Quit asks
    /// the host to close. Toggle controls act on the frame they are pressed.
    pub fn process_input<H: InputHost + ?Sized>(&mut self, host: &mut H, delta_time: f32) {
        if host.is_pressed(Control::Quit) {
            if self.alive {
                tracing::info!("quit requested");
            }
            self.alive = false;
            host.request_close();
        }

        for control in Control::ALL {
            if let Some(movement) = control.movement() {
                if host.is_pressed(control) {
                    self.camera.process_keyboard(movement, delta_time);
                }
            }
        }

        if self.cursor_toggle.rising(host.is_pressed(Control::ToggleCursor)) {
            let mode = self.toggle_cursor_mode();
            host.set_cursor_mode(mode);
        }

        if self
            .wireframe_toggle
            .rising(host.is_pressed(Control::ToggleWireframe))
        {
            self.wireframe = !self.wireframe;
            tracing::debug!(wireframe = self.wireframe, "wireframe toggled");
        }
    }

    /// Flip the cursor mode and return the new one.
    ///
    /// Re-capturing the cursor restarts mouse tracking so the first sample
    /// after capture does not jump the view.
    pub fn toggle_cursor_mode(&mut self) -> CursorMode {
        self.cursor_mode = self.cursor_mode.toggled();
        if self.cursor_mode == CursorMode::Captured {
            self.reset_mouse_tracking();
        }
        tracing::debug!(mode = ?self.cursor_mode, "cursor mode toggled");
        self.cursor_mode
    }

    /// Forget the last cursor position; the next sample is only recorded.
    pub fn reset_mouse_tracking(&mut self) {
        self.mouse = MouseTracking::Uninitialized;
    }

    /// Cursor moved to `(xpos, ypos)` in window coordinates (y grows downward).
    pub fn mouse_callback(&mut self, xpos: f64, ypos: f64) {
        let (x, y) = (xpos as f32, ypos as f32);
        match self.mouse {
            MouseTracking::Uninitialized => {
                self.mouse = MouseTracking::Tracking {
                    last_x: x,
                    last_y: y,
                };
            }
            MouseTracking::Tracking { last_x, last_y } => {
                let xoffset = x - last_x;
                // Window y grows downward; the camera expects up to be positive.
                let yoffset = last_y - y;
                self.mouse = MouseTracking::Tracking {
                    last_x: x,
                    last_y: y,
                };
                self.camera.process_mouse_movement(xoffset, yoffset, true);
            }
        }
    }

    /// Scroll wheel moved. Only the vertical component is used.
    pub fn scroll_callback(&mut self, _xoffset: f64, yoffset: f64) {
        self.camera.process_mouse_scroll(yoffset as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::ScriptedHost;
    use glam::Vec3;
    use radiosity_camera::PITCH_LIMIT;

    fn input() -> Input {
        Input::new(Camera::default())
    }

    #[test]
    fn new_input_starts_captured_and_alive() {
        let input = input();
        assert!(input.is_alive());
        assert!(!input.wireframe());
        assert_eq!(input.cursor_mode(), CursorMode::Captured);
        assert_eq!(input.mouse_tracking(), MouseTracking::Uninitialized);
    }

    #[test]
    fn first_mouse_sample_is_suppressed() {
        let mut input = input();
        let before = input.camera().clone();
        input.mouse_callback(640.0, 360.0);
        assert_eq!(input.camera(), &before);
        assert_eq!(
            input.mouse_tracking(),
            MouseTracking::Tracking {
                last_x: 640.0,
                last_y: 360.0
            }
        );
    }

    #[test]
    fn second_sample_turns_by_offset() {
        let mut input = input();
        let sensitivity = input.camera().mouse_sensitivity;
        let yaw = input.camera().yaw();
        let pitch = input.camera().pitch();

        input.mouse_callback(200.0, 150.0);
        input.mouse_callback(210.0, 150.0);

        assert!((input.camera().yaw() - (yaw + 10.0 * sensitivity)).abs() < 1e-4);
        assert_eq!(input.camera().pitch(), pitch);
    }

    #[test]
    fn moving_cursor_up_raises_pitch() {
        let mut input = input();
        input.mouse_callback(100.0, 100.0);
        input.mouse_callback(100.0, 80.0);
        assert!(input.camera().pitch() > 0.0);
        assert!((input.camera().pitch() - 20.0 * input.camera().mouse_sensitivity).abs() < 1e-4);
    }

    #[test]
    fn cursor_look_is_pitch_constrained() {
        let mut input = input();
        input.mouse_callback(0.0, 0.0);
        input.mouse_callback(0.0, -1.0e6);
        assert_eq!(input.camera().pitch(), PITCH_LIMIT);
    }

    #[test]
    fn scroll_uses_vertical_component_only() {
        let mut input = input();
        input.scroll_callback(50.0, 0.0);
        assert_eq!(input.camera().zoom(), 45.0);
        input.scroll_callback(0.0, 5.0);
        assert_eq!(input.camera().zoom(), 40.0);
    }

    #[test]
    fn held_forward_moves_camera() {
        let mut input = input();
        let mut host = ScriptedHost::default();
        host.press(Control::Forward);
        input.process_input(&mut host, 0.5);
        assert!((input.camera().position - Vec3::new(0.0, 0.0, -1.25)).length() < 1e-5);

        input.process_input(&mut host, 0.0);
        assert!((input.camera().position - Vec3::new(0.0, 0.0, -1.25)).length() < 1e-5);
    }

    #[test]
    fn held_left_strafes_against_right() {
        let mut input = input();
        let mut host = ScriptedHost::default();
        let right = input.camera().right();
        host.press(Control::Left);
        input.process_input(&mut host, 0.5);
        assert!((input.camera().position - right * -1.25).length() < 1e-5);
        assert!(input.camera().position.x < 0.0);
    }

    #[test]
    fn opposite_controls_cancel() {
        let mut input = input();
        let mut host = ScriptedHost::default();
        host.press(Control::Right);
        host.press(Control::Left);
        host.press(Control::Up);
        host.press(Control::Down);
        input.process_input(&mut host, 1.0);
        assert!(input.camera().position.length() < 1e-5);
    }

    #[test]
    fn no_keys_issue_no_commands() {
        let mut input = input();
        let mut host = ScriptedHost::default();
        let before = input.camera().clone();
        input.process_input(&mut host, 1.0);
        assert_eq!(input.camera(), &before);
        assert!(!host.close_requested());
        assert!(host.cursor_modes().is_empty());
    }

    #[test]
    fn quit_requests_close() {
        let mut input = input();
        let mut host = ScriptedHost::default();
        host.press(Control::Quit);
        input.process_input(&mut host, 0.016);
        assert!(host.close_requested());
        assert!(!input.is_alive());
    }

    #[test]
    fn toggle_fires_once_per_press() {
        let mut input = input();
        let mut host = ScriptedHost::default();
        host.press(Control::ToggleCursor);
        for _ in 0..5 {
            input.process_input(&mut host, 0.016);
        }
        assert_eq!(input.cursor_mode(), CursorMode::Normal);
        assert_eq!(host.cursor_modes(), &[CursorMode::Normal]);
    }

    #[test]
    fn toggling_cursor_twice_restores_mode() {
        let mut input = input();
        let original = input.cursor_mode();
        let mut host = ScriptedHost::default();
        for _ in 0..2 {
            host.press(Control::ToggleCursor);
            input.process_input(&mut host, 0.016);
            host.release(Control::ToggleCursor);
            input.process_input(&mut host, 0.016);
        }
        assert_eq!(input.cursor_mode(), original);
        assert_eq!(host.cursor_modes(), &[CursorMode::Normal, CursorMode::Captured]);
    }

    #[test]
    fn recapture_restarts_mouse_tracking() {
        let mut input = input();
        input.mouse_callback(10.0, 10.0);
        input.toggle_cursor_mode();
        input.mouse_callback(20.0, 10.0);
        assert!(matches!(input.mouse_tracking(), MouseTracking::Tracking { .. }));

        input.toggle_cursor_mode();
        assert_eq!(input.mouse_tracking(), MouseTracking::Uninitialized);
        let yaw = input.camera().yaw();
        input.mouse_callback(500.0, 10.0);
        assert_eq!(input.camera().yaw(), yaw);
    }

    #[test]
    fn wireframe_toggle() {
        let mut input = input();
        let mut host = ScriptedHost::default();
        host.press(Control::ToggleWireframe);
        input.process_input(&mut host, 0.016);
        assert!(input.wireframe());
        host.release(Control::ToggleWireframe);
        input.process_input(&mut host, 0.016);
        assert!(input.wireframe());
        host.press(Control::ToggleWireframe);
        input.process_input(&mut host, 0.016);
        assert!(!input.wireframe());
    }
}
