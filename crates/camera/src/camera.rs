use glam::{Mat4, Vec3};
use radiosity_common::CameraConfig;

/// Largest pitch magnitude, in degrees, when pitch is constrained.
///
/// Looking straight up or down would make the front vector parallel to
/// world-up and collapse the look-at basis.
pub const PITCH_LIMIT: f32 = 89.0;

/// Discrete movement commands accepted by [`Camera::process_keyboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    /// Along world-up, independent of pitch.
    Up,
    Down,
}

/// Free-fly camera with position, yaw/pitch orientation and a field-of-view zoom.
///
/// Angles are stored in degrees. Orientation and zoom are private so that the
/// pitch clamp, zoom clamp and basis recomputation run on every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// World units per second.
    pub movement_speed: f32,
    /// Degrees per pixel of cursor travel.
    pub mouse_sensitivity: f32,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    zoom_min: f32,
    zoom_max: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    pub const WORLD_UP: Vec3 = Vec3::Y;

    /// Camera at `position` with default orientation (looking down -Z) and tuning.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Build a camera from configuration, clamping pitch and zoom into range.
    pub fn from_config(config: &CameraConfig) -> Self {
        let zoom_min = config.zoom_min.min(config.zoom_max);
        let zoom_max = config.zoom_max.max(config.zoom_min);
        if config.pitch.abs() > PITCH_LIMIT || !(zoom_min..=zoom_max).contains(&config.zoom) {
            tracing::debug!(
                pitch = config.pitch,
                zoom = config.zoom,
                "camera config out of range, clamping"
            );
        }
        let mut camera = Self {
            position: config.position,
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            yaw: config.yaw,
            pitch: config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            zoom: config.zoom.clamp(zoom_min, zoom_max),
            zoom_min,
            zoom_max,
        };
        camera.update_vectors();
        camera
    }

    /// Replace the orientation. Pitch is clamped.
    pub fn with_yaw_pitch(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
        self
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_range(&self) -> (f32, f32) {
        (self.zoom_min, self.zoom_max)
    }

    /// Move along the camera basis by `movement_speed * delta_time`.
    ///
    /// `delta_time` is expected to be non-negative; zero leaves the camera in place.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += Self::WORLD_UP * velocity,
            CameraMovement::Down => self.position -= Self::WORLD_UP * velocity,
        }
    }

    /// Turn by cursor offsets in pixels. Positive `yoffset` looks up.
    pub fn process_mouse_movement(&mut self, xoffset: f32, yoffset: f32, constrain_pitch: bool) {
        self.yaw += xoffset * self.mouse_sensitivity;
        self.pitch += yoffset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Narrow the field of view by `yoffset` degrees (scrolling up zooms in).
    pub fn process_mouse_scroll(&mut self, yoffset: f32) {
        self.zoom = (self.zoom - yoffset).clamp(self.zoom_min, self.zoom_max);
    }

    /// Right-handed look-at transform from the current position along `front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, Self::WORLD_UP)
    }

    /// Right-handed perspective projection using the zoom as vertical field of view.
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, near, far)
    }

    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();

        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        // Horizontal and perpendicular to front for any pitch, so the basis never degenerates.
        self.right = Vec3::new(-yaw_sin, 0.0, yaw_cos);
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(cam: &Camera) {
        for v in [cam.front(), cam.up(), cam.right()] {
            assert!((v.length() - 1.0).abs() < 1e-4, "not unit: {v:?}");
        }
        assert!(cam.front().dot(cam.up()).abs() < 1e-4);
        assert!(cam.front().dot(cam.right()).abs() < 1e-4);
        assert!(cam.up().dot(cam.right()).abs() < 1e-4);
    }

    /// Deterministic pseudo-random offsets in `[-scale, scale)`.
    fn offsets(seed: u64, scale: f32) -> impl Iterator<Item = f32> {
        let mut state = seed;
        std::iter::from_fn(move || {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let unit = (state >> 40) as f32 / (1u64 << 24) as f32;
            Some((unit * 2.0 - 1.0) * scale)
        })
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::ZERO);
        assert!((cam.front() - Vec3::NEG_Z).length() < EPS);
        assert!((cam.right() - Vec3::X).length() < EPS);
        assert!((cam.up() - Vec3::Y).length() < EPS);
        assert_eq!(cam.zoom(), 45.0);
        assert_eq!(cam.movement_speed, 2.5);
        assert_eq!(cam.mouse_sensitivity, 0.1);
    }

    #[test]
    fn forward_moves_speed_times_dt() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        let start = cam.position;
        let front = cam.front();
        cam.process_keyboard(CameraMovement::Forward, 0.5);
        let moved = cam.position - start;
        assert!((moved.length() - 1.25).abs() < EPS);
        assert!((moved.normalize() - front).length() < EPS);
    }

    #[test]
    fn zero_delta_time_is_noop() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0)).with_yaw_pitch(30.0, 20.0);
        let before = cam.clone();
        for dir in [
            CameraMovement::Forward,
            CameraMovement::Backward,
            CameraMovement::Left,
            CameraMovement::Right,
            CameraMovement::Up,
            CameraMovement::Down,
        ] {
            cam.process_keyboard(dir, 0.0);
        }
        assert_eq!(cam, before);
    }

    #[test]
    fn opposite_movements_cancel() {
        let mut cam = Camera::default().with_yaw_pitch(12.0, -33.0);
        cam.process_keyboard(CameraMovement::Left, 0.3);
        cam.process_keyboard(CameraMovement::Right, 0.3);
        cam.process_keyboard(CameraMovement::Forward, 0.7);
        cam.process_keyboard(CameraMovement::Backward, 0.7);
        assert!(cam.position.length() < EPS);
    }

    #[test]
    fn up_ignores_pitch() {
        let mut cam = Camera::default().with_yaw_pitch(-90.0, 60.0);
        cam.process_keyboard(CameraMovement::Up, 1.0);
        assert!((cam.position - Vec3::new(0.0, 2.5, 0.0)).length() < EPS);
    }

    #[test]
    fn mouse_movement_scales_by_sensitivity() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(10.0, 5.0, true);
        assert!((cam.yaw() - (-90.0 + 1.0)).abs() < 1e-4);
        assert!((cam.pitch() - 0.5).abs() < EPS);
        assert_orthonormal(&cam);
    }

    #[test]
    fn pitch_stays_constrained_for_any_sequence() {
        let mut cam = Camera::default();
        for (i, dy) in offsets(7, 5_000.0).take(2_000).enumerate() {
            cam.process_mouse_movement((i % 13) as f32, dy, true);
            assert!(cam.pitch().abs() <= PITCH_LIMIT, "pitch {}", cam.pitch());
            assert_orthonormal(&cam);
        }
    }

    #[test]
    fn pitch_saturates_at_limit() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(0.0, 1.0e6, true);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        cam.process_mouse_movement(0.0, -1.0e6, true);
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn unconstrained_pitch_keeps_basis_orthonormal() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(0.0, 1_200.0, false);
        assert!((cam.pitch() - 120.0).abs() < 1e-3);
        assert_orthonormal(&cam);
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(3_600.0, 0.0, true);
        assert!((cam.yaw() - 270.0).abs() < 1e-3);
        // 270 degrees of yaw points the same way as -90.
        assert!((cam.front() - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn scroll_zooms_in_and_clamps() {
        let mut cam = Camera::default();
        cam.process_mouse_scroll(4.0);
        assert_eq!(cam.zoom(), 41.0);
        cam.process_mouse_scroll(-100.0);
        assert_eq!(cam.zoom(), 45.0);
        cam.process_mouse_scroll(100.0);
        assert_eq!(cam.zoom(), 1.0);
    }

    #[test]
    fn zoom_stays_in_range_for_any_sequence() {
        let mut cam = Camera::default();
        let (min, max) = cam.zoom_range();
        for dy in offsets(99, 30.0).take(2_000) {
            cam.process_mouse_scroll(dy);
            assert!((min..=max).contains(&cam.zoom()), "zoom {}", cam.zoom());
        }
    }

    #[test]
    fn view_matrix_is_pure() {
        let mut cam = Camera::new(Vec3::new(3.0, -1.0, 4.0));
        cam.process_mouse_movement(123.0, -45.0, true);
        let snapshot = cam.clone();
        let a = cam.view_matrix();
        let b = cam.view_matrix();
        assert_eq!(a, b);
        assert_eq!(cam, snapshot);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let cam = Camera::new(Vec3::new(3.0, -1.0, 4.0)).with_yaw_pitch(10.0, 25.0);
        let view = cam.view_matrix();
        assert!(view.transform_point3(cam.position).length() < 1e-4);
        // Camera looks down its local -Z.
        let ahead = view.transform_point3(cam.position + cam.front());
        assert!((ahead - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn from_config_clamps_out_of_range_values() {
        let config = CameraConfig {
            pitch: 120.0,
            zoom: 90.0,
            ..CameraConfig::default()
        };
        let cam = Camera::from_config(&config);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        assert_eq!(cam.zoom(), 45.0);
        assert_orthonormal(&cam);
    }

    #[test]
    fn projection_uses_zoom_as_fov() {
        let mut cam = Camera::default();
        let wide = cam.projection_matrix(1.0, 0.1, 100.0);
        cam.process_mouse_scroll(20.0);
        let narrow = cam.projection_matrix(1.0, 0.1, 100.0);
        // Narrower field of view magnifies: larger focal scale on the diagonal.
        assert!(narrow.col(1).y > wide.col(1).y);
        let expected = 1.0 / (45.0_f32.to_radians() * 0.5).tan();
        assert!((wide.col(1).y - expected).abs() < 1e-4);
    }
}
