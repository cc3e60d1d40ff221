use crate::scene::Scene;
use glam::{Mat4, Vec3};
use radiosity_camera::Camera;
use radiosity_common::ProjectionConfig;
use std::fmt::Write;

/// Everything a draw layer needs from the camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub wireframe: bool,
}

impl RenderView {
    /// Snapshot the camera. The projection takes its field of view from the camera zoom.
    pub fn from_camera(
        camera: &Camera,
        aspect: f32,
        projection: &ProjectionConfig,
        wireframe: bool,
    ) -> Self {
        Self {
            eye: camera.position,
            view: camera.view_matrix(),
            projection: camera.projection_matrix(aspect, projection.near, projection.far),
            fov_degrees: camera.zoom(),
            aspect,
            wireframe,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Whether a world-space point lands inside the view frustum.
    pub fn contains(&self, point: Vec3) -> bool {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return false;
        }
        let ndc = clip.truncate() / clip.w;
        ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && (0.0..=1.0).contains(&ndc.z)
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_camera(
            &Camera::default(),
            4.0 / 3.0,
            &ProjectionConfig::default(),
            false,
        )
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and a view, then produces output. It never
/// mutates either.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `scene` as seen from `view`.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable frame summary.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        let visible = scene
            .objects()
            .iter()
            .filter(|o| view.contains(o.transform.position))
            .count();

        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame (objects={}, visible={}, wireframe={}) ===",
            scene.len(),
            visible,
            view.wireframe
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) fov={:.1} aspect={:.3}",
            view.eye.x, view.eye.y, view.eye.z, view.fov_degrees, view.aspect
        );
        let [r, g, b, _] = scene.clear_color();
        let _ = writeln!(out, "Clear: ({r:.2}, {g:.2}, {b:.2})");
        let light = scene.light();
        let _ = writeln!(
            out,
            "Light: pos=({:.2}, {:.2}, {:.2})",
            light.position.x, light.position.y, light.position.z
        );

        for object in scene.objects() {
            let p = object.transform.position;
            let s = object.transform.scale;
            let _ = writeln!(
                out,
                "  [{}] {:<12} pos=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2}){}",
                if view.contains(p) { "x" } else { " " },
                object.name,
                p.x,
                p.y,
                p.z,
                s.x,
                s.y,
                s.z,
                if object.emissive { " emissive" } else { "" }
            );
        }

        out
    }
}
