use glam::Vec3;
use radiosity_common::Transform;

/// A cube instance placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    /// Linear RGB.
    pub color: Vec3,
    /// Drawn unlit, as the visible light fixture.
    pub emissive: bool,
}

impl SceneObject {
    fn cube(name: &str, position: Vec3, scale: Vec3, color: Vec3) -> Self {
        Self {
            name: name.into(),
            transform: Transform::from_position(position).with_scale(scale),
            color,
            emissive: false,
        }
    }
}

/// Point light used to shade the lit objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
}

/// A fixed arrangement of unit cubes plus one point light.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    objects: Vec<SceneObject>,
    light: Light,
    clear_color: [f32; 4],
}

impl Scene {
    /// Closed room with red and green side walls, two boxes and a ceiling light.
    pub fn demo_room() -> Self {
        let grey = Vec3::splat(211.0 / 255.0);
        let floor_scale = Vec3::new(10.0, 1.0, 10.0);
        let side_scale = Vec3::new(1.0, 10.0, 10.0);

        let mut tall_box = SceneObject::cube(
            "tall box",
            Vec3::new(0.4, -0.7, -5.5),
            Vec3::new(0.2, 0.7, 0.2),
            Vec3::new(0.0, 148.0 / 255.0, 1.0),
        );
        tall_box.transform = tall_box.transform.with_axis_angle(Vec3::Y, 0.8);

        let objects = vec![
            SceneObject::cube("ground", Vec3::new(0.0, -2.0, -5.0), floor_scale, grey),
            SceneObject::cube("ceiling", Vec3::new(0.0, 2.0, -5.0), floor_scale, grey),
            SceneObject::cube("left wall", Vec3::new(-2.0, 0.0, -5.0), side_scale, Vec3::X),
            SceneObject::cube("right wall", Vec3::new(2.0, 0.0, -5.0), side_scale, Vec3::Y),
            SceneObject::cube(
                "back wall",
                Vec3::new(0.0, 0.0, -7.0),
                Vec3::new(10.0, 10.0, 1.0),
                grey,
            ),
            tall_box,
            SceneObject::cube(
                "small box",
                Vec3::new(0.4, -0.7, -4.0),
                Vec3::splat(0.1),
                Vec3::new(0.0, 1.0, 1.0),
            ),
            SceneObject {
                emissive: true,
                ..SceneObject::cube(
                    "light panel",
                    Vec3::new(0.0, 1.0, -5.0),
                    Vec3::new(0.3, 0.1, 0.3),
                    Vec3::ONE,
                )
            },
        ];

        Self {
            objects,
            light: Light {
                position: Vec3::new(0.0, 0.7, -5.0),
                color: Vec3::ONE,
            },
            clear_color: [0.05, 0.05, 0.55, 1.0],
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn light(&self) -> Light {
        self.light
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
