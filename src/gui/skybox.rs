use std::f32::consts::{FRAC_PI_2, PI};
use std::rc::Rc;

use kiss3d::resource::Texture;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkyFace {
    Right,
    Left,
    Up,
    Down,
    Front,
    Back,
}

impl SkyFace {
    /// Same order as a cube map: +x, -x, +y, -y, +z, -z.
    pub const ALL: [SkyFace; 6] = [
        SkyFace::Right,
        SkyFace::Left,
        SkyFace::Up,
        SkyFace::Down,
        SkyFace::Front,
        SkyFace::Back,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            SkyFace::Right => "rt",
            SkyFace::Left => "lf",
            SkyFace::Up => "up",
            SkyFace::Down => "dn",
            SkyFace::Front => "ft",
            SkyFace::Back => "bk",
        }
    }

    /// Unit vector from the center of the box to this face.
    pub fn direction(self) -> Vector3<f32> {
        match self {
            SkyFace::Right => Vector3::x(),
            SkyFace::Left => -Vector3::x(),
            SkyFace::Up => Vector3::y(),
            SkyFace::Down => -Vector3::y(),
            SkyFace::Front => Vector3::z(),
            SkyFace::Back => -Vector3::z(),
        }
    }

    /// Moves a quad from the xy plane (facing +z) onto this face of a box
    /// with the given half-width, turned to face the center.
    pub fn placement(self, distance: f32) -> Isometry3<f32> {
        let rotation = match self {
            SkyFace::Right => UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -FRAC_PI_2),
            SkyFace::Left => UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2),
            SkyFace::Up => UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2),
            SkyFace::Down => UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2),
            SkyFace::Front => UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI),
            SkyFace::Back => UnitQuaternion::identity(),
        };
        Isometry3::from_parts(Translation3::from(self.direction() * distance), rotation)
    }
}

/// Six textured quads boxed around the camera. The box moves with the eye so
/// it always reads as infinitely far away.
pub struct Skybox {
    root: SceneNode,
    faces: Vec<(SkyFace, SceneNode)>,
}

impl Skybox {
    pub fn new(window: &mut Window, distance: f32) -> Self {
        let mut root = window.add_group();
        let size = 2.0 * distance;

        let faces = SkyFace::ALL
            .iter()
            .map(|&face| {
                let mut quad = root.add_quad(size, size, 1, 1);
                quad.set_local_transformation(face.placement(distance));
                quad.enable_backface_culling(false);
                // Stays black until its texture arrives
                quad.set_color(0.0, 0.0, 0.0);
                (face, quad)
            })
            .collect();

        Skybox { root, faces }
    }

    pub fn set_texture(&mut self, face: SkyFace, texture: Rc<Texture>) {
        for (f, quad) in self.faces.iter_mut() {
            if *f == face {
                quad.set_color(1.0, 1.0, 1.0);
                quad.set_texture(texture.clone());
            }
        }
    }

    pub fn follow(&mut self, eye: &Point3<f32>) {
        self.root.set_local_translation(Translation3::from(eye.coords));
    }
}
