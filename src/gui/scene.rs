use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kiss3d::light::Light;
use kiss3d::ncollide3d::procedural;
use kiss3d::resource::{Mesh, Texture};
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point3, Translation3, UnitQuaternion, Vector3};

use super::skybox::{SkyFace, Skybox};
use super::textures::{TextureLoader, TextureTarget};
use super::utils::annulus;
use crate::config::SystemConfig;
use crate::model::{Body, BodyID, SolarSystem};

/// Orbit rings are this much thinner on the inside than their orbit.
const RING_WIDTH: f32 = 0.1;
const RING_SEGMENTS: usize = 100;

/// Everything that got added to the window's scene graph. Nodes are created
/// once and only moved afterwards.
pub struct SceneObjects {
    body_spheres: HashMap<BodyID, SceneNode>,
    rings: Vec<SceneNode>,
    skybox: Skybox,
}

impl SceneObjects {
    /// Puts the whole system into the window and kicks off every texture
    /// load. Returns before any texture has arrived.
    pub fn build(
        window: &mut Window,
        system: &SolarSystem,
        config: &SystemConfig,
        loader: &mut TextureLoader,
    ) -> Self {
        window.set_background_color(0.0, 0.0, 0.0);
        window.set_light(Light::Absolute(Point3::origin()));

        let skybox = Skybox::new(window, config.skybox.distance);
        for face in SkyFace::ALL {
            loader.request(
                TextureTarget::Sky(face),
                config.skybox_face_path(face.suffix()),
            );
        }

        let mut body_spheres = HashMap::new();
        for body in system.bodies() {
            let sphere = Self::create_body_object(window, body);
            loader.request(TextureTarget::Body(body.id), config.texture_path(&body.info));
            body_spheres.insert(body.id, sphere);
        }

        let rings = system
            .orbiting_bodies()
            .filter_map(|body| body.orbit())
            .map(|orbit| Self::create_ring(window, orbit.radius as f32))
            .collect::<Vec<_>>();

        tracing::info!(
            "Built scene with {} bodies and {} orbit rings",
            body_spheres.len(),
            rings.len()
        );

        let mut objects = SceneObjects {
            body_spheres,
            rings,
            skybox,
        };
        objects.sync(system);
        objects
    }

    fn create_body_object(window: &mut Window, body: &Body) -> SceneNode {
        let info = &body.info;
        let mut mesh = procedural::sphere(
            2.0 * info.radius,
            info.width_segments,
            info.height_segments,
            true,
        );

        // The light lives inside the center body, so turn its normals around
        // to have it lit evenly from within.
        if info.orbit.is_none() {
            if let Some(normals) = mesh.normals.as_mut() {
                for n in normals.iter_mut() {
                    *n = -*n;
                }
            }
        }

        let mut sphere = window.add_trimesh(mesh, Vector3::from_element(1.0));
        sphere.set_color(1.0, 1.0, 1.0);
        sphere
    }

    fn create_ring(window: &mut Window, radius: f32) -> SceneNode {
        let data = annulus(radius, radius - RING_WIDTH, RING_SEGMENTS);
        let mesh = Mesh::new(
            data.coords,
            data.faces,
            Some(data.normals),
            Some(data.uvs),
            false,
        );

        let mut ring = window.add_mesh(Rc::new(RefCell::new(mesh)), Vector3::from_element(1.0));
        ring.set_color(1.0, 1.0, 1.0);
        ring.enable_backface_culling(false);
        ring
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn apply_texture(&mut self, target: TextureTarget, texture: Rc<Texture>) {
        match target {
            TextureTarget::Body(id) => {
                if let Some(sphere) = self.body_spheres.get_mut(&id) {
                    sphere.set_texture(texture);
                }
            }
            TextureTarget::Sky(face) => self.skybox.set_texture(face, texture),
        }
    }

    /// Copies positions and spins from the model onto the scene nodes.
    pub fn sync(&mut self, system: &SolarSystem) {
        for (id, sphere) in self.body_spheres.iter_mut() {
            let body = system.get_body(*id);
            let position: Point3<f32> = nalgebra::convert(body.position);
            sphere.set_local_translation(Translation3::from(position.coords));
            sphere.set_local_rotation(UnitQuaternion::from_axis_angle(
                &Vector3::y_axis(),
                body.spin as f32,
            ));
        }
    }

    pub fn follow_camera(&mut self, eye: &Point3<f32>) {
        self.skybox.follow(eye);
    }
}
