use std::time::Instant;

use image::DynamicImage;
use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::resource::TextureManager;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3};

use super::camera::OrbitCamera;
use super::controller::Controller;
use super::scene::SceneObjects;
use super::textures::TextureLoader;
use crate::config::Config;
use crate::model::{AnimationState, Button, SolarSystem};

pub struct View {
    // Object state
    system: SolarSystem,
    scene: SceneObjects,
    loader: TextureLoader,
    start: Instant,
    // Camera
    camera: OrbitCamera,
}

impl View {
    pub fn new(system: SolarSystem, config: &Config, window: &mut Window) -> Self {
        let mut loader = TextureLoader::new();
        let scene = SceneObjects::build(window, &system, &config.system, &mut loader);
        let camera = OrbitCamera::new(&config.camera, window.width(), window.height());

        View {
            system,
            scene,
            loader,
            start: Instant::now(),
            camera,
        }
    }

    /// Milliseconds since the view was created. This is the time sample that
    /// drives every orbit.
    fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn update_state(&mut self, animation: &AnimationState) {
        let time_ms = self.elapsed_ms();
        self.system.advance(time_ms, animation);
        self.scene.sync(&self.system);
    }

    /// Hands any textures that finished loading over to the GPU and onto
    /// their meshes.
    pub fn receive_textures(&mut self) {
        for outcome in self.loader.drain() {
            match outcome.result {
                Ok(texture) => {
                    let name = texture.path.to_string_lossy().into_owned();
                    let dimensions = texture.dimensions;
                    let mut image = texture.image;
                    // The manager only hands out FnMut access, so move the pixels out by hand
                    let handle = TextureManager::get_global_manager(|tm| {
                        let image = std::mem::replace(&mut image, DynamicImage::new_rgba8(0, 0));
                        tm.add_image(image, &name)
                    });
                    self.scene.apply_texture(outcome.target, handle);
                    tracing::info!(
                        "Loaded texture {} ({}x{})",
                        name,
                        dimensions.0,
                        dimensions.1
                    );
                }
                Err(err) => {
                    tracing::warn!("{}; {:?} stays untextured", err, outcome.target);
                }
            }
        }
    }

    pub fn set_camera_keys_enabled(&mut self, enabled: bool) {
        self.camera.set_keys_enabled(enabled);
    }

    pub fn prerender_scene(&mut self, window: &mut Window, controller: &Controller) {
        self.scene.follow_camera(&self.camera.eye());

        let default_font = kiss3d::text::Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        window.draw_text(
            &self.hud_text(controller),
            &Point2::origin(),
            60.0,
            &default_font,
            &text_color,
        );
    }

    fn hud_text(&self, controller: &Controller) -> String {
        let button = match controller.buttons().visible_button() {
            Button::Pause => "[Space] Pause",
            Button::Play => "[Space] Play",
        };

        let input = controller.speed_input();
        let cursor = if input.is_focused() { "_" } else { "" };

        let mut text = format!(
            "{}
[Tab] Speed offset: {}{} (using {})
Rings: {}
FPS: {:.0}",
            button,
            input.text(),
            cursor,
            controller.animation().speed_offset,
            self.scene.num_rings(),
            controller.fps(),
        );
        if self.loader.pending() > 0 {
            text.push_str(&format!("\nLoading textures: {}", self.loader.pending()));
        }
        text
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, None, None)
    }
}
