use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::config::Config;
use crate::error::ConfigError;
use crate::model::SolarSystem;

mod camera;
mod controller;
mod scene;
mod skybox;
mod textures;
mod utils;
mod view;

pub use camera::OrbitCamera;
pub use skybox::SkyFace;
pub use textures::{LoadedTexture, TextureLoader, TextureOutcome, TextureTarget};

pub struct Simulation {
    view: View,
    controller: Controller,
}

impl Simulation {
    pub fn new(config: &Config, window: &mut Window) -> Result<Self, ConfigError> {
        let system = SolarSystem::new(
            config.system.bodies.clone(),
            config.animation.spin_mode,
        )?;
        tracing::info!(
            "Starting with {} bodies, spin mode {:?}",
            config.system.bodies.len(),
            system.spin_mode()
        );

        Ok(Self {
            view: View::new(system, config, window),
            controller: Controller::new(&config.animation),
        })
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            self.controller.process_event(event, &mut self.view);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        self.view.receive_textures();
        // Paused frames still render, and the camera keeps responding
        self.view.update_state(self.controller.animation());
        self.view.prerender_scene(window, &self.controller);
        self.controller.increment_frame_counter();
    }
}
