use std::f64::consts::TAU;

use nalgebra::Point3;

use super::animation::{AnimationState, SpinMode};
use super::body::{Body, BodyID, BodyInfo};
use crate::error::ConfigError;

/// Spin added to every body on each rendered frame.
pub const SPIN_PER_FRAME: f64 = 0.01;

/// Frame rate at which `SpinMode::Timed` matches `SpinMode::PerFrame`.
const REFERENCE_FRAME_RATE: f64 = 60.0;

/// Checks that a body table describes a drawable system: one fixed body, any
/// number of bodies orbiting it, and sane sizes.
pub fn validate_bodies(bodies: &[BodyInfo]) -> Result<(), ConfigError> {
    let num_fixed = bodies.iter().filter(|b| b.orbit.is_none()).count();
    if num_fixed != 1 {
        return Err(ConfigError::Invalid(format!(
            "expected exactly one body without an orbit, found {}",
            num_fixed
        )));
    }

    for body in bodies {
        if !(body.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "{}: radius must be positive, got {}",
                body.name, body.radius
            )));
        }
        if body.width_segments < 3 || body.height_segments < 2 {
            return Err(ConfigError::Invalid(format!(
                "{}: sphere needs at least 3x2 segments, got {}x{}",
                body.name, body.width_segments, body.height_segments
            )));
        }
        if let Some(orbit) = &body.orbit {
            if !(orbit.radius > 0.0) || !orbit.speed.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{}: orbit needs a positive radius and finite speed, got {:?}",
                    body.name, orbit
                )));
            }
        }
    }

    Ok(())
}

/// The sun and everything going around it.
///
/// Positions are recomputed from the time sample on every unpaused frame, so
/// they never drift. Spin is the only accumulated quantity.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    bodies: Vec<Body>,
    center_id: BodyID,
    spin_mode: SpinMode,
    last_time_ms: Option<f64>,
}

impl SolarSystem {
    pub fn new(infos: Vec<BodyInfo>, spin_mode: SpinMode) -> Result<Self, ConfigError> {
        validate_bodies(&infos)?;

        let bodies: Vec<Body> = infos
            .into_iter()
            .enumerate()
            .map(|(i, info)| Body::new(BodyID(i), info))
            .collect();
        let center_id = bodies
            .iter()
            .find(|b| b.orbit().is_none())
            .map(|b| b.id)
            .ok_or_else(|| ConfigError::Invalid("no fixed body".to_owned()))?;

        let mut system = SolarSystem {
            bodies,
            center_id,
            spin_mode,
            last_time_ms: None,
        };
        // Everyone starts on the +x side of the sun
        system.revolve(0.0, 0.0);
        Ok(system)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn orbiting_bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.orbit().is_some())
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn center(&self) -> &Body {
        self.get_body(self.center_id)
    }

    pub fn find_body(&self, name: &str) -> Option<&Body> {
        self.bodies
            .iter()
            .find(|b| b.info.name.eq_ignore_ascii_case(name))
    }

    pub fn spin_mode(&self) -> SpinMode {
        self.spin_mode
    }

    /// Runs one frame at the given time sample. Paused frames change nothing
    /// about the bodies.
    pub fn advance(&mut self, time_ms: f64, state: &AnimationState) {
        let dt_ms = match self.last_time_ms {
            Some(last) => f64::max(time_ms - last, 0.0),
            None => 0.0,
        };
        self.last_time_ms = Some(time_ms);

        if state.paused {
            return;
        }

        self.spin(dt_ms);
        self.revolve(time_ms, state.speed_offset);
    }

    fn spin(&mut self, dt_ms: f64) {
        let delta = match self.spin_mode {
            SpinMode::PerFrame => SPIN_PER_FRAME,
            SpinMode::Timed => SPIN_PER_FRAME * REFERENCE_FRAME_RATE * dt_ms / 1000.0,
        };
        for body in self.bodies.iter_mut() {
            body.spin = (body.spin + delta).rem_euclid(TAU);
        }
    }

    fn revolve(&mut self, time_ms: f64, speed_offset: f64) {
        let center: Point3<f64> = self.center().position;
        for body in self.bodies.iter_mut() {
            let orbit = match body.info.orbit {
                Some(orbit) => orbit,
                None => continue,
            };
            // Height is left alone; the orbit only moves things in x and z
            let offset = orbit.offset_at(time_ms, speed_offset);
            body.position.x = center.x + offset.x;
            body.position.z = center.z + offset.z;
        }
    }
}
