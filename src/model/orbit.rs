use std::f64::consts::TAU;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Converts `milliseconds * speed` into radians.
pub const ORBIT_SPEED_SCALE: f64 = 0.001;

/// Angle swept by a body after `time_ms` milliseconds, given its own speed and
/// the global offset shared by every body.
///
/// This is a closed form; nothing is accumulated between calls.
pub fn revolution_angle(time_ms: f64, base_speed: f64, speed_offset: f64) -> f64 {
    time_ms * (base_speed + speed_offset) * ORBIT_SPEED_SCALE
}

/// A circular, flat orbit in the XZ plane around whatever body sits at the
/// center of the system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularOrbit {
    pub radius: f64,
    pub speed: f64,
}

impl CircularOrbit {
    pub fn new(radius: f64, speed: f64) -> Self {
        CircularOrbit { radius, speed }
    }

    pub fn angle_at(&self, time_ms: f64, speed_offset: f64) -> f64 {
        revolution_angle(time_ms, self.speed, speed_offset)
    }

    /// Displacement from the center of the orbit. The y component is always
    /// zero, and the length is always `radius`: an angle that overflowed to
    /// infinity is read as zero.
    pub fn offset_at(&self, time_ms: f64, speed_offset: f64) -> Vector3<f64> {
        let angle = self.angle_at(time_ms, speed_offset);
        let angle = if angle.is_finite() { angle } else { 0.0 };
        Vector3::new(self.radius * angle.cos(), 0.0, self.radius * angle.sin())
    }

    /// Time for one full revolution, or `None` if the effective speed is zero.
    pub fn period_ms(&self, speed_offset: f64) -> Option<f64> {
        let rate = (self.speed + speed_offset) * ORBIT_SPEED_SCALE;
        if rate == 0.0 {
            None
        } else {
            Some(TAU / rate.abs())
        }
    }
}
