use std::path::PathBuf;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use super::orbit::CircularOrbit;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the immutable info about a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyInfo {
    pub name: String,
    /// Image file, relative to the asset directory.
    pub texture: PathBuf,
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// `None` for the body that sits still at the center.
    pub orbit: Option<CircularOrbit>,
}

impl BodyInfo {
    pub fn fixed(name: &str, texture: &str, radius: f32) -> Self {
        BodyInfo {
            name: name.to_owned(),
            texture: PathBuf::from(texture),
            radius,
            width_segments: 32,
            height_segments: 32,
            orbit: None,
        }
    }

    pub fn orbiting(name: &str, texture: &str, radius: f32, orbit: CircularOrbit) -> Self {
        BodyInfo {
            orbit: Some(orbit),
            ..Self::fixed(name, texture, radius)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    pub position: Point3<f64>,
    /// Angle about the local y axis, kept in `[0, 2pi)`.
    pub spin: f64,
}

impl Body {
    pub fn new(id: BodyID, info: BodyInfo) -> Self {
        Body {
            id,
            info,
            position: Point3::origin(),
            spin: 0.0,
        }
    }

    pub fn orbit(&self) -> Option<&CircularOrbit> {
        self.info.orbit.as_ref()
    }
}
