pub mod animation;
pub mod body;
pub mod orbit;
pub mod system;

pub use animation::{AnimationState, Button, PlayPause, SpeedInput, SpinMode};
pub use body::{Body, BodyID, BodyInfo};
pub use orbit::CircularOrbit;
pub use system::SolarSystem;
