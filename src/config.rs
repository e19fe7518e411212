//! Settings for the window, camera, playback and the body table, persisted as
//! RON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::model::animation::{SpinMode, DEFAULT_SPEED_OFFSET, MAX_SPEED_OFFSET};
use crate::model::system::validate_bodies;
use crate::model::{BodyInfo, CircularOrbit};

pub const DEFAULT_CONFIG_FILE: &str = "solar-system.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
    pub system: SystemConfig,
    /// Log filter, e.g. "info" or "debug,solar_orrery=trace". `RUST_LOG` wins.
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frames per second cap; `None` leaves it to the driver.
    pub framerate_limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub start_position: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub speed_offset: f64,
    pub start_paused: bool,
    pub spin_mode: SpinMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyboxConfig {
    /// Directory holding the six faces, relative to the asset directory.
    pub directory: PathBuf,
    /// Faces are named `<prefix>_<rt|lf|up|dn|ft|bk>.<extension>`.
    pub prefix: String,
    pub extension: String,
    /// Half the edge length of the box drawn around the camera.
    pub distance: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    pub asset_dir: PathBuf,
    pub skybox: SkyboxConfig,
    pub bodies: Vec<BodyInfo>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Solar System".to_string(),
            width: 1280,
            height: 720,
            framerate_limit: Some(60),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 40.0,
            near: 0.1,
            far: 5000.0,
            min_distance: 100.0,
            max_distance: 1000.0,
            start_position: [0.0, 100.0, 400.0],
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed_offset: DEFAULT_SPEED_OFFSET,
            start_paused: false,
            spin_mode: SpinMode::default(),
        }
    }
}

impl Default for SkyboxConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("skybox"),
            prefix: "space".to_string(),
            extension: "png".to_string(),
            distance: 1500.0,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        let planet = |name: &str, file: &str, radius: f32, orbit_radius: f64, speed: f64| {
            BodyInfo::orbiting(name, file, radius, CircularOrbit::new(orbit_radius, speed))
        };

        Self {
            asset_dir: PathBuf::from("img"),
            skybox: SkyboxConfig::default(),
            bodies: vec![
                BodyInfo::fixed("Sun", "sun_hd.jpg", 15.0),
                planet("Mercury", "mercury_hd.jpg", 8.0, 70.0, 2.0),
                planet("Venus", "venus_hd.jpg", 10.0, 95.0, 1.8),
                planet("Earth", "earth_hd.jpg", 10.0, 110.0, 1.5),
                planet("Mars", "mars_hd.jpg", 8.0, 130.0, 0.8),
                planet("Jupiter", "jupiter_hd.jpg", 13.0, 145.0, 0.7),
                planet("Saturn", "saturn_hd.jpg", 8.0, 160.0, 0.6),
                planet("Uranus", "uranus_hd.jpg", 8.0, 180.0, 0.5),
                planet("Neptune", "neptune_hd.jpg", 8.0, 200.0, 0.4),
            ],
        }
    }
}

impl SystemConfig {
    pub fn texture_path(&self, body: &BodyInfo) -> PathBuf {
        self.asset_dir.join(&body.texture)
    }

    pub fn skybox_face_path(&self, suffix: &str) -> PathBuf {
        let file = format!(
            "{}_{}.{}",
            self.skybox.prefix, suffix, self.skybox.extension
        );
        self.asset_dir.join(&self.skybox.directory).join(file)
    }
}

impl Config {
    /// Reads the config at `path`. If there isn't one, writes out the defaults
    /// there and returns them.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config = Self::load(path)?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            tracing::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(ConfigError::WriteError)?;
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_bodies(&self.system.bodies)?;

        let camera = &self.camera;
        if !(camera.near > 0.0 && camera.near < camera.far) {
            return Err(ConfigError::Invalid(format!(
                "camera clip planes must satisfy 0 < near < far, got {} and {}",
                camera.near, camera.far
            )));
        }
        if !(camera.min_distance > 0.0 && camera.min_distance <= camera.max_distance) {
            return Err(ConfigError::Invalid(format!(
                "camera distance must satisfy 0 < min <= max, got {} and {}",
                camera.min_distance, camera.max_distance
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera fov must be between 0 and 180 degrees, got {}",
                camera.fov_degrees
            )));
        }
        if !(self.animation.speed_offset.abs() <= MAX_SPEED_OFFSET) {
            return Err(ConfigError::Invalid(format!(
                "speed offset must be within +/-{}, got {}",
                MAX_SPEED_OFFSET, self.animation.speed_offset
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(
                "window must be at least one pixel across".to_owned(),
            ));
        }

        Ok(())
    }

    /// Apply command line overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref dir) = args.asset_dir {
            self.system.asset_dir = dir.clone();
        }
        if let Some(offset) = args.speed_offset {
            self.animation.speed_offset = offset;
        }
        if args.paused {
            self.animation.start_paused = true;
        }
        if let Some(mode) = args.spin_mode {
            self.animation.spin_mode = mode;
        }
        if let Some(ref level) = args.log_level {
            self.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.system.bodies.len(), 9);
        assert_eq!(config.system.bodies[0].orbit, None);
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(4))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("\"Neptune\""));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = ron::from_str("(window: (width: 640))").unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.system, SystemConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_CONFIG_FILE);

        let mut config = Config::default();
        config.animation.spin_mode = SpinMode::PerFrame;
        config.system.bodies.truncate(4);
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        assert!(!path.exists());

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let again = Config::load_or_create(&path).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "(window: (width: \"wide\"))").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::ParseError(_))
        ));

        std::fs::write(&path, "(camera: (min_distance: 500.0, max_distance: 100.0))").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_huge_speed_offset() {
        let mut config = Config::default();
        config.animation.speed_offset = -MAX_SPEED_OFFSET;
        config.validate().unwrap();

        for offset in [1.0e306, -2.0e6, f64::NAN, f64::INFINITY] {
            config.animation.speed_offset = offset;
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_asset_paths() {
        let system = SystemConfig::default();
        assert_eq!(
            system.texture_path(&system.bodies[3]),
            PathBuf::from("img").join("earth_hd.jpg")
        );
        assert_eq!(
            system.skybox_face_path("rt"),
            PathBuf::from("img").join("skybox").join("space_rt.png")
        );
    }
}
