use std::path::PathBuf;

use clap::Parser;

use crate::model::SpinMode;

/// Command line arguments for the viewer. Anything given here beats the
/// config file.
#[derive(Parser, Debug, Default)]
#[command(name = "solar-orrery", about = "Animated solar system viewer")]
pub struct CliArgs {
    /// Path to the RON config file (created with defaults if missing).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Directory that textures are loaded from.
    #[arg(long)]
    pub asset_dir: Option<PathBuf>,

    /// Added to every planet's revolution speed.
    #[arg(long, allow_negative_numbers = true)]
    pub speed_offset: Option<f64>,

    /// Start with the animation paused.
    #[arg(long)]
    pub paused: bool,

    /// How planets spin between frames.
    #[arg(long, value_enum)]
    pub spin_mode: Option<SpinMode>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_parse_args() {
        let args = CliArgs::try_parse_from([
            "solar-orrery",
            "--width",
            "1920",
            "--speed-offset",
            "-0.5",
            "--spin-mode",
            "per-frame",
            "--paused",
        ])
        .unwrap();
        assert_eq!(args.width, Some(1920));
        assert_eq!(args.speed_offset, Some(-0.5));
        assert_eq!(args.spin_mode, Some(SpinMode::PerFrame));
        assert!(args.paused);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            asset_dir: Some(PathBuf::from("textures")),
            speed_offset: Some(2.5),
            log_level: Some("debug".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.system.asset_dir, PathBuf::from("textures"));
        assert_eq!(config.animation.speed_offset, 2.5);
        assert_eq!(config.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert!(!config.animation.start_paused);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }
}
