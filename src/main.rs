use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kiss3d::window::Window;

use solar_orrery::cli::CliArgs;
use solar_orrery::config::{Config, DEFAULT_CONFIG_FILE};
use solar_orrery::gui::Simulation;
use solar_orrery::logging::init_logging;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    // Logging isn't up yet, so hold on to the error until it is
    let (mut config, load_error) = match Config::load_or_create(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    config.apply_cli_overrides(&args);

    init_logging(&config.log_level);
    if let Some(err) = load_error {
        tracing::warn!(
            "Couldn't use {} ({}), falling back to defaults",
            config_path.display(),
            err
        );
    }

    if let Err(err) = config.validate() {
        tracing::error!("{}", err);
        return ExitCode::FAILURE;
    }

    let mut window =
        Window::new_with_size(&config.window.title, config.window.width, config.window.height);
    window.set_framerate_limit(config.window.framerate_limit);

    let simulation = match Simulation::new(&config, &mut window) {
        Ok(simulation) => simulation,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    window.render_loop(simulation);

    ExitCode::SUCCESS
}
