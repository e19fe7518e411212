use std::path::PathBuf;

use clap::Parser;

use solar_orrery::config::{Config, DEFAULT_CONFIG_FILE};
use solar_orrery::model::animation::parse_speed_offset;
use solar_orrery::model::{AnimationState, SolarSystem};

/// Prints where every body is at a given moment.
#[derive(Debug, Parser)]
struct Args {
    /// Milliseconds since the start of the animation.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Speed offset, read the same way as the viewer's input box.
    #[arg(long, allow_hyphen_values = true)]
    speed_offset: Option<String>,

    /// Only show this body.
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = if path.exists() {
        Config::load(&path)?
    } else {
        Config::default()
    };

    let speed_offset = match args.speed_offset {
        Some(text) => parse_speed_offset(&text),
        None => config.animation.speed_offset,
    };
    let state = AnimationState {
        paused: false,
        speed_offset,
    };

    let mut system = SolarSystem::new(config.system.bodies.clone(), config.animation.spin_mode)?;
    system.advance(args.time_ms, &state);

    println!(
        "Positions at t = {} ms, speed offset {}",
        args.time_ms, speed_offset
    );
    for body in system.bodies() {
        if let Some(name) = &args.name {
            if !body.info.name.eq_ignore_ascii_case(name) {
                continue;
            }
        }

        println!("{}", body.info.name);
        println!(
            "- Position: ({:.3}, {:.3}, {:.3})",
            body.position.x, body.position.y, body.position.z
        );
        match body.orbit() {
            None => println!("- Fixed at the center"),
            Some(orbit) => {
                println!("- Orbit radius: {}", orbit.radius);
                println!("- Base speed: {}", orbit.speed);
                println!(
                    "- Angle: {:.4} rad",
                    orbit.angle_at(args.time_ms, speed_offset)
                );
                match orbit.period_ms(speed_offset) {
                    Some(period) => println!("- Period: {:.1} ms", period),
                    None => println!("- Period: never (standing still)"),
                }
            }
        }
        println!();
    }

    Ok(())
}
