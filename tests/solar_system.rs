use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::Point3;
use solar_orrery::config::Config;
use solar_orrery::model::animation::{parse_speed_offset, DEFAULT_SPEED_OFFSET};
use solar_orrery::model::orbit::revolution_angle;
use solar_orrery::model::{AnimationState, Button, PlayPause, SolarSystem, SpinMode};

fn default_system(spin_mode: SpinMode) -> SolarSystem {
    SolarSystem::new(Config::default().system.bodies, spin_mode).unwrap()
}

fn snapshot(system: &SolarSystem) -> Vec<(Point3<f64>, f64)> {
    system.bodies().map(|b| (b.position, b.spin)).collect()
}

#[test]
fn test_everyone_starts_on_the_x_axis() {
    let mut system = default_system(SpinMode::Timed);
    system.advance(0.0, &AnimationState::default());

    let sun = system.center().position;
    assert_eq!(sun, Point3::origin());
    for body in system.orbiting_bodies() {
        let r = body.orbit().unwrap().radius;
        assert_eq!(body.position, Point3::new(sun.x + r, 0.0, sun.z));
    }

    let earth = system.find_body("Earth").unwrap();
    assert_eq!(earth.position, Point3::new(110.0, 0.0, 0.0));
}

#[test]
fn test_paused_frames_change_nothing() {
    for spin_mode in [SpinMode::Timed, SpinMode::PerFrame] {
        let mut system = default_system(spin_mode);
        let running = AnimationState::default();
        system.advance(0.0, &running);
        system.advance(1234.5, &running);

        let paused = AnimationState {
            paused: true,
            ..running
        };
        let before = snapshot(&system);
        for i in 0..20 {
            system.advance(1234.5 + 16.7 * i as f64, &paused);
            assert_eq!(snapshot(&system), before);
        }
    }
}

#[test]
fn test_orbit_radius_never_drifts() {
    let mut system = default_system(SpinMode::PerFrame);
    let offsets = [-3.0, -0.01, 0.0, 0.01, 2.5, 100.0];

    let mut time_ms = 0.0;
    for frame in 0..5000 {
        let state = AnimationState {
            paused: false,
            speed_offset: offsets[frame % offsets.len()],
        };
        time_ms += 16.7;
        system.advance(time_ms, &state);

        let sun = system.center().position;
        for body in system.orbiting_bodies() {
            let r = body.orbit().unwrap().radius;
            assert_relative_eq!((body.position - sun).norm(), r, max_relative = 1e-9);
            assert_eq!(body.position.y, 0.0);
        }
    }

    // Also at huge times, well past where accumulated error would show
    system.advance(1.0e9, &AnimationState::default());
    for body in system.orbiting_bodies() {
        let r = body.orbit().unwrap().radius;
        assert_relative_eq!(body.position.coords.norm(), r, max_relative = 1e-9);
    }
}

#[test]
fn test_huge_offsets_keep_bodies_on_their_orbits() {
    // Whatever the speed box says, positions never turn into NaN
    let parsed = parse_speed_offset("1e306");
    for speed_offset in [parsed, 1.0e306, -1.0e306] {
        let mut system = default_system(SpinMode::Timed);
        let state = AnimationState {
            paused: false,
            speed_offset,
        };
        system.advance(600_000.0, &state);

        for body in system.orbiting_bodies() {
            let r = body.orbit().unwrap().radius;
            assert!(body.position.x.is_finite() && body.position.z.is_finite());
            assert_relative_eq!(body.position.coords.norm(), r, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_positions_depend_only_on_inputs() {
    let state = AnimationState {
        paused: false,
        speed_offset: 0.37,
    };

    // One system takes many small steps, the other jumps straight there
    let mut stepped = default_system(SpinMode::Timed);
    for i in 0..=600 {
        stepped.advance(i as f64 * 10.0, &state);
    }
    let mut jumped = default_system(SpinMode::Timed);
    jumped.advance(6000.0, &state);

    for (a, b) in stepped.bodies().zip(jumped.bodies()) {
        assert_eq!(a.position, b.position);
    }

    for body in stepped.orbiting_bodies() {
        let orbit = body.orbit().unwrap();
        let angle = revolution_angle(6000.0, orbit.speed, 0.37);
        assert_eq!(angle.to_bits(), orbit.angle_at(6000.0, 0.37).to_bits());
        assert_eq!(body.position.x, orbit.radius * angle.cos());
        assert_eq!(body.position.z, orbit.radius * angle.sin());
    }
}

#[test]
fn test_resume_jumps_to_current_time() {
    let mut system = default_system(SpinMode::Timed);
    let mut state = AnimationState::default();
    system.advance(0.0, &state);

    state.paused = true;
    system.advance(5000.0, &state);
    let mercury = system.find_body("Mercury").unwrap();
    assert_eq!(mercury.position, Point3::new(70.0, 0.0, 0.0));

    state.paused = false;
    system.advance(5000.0, &state);
    let mercury = system.find_body("Mercury").unwrap();
    let angle = revolution_angle(5000.0, 2.0, DEFAULT_SPEED_OFFSET);
    assert_abs_diff_eq!(mercury.position.x, 70.0 * angle.cos(), epsilon = 1e-12);
    assert_abs_diff_eq!(mercury.position.z, 70.0 * angle.sin(), epsilon = 1e-12);
}

#[test]
fn test_speed_input_parsing() {
    assert_eq!(parse_speed_offset("abc"), 0.01);
    assert_eq!(parse_speed_offset("2.5"), 2.5);
}

#[test]
fn test_pause_then_resume_restores_controls() {
    let mut state = AnimationState::default();
    let mut buttons = PlayPause::new(state.paused);
    let before = (state, buttons);

    assert_eq!(buttons.trigger_visible(&mut state), Button::Pause);
    assert_ne!((state, buttons), before);
    assert_eq!(buttons.trigger_visible(&mut state), Button::Play);
    assert_eq!((state, buttons), before);
}
