//! TiltCatch - headless session runner
//!
//! Replays a scripted hand track against the world for a fixed number of
//! frames and logs how many balls were caught.

use tiltcatch::config::AppConfig;
use tiltcatch::input::InputMapper;
use tiltcatch::systems::{HandScript, SimulationSystem};
use tiltcatch_core::World;

/// Key presses replayed during the session, by frame
const SCRIPTED_KEYS: &[(u32, char)] = &[(1500, 'p'), (1560, 'p')];

fn main() {
    // Load configuration
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging; RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()))
        .init();
    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting TiltCatch");

    let mut world = match World::with_config(config.world.clone()) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Failed to create world: {}", e);
            std::process::exit(1);
        }
    };

    let mut simulation = SimulationSystem::from_config(&config);
    let script = HandScript::new(config.input.frame_width, config.input.frame_height);
    let report_interval = config.debug.report_interval;

    let (mut spawned, mut reaped) = (0usize, 0usize);
    for frame in 0..config.session.frames {
        let actions = SCRIPTED_KEYS
            .iter()
            .filter(|(at, _)| *at == frame)
            .filter_map(|&(_, key)| InputMapper::map_key(key));
        let mut running = true;
        for action in actions {
            running &= simulation.handle_action(action, &mut world);
        }
        if !running {
            break;
        }

        let pose = script.pose_at(frame);
        let result = simulation.update(&mut world, pose.as_ref());
        if let Some(report) = result.report {
            spawned += usize::from(report.spawned.is_some());
            reaped += report.reaped;
        }

        if report_interval > 0 && frame % report_interval == 0 {
            let platform = world.platform_position();
            log::info!(
                "frame {}: {} active, {} caught, platform ({:.1}, {:.1}) at {:.2} rad",
                frame,
                world.ball_count(),
                world.balls_caught(),
                platform.x,
                platform.y,
                world.platform_angle()
            );
        }
    }

    log::info!(
        "Session over: {} spawned, {} lost, {} caught",
        spawned,
        reaped,
        world.balls_caught()
    );
    println!("Balls caught: {}", world.balls_caught());
}
