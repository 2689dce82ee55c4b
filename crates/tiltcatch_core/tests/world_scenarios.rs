//! End-to-end behaviour of the game world

use tiltcatch_core::{Vec2, World, WorldConfig, WorldError, FIXED_DT};

fn world_with_gravity(gravity: f64) -> World {
    World::new(800.0, 600.0, gravity).unwrap()
}

#[test]
fn test_ball_population_never_exceeds_cap() {
    let mut world = world_with_gravity(-900.0);
    for frame in 0..3000 {
        let x = 400.0 + 200.0 * (frame as f64 * 0.01).sin();
        let angle = 0.4 * (frame as f64 * 0.02).cos();
        world.update_platform(Vec2::new(x, 200.0), angle, FIXED_DT);
        world.step(FIXED_DT);
        assert!(world.ball_count() <= world.config().spawn.max_balls);
    }
}

#[test]
fn test_reset_after_play() {
    let mut world = world_with_gravity(-900.0);
    for _ in 0..400 {
        world.step(FIXED_DT);
    }
    assert!(world.ball_count() > 0);

    world.reset();

    assert_eq!(world.ball_count(), 0);
    assert_eq!(world.balls().count(), 0);
    assert_eq!(world.balls_caught(), 0);
    assert_eq!(world.platform_position(), Vec2::new(400.0, 300.0));
    assert_eq!(world.platform_angle(), 0.0);
}

#[test]
fn test_empty_world_is_stable_for_ten_thousand_steps() {
    let mut config = WorldConfig::new(800.0, 600.0, -900.0);
    config.spawn.max_balls = 0;
    let mut world = World::with_config(config).unwrap();

    for _ in 0..10_000 {
        world.step(FIXED_DT);
    }

    assert_eq!(world.ball_count(), 0);
    assert_eq!(world.platform_position(), Vec2::new(400.0, 300.0));
    assert_eq!(world.platform_angle(), 0.0);
    for (_, body) in world.physics().bodies() {
        assert!(body.position.is_finite());
        assert!(body.velocity.is_finite());
    }
}

#[test]
fn test_busy_world_stays_finite() {
    let mut world = world_with_gravity(-900.0);
    for _ in 0..10_000 {
        world.step(FIXED_DT);
    }
    for ball in world.balls() {
        assert!(ball.position.is_finite());
        assert!(ball.angle.is_finite());
    }
}

#[test]
fn test_out_of_bounds_boundary() {
    let mut world = world_with_gravity(0.0);
    let at_line = world.spawn_ball_at(Vec2::new(300.0, -50.0), Vec2::ZERO).unwrap();
    let below = world.spawn_ball_at(Vec2::new(500.0, -51.0), Vec2::ZERO).unwrap();

    let report = world.step(FIXED_DT);

    assert_eq!(report.reaped, 1);
    assert!(world.ball(at_line).is_some());
    assert!(world.ball(below).is_none());
    assert_eq!(world.balls_caught(), 0);
}

#[test]
fn test_resting_ball_in_zone_is_captured() {
    let mut world = world_with_gravity(-900.0);
    world.spawn_ball_at(Vec2::new(400.0, 40.0), Vec2::ZERO).unwrap();

    let report = world.step(FIXED_DT);

    assert_eq!(report.captured, 1);
    assert_eq!(world.balls_caught(), 1);
    assert_eq!(world.ball_count(), 0);
}

#[test]
fn test_fast_ball_in_zone_is_not_captured() {
    let mut world = world_with_gravity(0.0);
    world.spawn_ball_at(Vec2::new(400.0, 60.0), Vec2::new(0.0, -500.0)).unwrap();

    let report = world.step(FIXED_DT);

    assert!(world.capture_rect().contains(world.balls().next().unwrap().position));
    assert_eq!(report.captured, 0);
    assert_eq!(world.balls_caught(), 0);
    assert_eq!(world.ball_count(), 1);
}

#[test]
fn test_free_fall_crosses_line_in_expected_steps() {
    let gravity = 900.0;
    let mut world = world_with_gravity(-gravity);
    let key = world.spawn_ball_at(Vec2::new(400.0, 550.0), Vec2::ZERO).unwrap();

    let mut previous_y = 550.0;
    let mut steps = 0;
    loop {
        world.step(FIXED_DT);
        steps += 1;
        let y = world.ball(key).unwrap().position.y;
        assert!(y < previous_y, "ball must fall monotonically");
        previous_y = y;
        if y < 400.0 || steps > 100 {
            break;
        }
    }

    // y = y0 - g t^2 / 2
    let expected_steps = (2.0 * 150.0 / gravity).sqrt() / FIXED_DT;
    let error = (steps as f64 - expected_steps).abs() / expected_steps;
    assert!(error <= 0.05, "crossed after {} steps, expected {:.2}", steps, expected_steps);
}

#[test]
fn test_moving_platform_pushes_resting_ball() {
    let mut world = world_with_gravity(-900.0);
    let key = world.spawn_ball_at(Vec2::new(400.0, 318.0), Vec2::ZERO).unwrap();
    for _ in 0..30 {
        world.step(FIXED_DT);
    }
    let resting = world.ball(key).unwrap();
    assert!(resting.velocity.x.abs() < 1e-6);
    assert!((resting.position.y - 318.0).abs() < 1.0);

    world.update_platform(Vec2::new(450.0, 300.0), 0.0, FIXED_DT);
    let velocity = world.platform_velocity();
    assert!((velocity.x - 3000.0).abs() < 1e-6);
    assert!(velocity.y.abs() < 1e-9);

    world.step(FIXED_DT);

    // The slip is far beyond what friction can cancel, so the tangential
    // impulse sits at the Coulomb cap: mu * jn, with mu the lower of the two
    // frictions and jn the impulse that stops one step of gravity.
    let config = world.config().clone();
    let mass = config.ball.mass;
    let radius = config.ball.radius;
    let mu = config.ball.material.combine(&config.platform.material).friction;
    assert_eq!(mu, 0.6);
    let fall_speed = -config.gravity * FIXED_DT;
    let normal_impulse = mass * fall_speed;
    let friction_impulse = mu * normal_impulse;

    let ball = world.ball(key).unwrap();
    assert!((ball.velocity.x - friction_impulse / mass).abs() < 1e-9, "vx = {}", ball.velocity.x);
    assert!((ball.velocity.x - 9.0).abs() < 1e-9);
    assert!(ball.velocity.y.abs() < 1e-9);

    // Friction acts at the contact below the center, which had sunk one
    // step of fall into the platform, and spins the ball counter-clockwise
    let lever = radius - fall_speed * FIXED_DT;
    let inertia = 0.5 * mass * radius * radius;
    let expected_spin = lever * friction_impulse / inertia;
    assert!((ball.angular_velocity - expected_spin).abs() < 1e-9, "w = {}", ball.angular_velocity);
    assert!((ball.angular_velocity - 1.46875).abs() < 1e-9);
}

#[test]
fn test_coincident_balls_separate_symmetrically() {
    let mut world = world_with_gravity(0.0);
    let velocity = Vec2::new(10.0, 0.0);
    let a = world.spawn_ball_at(Vec2::new(400.0, 450.0), velocity).unwrap();
    let b = world.spawn_ball_at(Vec2::new(400.0, 450.0), velocity).unwrap();

    world.step(FIXED_DT);

    let (ba, bb) = (world.ball(a).unwrap(), world.ball(b).unwrap());
    let momentum = ba.velocity * ba.mass() + bb.velocity * bb.mass();
    let expected = velocity * (ba.mass() + bb.mass());
    assert!((momentum - expected).length() < 1e-9);

    // Pushed apart along the same line by equal amounts
    let midpoint = (ba.position + bb.position) * 0.5;
    let expected_mid = Vec2::new(400.0, 450.0) + velocity * FIXED_DT;
    assert!((midpoint - expected_mid).length() < 1e-9);
    assert!((ba.position.distance(bb.position) - 24.0).abs() < 1e-9);
    assert!((ba.velocity - bb.velocity).length() < 1e-9);
}

#[test]
fn test_walls_keep_balls_inside() {
    let mut world = world_with_gravity(-900.0);
    let key = world.spawn_ball_at(Vec2::new(60.0, 100.0), Vec2::new(-400.0, 0.0)).unwrap();
    for _ in 0..120 {
        world.step(FIXED_DT);
        if let Some(ball) = world.ball(key) {
            assert!(ball.position.x > 0.0);
        }
    }
}

#[test]
fn test_zero_dimensions_are_rejected() {
    assert!(matches!(
        World::new(0.0, 0.0, -900.0),
        Err(WorldError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_snapshot_tracks_world() {
    let mut world = world_with_gravity(-900.0);
    world.update_platform(Vec2::new(300.0, 250.0), 0.3, FIXED_DT);
    world.spawn_ball_at(Vec2::new(600.0, 500.0), Vec2::ZERO).unwrap();

    let snapshot = world.snapshot();
    assert_eq!(snapshot.platform.position, Vec2::new(300.0, 250.0));
    assert_eq!(snapshot.platform.angle, 0.3);
    assert_eq!(snapshot.balls.len(), 1);
    assert_eq!(snapshot.balls_caught, 0);
    assert_eq!(snapshot.width, 800.0);
}

#[test]
fn test_ball_rolling_along_floor_is_captured() {
    let mut config = WorldConfig::new(800.0, 600.0, -900.0);
    config.spawn.interval = 10_000;
    let mut world = World::with_config(config).unwrap();
    let resting_y = world.config().resting_height();
    let key = world.spawn_ball_at(Vec2::new(250.0, resting_y), Vec2::new(60.0, 0.0)).unwrap();

    let mut captured_at = None;
    for frame in 0..300 {
        let report = world.step(FIXED_DT);
        if report.captured > 0 {
            captured_at = Some(frame);
            break;
        }
        let ball = world.ball(key).unwrap();
        assert!(ball.position.x < world.capture_rect().x + 1.0, "rolled past the zone at x = {}", ball.position.x);
    }

    assert!(captured_at.is_some(), "ball rolling on the floor was never captured");
    assert!(world.ball(key).is_none());
    assert_eq!(world.balls_caught(), 1);
}

#[test]
fn test_long_session_keeps_spawning() {
    let mut world = world_with_gravity(-900.0);
    // Park the platform below the floor so every ball ends up on the floor
    world.update_platform(Vec2::new(400.0, -200.0), 0.0, FIXED_DT);

    let max_balls = world.config().spawn.max_balls;
    let mut late_spawns = 0;
    let mut removed = 0;
    for frame in 0..12_000 {
        let report = world.step(FIXED_DT);
        removed += report.captured + report.reaped + report.stranded;
        if frame >= 6_000 && report.spawned.is_some() {
            late_spawns += 1;
        }
        assert!(world.ball_count() <= max_balls);
    }

    assert!(removed > 0);
    assert!(late_spawns > 0, "population stayed pinned at the cap");
    assert!(world.balls_caught() > 0);
}
