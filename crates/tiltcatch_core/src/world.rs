//! The game world
//!
//! Owns the physics registry and layers the session rules on top of it:
//! boundary walls, the hand-driven platform, the ball population, spawning,
//! reaping and scoring.

use crate::capture::{classify_ball, lies_stranded, BallFate, CaptureZone};
use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::snapshot::{BallView, PlatformView, RenderSnapshot, WallView};
use crate::spawner::SpawnScheduler;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotmap::SecondaryMap;
use tiltcatch_math::{angle_difference, Rect, Rot2, Vec2};
use tiltcatch_physics::{BodyKey, CollisionFilter, OrientedBox, PhysicsWorld, RigidBody, Shape};

/// Default simulation timestep (seconds)
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Handle to an active ball
pub type BallKey = BodyKey;

/// What happened to the ball population during one [`World::step`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Ball created by the spawn scheduler this step, if any
    pub spawned: Option<BallKey>,
    /// Balls removed for falling out of bounds
    pub reaped: usize,
    /// Balls removed by the capture zone
    pub captured: usize,
    /// Balls removed after lying still on the floor outside the zone
    pub stranded: usize,
}

/// The simulation world for one game session
pub struct World {
    config: WorldConfig,
    physics: PhysicsWorld,
    walls: Vec<BodyKey>,
    platform: BodyKey,
    balls: Vec<BallKey>,
    /// Consecutive frames each ball has spent lying still near the floor
    still_frames: SecondaryMap<BallKey, u32>,
    /// Template cloned for every spawned ball; built once so a bad ball mass
    /// is caught at construction
    ball_prototype: RigidBody,
    balls_caught: u64,
    spawner: SpawnScheduler,
    capture_zone: CaptureZone,
    rng: StdRng,
}

impl World {
    /// Create a world with the default constant set
    pub fn new(width: f64, height: f64, gravity: f64) -> Result<Self, WorldError> {
        Self::with_config(WorldConfig::new(width, height, gravity))
    }

    /// Create a world whose spawn generator is seeded from `config.seed`
    pub fn with_config(config: WorldConfig) -> Result<Self, WorldError> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// Create a world with an explicitly provided spawn generator
    pub fn with_rng(config: WorldConfig, rng: StdRng) -> Result<Self, WorldError> {
        config.validate()?;

        let mut physics = PhysicsWorld::with_config(config.physics_config());
        let walls: Vec<BodyKey> = build_walls(&config)?
            .into_iter()
            .map(|wall| physics.add_body(wall))
            .collect();

        let platform_shape = Shape::oriented_box(config.platform.half_width, config.platform.half_height)?;
        let platform_body = RigidBody::new_kinematic(platform_shape, config.platform_start())?
            .with_angle(config.platform.initial_angle)
            .with_material(config.platform.material)
            .with_filter(CollisionFilter::platform());
        let platform = physics.add_body(platform_body);

        let ball_prototype = RigidBody::new_dynamic(Shape::circle(config.ball.radius)?, Vec2::ZERO, config.ball.mass)?
            .with_material(config.ball.material)
            .with_filter(CollisionFilter::ball());

        log::info!(
            "Created {}x{} world (gravity {}, max {} balls)",
            config.width,
            config.height,
            config.gravity,
            config.spawn.max_balls
        );

        Ok(Self {
            capture_zone: CaptureZone::from_config(&config),
            spawner: SpawnScheduler::new(config.spawn.interval),
            config,
            physics,
            walls,
            platform,
            balls: Vec::new(),
            still_frames: SecondaryMap::new(),
            ball_prototype,
            balls_caught: 0,
            rng,
        })
    }

    /// Move the platform to a new pose
    ///
    /// The platform is kinematic, so the pose is written directly. Its linear
    /// and angular velocity are derived from the displacement over `dt` so
    /// balls it strikes or carries receive the right impulses. A non-positive
    /// or non-finite `dt` moves the platform with zero velocity. Non-finite
    /// poses are ignored.
    pub fn update_platform(&mut self, position: Vec2, angle: f64, dt: f64) {
        if !position.is_finite() || !angle.is_finite() {
            log::debug!("Ignoring non-finite platform pose {:?} / {}", position, angle);
            return;
        }
        let Some(platform) = self.physics.get_body_mut(self.platform) else {
            return;
        };

        if dt.is_finite() && dt > 0.0 {
            platform.velocity = (position - platform.position) / dt;
            platform.angular_velocity = angle_difference(angle, platform.angle) / dt;
        } else {
            platform.velocity = Vec2::ZERO;
            platform.angular_velocity = 0.0;
        }
        platform.position = position;
        platform.angle = angle;
    }

    /// Advance the world by `dt` seconds
    ///
    /// Integrates and collides the bodies, runs the spawn scheduler, then
    /// removes balls that fell out of bounds, were captured, or have lain
    /// still on the floor outside the capture zone for too long. The platform's
    /// derived velocity is consumed by this step.
    pub fn step(&mut self, dt: f64) -> StepReport {
        let mut report = StepReport::default();

        self.physics.step(dt);
        if let Some(platform) = self.physics.get_body_mut(self.platform) {
            platform.velocity = Vec2::ZERO;
            platform.angular_velocity = 0.0;
        }

        if self.spawner.tick() {
            report.spawned = self.spawn_ball();
        }

        let physics = &mut self.physics;
        let still_frames = &mut self.still_frames;
        let zone = &self.capture_zone;
        let strand = &self.config.strand;
        let out_of_bounds_y = self.config.out_of_bounds_y;
        self.balls.retain(|&key| {
            let Some(body) = physics.get_body(key) else {
                still_frames.remove(key);
                return false;
            };
            let fate = match classify_ball(body.position, body.velocity, out_of_bounds_y, zone) {
                Some(fate) => Some(fate),
                None if lies_stranded(strand, body.position, body.velocity) => {
                    let frames = still_frames.get(key).copied().unwrap_or(0) + 1;
                    still_frames.insert(key, frames);
                    (frames >= strand.frames).then_some(BallFate::Stranded)
                }
                None => {
                    still_frames.remove(key);
                    None
                }
            };
            let Some(fate) = fate else {
                return true;
            };
            log::debug!("Ball {:?} {:?} at {:?}", key, fate, body.position);
            physics.remove_body(key);
            still_frames.remove(key);
            match fate {
                BallFate::Reaped => report.reaped += 1,
                BallFate::Captured => report.captured += 1,
                BallFate::Stranded => report.stranded += 1,
            }
            false
        });
        self.balls_caught += report.captured as u64;

        report
    }

    /// Remove all balls, clear the score and spawn timer, and put the platform
    /// back at its initial pose. Walls are left in place.
    pub fn reset(&mut self) {
        for key in self.balls.drain(..) {
            self.physics.remove_body(key);
        }
        self.still_frames.clear();
        self.balls_caught = 0;
        self.spawner.reset();

        let start = self.config.platform_start();
        let angle = self.config.platform.initial_angle;
        if let Some(platform) = self.physics.get_body_mut(self.platform) {
            platform.position = start;
            platform.angle = angle;
            platform.velocity = Vec2::ZERO;
            platform.angular_velocity = 0.0;
        }
        log::info!("World reset");
    }

    /// Spawn a ball at a random x along the top edge
    ///
    /// Returns `None` when the population is already at `max_balls`.
    pub fn spawn_ball(&mut self) -> Option<BallKey> {
        if self.is_full() {
            return None;
        }
        let spawn = &self.config.spawn;
        let (lo, hi) = (spawn.margin_x, self.config.width - spawn.margin_x);
        let x = if lo <= hi {
            self.rng.gen_range(lo..=hi)
        } else {
            self.config.width / 2.0
        };
        let y = self.config.height - spawn.top_offset;
        let velocity = Vec2::new(
            self.rng.gen_range(-spawn.velocity_x..=spawn.velocity_x),
            self.rng.gen_range(-spawn.velocity_y..=spawn.velocity_y),
        );
        self.spawn_ball_at(Vec2::new(x, y), velocity)
    }

    /// Spawn a ball at an explicit position and velocity
    ///
    /// Returns `None` when the population is full or the state is non-finite.
    pub fn spawn_ball_at(&mut self, position: Vec2, velocity: Vec2) -> Option<BallKey> {
        if self.is_full() {
            return None;
        }
        if !position.is_finite() || !velocity.is_finite() {
            log::debug!("Refusing to spawn ball at {:?} with velocity {:?}", position, velocity);
            return None;
        }
        let mut body = self.ball_prototype.clone().with_velocity(velocity);
        body.position = position;
        let key = self.physics.add_body(body);
        self.balls.push(key);
        log::debug!("Spawned ball {:?} at {:?}", key, position);
        Some(key)
    }

    fn is_full(&self) -> bool {
        self.balls.len() >= self.config.spawn.max_balls
    }

    pub fn width(&self) -> f64 {
        self.config.width
    }

    pub fn height(&self) -> f64 {
        self.config.height
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Read-only access to the underlying physics registry
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn platform_position(&self) -> Vec2 {
        self.platform_body().map_or(Vec2::ZERO, |body| body.position)
    }

    pub fn platform_angle(&self) -> f64 {
        self.platform_body().map_or(0.0, |body| body.angle)
    }

    /// Velocity derived by the last [`update_platform`](Self::update_platform)
    /// and not yet consumed by a step
    pub fn platform_velocity(&self) -> Vec2 {
        self.platform_body().map_or(Vec2::ZERO, |body| body.velocity)
    }

    pub fn platform_angular_velocity(&self) -> f64 {
        self.platform_body().map_or(0.0, |body| body.angular_velocity)
    }

    pub fn platform_half_extents(&self) -> Vec2 {
        self.config.platform.half_extents()
    }

    fn platform_body(&self) -> Option<&RigidBody> {
        self.physics.get_body(self.platform)
    }

    /// Number of active balls
    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    /// Keys of the active balls, oldest first
    pub fn ball_keys(&self) -> &[BallKey] {
        &self.balls
    }

    /// Body of an active ball; `None` once it has been reaped or captured
    pub fn ball(&self, key: BallKey) -> Option<&RigidBody> {
        if self.balls.contains(&key) {
            self.physics.get_body(key)
        } else {
            None
        }
    }

    /// Iterate over the active balls for drawing
    pub fn balls(&self) -> impl Iterator<Item = BallView> + '_ {
        let radius = self.config.ball.radius;
        self.balls
            .iter()
            .filter_map(move |&key| self.physics.get_body(key))
            .map(move |body| BallView {
                position: body.position,
                radius,
                angle: body.angle,
            })
    }

    pub fn capture_zone(&self) -> &CaptureZone {
        &self.capture_zone
    }

    /// Capture zone as an `(x, y, w, h)` rectangle
    pub fn capture_rect(&self) -> Rect {
        self.capture_zone.rect
    }

    /// Total balls captured since construction or the last reset
    pub fn balls_caught(&self) -> u64 {
        self.balls_caught
    }

    /// Frames counted toward the next spawn
    pub fn spawn_timer(&self) -> u32 {
        self.spawner.timer()
    }

    /// Copy out everything drawing code needs for one frame
    pub fn snapshot(&self) -> RenderSnapshot {
        let position = self.platform_position();
        let angle = self.platform_angle();
        let half_extents = self.platform_half_extents();
        let outline = OrientedBox::new(position, Rot2::from_angle(angle), half_extents);

        let walls = self
            .walls
            .iter()
            .filter_map(|&key| self.physics.get_body(key))
            .map(|body| {
                let aabb = body.aabb();
                WallView {
                    rect: Rect::from_min_max(aabb.min, aabb.max),
                }
            })
            .collect();

        RenderSnapshot {
            width: self.config.width,
            height: self.config.height,
            platform: PlatformView {
                position,
                angle,
                half_extents,
                corners: outline.corners(),
            },
            walls,
            balls: self.balls().collect(),
            capture_zone: self.capture_zone.rect,
            balls_caught: self.balls_caught,
        }
    }
}

/// Left wall, right wall and floor, each centred on its world edge
fn build_walls(config: &WorldConfig) -> Result<[RigidBody; 3], WorldError> {
    let (w, h, t) = (config.width, config.height, config.walls.half_thickness);
    let side = Shape::oriented_box(t, h / 2.0)?;
    let floor = Shape::oriented_box(w / 2.0, t)?;
    let wall = |shape: Shape, position: Vec2| -> Result<RigidBody, WorldError> {
        Ok(RigidBody::new_static(shape, position)?
            .with_material(config.walls.material)
            .with_filter(CollisionFilter::static_world()))
    };
    Ok([
        wall(side, Vec2::new(0.0, h / 2.0))?,
        wall(side, Vec2::new(w, h / 2.0))?,
        wall(floor, Vec2::new(w / 2.0, 0.0))?,
    ])
}
