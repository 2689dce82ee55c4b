//! World configuration
//!
//! All tunable constants of a session live here so physics and rendering
//! read the same values (the platform size in particular).

use crate::error::WorldError;
use serde::{Deserialize, Serialize};
use tiltcatch_math::Vec2;
use tiltcatch_physics::{PhysicsConfig, PhysicsMaterial};

/// Complete configuration of a [`World`](crate::World)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in world units
    pub width: f64,
    /// World height in world units
    pub height: f64,
    /// Gravity (applied to Y-axis, negative = down)
    pub gravity: f64,
    /// Closing speed below which contacts do not bounce
    pub restitution_threshold: f64,
    /// Seed for the spawn position generator
    pub seed: u64,
    /// Balls whose center falls below this height are removed
    pub out_of_bounds_y: f64,
    pub spawn: SpawnConfig,
    pub ball: BallConfig,
    pub platform: PlatformConfig,
    pub walls: WallConfig,
    pub capture: CaptureConfig,
    pub strand: StrandConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(800.0, 600.0, -900.0)
    }
}

impl WorldConfig {
    /// Default configuration for a world of the given size and gravity
    pub fn new(width: f64, height: f64, gravity: f64) -> Self {
        Self {
            width,
            height,
            gravity,
            restitution_threshold: 30.0,
            seed: 0x7117_CA7C,
            out_of_bounds_y: -50.0,
            spawn: SpawnConfig::default(),
            ball: BallConfig::default(),
            platform: PlatformConfig::default(),
            walls: WallConfig::default(),
            capture: CaptureConfig::default(),
            strand: StrandConfig::default(),
        }
    }

    /// Set the spawn generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Physics settings derived from this configuration
    pub fn physics_config(&self) -> PhysicsConfig {
        PhysicsConfig {
            gravity: self.gravity,
            restitution_threshold: self.restitution_threshold,
        }
    }

    /// Platform starting position (world center unless overridden)
    pub fn platform_start(&self) -> Vec2 {
        self.platform
            .initial_position
            .unwrap_or_else(|| Vec2::new(self.width / 2.0, self.height / 2.0))
    }

    /// Height of a ball's center when it rests on the floor
    pub fn resting_height(&self) -> f64 {
        self.walls.half_thickness + self.ball.radius
    }

    /// Check every value for range and consistency
    pub fn validate(&self) -> Result<(), WorldError> {
        if !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0) {
            return Err(WorldError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        require(self.gravity.is_finite(), || format!("gravity {}", self.gravity))?;
        require(self.restitution_threshold.is_finite() && self.restitution_threshold >= 0.0, || {
            format!("restitution_threshold {}", self.restitution_threshold)
        })?;
        require(self.out_of_bounds_y.is_finite(), || {
            format!("out_of_bounds_y {}", self.out_of_bounds_y)
        })?;
        self.spawn.validate()?;
        self.ball.validate()?;
        self.platform.validate()?;
        self.walls.validate()?;
        self.capture.validate()?;
        self.strand.validate()?;

        let resting = self.resting_height();
        require(
            self.capture.y_min <= resting && resting <= self.capture.y_max,
            || {
                format!(
                    "capture y range [{}, {}] cannot hold a ball resting on the floor at y = {}",
                    self.capture.y_min, self.capture.y_max, resting
                )
            },
        )
    }
}

/// Ball spawning cadence and placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Population cap
    pub max_balls: usize,
    /// Frames between spawn attempts
    pub interval: u32,
    /// Distance kept from the left and right edges when picking x
    pub margin_x: f64,
    /// Distance below the top edge where balls appear
    pub top_offset: f64,
    /// Initial x velocity is drawn from [-velocity_x, velocity_x]
    pub velocity_x: f64,
    /// Initial y velocity is drawn from [-velocity_y, velocity_y]
    pub velocity_y: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_balls: 5,
            interval: 90,
            margin_x: 100.0,
            top_offset: 50.0,
            velocity_x: 30.0,
            velocity_y: 10.0,
        }
    }
}

impl SpawnConfig {
    fn validate(&self) -> Result<(), WorldError> {
        require(self.interval > 0, || "spawn.interval must be at least 1".to_string())?;
        require(non_negative(self.margin_x), || format!("spawn.margin_x {}", self.margin_x))?;
        require(self.top_offset.is_finite(), || format!("spawn.top_offset {}", self.top_offset))?;
        require(non_negative(self.velocity_x) && non_negative(self.velocity_y), || {
            format!("spawn velocity range ({}, {})", self.velocity_x, self.velocity_y)
        })
    }
}

/// Ball geometry and material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f64,
    pub mass: f64,
    pub material: PhysicsMaterial,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 12.0,
            mass: 1.5,
            material: PhysicsMaterial::BALL,
        }
    }
}

impl BallConfig {
    fn validate(&self) -> Result<(), WorldError> {
        require(positive(self.radius), || format!("ball.radius {}", self.radius))?;
        validate_material("ball", &self.material)
    }
}

/// Platform geometry, material and starting pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub half_width: f64,
    pub half_height: f64,
    pub material: PhysicsMaterial,
    /// Starting position; `None` means the world center
    pub initial_position: Option<Vec2>,
    pub initial_angle: f64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            half_width: 60.0,
            half_height: 6.0,
            material: PhysicsMaterial::PLATFORM,
            initial_position: None,
            initial_angle: 0.0,
        }
    }
}

impl PlatformConfig {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }

    fn validate(&self) -> Result<(), WorldError> {
        require(positive(self.half_width) && positive(self.half_height), || {
            format!("platform half-extents ({}, {})", self.half_width, self.half_height)
        })?;
        require(self.initial_position.map_or(true, Vec2::is_finite), || {
            "platform.initial_position must be finite".to_string()
        })?;
        require(self.initial_angle.is_finite(), || {
            format!("platform.initial_angle {}", self.initial_angle)
        })?;
        validate_material("platform", &self.material)
    }
}

/// Boundary walls and floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Half the thickness of each wall, centered on the world edge
    pub half_thickness: f64,
    pub material: PhysicsMaterial,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            half_thickness: 5.0,
            material: PhysicsMaterial::WALL,
        }
    }
}

impl WallConfig {
    fn validate(&self) -> Result<(), WorldError> {
        require(positive(self.half_thickness), || {
            format!("walls.half_thickness {}", self.half_thickness)
        })?;
        validate_material("walls", &self.material)
    }
}

/// Capture-zone placement and speed gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Left edge as a fraction of the world width
    pub x_min_fraction: f64,
    /// Right edge as a fraction of the world width
    pub x_max_fraction: f64,
    /// Bottom edge height; must not be above a floor-resting ball's center
    pub y_min: f64,
    /// Top edge height
    pub y_max: f64,
    /// Balls moving vertically at this speed or faster pass through uncounted
    pub max_vertical_speed: f64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            x_min_fraction: 0.35,
            x_max_fraction: 0.65,
            y_min: 5.0,
            y_max: 70.0,
            max_vertical_speed: 100.0,
        }
    }
}

impl CaptureConfig {
    fn validate(&self) -> Result<(), WorldError> {
        require(
            (0.0..=1.0).contains(&self.x_min_fraction)
                && (0.0..=1.0).contains(&self.x_max_fraction)
                && self.x_min_fraction < self.x_max_fraction,
            || format!("capture x fractions [{}, {}]", self.x_min_fraction, self.x_max_fraction),
        )?;
        require(
            self.y_min.is_finite() && self.y_max.is_finite() && self.y_min < self.y_max,
            || format!("capture y range [{}, {}]", self.y_min, self.y_max),
        )?;
        require(positive(self.max_vertical_speed), || {
            format!("capture.max_vertical_speed {}", self.max_vertical_speed)
        })
    }
}

/// Removal of balls left lying on the floor outside the capture zone
///
/// The floor spans the whole world, so without this a ball that settles
/// beside the zone would hold a population slot for the rest of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrandConfig {
    /// Consecutive frames a ball must lie still before it is removed; 0 disables
    pub frames: u32,
    /// Speed below which a ball counts as lying still
    pub max_speed: f64,
    /// Only balls whose center is at or below this height can be stranded
    pub max_height: f64,
}

impl Default for StrandConfig {
    fn default() -> Self {
        Self {
            frames: 240,
            max_speed: 20.0,
            max_height: 30.0,
        }
    }
}

impl StrandConfig {
    fn validate(&self) -> Result<(), WorldError> {
        require(non_negative(self.max_speed), || format!("strand.max_speed {}", self.max_speed))?;
        require(self.max_height.is_finite(), || format!("strand.max_height {}", self.max_height))
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn validate_material(owner: &str, material: &PhysicsMaterial) -> Result<(), WorldError> {
    require(
        non_negative(material.friction) && (0.0..=1.0).contains(&material.restitution),
        || {
            format!(
                "{} material friction {} / restitution {}",
                owner, material.friction, material.restitution
            )
        },
    )
}

fn require(condition: bool, message: impl FnOnce() -> String) -> Result<(), WorldError> {
    if condition {
        Ok(())
    } else {
        Err(WorldError::InvalidConfig(message()))
    }
}
