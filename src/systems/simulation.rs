//! Game simulation system
//!
//! Runs one frame of the game loop:
//! - Hand pose → smoothing filter
//! - Filtered pose → platform
//! - World stepping

use crate::config::AppConfig;
use crate::input::GameAction;
use tiltcatch_core::{StepReport, World};
use tiltcatch_input::{HandPose, PoseFilter};

/// Result of a simulation update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationResult {
    /// Whether the platform was moved this frame
    pub platform_updated: bool,
    /// Step outcome, or `None` while paused
    pub report: Option<StepReport>,
}

/// Manages the per-frame simulation
pub struct SimulationSystem {
    filter: PoseFilter,
    dt: f64,
    paused: bool,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(filter: PoseFilter, dt: f64) -> Self {
        Self {
            filter,
            dt,
            paused: false,
        }
    }

    /// Build the system for a world described by `config`
    pub fn from_config(config: &AppConfig) -> Self {
        let filter = PoseFilter::new(config.input.clone(), config.world.width, config.world.height);
        Self::new(filter, config.session.dt)
    }

    /// Run one simulation frame
    ///
    /// `pose` is `None` when no hand was detected; the world is then stepped
    /// with the platform left where it was. While paused the filter still
    /// tracks the hand but neither the platform nor the world moves.
    pub fn update(&mut self, world: &mut World, pose: Option<&HandPose>) -> SimulationResult {
        let mut result = SimulationResult::default();

        if let Some(pose) = pose {
            let (position, angle) = self.filter.apply(pose);
            if !self.paused {
                world.update_platform(position, angle, self.dt);
                result.platform_updated = true;
            }
        }

        if !self.paused {
            result.report = Some(world.step(self.dt));
        }

        result
    }

    /// Apply a session action
    ///
    /// Returns `false` when the session should end.
    pub fn handle_action(&mut self, action: GameAction, world: &mut World) -> bool {
        match action {
            GameAction::Quit => {
                log::info!("Quit requested");
                return false;
            }
            GameAction::TogglePause => {
                self.paused = !self.paused;
                log::info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
            }
            GameAction::Reset => {
                world.reset();
                self.filter.reset();
            }
        }
        true
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }
}
