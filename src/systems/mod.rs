//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod hand_script;
mod simulation;

pub use hand_script::HandScript;
pub use simulation::{SimulationResult, SimulationSystem};
