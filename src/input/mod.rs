//! Input handling
//!
//! Session controls only. Hand poses go straight to the simulation system.

mod input_mapper;

pub use input_mapper::{GameAction, InputMapper};
