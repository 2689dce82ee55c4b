//! TiltCatch - catch falling balls on a hand-tilted platform
//!
//! The simulation lives in the workspace crates; this crate wires them into a
//! session: configuration loading, session controls and the per-frame loop.

pub mod config;
pub mod input;
pub mod systems;
