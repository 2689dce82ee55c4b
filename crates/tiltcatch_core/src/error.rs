//! World error types

use std::fmt;
use tiltcatch_physics::PhysicsError;

/// Error type for world construction
///
/// Every variant is a configuration mistake detected up front. Nothing that
/// happens while stepping a constructed world is reported as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// Width or height is zero, negative or non-finite
    InvalidDimensions { width: f64, height: f64 },
    /// Some other configuration value is out of range
    InvalidConfig(String),
    /// A body or shape could not be built
    Physics(PhysicsError),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::InvalidDimensions { width, height } => {
                write!(f, "World dimensions must be positive, got {} x {}", width, height)
            }
            WorldError::InvalidConfig(msg) => write!(f, "Invalid world configuration: {}", msg),
            WorldError::Physics(err) => write!(f, "Physics error: {}", err),
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldError::Physics(err) => Some(err),
            WorldError::InvalidDimensions { .. } => None,
            WorldError::InvalidConfig(_) => None,
        }
    }
}

impl From<PhysicsError> for WorldError {
    fn from(err: PhysicsError) -> Self {
        WorldError::Physics(err)
    }
}
