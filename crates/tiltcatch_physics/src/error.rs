//! Physics error types
//!
//! Only configuration mistakes are errors here. Once a body is in the world,
//! stepping cannot fail.

use std::fmt;

/// Error type for body and shape construction
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A dynamic body was given a zero, negative or non-finite mass
    InvalidMass { mass: f64 },
    /// A shape dimension was zero, negative or non-finite
    InvalidShape(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass { mass } => {
                write!(f, "Dynamic body mass must be positive and finite, got {}", mass)
            }
            PhysicsError::InvalidShape(msg) => write!(f, "Invalid collision shape: {}", msg),
        }
    }
}

impl std::error::Error for PhysicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mass_display() {
        let err = PhysicsError::InvalidMass { mass: 0.0 };
        let msg = format!("{}", err);
        assert!(msg.contains("mass"));
        assert!(msg.contains('0'));
    }

    #[test]
    fn test_invalid_shape_display() {
        let err = PhysicsError::InvalidShape("radius -1".to_string());
        assert!(format!("{}", err).contains("radius -1"));
    }
}
