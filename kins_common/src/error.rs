//! Module setup error taxonomy.
//!
//! Every variant is fatal to module load. Steady-state operations
//! (forward, inverse, cyclic update) never return errors.

use thiserror::Error;

use crate::config::ConfigError;
use crate::hal::RegistrationError;

/// Error types for kinematics module setup.
#[derive(Debug, Clone, Error)]
pub enum KinsError {
    /// Axis letter string contains a character that is not an axis letter
    /// or whitespace.
    #[error("Invalid character '{character}' in coordinates")]
    InvalidConfiguration {
        /// Offending character.
        character: char,
    },

    /// No axis letters were given.
    #[error("Missing parameter coordinates=")]
    MissingConfiguration,

    /// Joint count exceeds the system maximum.
    #[error("Joint count {requested} exceeds maximum {maximum}")]
    CapacityExceeded {
        /// Requested joint count.
        requested: usize,
        /// Allowed maximum.
        maximum: usize,
    },

    /// Pin or function creation failed.
    #[error("Registration failed: {0}")]
    RegistrationFailure(String),

    /// Backing storage could not be obtained.
    #[error("Allocation failed: {0}")]
    AllocationFailure(String),

    /// Configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<RegistrationError> for KinsError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Exhausted { .. } => Self::AllocationFailure(err.to_string()),
            _ => Self::RegistrationFailure(err.to_string()),
        }
    }
}
