//! Prelude module for common re-exports.
//!
//! ```rust
//! use kins_common::prelude::*;
//! ```

// ─── Axes & Pose ────────────────────────────────────────────────────
pub use crate::axis::AxisId;
pub use crate::pose::{JointPositions, Pose};

// ─── Kinematics ─────────────────────────────────────────────────────
pub use crate::kinematics::{Kinematics, KinematicsFlags, KinematicsType};

// ─── Signals ────────────────────────────────────────────────────────
pub use crate::hal::{
    BitPin, FloatPin, PeriodicFunction, PinDirection, RegistrationError, SignalRegistrar,
};

// ─── Errors & Configuration ─────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, KinsConfig, LogLevel, SharedConfig};
pub use crate::error::KinsError;

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{MAX_EXTRA_JOINTS, MAX_JOINTS, NUM_AXES};
