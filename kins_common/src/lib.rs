//! Trivkins Common Library
//!
//! Shared constants, axis/pose types, capability traits and configuration
//! loading for the trivkins workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - System-wide joint and axis limits
//! - [`axis`] - Axis identifier enumeration
//! - [`pose`] - Pose record and joint vector
//! - [`kinematics`] - Kinematics capability exposed to the motion core
//! - [`hal`] - Signal endpoints and periodic-function registration capability
//! - [`error`] - Module setup error taxonomy
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use kins_common::prelude::*;
//!
//! let mut pose = Pose::default();
//! pose.set(AxisId::Z, -4.0);
//! assert_eq!(pose.get(AxisId::Z), -4.0);
//! ```

pub mod axis;
pub mod config;
pub mod consts;
pub mod error;
pub mod hal;
pub mod kinematics;
pub mod pose;
pub mod prelude;
