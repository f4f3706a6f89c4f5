//! # Trivkins Library
//!
//! Trivial one-axis-per-joint kinematics with support for extra joints that
//! take part in motion but are excluded from the pose mapping.
//!
//! # Module Structure
//!
//! - [`joint_map`] - Axis letter parsing and joint ↔ pose copy
//! - [`kinematics`] - `TrivKins`, the `Kinematics` implementation
//! - [`extra_joints`] - Per-cycle extra-joint update and pin setup
//! - [`module`] - Module load sequence and owned context
//! - [`registry`] - In-process signal registry
//! - [`core`] - Host core, cyclic loop management
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          trivkins                                │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────────────┐  │
//! │  │ Motion core │───►│  KinsModule  │    │   SignalRegistry    │  │
//! │  │ fwd / inv   │    │  (TrivKins)  │    │ pins + functions    │  │
//! │  └─────────────┘    └──────────────┘    └──────────┬──────────┘  │
//! │                                                    │ every cycle │
//! │                                                    ▼             │
//! │                                         ┌─────────────────────┐  │
//! │                                         │    ExtraJoints      │  │
//! │                                         │  (PeriodicFunction) │  │
//! │                                         └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

pub mod core;
pub mod extra_joints;
pub mod joint_map;
pub mod kinematics;
pub mod module;
pub mod registry;

// Re-export key types for convenience
pub use crate::core::HostCore;
pub use crate::extra_joints::{ExtraJointState, ExtraJoints};
pub use crate::joint_map::AxisJointMap;
pub use crate::kinematics::TrivKins;
pub use crate::module::KinsModule;
pub use crate::registry::SignalRegistry;
