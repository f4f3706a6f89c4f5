//! Kinematics capability exposed to the motion core.
//!
//! The motion core converts between joint space and pose space through this
//! trait. Implementations hold only immutable state built at module load, so
//! every call is idempotent and may happen at any point of the cycle.

use serde::{Deserialize, Serialize};

use crate::pose::{JointPositions, Pose};

/// Which conversion directions a kinematics module supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KinematicsType {
    /// Forward only.
    JointBased = 0,
    /// Inverse only.
    CartesianBased = 1,
    /// Both directions without ambiguity.
    Both = 2,
}

/// Solution flags reported alongside a conversion.
///
/// Trivial kinematics have a unique solution, so both words stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KinematicsFlags {
    /// Forward-solution selector.
    pub forward: u64,
    /// Inverse-solution selector.
    pub inverse: u64,
}

impl KinematicsFlags {
    /// No special flags.
    pub const NONE: Self = Self {
        forward: 0,
        inverse: 0,
    };
}

/// Interface implemented by kinematics modules.
///
/// # Timing
/// All methods are called from the real-time path and must not allocate,
/// block or log.
pub trait Kinematics {
    /// Supported conversion directions.
    fn kind(&self) -> KinematicsType;

    /// Joint positions to pose. Pose fields without a mapped joint keep
    /// their previous value.
    fn forward(&self, joints: &JointPositions, pose: &mut Pose);

    /// Pose to joint positions. Joints without a mapped axis keep their
    /// previous value.
    fn inverse(&self, pose: &Pose, joints: &mut JointPositions);

    /// Pose at the home position.
    fn home(&self, joints: &JointPositions, pose: &mut Pose) -> KinematicsFlags;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_is_none() {
        assert_eq!(KinematicsFlags::default(), KinematicsFlags::NONE);
    }
}
