//! Trivial kinematics: one pose axis per joint.

use kins_common::kinematics::{Kinematics, KinematicsFlags, KinematicsType};
use kins_common::pose::{JointPositions, Pose};

use crate::joint_map::AxisJointMap;

/// Identity-style kinematics over an [`AxisJointMap`].
///
/// Holds only the immutable map, so every conversion is a pure table
/// lookup with no hidden state.
#[derive(Debug, Clone)]
pub struct TrivKins {
    map: AxisJointMap,
}

impl TrivKins {
    /// Wrap a parsed correspondence table.
    pub fn new(map: AxisJointMap) -> Self {
        Self { map }
    }

    /// The correspondence table.
    #[inline]
    pub fn map(&self) -> &AxisJointMap {
        &self.map
    }

    /// Number of kinematic joints.
    #[inline]
    pub fn num_joints(&self) -> usize {
        self.map.num_joints()
    }
}

impl Kinematics for TrivKins {
    fn kind(&self) -> KinematicsType {
        KinematicsType::Both
    }

    #[inline]
    fn forward(&self, joints: &JointPositions, pose: &mut Pose) {
        self.map.forward(joints, pose);
    }

    #[inline]
    fn inverse(&self, pose: &Pose, joints: &mut JointPositions) {
        self.map.inverse(pose, joints);
    }

    /// Homing gives joints preference: the home pose is the forward
    /// conversion of the home joint positions.
    fn home(&self, joints: &JointPositions, pose: &mut Pose) -> KinematicsFlags {
        self.forward(joints, pose);
        KinematicsFlags::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kins_common::axis::AxisId;
    use kins_common::consts::MAX_JOINTS;

    fn kins(coordinates: &str) -> TrivKins {
        TrivKins::new(AxisJointMap::parse(coordinates).unwrap())
    }

    #[test]
    fn reports_both() {
        assert_eq!(kins("XYZ").kind(), KinematicsType::Both);
    }

    #[test]
    fn home_matches_forward() {
        let k = kins("XYZAB");
        let mut joints = [0.0; MAX_JOINTS];
        joints[..5].copy_from_slice(&[1.0, 2.0, 3.0, 45.0, -30.0]);

        let mut via_forward = Pose::default();
        k.forward(&joints, &mut via_forward);

        let mut via_home = Pose::default();
        let flags = k.home(&joints, &mut via_home);

        assert_eq!(flags, KinematicsFlags::NONE);
        assert_eq!(via_home, via_forward);
        assert_eq!(via_home.get(AxisId::B), -30.0);
    }

    #[test]
    fn repeated_calls_are_idempotent() {
        let k = kins("UVW");
        let pose = Pose {
            u: 0.5,
            v: 0.25,
            w: 0.125,
            ..Pose::default()
        };
        let mut first = [0.0; MAX_JOINTS];
        let mut second = [0.0; MAX_JOINTS];
        k.inverse(&pose, &mut first);
        k.inverse(&pose, &mut second);
        k.inverse(&pose, &mut second);
        assert_eq!(first, second);
        assert_eq!(&first[..3], &[0.5, 0.25, 0.125]);
    }
}
