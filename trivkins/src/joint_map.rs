//! Axis → joint correspondence table.
//!
//! Built once at module load from the ordered axis-letter string and
//! read-only afterwards. Joint `i` is the `i`-th letter of the string,
//! whitespace ignored, case-insensitive.

use heapless::Vec;
use kins_common::axis::AxisId;
use kins_common::consts::MAX_JOINTS;
use kins_common::error::KinsError;
use kins_common::pose::{JointPositions, Pose};
use tracing::{debug, warn};

/// Fixed-capacity correspondence table: joint index → axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisJointMap {
    joints: Vec<Option<AxisId>, MAX_JOINTS>,
}

impl AxisJointMap {
    /// Parse an ordered axis-letter string such as `"XYZAB"`.
    ///
    /// # Errors
    /// - `InvalidConfiguration` on any character that is neither an axis
    ///   letter nor a space/tab
    /// - `MissingConfiguration` if no letters are present
    /// - `CapacityExceeded` if more than `MAX_JOINTS` letters are present
    pub fn parse(coordinates: &str) -> Result<Self, KinsError> {
        let is_blank = |ch: &char| *ch == ' ' || *ch == '\t';
        let requested = coordinates.chars().filter(|ch| !is_blank(ch)).count();

        let mut joints: Vec<Option<AxisId>, MAX_JOINTS> = Vec::new();
        for ch in coordinates.chars().filter(|ch| !is_blank(ch)) {
            let axis = AxisId::from_letter(ch)
                .ok_or(KinsError::InvalidConfiguration { character: ch })?;
            if joints.push(Some(axis)).is_err() {
                return Err(KinsError::CapacityExceeded {
                    requested,
                    maximum: MAX_JOINTS,
                });
            }
        }

        if joints.is_empty() {
            return Err(KinsError::MissingConfiguration);
        }

        let map = Self { joints };
        for axis in map.duplicate_axes() {
            warn!(
                "Axis {} assigned to more than one joint; last joint wins in forward",
                axis
            );
        }
        debug!("Parsed coordinates {:?} into {}", coordinates, map);
        Ok(map)
    }

    /// Number of kinematic joints.
    #[inline]
    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    /// Axis assigned to `joint`, or `None` if unmapped or out of range.
    #[inline]
    pub fn axis(&self, joint: usize) -> Option<AxisId> {
        self.joints.get(joint).copied().flatten()
    }

    /// Last joint mapped to `axis`.
    pub fn joint_of(&self, axis: AxisId) -> Option<usize> {
        self.iter()
            .filter(|&(_, a)| a == axis)
            .map(|(joint, _)| joint)
            .last()
    }

    /// Iterate `(joint, axis)` pairs over mapped joints in joint order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, AxisId)> + '_ {
        self.joints
            .iter()
            .enumerate()
            .filter_map(|(joint, axis)| axis.map(|a| (joint, a)))
    }

    /// Axes that appear on more than one joint.
    pub fn duplicate_axes(&self) -> impl Iterator<Item = AxisId> + '_ {
        AxisId::ALL
            .into_iter()
            .filter(move |&axis| self.iter().filter(|&(_, a)| a == axis).count() > 1)
    }

    /// Copy kinematic joint values into their pose fields.
    ///
    /// Pose fields without a joint and joints past `num_joints()` are left
    /// untouched.
    #[inline]
    pub fn forward(&self, joints: &JointPositions, pose: &mut Pose) {
        for (joint, axis) in self.iter() {
            pose.set(axis, joints[joint]);
        }
    }

    /// Copy pose fields into their kinematic joints.
    ///
    /// Extra joints past `num_joints()` are left untouched.
    #[inline]
    pub fn inverse(&self, pose: &Pose, joints: &mut JointPositions) {
        for (joint, axis) in self.iter() {
            joints[joint] = pose.get(axis);
        }
    }
}

impl std::fmt::Display for AxisJointMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (joint, axis) in self.joints.iter().enumerate() {
            if joint > 0 {
                write!(f, " ")?;
            }
            match axis {
                Some(a) => write!(f, "{joint}:{a}")?,
                None => write!(f, "{joint}:-")?,
            }
        }
        Ok(())
    }
}
