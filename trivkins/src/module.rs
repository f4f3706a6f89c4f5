//! Kinematics module load sequence.
//!
//! `KinsModule::load` parses the axis letters, sets up the extra joints and
//! returns an owned context that the motion core uses for every
//! conversion. Any failure aborts the load and is logged here once; pins
//! already created are not rolled back and the host must discard the
//! registrar contents.

use kins_common::config::KinsConfig;
use kins_common::error::KinsError;
use kins_common::hal::SignalRegistrar;
use kins_common::kinematics::{Kinematics, KinematicsFlags, KinematicsType};
use kins_common::pose::{JointPositions, Pose};
use std::ops::Range;
use tracing::{error, info};

use crate::extra_joints::ExtraJoints;
use crate::joint_map::AxisJointMap;
use crate::kinematics::TrivKins;

/// A loaded trivial-kinematics module.
#[derive(Debug, Clone)]
pub struct KinsModule {
    name: String,
    kins: TrivKins,
    extra_joints: Range<usize>,
}

impl KinsModule {
    /// Load the module described by `config` into `registrar`.
    ///
    /// # Errors
    /// Any [`KinsError`] from axis parsing or extra-joint setup.
    pub fn load<R>(config: &KinsConfig, registrar: &mut R) -> Result<Self, KinsError>
    where
        R: SignalRegistrar + ?Sized,
    {
        let name = config.shared.service_name.as_str();
        let params = &config.kinematics;

        let loaded = AxisJointMap::parse(&params.coordinates).and_then(|map| {
            let kins = TrivKins::new(map);
            ExtraJoints::setup(
                kins.num_joints(),
                params.extrajoints,
                params.max_joints,
                name,
                &mut *registrar,
            )
            .map(|extra_joints| (kins, extra_joints))
        });
        let (kins, extra_joints) = loaded.inspect_err(|e| {
            error!("{}: load failed: {}", name, e);
        })?;

        info!(
            "{} ready: {} kinematic joint(s) [{}], {} extra joint(s)",
            name,
            kins.num_joints(),
            kins.map(),
            extra_joints.len()
        );

        Ok(Self {
            name: name.to_string(),
            kins,
            extra_joints,
        })
    }

    /// Module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kinematics of this module.
    pub fn kinematics(&self) -> &TrivKins {
        &self.kins
    }

    /// Number of kinematic joints.
    pub fn num_kinematic_joints(&self) -> usize {
        self.kins.num_joints()
    }

    /// Joint indices of the extra joints.
    pub fn extra_joints(&self) -> Range<usize> {
        self.extra_joints.clone()
    }

    /// Total joint count (kinematic + extra).
    pub fn num_joints(&self) -> usize {
        self.extra_joints.end.max(self.kins.num_joints())
    }
}

impl Kinematics for KinsModule {
    fn kind(&self) -> KinematicsType {
        self.kins.kind()
    }

    fn forward(&self, joints: &JointPositions, pose: &mut Pose) {
        self.kins.forward(joints, pose);
    }

    fn inverse(&self, pose: &Pose, joints: &mut JointPositions) {
        self.kins.inverse(pose, joints);
    }

    fn home(&self, joints: &JointPositions, pose: &mut Pose) -> KinematicsFlags {
        self.kins.home(joints, pose)
    }
}
