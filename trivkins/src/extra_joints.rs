//! Extra (non-kinematic) joints.
//!
//! Extra joints follow the kinematic joints in joint numbering and are
//! excluded from the pose mapping. Their commanded and feedback positions
//! are produced every cycle by a periodic function rather than by the
//! kinematics calls, because the motion core does not invoke kinematics
//! before homing completes.
//!
//! ## Pins (per extra joint `j`)
//!
//! | Pin | Dir | Type |
//! |-----|-----|------|
//! | `<module>.<j>.prehome-cmd` | in | float |
//! | `<module>.<j>.posthome-cmd` | in | float |
//! | `<module>.<j>.homed` | in | bit |
//! | `<module>.<j>.prehome-fb` | in | float |
//! | `<module>.<j>.motor-offset` | in | float |
//! | `<module>.<j>.motor-pos-cmd` | out | float |
//! | `<module>.<j>.motor-pos-fb` | out | float |
//!
//! ## Cycle rule
//!
//! | `homed` | `motor-pos-cmd` | `motor-pos-fb` |
//! |---------|-----------------|----------------|
//! | false | `prehome-cmd` | `prehome-fb` |
//! | true | `posthome-cmd + motor-offset` | `prehome-cmd` |

use heapless::Vec;
use kins_common::consts::{MAX_EXTRA_JOINTS, MAX_JOINTS};
use kins_common::error::KinsError;
use kins_common::hal::{BitPin, FloatPin, PeriodicFunction, PinDirection, SignalRegistrar};
use std::ops::Range;
use std::time::Duration;
use tracing::{debug, info};

/// Inputs and outputs of one extra joint for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExtraJointState {
    /// Joint has completed its homing sequence.
    pub homed: bool,
    /// Command used before homing.
    pub prehome_cmd: f64,
    /// Command used after homing.
    pub posthome_cmd: f64,
    /// Feedback used before homing.
    pub prehome_fb: f64,
    /// Motor offset added to the post-home command.
    pub motor_offset: f64,
    /// Commanded motor position (output).
    pub motor_pos_cmd: f64,
    /// Motor position feedback (output).
    pub motor_pos_fb: f64,
}

impl ExtraJointState {
    /// Recompute both outputs from the current inputs.
    ///
    /// Once homed, feedback mirrors `prehome_cmd` instead of a measured
    /// value. This short-circuit keeps feedback from lagging the command
    /// across the homing transition, at the cost of feedback fidelity.
    #[inline]
    pub fn blend(&mut self) {
        if self.homed {
            self.motor_pos_cmd = self.posthome_cmd + self.motor_offset;
            self.motor_pos_fb = self.prehome_cmd;
        } else {
            self.motor_pos_cmd = self.prehome_cmd;
            self.motor_pos_fb = self.prehome_fb;
        }
    }
}

/// Pin handles of one extra joint.
#[derive(Debug, Clone)]
pub struct ExtraJointPins {
    joint: usize,
    prehome_cmd: FloatPin,
    posthome_cmd: FloatPin,
    homed: BitPin,
    prehome_fb: FloatPin,
    motor_offset: FloatPin,
    motor_pos_cmd: FloatPin,
    motor_pos_fb: FloatPin,
}

impl ExtraJointPins {
    /// Create the seven pins of joint `joint`, in pin-table order.
    fn register<R>(registrar: &mut R, module: &str, joint: usize) -> Result<Self, KinsError>
    where
        R: SignalRegistrar + ?Sized,
    {
        let name = |field: &str| format!("{module}.{joint}.{field}");
        Ok(Self {
            joint,
            prehome_cmd: registrar.new_float_pin(PinDirection::In, &name("prehome-cmd"))?,
            posthome_cmd: registrar.new_float_pin(PinDirection::In, &name("posthome-cmd"))?,
            homed: registrar.new_bit_pin(PinDirection::In, &name("homed"))?,
            prehome_fb: registrar.new_float_pin(PinDirection::In, &name("prehome-fb"))?,
            motor_offset: registrar.new_float_pin(PinDirection::In, &name("motor-offset"))?,
            motor_pos_cmd: registrar.new_float_pin(PinDirection::Out, &name("motor-pos-cmd"))?,
            motor_pos_fb: registrar.new_float_pin(PinDirection::Out, &name("motor-pos-fb"))?,
        })
    }

    /// Joint index of these pins.
    #[inline]
    pub fn joint(&self) -> usize {
        self.joint
    }

    /// Read inputs and the last written outputs.
    #[inline]
    pub fn sample(&self) -> ExtraJointState {
        ExtraJointState {
            homed: self.homed.get(),
            prehome_cmd: self.prehome_cmd.get(),
            posthome_cmd: self.posthome_cmd.get(),
            prehome_fb: self.prehome_fb.get(),
            motor_offset: self.motor_offset.get(),
            motor_pos_cmd: self.motor_pos_cmd.get(),
            motor_pos_fb: self.motor_pos_fb.get(),
        }
    }

    /// Write the outputs of `state`.
    #[inline]
    fn publish(&self, state: &ExtraJointState) {
        self.motor_pos_cmd.set(state.motor_pos_cmd);
        self.motor_pos_fb.set(state.motor_pos_fb);
    }
}

/// Periodic update over all extra joints of one module.
///
/// Owns the pin handles; the module moves it into the registrar at setup,
/// after which only the host's cyclic invocation touches it.
#[derive(Debug)]
pub struct ExtraJoints {
    num_kinematic_joints: usize,
    joints: Vec<ExtraJointPins, MAX_EXTRA_JOINTS>,
}

impl ExtraJoints {
    /// Name of the exported update function for `module`.
    pub fn function_name(module: &str) -> String {
        format!("{module}.extrajoints.update")
    }

    /// Validate joint counts and create every extra-joint pin.
    ///
    /// Negative `extra_joints` is treated as zero.
    ///
    /// # Errors
    /// - `CapacityExceeded` if `kinematic_joints + extra_joints` exceeds
    ///   `max_joints`, if `extra_joints` exceeds `MAX_EXTRA_JOINTS`, or if
    ///   `max_joints` exceeds `MAX_JOINTS`
    /// - `RegistrationFailure` / `AllocationFailure` from the registrar.
    ///   Pins created before the failure stay registered.
    pub fn create<R>(
        kinematic_joints: usize,
        extra_joints: i32,
        max_joints: usize,
        module: &str,
        registrar: &mut R,
    ) -> Result<Self, KinsError>
    where
        R: SignalRegistrar + ?Sized,
    {
        let extra = usize::try_from(extra_joints).unwrap_or(0);

        if max_joints > MAX_JOINTS {
            return Err(KinsError::CapacityExceeded {
                requested: max_joints,
                maximum: MAX_JOINTS,
            });
        }
        let total = match kinematic_joints.checked_add(extra) {
            Some(total) if total <= max_joints => total,
            total => {
                return Err(KinsError::CapacityExceeded {
                    requested: total.unwrap_or(usize::MAX),
                    maximum: max_joints,
                });
            }
        };
        if extra > MAX_EXTRA_JOINTS {
            return Err(KinsError::CapacityExceeded {
                requested: extra,
                maximum: MAX_EXTRA_JOINTS,
            });
        }

        let mut joints = Vec::new();
        for joint in kinematic_joints..total {
            let pins = ExtraJointPins::register(&mut *registrar, module, joint)?;
            joints.push(pins).map_err(|_| {
                KinsError::AllocationFailure(format!("extra joint table full at joint {joint}"))
            })?;
        }
        debug!(
            "EXTRAJOINTS: created pins for joints {}..{}",
            kinematic_joints, total
        );

        Ok(Self {
            num_kinematic_joints: kinematic_joints,
            joints,
        })
    }

    /// Create every extra-joint pin and export the update function as
    /// `<module>.extrajoints.update`.
    ///
    /// Returns the joint index range governed by the exported function.
    ///
    /// # Errors
    /// As [`ExtraJoints::create`], plus `RegistrationFailure` if the
    /// function cannot be exported.
    pub fn setup<R>(
        kinematic_joints: usize,
        extra_joints: i32,
        max_joints: usize,
        module: &str,
        registrar: &mut R,
    ) -> Result<Range<usize>, KinsError>
    where
        R: SignalRegistrar + ?Sized,
    {
        let extra = Self::create(
            kinematic_joints,
            extra_joints,
            max_joints,
            module,
            &mut *registrar,
        )?;
        let range = extra.joint_range();
        let name = Self::function_name(module);

        registrar.export_function(&name, Box::new(extra))?;

        info!(
            "EXTRAJOINTS: {} extra joint(s) {:?}, exported {}",
            range.len(),
            range,
            name
        );
        Ok(range)
    }

    /// Joint indices governed by this instance.
    #[inline]
    pub fn joint_range(&self) -> Range<usize> {
        self.num_kinematic_joints..self.num_kinematic_joints + self.joints.len()
    }

    /// Number of extra joints.
    #[inline]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Returns true when no extra joints are configured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Pin handles in joint order.
    pub fn pins(&self) -> &[ExtraJointPins] {
        &self.joints
    }
}

impl PeriodicFunction for ExtraJoints {
    /// Recompute every extra joint from its current inputs. The period is
    /// not used; no state carries over between cycles.
    fn update(&mut self, _period: Duration) {
        for pins in &self.joints {
            let mut state = pins.sample();
            state.blend();
            pins.publish(&state);
        }
    }
}
