//! Pose record and joint vector.

use serde::{Deserialize, Serialize};

use crate::axis::AxisId;
use crate::consts::MAX_JOINTS;

/// Joint positions exchanged with the motion core, indexed by joint number.
///
/// Fixed size so that no joint index can fall outside the table.
pub type JointPositions = [f64; MAX_JOINTS];

/// Cartesian/angular pose, one scalar per [`AxisId`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Linear X.
    pub x: f64,
    /// Linear Y.
    pub y: f64,
    /// Linear Z.
    pub z: f64,
    /// Rotary A.
    pub a: f64,
    /// Rotary B.
    pub b: f64,
    /// Rotary C.
    pub c: f64,
    /// Auxiliary U.
    pub u: f64,
    /// Auxiliary V.
    pub v: f64,
    /// Auxiliary W.
    pub w: f64,
}

impl Pose {
    /// Read the field named by `axis`.
    #[inline]
    pub const fn get(&self, axis: AxisId) -> f64 {
        match axis {
            AxisId::X => self.x,
            AxisId::Y => self.y,
            AxisId::Z => self.z,
            AxisId::A => self.a,
            AxisId::B => self.b,
            AxisId::C => self.c,
            AxisId::U => self.u,
            AxisId::V => self.v,
            AxisId::W => self.w,
        }
    }

    /// Write the field named by `axis`.
    #[inline]
    pub fn set(&mut self, axis: AxisId, value: f64) {
        let field = match axis {
            AxisId::X => &mut self.x,
            AxisId::Y => &mut self.y,
            AxisId::Z => &mut self.z,
            AxisId::A => &mut self.a,
            AxisId::B => &mut self.b,
            AxisId::C => &mut self.c,
            AxisId::U => &mut self.u,
            AxisId::V => &mut self.v,
            AxisId::W => &mut self.w,
        };
        *field = value;
    }
}
