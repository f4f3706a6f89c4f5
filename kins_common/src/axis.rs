//! Axis identifiers.
//!
//! One identifier per scalar field of [`Pose`](crate::pose::Pose): three
//! linear axes (X, Y, Z), three rotary axes (A, B, C) and three auxiliary
//! linear axes (U, V, W).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::NUM_AXES;

/// Axis identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum AxisId {
    /// Linear X.
    X = 0,
    /// Linear Y.
    Y = 1,
    /// Linear Z.
    Z = 2,
    /// Rotary about X.
    A = 3,
    /// Rotary about Y.
    B = 4,
    /// Rotary about Z.
    C = 5,
    /// Auxiliary linear parallel to X.
    U = 6,
    /// Auxiliary linear parallel to Y.
    V = 7,
    /// Auxiliary linear parallel to Z.
    W = 8,
}

impl AxisId {
    /// All axes in pose field order.
    pub const ALL: [AxisId; NUM_AXES] = [
        Self::X,
        Self::Y,
        Self::Z,
        Self::A,
        Self::B,
        Self::C,
        Self::U,
        Self::V,
        Self::W,
    ];

    /// Parse an axis letter (case-insensitive).
    #[inline]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'x' | 'X' => Some(Self::X),
            'y' | 'Y' => Some(Self::Y),
            'z' | 'Z' => Some(Self::Z),
            'a' | 'A' => Some(Self::A),
            'b' | 'B' => Some(Self::B),
            'c' | 'C' => Some(Self::C),
            'u' | 'U' => Some(Self::U),
            'v' | 'V' => Some(Self::V),
            'w' | 'W' => Some(Self::W),
            _ => None,
        }
    }

    /// Position of this axis in pose field order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Upper-case letter of this axis.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::U => 'U',
            Self::V => 'V',
            Self::W => 'W',
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
