//! Signal endpoints and the registration capability a module consumes.
//!
//! This module defines:
//! - `FloatPin` / `BitPin` - Shared single-writer signal handles
//! - `PinDirection` - Which side writes a pin
//! - `PeriodicFunction` trait - Work invoked once per control cycle
//! - `SignalRegistrar` trait - Host capability for creating pins and
//!   exporting periodic functions
//! - `RegistrationError` enum - Failures reported by a registrar

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Maximum length of a pin or function name.
pub const HAL_NAME_LEN: usize = 47;

/// Direction of a pin as seen from the module that creates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinDirection {
    /// Written by an upstream collaborator, read by the module.
    In,
    /// Written by the module only.
    Out,
}

/// Floating-point signal handle.
///
/// Clones share one value. Stored as `f64` bits in an atomic so that reads
/// and writes from different call paths never tear.
#[derive(Debug, Clone, Default)]
pub struct FloatPin(Arc<AtomicU64>);

impl FloatPin {
    /// Create a pin holding `value`.
    pub fn new(value: f64) -> Self {
        Self(Arc::new(AtomicU64::new(value.to_bits())))
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Boolean signal handle. Clones share one value.
#[derive(Debug, Clone, Default)]
pub struct BitPin(Arc<AtomicBool>);

impl BitPin {
    /// Create a pin holding `value`.
    pub fn new(value: bool) -> Self {
        Self(Arc::new(AtomicBool::new(value)))
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Relaxed);
    }
}

/// Work invoked by the host once per control cycle.
///
/// # Timing Contracts
///
/// | Operation | Max Duration | RT Constraint |
/// |-----------|--------------|---------------|
/// | `update()` | cycle period | **HARD** |
///
/// The host guarantees no re-entrant or concurrent invocation.
pub trait PeriodicFunction: Send {
    /// Run one cycle. `period` is the nominal cycle period.
    fn update(&mut self, period: Duration);
}

/// Error types reported by a [`SignalRegistrar`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A pin or function with this name already exists.
    #[error("Name already registered: {0}")]
    Duplicate(String),

    /// Name is empty or longer than `HAL_NAME_LEN`.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// The host has no storage left for another endpoint.
    #[error("Registrar storage exhausted (capacity {capacity})")]
    Exhausted {
        /// Number of endpoints the registrar can hold.
        capacity: usize,
    },
}

/// Host capability for creating named signal endpoints and exporting
/// periodic functions.
///
/// Called only during module setup, never from the real-time path.
pub trait SignalRegistrar {
    /// Create a named floating-point pin.
    fn new_float_pin(&mut self, dir: PinDirection, name: &str)
        -> Result<FloatPin, RegistrationError>;

    /// Create a named boolean pin.
    fn new_bit_pin(&mut self, dir: PinDirection, name: &str) -> Result<BitPin, RegistrationError>;

    /// Export a function to be invoked every control cycle.
    fn export_function(
        &mut self,
        name: &str,
        function: Box<dyn PeriodicFunction>,
    ) -> Result<(), RegistrationError>;
}

/// Check a pin or function name against the registrar naming rules.
pub fn validate_name(name: &str) -> Result<(), RegistrationError> {
    if name.is_empty() || name.len() > HAL_NAME_LEN {
        return Err(RegistrationError::InvalidName(name.to_string()));
    }
    Ok(())
}
