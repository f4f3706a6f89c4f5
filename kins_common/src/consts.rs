//! System-wide constants for the trivkins workspace.
//!
//! Single source of truth for joint limits and defaults.

use static_assertions::const_assert;

/// Maximum number of joints handled by the motion core (kinematic + extra).
pub const MAX_JOINTS: usize = 16;

/// Maximum number of extra (non-kinematic) joints per module.
pub const MAX_EXTRA_JOINTS: usize = 9;

/// Number of pose axes (X Y Z A B C U V W).
pub const NUM_AXES: usize = 9;

/// Default module name, used as the prefix of every pin and function name.
pub const DEFAULT_MODULE_NAME: &str = "trivkinsplus";

/// Default control cycle time in microseconds (1 kHz = 1000 µs).
pub const CYCLE_TIME_US: u64 = 1000;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/trivkins/trivkins.toml";

const_assert!(MAX_EXTRA_JOINTS <= MAX_JOINTS);
const_assert!(NUM_AXES <= MAX_JOINTS);
