//! Module load and extra-joint cycle integration tests.
//!
//! Loads the module through `KinsModule::load()` into a `SignalRegistry`
//! and drives it the way the host does: inputs written between cycles,
//! `run_functions()` once per cycle, outputs read back.

use kins_common::config::KinsConfig;
use kins_common::consts::MAX_JOINTS;
use kins_common::error::KinsError;
use kins_common::hal::{
    BitPin, FloatPin, PeriodicFunction, PinDirection, RegistrationError, SignalRegistrar,
};
use kins_common::kinematics::{Kinematics, KinematicsType};
use kins_common::pose::Pose;
use std::time::Duration;
use trivkins::{ExtraJoints, KinsModule, SignalRegistry};

const PERIOD: Duration = Duration::from_millis(1);

fn config(name: &str, coordinates: &str, extrajoints: i32) -> KinsConfig {
    let mut config = KinsConfig::default();
    config.shared.service_name = name.to_string();
    config.kinematics.coordinates = coordinates.to_string();
    config.kinematics.extrajoints = extrajoints;
    config
}

/// Registrar that accepts pins but refuses every function export.
#[derive(Default)]
struct NoExportRegistrar {
    inner: SignalRegistry,
}

impl SignalRegistrar for NoExportRegistrar {
    fn new_float_pin(
        &mut self,
        dir: PinDirection,
        name: &str,
    ) -> Result<FloatPin, RegistrationError> {
        self.inner.new_float_pin(dir, name)
    }

    fn new_bit_pin(&mut self, dir: PinDirection, name: &str) -> Result<BitPin, RegistrationError> {
        self.inner.new_bit_pin(dir, name)
    }

    fn export_function(
        &mut self,
        name: &str,
        _function: Box<dyn PeriodicFunction>,
    ) -> Result<(), RegistrationError> {
        Err(RegistrationError::Duplicate(name.to_string()))
    }
}

#[test]
fn pin_and_function_names_follow_module_name() {
    let mut reg = SignalRegistry::new();
    KinsModule::load(&config("tkp", "XYZ", 2), &mut reg).unwrap();

    let mut expected = Vec::new();
    for joint in [3, 4] {
        for field in [
            "homed",
            "motor-offset",
            "motor-pos-cmd",
            "motor-pos-fb",
            "posthome-cmd",
            "prehome-cmd",
            "prehome-fb",
        ] {
            expected.push(format!("tkp.{joint}.{field}"));
        }
    }
    assert_eq!(reg.pin_names(), expected);
    assert_eq!(reg.function_names(), vec!["tkp.extrajoints.update"]);
    assert_eq!(ExtraJoints::function_name("tkp"), "tkp.extrajoints.update");

    assert_eq!(reg.direction("tkp.3.homed"), Some(PinDirection::In));
    assert_eq!(reg.direction("tkp.4.motor-pos-fb"), Some(PinDirection::Out));
}

#[test]
fn homing_transition_through_registry() {
    let mut reg = SignalRegistry::new();
    let module = KinsModule::load(&config("tkp", "XYZAB", 1), &mut reg).unwrap();
    assert_eq!(module.extra_joints(), 5..6);

    let input = |f: &str| reg.float_pin(&format!("tkp.5.{f}")).unwrap();
    let homed = reg.bit_pin("tkp.5.homed").unwrap();
    let cmd = input("motor-pos-cmd");
    let fb = input("motor-pos-fb");

    input("prehome-cmd").set(1.0);
    input("prehome-fb").set(0.5);
    input("posthome-cmd").set(2.0);
    input("motor-offset").set(0.1);

    reg.run_functions(PERIOD);
    assert_eq!(cmd.get(), 1.0);
    assert_eq!(fb.get(), 0.5);

    homed.set(true);
    reg.run_functions(PERIOD);
    assert!((cmd.get() - 2.1).abs() < 1e-12);
    assert_eq!(fb.get(), 1.0);

    // Stays homed indefinitely with no drift.
    for _ in 0..100 {
        reg.run_functions(PERIOD);
    }
    assert!((cmd.get() - 2.1).abs() < 1e-12);
    assert_eq!(fb.get(), 1.0);
}

#[test]
fn extra_joints_follow_their_own_pins() {
    let mut reg = SignalRegistry::new();
    KinsModule::load(&config("tkp", "XY", 3), &mut reg).unwrap();

    for joint in 2..5 {
        let pin = reg.float_pin(&format!("tkp.{joint}.prehome-cmd")).unwrap();
        pin.set(joint as f64 * 10.0);
    }
    reg.bit_pin("tkp.3.homed").unwrap().set(true);
    reg.float_pin("tkp.3.posthome-cmd").unwrap().set(-1.0);

    reg.run_functions(PERIOD);

    let out = |joint: usize| {
        reg.float_pin(&format!("tkp.{joint}.motor-pos-cmd"))
            .unwrap()
            .get()
    };
    assert_eq!(out(2), 20.0);
    assert_eq!(out(3), -1.0);
    assert_eq!(out(4), 40.0);
}

#[test]
fn zero_extra_joints_exports_noop_update() {
    let mut reg = SignalRegistry::new();
    let module = KinsModule::load(&config("tkp", "XYZ", 0), &mut reg).unwrap();
    assert!(module.extra_joints().is_empty());
    assert_eq!(reg.pin_count(), 0);
    assert_eq!(reg.function_count(), 1);
    reg.run_functions(PERIOD);
    assert_eq!(reg.pin_count(), 0);
}

#[test]
fn capacity_exceeded_with_small_maximum() {
    let mut reg = SignalRegistry::new();
    let mut cfg = config("tkp", "XYZABC", 5);
    cfg.kinematics.max_joints = 9;
    let err = KinsModule::load(&cfg, &mut reg).unwrap_err();
    assert!(matches!(
        err,
        KinsError::CapacityExceeded {
            requested: 11,
            maximum: 9
        }
    ));
}

#[test]
fn invalid_letter_aborts_load() {
    let mut reg = SignalRegistry::new();
    let err = KinsModule::load(&config("tkp", "XQZ", 1), &mut reg).unwrap_err();
    assert!(matches!(
        err,
        KinsError::InvalidConfiguration { character: 'Q' }
    ));
    assert_eq!(reg.pin_count(), 0);
}

#[test]
fn colliding_pin_is_registration_failure() {
    let mut reg = SignalRegistry::new();
    reg.new_float_pin(PinDirection::In, "tkp.4.prehome-fb")
        .unwrap();
    let err = KinsModule::load(&config("tkp", "XYZ", 2), &mut reg).unwrap_err();
    assert!(matches!(err, KinsError::RegistrationFailure(_)));
    // No rollback: pins created before the collision remain.
    assert!(reg.float_pin("tkp.3.prehome-cmd").is_some());
    assert_eq!(reg.function_count(), 0);
}

#[test]
fn exhausted_registry_is_allocation_failure() {
    let mut reg = SignalRegistry::with_capacity(10);
    let err = KinsModule::load(&config("tkp", "XYZ", 2), &mut reg).unwrap_err();
    assert!(matches!(err, KinsError::AllocationFailure(_)));
    assert_eq!(reg.pin_count(), 10);
}

#[test]
fn refused_export_is_registration_failure() {
    let mut reg = NoExportRegistrar::default();
    let err = KinsModule::load(&config("tkp", "XYZ", 1), &mut reg).unwrap_err();
    assert!(matches!(err, KinsError::RegistrationFailure(_)));
    assert_eq!(reg.inner.pin_count(), 7);
}

#[test]
fn kinematics_ignore_extra_joints() {
    let mut reg = SignalRegistry::new();
    let module = KinsModule::load(&config("tkp", "XZC", 2), &mut reg).unwrap();
    assert_eq!(module.kind(), KinematicsType::Both);

    let mut joints = [0.0; MAX_JOINTS];
    joints[..5].copy_from_slice(&[1.0, 2.0, 3.0, 100.0, 200.0]);

    let mut pose = Pose::default();
    module.forward(&joints, &mut pose);
    assert_eq!((pose.x, pose.z, pose.c), (1.0, 2.0, 3.0));
    assert_eq!((pose.y, pose.a, pose.u), (0.0, 0.0, 0.0));

    pose.x = -1.0;
    module.inverse(&pose, &mut joints);
    assert_eq!(joints[0], -1.0);
    assert_eq!(&joints[3..5], &[100.0, 200.0]);

    let mut home = Pose::default();
    module.home(&joints, &mut home);
    assert_eq!(home, pose);
}

#[test]
fn host_core_from_config_file() {
    use kins_common::config::ConfigLoader;
    use std::io::Write;
    use trivkins::HostCore;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[shared]
service_name = "tkp"

[kinematics]
coordinates = "X Y Z"
extrajoints = 1
cycle_time_us = 50
"#
    )
    .unwrap();
    file.flush().unwrap();

    let cfg = KinsConfig::load(file.path()).unwrap();
    let mut core = HostCore::new(&cfg).unwrap();
    assert_eq!(core.module().num_kinematic_joints(), 3);

    core.registry()
        .float_pin("tkp.3.prehome-cmd")
        .unwrap()
        .set(0.75);
    core.run(Some(3));
    assert_eq!(core.stats().cycle_count, 3);
    assert_eq!(
        core.registry()
            .float_pin("tkp.3.motor-pos-cmd")
            .unwrap()
            .get(),
        0.75
    );
}
