//! # Trivkins Host Binary
//!
//! Loads the trivial kinematics module with its extra joints into an
//! in-process signal registry and runs the exported periodic functions.
//!
//! # Usage
//!
//! ```bash
//! # Run from a config file
//! trivkins --config config/trivkins.toml
//!
//! # Override module parameters
//! trivkins --coordinates XYZAB --extrajoints 2 --cycles 5000 -v
//! ```

#![deny(warnings)]

use clap::Parser;
use kins_common::config::{ConfigError, ConfigLoader, KinsConfig};
use kins_common::consts::{DEFAULT_CONFIG_PATH, MAX_JOINTS};
use kins_common::error::KinsError;
use kins_common::kinematics::Kinematics;
use kins_common::pose::Pose;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;
use trivkins::HostCore;

/// Trivkins - trivial kinematics with extra joints
#[derive(Parser, Debug)]
#[command(name = "trivkins")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Trivial kinematics with extra non-kinematic joints")]
#[command(long_about = None)]
struct Args {
    /// Path to module configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Axis letters ordered for joint creation (overrides config)
    #[arg(long)]
    coordinates: Option<String>,

    /// Number of extra joints, not used for kinematics (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    extrajoints: Option<i32>,

    /// Stop after this many cycles (runs until Ctrl-C otherwise)
    #[arg(long)]
    cycles: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    // The subscriber must exist before anything can fail, so a config that
    // cannot be loaded still falls back to the default level and is reported.
    let loaded = load_config(&args);
    let level = match &loaded {
        Ok((config, _)) => config.shared.log_level.into(),
        Err(_) => Level::INFO,
    };
    setup_tracing(&args, level);

    if let Err(e) = loaded
        .map_err(Box::<dyn std::error::Error>::from)
        .and_then(|(config, from_file)| run(&args, &config, from_file))
    {
        if !logged_by_module(e.as_ref()) {
            error!("trivkins startup failed: {}", e);
        }
        std::process::exit(1);
    }
}

fn run(
    args: &Args,
    config: &KinsConfig,
    from_file: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Trivkins v{} starting...", env!("CARGO_PKG_VERSION"));
    if from_file {
        info!("Loaded configuration from {:?}", args.config);
    } else {
        warn!(
            "No configuration at {:?}, using defaults and CLI parameters",
            args.config
        );
    }

    let mut core = HostCore::new(config)?;

    let running = core.running_flag();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        running.store(false, Ordering::SeqCst);
    })?;

    core.run(args.cycles);
    core.shutdown();

    report(&core);
    info!("Trivkins shutdown complete");
    Ok(())
}

/// Module load failures are logged by `KinsModule::load` itself.
fn logged_by_module(err: &(dyn std::error::Error + 'static)) -> bool {
    matches!(
        err.downcast_ref::<KinsError>(),
        Some(e) if !matches!(e, KinsError::Config(_))
    )
}

/// Load the config file, falling back to defaults when it is missing,
/// then apply CLI overrides. The flag tells whether the file was found.
fn load_config(args: &Args) -> Result<(KinsConfig, bool), ConfigError> {
    let (mut config, from_file) = match KinsConfig::load(&args.config) {
        Ok(config) => (config, true),
        Err(ConfigError::FileNotFound) => (KinsConfig::default(), false),
        Err(e) => return Err(e),
    };

    if let Some(coordinates) = &args.coordinates {
        config.kinematics.coordinates = coordinates.clone();
    }
    if let Some(extrajoints) = args.extrajoints {
        config.kinematics.extrajoints = extrajoints;
    }
    Ok((config, from_file))
}

/// Log the joint map, the home pose of an all-zero joint vector and the
/// final extra-joint outputs.
fn report(core: &HostCore) {
    let module = core.module();
    let stats = core.stats();
    info!(
        "{}: map [{}], {} cycles, max={}us, overruns={}",
        module.name(),
        module.kinematics().map(),
        stats.cycle_count,
        stats.max_cycle_us,
        stats.overruns
    );

    let mut home = Pose::default();
    module.home(&[0.0; MAX_JOINTS], &mut home);
    info!("Home pose: {:?}", home);

    for joint in module.extra_joints() {
        let pin = |field: &str| {
            core.registry()
                .float_pin(&format!("{}.{joint}.{field}", module.name()))
                .map(|p| p.get())
        };
        info!(
            "Extra joint {}: motor-pos-cmd={:?} motor-pos-fb={:?}",
            joint,
            pin("motor-pos-cmd"),
            pin("motor-pos-fb")
        );
    }
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args, configured: Level) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
