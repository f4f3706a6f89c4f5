//! Host core and cyclic loop management.
//!
//! `HostCore` loads a kinematics module into its own [`SignalRegistry`] and
//! invokes the exported periodic functions at the configured cycle time.

use kins_common::config::KinsConfig;
use kins_common::error::KinsError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::module::KinsModule;
use crate::registry::SignalRegistry;

/// Timing statistics for cyclic loop monitoring.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimingStats {
    /// Number of cycles executed
    pub cycle_count: u64,
    /// Cycles whose functions ran longer than the cycle time
    pub overruns: u64,
    /// Longest observed function run time
    pub max_cycle_us: u64,
}

/// Host core: owns the registry and the loaded module, runs the loop.
pub struct HostCore {
    registry: SignalRegistry,
    module: KinsModule,
    running: Arc<AtomicBool>,
    cycle_time: Duration,
    stats: TimingStats,
}

impl HostCore {
    /// Validate `config` and load the module into a fresh registry.
    ///
    /// # Errors
    /// Configuration validation or module load failure.
    pub fn new(config: &KinsConfig) -> Result<Self, KinsError> {
        config.validate()?;

        let mut registry = SignalRegistry::new();
        let module = KinsModule::load(config, &mut registry)?;
        let cycle_time = Duration::from_micros(config.kinematics.cycle_time_us);

        info!(
            "HostCore created with {} pins, {} function(s), cycle_time={}us",
            registry.pin_count(),
            registry.function_count(),
            config.kinematics.cycle_time_us
        );

        Ok(Self {
            registry,
            module,
            running: Arc::new(AtomicBool::new(false)),
            cycle_time,
            stats: TimingStats::default(),
        })
    }

    /// Run one cycle of every exported function.
    pub fn step(&mut self) {
        self.registry.run_functions(self.cycle_time);
    }

    /// Run the cyclic loop until the running flag is cleared or
    /// `max_cycles` cycles have executed.
    pub fn run(&mut self, max_cycles: Option<u64>) {
        info!(
            "Starting cyclic loop (cycle_time={}us)...",
            self.cycle_time.as_micros()
        );
        self.running.store(true, Ordering::SeqCst);

        if detect_rt_mode() {
            info!("Running in real-time mode");
        } else {
            info!("Running in standard (non-RT) mode");
        }

        let mut deadline = Instant::now();

        while self.running.load(Ordering::SeqCst)
            && max_cycles.is_none_or(|max| self.stats.cycle_count < max)
        {
            let started = Instant::now();
            self.registry.run_functions(self.cycle_time);
            let took = started.elapsed();

            self.stats.cycle_count += 1;
            self.stats.max_cycle_us = self.stats.max_cycle_us.max(took.as_micros() as u64);
            if took > self.cycle_time {
                self.stats.overruns += 1;
                if self.stats.overruns == 1 {
                    warn!(
                        "Cycle overrun: functions took {}us (cycle {}us)",
                        took.as_micros(),
                        self.cycle_time.as_micros()
                    );
                }
            }

            // Absolute deadline; a late cycle restarts it from now.
            deadline += self.cycle_time;
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            } else {
                deadline = now;
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!(
            "Cyclic loop stopped after {} cycles (overruns: {})",
            self.stats.cycle_count, self.stats.overruns
        );
    }

    /// Request the loop to stop.
    pub fn shutdown(&self) {
        info!("Shutdown requested");
        self.running.store(false, Ordering::SeqCst);
    }

    /// Get the running flag for signal handlers.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// The loaded module.
    pub fn module(&self) -> &KinsModule {
        &self.module
    }

    /// The signal registry.
    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// Timing statistics.
    pub fn stats(&self) -> TimingStats {
        self.stats
    }
}

/// Detect if running in real-time mode by checking scheduler policy.
fn detect_rt_mode() -> bool {
    #[cfg(target_os = "linux")]
    {
        use libc::{SCHED_FIFO, SCHED_RR, sched_getscheduler};
        // SAFETY: sched_getscheduler(0) only queries the calling thread.
        let policy = unsafe { sched_getscheduler(0) };
        policy == SCHED_FIFO || policy == SCHED_RR
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}
