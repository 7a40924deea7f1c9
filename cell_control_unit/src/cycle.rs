//! Fixed-period cycle: read → stages → write.
//!
//! ## Cycle body
//!
//! In strict order, every cycle: toggle the heartbeat LED, read the full
//! sensor snapshot, evaluate oven → transfer → safety over the shared
//! command buffer, write the full output image. The write happens even when
//! nothing changed - the physical layer is stateless from the controller's
//! point of view, so idempotent re-assertion is intentional.
//!
//! ## Pacing & cancellation
//!
//! The loop runs at the configured period (50 ms by default). With the `rt`
//! feature it paces with `clock_nanosleep(TIMER_ABSTIME)` on
//! `CLOCK_MONOTONIC` for drift-free boundaries; without it, plain
//! `Instant`/`thread::sleep` timing is used. The cancellation flag is
//! checked once per cycle boundary, never mid-cycle: a cycle in progress
//! always completes its output write, then the shutdown sequence deasserts
//! every output in one final atomic write.
//!
//! Overruns are counted and logged but never abort - this cell runs at tens
//! of milliseconds, not a hard sub-millisecond deadline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cell_common::io::{ActuatorCommand, IoError, IoPort, SensorSnapshot};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::CellConfig;
use crate::stage;
use crate::state::ProcessState;

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-cycle timing statistics, updated without allocation.
#[derive(Debug, Clone)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// Last cycle duration [ns].
    pub last_cycle_ns: i64,
    /// Minimum cycle duration [ns].
    pub min_cycle_ns: i64,
    /// Maximum cycle duration [ns].
    pub max_cycle_ns: i64,
    /// Running sum for average computation.
    pub sum_cycle_ns: i64,
    /// Number of cycles that exceeded the period.
    pub overruns: u64,
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: i64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
        }
    }

    /// Record a cycle duration.
    #[inline]
    pub fn record(&mut self, duration_ns: i64) {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        if duration_ns < self.min_cycle_ns {
            self.min_cycle_ns = duration_ns;
        }
        if duration_ns > self.max_cycle_ns {
            self.max_cycle_ns = duration_ns;
        }
        self.sum_cycle_ns += duration_ns;
    }

    /// Average cycle time [ns] (0 if no cycles).
    #[inline]
    pub fn avg_cycle_ns(&self) -> i64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.sum_cycle_ns / self.cycle_count as i64
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

/// Errors escaping the cycle loop. All fatal - the loop has no retry layer.
#[derive(Debug, Error)]
pub enum CycleError {
    /// I/O port fault (read or write of the channel set failed).
    #[error("I/O port fault: {0}")]
    Io(#[from] IoError),

    /// Timer system call failed (rt pacing only).
    #[error("cycle pacing error: {0}")]
    Pacing(String),
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// The cyclic executive.
///
/// Owns the I/O port, the persistent [`ProcessState`] and the shared
/// actuator command buffer. Exactly one thread drives it; no locking is
/// needed because reads and writes are sequenced within a cycle.
pub struct CycleRunner {
    config: CellConfig,
    port: Box<dyn IoPort>,
    /// Persistent process state (created zeroed, reset in place on re-arm).
    pub state: ProcessState,
    /// Shared command buffer, carried across cycles.
    cmd: ActuatorCommand,
    /// Last captured snapshot (startup-synchronized before the first cycle).
    snapshot: SensorSnapshot,
    /// Cycle statistics.
    pub stats: CycleStats,
    heartbeat: bool,
    running: Arc<AtomicBool>,
    cycle_time_ns: i64,
}

impl CycleRunner {
    /// Create a runner and synchronize with the physical state.
    ///
    /// Performs one unconditional input read so the internal snapshot
    /// matches the plant before the loop begins. All actuator fields start
    /// deasserted.
    pub fn new(
        config: CellConfig,
        mut port: Box<dyn IoPort>,
        running: Arc<AtomicBool>,
    ) -> Result<Self, CycleError> {
        let snapshot = port.read_inputs()?;
        let cycle_time_ns = config.cycle_time_ms as i64 * 1_000_000;

        Ok(Self {
            config,
            port,
            state: ProcessState::new(),
            cmd: ActuatorCommand::default(),
            snapshot,
            stats: CycleStats::new(),
            heartbeat: false,
            running,
            cycle_time_ns,
        })
    }

    /// Last captured sensor snapshot.
    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    /// Current command buffer contents.
    pub fn command(&self) -> &ActuatorCommand {
        &self.cmd
    }

    /// Execute one full cycle body.
    ///
    /// Strict order: heartbeat → read → oven → transfer → safety → write.
    /// The safety stage must stay last; it is allowed to override anything
    /// the product stages just set.
    pub fn step(&mut self) -> Result<(), CycleError> {
        self.heartbeat = !self.heartbeat;
        self.port.set_status_led(self.heartbeat)?;

        self.snapshot = self.port.read_inputs()?;

        let timings = self.config.timings;
        stage::oven::evaluate(&self.snapshot, &mut self.state, &mut self.cmd, &timings);
        stage::transfer::evaluate(&self.snapshot, &mut self.state, &mut self.cmd, &timings);
        stage::safety::evaluate(&self.snapshot, &mut self.state, &mut self.cmd);

        self.port.write_outputs(&self.cmd)?;
        Ok(())
    }

    /// Enter the fixed-period loop until the cancellation flag clears.
    ///
    /// On cancellation the in-flight cycle completes (including its write),
    /// then [`CycleRunner::shutdown`] runs. On an I/O fault the shutdown
    /// write is attempted best-effort before the fault propagates.
    pub fn run(&mut self) -> Result<(), CycleError> {
        info!(
            port = self.port.name(),
            cycle_time_ms = self.config.cycle_time_ms,
            "entering cycle loop"
        );

        // Process services on before the first cycle; the safety stage may
        // switch them off again.
        self.cmd.compressor = true;

        let result = self.run_loop();

        match result {
            Ok(()) => {
                self.shutdown()?;
                info!(
                    cycles = self.stats.cycle_count,
                    overruns = self.stats.overruns,
                    "cycle loop stopped"
                );
                Ok(())
            }
            Err(e) => {
                // Leave the plant deasserted if the port still answers.
                if let Err(shutdown_err) = self.shutdown() {
                    warn!("shutdown after fault failed: {shutdown_err}");
                }
                Err(e)
            }
        }
    }

    /// Deassert every output and the status LED in one final write.
    ///
    /// Idempotent: invoking it twice leaves all 14 outputs false both times.
    pub fn shutdown(&mut self) -> Result<(), CycleError> {
        self.cmd = ActuatorCommand::default();
        self.port.write_outputs(&self.cmd)?;
        self.heartbeat = false;
        self.port.set_status_led(false)?;
        Ok(())
    }

    /// Default pacing: `Instant` measurement + `thread::sleep` remainder.
    #[cfg(not(feature = "rt"))]
    fn run_loop(&mut self) -> Result<(), CycleError> {
        use std::time::{Duration, Instant};

        let period = Duration::from_millis(self.config.cycle_time_ms);

        while self.running.load(Ordering::SeqCst) {
            let start = Instant::now();

            self.step()?;

            let elapsed = start.elapsed();
            let duration_ns = elapsed.as_nanos() as i64;
            self.stats.record(duration_ns);

            if duration_ns > self.cycle_time_ns {
                self.stats.overruns += 1;
                warn!(
                    duration_ns,
                    budget_ns = self.cycle_time_ns,
                    "cycle overrun"
                );
            }

            // Bounded wait: at most one period, then the flag is re-checked.
            if let Some(remaining) = period.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }
        Ok(())
    }

    /// Absolute-time pacing on `CLOCK_MONOTONIC` (drift-free boundaries).
    #[cfg(feature = "rt")]
    fn run_loop(&mut self) -> Result<(), CycleError> {
        use nix::time::{ClockId, clock_gettime, clock_nanosleep, ClockNanosleepFlags};

        let clock = ClockId::CLOCK_MONOTONIC;
        let mut next_wake = clock_gettime(clock)
            .map_err(|e| CycleError::Pacing(format!("clock_gettime: {e}")))?;

        while self.running.load(Ordering::SeqCst) {
            next_wake = timespec_add_ns(next_wake, self.cycle_time_ns);

            let cycle_start = clock_gettime(clock)
                .map_err(|e| CycleError::Pacing(format!("clock_gettime: {e}")))?;

            self.step()?;

            let cycle_end = clock_gettime(clock)
                .map_err(|e| CycleError::Pacing(format!("clock_gettime: {e}")))?;
            let duration_ns = timespec_diff_ns(&cycle_end, &cycle_start);
            self.stats.record(duration_ns);

            if duration_ns > self.cycle_time_ns {
                self.stats.overruns += 1;
                warn!(
                    duration_ns,
                    budget_ns = self.cycle_time_ns,
                    "cycle overrun"
                );
            }

            // Sleep until the next absolute boundary; wakes promptly, so a
            // cancellation is observed within one period.
            let _ = clock_nanosleep(clock, ClockNanosleepFlags::TIMER_ABSTIME, &next_wake);
        }
        Ok(())
    }
}

// ─── Time Helpers (rt pacing) ───────────────────────────────────────

#[cfg(feature = "rt")]
fn timespec_add_ns(ts: nix::sys::time::TimeSpec, ns: i64) -> nix::sys::time::TimeSpec {
    use nix::sys::time::TimeSpec;
    let mut secs = ts.tv_sec();
    let mut nanos = ts.tv_nsec() + ns;
    while nanos >= 1_000_000_000 {
        secs += 1;
        nanos -= 1_000_000_000;
    }
    TimeSpec::new(secs, nanos)
}

#[cfg(feature = "rt")]
fn timespec_diff_ns(a: &nix::sys::time::TimeSpec, b: &nix::sys::time::TimeSpec) -> i64 {
    (a.tv_sec() - b.tv_sec()) * 1_000_000_000 + (a.tv_nsec() - b.tv_nsec())
}

// ─── Tests ──────────────────────────────────────────────────────────
