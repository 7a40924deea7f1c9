//! In-memory simulation backend.
//!
//! Holds the input image as plain state that tests (or a future scripted
//! physics layer) manipulate directly, and records every output image the
//! controller commits. No timing behaviour of its own - the cycle loop
//! provides the pacing.

use crate::io::image::{ActuatorCommand, SensorSnapshot};
use crate::io::map::SensorChannel;
use crate::io::port::{IoError, IoPort};
use tracing::trace;

/// Simulated digital I/O module.
#[derive(Debug, Default)]
pub struct SimulationPort {
    inputs: SensorSnapshot,
    outputs: ActuatorCommand,
    status_led: bool,
    reads: u64,
    writes: u64,
    /// When set, the next read/write fails (fault-path testing).
    fail_next_read: bool,
    fail_next_write: bool,
}

impl SimulationPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single simulated sensor.
    pub fn set_sensor(&mut self, ch: SensorChannel, value: bool) {
        self.inputs.set(ch, value);
    }

    /// Replace the whole simulated input image.
    pub fn set_inputs(&mut self, inputs: SensorSnapshot) {
        self.inputs = inputs;
    }

    /// Last output image committed by the controller.
    pub fn outputs(&self) -> ActuatorCommand {
        self.outputs
    }

    /// Current status LED state.
    pub fn status_led(&self) -> bool {
        self.status_led
    }

    /// Number of full input reads performed.
    pub fn read_count(&self) -> u64 {
        self.reads
    }

    /// Number of full output writes performed.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Make the next `read_inputs` fail with `IoError::Read`.
    pub fn fail_next_read(&mut self) {
        self.fail_next_read = true;
    }

    /// Make the next `write_outputs` fail with `IoError::Write`.
    pub fn fail_next_write(&mut self) {
        self.fail_next_write = true;
    }
}

impl IoPort for SimulationPort {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn read_inputs(&mut self) -> Result<SensorSnapshot, IoError> {
        if self.fail_next_read {
            self.fail_next_read = false;
            return Err(IoError::Read("simulated read fault".into()));
        }
        self.reads += 1;
        trace!(reads = self.reads, "simulation input read");
        Ok(self.inputs)
    }

    fn write_outputs(&mut self, cmd: &ActuatorCommand) -> Result<(), IoError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(IoError::Write("simulated write fault".into()));
        }
        self.outputs = *cmd;
        self.writes += 1;
        trace!(writes = self.writes, "simulation output write");
        Ok(())
    }

    fn set_status_led(&mut self, on: bool) -> Result<(), IoError> {
        self.status_led = on;
        Ok(())
    }
}

// ─── Shared Handle ──────────────────────────────────────────────────

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle over a [`SimulationPort`].
///
/// The cycle executive owns its port as a boxed trait object; scripted
/// scenarios need to keep manipulating the simulated sensors while the
/// executive runs. Hand the executive one clone and keep another.
#[derive(Debug, Default, Clone)]
pub struct SharedSimulationPort {
    inner: Arc<Mutex<SimulationPort>>,
}

impl SharedSimulationPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the underlying port for scripting or inspection.
    pub fn lock(&self) -> MutexGuard<'_, SimulationPort> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IoPort for SharedSimulationPort {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn read_inputs(&mut self) -> Result<SensorSnapshot, IoError> {
        self.lock().read_inputs()
    }

    fn write_outputs(&mut self, cmd: &ActuatorCommand) -> Result<(), IoError> {
        self.lock().write_outputs(cmd)
    }

    fn set_status_led(&mut self, on: bool) -> Result<(), IoError> {
        self.lock().set_status_led(on)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
