//! The `IoPort` trait - interface between control logic and the physical
//! digital I/O backend.
//!
//! # Lifecycle
//!
//! 1. `read_inputs()` - once at controller construction (startup sync),
//!    then once at the top of every cycle
//! 2. `write_outputs()` - once at the bottom of every cycle, full image,
//!    even when nothing changed (the physical layer is stateless from the
//!    controller's point of view)
//! 3. A final `write_outputs(&ActuatorCommand::default())` +
//!    `set_status_led(false)` on shutdown
//!
//! Faults are fatal: the cycle loop has no retry wrapper, so a failed read
//! or write propagates out of the loop.

use crate::io::image::{ActuatorCommand, SensorSnapshot};
use thiserror::Error;

/// Error types for port operations.
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Reading the input channels failed.
    #[error("input read failed: {0}")]
    Read(String),

    /// Writing the output channels failed.
    #[error("output write failed: {0}")]
    Write(String),

    /// Backend initialization or bookkeeping error.
    #[error("I/O backend error: {0}")]
    Backend(String),
}

/// Pluggable digital I/O backend.
pub trait IoPort: Send {
    /// The backend's unique identifier (e.g. "simulation").
    fn name(&self) -> &'static str;

    /// Atomically read all nine input channels into a fresh snapshot.
    fn read_inputs(&mut self) -> Result<SensorSnapshot, IoError>;

    /// Atomically write all fourteen output channels from the command image.
    fn write_outputs(&mut self, cmd: &ActuatorCommand) -> Result<(), IoError>;

    /// Drive the module status LED (the per-cycle heartbeat indicator).
    fn set_status_led(&mut self, on: bool) -> Result<(), IoError>;
}
