//! Stage evaluators.
//!
//! Each stage is a pure function over the per-cycle snapshot, the
//! persistent [`crate::state::ProcessState`] and the shared
//! [`cell_common::io::ActuatorCommand`] buffer. The executive applies them
//! in a fixed order every cycle:
//!
//! 1. [`oven`]
//! 2. [`transfer`]
//! 3. [`safety`]
//!
//! Later stages may overwrite earlier intents; the ordering is the priority
//! contract, with safety/re-arm always winning. No stage performs I/O and
//! no stage resets another stage's timers - the global re-arm in [`safety`]
//! is the single exception.

pub mod oven;
pub mod safety;
pub mod transfer;
