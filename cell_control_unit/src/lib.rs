//! # Cell Control Unit Library
//!
//! Fixed-period cyclic executive for a small manufacturing cell (turntable,
//! conveyor, saw, oven, vacuum transfer carrier). Once per cycle the
//! executive reads a full digital sensor snapshot, runs three cooperating
//! stage evaluators over a shared actuator command buffer, and writes the
//! full output image back to the I/O port.
//!
//! ## Stage priority
//!
//! Stages run in a fixed order every cycle:
//!
//! 1. **Oven** — product pickup, heat-treatment dwell, carrier unload
//! 2. **Transfer** — vacuum pick-and-place from oven to turntable
//! 3. **Turntable/Safety** — re-arm: when no product is staged upstream it
//!    overrides anything the product stages just set, parks the turntable
//!    and zeroes every process timer
//!
//! Evaluation order *is* the priority contract: the safety stage runs last
//! so its writes win. All control flow is boolean-condition-driven; the only
//! recovery path is the safety re-arm.

pub mod config;
pub mod cycle;
pub mod stage;
pub mod state;
