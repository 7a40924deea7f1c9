//! Cell Common Library
//!
//! Shared types for the multiprocess-cell controller workspace:
//!
//! - [`io::map`] - Logical sensor/actuator names → physical channel ids
//! - [`io::image`] - Per-cycle sensor snapshot and actuator command images
//! - [`io::port`] - The `IoPort` trait, the seam between control logic and
//!   the physical digital I/O backend
//! - [`io::simulation`] - In-memory port backend for development and tests

pub mod io;
