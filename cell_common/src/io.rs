//! Digital I/O abstraction for the production cell.
//!
//! The controller never touches channel ids directly: it works on the
//! [`image::SensorSnapshot`] / [`image::ActuatorCommand`] images, and a
//! backend implementing [`port::IoPort`] moves whole images across the
//! physical boundary once per cycle.

pub mod image;
pub mod map;
pub mod port;
pub mod simulation;

pub use image::{ActuatorCommand, SensorSnapshot};
pub use map::{ActuatorChannel, SensorChannel};
pub use port::{IoError, IoPort};
