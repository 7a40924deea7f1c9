//! Per-cycle I/O images.
//!
//! `SensorSnapshot` is captured atomically once per cycle and is immutable
//! for the duration of that cycle; it is replaced wholesale, never patched.
//! `ActuatorCommand` is the shared command buffer the stage evaluators
//! mutate in priority order; the executive carries it across cycles, so a
//! field keeps its previous value unless a stage explicitly changes it.

use crate::io::map::{ActuatorChannel, SensorChannel};
use serde::{Deserialize, Serialize};

/// Atomic capture of all nine digital inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub turntable_at_carrier: bool,
    pub turntable_at_conveyor: bool,
    pub conveyor_light_barrier: bool,
    pub turntable_at_saw: bool,
    pub carrier_at_turntable: bool,
    pub oven_carrier_in: bool,
    pub oven_carrier_out: bool,
    pub carrier_at_oven: bool,
    pub oven_light_barrier: bool,
}

impl SensorSnapshot {
    /// Read a field by channel (backend-facing accessor).
    pub const fn get(&self, ch: SensorChannel) -> bool {
        match ch {
            SensorChannel::TurntableAtCarrier => self.turntable_at_carrier,
            SensorChannel::TurntableAtConveyor => self.turntable_at_conveyor,
            SensorChannel::ConveyorLightBarrier => self.conveyor_light_barrier,
            SensorChannel::TurntableAtSaw => self.turntable_at_saw,
            SensorChannel::CarrierAtTurntable => self.carrier_at_turntable,
            SensorChannel::OvenCarrierIn => self.oven_carrier_in,
            SensorChannel::OvenCarrierOut => self.oven_carrier_out,
            SensorChannel::CarrierAtOven => self.carrier_at_oven,
            SensorChannel::OvenLightBarrier => self.oven_light_barrier,
        }
    }

    /// Write a field by channel (backend-facing mutator).
    pub fn set(&mut self, ch: SensorChannel, value: bool) {
        match ch {
            SensorChannel::TurntableAtCarrier => self.turntable_at_carrier = value,
            SensorChannel::TurntableAtConveyor => self.turntable_at_conveyor = value,
            SensorChannel::ConveyorLightBarrier => self.conveyor_light_barrier = value,
            SensorChannel::TurntableAtSaw => self.turntable_at_saw = value,
            SensorChannel::CarrierAtTurntable => self.carrier_at_turntable = value,
            SensorChannel::OvenCarrierIn => self.oven_carrier_in = value,
            SensorChannel::OvenCarrierOut => self.oven_carrier_out = value,
            SensorChannel::CarrierAtOven => self.carrier_at_oven = value,
            SensorChannel::OvenLightBarrier => self.oven_light_barrier = value,
        }
    }
}

/// Desired state of all fourteen digital outputs.
///
/// `Default` is all-deasserted; this doubles as the shutdown image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    pub turntable_cw: bool,
    pub turntable_ccw: bool,
    pub conveyor: bool,
    pub saw: bool,
    pub oven_carrier_inward: bool,
    pub oven_carrier_outward: bool,
    pub vacuum_carrier_to_oven: bool,
    pub vacuum_carrier_to_turntable: bool,
    pub oven_process_light: bool,
    pub compressor: bool,
    pub gripper_grip: bool,
    pub gripper_lower: bool,
    pub oven_door: bool,
    pub turntable_pusher: bool,
}

impl ActuatorCommand {
    /// Read a field by channel (backend-facing accessor).
    pub const fn get(&self, ch: ActuatorChannel) -> bool {
        match ch {
            ActuatorChannel::TurntableCw => self.turntable_cw,
            ActuatorChannel::TurntableCcw => self.turntable_ccw,
            ActuatorChannel::Conveyor => self.conveyor,
            ActuatorChannel::Saw => self.saw,
            ActuatorChannel::OvenCarrierInward => self.oven_carrier_inward,
            ActuatorChannel::OvenCarrierOutward => self.oven_carrier_outward,
            ActuatorChannel::VacuumCarrierToOven => self.vacuum_carrier_to_oven,
            ActuatorChannel::VacuumCarrierToTurntable => self.vacuum_carrier_to_turntable,
            ActuatorChannel::OvenProcessLight => self.oven_process_light,
            ActuatorChannel::Compressor => self.compressor,
            ActuatorChannel::GripperGrip => self.gripper_grip,
            ActuatorChannel::GripperLower => self.gripper_lower,
            ActuatorChannel::OvenDoor => self.oven_door,
            ActuatorChannel::TurntablePusher => self.turntable_pusher,
        }
    }

    /// Write a field by channel (backend-facing mutator).
    pub fn set(&mut self, ch: ActuatorChannel, value: bool) {
        match ch {
            ActuatorChannel::TurntableCw => self.turntable_cw = value,
            ActuatorChannel::TurntableCcw => self.turntable_ccw = value,
            ActuatorChannel::Conveyor => self.conveyor = value,
            ActuatorChannel::Saw => self.saw = value,
            ActuatorChannel::OvenCarrierInward => self.oven_carrier_inward = value,
            ActuatorChannel::OvenCarrierOutward => self.oven_carrier_outward = value,
            ActuatorChannel::VacuumCarrierToOven => self.vacuum_carrier_to_oven = value,
            ActuatorChannel::VacuumCarrierToTurntable => {
                self.vacuum_carrier_to_turntable = value
            }
            ActuatorChannel::OvenProcessLight => self.oven_process_light = value,
            ActuatorChannel::Compressor => self.compressor = value,
            ActuatorChannel::GripperGrip => self.gripper_grip = value,
            ActuatorChannel::GripperLower => self.gripper_lower = value,
            ActuatorChannel::OvenDoor => self.oven_door = value,
            ActuatorChannel::TurntablePusher => self.turntable_pusher = value,
        }
    }

    /// True if every output is deasserted (the safe shutdown image).
    pub fn is_all_deasserted(&self) -> bool {
        ActuatorChannel::ALL.iter().all(|&ch| !self.get(ch))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
