//! Logical name → physical channel id mapping.
//!
//! The wiring of the physical station is fixed: nine digital inputs
//! (`I_1`..`I_9`) and fourteen digital outputs (`O_1`..`O_14`). The order
//! below must be preserved bit-for-bit — it is the contract with the
//! terminal strip, not an implementation detail.

/// Digital input channels (reference switches and light barriers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorChannel {
    /// Reference switch - turntable aligned under the vacuum carrier.
    TurntableAtCarrier,
    /// Reference switch - turntable aligned to the conveyor.
    TurntableAtConveyor,
    /// Light barrier - conveyor belt.
    ConveyorLightBarrier,
    /// Reference switch - turntable aligned under the saw.
    TurntableAtSaw,
    /// Reference switch - vacuum carrier aligned to the turntable.
    CarrierAtTurntable,
    /// Reference switch - oven carrier inside the oven.
    OvenCarrierIn,
    /// Reference switch - oven carrier outside the oven.
    OvenCarrierOut,
    /// Reference switch - vacuum carrier aligned to the oven.
    CarrierAtOven,
    /// Light barrier - oven.
    OvenLightBarrier,
}

impl SensorChannel {
    /// All input channels in physical order (`I_1`..`I_9`).
    pub const ALL: [SensorChannel; 9] = [
        Self::TurntableAtCarrier,
        Self::TurntableAtConveyor,
        Self::ConveyorLightBarrier,
        Self::TurntableAtSaw,
        Self::CarrierAtTurntable,
        Self::OvenCarrierIn,
        Self::OvenCarrierOut,
        Self::CarrierAtOven,
        Self::OvenLightBarrier,
    ];

    /// Physical channel id on the I/O module.
    pub const fn id(self) -> &'static str {
        match self {
            Self::TurntableAtCarrier => "I_1",
            Self::TurntableAtConveyor => "I_2",
            Self::ConveyorLightBarrier => "I_3",
            Self::TurntableAtSaw => "I_4",
            Self::CarrierAtTurntable => "I_5",
            Self::OvenCarrierIn => "I_6",
            Self::OvenCarrierOut => "I_7",
            Self::CarrierAtOven => "I_8",
            Self::OvenLightBarrier => "I_9",
        }
    }
}

/// Digital output channels (motors, valves and lights).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActuatorChannel {
    /// Turntable motor, clockwise.
    TurntableCw,
    /// Turntable motor, counter-clockwise.
    TurntableCcw,
    /// Conveyor belt motor, forward.
    Conveyor,
    /// Saw motor.
    Saw,
    /// Oven carrier motor, inward.
    OvenCarrierInward,
    /// Oven carrier motor, outward.
    OvenCarrierOutward,
    /// Vacuum carrier motor, towards the oven.
    VacuumCarrierToOven,
    /// Vacuum carrier motor, towards the turntable.
    VacuumCarrierToTurntable,
    /// Oven processing light.
    OvenProcessLight,
    /// Compressor.
    Compressor,
    /// Vacuum gripper valve, grip.
    GripperGrip,
    /// Vacuum gripper valve, lower.
    GripperLower,
    /// Oven door opening valve.
    OvenDoor,
    /// Turntable pusher valve.
    TurntablePusher,
}

impl ActuatorChannel {
    /// All output channels in physical order (`O_1`..`O_14`).
    pub const ALL: [ActuatorChannel; 14] = [
        Self::TurntableCw,
        Self::TurntableCcw,
        Self::Conveyor,
        Self::Saw,
        Self::OvenCarrierInward,
        Self::OvenCarrierOutward,
        Self::VacuumCarrierToOven,
        Self::VacuumCarrierToTurntable,
        Self::OvenProcessLight,
        Self::Compressor,
        Self::GripperGrip,
        Self::GripperLower,
        Self::OvenDoor,
        Self::TurntablePusher,
    ];

    /// Physical channel id on the I/O module.
    pub const fn id(self) -> &'static str {
        match self {
            Self::TurntableCw => "O_1",
            Self::TurntableCcw => "O_2",
            Self::Conveyor => "O_3",
            Self::Saw => "O_4",
            Self::OvenCarrierInward => "O_5",
            Self::OvenCarrierOutward => "O_6",
            Self::VacuumCarrierToOven => "O_7",
            Self::VacuumCarrierToTurntable => "O_8",
            Self::OvenProcessLight => "O_9",
            Self::Compressor => "O_10",
            Self::GripperGrip => "O_11",
            Self::GripperLower => "O_12",
            Self::OvenDoor => "O_13",
            Self::TurntablePusher => "O_14",
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
