//! Persistent process state and derived phase views.
//!
//! [`ProcessState`] is the only state that survives across cycles. It is
//! created zeroed at controller startup, lives for the process lifetime,
//! and is reset *in place* by the safety stage's [`ProcessState::rearm`] —
//! never destroyed, never partially reset by any other stage.
//!
//! The phase enums are derived views over the raw timers, for auditing
//! transitions and for tests. The timers stay the authoritative
//! representation because re-arm must zero all four of them as a unit.

use crate::config::StageTimings;
use cell_common::io::SensorSnapshot;

// ─── Process State ──────────────────────────────────────────────────

/// All cross-cycle controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessState {
    /// Oven dwell complete; the "ready/unloading" phase is active.
    pub oven_ready: bool,
    /// Oven dwell counter. Advances only while the carrier is inside.
    pub oven_timer: u32,
    /// Pick-side counter for the vacuum transfer (lower/grip/raise/move).
    pub transfer_timer: u32,
    /// Saw process counter. Participates in re-arm only.
    pub saw_timer: u32,
    /// Delivery process counter. Participates in re-arm only.
    pub delivery_timer: u32,
    /// Release-side counter, scoped to "carrier at turntable". Deliberately
    /// distinct from `transfer_timer`, and deliberately NOT cleared by
    /// re-arm - both match the reference station's observed behaviour.
    pub release_timer: u32,
    /// True while the safety stage is driving the turntable back towards
    /// the carrier position.
    pub reset_pending: bool,
}

impl ProcessState {
    /// Zeroed state, as at controller startup.
    pub const fn new() -> Self {
        Self {
            oven_ready: false,
            oven_timer: 0,
            transfer_timer: 0,
            saw_timer: 0,
            delivery_timer: 0,
            release_timer: 0,
            reset_pending: false,
        }
    }

    /// Global re-arm: zero the four process timers together and clear
    /// `oven_ready`. The sole path back to waiting-for-product.
    ///
    /// `release_timer` is intentionally left alone (reference behaviour;
    /// see DESIGN.md).
    pub fn rearm(&mut self) {
        self.saw_timer = 0;
        self.oven_timer = 0;
        self.transfer_timer = 0;
        self.delivery_timer = 0;
        self.oven_ready = false;
    }
}

// ─── Derived Phase Views ────────────────────────────────────────────

/// Oven stage phase, derived from the snapshot and state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvenPhase {
    /// No dwell running; the vacuum carrier may still be under way.
    WaitingForProduct,
    /// Carrier at the oven, dwell counting (or feeding in).
    Heating,
    /// Dwell complete, unloading towards the transfer stage.
    Ready,
}

impl OvenPhase {
    pub fn of(snap: &SensorSnapshot, state: &ProcessState) -> Self {
        if state.oven_ready {
            Self::Ready
        } else if snap.carrier_at_oven {
            Self::Heating
        } else {
            Self::WaitingForProduct
        }
    }
}

/// Pick-side transfer phase, derived from `transfer_timer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    /// `[0, grip_lower_end)` - lowering the gripper.
    Lowering,
    /// `[grip_lower_end, grip_engage_end)` - engaging the vacuum grip.
    Gripping,
    /// `[grip_engage_end, grip_raise_end)` - raising, grip engaged.
    Raising,
    /// `>= grip_raise_end` - driving the carrier to the turntable.
    MovingOut,
}

impl TransferPhase {
    pub fn of(timer: u32, timings: &StageTimings) -> Self {
        if timer < timings.grip_lower_end {
            Self::Lowering
        } else if timer < timings.grip_engage_end {
            Self::Gripping
        } else if timer < timings.grip_raise_end {
            Self::Raising
        } else {
            Self::MovingOut
        }
    }
}

/// Release-side phase at the turntable, derived from `release_timer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleasePhase {
    /// `[0, release_lower_end)` - lowering, grip still engaged.
    Lowering,
    /// `[release_lower_end, release_grip_end)` - releasing the grip.
    Releasing,
    /// `>= release_grip_end` - raising the ungripped gripper.
    Raising,
}

impl ReleasePhase {
    pub fn of(timer: u32, timings: &StageTimings) -> Self {
        if timer < timings.release_lower_end {
            Self::Lowering
        } else if timer < timings.release_grip_end {
            Self::Releasing
        } else {
            Self::Raising
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
