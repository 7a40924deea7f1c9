//! Turntable/safety stage: re-arm the cell when no product is staged.
//!
//! Runs every cycle, after the product stages, so its writes override
//! theirs. When the conveyor light barrier reads low it switches the
//! process services off, parks the turntable back under the vacuum carrier
//! and - once the park position is confirmed - performs the global re-arm.
//!
//! Note the polarity: this stage keys on `!conveyor_light_barrier` while
//! the oven stage keys on `!oven_light_barrier`. The two checks are kept
//! independent on purpose; merging them would silently change which branch
//! triggers re-arm (see DESIGN.md).

use crate::state::ProcessState;
use cell_common::io::{ActuatorCommand, SensorSnapshot};
use tracing::debug;

/// Evaluate the turntable/safety stage for one cycle.
pub fn evaluate(snap: &SensorSnapshot, state: &mut ProcessState, cmd: &mut ActuatorCommand) {
    if !snap.conveyor_light_barrier {
        // Process services off - overrides any product-stage intent.
        cmd.compressor = false;
        cmd.turntable_pusher = false;
        cmd.conveyor = false;

        // Park the turntable back under the vacuum carrier.
        cmd.turntable_ccw = !snap.turntable_at_carrier;

        if snap.turntable_at_carrier {
            if state.oven_ready || state.reset_pending {
                debug!("turntable parked, re-arming cell");
            }
            state.rearm();
            state.reset_pending = false;
        } else {
            state.reset_pending = true;
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
