//! Oven stage: product pickup, heat-treatment dwell, carrier unload.
//!
//! Phases (see [`crate::state::OvenPhase`]):
//!
//! - **WaitingForProduct** - while the oven light barrier shows a product
//!   staged (`oven_light_barrier` low) and no dwell has completed, drive the
//!   vacuum carrier towards the oven until its reference switch asserts.
//! - **Heating** - feed the carrier in (door open), then count the dwell.
//!   The process light flashes 1:1 at cycle rate while counting. At
//!   `oven_dwell` ticks the product is declared ready; there is no sensor
//!   confirming the heat treatment, elapsed cycles are the only signal.
//! - **Ready** - drive the carrier back out (door open) until the outside
//!   reference switch asserts, then close up and hand off to the transfer
//!   stage.
//!
//! Missing sensor confirmations leave the relevant motor asserted
//! indefinitely (fail-open, as on the physical station).

use crate::config::StageTimings;
use crate::state::ProcessState;
use cell_common::io::{ActuatorCommand, SensorSnapshot};
use tracing::debug;

/// Evaluate the oven stage for one cycle.
pub fn evaluate(
    snap: &SensorSnapshot,
    state: &mut ProcessState,
    cmd: &mut ActuatorCommand,
    timings: &StageTimings,
) {
    // Product staged at the oven light barrier (low = present) and no dwell
    // completed: bring the vacuum carrier over to the oven.
    if !snap.oven_light_barrier && !state.oven_ready {
        cmd.vacuum_carrier_to_oven = !snap.carrier_at_oven;
    }

    if !state.oven_ready && snap.carrier_at_oven {
        // ── Heating ──
        if !snap.oven_carrier_in {
            // Feed the carrier into the oven.
            cmd.oven_door = true;
            cmd.oven_carrier_inward = true;
        } else {
            cmd.oven_carrier_inward = false;
            cmd.oven_door = false;
            // 1:1 flash at cycle rate: light on at odd ticks.
            cmd.oven_process_light = state.oven_timer % 2 == 1;
            state.oven_timer += 1;
        }

        if state.oven_timer >= timings.oven_dwell {
            cmd.oven_process_light = false;
            state.oven_ready = true;
            state.oven_timer = 0;
            debug!(dwell = timings.oven_dwell, "oven dwell complete");
        }
    } else if state.oven_ready {
        // ── Ready: unload ──
        if !snap.oven_carrier_out {
            cmd.oven_door = true;
            cmd.oven_carrier_outward = true;
        } else {
            cmd.oven_carrier_outward = false;
            cmd.oven_door = false;
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
