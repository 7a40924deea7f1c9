//! Transfer stage: vacuum pick-and-place from the oven carrier to the
//! turntable.
//!
//! Runs only while the oven is in its ready phase. Two separate counters
//! sequence the motion:
//!
//! - the **pick** side advances `transfer_timer` through lower → grip →
//!   raise → move-to-turntable (see [`crate::state::TransferPhase`]);
//! - the **release** side advances `release_timer` through lower → ungrip →
//!   raise once the carrier reference switch at the turntable asserts.
//!
//! The release conditions read back the shared command buffer (gripper
//! valve intents from previous cycles), exactly as the reference station
//! does. The two counters are kept separate on purpose; see DESIGN.md.

use crate::config::StageTimings;
use crate::state::ProcessState;
use cell_common::io::{ActuatorCommand, SensorSnapshot};
use tracing::debug;

/// Evaluate the transfer stage for one cycle.
pub fn evaluate(
    snap: &SensorSnapshot,
    state: &mut ProcessState,
    cmd: &mut ActuatorCommand,
    timings: &StageTimings,
) {
    if !state.oven_ready {
        return;
    }

    // ── Pick side (transfer_timer) ──
    // Lower the gripper over the unloaded oven carrier. The counter waits
    // out the pneumatic lowering; there is no position feedback.
    if snap.oven_carrier_out && snap.carrier_at_oven && state.transfer_timer < timings.grip_lower_end
    {
        cmd.gripper_lower = true;
        state.transfer_timer += 1;
    }

    // Engage the vacuum grip, gripper still lowered.
    if state.transfer_timer >= timings.grip_lower_end
        && state.transfer_timer < timings.grip_engage_end
    {
        cmd.gripper_grip = true;
        state.transfer_timer += 1;
    }

    // Raise the gripper, grip engaged.
    if state.transfer_timer >= timings.grip_engage_end
        && state.transfer_timer < timings.grip_raise_end
    {
        cmd.gripper_lower = false;
        state.transfer_timer += 1;
    }

    // Drive the carrier to the turntable until its reference switch asserts.
    if state.transfer_timer >= timings.grip_raise_end {
        cmd.vacuum_carrier_to_turntable = !snap.carrier_at_turntable;
    }

    // ── Release side (release_timer, scoped to "at turntable") ──
    if snap.carrier_at_turntable
        && cmd.gripper_grip
        && state.release_timer < timings.release_lower_end
    {
        cmd.gripper_lower = true;
        state.release_timer += 1;
    } else if snap.carrier_at_turntable
        && cmd.gripper_lower
        && state.release_timer >= timings.release_lower_end
        && state.release_timer < timings.release_grip_end
    {
        cmd.gripper_grip = false;
        state.release_timer += 1;
        if state.release_timer == timings.release_grip_end {
            debug!("product released on turntable");
        }
    } else if snap.carrier_at_turntable
        && cmd.gripper_lower
        && !cmd.gripper_grip
        && state.release_timer >= timings.release_grip_end
    {
        cmd.gripper_lower = false;
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TransferPhase;

    fn timings() -> StageTimings {
        StageTimings::default()
    }

    fn pick_snapshot() -> SensorSnapshot {
        SensorSnapshot {
            oven_carrier_out: true,
            carrier_at_oven: true,
            ..SensorSnapshot::default()
        }
    }

    fn ready_state() -> ProcessState {
        ProcessState {
            oven_ready: true,
            ..ProcessState::new()
        }
    }

    #[test]
    fn inactive_until_oven_ready() {
        let snap = pick_snapshot();
        let mut state = ProcessState::new();
        let mut cmd = ActuatorCommand::default();

        evaluate(&snap, &mut state, &mut cmd, &timings());
        assert_eq!(state.transfer_timer, 0);
        assert!(!cmd.gripper_lower);
        assert!(!cmd.gripper_grip);
    }

    #[test]
    fn pick_gate_requires_carrier_at_oven_and_out() {
        // oven ready, but the oven carrier is not out yet
        let snap = SensorSnapshot {
            carrier_at_oven: true,
            ..SensorSnapshot::default()
        };
        let mut state = ready_state();
        let mut cmd = ActuatorCommand::default();

        evaluate(&snap, &mut state, &mut cmd, &timings());
        assert_eq!(state.transfer_timer, 0);
        assert!(!cmd.gripper_lower);
    }

    #[test]
    fn timer_is_monotonic_through_the_pick() {
        let snap = pick_snapshot();
        let mut state = ready_state();
        let mut cmd = ActuatorCommand::default();

        let mut prev = 0;
        for _ in 0..40 {
            evaluate(&snap, &mut state, &mut cmd, &timings());
            assert!(state.transfer_timer >= prev, "timer decreased");
            prev = state.transfer_timer;
        }
        assert_eq!(TransferPhase::of(prev, &timings()), TransferPhase::MovingOut);
    }

    #[test]
    fn lowering_phase_lowers_without_grip() {
        let snap = pick_snapshot();
        let mut state = ready_state();
        let mut cmd = ActuatorCommand::default();

        evaluate(&snap, &mut state, &mut cmd, &timings());
        assert!(cmd.gripper_lower);
        assert!(!cmd.gripper_grip);
        assert!(!cmd.vacuum_carrier_to_turntable);
        assert_eq!(state.transfer_timer, 1);
    }

    #[test]
    fn grip_engages_while_still_lowered() {
        let snap = pick_snapshot();
        let mut state = ProcessState {
            transfer_timer: 10,
            ..ready_state()
        };
        let mut cmd = ActuatorCommand {
            gripper_lower: true,
            ..ActuatorCommand::default()
        };

        evaluate(&snap, &mut state, &mut cmd, &timings());
        assert!(cmd.gripper_grip);
        assert!(cmd.gripper_lower); // documented overlap window
    }

    #[test]
    fn raise_keeps_grip_engaged() {
        let snap = pick_snapshot();
        let mut state = ProcessState {
            transfer_timer: 15,
            ..ready_state()
        };
        let mut cmd = ActuatorCommand {
            gripper_lower: true,
            gripper_grip: true,
            ..ActuatorCommand::default()
        };

        evaluate(&snap, &mut state, &mut cmd, &timings());
        assert!(!cmd.gripper_lower);
        assert!(cmd.gripper_grip);
    }

    #[test]
    fn boundary_cycles_may_advance_two_phases() {
        // At timer 9, the lowering branch advances to 10 and the grip branch
        // fires in the same cycle - the reference chains plain ifs, not
        // elifs, on the pick side.
        let snap = pick_snapshot();
        let mut state = ProcessState {
            transfer_timer: 9,
            ..ready_state()
        };
        let mut cmd = ActuatorCommand {
            gripper_lower: true,
            ..ActuatorCommand::default()
        };

        evaluate(&snap, &mut state, &mut cmd, &timings());
        assert_eq!(state.transfer_timer, 11);
        assert!(cmd.gripper_grip);
    }

    #[test]
    fn moving_out_drives_until_turntable_switch() {
        let snap = pick_snapshot();
        let mut state = ProcessState {
            transfer_timer: 25,
            ..ready_state()
        };
        let mut cmd = ActuatorCommand {
            gripper_grip: true,
            ..ActuatorCommand::default()
        };

        evaluate(&snap, &mut state, &mut cmd, &timings());
        assert!(cmd.vacuum_carrier_to_turntable);

        let at_table = SensorSnapshot {
            carrier_at_turntable: true,
            ..snap
        };
        evaluate(&at_table, &mut state, &mut cmd, &timings());
        assert!(!cmd.vacuum_carrier_to_turntable);
    }

    #[test]
    fn release_sequence_at_turntable() {
        // Arrived at the turntable, grip engaged, gripper raised.
        let snap = SensorSnapshot {
            carrier_at_turntable: true,
            ..SensorSnapshot::default()
        };
        let mut state = ProcessState {
            transfer_timer: 25,
            ..ready_state()
        };
        let mut cmd = ActuatorCommand {
            gripper_grip: true,
            ..ActuatorCommand::default()
        };

        // Phase 1: lower while gripped.
        for i in 1..=15u32 {
            evaluate(&snap, &mut state, &mut cmd, &timings());
            assert_eq!(state.release_timer, i);
            assert!(cmd.gripper_lower);
            assert!(cmd.gripper_grip);
        }

        // Phase 2: release the grip, still lowered.
        for i in 16..=30u32 {
            evaluate(&snap, &mut state, &mut cmd, &timings());
            assert_eq!(state.release_timer, i);
            assert!(cmd.gripper_lower);
            assert!(!cmd.gripper_grip);
        }

        // Phase 3: raise, counter stops.
        evaluate(&snap, &mut state, &mut cmd, &timings());
        assert!(!cmd.gripper_lower);
        assert_eq!(state.release_timer, 30);

        // Settled: nothing changes any more.
        evaluate(&snap, &mut state, &mut cmd, &timings());
        assert!(!cmd.gripper_lower);
        assert!(!cmd.gripper_grip);
    }

    #[test]
    fn release_waits_for_turntable_switch() {
        let snap = pick_snapshot(); // not at turntable
        let mut state = ProcessState {
            transfer_timer: 25,
            ..ready_state()
        };
        let mut cmd = ActuatorCommand {
            gripper_grip: true,
            ..ActuatorCommand::default()
        };

        for _ in 0..10 {
            evaluate(&snap, &mut state, &mut cmd, &timings());
        }
        assert_eq!(state.release_timer, 0);
        assert!(cmd.gripper_grip);
    }

    #[test]
    fn pick_intents_mutually_exclusive_outside_overlaps() {
        // Walk the whole pick with live sensors; outside the documented
        // grip/lower overlap the three intents never conflict.
        let snap = pick_snapshot();
        let mut state = ready_state();
        let mut cmd = ActuatorCommand::default();
        let t = timings();

        for _ in 0..60 {
            evaluate(&snap, &mut state, &mut cmd, &t);
            match TransferPhase::of(state.transfer_timer, &t) {
                TransferPhase::Lowering => {
                    assert!(!cmd.gripper_grip);
                    assert!(!cmd.vacuum_carrier_to_turntable);
                }
                TransferPhase::Gripping => {
                    // Documented overlap: grip engages while still lowered.
                    assert!(!cmd.vacuum_carrier_to_turntable);
                }
                TransferPhase::Raising => {
                    assert!(!cmd.gripper_lower);
                    assert!(!cmd.vacuum_carrier_to_turntable);
                }
                TransferPhase::MovingOut => {
                    assert!(!cmd.gripper_lower);
                }
            }
        }
    }
}
