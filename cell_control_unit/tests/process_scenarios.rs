//! End-to-end scenarios against the simulated I/O port: one product through
//! pickup, heat treatment, transfer, release and re-arm, with the sensors
//! scripted the way the physical cell would answer.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use cell_common::io::SensorChannel;
use cell_common::io::simulation::SharedSimulationPort;
use cell_control_unit::config::CellConfig;
use cell_control_unit::cycle::CycleRunner;

fn fixture() -> (CycleRunner, SharedSimulationPort) {
    let shared = SharedSimulationPort::new();
    let running = Arc::new(AtomicBool::new(true));
    let runner = CycleRunner::new(
        CellConfig::default(),
        Box::new(shared.clone()),
        running,
    )
    .unwrap();
    (runner, shared)
}

#[test]
fn full_product_pass() {
    let (mut runner, port) = fixture();

    // A product is staged upstream (conveyor barrier high keeps the safety
    // branch quiet) and at the oven pickup (oven barrier low).
    port.lock()
        .set_sensor(SensorChannel::ConveyorLightBarrier, true);

    // ── Pickup: carrier drives to the oven ──
    runner.step().unwrap();
    assert!(port.lock().outputs().vacuum_carrier_to_oven);

    port.lock().set_sensor(SensorChannel::CarrierAtOven, true);
    runner.step().unwrap();
    {
        let out = port.lock().outputs();
        assert!(!out.vacuum_carrier_to_oven);
        assert!(out.oven_door);
        assert!(out.oven_carrier_inward);
    }

    // ── Heat treatment: carrier inside, dwell counts to 30 ──
    port.lock().set_sensor(SensorChannel::OvenCarrierIn, true);
    for cycle in 1..=30u32 {
        runner.step().unwrap();
        assert_eq!(runner.state.oven_ready, cycle == 30, "cycle {cycle}");
    }
    assert_eq!(runner.state.oven_timer, 0);
    assert!(!port.lock().outputs().oven_process_light);

    // ── Unload: carrier drives back out ──
    port.lock().set_sensor(SensorChannel::OvenCarrierIn, false);
    runner.step().unwrap();
    {
        let out = port.lock().outputs();
        assert!(out.oven_door);
        assert!(out.oven_carrier_outward);
    }

    // ── Pick: lower, grip, raise, then move towards the turntable ──
    port.lock().set_sensor(SensorChannel::OvenCarrierOut, true);
    let mut moving = false;
    for _ in 0..40 {
        runner.step().unwrap();
        if runner.command().vacuum_carrier_to_turntable {
            moving = true;
            break;
        }
    }
    assert!(moving, "carrier never started towards the turntable");
    {
        let out = port.lock().outputs();
        assert!(out.gripper_grip, "grip must stay engaged in flight");
        assert!(!out.gripper_lower);
    }
    assert!(runner.state.transfer_timer >= 25);

    // ── Release at the turntable ──
    port.lock().set_sensor(SensorChannel::CarrierAtOven, false);
    port.lock()
        .set_sensor(SensorChannel::CarrierAtTurntable, true);
    let mut released = false;
    for _ in 0..40 {
        runner.step().unwrap();
        let out = port.lock().outputs();
        if !out.gripper_grip && !out.gripper_lower && runner.state.release_timer >= 30 {
            released = true;
            break;
        }
    }
    assert!(released, "release sequence never completed");
    assert!(!port.lock().outputs().vacuum_carrier_to_turntable);

    // ── Re-arm: nothing staged upstream, turntable parks ──
    port.lock()
        .set_sensor(SensorChannel::ConveyorLightBarrier, false);
    port.lock().set_sensor(SensorChannel::OvenLightBarrier, true);
    runner.step().unwrap();
    assert!(port.lock().outputs().turntable_ccw);

    port.lock()
        .set_sensor(SensorChannel::TurntableAtCarrier, true);
    runner.step().unwrap();

    assert!(!runner.state.oven_ready);
    assert_eq!(runner.state.oven_timer, 0);
    assert_eq!(runner.state.transfer_timer, 0);
    assert_eq!(runner.state.saw_timer, 0);
    assert_eq!(runner.state.delivery_timer, 0);
    {
        let out = port.lock().outputs();
        assert!(!out.turntable_ccw);
        assert!(!out.compressor);
        assert!(!out.conveyor);
        assert!(!out.turntable_pusher);
    }
}

#[test]
fn pickup_abandoned_when_product_removed_is_fail_open() {
    // The upstream product sensor de-asserts while the carrier is in
    // flight: the waiting branch stops updating the motor intent, so the
    // last commanded value persists. Fail-open, as on the physical cell.
    let (mut runner, port) = fixture();
    port.lock()
        .set_sensor(SensorChannel::ConveyorLightBarrier, true);

    runner.step().unwrap();
    assert!(port.lock().outputs().vacuum_carrier_to_oven);

    port.lock().set_sensor(SensorChannel::OvenLightBarrier, true);
    runner.step().unwrap();
    assert!(
        port.lock().outputs().vacuum_carrier_to_oven,
        "motor intent must persist (fail-open), not retract"
    );
}

#[test]
fn heating_interrupted_by_rearm_restarts_from_zero() {
    let (mut runner, port) = fixture();
    port.lock()
        .set_sensor(SensorChannel::ConveyorLightBarrier, true);
    port.lock().set_sensor(SensorChannel::CarrierAtOven, true);
    port.lock().set_sensor(SensorChannel::OvenCarrierIn, true);

    for _ in 0..12 {
        runner.step().unwrap();
    }
    assert_eq!(runner.state.oven_timer, 12);

    // Product disappears upstream mid-dwell; the turntable is already
    // parked, so re-arm fires on the next cycle.
    port.lock()
        .set_sensor(SensorChannel::ConveyorLightBarrier, false);
    port.lock()
        .set_sensor(SensorChannel::TurntableAtCarrier, true);
    runner.step().unwrap();
    assert_eq!(runner.state.oven_timer, 0);
    assert!(!runner.state.oven_ready);
}
