//! End-to-end scenarios over the public API: BLE writes to motor output,
//! button presses to indicator output.

#[path = "../src/testing.rs"]
#[allow(dead_code)]
mod testing;

use std::sync::mpsc;
use std::thread;

use testing::{Clock, FakeButton, FakeDelay, RecordingPin};
use umbrella_buzz::ble::ControlWriteHandler;
use umbrella_buzz::config::HAPTIC_QUEUE_DEPTH;
use umbrella_buzz::drivers::haptic::HapticDriver;
use umbrella_buzz::drivers::indicator::Indicator;
use umbrella_buzz::events::{IndicatorMode, PressKind};
use umbrella_buzz::input::ButtonStateMachine;
use umbrella_buzz::tasks::haptic::haptic_task;

const CONTROL: u16 = 0x2a;

type Machine = ButtonStateMachine<FakeButton, RecordingPin, FakeDelay>;

/// Run `writes` through the queued BLE path and return the motor log.
fn play_writes(writes: &[&str]) -> Vec<(u64, bool)> {
    let clock = Clock::default();
    let motor = RecordingPin::new(&clock);
    let (tx, rx) = mpsc::sync_channel(HAPTIC_QUEUE_DEPTH);

    let driver = HapticDriver::new(motor.clone(), FakeDelay::new(&clock));
    let worker = thread::spawn(move || haptic_task(driver, rx));

    let mut handler = ControlWriteHandler::new(tx);
    handler.bind(CONTROL);
    for payload in writes {
        handler.on_write(CONTROL, payload.as_bytes());
    }
    // Dropping the handler closes the queue and lets the task finish.
    drop(handler);
    worker.join().unwrap();

    motor.writes()
}

#[test]
fn incoming_call_buzzes_three_times() {
    assert_eq!(
        play_writes(&["0"]),
        vec![
            (0, true),
            (1000, false),
            (2000, true),
            (3000, false),
            (4000, true),
            (5000, false),
        ]
    );
}

#[test]
fn incoming_message_buzzes_once() {
    assert_eq!(play_writes(&["1"]), vec![(0, true), (1000, false)]);
}

#[test]
fn unknown_opcode_leaves_motor_idle() {
    assert!(play_writes(&["9", ""]).is_empty());
}

#[test]
fn three_short_presses_walk_the_indicator_cycle() {
    let clock = Clock::default();
    let button = FakeButton::default();
    let led = RecordingPin::new(&clock);
    let mut machine =
        ButtonStateMachine::new(button.clone(), Indicator::new(led.clone()), FakeDelay::new(&clock));

    let short_press = |machine: &mut Machine| {
        button.press();
        for _ in 0..10 {
            machine.tick();
        }
        button.release();
        let kind = machine.tick();
        // Next tick applies the new mode.
        machine.tick();
        kind
    };

    assert_eq!(short_press(&mut machine), Some(PressKind::Short));
    assert_eq!(machine.mode(), IndicatorMode::On);
    assert!(!machine.indicator().is_blinking());
    assert!(led.level());

    assert_eq!(short_press(&mut machine), Some(PressKind::Short));
    assert_eq!(machine.mode(), IndicatorMode::Blinking);
    assert!(machine.indicator().is_blinking());

    assert_eq!(short_press(&mut machine), Some(PressKind::Short));
    assert_eq!(machine.mode(), IndicatorMode::Off);
    assert!(!machine.indicator().is_blinking());
    assert!(!led.level());
}
