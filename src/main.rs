// Umbrella Buzz - Firmware Entry Point
//
// Boot sequence:
//   1. Start logging and bring up the BLE GATT server (control characteristic).
//   2. Drive the vibration motor and indicator LED low, pull the button up.
//   3. Spawn the haptic task (plays patterns queued by BLE writes).
//   4. Spawn the button task (short press cycles the LED, long press flashes it).
//
// A '0' written to the control characteristic buzzes three times (incoming
// call), a '1' buzzes once (incoming message).

mod gatt;

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::prelude::*;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use umbrella_buzz::config::*;
use umbrella_buzz::drivers::haptic::HapticDriver;
use umbrella_buzz::tasks;

fn main() -> anyhow::Result<()> {
    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("Umbrella Buzz firmware starting");

    let peripherals = Peripherals::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ---- BLE --------------------------------------------------------------
    let (pattern_tx, pattern_rx) = mpsc::sync_channel(HAPTIC_QUEUE_DEPTH);
    let _server = gatt::start(peripherals.modem, nvs, pattern_tx)?;

    // ---- GPIO -------------------------------------------------------------
    let mut vibration = PinDriver::output(peripherals.pins.gpio2)?;
    vibration.set_low()?;

    let mut indicator = PinDriver::output(peripherals.pins.gpio15)?;
    indicator.set_low()?;

    let mut button = PinDriver::input(peripherals.pins.gpio0)?;
    button.set_pull(Pull::Up)?;

    log::info!(
        "GPIO ready (vibration={}, indicator={}, button={})",
        PIN_VIBRATION,
        PIN_INDICATOR,
        PIN_BUTTON
    );

    // ---- Spawn tasks (map to FreeRTOS tasks via std::thread) ---------------
    thread::Builder::new()
        .name("haptic".into())
        .stack_size(STACK_HAPTIC)
        .spawn(move || {
            tasks::haptic::haptic_task(HapticDriver::new(vibration, FreeRtos), pattern_rx);
        })?;

    thread::Builder::new()
        .name("button".into())
        .stack_size(STACK_BUTTON)
        .spawn(move || {
            tasks::button::button_task(button, indicator, FreeRtos);
        })?;

    // Main thread has nothing left to do. `_server` keeps the BLE callbacks
    // registered for as long as we idle here.
    loop {
        thread::sleep(Duration::from_millis(MAIN_IDLE_MS));
    }
}
