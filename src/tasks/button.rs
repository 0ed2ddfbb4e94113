// Umbrella Buzz - Button Task
//
// Runs the button state machine at 100 Hz for the lifetime of the device.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::drivers::indicator::Indicator;
use crate::input::ButtonStateMachine;

pub fn button_task<B, P, D>(button: B, indicator_pin: P, delay: D) -> !
where
    B: InputPin,
    P: OutputPin + Send + 'static,
    D: DelayNs,
{
    log::info!("Button task started");

    ButtonStateMachine::new(button, Indicator::new(indicator_pin), delay).run()
}
