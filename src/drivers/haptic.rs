// Umbrella Buzz - Haptic Motor Driver
//
// Simple GPIO-driven vibration motor.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::events::Pattern;

pub struct HapticDriver<P, D> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> HapticDriver<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Play a pattern (blocks the calling thread for its full length).
    pub fn fire(&mut self, pattern: Pattern) {
        let timing = pattern.timing();
        for _ in 0..timing.repeat {
            self.buzz(timing.on_ms);
            if timing.off_ms > 0 {
                self.delay.delay_ms(timing.off_ms);
            }
        }
    }

    /// Vibrate for a custom duration (blocks the calling thread).
    pub fn buzz(&mut self, duration_ms: u32) {
        let _ = self.pin.set_high();
        self.delay.delay_ms(duration_ms);
        let _ = self.pin.set_low();
    }
}
