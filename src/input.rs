// Umbrella Buzz - Button State Machine
//
// Polled (every 10 ms) press-length counter for the active-low button. A
// completed press shorter than LONG_PRESS_TICKS advances the indicator mode,
// a longer one flashes the indicator once for LONG_PRESS_FLASH_MS.
//
// Presses shorter than one poll period can be missed entirely.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::*;
use crate::drivers::indicator::Indicator;
use crate::events::{IndicatorMode, PressKind};

pub struct ButtonStateMachine<B, P, D> {
    button: B,
    indicator: Indicator<P>,
    delay: D,

    mode: IndicatorMode,
    // Ticks the button has been held so far.
    pressed_ticks: u32,
    // Length of the press that just ended, 0 once handled.
    last_press_ticks: u32,
}

impl<B, P, D> ButtonStateMachine<B, P, D>
where
    B: InputPin,
    P: OutputPin + Send + 'static,
    D: DelayNs,
{
    pub fn new(button: B, indicator: Indicator<P>, delay: D) -> Self {
        Self {
            button,
            indicator,
            delay,
            mode: IndicatorMode::Off,
            pressed_ticks: 0,
            last_press_ticks: 0,
        }
    }

    pub fn mode(&self) -> IndicatorMode {
        self.mode
    }

    pub fn indicator(&self) -> &Indicator<P> {
        &self.indicator
    }

    /// One poll iteration without the trailing sleep. Returns the press
    /// handled in this tick, if any.
    pub fn tick(&mut self) -> Option<PressKind> {
        self.indicator.apply(self.mode);

        match self.button.is_low() {
            Ok(true) => self.pressed_ticks = self.pressed_ticks.saturating_add(1),
            Ok(false) => {
                self.last_press_ticks = self.pressed_ticks;
                self.pressed_ticks = 0;
            }
            Err(_) => log::warn!("Button read failed, skipping sample"),
        }

        if self.last_press_ticks == 0 {
            return None;
        }

        let kind = PressKind::classify(self.last_press_ticks);
        match kind {
            PressKind::Short => {
                self.mode = self.mode.next();
                log::info!("short press -> {:?}", self.mode);
            }
            PressKind::Long => {
                // Mode is left alone; the next tick re-applies it.
                log::info!("long press");
                self.indicator.flash(&mut self.delay, LONG_PRESS_FLASH_MS);
            }
        }
        self.last_press_ticks = 0;
        Some(kind)
    }

    /// Poll forever at BUTTON_POLL_INTERVAL_MS.
    pub fn run(mut self) -> ! {
        loop {
            self.tick();
            self.delay.delay_ms(BUTTON_POLL_INTERVAL_MS);
        }
    }
}
