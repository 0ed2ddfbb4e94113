// Umbrella Buzz - Indicator LED Driver
//
// Steady on/off writes plus a background blink task that owns the blinking
// phase. The LED pin is shared with the blink task through a mutex; the task
// is always stopped and joined before the next steady write.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::config::*;
use crate::events::IndicatorMode;

/// LED pin handle shared between the owner and its blink task.
pub type SharedPin<P> = Arc<Mutex<P>>;

fn drive<P: OutputPin>(pin: &Mutex<P>, high: bool) {
    let mut pin = pin.lock().unwrap_or_else(PoisonError::into_inner);
    if pin.set_state(PinState::from(high)).is_err() {
        log::warn!("Indicator pin write failed");
    }
}

// ---------------------------------------------------------------------------
// Blink task
// ---------------------------------------------------------------------------

/// A running blink loop. Dropping the stop sender ends the loop at its next
/// half-period wait.
pub struct BlinkTask {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl BlinkTask {
    pub fn start<P>(pin: SharedPin<P>, half_period: Duration) -> anyhow::Result<Self>
    where
        P: OutputPin + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("blink".into())
            .stack_size(STACK_BLINK)
            .spawn(move || blink_loop(&pin, &stop_rx, half_period))?;
        Ok(Self { stop_tx, handle })
    }

    /// Stop the loop and wait until it has exited.
    pub fn stop(self) {
        drop(self.stop_tx);
        if self.handle.join().is_err() {
            log::warn!("Blink task panicked");
        }
    }
}

fn blink_loop<P: OutputPin>(pin: &Mutex<P>, stop_rx: &Receiver<()>, half_period: Duration) {
    log::info!("Blink task started");

    // Returns true once the owner asked us to stop.
    let wait = || match stop_rx.recv_timeout(half_period) {
        Err(RecvTimeoutError::Timeout) => false,
        Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
    };

    loop {
        drive(pin, true);
        if wait() {
            break;
        }
        drive(pin, false);
        if wait() {
            break;
        }
    }

    log::info!("Blink task stopped");
}

// ---------------------------------------------------------------------------
// Indicator
// ---------------------------------------------------------------------------
pub struct Indicator<P> {
    pin: SharedPin<P>,
    blink: Option<BlinkTask>,
    half_period: Duration,
}

impl<P: OutputPin + Send + 'static> Indicator<P> {
    pub fn new(pin: P) -> Self {
        Self::with_half_period(pin, Duration::from_millis(BLINK_HALF_PERIOD_MS))
    }

    pub fn with_half_period(pin: P, half_period: Duration) -> Self {
        Self {
            pin: Arc::new(Mutex::new(pin)),
            blink: None,
            half_period,
        }
    }

    /// Bring the LED in line with `mode`, starting or stopping the blink task.
    pub fn apply(&mut self, mode: IndicatorMode) {
        match mode {
            IndicatorMode::Blinking => {
                if self.blink.is_none() {
                    match BlinkTask::start(Arc::clone(&self.pin), self.half_period) {
                        Ok(task) => self.blink = Some(task),
                        // Slot stays empty; retried on the next apply.
                        Err(e) => log::error!("Failed to spawn blink task: {}", e),
                    }
                }
            }
            IndicatorMode::On => {
                self.stop_blink();
                drive(&self.pin, true);
            }
            IndicatorMode::Off => {
                self.stop_blink();
                drive(&self.pin, false);
            }
        }
    }

    /// One-shot visible pulse, independent of the current mode.
    pub fn flash<D: DelayNs>(&mut self, delay: &mut D, duration_ms: u32) {
        drive(&self.pin, true);
        delay.delay_ms(duration_ms);
        drive(&self.pin, false);
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_some()
    }

    fn stop_blink(&mut self) {
        if let Some(task) = self.blink.take() {
            task.stop();
        }
    }
}
