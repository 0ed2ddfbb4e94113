// Recording fakes of the embedded-hal traits for host tests.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin, OutputPin};

/// Virtual time shared by fakes, in nanoseconds.
#[derive(Clone, Default)]
pub struct Clock(Arc<AtomicU64>);

impl Clock {
    pub fn now(&self) -> u64 {
        self.0.load(Ordering::SeqCst) / 1_000_000
    }

    fn advance_ns(&self, ns: u64) {
        self.0.fetch_add(ns, Ordering::SeqCst);
    }
}

pub struct FakeDelay {
    clock: Clock,
}

impl FakeDelay {
    pub fn new(clock: &Clock) -> Self {
        Self { clock: clock.clone() }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_ns(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.advance_ns(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance_ns(u64::from(ms) * 1_000_000);
    }
}

/// Output pin that logs every write as `(time_ms, level)`.
#[derive(Clone)]
pub struct RecordingPin {
    clock: Clock,
    writes: Arc<Mutex<Vec<(u64, bool)>>>,
}

impl RecordingPin {
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
            writes: Arc::default(),
        }
    }

    pub fn writes(&self) -> Vec<(u64, bool)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn levels(&self) -> Vec<bool> {
        self.writes().into_iter().map(|(_, level)| level).collect()
    }

    /// Last written level; pins start low.
    pub fn level(&self) -> bool {
        self.writes().last().map(|&(_, level)| level).unwrap_or(false)
    }

    pub fn clear(&self) {
        self.writes.lock().unwrap().clear();
    }

    fn record(&self, level: bool) {
        let now = self.clock.now();
        self.writes.lock().unwrap().push((now, level));
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true);
        Ok(())
    }
}

/// Read failure reported by a `FakeButton` set to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadError;

impl Error for ReadError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Active-low button whose state is set by the test.
#[derive(Clone, Default)]
pub struct FakeButton {
    pressed: Arc<AtomicBool>,
    failing: Arc<AtomicBool>,
}

impl FakeButton {
    pub fn press(&self) {
        self.pressed.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.pressed.store(false, Ordering::SeqCst);
    }

    /// While set, every read returns `ReadError`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn read(&self) -> Result<bool, ReadError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ReadError);
        }
        Ok(self.pressed.load(Ordering::SeqCst))
    }
}

impl ErrorType for FakeButton {
    type Error = ReadError;
}

impl InputPin for FakeButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.read().map(|pressed| !pressed)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.read()
    }
}
