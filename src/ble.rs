// Umbrella Buzz - Control Attribute Write Handling
//
// Decodes writes to the control characteristic into haptic patterns. Runs on
// the BLE stack's callback context, so the firmware hands patterns off to the
// haptic task instead of playing them in place.

use std::sync::mpsc::{SyncSender, TrySendError};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::*;
use crate::drivers::haptic::HapticDriver;
use crate::events::Pattern;

/// GATT attribute handle as assigned by the stack.
pub type AttrHandle = u16;

/// Map a control write payload to a pattern. Only the first byte counts.
pub fn decode(payload: &[u8]) -> Option<Pattern> {
    match *payload.first()? {
        OPCODE_INCOMING_CALL => Some(Pattern::TripleBuzz),
        OPCODE_INCOMING_MESSAGE => Some(Pattern::SingleBuzz),
        _ => None,
    }
}

/// Something that plays (or queues) a haptic pattern.
pub trait PatternSink {
    fn dispatch(&mut self, pattern: Pattern);
}

/// Plays the pattern synchronously on the caller's thread.
impl<P: OutputPin, D: DelayNs> PatternSink for HapticDriver<P, D> {
    fn dispatch(&mut self, pattern: Pattern) {
        self.fire(pattern);
    }
}

/// Queues the pattern for the haptic task without blocking.
impl PatternSink for SyncSender<Pattern> {
    fn dispatch(&mut self, pattern: Pattern) {
        match self.try_send(pattern) {
            Ok(()) => {}
            Err(TrySendError::Full(p)) => log::warn!("Haptic queue full, dropping {:?}", p),
            Err(TrySendError::Disconnected(p)) => log::warn!("Haptic task gone, dropping {:?}", p),
        }
    }
}

pub struct ControlWriteHandler<S> {
    control: Option<AttrHandle>,
    sink: S,
}

impl<S: PatternSink> ControlWriteHandler<S> {
    /// Writes are ignored until the control characteristic handle is bound.
    pub fn new(sink: S) -> Self {
        Self { control: None, sink }
    }

    pub fn bind(&mut self, handle: AttrHandle) {
        log::info!("Control characteristic bound to handle {}", handle);
        self.control = Some(handle);
    }

    /// Handle a write to `handle`. Returns the pattern dispatched, if any.
    pub fn on_write(&mut self, handle: AttrHandle, payload: &[u8]) -> Option<Pattern> {
        if self.control != Some(handle) || payload.is_empty() {
            return None;
        }

        log::info!("*********");
        let pattern = decode(payload);
        match pattern {
            Some(p) => {
                log::info!("{}", p.display_name());
                self.sink.dispatch(p);
            }
            None => log::info!("Ignoring control opcode {:#04x}", payload[0]),
        }
        log::info!("*********");
        pattern
    }
}
