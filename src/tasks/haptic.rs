// Umbrella Buzz - Haptic Task
//
// Owns the vibration motor. Plays patterns queued by the BLE write handler so
// the BLE callback never waits on a multi-second pattern.

use std::sync::mpsc::Receiver;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::drivers::haptic::HapticDriver;
use crate::events::Pattern;

/// Play patterns in arrival order until every sender is dropped.
pub fn haptic_task<P, D>(mut haptic: HapticDriver<P, D>, pattern_rx: Receiver<Pattern>)
where
    P: OutputPin,
    D: DelayNs,
{
    log::info!("Haptic task started");

    for pattern in pattern_rx.iter() {
        log::info!("Playing {:?}", pattern);
        haptic.fire(pattern);
    }

    log::warn!("Pattern channel closed - exiting haptic task");
}
