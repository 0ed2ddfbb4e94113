// Umbrella Buzz - Control Logic
//
// Everything here is generic over the embedded-hal GPIO and delay traits so it
// runs unchanged on the ESP32 (esp-idf-hal drivers) and on the host under
// `cargo test` (recording fakes).

pub mod ble;
pub mod config;
pub mod drivers;
pub mod events;
pub mod input;
pub mod tasks;

#[cfg(test)]
mod testing;
