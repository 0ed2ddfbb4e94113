// Umbrella Buzz - Hardware & System Configuration
// Target: ESP32 DevKit (Xtensa)

// ---------------------------------------------------------------------------
// GPIO Pin Definitions
// ---------------------------------------------------------------------------
pub const PIN_VIBRATION: i32 = 2;  // Vibration motor driver (OUTPUT, idle LOW)
pub const PIN_BUTTON: i32 = 0;     // BOOT button (INPUT_PULLUP, active LOW)
pub const PIN_INDICATOR: i32 = 15; // Indicator LED (OUTPUT, idle LOW)

// ---------------------------------------------------------------------------
// BLE GATT Layout
// ---------------------------------------------------------------------------
pub const BLE_DEVICE_NAME: &str = "ESP32";
pub const BLE_APP_ID: u16 = 0;
pub const SERVICE_UUID: u128 = 0x4fafc201_1fb5_459e_8fcc_c5c9c331914b;
pub const CONTROL_CHAR_UUID: u128 = 0xbeb5483e_36e1_4688_b7f5_ea07361b26a8;
pub const CONTROL_CHAR_INITIAL_VALUE: &[u8] = b"0";
pub const CONTROL_CHAR_MAX_LEN: usize = 20;
pub const SERVICE_NUM_HANDLES: u16 = 8;

// Preferred connection interval hints (1.25 ms units), helps iPhone clients
pub const ADV_MIN_INTERVAL_HINT: i32 = 0x06;
pub const ADV_MAX_INTERVAL_HINT: i32 = 0x12;

// Control opcodes (first byte of a write)
pub const OPCODE_INCOMING_CALL: u8 = b'0';
pub const OPCODE_INCOMING_MESSAGE: u8 = b'1';

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_BUTTON: usize = 8192;
pub const STACK_HAPTIC: usize = 4096;
pub const STACK_BLINK: usize = 4096;

// ---------------------------------------------------------------------------
// Timing (milliseconds unless stated)
// ---------------------------------------------------------------------------
pub const BUTTON_POLL_INTERVAL_MS: u32 = 10;  // one tick
pub const LONG_PRESS_TICKS: u32 = 300;        // 3 s at 10 ms/tick
pub const LONG_PRESS_FLASH_MS: u32 = 1000;
pub const PULSE_ON_MS: u32 = 1000;
pub const PULSE_GAP_MS: u32 = 1000;
pub const TRIPLE_BUZZ_REPEAT: u8 = 3;
pub const BLINK_HALF_PERIOD_MS: u64 = 500;
pub const MAIN_IDLE_MS: u64 = 2000;
pub const HAPTIC_QUEUE_DEPTH: usize = 4;
