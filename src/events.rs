// Umbrella Buzz - System Events & Data Types

use crate::config::*;

// ---------------------------------------------------------------------------
// Haptic Patterns
// ---------------------------------------------------------------------------

/// One timed step of a haptic pattern: `repeat` cycles of `on_ms` high
/// followed by `off_ms` low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub on_ms: u32,
    pub off_ms: u32,
    pub repeat: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// One 1 s pulse (incoming message).
    SingleBuzz,
    /// Three 1 s pulses with 1 s gaps (incoming call).
    TripleBuzz,
}

impl Pattern {
    pub const fn timing(&self) -> PulseTiming {
        match self {
            Self::SingleBuzz => PulseTiming {
                on_ms: PULSE_ON_MS,
                off_ms: 0,
                repeat: 1,
            },
            Self::TripleBuzz => PulseTiming {
                on_ms: PULSE_ON_MS,
                off_ms: PULSE_GAP_MS,
                repeat: TRIPLE_BUZZ_REPEAT,
            },
        }
    }

    /// Human-readable label for the log.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SingleBuzz => "coming message",
            Self::TripleBuzz => "coming call",
        }
    }
}

// ---------------------------------------------------------------------------
// Indicator Mode
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorMode {
    #[default]
    Off,
    On,
    Blinking,
}

impl IndicatorMode {
    /// Next mode in the Off -> On -> Blinking -> Off cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Blinking,
            Self::Blinking => Self::Off,
        }
    }
}

// ---------------------------------------------------------------------------
// Button Presses
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Short,
    Long,
}

impl PressKind {
    /// Classify a completed press by its length in poll ticks.
    pub const fn classify(duration_ticks: u32) -> Self {
        if duration_ticks < LONG_PRESS_TICKS {
            Self::Short
        } else {
            Self::Long
        }
    }
}
