use core::fmt;
use core::ops::Not;

// --- Digital Levels ---

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// Returns the level as the `0`/`1` integer MicroPython uses for `Pin.value()`.
    pub fn as_u8(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

impl Not for Level {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

// --- Pin Configuration ---

/// Pin modes from `machine.Pin` (Pin.OUT, Pin.IN, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinMode {
    #[default]
    Out,
    In,
    OpenDrain,
    Alt,
    AltOpenDrain,
}

/// Pull resistor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pull {
    #[default]
    None,
    PullUp,
    PullDown,
}

/// Order in which a byte is clocked out of a serial data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    #[default]
    MsbFirst,
    LsbFirst,
}

/// Edge selection for GPIO event detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
    Both,
}

// --- Machine State ---

/// Reasons reported by `machine.reset_cause()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResetCause {
    PowerOn = 0,
    Hard = 1,
    Watchdog = 2,
    DeepSleep = 3,
    Soft = 4,
}

/// Number of parallel outputs on a 74HC595-style shift register.
pub const SHIFT_REGISTER_LENGTH: u8 = 8;
