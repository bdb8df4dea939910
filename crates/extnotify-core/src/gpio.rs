//! Digital output plumbing shared by the sequencer and the board glue.

use core::fmt;
use core::num::NonZeroU8;

/// A configured GPIO number. An unconfigured pin is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Pin(NonZeroU8);

impl Pin {
    pub const fn new(number: u8) -> Option<Self> {
        match NonZeroU8::new(number) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Converts a legacy raw pin value, where `0` and negatives meant "unset".
    pub fn from_raw(raw: i32) -> Option<Self> {
        u8::try_from(raw).ok().and_then(Self::new)
    }

    pub const fn number(self) -> u8 {
        self.0.get()
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Which line level means "on" for the signal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum Polarity {
    #[default]
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    pub fn level(self, on: bool) -> Level {
        match self {
            Polarity::ActiveHigh => Level::from(on),
            Polarity::ActiveLow => Level::from(!on),
        }
    }
}

/// Platform-agnostic digital output trait
pub trait PinIo {
    fn configure_as_output(&mut self, pin: Pin);
    fn write_digital(&mut self, pin: Pin, level: Level);
}

/// Output sink for boards without any notification lines.
pub struct NoPins;

impl PinIo for NoPins {
    fn configure_as_output(&mut self, _pin: Pin) {}
    fn write_digital(&mut self, _pin: Pin, _level: Level) {}
}
