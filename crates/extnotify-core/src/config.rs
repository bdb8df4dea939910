//! Module configuration snapshot and board pin defaults.

use crate::consts;
use crate::gpio::{Pin, Polarity};
use crate::packet::Trigger;
use crate::peripheral::Peripheral;

/// Which peripherals respond to one kind of trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct AlertFlags {
    pub signal: bool,
    pub buzzer: bool,
    pub vibra: bool,
}

impl AlertFlags {
    pub const ALL: AlertFlags = AlertFlags { signal: true, buzzer: true, vibra: true };

    pub fn selects(&self, peripheral: Peripheral) -> bool {
        match peripheral {
            Peripheral::Signal => self.signal,
            Peripheral::Buzzer => self.buzzer,
            Peripheral::Vibration => self.vibra,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerMode {
    /// Plain on/off line, toggled like the other outputs.
    Switched,
    /// Passive buzzer fed by the melody engine.
    Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ModuleConfig {
    pub enabled: bool,
    /// Signal line. Falls back to the board's notification pin when unset.
    pub output: Option<Pin>,
    pub output_buzzer: Option<Pin>,
    pub output_vibra: Option<Pin>,
    /// Tone pin used when `use_pwm` is set. Falls back to the board buzzer.
    pub buzzer_gpio: Option<Pin>,
    pub active: Polarity,
    pub message: AlertFlags,
    pub bell: AlertFlags,
    pub use_pwm: bool,
    /// Hold duration per toggle; zero means [`consts::DEFAULT_OUTPUT_MS`].
    pub output_ms: u32,
    /// Nag window in seconds; zero falls back to `output_ms`.
    pub nag_timeout: u32,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            output: None,
            output_buzzer: None,
            output_vibra: None,
            buzzer_gpio: None,
            active: Polarity::default(),
            message: AlertFlags::default(),
            bell: AlertFlags::default(),
            use_pwm: false,
            output_ms: 0,
            nag_timeout: 0,
        }
    }
}

impl ModuleConfig {
    pub fn buzzer_mode(&self) -> BuzzerMode {
        if self.use_pwm { BuzzerMode::Tone } else { BuzzerMode::Switched }
    }

    pub fn flags_for(&self, trigger: Trigger) -> AlertFlags {
        match trigger {
            Trigger::Message => self.message,
            Trigger::Bell => self.bell,
        }
    }

    /// Minimum time a peripheral stays in one state while nagging.
    pub fn hold_ms(&self) -> u32 {
        if self.output_ms > 0 { self.output_ms } else { consts::DEFAULT_OUTPUT_MS }
    }

    /// Length of the alert window opened by an arming event.
    ///
    /// Note that this uses the raw `output_ms`, not [`Self::hold_ms`].
    pub fn nag_window_ms(&self) -> u64 {
        if self.nag_timeout > 0 {
            u64::from(self.nag_timeout) * 1000
        } else {
            u64::from(self.output_ms)
        }
    }
}

/// Pins a board variant provides when the module config leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardPins {
    pub ext_notify_out: Option<Pin>,
    pub buzzer: Option<Pin>,
}

impl BoardPins {
    pub const NONE: BoardPins = BoardPins { ext_notify_out: None, buzzer: None };

    /// EBYTE ESP32-S3: LED on GPIO2, passive buzzer on GPIO11.
    pub const EBYTE_ESP32_S3: BoardPins = BoardPins {
        ext_notify_out: Pin::new(2),
        buzzer: Pin::new(11),
    };
}

/// Pins actually driven, after applying board fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPins {
    pub signal: Option<Pin>,
    pub buzzer: Option<Pin>,
    pub vibra: Option<Pin>,
    pub tone: Option<Pin>,
}

impl ResolvedPins {
    pub fn resolve(config: &ModuleConfig, board: &BoardPins) -> Self {
        Self {
            signal: config.output.or(board.ext_notify_out),
            buzzer: config.output_buzzer,
            vibra: config.output_vibra,
            tone: config.buzzer_gpio.or(board.buzzer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nag_window_prefers_timeout() {
        let config = ModuleConfig { output_ms: 500, nag_timeout: 3, ..Default::default() };
        assert_eq!(config.nag_window_ms(), 3000);

        let config = ModuleConfig { output_ms: 500, nag_timeout: 0, ..Default::default() };
        assert_eq!(config.nag_window_ms(), 500);
    }

    #[test]
    fn test_hold_falls_back_to_default() {
        let config = ModuleConfig::default();
        assert_eq!(config.hold_ms(), consts::DEFAULT_OUTPUT_MS);
        assert_eq!(config.nag_window_ms(), 0);
    }

    #[test]
    fn test_board_fallbacks() {
        let config = ModuleConfig { output_vibra: Pin::new(7), ..Default::default() };
        let pins = ResolvedPins::resolve(&config, &BoardPins::EBYTE_ESP32_S3);
        assert_eq!(pins.signal, Pin::new(2));
        assert_eq!(pins.tone, Pin::new(11));
        assert_eq!(pins.vibra, Pin::new(7));
        assert_eq!(pins.buzzer, None);

        let config = ModuleConfig { output: Pin::new(4), ..Default::default() };
        let pins = ResolvedPins::resolve(&config, &BoardPins::EBYTE_ESP32_S3);
        assert_eq!(pins.signal, Pin::new(4));
    }
}
