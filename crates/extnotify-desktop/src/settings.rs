use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use extnotify_core::config::{AlertFlags, BoardPins, ModuleConfig};
use extnotify_core::gpio::{Pin, Polarity};
use extnotify_core::packet::NodeNum;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Board {
    None,
    EbyteEsp32S3,
}

impl Board {
    pub fn pins(self) -> BoardPins {
        match self {
            Board::None => BoardPins::NONE,
            Board::EbyteEsp32S3 => BoardPins::EBYTE_ESP32_S3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub local_node: NodeNum,
    /// Sender used for simulated inbound messages.
    pub remote_node: NodeNum,
    pub board: Board,
    pub ringtone_path: PathBuf,
    /// Show an RGB LED that fades while nagging.
    pub rgb_led: bool,
    pub module: ModuleConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            local_node: 0x1000_0001,
            remote_node: 0x2000_0002,
            board: Board::EbyteEsp32S3,
            ringtone_path: PathBuf::from("ringtone.txt"),
            rgb_led: true,
            module: ModuleConfig {
                enabled: true,
                output_buzzer: Pin::new(10),
                output_vibra: Pin::new(28),
                active: Polarity::ActiveHigh,
                message: AlertFlags { signal: true, vibra: true, ..Default::default() },
                bell: AlertFlags::ALL,
                use_pwm: true,
                output_ms: 500,
                nag_timeout: 10,
                ..Default::default()
            },
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let settings: Settings = toml::from_str(
            r#"
            local_node = 7
            board = "none"
            rgb_led = false

            [module]
            enabled = true
            output = 4
            active = "active_low"
            use_pwm = false
            output_ms = 250
            nag_timeout = 0

            [module.message]
            buzzer = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.local_node, 7);
        assert_eq!(settings.board, Board::None);
        assert!(!settings.rgb_led);
        assert_eq!(settings.module.output, Pin::new(4));
        assert_eq!(settings.module.active, Polarity::ActiveLow);
        assert_eq!(settings.module.message, AlertFlags { buzzer: true, ..Default::default() });
        assert_eq!(settings.module.output_ms, 250);
        // Unset pins stay absent
        assert_eq!(settings.module.output_vibra, None);
    }

    #[test]
    fn test_zero_pin_is_rejected() {
        let parsed: Result<Settings, _> = toml::from_str("[module]\noutput = 0\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(settings.module.enabled);
        assert_eq!(settings.board.pins(), BoardPins::EBYTE_ESP32_S3);
    }
}
