//! Host stand-ins for the board collaborators.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use extnotify_core::accent::rgb_fade::RgbLed;
use extnotify_core::gpio::{Level, Pin, PinIo};
use extnotify_core::ringtone::RingtoneStore;
use extnotify_core::schedule::Millis;

/// Remembers the last level written to each pin.
#[derive(Debug, Default)]
pub struct DesktopPins {
    outputs: BTreeSet<Pin>,
    levels: BTreeMap<Pin, Level>,
    writes: u64,
}

impl DesktopPins {
    pub fn level(&self, pin: Pin) -> Option<Level> {
        self.levels.get(&pin).copied()
    }

    pub fn is_output(&self, pin: Pin) -> bool {
        self.outputs.contains(&pin)
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl PinIo for DesktopPins {
    fn configure_as_output(&mut self, pin: Pin) {
        self.outputs.insert(pin);
    }

    fn write_digital(&mut self, pin: Pin, level: Level) {
        if !self.outputs.contains(&pin) {
            log::warn!("Write to {} before it was configured as an output", pin);
        }
        self.levels.insert(pin, level);
        self.writes += 1;
    }
}

/// RGB LED whose colour the TUI paints as a swatch.
#[derive(Clone, Default)]
pub struct SharedLed {
    color: Rc<Cell<(u8, u8, u8)>>,
}

impl SharedLed {
    pub fn color(&self) -> (u8, u8, u8) {
        self.color.get()
    }
}

impl RgbLed for SharedLed {
    fn set_color(&mut self, red: u8, green: u8, blue: u8) {
        self.color.set((red, green, blue));
    }
}

/// Ringtone kept as plain text in a file.
pub struct FileRingtoneStore {
    path: PathBuf,
}

impl FileRingtoneStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RingtoneStore for FileRingtoneStore {
    type Error = io::Error;

    fn load(&mut self) -> Result<Option<String>, Self::Error> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text.trim_end().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&mut self, ringtone: &str) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, ringtone)?;
        log::info!("Saved ringtone to {}", self.path.display());
        Ok(())
    }
}

/// Monotonic millisecond clock starting at zero.
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn now(&self) -> Millis {
        Millis(self.start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileRingtoneStore::new(dir.path().join("ringtone.txt"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("ringtone.txt");
        let mut store = FileRingtoneStore::new(&path);

        store.save("beep:d=4:c").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "beep:d=4:c");
        assert_eq!(store.load().unwrap().as_deref(), Some("beep:d=4:c"));
    }

    #[test]
    fn test_pins_remember_last_level() {
        let mut pins = DesktopPins::default();
        let pin = Pin::new(4).unwrap();
        pins.configure_as_output(pin);
        pins.write_digital(pin, Level::High);
        pins.write_digital(pin, Level::Low);

        assert!(pins.is_output(pin));
        assert_eq!(pins.level(pin), Some(Level::Low));
        assert_eq!(pins.writes(), 2);
    }
}
