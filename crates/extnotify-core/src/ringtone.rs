//! Ringtone text and its persistence seam.

use alloc::string::String;
use core::fmt::Debug;

use crate::consts::{DEFAULT_RINGTONE, RINGTONE_MAX_LEN};

pub type Ringtone = heapless::String<RINGTONE_MAX_LEN>;

/// Persistent storage for the ringtone, e.g. a file on the device flash.
pub trait RingtoneStore {
    type Error: Debug;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&mut self) -> Result<Option<String>, Self::Error>;
    fn save(&mut self, ringtone: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingtoneConfig {
    ringtone: Ringtone,
}

impl RingtoneConfig {
    /// Builds a config from `text`, truncated to capacity on a char boundary.
    pub fn new(text: &str) -> Self {
        Self { ringtone: bounded(text) }
    }

    /// Loads the stored ringtone, falling back to the default one.
    pub fn load<S: RingtoneStore>(store: &mut S) -> Self {
        match store.load() {
            Ok(Some(text)) if !text.is_empty() => Self::new(&text),
            Ok(_) => Self::default(),
            Err(e) => {
                log::warn!("Failed to load ringtone, using default: {:?}", e);
                Self::default()
            }
        }
    }

    pub fn as_str(&self) -> &str {
        self.ringtone.as_str()
    }

    pub fn ringtone(&self) -> &Ringtone {
        &self.ringtone
    }

    /// Replaces the ringtone. Returns whether the stored text changed.
    pub fn replace(&mut self, text: &str) -> bool {
        let next = bounded(text);
        if next == self.ringtone {
            return false;
        }
        self.ringtone = next;
        true
    }
}

impl Default for RingtoneConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RINGTONE)
    }
}

fn bounded(text: &str) -> Ringtone {
    let mut out = Ringtone::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[test]
    fn test_truncates_to_capacity() {
        let long = "x".repeat(RINGTONE_MAX_LEN + 20);
        let config = RingtoneConfig::new(&long);
        assert_eq!(config.as_str().len(), RINGTONE_MAX_LEN);
    }

    #[test]
    fn test_truncation_keeps_char_boundary() {
        let mut text = "a".repeat(RINGTONE_MAX_LEN - 1);
        text.push('é');
        let config = RingtoneConfig::new(&text);
        assert_eq!(config.as_str().len(), RINGTONE_MAX_LEN - 1);
    }

    #[test]
    fn test_load_falls_back_to_default() {
        let mut empty = MemoryStore::default();
        assert_eq!(RingtoneConfig::load(&mut empty).as_str(), DEFAULT_RINGTONE);

        let mut broken = MemoryStore { fail: true, ..Default::default() };
        assert_eq!(RingtoneConfig::load(&mut broken).as_str(), DEFAULT_RINGTONE);

        let mut stored = MemoryStore { saved: Some("beep:d=4:c".into()), ..Default::default() };
        assert_eq!(RingtoneConfig::load(&mut stored).as_str(), "beep:d=4:c");
    }

    #[test]
    fn test_replace_reports_change() {
        let mut config = RingtoneConfig::new("a");
        assert!(!config.replace("a"));
        assert!(config.replace("b"));
        assert_eq!(config.as_str(), "b");
    }
}
