use alloc::boxed::Box;

use crate::accent::Accent;

/// Effect ids loaded into the driver's waveform slots on every alert.
/// The trailing zero terminates the sequence.
const ALERT_WAVEFORMS: [u8; 3] = [75, 56, 0];

pub trait HapticDriver {
    fn set_waveform(&mut self, slot: u8, effect: u8);
    fn go(&mut self);
    fn stop(&mut self);
}

pub struct HapticPulse {
    driver: Box<dyn HapticDriver>,
}

impl HapticPulse {
    pub fn new(driver: Box<dyn HapticDriver>) -> Self {
        Self { driver }
    }
}

impl Accent for HapticPulse {
    fn alert_received(&mut self) {
        for (slot, effect) in ALERT_WAVEFORMS.iter().enumerate() {
            self.driver.set_waveform(slot as u8, *effect);
        }
        self.driver.go();
    }

    fn peripheral_on(&mut self) {
        self.driver.go();
    }

    fn peripheral_off(&mut self) {
        self.driver.stop();
    }

    fn nag_tick(&mut self) {
        self.driver.go();
    }

    fn stop(&mut self) {
        self.driver.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HapticCall, RecordingHaptic};

    #[test]
    fn test_alert_loads_waveforms_then_fires() {
        let haptic = RecordingHaptic::default();
        let mut accent = HapticPulse::new(Box::new(haptic.clone()));

        accent.alert_received();
        accent.stop();

        assert_eq!(
            haptic.calls(),
            vec![
                HapticCall::Waveform(0, 75),
                HapticCall::Waveform(1, 56),
                HapticCall::Waveform(2, 0),
                HapticCall::Go,
                HapticCall::Stop,
            ]
        );
    }
}
