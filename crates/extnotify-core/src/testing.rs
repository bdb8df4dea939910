//! Recording fakes for the collaborator traits.

use std::cell::RefCell;
use std::rc::Rc;

use crate::accent::haptic::HapticDriver;
use crate::accent::rgb_fade::RgbLed;
use crate::gpio::{Level, Pin, PinIo};
use crate::melody::MelodyEngine;
use crate::ringtone::RingtoneStore;

#[derive(Clone, Default)]
pub struct RecordingPins {
    outputs: Rc<RefCell<Vec<Pin>>>,
    writes: Rc<RefCell<Vec<(Pin, Level)>>>,
}

impl RecordingPins {
    pub fn outputs(&self) -> Vec<Pin> {
        self.outputs.borrow().clone()
    }

    pub fn writes(&self) -> Vec<(Pin, Level)> {
        self.writes.borrow().clone()
    }

    pub fn clear(&self) {
        self.outputs.borrow_mut().clear();
        self.writes.borrow_mut().clear();
    }
}

impl PinIo for RecordingPins {
    fn configure_as_output(&mut self, pin: Pin) {
        self.outputs.borrow_mut().push(pin);
    }

    fn write_digital(&mut self, pin: Pin, level: Level) {
        self.writes.borrow_mut().push((pin, level));
    }
}

#[derive(Default)]
struct MelodyState {
    playing: bool,
    begins: Vec<(Option<Pin>, String)>,
    steps: usize,
    stops: usize,
}

/// Melody engine whose playback state is set by the test.
#[derive(Clone, Default)]
pub struct FakeMelody {
    state: Rc<RefCell<MelodyState>>,
}

impl FakeMelody {
    pub fn set_playing(&self, playing: bool) {
        self.state.borrow_mut().playing = playing;
    }

    pub fn begins(&self) -> Vec<(Option<Pin>, String)> {
        self.state.borrow().begins.clone()
    }

    pub fn steps(&self) -> usize {
        self.state.borrow().steps
    }

    pub fn stops(&self) -> usize {
        self.state.borrow().stops
    }
}

impl MelodyEngine for FakeMelody {
    fn begin(&mut self, pin: Option<Pin>, ringtone: &str) {
        let mut state = self.state.borrow_mut();
        state.begins.push((pin, ringtone.to_string()));
        state.playing = true;
    }

    fn step(&mut self) {
        self.state.borrow_mut().steps += 1;
    }

    fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    fn stop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.stops += 1;
        state.playing = false;
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub saved: Option<String>,
    pub saves: usize,
    pub fail: bool,
}

impl RingtoneStore for MemoryStore {
    type Error = &'static str;

    fn load(&mut self) -> Result<Option<String>, Self::Error> {
        if self.fail {
            return Err("flash unavailable");
        }
        Ok(self.saved.clone())
    }

    fn save(&mut self, ringtone: &str) -> Result<(), Self::Error> {
        if self.fail {
            return Err("flash unavailable");
        }
        self.saves += 1;
        self.saved = Some(ringtone.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingLed {
    colors: Rc<RefCell<Vec<(u8, u8, u8)>>>,
}

impl RecordingLed {
    pub fn colors(&self) -> Vec<(u8, u8, u8)> {
        self.colors.borrow().clone()
    }
}

impl RgbLed for RecordingLed {
    fn set_color(&mut self, red: u8, green: u8, blue: u8) {
        self.colors.borrow_mut().push((red, green, blue));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticCall {
    Waveform(u8, u8),
    Go,
    Stop,
}

#[derive(Clone, Default)]
pub struct RecordingHaptic {
    calls: Rc<RefCell<Vec<HapticCall>>>,
}

impl RecordingHaptic {
    pub fn calls(&self) -> Vec<HapticCall> {
        self.calls.borrow().clone()
    }
}

impl HapticDriver for RecordingHaptic {
    fn set_waveform(&mut self, slot: u8, effect: u8) {
        self.calls.borrow_mut().push(HapticCall::Waveform(slot, effect));
    }

    fn go(&mut self) {
        self.calls.borrow_mut().push(HapticCall::Go);
    }

    fn stop(&mut self) {
        self.calls.borrow_mut().push(HapticCall::Stop);
    }
}
