use crate::schedule::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    Signal = 0,
    Buzzer,
    Vibration,
}

impl Peripheral {
    pub const ALL: [Peripheral; 3] = [Peripheral::Signal, Peripheral::Buzzer, Peripheral::Vibration];

    pub fn name(self) -> &'static str {
        match self {
            Peripheral::Signal => "signal",
            Peripheral::Buzzer => "buzzer",
            Peripheral::Vibration => "vibra",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeripheralState {
    pub active: bool,
    pub last_changed: Millis,
}

/// On/off bookkeeping for every output, independent of whether a pin exists.
#[derive(Debug)]
pub struct PeripheralBank {
    states: [PeripheralState; 3],
}

impl PeripheralBank {
    pub fn new() -> Self {
        Self {
            states: [PeripheralState::default(); 3],
        }
    }

    pub fn set(&mut self, peripheral: Peripheral, active: bool, now: Millis) {
        self.states[peripheral as usize] = PeripheralState { active, last_changed: now };
    }

    pub fn get(&self, peripheral: Peripheral) -> PeripheralState {
        self.states[peripheral as usize]
    }

    pub fn is_active(&self, peripheral: Peripheral) -> bool {
        self.states[peripheral as usize].active
    }
}

impl Default for PeripheralBank {
    fn default() -> Self {
        Self::new()
    }
}
