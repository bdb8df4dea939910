//! The notification sequencer.
//!
//! Two entry points share one piece of state: [`Notifier::handle_received`]
//! arms an alert episode when a foreign text message arrives, and
//! [`Notifier::tick`] runs the hold/repeat cycle until the episode's cutoff.
//! Both take `&mut self`; a preemptive host wraps the notifier in a mutex.
//!
//! ```text
//! Idle --arm--> Holding --cutoff, song playing--> Draining
//!   ^              |                                  |
//!   +----cutoff----+-----------song finished----------+
//! ```

use crate::accent::{Accent as _, Accents};
use crate::admin::{AdminRequest, AdminResponse, AdminResult};
use crate::config::{BoardPins, BuzzerMode, ModuleConfig, ResolvedPins};
use crate::consts::TICK_INTERVAL_MS;
use crate::gpio::{Level, PinIo};
use crate::journal::{Journal, JournalEvent};
use crate::melody::MelodyEngine;
use crate::packet::{MeshPacket, NodeNum, Trigger};
use crate::peripheral::{Peripheral, PeripheralBank, PeripheralState};
use crate::ringtone::{RingtoneConfig, RingtoneStore};
use crate::schedule::{Interval, Millis, NagCutoff};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Disabled or no episode running.
    Idle,
    /// Inside the nag window, outputs toggling.
    Holding,
    /// Past the cutoff, waiting for the ringtone to finish.
    Draining,
}

pub struct Notifier<P: PinIo, M: MelodyEngine> {
    config: ModuleConfig,
    board: BoardPins,
    pins: ResolvedPins,
    local_node: NodeNum,
    io: P,
    melody: M,
    accent: Accents,
    ringtone: RingtoneConfig,
    peripherals: PeripheralBank,
    nagging: bool,
    cutoff: NagCutoff,
    phase: Phase,
    journal: Journal,
}

impl<P: PinIo, M: MelodyEngine> Notifier<P, M> {
    pub fn new(config: ModuleConfig, board: BoardPins, local_node: NodeNum, io: P, melody: M) -> Self {
        let pins = ResolvedPins::resolve(&config, &board);
        Self {
            config,
            board,
            pins,
            local_node,
            io,
            melody,
            accent: Accents::default(),
            ringtone: RingtoneConfig::default(),
            peripherals: PeripheralBank::new(),
            nagging: false,
            cutoff: NagCutoff::Unbounded,
            phase: Phase::Idle,
            journal: Journal::new(),
        }
    }

    pub fn with_accent(mut self, accent: Accents) -> Self {
        self.accent = accent;
        self
    }

    pub fn with_ringtone(mut self, ringtone: RingtoneConfig) -> Self {
        self.ringtone = ringtone;
        self
    }

    /// Configures the output pins and parks every output in its off state.
    pub fn begin(&mut self, now: Millis) -> Interval {
        if !self.config.enabled {
            log::info!("External notification module disabled");
            return Interval::Never;
        }

        log::info!("Initializing external notification module");

        if let Some(pin) = self.pins.signal {
            log::debug!("Using {} in digital mode", pin);
            self.io.configure_as_output(pin);
        }
        self.turn_off(Peripheral::Signal, now);

        if let Some(pin) = self.pins.buzzer {
            match self.config.buzzer_mode() {
                BuzzerMode::Switched => {
                    log::debug!("Using {} for buzzer", pin);
                    self.io.configure_as_output(pin);
                    self.turn_off(Peripheral::Buzzer, now);
                }
                BuzzerMode::Tone => match self.pins.tone {
                    Some(tone) => log::debug!("Using {} in PWM mode", tone),
                    None => log::warn!("PWM buzzer enabled but no tone pin configured"),
                },
            }
        }

        if let Some(pin) = self.pins.vibra {
            log::debug!("Using {} for vibra motor", pin);
            self.io.configure_as_output(pin);
            self.turn_off(Peripheral::Vibration, now);
        }

        Interval::NOW
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ModuleConfig) {
        let pins = ResolvedPins::resolve(&config, &self.board);
        // Nothing writes the old switched buzzer line once it is handed to the
        // melody engine or moved, so park it now.
        let buzzer_released = config.buzzer_mode() == BuzzerMode::Tone || pins.buzzer != self.pins.buzzer;
        if self.config.buzzer_mode() == BuzzerMode::Switched && buzzer_released && self.is_active(Peripheral::Buzzer) {
            if let Some(pin) = self.pins.buzzer {
                log::debug!("Parking {} before buzzer reconfiguration", pin);
                self.io.write_digital(pin, Level::Low);
            }
        }
        self.pins = pins;
        self.config = config;
    }

    pub fn pins(&self) -> &ResolvedPins {
        &self.pins
    }

    /// Only text messages can raise an alert.
    pub fn wants_packet(&self, packet: &MeshPacket<'_>) -> bool {
        packet.is_text_payload()
    }

    /// Arms an alert episode for a foreign text message.
    ///
    /// Returns the re-run request for the tick task, `None` when the packet
    /// was ignored.
    pub fn handle_received(&mut self, now: Millis, packet: &MeshPacket<'_>) -> Option<Interval> {
        if !self.config.enabled {
            log::info!("External notification module disabled");
            return None;
        }
        if packet.from == self.local_node {
            return None;
        }

        self.accent.alert_received();

        for trigger in Trigger::for_packet(packet) {
            let flags = self.config.flags_for(trigger);
            for peripheral in Peripheral::ALL {
                if flags.selects(peripheral) {
                    self.arm(trigger, peripheral, now);
                }
            }
        }

        Some(Interval::NOW)
    }

    fn arm(&mut self, trigger: Trigger, peripheral: Peripheral, now: Millis) {
        log::info!("Alert on {:?} for {}", trigger, peripheral.name());
        self.nagging = true;
        self.journal.record(now, JournalEvent::Armed(trigger, peripheral));

        if peripheral == Peripheral::Buzzer && self.config.buzzer_mode() == BuzzerMode::Tone {
            self.start_melody(now);
        } else {
            self.turn_on(peripheral, now);
        }

        // Shared by every output; the last trigger to fire wins.
        self.cutoff = NagCutoff::At(now + self.config.nag_window_ms());
    }

    /// Runs one step of the hold/repeat cycle and says when to run again.
    pub fn tick(&mut self, now: Millis) -> Interval {
        if !self.config.enabled {
            self.phase = Phase::Idle;
            return Interval::Never;
        }

        let playing = self.melody.is_playing();
        let past_cutoff = self.cutoff.has_passed(now);

        // Let the song finish: the episode only closes once playback stops.
        if past_cutoff && !playing {
            log::info!("Turning off external notification");
            for peripheral in Peripheral::ALL {
                self.turn_off(peripheral, now);
            }
            self.cutoff = NagCutoff::Unbounded;
            self.nagging = false;
            self.phase = Phase::Idle;
            self.journal.record(now, JournalEvent::EpisodeEnded);
            return Interval::Never;
        }

        if !self.nagging && !playing {
            for peripheral in Peripheral::ALL {
                if self.is_active(peripheral) {
                    self.turn_off(peripheral, now);
                }
            }
            self.phase = Phase::Idle;
            return Interval::Never;
        }

        if past_cutoff {
            self.phase = Phase::Draining;
            for peripheral in [Peripheral::Signal, Peripheral::Vibration] {
                if self.is_active(peripheral) {
                    self.turn_off(peripheral, now);
                }
            }
        } else if self.nagging {
            self.phase = Phase::Holding;
            let hold = u64::from(self.config.hold_ms());
            for peripheral in Peripheral::ALL {
                let state = self.peripherals.get(peripheral);
                // Inclusive so a tick landing exactly on the hold boundary flips
                // there, giving one toggle per window on the 25ms grid.
                if now.since(state.last_changed) >= hold {
                    if state.active {
                        self.turn_off(peripheral, now);
                    } else {
                        self.turn_on(peripheral, now);
                    }
                }
            }
            self.accent.nag_tick();
        }

        if self.config.buzzer_mode() == BuzzerMode::Tone {
            if playing {
                self.melody.step();
            } else if self.nagging && !past_cutoff {
                self.start_melody(now);
            }
        }

        Interval::After(TICK_INTERVAL_MS)
    }

    /// Cancels the episode. The next tick turns everything off.
    pub fn stop_now(&mut self, now: Millis) -> Interval {
        self.melody.stop();
        self.nagging = false;
        self.cutoff = NagCutoff::Expired;
        self.accent.stop();
        self.journal.record(now, JournalEvent::Stopped);
        Interval::NOW
    }

    pub fn turn_on(&mut self, peripheral: Peripheral, now: Millis) {
        self.set_peripheral(peripheral, true, now);
        self.accent.peripheral_on();
    }

    pub fn turn_off(&mut self, peripheral: Peripheral, now: Millis) {
        self.set_peripheral(peripheral, false, now);
        self.accent.peripheral_off();
    }

    pub fn is_active(&self, peripheral: Peripheral) -> bool {
        self.peripherals.is_active(peripheral)
    }

    pub fn peripheral(&self, peripheral: Peripheral) -> PeripheralState {
        self.peripherals.get(peripheral)
    }

    fn set_peripheral(&mut self, peripheral: Peripheral, on: bool, now: Millis) {
        // Bookkeeping first, whether or not a pin is wired up.
        self.peripherals.set(peripheral, on, now);
        self.journal.record(
            now,
            if on { JournalEvent::On(peripheral) } else { JournalEvent::Off(peripheral) },
        );
        log::debug!("{} {}", peripheral.name(), if on { "on" } else { "off" });

        let target = match peripheral {
            Peripheral::Signal => self.pins.signal.map(|pin| (pin, self.config.active.level(on))),
            // In tone mode the melody engine owns the buzzer pin.
            Peripheral::Buzzer => match self.config.buzzer_mode() {
                BuzzerMode::Switched => self.pins.buzzer.map(|pin| (pin, Level::from(on))),
                BuzzerMode::Tone => None,
            },
            Peripheral::Vibration => self.pins.vibra.map(|pin| (pin, Level::from(on))),
        };
        if let Some((pin, level)) = target {
            self.io.write_digital(pin, level);
        }
    }

    fn start_melody(&mut self, now: Millis) {
        self.melody.begin(self.pins.tone, self.ringtone.as_str());
        self.journal.record(now, JournalEvent::MelodyStarted);
    }

    pub fn handle_admin<S: RingtoneStore>(
        &mut self,
        request: AdminRequest<'_>,
        want_response: bool,
        store: &mut S,
    ) -> AdminResult {
        match request {
            AdminRequest::GetRingtone => {
                log::info!("Client is getting ringtone");
                if want_response {
                    AdminResult::HandledWithResponse(AdminResponse::Ringtone(self.ringtone.ringtone().clone()))
                } else {
                    AdminResult::Handled
                }
            }
            AdminRequest::SetRingtone(text) => {
                log::info!("Client is setting ringtone");
                if !text.is_empty() && self.ringtone.replace(text) {
                    if let Err(e) = store.save(self.ringtone.as_str()) {
                        log::warn!("Failed to save ringtone: {:?}", e);
                    }
                }
                AdminResult::Handled
            }
            AdminRequest::Other => AdminResult::NotHandled,
        }
    }

    pub fn ringtone(&self) -> &RingtoneConfig {
        &self.ringtone
    }

    pub fn is_nagging(&self) -> bool {
        self.nagging
    }

    pub fn cutoff(&self) -> NagCutoff {
        self.cutoff
    }

    /// Phase as of the last tick.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn io(&self) -> &P {
        &self.io
    }

    pub fn melody(&self) -> &M {
        &self.melody
    }
}
