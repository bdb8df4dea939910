use extnotify_core::Notifier;
use extnotify_core::admin::{AdminRequest, AdminResponse, AdminResult};
use extnotify_core::packet::MeshPacket;
use extnotify_core::schedule::{Interval, TaskTimer};

use crate::board::{Clock, DesktopPins, FileRingtoneStore, SharedLed};
use crate::melody::DesktopMelody;
use crate::settings::Settings;

/// Ringtones offered by the "set ringtone" key, in rotation.
const RINGTONE_PRESETS: &[&str] = &[
    "beep:d=4,o=5,b=120:c6,p,c6",
    "scale:d=8,o=5,b=160:c,d,e,f,g,a,b,c6",
    extnotify_core::consts::DEFAULT_RINGTONE,
];

/// Longest the UI waits for input before redrawing.
const MAX_POLL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RemoteMessage,
    RemoteBell,
    LocalMessage,
    Stop,
    GetRingtone,
    NextRingtone,
}

pub struct App {
    pub notifier: Notifier<DesktopPins, DesktopMelody>,
    pub settings: Settings,
    pub led: SharedLed,
    pub clock: Clock,
    timer: TaskTimer,
    store: FileRingtoneStore,
    next_preset: usize,
}

impl App {
    pub fn new(
        notifier: Notifier<DesktopPins, DesktopMelody>,
        settings: Settings,
        led: SharedLed,
        store: FileRingtoneStore,
    ) -> Self {
        let mut app = Self {
            notifier,
            settings,
            led,
            clock: Clock::start(),
            timer: TaskTimer::new(),
            store,
            next_preset: 0,
        };
        let now = app.clock.now();
        let interval = app.notifier.begin(now);
        app.timer.set_interval_from_now(now, interval);
        app
    }

    pub fn apply(&mut self, action: Action) {
        let now = self.clock.now();
        let wake = match action {
            Action::RemoteMessage => self.receive(self.settings.remote_node, b"hello from the mesh"),
            Action::RemoteBell => self.receive(self.settings.remote_node, b"ding\x07"),
            Action::LocalMessage => self.receive(self.settings.local_node, b"echo of our own message"),
            Action::Stop => {
                log::info!("Stop requested");
                Some(self.notifier.stop_now(now))
            }
            Action::GetRingtone => {
                match self.notifier.handle_admin(AdminRequest::GetRingtone, true, &mut self.store) {
                    AdminResult::HandledWithResponse(AdminResponse::Ringtone(ringtone)) => {
                        log::info!("Ringtone: {}", ringtone)
                    }
                    other => log::warn!("Unexpected admin result: {:?}", other),
                }
                None
            }
            Action::NextRingtone => {
                let preset = RINGTONE_PRESETS[self.next_preset];
                self.next_preset = (self.next_preset + 1) % RINGTONE_PRESETS.len();
                self.notifier.handle_admin(AdminRequest::SetRingtone(preset), false, &mut self.store);
                None
            }
        };

        if let Some(interval) = wake {
            self.timer.set_interval_from_now(now, interval);
        }
    }

    fn receive(&mut self, from: u32, payload: &[u8]) -> Option<Interval> {
        let packet = MeshPacket::text(from, payload);
        if !self.notifier.wants_packet(&packet) {
            return None;
        }
        self.notifier.handle_received(self.clock.now(), &packet)
    }

    /// Runs the notifier tick if it is due.
    pub fn service(&mut self) {
        let now = self.clock.now();
        if self.timer.is_due(now) {
            let interval = self.notifier.tick(now);
            self.timer.set_interval_from_now(now, interval);
        }
    }

    /// How long the UI may block waiting for input.
    pub fn poll_timeout_ms(&self) -> u64 {
        self.timer
            .until_due(self.clock.now())
            .map_or(MAX_POLL_MS, |ms| ms.min(MAX_POLL_MS))
    }

    pub fn next_tick_in(&self) -> Option<u64> {
        self.timer.until_due(self.clock.now())
    }
}
