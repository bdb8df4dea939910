use crate::gpio::Pin;

/// Ringtone player driving a passive buzzer.
///
/// The notifier treats the ringtone as opaque text and only asks the engine
/// to start, advance, report and stop playback. `step` is called on every
/// tick while [`MelodyEngine::is_playing`] is true.
pub trait MelodyEngine {
    fn begin(&mut self, pin: Option<Pin>, ringtone: &str);
    fn step(&mut self);
    fn is_playing(&self) -> bool;
    fn stop(&mut self);
}

/// Engine for builds without a tone-capable buzzer. Never plays.
pub struct NoMelody;

impl MelodyEngine for NoMelody {
    fn begin(&mut self, _pin: Option<Pin>, _ringtone: &str) {}
    fn step(&mut self) {}
    fn is_playing(&self) -> bool {
        false
    }
    fn stop(&mut self) {}
}
