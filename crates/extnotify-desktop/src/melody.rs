//! Tone buzzer stand-in that plays through the sound card.
//!
//! Ringtone decoding is not done here: every ringtone plays the same short
//! chime, paced by `step()` the way a real engine is fed from the tick.

use std::time::{Duration, Instant};

use extnotify_core::gpio::Pin;
use extnotify_core::melody::MelodyEngine;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

/// (frequency Hz, duration ms); zero frequency is a rest.
const CHIME: &[(u32, u32)] = &[(988, 120), (1319, 120), (0, 60), (988, 120), (1319, 240), (0, 400)];

const SAMPLE_RATE: u32 = 48000;

// Square wave generator
struct SquareWave {
    frequency: f32,
    num_samples: usize,
    current_sample: usize,
}

impl SquareWave {
    fn new(frequency: f32, duration: Duration) -> Self {
        Self {
            frequency,
            num_samples: (duration.as_secs_f32() * SAMPLE_RATE as f32) as usize,
            current_sample: 0,
        }
    }
}

impl Iterator for SquareWave {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_sample >= self.num_samples {
            return None;
        }

        let sample_position = self.current_sample as f32 / SAMPLE_RATE as f32;
        let cycle_position = (sample_position * self.frequency) % 1.0;
        self.current_sample += 1;

        if cycle_position < 0.5 { Some(0.15) } else { Some(-0.15) }
    }
}

impl Source for SquareWave {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.num_samples - self.current_sample)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(self.num_samples as f32 / SAMPLE_RATE as f32))
    }
}

struct Playback {
    index: usize,
    note_started: Instant,
}

pub struct DesktopMelody {
    // Keeps the output device open; dropping it silences everything.
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    sink: Option<Sink>,
    playback: Option<Playback>,
}

impl DesktopMelody {
    pub fn new() -> Self {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Self {
                _stream: Some(stream),
                handle: Some(handle),
                sink: None,
                playback: None,
            },
            Err(e) => {
                log::warn!("No audio output, tone buzzer will be silent: {}", e);
                Self { _stream: None, handle: None, sink: None, playback: None }
            }
        }
    }

    /// Index of the chime note being played, for display.
    pub fn note(&self) -> Option<usize> {
        self.playback.as_ref().map(|p| p.index)
    }

    fn play_note(&mut self, index: usize) {
        let (frequency_hz, duration_ms) = CHIME[index];
        if frequency_hz == 0 {
            return;
        }
        if let Some(sink) = &self.sink {
            sink.append(SquareWave::new(frequency_hz as f32, Duration::from_millis(u64::from(duration_ms))));
        }
    }
}

impl MelodyEngine for DesktopMelody {
    fn begin(&mut self, pin: Option<Pin>, ringtone: &str) {
        let name = ringtone.split(':').next().unwrap_or_default();
        match pin {
            Some(pin) => log::debug!("Playing ringtone '{}' on {}", name, pin),
            None => log::debug!("Playing ringtone '{}'", name),
        }

        // A fresh sink drops whatever was still queued.
        self.sink = self.handle.as_ref().and_then(|handle| match Sink::try_new(handle) {
            Ok(sink) => Some(sink),
            Err(e) => {
                log::warn!("Failed to open audio sink: {}", e);
                None
            }
        });
        self.playback = Some(Playback { index: 0, note_started: Instant::now() });
        self.play_note(0);
    }

    fn step(&mut self) {
        let Some(playback) = &mut self.playback else {
            return;
        };
        let (_, duration_ms) = CHIME[playback.index];
        if playback.note_started.elapsed() < Duration::from_millis(u64::from(duration_ms)) {
            return;
        }

        playback.index += 1;
        playback.note_started = Instant::now();
        let index = playback.index;
        if index >= CHIME.len() {
            self.playback = None;
            return;
        }
        self.play_note(index);
    }

    fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    fn stop(&mut self) {
        self.playback = None;
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
