use alloc::boxed::Box;

use crate::accent::Accent;

/// Brightness ramp for one fade. Blue is scaled by 1.5 on top of this.
const BRIGHTNESS: [u8; 8] = [0, 10, 20, 30, 50, 90, 160, 170];

pub trait RgbLed {
    fn set_color(&mut self, red: u8, green: u8, blue: u8);
}

/// Fades an RGB LED in and out, moving to the next colour each time the
/// brightness returns to zero.
pub struct RgbFade {
    led: Box<dyn RgbLed>,
    /// Bit 2 red, bit 1 green, bit 0 blue. Cycles through 1..=7.
    color_state: u8,
    brightness_index: usize,
    ascending: bool,
    color: (u8, u8, u8),
}

impl RgbFade {
    pub fn new(led: Box<dyn RgbLed>) -> Self {
        Self {
            led,
            color_state: 1,
            brightness_index: 0,
            ascending: true,
            color: (0, 0, 0),
        }
    }

    pub fn color(&self) -> (u8, u8, u8) {
        self.color
    }

    fn current_color(&self) -> (u8, u8, u8) {
        let level = BRIGHTNESS[self.brightness_index];
        let channel = |bit: u8, value: u8| if self.color_state & bit != 0 { value } else { 0 };
        (
            channel(4, level),
            channel(2, level),
            channel(1, (u16::from(level) * 3 / 2) as u8),
        )
    }

    fn advance(&mut self) {
        if self.ascending {
            self.brightness_index += 1;
            if self.brightness_index == BRIGHTNESS.len() - 1 {
                self.ascending = false;
            }
        } else {
            self.brightness_index -= 1;
        }

        if self.brightness_index == 0 {
            self.ascending = true;
            self.color_state = if self.color_state >= 7 { 1 } else { self.color_state + 1 };
        }
    }
}

impl Accent for RgbFade {
    fn alert_received(&mut self) {}

    fn peripheral_on(&mut self) {
        let (r, g, b) = self.color;
        self.led.set_color(r, g, b);
    }

    fn peripheral_off(&mut self) {
        self.color = (0, 0, 0);
        self.led.set_color(0, 0, 0);
    }

    fn nag_tick(&mut self) {
        self.color = self.current_color();
        let (r, g, b) = self.color;
        self.led.set_color(r, g, b);
        self.advance();
    }

    fn stop(&mut self) {
        self.peripheral_off();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingLed;

    #[test]
    fn test_fade_climbs_then_switches_colour() {
        let led = RecordingLed::default();
        let mut fade = RgbFade::new(Box::new(led.clone()));

        // One full fade: up 7 steps, down 7 steps.
        for _ in 0..14 {
            fade.nag_tick();
        }
        let colors = led.colors();
        assert_eq!(colors[0], (0, 0, 0));
        // Blue only while color_state == 1, scaled by 1.5
        assert_eq!(colors[7], (0, 0, 255));
        assert_eq!(colors[13], (0, 0, 15));

        // Fade returned to zero, so the next colour is green (state 2)
        fade.nag_tick();
        fade.nag_tick();
        assert_eq!(led.colors().last().copied(), Some((0, 10, 0)));
    }

    #[test]
    fn test_colour_state_wraps() {
        let led = RecordingLed::default();
        let mut fade = RgbFade::new(Box::new(led.clone()));

        // Seven colours, fourteen ticks each, brings us back to blue.
        for _ in 0..(14 * 7 + 2) {
            fade.nag_tick();
        }
        assert_eq!(led.colors().last().copied(), Some((0, 0, 15)));
    }

    #[test]
    fn test_off_blanks_led() {
        let led = RecordingLed::default();
        let mut fade = RgbFade::new(Box::new(led.clone()));
        fade.nag_tick();
        fade.nag_tick();
        fade.peripheral_off();
        assert_eq!(led.colors().last().copied(), Some((0, 0, 0)));
        assert_eq!(fade.color(), (0, 0, 0));
    }
}
