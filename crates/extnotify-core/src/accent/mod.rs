//! Cosmetic extras that follow the notification outputs around.
//!
//! Boards with an RGB LED or a haptic driver pick one accent at construction;
//! everything else runs [`Silent`].

use enum_dispatch::enum_dispatch;

use crate::accent::{haptic::HapticPulse, rgb_fade::RgbFade};

pub mod haptic;
pub mod rgb_fade;

#[enum_dispatch]
pub trait Accent {
    /// A foreign packet was accepted for alerting.
    fn alert_received(&mut self);
    fn peripheral_on(&mut self);
    fn peripheral_off(&mut self);
    /// Called once per tick while the episode is holding.
    fn nag_tick(&mut self);
    fn stop(&mut self);
}

#[enum_dispatch(Accent)]
pub enum Accents {
    Silent,
    RgbFade,
    HapticPulse,
}

impl Default for Accents {
    fn default() -> Self {
        Accents::from(Silent)
    }
}

pub struct Silent;

impl Accent for Silent {
    fn alert_received(&mut self) {}
    fn peripheral_on(&mut self) {}
    fn peripheral_off(&mut self) {}
    fn nag_tick(&mut self) {}
    fn stop(&mut self) {}
}
