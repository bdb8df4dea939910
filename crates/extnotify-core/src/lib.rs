#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod accent;
pub mod admin;
pub mod config;
pub mod consts;
pub mod gpio;
pub mod journal;
pub mod melody;
pub mod notifier;
pub mod packet;
pub mod peripheral;
pub mod ringtone;
pub mod schedule;

#[cfg(test)]
mod testing;

pub use notifier::{Notifier, Phase};
