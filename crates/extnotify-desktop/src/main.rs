use std::path::PathBuf;

use anyhow::Context as _;
use extnotify_core::Notifier;
use extnotify_core::accent::Accents;
use extnotify_core::accent::rgb_fade::RgbFade;
use extnotify_core::ringtone::RingtoneConfig;
use log::LevelFilter;

use crate::app::App;
use crate::board::{DesktopPins, FileRingtoneStore, SharedLed};
use crate::melody::DesktopMelody;
use crate::settings::Settings;

mod app;
mod board;
mod log_capture;
mod melody;
mod settings;
mod tui;

fn main() -> anyhow::Result<()> {
    log_capture::init(LevelFilter::Debug);

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path)?,
        None => {
            log::info!("No settings file given, using demo configuration");
            Settings::default()
        }
    };

    let mut store = FileRingtoneStore::new(settings.ringtone_path.clone());
    let ringtone = RingtoneConfig::load(&mut store);

    let led = SharedLed::default();
    let accent = if settings.rgb_led {
        Accents::from(RgbFade::new(Box::new(led.clone())))
    } else {
        Accents::default()
    };

    let notifier = Notifier::new(
        settings.module.clone(),
        settings.board.pins(),
        settings.local_node,
        DesktopPins::default(),
        DesktopMelody::new(),
    )
    .with_accent(accent)
    .with_ringtone(ringtone);

    let mut app = App::new(notifier, settings, led, store);
    tui::run(&mut app).context("Terminal UI failed")?;

    Ok(())
}
