//! Log capture module - keeps recent log lines for the TUI log pane.
//!
//! While the TUI owns the terminal, records only go to the in-memory
//! history. Before and after that they are echoed to stderr as well.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Number of log lines kept for display.
const HISTORY_CAPACITY: usize = 200;

#[derive(Clone, Debug)]
pub struct LogLine {
    pub level: Level,
    pub target: String,
    pub message: String,
}

static HISTORY: Mutex<VecDeque<LogLine>> = Mutex::new(VecDeque::new());

/// Echo to stderr, cleared while the alternate screen is active.
static ECHO: AtomicBool = AtomicBool::new(true);

pub struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = LogLine {
            level: record.level(),
            target: record.target().to_string(),
            message: format!("{}", record.args()),
        };

        if ECHO.load(Ordering::Relaxed) {
            eprintln!("[{}] {}: {}", line.level, line.target, line.message);
        }

        if let Ok(mut history) = HISTORY.lock() {
            if history.len() == HISTORY_CAPACITY {
                history.pop_front();
            }
            history.push_back(line);
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

pub fn init(max_level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level);
    }
}

pub fn set_echo(enabled: bool) {
    ECHO.store(enabled, Ordering::Relaxed);
}

/// Most recent `count` lines, oldest first.
pub fn recent(count: usize) -> Vec<LogLine> {
    HISTORY
        .lock()
        .map(|history| {
            let skip = history.len().saturating_sub(count);
            history.iter().skip(skip).cloned().collect()
        })
        .unwrap_or_default()
}
