/// Hold duration used when `output_ms` is left at zero.
pub const DEFAULT_OUTPUT_MS: u32 = 1000;

/// Re-arm delay while an episode is running. Short enough to keep the
/// melody engine fed between notes.
pub const TICK_INTERVAL_MS: u32 = 25;

/// Control character that marks a message as a "bell".
pub const ASCII_BELL: u8 = 0x07;

/// Capacity of the stored ringtone, in bytes.
pub const RINGTONE_MAX_LEN: usize = 230;

pub const DEFAULT_RINGTONE: &str =
    "a:d=8,o=5,b=125:4d#6,a#,2d#6,16p,g#,4a#,4d#.,p,16g,16a#,d#6,a#,f6,2d#6,16p,c#.6,16c6,16a#,g#.,2a#";

/// Number of sequencer events kept in the journal.
pub const JOURNAL_CAPACITY: usize = 32;
