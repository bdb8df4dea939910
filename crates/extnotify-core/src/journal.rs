//! Journal - ring buffer of recent sequencer events
//!
//! Keeps the last few transitions the notifier made so a host can show
//! what happened during an episode without scraping the log output.

use heapless::Deque;

use crate::consts::JOURNAL_CAPACITY;
use crate::packet::Trigger;
use crate::peripheral::Peripheral;
use crate::schedule::Millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JournalEvent {
    Armed(Trigger, Peripheral),
    On(Peripheral),
    Off(Peripheral),
    MelodyStarted,
    EpisodeEnded,
    Stopped,
}

/// A single journal entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JournalEntry {
    pub at: Millis,
    pub event: JournalEvent,
}

/// Fixed-size journal, oldest entries are dropped first.
pub struct Journal {
    entries: Deque<JournalEntry, JOURNAL_CAPACITY>,
}

impl Journal {
    pub const fn new() -> Self {
        Self { entries: Deque::new() }
    }

    pub fn record(&mut self, at: Millis, event: JournalEvent) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        // Cannot fail, there is room now
        let _ = self.entries.push_back(JournalEntry { at, event });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    /// Most recent `count` entries, newest first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter().rev().take(count)
    }

    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.back()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_iterate() {
        let mut journal = Journal::new();
        journal.record(Millis(1), JournalEvent::On(Peripheral::Signal));
        journal.record(Millis(2), JournalEvent::Off(Peripheral::Signal));

        assert_eq!(journal.len(), 2);
        let events: Vec<_> = journal.iter().map(|e| e.event).collect();
        assert_eq!(
            events,
            vec![JournalEvent::On(Peripheral::Signal), JournalEvent::Off(Peripheral::Signal)]
        );
        assert_eq!(journal.last().map(|e| e.at), Some(Millis(2)));
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut journal = Journal::new();
        for i in 0..(JOURNAL_CAPACITY as u64 + 5) {
            journal.record(Millis(i), JournalEvent::MelodyStarted);
        }

        assert_eq!(journal.len(), JOURNAL_CAPACITY);
        assert_eq!(journal.iter().next().map(|e| e.at), Some(Millis(5)));
        assert_eq!(journal.recent(1).next().map(|e| e.at), Some(Millis(JOURNAL_CAPACITY as u64 + 4)));
    }
}
