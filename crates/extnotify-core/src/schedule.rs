//! Time and re-arm bookkeeping for the cooperative tick.
//!
//! The notifier never reads a clock itself. Hosts pass a monotonic
//! millisecond timestamp into every entry point and honour the [`Interval`]
//! it hands back, usually through a [`TaskTimer`].

use core::ops::Add;

/// Monotonic milliseconds since an arbitrary host epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Time elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<u64> for Millis {
    type Output = Millis;

    fn add(self, ms: u64) -> Millis {
        Millis(self.0.saturating_add(ms))
    }
}

/// When the task wants to run next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interval {
    After(u32),
    /// No automatic re-invocation; only an external event wakes the task.
    Never,
}

impl Interval {
    pub const NOW: Interval = Interval::After(0);

    /// Delay as a plain number for schedulers that use a max-value sentinel.
    pub fn as_millis(self) -> u32 {
        match self {
            Interval::After(ms) => ms,
            Interval::Never => i32::MAX as u32,
        }
    }
}

/// End of the current alert episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NagCutoff {
    /// Already elapsed, whatever the clock says.
    Expired,
    At(Millis),
    #[default]
    Unbounded,
}

impl NagCutoff {
    pub fn has_passed(self, now: Millis) -> bool {
        match self {
            NagCutoff::Expired => true,
            NagCutoff::At(at) => now > at,
            NagCutoff::Unbounded => false,
        }
    }

    pub fn remaining(self, now: Millis) -> Option<u64> {
        match self {
            NagCutoff::Expired => Some(0),
            NagCutoff::At(at) => Some(at.since(now)),
            NagCutoff::Unbounded => None,
        }
    }
}

/// Host-side re-arm state for a single cooperative task.
///
/// Each request overrides the previous one, like `setIntervalFromNow` on an
/// RTOS soft timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskTimer {
    due: Option<Millis>,
}

impl TaskTimer {
    pub const fn new() -> Self {
        Self { due: None }
    }

    pub fn set_interval_from_now(&mut self, now: Millis, interval: Interval) {
        self.due = match interval {
            Interval::After(ms) => Some(now + u64::from(ms)),
            Interval::Never => None,
        };
    }

    pub fn is_due(&self, now: Millis) -> bool {
        self.due.is_some_and(|due| now >= due)
    }

    /// Milliseconds until the task is due, `None` when disarmed.
    pub fn until_due(&self, now: Millis) -> Option<u64> {
        self.due.map(|due| due.since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_is_strictly_after() {
        let cutoff = NagCutoff::At(Millis(1000));
        assert!(!cutoff.has_passed(Millis(1000)));
        assert!(cutoff.has_passed(Millis(1001)));
        assert!(NagCutoff::Expired.has_passed(Millis::ZERO));
        assert!(!NagCutoff::Unbounded.has_passed(Millis(u64::MAX)));
    }

    #[test]
    fn test_timer_rearm() {
        let mut timer = TaskTimer::new();
        assert!(!timer.is_due(Millis(0)));
        assert_eq!(timer.until_due(Millis(0)), None);

        timer.set_interval_from_now(Millis(100), Interval::After(25));
        assert!(!timer.is_due(Millis(124)));
        assert!(timer.is_due(Millis(125)));
        assert_eq!(timer.until_due(Millis(110)), Some(15));

        timer.set_interval_from_now(Millis(120), Interval::NOW);
        assert!(timer.is_due(Millis(120)));

        timer.set_interval_from_now(Millis(130), Interval::Never);
        assert!(!timer.is_due(Millis(u64::MAX)));
    }

    #[test]
    fn test_never_sentinel() {
        assert_eq!(Interval::Never.as_millis(), i32::MAX as u32);
        assert_eq!(Interval::After(25).as_millis(), 25);
    }
}
