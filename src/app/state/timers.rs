use std::time::{Duration, Instant};

pub const FOLLOW_UP_DEBOUNCE: Duration = Duration::from_millis(120);
pub const FOLLOW_UP_GRACE: Duration = Duration::from_millis(2500);
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);
/// Retry interval when auto-save loses arbitration to a visible overlay.
pub const AUTOSAVE_RETRY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    FollowUpDebounce,
    FollowUpGrace,
    AutosaveFlush,
}

pub const ALL_TIMERS: [TimerKind; 3] = [
    TimerKind::FollowUpDebounce,
    TimerKind::FollowUpGrace,
    TimerKind::AutosaveFlush,
];

/// Tracked one-shot timer deadlines. Arming a slot that is already armed
/// supersedes it; nothing fires twice, and teardown clears everything so no
/// timer can act on a torn-down surface. The loop sleeps until
/// [`Self::next_deadline`] and reports expiry as actions; the reducer clears
/// the slot when it handles the expiry, which also makes stale expiry
/// messages harmless.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimerSlots {
    follow_up_debounce: Option<Instant>,
    follow_up_grace: Option<Instant>,
    autosave: Option<Instant>,
}

impl TimerSlots {
    pub fn arm(&mut self, kind: TimerKind, delay: Duration) {
        *self.slot_mut(kind) = Some(Instant::now() + delay);
    }

    pub fn clear(&mut self, kind: TimerKind) {
        *self.slot_mut(kind) = None;
    }

    pub fn clear_all(&mut self) {
        for kind in ALL_TIMERS {
            self.clear(kind);
        }
    }

    #[must_use]
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.slot(kind).is_some()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        ALL_TIMERS.iter().filter_map(|k| self.slot(*k)).min()
    }

    /// Kinds whose deadline has passed. Non-destructive: the reducer owns
    /// clearing, so an expiry the reducer declines stays visible here.
    #[must_use]
    pub fn expired(&self, now: Instant) -> Vec<TimerKind> {
        ALL_TIMERS
            .into_iter()
            .filter(|k| self.slot(*k).is_some_and(|d| d <= now))
            .collect()
    }

    fn slot(&self, kind: TimerKind) -> Option<Instant> {
        match kind {
            TimerKind::FollowUpDebounce => self.follow_up_debounce,
            TimerKind::FollowUpGrace => self.follow_up_grace,
            TimerKind::AutosaveFlush => self.autosave,
        }
    }

    fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<Instant> {
        match kind {
            TimerKind::FollowUpDebounce => &mut self.follow_up_debounce,
            TimerKind::FollowUpGrace => &mut self.follow_up_grace,
            TimerKind::AutosaveFlush => &mut self.autosave,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_supersedes_previous_deadline() {
        let mut t = TimerSlots::default();
        t.arm(TimerKind::FollowUpDebounce, Duration::from_millis(1));
        let first = t.next_deadline().unwrap();
        t.arm(TimerKind::FollowUpDebounce, Duration::from_secs(60));
        assert!(t.next_deadline().unwrap() > first);
    }

    #[test]
    fn next_deadline_is_earliest_armed() {
        let mut t = TimerSlots::default();
        assert_eq!(t.next_deadline(), None);
        t.arm(TimerKind::FollowUpGrace, Duration::from_secs(10));
        t.arm(TimerKind::AutosaveFlush, Duration::from_millis(5));
        assert_eq!(t.next_deadline(), t.slot(TimerKind::AutosaveFlush));
    }

    #[test]
    fn expired_reports_due_slots_without_clearing() {
        let mut t = TimerSlots::default();
        t.arm(TimerKind::AutosaveFlush, Duration::from_millis(0));
        t.arm(TimerKind::FollowUpGrace, Duration::from_secs(60));
        let now = Instant::now() + Duration::from_millis(1);
        assert_eq!(t.expired(now), vec![TimerKind::AutosaveFlush]);
        assert!(t.is_armed(TimerKind::AutosaveFlush));
    }

    #[test]
    fn clear_all_disarms_everything() {
        let mut t = TimerSlots::default();
        for kind in ALL_TIMERS {
            t.arm(kind, Duration::from_secs(1));
        }
        t.clear_all();
        assert_eq!(t.next_deadline(), None);
    }
}
