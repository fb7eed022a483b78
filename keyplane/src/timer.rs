// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable timers with generation tokens.
//!
//! Each [`TimerKind`] has one slot. Scheduling or cancelling bumps the slot's
//! generation, so a token handed out earlier stops being live and a late
//! firing becomes a no-op.

/// The controller's timers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Wait between the first delete and auto-repeat.
    BackspaceDelay,
    /// Auto-repeat of backspace.
    BackspaceRepeat,
    /// Delayed popup hide after a key is released.
    PopupHide,
    /// Periodic appearance poll.
    TraitPoll,
}

impl TimerKind {
    const ALL: [Self; 4] = [
        Self::BackspaceDelay,
        Self::BackspaceRepeat,
        Self::PopupHide,
        Self::TraitPoll,
    ];

    const fn slot(self) -> usize {
        match self {
            Self::BackspaceDelay => 0,
            Self::BackspaceRepeat => 1,
            Self::PopupHide => 2,
            Self::TraitPoll => 3,
        }
    }
}

/// Identifies one scheduling of a timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken {
    /// Which timer.
    pub kind: TimerKind,
    generation: u64,
}

#[derive(Copy, Clone, Debug, Default)]
struct Slot {
    generation: u64,
    due: Option<u64>,
    period: Option<u64>,
}

/// One slot per [`TimerKind`], in milliseconds of host time.
///
/// ```
/// use keyplane::{TimerKind, Timers};
///
/// let mut timers = Timers::default();
/// let stale = timers.schedule(TimerKind::PopupHide, 100, 50);
/// let fresh = timers.schedule(TimerKind::PopupHide, 120, 50);
/// assert!(!timers.is_live(stale));
/// assert_eq!(timers.next_due(), Some((170, TimerKind::PopupHide)));
/// assert_eq!(timers.consume(fresh), Some(170));
/// assert_eq!(timers.next_due(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Timers {
    slots: [Slot; 4],
}

impl Timers {
    /// Arms `kind` once at `now + delay`, replacing any earlier schedule.
    pub fn schedule(&mut self, kind: TimerKind, now: u64, delay: u64) -> TimerToken {
        self.arm(kind, now.saturating_add(delay), None)
    }

    /// Arms `kind` at `now + delay`, then every `period` after each firing.
    ///
    /// A zero period is treated as one millisecond.
    pub fn schedule_repeating(
        &mut self,
        kind: TimerKind,
        now: u64,
        delay: u64,
        period: u64,
    ) -> TimerToken {
        self.arm(kind, now.saturating_add(delay), Some(period.max(1)))
    }

    /// Disarms `kind`. Outstanding tokens become stale.
    pub fn cancel(&mut self, kind: TimerKind) {
        let slot = &mut self.slots[kind.slot()];
        if slot.due.is_some() {
            slot.generation = slot.generation.wrapping_add(1);
        }
        slot.due = None;
        slot.period = None;
    }

    /// Returns `true` if `token` refers to the current, armed schedule.
    pub fn is_live(&self, token: TimerToken) -> bool {
        let slot = &self.slots[token.kind.slot()];
        slot.generation == token.generation && slot.due.is_some()
    }

    /// Whether `kind` is armed.
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.slots[kind.slot()].due.is_some()
    }

    /// Token of the armed schedule of `kind`.
    pub fn token(&self, kind: TimerKind) -> Option<TimerToken> {
        let slot = &self.slots[kind.slot()];
        slot.due.map(|_| TimerToken {
            kind,
            generation: slot.generation,
        })
    }

    /// Due time of `kind`.
    pub fn due(&self, kind: TimerKind) -> Option<u64> {
        self.slots[kind.slot()].due
    }

    /// Earliest armed timer. Ties go to the kind declared first.
    pub fn next_due(&self) -> Option<(u64, TimerKind)> {
        TimerKind::ALL
            .iter()
            .filter_map(|&kind| self.due(kind).map(|due| (due, kind)))
            .min_by_key(|&(due, kind)| (due, kind.slot()))
    }

    /// Marks `token` as fired and returns its due time.
    ///
    /// One-shot timers disarm; repeating timers re-arm one period after the
    /// time they were due, keeping their token. Stale tokens return `None`.
    pub fn consume(&mut self, token: TimerToken) -> Option<u64> {
        if !self.is_live(token) {
            return None;
        }
        let slot = &mut self.slots[token.kind.slot()];
        let due = slot.due?;
        match slot.period {
            Some(period) => slot.due = Some(due.saturating_add(period)),
            None => {
                slot.due = None;
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        Some(due)
    }

    fn arm(&mut self, kind: TimerKind, due: u64, period: Option<u64>) -> TimerToken {
        let slot = &mut self.slots[kind.slot()];
        slot.generation = slot.generation.wrapping_add(1);
        slot.due = Some(due);
        slot.period = period;
        TimerToken {
            kind,
            generation: slot.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_token_is_stale() {
        let mut timers = Timers::default();
        let token = timers.schedule(TimerKind::BackspaceDelay, 0, 500);
        timers.cancel(TimerKind::BackspaceDelay);
        assert!(!timers.is_live(token));
        assert_eq!(timers.consume(token), None);
        // Rescheduling does not revive the old token.
        timers.schedule(TimerKind::BackspaceDelay, 0, 500);
        assert!(!timers.is_live(token));
    }

    #[test]
    fn repeating_timer_rearms_from_its_due_time() {
        let mut timers = Timers::default();
        let token = timers.schedule_repeating(TimerKind::BackspaceRepeat, 500, 70, 70);
        assert_eq!(timers.consume(token), Some(570));
        assert_eq!(timers.consume(token), Some(640));
        assert_eq!(timers.due(TimerKind::BackspaceRepeat), Some(710));
        assert!(timers.is_live(token));
    }

    #[test]
    fn one_shot_disarms_after_firing() {
        let mut timers = Timers::default();
        let token = timers.schedule(TimerKind::PopupHide, 10, 50);
        assert_eq!(timers.consume(token), Some(60));
        assert!(!timers.is_armed(TimerKind::PopupHide));
        assert_eq!(timers.consume(token), None);
    }

    #[test]
    fn next_due_orders_by_time_then_kind() {
        let mut timers = Timers::default();
        timers.schedule(TimerKind::TraitPoll, 0, 100);
        timers.schedule(TimerKind::PopupHide, 0, 100);
        timers.schedule(TimerKind::BackspaceRepeat, 0, 150);
        assert_eq!(timers.next_due(), Some((100, TimerKind::PopupHide)));
        timers.cancel(TimerKind::PopupHide);
        assert_eq!(timers.next_due(), Some((100, TimerKind::TraitPoll)));
    }
}
