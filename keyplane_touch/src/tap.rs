// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-tap counting for hosts without a native tap count.

use kurbo::Point;

/// Default maximum time between consecutive taps, in milliseconds.
pub const DEFAULT_TAP_WINDOW_MS: u64 = 300;

/// Default maximum distance between consecutive taps, in points.
pub const DEFAULT_TAP_SLOP: f64 = 20.0;

/// Counts consecutive taps on the same view.
///
/// A tap continues the sequence when it lands on the same view as the previous
/// one, within the time window, and within the distance slop. Anything else
/// starts a new sequence at one.
///
/// ```
/// use keyplane_touch::TapCounter;
/// use kurbo::Point;
///
/// let mut taps = TapCounter::new();
/// assert_eq!(taps.register(Some(7), Point::new(10.0, 10.0), 1_000), 1);
/// assert_eq!(taps.register(Some(7), Point::new(12.0, 11.0), 1_200), 2);
/// // Too slow: starts over.
/// assert_eq!(taps.register(Some(7), Point::new(12.0, 11.0), 1_600), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TapCounter<V> {
    window_ms: u64,
    slop: f64,
    last: Option<(V, Point, u64)>,
    count: u32,
}

impl<V> Default for TapCounter<V> {
    fn default() -> Self {
        Self::with_limits(DEFAULT_TAP_WINDOW_MS, DEFAULT_TAP_SLOP)
    }
}

impl<V> TapCounter<V> {
    /// Creates a counter with the default window and slop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a counter with a custom time window and distance slop.
    pub fn with_limits(window_ms: u64, slop: f64) -> Self {
        Self {
            window_ms,
            slop,
            last: None,
            count: 0,
        }
    }

    /// Time window in milliseconds.
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Forgets the current sequence.
    pub fn reset(&mut self) {
        self.last = None;
        self.count = 0;
    }
}

impl<V: PartialEq> TapCounter<V> {
    /// Records a touch-down on `view` at `pos` and `now_ms`; returns its tap count.
    ///
    /// A touch-down on no view resets the sequence and counts as a single tap.
    pub fn register(&mut self, view: Option<V>, pos: Point, now_ms: u64) -> u32 {
        let Some(view) = view else {
            self.reset();
            return 1;
        };
        let continues = self.last.as_ref().is_some_and(|(v, p, t)| {
            *v == view
                && now_ms >= *t
                && now_ms - *t <= self.window_ms
                && p.distance(pos) <= self.slop
        });
        self.count = if continues {
            self.count.saturating_add(1)
        } else {
            1
        };
        self.last = Some((view, pos, now_ms));
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn different_view_restarts() {
        let mut taps = TapCounter::new();
        assert_eq!(taps.register(Some(1), Point::ZERO, 0), 1);
        assert_eq!(taps.register(Some(2), Point::ZERO, 50), 1);
        assert_eq!(taps.register(Some(2), Point::ZERO, 100), 2);
        assert_eq!(taps.register(Some(2), Point::ZERO, 200), 3);
    }

    #[test]
    fn slop_is_respected() {
        let mut taps = TapCounter::new();
        taps.register(Some(1), Point::ZERO, 0);
        assert_eq!(taps.register(Some(1), Point::new(25.0, 0.0), 100), 1);
    }

    #[test]
    fn window_edge_is_inclusive() {
        let mut taps = TapCounter::with_limits(300, 20.0);
        taps.register(Some(1), Point::ZERO, 1_000);
        assert_eq!(taps.register(Some(1), Point::ZERO, 1_300), 2);
    }

    #[test]
    fn miss_resets() {
        let mut taps = TapCounter::new();
        taps.register(Some(1), Point::ZERO, 0);
        assert_eq!(taps.register(None, Point::ZERO, 10), 1);
        assert_eq!(taps.register(Some(1), Point::ZERO, 20), 1);
    }
}
