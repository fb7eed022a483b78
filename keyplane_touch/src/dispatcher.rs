// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch ownership and event synthesis.
//!
//! ## Usage
//!
//! 1) On touch-down call [`TouchDispatcher::begin`] with the visible candidates.
//! 2) On every move call [`TouchDispatcher::moved`] with the same candidates.
//! 3) Finish with [`TouchDispatcher::end`] or [`TouchDispatcher::cancel`].
//! 4) Deliver the returned [`Routed`] events in order.
//!
//! ## Minimal example
//!
//! ```
//! use keyplane_touch::{Routed, TouchDispatcher, ViewEvent};
//! use kurbo::{Point, Rect};
//!
//! let keys = [
//!     ("q", Rect::new(0.0, 0.0, 26.0, 40.0)),
//!     ("w", Rect::new(32.0, 0.0, 58.0, 40.0)),
//! ];
//! let mut touches = TouchDispatcher::new(Rect::new(0.0, 0.0, 320.0, 216.0));
//!
//! let events = touches.begin(1_u64, Point::new(10.0, 10.0), 1, keys);
//! assert_eq!(events, vec![Routed::new("q", ViewEvent::Down)]);
//!
//! // Sliding onto the next key exits the first and enters the second.
//! let events = touches.moved(1, Point::new(40.0, 10.0), keys);
//! assert_eq!(
//!     events,
//!     vec![Routed::new("q", ViewEvent::DragExit), Routed::new("w", ViewEvent::DragEnter)]
//! );
//!
//! let events = touches.end(1, Point::new(40.0, 10.0));
//! assert_eq!(events, vec![Routed::new("w", ViewEvent::UpInside)]);
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::hit::nearest_view;

/// Control event synthesized for a view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ViewEvent {
    /// A touch started on the view.
    Down,
    /// The host reported a multi-tap; always follows [`ViewEvent::Down`].
    DownRepeat,
    /// The owning touch moved but stayed on the view.
    DragInside,
    /// A touch moved onto the view.
    DragEnter,
    /// The owning touch moved off the view.
    DragExit,
    /// The owning touch lifted inside the dispatcher bounds.
    UpInside,
    /// The view lost its touch without a commit.
    Cancel,
}

/// An event addressed to a view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Routed<V> {
    /// Target view.
    pub view: V,
    /// What happened to it.
    pub event: ViewEvent,
}

impl<V> Routed<V> {
    /// Pairs a view with an event.
    pub const fn new(view: V, event: ViewEvent) -> Self {
        Self { view, event }
    }
}

/// Tracks which touch owns which view and synthesizes per-view events.
///
/// - `T` identifies a touch (a pointer id, a finger index).
/// - `V` identifies a view (a pool handle).
///
/// A view is owned by at most one touch. When a touch lands on a view another
/// touch owns, the previous owner receives [`ViewEvent::Cancel`] and keeps
/// tracking with no view; the new owner then receives its own event.
#[derive(Clone, Debug)]
pub struct TouchDispatcher<T, V> {
    bounds: Rect,
    records: SmallVec<[(T, Option<V>); 4]>,
}

impl<T, V> Default for TouchDispatcher<T, V> {
    fn default() -> Self {
        Self::new(Rect::ZERO)
    }
}

impl<T, V> TouchDispatcher<T, V> {
    /// Creates a dispatcher for a surface covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            records: SmallVec::new(),
        }
    }

    /// Surface bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replaces the surface bounds. Tracked touches are kept.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Number of tracked touches, with or without a view.
    pub fn tracked_len(&self) -> usize {
        self.records.len()
    }
}

impl<T: Copy + Eq, V: Copy + Eq> TouchDispatcher<T, V> {
    /// Returns `true` if `touch` is being tracked.
    pub fn is_tracking(&self, touch: T) -> bool {
        self.position(touch).is_some()
    }

    /// View currently owned by `touch`.
    pub fn view_of(&self, touch: T) -> Option<V> {
        self.position(touch).and_then(|i| self.records[i].1)
    }

    /// Touch currently owning `view`.
    pub fn owner_of(&self, view: V) -> Option<T> {
        self.records
            .iter()
            .find(|(_, v)| *v == Some(view))
            .map(|&(t, _)| t)
    }

    /// Starts tracking `touch` at `pos`.
    ///
    /// `tap_count` is the host's multi-tap count for this touch; values above one
    /// add a [`ViewEvent::DownRepeat`]. Beginning a touch that is already tracked
    /// cancels its old view first.
    pub fn begin(
        &mut self,
        touch: T,
        pos: Point,
        tap_count: u32,
        candidates: impl IntoIterator<Item = (V, Rect)>,
    ) -> Vec<Routed<V>> {
        let mut events = Vec::new();
        if let Some(i) = self.position(touch) {
            if let Some(old) = self.records.remove(i).1 {
                events.push(Routed::new(old, ViewEvent::Cancel));
            }
        }
        let view = nearest_view(candidates, pos, self.bounds);
        self.own(touch, view, &mut events);
        if let Some(view) = view {
            events.push(Routed::new(view, ViewEvent::Down));
            if tap_count > 1 {
                events.push(Routed::new(view, ViewEvent::DownRepeat));
            }
        }
        events
    }

    /// Moves `touch` to `pos`. Untracked touches are ignored.
    pub fn moved(
        &mut self,
        touch: T,
        pos: Point,
        candidates: impl IntoIterator<Item = (V, Rect)>,
    ) -> Vec<Routed<V>> {
        let mut events = Vec::new();
        let Some(i) = self.position(touch) else {
            return events;
        };
        let old = self.records[i].1;
        let new = nearest_view(candidates, pos, self.bounds);
        if old == new {
            if let Some(view) = old {
                events.push(Routed::new(view, ViewEvent::DragInside));
            }
            return events;
        }
        if let Some(old) = old {
            events.push(Routed::new(old, ViewEvent::DragExit));
        }
        self.own(touch, new, &mut events);
        if let Some(new) = new {
            events.push(Routed::new(new, ViewEvent::DragEnter));
        }
        events
    }

    /// Lifts `touch` at `pos` and stops tracking it.
    ///
    /// The owned view gets [`ViewEvent::UpInside`] when `pos` is inside the
    /// bounds and [`ViewEvent::Cancel`] otherwise.
    pub fn end(&mut self, touch: T, pos: Point) -> Vec<Routed<V>> {
        let event = if self.bounds.contains(pos) {
            ViewEvent::UpInside
        } else {
            ViewEvent::Cancel
        };
        self.finish(touch, event)
    }

    /// Cancels `touch` and stops tracking it.
    pub fn cancel(&mut self, touch: T) -> Vec<Routed<V>> {
        self.finish(touch, ViewEvent::Cancel)
    }

    /// Cancels every owned view and forgets all touches.
    ///
    /// The underlying gestures continue on the host side; their later events
    /// are ignored because the touches are no longer tracked.
    pub fn reset_tracked_views(&mut self) -> Vec<Routed<V>> {
        let events = self
            .records
            .iter()
            .filter_map(|&(_, view)| view)
            .map(|view| Routed::new(view, ViewEvent::Cancel))
            .collect();
        self.records.clear();
        events
    }

    fn finish(&mut self, touch: T, event: ViewEvent) -> Vec<Routed<V>> {
        let mut events = Vec::new();
        if let Some(i) = self.position(touch) {
            if let Some(view) = self.records.remove(i).1 {
                events.push(Routed::new(view, event));
            }
        }
        events
    }

    /// Assigns `view` to `touch`, cancelling another owner first.
    fn own(&mut self, touch: T, view: Option<V>, events: &mut Vec<Routed<V>>) {
        if let Some(view) = view {
            for record in &mut self.records {
                if record.0 != touch && record.1 == Some(view) {
                    record.1 = None;
                    events.push(Routed::new(view, ViewEvent::Cancel));
                    tracing::trace!("view taken over by another touch");
                }
            }
        }
        match self.position(touch) {
            Some(i) => self.records[i].1 = view,
            None => self.records.push((touch, view)),
        }
    }

    fn position(&self, touch: T) -> Option<usize> {
        self.records.iter().position(|&(t, _)| t == touch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 100.0, 40.0);

    fn keys() -> [(u8, Rect); 2] {
        [
            (b'a', Rect::new(0.0, 0.0, 40.0, 40.0)),
            (b'b', Rect::new(60.0, 0.0, 100.0, 40.0)),
        ]
    }

    #[test]
    fn second_touch_steals_and_cancels_first_owner() {
        let mut d = TouchDispatcher::new(BOUNDS);
        d.begin(1_u32, Point::new(10.0, 10.0), 1, keys());
        let events = d.begin(2, Point::new(20.0, 10.0), 1, keys());
        assert_eq!(
            events,
            vec![
                Routed::new(b'a', ViewEvent::Cancel),
                Routed::new(b'a', ViewEvent::Down)
            ]
        );
        assert_eq!(d.owner_of(b'a'), Some(2));
        assert_eq!(d.view_of(1), None);
        assert!(d.is_tracking(1), "robbed touch keeps tracking");
    }

    #[test]
    fn robbed_touch_reenters_on_move() {
        let mut d = TouchDispatcher::new(BOUNDS);
        d.begin(1_u32, Point::new(10.0, 10.0), 1, keys());
        d.begin(2, Point::new(20.0, 10.0), 1, keys());
        let events = d.moved(1, Point::new(90.0, 10.0), keys());
        assert_eq!(events, vec![Routed::new(b'b', ViewEvent::DragEnter)]);
    }

    #[test]
    fn multi_tap_adds_repeat() {
        let mut d = TouchDispatcher::new(BOUNDS);
        let events = d.begin(1_u32, Point::new(10.0, 10.0), 2, keys());
        assert_eq!(
            events,
            vec![
                Routed::new(b'a', ViewEvent::Down),
                Routed::new(b'a', ViewEvent::DownRepeat)
            ]
        );
    }

    #[test]
    fn lifting_outside_bounds_cancels() {
        let mut d = TouchDispatcher::new(BOUNDS);
        d.begin(1_u32, Point::new(10.0, 10.0), 1, keys());
        let events = d.end(1, Point::new(10.0, 80.0));
        assert_eq!(events, vec![Routed::new(b'a', ViewEvent::Cancel)]);
        assert_eq!(d.tracked_len(), 0);
    }

    #[test]
    fn untracked_touches_are_ignored() {
        let mut d: TouchDispatcher<u32, u8> = TouchDispatcher::new(BOUNDS);
        assert!(d.moved(9, Point::new(10.0, 10.0), keys()).is_empty());
        assert!(d.end(9, Point::new(10.0, 10.0)).is_empty());
        assert!(d.cancel(9).is_empty());
    }

    #[test]
    fn moving_off_every_view_exits_and_keeps_tracking() {
        let mut d = TouchDispatcher::new(BOUNDS);
        d.begin(1_u32, Point::new(10.0, 10.0), 1, keys());
        let events = d.moved(1, Point::new(10.0, 90.0), keys());
        assert_eq!(events, vec![Routed::new(b'a', ViewEvent::DragExit)]);
        assert!(d.is_tracking(1));
        assert!(d.end(1, Point::new(10.0, 90.0)).is_empty());
    }

    #[test]
    fn reset_cancels_every_owned_view() {
        let mut d = TouchDispatcher::new(BOUNDS);
        d.begin(1_u32, Point::new(10.0, 10.0), 1, keys());
        d.begin(2, Point::new(90.0, 10.0), 1, keys());
        let events = d.reset_tracked_views();
        assert_eq!(
            events,
            vec![
                Routed::new(b'a', ViewEvent::Cancel),
                Routed::new(b'b', ViewEvent::Cancel)
            ]
        );
        assert!(d.moved(1, Point::new(90.0, 10.0), keys()).is_empty());
    }
}
