// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pool itself.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use hashbrown::HashMap;
use keyplane_layout::PageFrames;
use keyplane_table::KeyId;
use kurbo::{Rect, Size};

use crate::sink::{ViewId, ViewSink};

/// How views are assigned to keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PoolMode {
    /// Views are recycled by size across pages and bound by key identity.
    #[default]
    Pooled,
    /// Every (page, row, index) slot owns a view for the whole session.
    PerSlot,
}

/// Sizes compared at 1/1024pt so that float noise does not split buckets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct SizeKey(i64, i64);

impl SizeKey {
    fn of(size: Size) -> Self {
        Self(quantize(size.width), quantize(size.height))
    }
}

fn quantize(x: f64) -> i64 {
    (x * 1024.0).round() as i64
}

#[derive(Copy, Clone, Debug)]
struct ViewRecord {
    frame: Rect,
    hidden: bool,
    key: Option<KeyId>,
}

/// Binds key identities to recyclable view handles.
///
/// Every view the pool creates lives for the pool's lifetime and is either
/// *bound* (shown, mapped to exactly one key) or *idle* (hidden, filed under its
/// current size). The key-to-view mapping is a bijection between bound keys and
/// bound views at every instant; [`check_invariants`](Self::check_invariants)
/// verifies it.
#[derive(Clone, Debug, Default)]
pub struct ViewPool {
    mode: PoolMode,
    views: Vec<ViewRecord>,
    key_to_view: HashMap<KeyId, ViewId>,
    idle: BTreeMap<SizeKey, Vec<ViewId>>,
    slot_views: HashMap<(usize, usize, usize), ViewId>,
}

impl ViewPool {
    /// Creates an empty pool.
    pub fn new(mode: PoolMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Assignment mode.
    pub fn mode(&self) -> PoolMode {
        self.mode
    }

    /// Number of views ever created.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if no view was ever created.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Takes an idle view whose size equals `frame`'s, most recently freed first.
    pub fn request_view(&mut self, frame: Rect) -> Option<ViewId> {
        let key = SizeKey::of(frame.size());
        let bucket = self.idle.get_mut(&key)?;
        let view = bucket.pop();
        if bucket.is_empty() {
            self.idle.remove(&key);
        }
        view
    }

    /// Takes any idle view, or creates one when none is left.
    pub fn acquire_view(&mut self, sink: &mut impl ViewSink) -> ViewId {
        if let Some(mut entry) = self.idle.first_entry() {
            let bucket = entry.get_mut();
            if let Some(view) = bucket.pop() {
                if bucket.is_empty() {
                    entry.remove();
                }
                return view;
            }
        }
        self.create_view(sink)
    }

    /// Unbinds every bound view, hides it, and files it as idle under its size.
    ///
    /// Views are never destroyed.
    pub fn reset_pool(&mut self, sink: &mut impl ViewSink) {
        self.key_to_view.clear();
        for index in 0..self.views.len() {
            let view = ViewId::from_index(index);
            let record = &mut self.views[index];
            if record.key.take().is_some() {
                self.idle
                    .entry(SizeKey::of(record.frame.size()))
                    .or_default()
                    .push(view);
            }
            if !record.hidden {
                record.hidden = true;
                sink.set_hidden(view, true);
            }
        }
    }

    /// Binds `view` to `key`, applies `frame`, and shows the view.
    ///
    /// Whatever `view` or `key` was bound to before is released first. A view
    /// displaced from `key` this way is hidden and filed as idle.
    pub fn bind_view(&mut self, view: ViewId, key: KeyId, frame: Rect, sink: &mut impl ViewSink) {
        let Some(previous) = self.views.get(view.index()).map(|r| r.key) else {
            return;
        };
        match previous {
            Some(old_key) => {
                self.key_to_view.remove(&old_key);
            }
            None => self.forget_idle(view),
        }
        if let Some(old_view) = self.key_to_view.remove(&key) {
            if old_view != view {
                self.release(old_view, sink);
            }
        }

        let record = &mut self.views[view.index()];
        record.key = Some(key);
        record.frame = frame;
        sink.set_frame(view, frame);
        if record.hidden {
            record.hidden = false;
            sink.set_hidden(view, false);
        }
        self.key_to_view.insert(key, view);
    }

    /// Binds one view to every slot of `frames`, hiding all others.
    ///
    /// In [`PoolMode::Pooled`] this resets the pool, then binds every slot whose
    /// size matches an idle view, then fills the remaining slots from
    /// [`acquire_view`](Self::acquire_view). In [`PoolMode::PerSlot`] each slot
    /// uses the view it was created with.
    pub fn place_page(&mut self, frames: &PageFrames, sink: &mut impl ViewSink) {
        match self.mode {
            PoolMode::Pooled => self.place_pooled(frames, sink),
            PoolMode::PerSlot => self.place_per_slot(frames, sink),
        }
    }

    fn place_pooled(&mut self, frames: &PageFrames, sink: &mut impl ViewSink) {
        self.reset_pool(sink);
        let mut misses = Vec::new();
        for slot in frames.slots() {
            match self.request_view(slot.frame) {
                Some(view) => self.bind_view(view, slot.slot.key, slot.frame, sink),
                None => misses.push(slot),
            }
        }
        let before = self.views.len();
        for slot in &misses {
            let view = self.acquire_view(sink);
            self.bind_view(view, slot.slot.key, slot.frame, sink);
        }
        if !misses.is_empty() {
            tracing::trace!(
                page = frames.page(),
                misses = misses.len(),
                created = self.views.len() - before,
                "view pool size misses"
            );
        }
    }

    fn place_per_slot(&mut self, frames: &PageFrames, sink: &mut impl ViewSink) {
        self.key_to_view.clear();
        for index in 0..self.views.len() {
            let view = ViewId::from_index(index);
            let record = &mut self.views[index];
            record.key = None;
            if !record.hidden {
                record.hidden = true;
                sink.set_hidden(view, true);
            }
        }
        for slot in frames.slots() {
            let position = (slot.slot.page, slot.slot.row, slot.slot.index);
            let view = match self.slot_views.get(&position) {
                Some(&view) => view,
                None => {
                    let view = self.create_view(sink);
                    self.slot_views.insert(position, view);
                    view
                }
            };
            self.bind_view(view, slot.slot.key, slot.frame, sink);
        }
    }

    /// View bound to `key`.
    pub fn view_for_key(&self, key: KeyId) -> Option<ViewId> {
        self.key_to_view.get(&key).copied()
    }

    /// Key bound to `view`.
    pub fn key_for_view(&self, view: ViewId) -> Option<KeyId> {
        self.views.get(view.index()).and_then(|r| r.key)
    }

    /// Last frame applied to `view`.
    pub fn frame_of(&self, view: ViewId) -> Option<Rect> {
        self.views.get(view.index()).map(|r| r.frame)
    }

    /// Whether `view` is currently hidden. Unknown views count as hidden.
    pub fn is_hidden(&self, view: ViewId) -> bool {
        self.views.get(view.index()).is_none_or(|r| r.hidden)
    }

    /// Shown views and their frames, in creation order.
    pub fn visible_views(&self) -> impl Iterator<Item = (ViewId, Rect)> + '_ {
        self.views
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.hidden)
            .map(|(i, r)| (ViewId::from_index(i), r.frame))
    }

    /// Bound key/view pairs, in creation order of the views.
    pub fn bindings(&self) -> impl Iterator<Item = (KeyId, ViewId)> + '_ {
        self.views
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.key.map(|k| (k, ViewId::from_index(i))))
    }

    /// Checks that bound views and keys map one-to-one, that exactly the bound
    /// views are shown, and that idle views are filed once under their size.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut bound = 0;
        for (i, record) in self.views.iter().enumerate() {
            let view = ViewId::from_index(i);
            match record.key {
                Some(key) => {
                    bound += 1;
                    if self.key_to_view.get(&key) != Some(&view) {
                        return Err(InvariantViolation::MapMismatch { key, view });
                    }
                    if record.hidden {
                        return Err(InvariantViolation::BoundViewHidden { view });
                    }
                }
                None if !record.hidden => {
                    return Err(InvariantViolation::UnboundViewShown { view });
                }
                None => {}
            }
        }
        if bound != self.key_to_view.len() {
            return Err(InvariantViolation::DanglingKey);
        }
        let mut filed = alloc::vec![false; self.views.len()];
        for (size, bucket) in &self.idle {
            for &view in bucket {
                let Some(record) = self.views.get(view.index()) else {
                    return Err(InvariantViolation::UnknownView { view });
                };
                if record.key.is_some() || filed[view.index()] {
                    return Err(InvariantViolation::IdleMisfiled { view });
                }
                if SizeKey::of(record.frame.size()) != *size {
                    return Err(InvariantViolation::IdleMisfiled { view });
                }
                filed[view.index()] = true;
            }
        }
        Ok(())
    }

    fn create_view(&mut self, sink: &mut impl ViewSink) -> ViewId {
        let view = ViewId::from_index(self.views.len());
        self.views.push(ViewRecord {
            frame: Rect::ZERO,
            hidden: true,
            key: None,
        });
        sink.create_view(view);
        view
    }

    /// Unbinds and hides `view`, filing it as idle.
    fn release(&mut self, view: ViewId, sink: &mut impl ViewSink) {
        let Some(record) = self.views.get_mut(view.index()) else {
            return;
        };
        if record.key.take().is_none() {
            return;
        }
        if !record.hidden {
            record.hidden = true;
            sink.set_hidden(view, true);
        }
        if self.mode == PoolMode::Pooled {
            self.idle
                .entry(SizeKey::of(record.frame.size()))
                .or_default()
                .push(view);
        }
    }

    fn forget_idle(&mut self, view: ViewId) {
        let Some(record) = self.views.get(view.index()) else {
            return;
        };
        let size = SizeKey::of(record.frame.size());
        if let Some(bucket) = self.idle.get_mut(&size) {
            bucket.retain(|&v| v != view);
            if bucket.is_empty() {
                self.idle.remove(&size);
            }
        }
    }
}

/// A broken pool invariant, reported by [`ViewPool::check_invariants`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A view claims a key whose mapping points elsewhere.
    MapMismatch {
        /// Key recorded on the view.
        key: KeyId,
        /// The view.
        view: ViewId,
    },
    /// The key map has an entry no view claims.
    DanglingKey,
    /// A bound view is hidden.
    BoundViewHidden {
        /// The view.
        view: ViewId,
    },
    /// An unbound view is shown.
    UnboundViewShown {
        /// The view.
        view: ViewId,
    },
    /// An idle entry names a view the pool never created.
    UnknownView {
        /// The view.
        view: ViewId,
    },
    /// An idle view is bound, filed twice, or filed under the wrong size.
    IdleMisfiled {
        /// The view.
        view: ViewId,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapMismatch { key, view } => write!(
                f,
                "view {} is bound to key {} but the key maps elsewhere",
                view.index(),
                key.index()
            ),
            Self::DanglingKey => write!(f, "key map has entries no view claims"),
            Self::BoundViewHidden { view } => write!(f, "bound view {} is hidden", view.index()),
            Self::UnboundViewShown { view } => {
                write!(f, "unbound view {} is shown", view.index())
            }
            Self::UnknownView { view } => write!(f, "idle view {} does not exist", view.index()),
            Self::IdleMisfiled { view } => write!(f, "idle view {} is misfiled", view.index()),
        }
    }
}

impl core::error::Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_keys_absorb_float_noise() {
        let a = SizeKey::of(Size::new(26.0, 39.0));
        let b = SizeKey::of(Size::new(26.0 + 1e-9, 39.0 - 1e-9));
        assert_eq!(a, b);
        assert_ne!(a, SizeKey::of(Size::new(26.5, 39.0)));
    }

    #[test]
    fn request_on_empty_pool_misses() {
        let mut pool = ViewPool::new(PoolMode::Pooled);
        assert_eq!(pool.request_view(Rect::new(0.0, 0.0, 10.0, 10.0)), None);
        assert_eq!(pool.acquire_view(&mut ()), ViewId::from_index(0));
        assert_eq!(pool.len(), 1);
    }
}
