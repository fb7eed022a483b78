// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// Handle to a visual key object, issued by a [`ViewPool`](crate::ViewPool).
///
/// Handles are dense indices in creation order and are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u32);

impl ViewId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Creation index of this handle.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The rendering side of the pool.
///
/// The pool decides which handle shows which key and where; the sink owns the
/// actual visual objects.
pub trait ViewSink {
    /// A new handle was issued. It starts hidden with a zero frame.
    fn create_view(&mut self, view: ViewId);

    /// Moves and resizes `view`.
    fn set_frame(&mut self, view: ViewId, frame: Rect);

    /// Shows or hides `view`.
    fn set_hidden(&mut self, view: ViewId, hidden: bool);
}

/// Discards every request. Handy when only the pool's bookkeeping matters.
impl ViewSink for () {
    fn create_view(&mut self, _view: ViewId) {}

    fn set_frame(&mut self, _view: ViewId, _frame: Rect) {}

    fn set_hidden(&mut self, _view: ViewId, _hidden: bool) {}
}

impl<S: ViewSink + ?Sized> ViewSink for &mut S {
    fn create_view(&mut self, view: ViewId) {
        (**self).create_view(view);
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) {
        (**self).set_frame(view, frame);
    }

    fn set_hidden(&mut self, view: ViewId, hidden: bool) {
        (**self).set_hidden(view, hidden);
    }
}
