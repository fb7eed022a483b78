// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use keyplane_table::{KeyId, SlotRef};
use kurbo::Rect;

/// One laid-out slot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotFrame {
    /// Where the key sits in the table.
    pub slot: SlotRef,
    /// Its rectangle in the coordinate space of the layout bounds.
    pub frame: Rect,
}

/// Result of laying out one page: a rectangle for every slot, in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct PageFrames {
    pub(crate) page: usize,
    pub(crate) bounds: Rect,
    pub(crate) key_width: f64,
    pub(crate) key_height: f64,
    pub(crate) rows: Vec<Rect>,
    pub(crate) slots: Vec<SlotFrame>,
}

impl PageFrames {
    /// Page these frames belong to.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Bounds the page was laid out in.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Nominal key width.
    pub fn key_width(&self) -> f64 {
        self.key_width
    }

    /// Key height shared by every row.
    pub fn key_height(&self) -> f64 {
        self.key_height
    }

    /// Row rectangles, top to bottom.
    pub fn rows(&self) -> &[Rect] {
        &self.rows
    }

    /// Slot frames in row-major order.
    pub fn slots(&self) -> &[SlotFrame] {
        &self.slots
    }

    /// Frames of one row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &SlotFrame> + '_ {
        self.slots.iter().filter(move |s| s.slot.row == row)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the page produced no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Frame of the slot at `(row, index)`.
    pub fn frame_at(&self, row: usize, index: usize) -> Option<Rect> {
        self.slots
            .iter()
            .find(|s| s.slot.row == row && s.slot.index == index)
            .map(|s| s.frame)
    }

    /// Frame of `key` on this page. Identities appear at most once per page.
    pub fn frame_of(&self, key: KeyId) -> Option<Rect> {
        self.slots
            .iter()
            .find(|s| s.slot.key == key)
            .map(|s| s.frame)
    }
}
