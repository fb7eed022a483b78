// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page layout pass.

use alloc::vec::Vec;

use keyplane_table::{KeyKind, Keyboard, SlotRef};
use kurbo::Rect;

use crate::constants::LayoutConstants;
use crate::device::{DeviceClass, is_landscape, rounded};
use crate::frames::{PageFrames, SlotFrame};

/// Everything a layout pass depends on besides the key table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutParams {
    /// Drawing area. Orientation is derived from its aspect ratio.
    pub bounds: Rect,
    /// Phone or tablet metrics.
    pub device: DeviceClass,
    /// Device pixels per point, used to snap edges.
    pub scale: f64,
}

impl LayoutParams {
    /// Bundles the inputs of one layout pass.
    pub fn new(bounds: Rect, device: DeviceClass, scale: f64) -> Self {
        Self {
            bounds,
            device,
            scale,
        }
    }
}

/// How a row is distributed across its width.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RowClass {
    /// Starts with a typable key: uniform keys, centered.
    Character,
    /// A non-character key, then characters, then usually another non-character.
    Flanked,
    /// Anything else, typically the row holding the space bar.
    Special,
}

impl RowClass {
    /// Classifies a row by the kinds of its keys.
    pub fn of(kinds: &[KeyKind]) -> Self {
        match kinds {
            [first, ..] if first.is_character() => Self::Character,
            [first, second, _, ..] if !first.is_character() && second.is_character() => {
                Self::Flanked
            }
            _ => Self::Special,
        }
    }
}

/// Turns pages of a [`Keyboard`] into per-slot rectangles.
///
/// The calculator holds only constants; [`layout_page`](Self::layout_page) is a
/// pure function of its arguments, so results may be cached by page and bounds.
#[derive(Clone, Debug, Default)]
pub struct LayoutCalculator {
    constants: LayoutConstants,
}

/// Values shared by every row of one pass.
struct Pass {
    width: f64,
    landscape: bool,
    shrunk: bool,
    scale: f64,
    key_width: f64,
    key_gap: f64,
}

impl LayoutCalculator {
    /// Creates a calculator with custom metrics.
    pub fn new(constants: LayoutConstants) -> Self {
        Self { constants }
    }

    /// Metrics in use.
    pub fn constants(&self) -> &LayoutConstants {
        &self.constants
    }

    /// Lays out `page` of `keyboard` inside `params.bounds`.
    ///
    /// Returns `None` for zero-area bounds or a page that does not exist.
    pub fn layout_page(
        &self,
        keyboard: &Keyboard,
        page: usize,
        params: &LayoutParams,
    ) -> Option<PageFrames> {
        let bounds = params.bounds;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return None;
        }
        let rows = keyboard.page(page)?.rows();
        if rows.is_empty() {
            return None;
        }
        let c = &self.constants;
        let scale = params.scale;
        let width = bounds.width();
        let landscape = is_landscape(bounds);

        let mut side = c.side_edges(width, landscape);
        let bottom = side;
        let usable = width - 2.0 * side;
        let shrunk = c.shrunk_width(usable, landscape, params.device == DeviceClass::Tablet);
        if let Some(shrunk) = shrunk {
            side += (usable - shrunk) / 2.0;
        }
        let top = c.top_edge(width, landscape);
        let row_gap = c.row_gap(width, landscape);
        let last_row_gap = c.last_row_gap(width, landscape);

        let row_count = rows.len();
        let max_keys = rows.iter().map(|r| r.len()).max().unwrap_or(1).max(1);
        let row_gap_total = if row_count >= 2 {
            (row_count - 2) as f64 * row_gap + last_row_gap
        } else {
            0.0
        };
        let key_gap = c.key_gap(width, max_keys, landscape, shrunk.is_some());
        let key_height = rounded(
            (bounds.height() - bottom - top - row_gap_total) / row_count as f64,
            scale,
        );
        let key_width = rounded(
            (width - 2.0 * side - key_gap * (max_keys - 1) as f64) / max_keys as f64,
            scale,
        );

        let pass = Pass {
            width,
            landscape,
            shrunk: shrunk.is_some(),
            scale,
            key_width,
            key_gap,
        };

        let mut row_frames = Vec::with_capacity(row_count);
        let mut slots = Vec::new();
        let mut kinds = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            let gaps_above = if r == row_count - 1 {
                row_gap_total
            } else {
                r as f64 * row_gap
            };
            let row_frame = Rect::from_origin_size(
                (
                    bounds.x0 + rounded(side, scale),
                    bounds.y0 + rounded(top + r as f64 * key_height + gaps_above, scale),
                ),
                (rounded(width - 2.0 * side, scale), key_height),
            );
            row_frames.push(row_frame);

            kinds.clear();
            kinds.extend(row.keys().iter().map(|&id| keyboard.key(id).kind));
            let frames = match RowClass::of(&kinds) {
                RowClass::Character => {
                    self.character_row(kinds.len(), key_width, key_gap, row_frame, scale)
                }
                RowClass::Flanked => self.flanked_row(kinds.len(), row_frame, &pass),
                RowClass::Special => self.special_row(&kinds, row_frame, &pass),
            };
            slots.extend(row.keys().iter().zip(frames).enumerate().map(
                |(index, (&key, frame))| SlotFrame {
                    slot: SlotRef {
                        page,
                        row: r,
                        index,
                        key,
                    },
                    frame,
                },
            ));
        }

        Some(PageFrames {
            page,
            bounds,
            key_width,
            key_height,
            rows: row_frames,
            slots,
        })
    }

    /// Uniform keys centered in the row. When they do not fit, the side space
    /// collapses and the gap shrinks; a trailing-edge clamp absorbs rounding.
    fn character_row(
        &self,
        count: usize,
        key_width: f64,
        gap: f64,
        row: Rect,
        scale: f64,
    ) -> Vec<Rect> {
        let n = count as f64;
        let key_space = n * key_width + (n - 1.0) * gap;
        let mut side_space = (row.width() - key_space) / 2.0;
        let mut gap = gap;
        if side_space < 0.0 {
            side_space = 0.0;
            if count > 1 {
                gap = (row.width() - n * key_width) / (n - 1.0);
            }
        }
        let mut origin = row.x0 + side_space;
        let mut frames = Vec::with_capacity(count);
        for _ in 0..count {
            let mut x = rounded(origin, scale);
            if x + key_width > row.x1 {
                x = rounded(row.x1 - key_width, scale);
            }
            frames.push(Rect::from_origin_size(
                (x, row.y0),
                (key_width, row.height()),
            ));
            origin += key_width + gap;
        }
        frames
    }

    /// Characters in the middle, a wider key on each end.
    ///
    /// Short middles are widened to the width of a minimum number of standard
    /// keys (measured against a ten-key reference row) so the flanking keys do not
    /// grow without bound.
    fn flanked_row(&self, count: usize, row: Rect, pass: &Pass) -> Vec<Rect> {
        let c = &self.constants;
        let landscape = pass.landscape;

        let reference_count = c.compressed_threshold.saturating_sub(1).max(1);
        let standard_gap = c.key_gap(row.width(), reference_count, landscape, pass.shrunk);
        let sides = c.side_edges(row.width(), landscape);
        let standard_key_width = (row.width()
            - 2.0 * sides
            - standard_gap * (reference_count - 1) as f64)
            / reference_count as f64;
        let standard_keys = c.minimum_standard_keys;
        let standard_width = standard_key_width * standard_keys + standard_gap * (standard_keys - 1.0);

        let middle = (count - 2) as f64;
        let current_width = middle * pass.key_width + (middle - 1.0) * pass.key_gap;
        let (middle_width, middle_gap) = if current_width < standard_width {
            (standard_width, standard_gap)
        } else {
            (current_width, pass.key_gap)
        };
        let middle_key_width = (middle_width - (middle - 1.0) * middle_gap) / middle;

        let side_space = (row.width() - middle_width) / 2.0;
        let end_width = rounded(
            (side_space * c.flexible_end_m.get(landscape) + c.flexible_end_c.get(landscape))
                .max(pass.key_width),
            pass.scale,
        );
        let end_gap = side_space - end_width;

        let mut origin = row.x0;
        let mut frames = Vec::with_capacity(count);
        for k in 0..count {
            if k == 0 {
                frames.push(slot(origin, end_width, row, pass.scale));
                origin += end_width + end_gap;
            } else if k == count - 1 {
                origin += end_gap;
                frames.push(slot(origin, end_width, row, pass.scale));
                origin += end_width;
            } else {
                frames.push(slot(origin, middle_key_width, row, pass.scale));
                origin += middle_key_width;
                if k != count - 2 {
                    origin += middle_gap;
                }
            }
        }
        frames
    }

    /// Keys split around the space bar.
    ///
    /// Keys left of space split a budget evenly, except that with exactly three
    /// of them the budget holds two slots and the third gets a narrower slot of
    /// its own in portrait. Keys right of space share a second budget evenly and
    /// space takes what remains of the row. A row without a space
    /// key is split evenly.
    fn special_row(&self, kinds: &[KeyKind], row: Rect, pass: &Pass) -> Vec<Rect> {
        let c = &self.constants;
        let landscape = pass.landscape;
        let scale = pass.scale;
        let gap = c.last_row_key_gap.get(landscape).lookup(pass.width);

        let Some(space_at) = kinds.iter().position(|&k| k == KeyKind::Space) else {
            let n = kinds.len() as f64;
            let width = rounded((row.width() - (n - 1.0) * gap) / n, scale);
            return self.character_row(kinds.len(), width, gap, row, scale);
        };
        let before = space_at;
        let after = kinds[space_at + 1..]
            .iter()
            .filter(|&&k| k != KeyKind::Space)
            .count();

        let left_area = if before > 0 {
            row.width() * c.last_row_left_ratio.get(landscape)
        } else {
            0.0
        };
        let right_area = if after > 0 {
            row.width() * c.last_row_right_ratio.get(landscape)
        } else {
            0.0
        };
        // Three keys left of space keep two full slots plus a narrow third one.
        let has_mic_slot = before == 3;
        let left_slots = if has_mic_slot { 2 } else { before.max(1) };
        let left_width = rounded(
            (left_area - gap * (left_slots - 1) as f64) / left_slots as f64,
            scale,
        );
        let right_width = if after > 0 {
            rounded((right_area - gap * (after - 1) as f64) / after as f64, scale)
        } else {
            0.0
        };
        let mic_width = if landscape {
            left_width
        } else {
            rounded(left_width * c.mic_ratio, scale)
        };

        let others: f64 = kinds
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != space_at)
            .map(|(k, _)| match k {
                2 if has_mic_slot => mic_width,
                k if k < space_at => left_width,
                _ => right_width,
            })
            .sum();
        let gaps = gap * (kinds.len() - 1) as f64;
        let space_width = rounded(row.width() - others - gaps, scale);

        let mut origin = row.x0;
        let mut past_space = false;
        let mut frames = Vec::with_capacity(kinds.len());
        for (k, &kind) in kinds.iter().enumerate() {
            let width = if kind == KeyKind::Space && !past_space {
                past_space = true;
                space_width
            } else if !past_space {
                if has_mic_slot && k == 2 {
                    mic_width
                } else {
                    left_width
                }
            } else {
                right_width
            };
            frames.push(slot(origin, width, row, scale));
            origin += width + gap;
        }
        frames
    }

}

fn slot(origin: f64, width: f64, row: Rect, scale: f64) -> Rect {
    Rect::from_origin_size((rounded(origin, scale), row.y0), (width, row.height()))
}
