// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of the key preview popup.

use bitflags::bitflags;
use kurbo::Rect;

use crate::constants::LayoutConstants;

/// One of the four sides of a rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller x.
    Left,
    /// Toward smaller y.
    Up,
    /// Toward larger x.
    Right,
    /// Toward larger y.
    Down,
}

impl Direction {
    /// The side across from this one.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// The next side clockwise.
    pub const fn clockwise(self) -> Self {
        match self {
            Self::Left => Self::Up,
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
        }
    }

    /// The next side counterclockwise.
    pub const fn counterclockwise(self) -> Self {
        match self {
            Self::Left => Self::Down,
            Self::Up => Self::Left,
            Self::Right => Self::Up,
            Self::Down => Self::Right,
        }
    }

    /// Returns `true` for [`Direction::Left`] and [`Direction::Right`].
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

bitflags! {
    /// Container edges a popup was pushed back from.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ClampedEdges: u8 {
        /// Moved down to stay below the top inset.
        const TOP = 1 << 0;
        /// Aligned with the key's left edge to stay inside the left inset.
        const LEFT = 1 << 1;
        /// Aligned with the key's right edge to stay inside the right inset.
        const RIGHT = 1 << 2;
    }
}

/// Where to draw a popup and which way it connects to its key.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PopupPlacement {
    /// Popup rectangle in container coordinates.
    pub frame: Rect,
    /// Side of the key the popup sits on: [`Direction::Up`] normally,
    /// [`Direction::Down`] when the top edge was clamped.
    pub direction: Direction,
    /// The connecting shape must open on the opposite side from usual.
    pub attachment_reversed: bool,
    /// Edges that forced a move.
    pub clamped: ClampedEdges,
}

/// Places a popup above `key_frame` inside `container`.
///
/// `key_frame` and `container` share a coordinate space. `screen_width` is the
/// physical screen width in points and selects the popup height.
///
/// ```
/// use keyplane_layout::{Direction, LayoutConstants, popup_frame};
/// use kurbo::Rect;
///
/// let constants = LayoutConstants::default();
/// let container = Rect::new(0.0, -120.0, 320.0, 216.0);
/// let key = Rect::new(35.0, 12.0, 61.0, 51.0);
/// let placement = popup_frame(&constants, key, 320.0, container);
/// assert_eq!(placement.frame, Rect::new(22.0, -51.0, 74.0, 4.0));
/// assert_eq!(placement.direction, Direction::Up);
/// assert!(placement.clamped.is_empty());
/// ```
pub fn popup_frame(
    constants: &LayoutConstants,
    key_frame: Rect,
    screen_width: f64,
    container: Rect,
) -> PopupPlacement {
    let inset = constants.popup_edge_inset;
    let width = key_frame.width() + constants.popup_width_increment;
    let height =
        constants.popup_total_height(screen_width) - constants.popup_gap - key_frame.height();
    let mut x = key_frame.x0 + (key_frame.width() - width) / 2.0;
    let mut y = key_frame.y0 - height - constants.popup_gap;
    let mut clamped = ClampedEdges::empty();
    let mut direction = Direction::Up;

    if y < container.y0 + inset {
        y = container.y0 + inset;
        direction = Direction::Down;
        clamped |= ClampedEdges::TOP;
    }
    if x < container.x0 + inset {
        x = key_frame.x0;
        clamped |= ClampedEdges::LEFT;
    }
    if x + width > container.x1 - inset {
        x = key_frame.x1 - width;
        clamped |= ClampedEdges::RIGHT;
    }

    PopupPlacement {
        frame: Rect::from_origin_size((x, y), (width, height)),
        direction,
        attachment_reversed: clamped.contains(ClampedEdges::TOP),
        clamped,
    }
}
