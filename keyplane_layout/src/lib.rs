// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyplane Layout: key rectangles for an on-screen keyboard page.
//!
//! [`LayoutCalculator::layout_page`] turns one page of a
//! [`Keyboard`](keyplane_table::Keyboard) into a rectangle per slot. It is a
//! pure function of the key table, the page index, and [`LayoutParams`]
//! (bounds, device class, pixel scale), so callers may cache its result by page
//! and bounds.
//!
//! Every row is classified by its key kinds:
//!
//! - a **character row** starts with a typable key; keys share one width and gap
//!   and are centered,
//! - a **flanked row** has a function key on each end of a run of characters
//!   (shift and backspace around the bottom letters),
//! - a **special row** is anything else, usually the space bar row.
//!
//! Margins, gaps, and other metrics come from [`LayoutConstants`], mostly as
//! [`ThresholdTable`]s keyed by drawing-area width. Edges are snapped to device
//! pixels with [`rounded`].
//!
//! ## Example
//!
//! ```
//! use keyplane_layout::{DeviceClass, LayoutCalculator, LayoutParams};
//! use keyplane_table::default_keyboard;
//! use kurbo::Rect;
//!
//! let keyboard = default_keyboard();
//! let calc = LayoutCalculator::default();
//! let params = LayoutParams::new(Rect::new(0.0, 0.0, 320.0, 216.0), DeviceClass::Phone, 2.0);
//!
//! let frames = calc.layout_page(&keyboard, 0, &params).unwrap();
//! assert_eq!(frames.len(), 33);
//! assert_eq!(frames.key_height(), 39.0);
//!
//! let q = frames.frame_at(0, 0).unwrap();
//! assert_eq!(q, Rect::new(3.0, 12.0, 29.0, 51.0));
//!
//! // Zero-area bounds produce no frames at all.
//! let empty = LayoutParams::new(Rect::ZERO, DeviceClass::Phone, 2.0);
//! assert!(calc.layout_page(&keyboard, 0, &empty).is_none());
//! ```
//!
//! The popup preview shown above a pressed key is placed by [`popup_frame`].
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: use `libm` for float math in `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod calculator;
mod constants;
mod device;
mod frames;
mod popup;
mod threshold;

pub use calculator::{LayoutCalculator, LayoutParams, RowClass};
pub use constants::{ByOrientation, LayoutConstants};
pub use device::{DeviceClass, LANDSCAPE_RATIO, Orientation, is_landscape, keyboard_height, rounded};
pub use frames::{PageFrames, SlotFrame};
pub use popup::{ClampedEdges, Direction, PopupPlacement, popup_frame};
pub use threshold::{ThresholdError, ThresholdTable};
