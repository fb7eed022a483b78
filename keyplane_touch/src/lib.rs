// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyplane Touch: single-owner touch dispatch for key surfaces.
//!
//! Keyboards want every touch inside the surface to land on *some* key, even in
//! the gaps between keys, and they want a key to belong to at most one finger.
//! Default toolkit dispatch gives neither, so this crate does it by hand:
//!
//! - [`nearest_view`]: resolve a point to the closest candidate rectangle.
//! - [`TouchDispatcher`]: track touch-to-view ownership and synthesize
//!   [`ViewEvent`]s (down, drag enter/exit/inside, up-inside, cancel).
//! - [`TapCounter`]: derive multi-tap counts when the host cannot.
//!
//! The dispatcher is generic over touch and view identifiers and never stores
//! candidate geometry: callers pass the currently visible views on every call,
//! in the order that should break distance ties.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dispatcher;
mod hit;
mod tap;

pub use dispatcher::{Routed, TouchDispatcher, ViewEvent};
pub use hit::{distance_to_rect, nearest_view};
pub use tap::{DEFAULT_TAP_SLOP, DEFAULT_TAP_WINDOW_MS, TapCounter};
