// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyplane Pool: recycle visual key handles across layout passes.
//!
//! Creating a visual object per key on every layout pass is wasteful when most
//! keys on the next page have the same size as keys on the current one. A
//! [`ViewPool`] keeps every handle it ever created and, on each pass, hands
//! back idle handles whose size already matches before touching anything else.
//!
//! The pool never draws. It issues [`ViewId`]s and tells a [`ViewSink`] when to
//! create a handle, move it, and show or hide it.
//!
//! ## Example
//!
//! ```
//! use keyplane_layout::{DeviceClass, LayoutCalculator, LayoutParams};
//! use keyplane_pool::{PoolMode, ViewPool};
//! use keyplane_table::default_keyboard;
//! use kurbo::Rect;
//!
//! let keyboard = default_keyboard();
//! let calc = LayoutCalculator::default();
//! let params = LayoutParams::new(Rect::new(0.0, 0.0, 320.0, 216.0), DeviceClass::Phone, 2.0);
//! let letters = calc.layout_page(&keyboard, 0, &params).unwrap();
//! let numbers = calc.layout_page(&keyboard, 1, &params).unwrap();
//!
//! let mut pool = ViewPool::new(PoolMode::Pooled);
//! pool.place_page(&letters, &mut ());
//! let created = pool.len();
//! assert_eq!(created, letters.len());
//!
//! // The numbers page has one key fewer: nothing new is created and the
//! // spare handle stays hidden.
//! pool.place_page(&numbers, &mut ());
//! assert_eq!(pool.len(), created);
//! assert_eq!(pool.visible_views().count(), numbers.len());
//! pool.check_invariants().unwrap();
//! ```
//!
//! ## Modes
//!
//! - [`PoolMode::Pooled`]: handles are bound by key identity and recycled by
//!   size. A key shared between pages keeps whichever handle it is given.
//! - [`PoolMode::PerSlot`]: every (page, row, index) slot gets its own handle for
//!   the whole session, so shared keys get one handle per page. Only the placed
//!   page is shown.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod pool;
mod sink;

pub use pool::{InvariantViolation, PoolMode, ViewPool};
pub use sink::{ViewId, ViewSink};
