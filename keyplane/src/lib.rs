// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyplane: the interaction controller of an on-screen keyboard.
//!
//! [`KeyboardController`] ties the lower crates together:
//!
//! - `keyplane_table` describes keys and pages.
//! - `keyplane_layout` turns a page into frames.
//! - `keyplane_pool` binds key views to those frames.
//! - `keyplane_touch` routes touches to views.
//!
//! On top of that it implements keyboard behavior: shift with double-tap caps
//! lock, page switching, backspace auto-repeat, key preview popups,
//! auto-capitalization and the double-space period shortcut.
//!
//! The host provides a [`KeyboardHost`] (the text document) and a
//! [`KeyRenderer`] (the views). Time is passed in explicitly as milliseconds,
//! and timers fire from [`KeyboardController::advance_time`] or
//! [`KeyboardController::fire`], so behavior is deterministic under test.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo`, `peniko`, and `tracing`.
//! - `libm`: float math without `std`.
//! - `serde`: `Deserialize` for [`Settings`] and [`Timing`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod appearance;
mod autocap;
mod controller;
mod host;
mod settings;
mod shift;
mod timer;
mod wiring;

pub use appearance::{KeyAppearance, Theme, key_appearance};
pub use autocap::{AutoPeriodState, period_shortcut_applies, should_autocapitalize};
pub use controller::{BackspaceState, KeyboardController, PopupPreview, TouchId};
pub use host::{Autocapitalization, Environment, KeyRenderer, KeyboardHost};
pub use settings::{Settings, Timing};
pub use shift::ShiftState;
pub use timer::{TimerKind, TimerToken, Timers};
pub use wiring::{KeyActions, key_actions};
