// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyplane Table: the immutable key table behind an on-screen keyboard.
//!
//! A [`Keyboard`] is an ordered list of [`Page`]s (letters, numbers, symbols, …),
//! each page an ordered list of [`Row`]s, each row an ordered list of [`KeyId`]s.
//! Key content ([`Key`]) lives once in an arena owned by the keyboard; rows only
//! reference it.
//!
//! ## Identity
//!
//! Every key added through [`KeyboardBuilder::add_key`] receives a fresh [`KeyId`]
//! issued by the builder. Identities are never reused and never change.
//!
//! The same identity may appear on more than one page. This is how a keyboard
//! expresses "the same space bar on every page": use [`KeyboardBuilder::share_key`].
//! Downstream crates must not assume that a [`KeyId`] names a single on-screen
//! slot; use [`SlotRef`] (page, row, index) when a position is needed.
//! [`KeyboardBuilder::copy_key`] is the opposite: same content, new identity.
//!
//! ## Minimal example
//!
//! ```
//! use keyplane_table::{Key, KeyKind, KeyboardBuilder};
//!
//! let mut builder = KeyboardBuilder::new();
//! for letter in ["q", "w", "e"] {
//!     builder.add_key(Key::letter(KeyKind::Character, letter), 0, 0);
//! }
//! let space = builder.add_key(Key::new(KeyKind::Space).with_cap("space").with_output(" "), 1, 0);
//! builder.add_key(Key::letter(KeyKind::SpecialCharacter, "1"), 0, 1);
//! builder.share_key(space, 1, 1);
//!
//! let keyboard = builder.build().unwrap();
//! assert_eq!(keyboard.page_count(), 2);
//! assert_eq!(keyboard.key(space).output_for_case(true), " ");
//! assert_eq!(keyboard.pages_containing(space).count(), 2);
//! ```
//!
//! A stock three-page QWERTY layout is available from [`default_keyboard`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod default;
mod key;
mod keyboard;

pub use default::default_keyboard;
pub use key::{Key, KeyId, KeyKind};
pub use keyboard::{Keyboard, KeyboardBuilder, Page, Row, SlotRef, TableError};
