// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shift and caps lock.

/// Capitalization mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShiftState {
    /// Lowercase.
    #[default]
    Disabled,
    /// Uppercase for the next character only.
    Enabled,
    /// Caps lock.
    Locked,
}

impl ShiftState {
    /// Returns `true` unless the state is [`ShiftState::Disabled`].
    pub const fn is_uppercase(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    const fn toggled(self) -> Self {
        match self {
            Self::Disabled => Self::Enabled,
            Self::Enabled | Self::Locked => Self::Disabled,
        }
    }
}

/// Shift state plus the bookkeeping of an in-progress shift gesture.
///
/// A tap on shift from lowercase takes effect on press so that a chord
/// (shift held while typing) capitalizes immediately; a tap from uppercase
/// waits for the release. A double tap toggles caps lock and swallows the
/// release that follows it.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct ShiftMachine {
    state: ShiftState,
    starting: Option<ShiftState>,
    multitapped: bool,
    sequence_start: ShiftState,
}

impl ShiftMachine {
    pub(crate) fn state(&self) -> ShiftState {
        self.state
    }

    pub(crate) fn set(&mut self, state: ShiftState) {
        self.state = state;
    }

    /// Shift pressed. `tap_count` is 1 for the first tap of a sequence.
    pub(crate) fn down(&mut self, tap_count: u32) {
        if tap_count <= 1 {
            self.sequence_start = self.state;
        }
        self.starting = Some(self.state);
        if !self.state.is_uppercase() {
            self.state = self.state.toggled();
        }
    }

    /// Shift released inside the key.
    pub(crate) fn up(&mut self) {
        if !self.multitapped && self.starting.is_some_and(ShiftState::is_uppercase) {
            self.state = self.state.toggled();
        }
        self.clear_gesture();
    }

    /// Second tap of a double tap.
    ///
    /// Locks, unless the sequence started locked, in which case it unlocks.
    pub(crate) fn double_tap(&mut self) {
        self.multitapped = true;
        self.state = if self.sequence_start == ShiftState::Locked {
            ShiftState::Disabled
        } else {
            ShiftState::Locked
        };
    }

    pub(crate) fn clear_gesture(&mut self) {
        self.starting = None;
        self.multitapped = false;
    }

    /// Applies an auto-capitalization decision. Caps lock is never overridden.
    pub(crate) fn auto(&mut self, capitalize: bool) {
        self.state = match (self.state, capitalize) {
            (ShiftState::Locked, _) => ShiftState::Locked,
            (_, true) => ShiftState::Enabled,
            (_, false) => ShiftState::Disabled,
        };
    }
}
