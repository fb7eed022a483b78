// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-provided configuration.

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Timer intervals, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Timing {
    /// Time between pressing backspace and the first repeated delete.
    pub backspace_delay_ms: u64,
    /// Time between repeated deletes while backspace stays down.
    pub backspace_repeat_ms: u64,
    /// How long a released key keeps its popup.
    pub popup_hide_delay_ms: u64,
    /// Interval for polling appearance traits, for hosts without change notifications.
    pub trait_poll_interval_ms: Option<u64>,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            backspace_delay_ms: 500,
            backspace_repeat_ms: 70,
            popup_hide_delay_ms: 50,
            trait_poll_interval_ms: None,
        }
    }
}

/// Feature flags read by the controller.
///
/// Every user-facing flag defaults to off, so a partially specified document
/// behaves as if the missing features were disabled.
///
/// ```
/// use keyplane::Settings;
///
/// let settings = Settings::default();
/// assert!(!settings.auto_capitalization);
/// assert!(settings.pool_views);
/// assert_eq!(settings.timing.backspace_repeat_ms, 70);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Capitalize according to the host's policy.
    pub auto_capitalization: bool,
    /// Turn a double space after a word into ". ".
    pub period_shortcut: bool,
    /// Ask the host for an input click on every press.
    pub keyboard_clicks: bool,
    /// Recycle views by size across pages instead of keeping one per slot.
    pub pool_views: bool,
    /// Timer intervals.
    pub timing: Timing,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_capitalization: false,
            period_shortcut: false,
            keyboard_clicks: false,
            pool_views: true,
            timing: Timing::default(),
        }
    }
}

impl Settings {
    /// Settings with every user-facing feature enabled.
    pub fn all_enabled() -> Self {
        Self {
            auto_capitalization: true,
            period_shortcut: true,
            keyboard_clicks: true,
            ..Self::default()
        }
    }
}
