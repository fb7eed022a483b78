// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key identity, kind, and content.

use alloc::string::{String, ToString};
use peniko::Color;

/// Identifier of a key inside a [`Keyboard`](crate::Keyboard).
///
/// Issued by [`KeyboardBuilder`](crate::KeyboardBuilder) as an arena index.
/// Two keys with identical content still have distinct identities unless one was
/// placed with [`KeyboardBuilder::share_key`](crate::KeyboardBuilder::share_key).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(pub(crate) u32);

impl KeyId {
    /// Arena index of this key.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Closed set of key kinds.
///
/// Kind drives layout (row classification), appearance, and which interaction a
/// key takes part in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// A letter.
    Character,
    /// A digit or symbol.
    SpecialCharacter,
    /// The period key.
    Period,
    /// Shift / caps lock.
    Shift,
    /// Delete backward.
    Backspace,
    /// Switches to another page of the same keyboard.
    ModeChange,
    /// Switches to the next system input mode (the globe key).
    KeyboardChange,
    /// Return / enter.
    Return,
    /// Space bar.
    Space,
    /// Settings.
    Settings,
    /// Application-defined key.
    Other,
}

impl KeyKind {
    /// Returns `true` for kinds that type a visible character.
    pub const fn is_character(self) -> bool {
        matches!(self, Self::Character | Self::SpecialCharacter | Self::Period)
    }

    /// Returns `true` for the function keys drawn in the "special" style.
    pub const fn is_special(self) -> bool {
        matches!(
            self,
            Self::Shift
                | Self::Backspace
                | Self::ModeChange
                | Self::KeyboardChange
                | Self::Return
                | Self::Settings
        )
    }
}

/// Content of a key.
///
/// Caps are the labels drawn on the key; outputs are the text inserted when the
/// key is committed. Each comes in an upper and lower variant; lookups fall back
/// to the other case when one is missing.
#[derive(Clone, Debug)]
pub struct Key {
    /// What kind of key this is.
    pub kind: KeyKind,
    /// Label shown while uppercase.
    pub uppercase_cap: Option<String>,
    /// Label shown while lowercase.
    pub lowercase_cap: Option<String>,
    /// Text inserted while uppercase.
    pub uppercase_output: Option<String>,
    /// Text inserted while lowercase.
    pub lowercase_output: Option<String>,
    /// Page a [`KeyKind::ModeChange`] key switches to.
    pub target_page: Option<usize>,
    /// Fill color that overrides the theme for this key.
    pub force_color: Option<Color>,
}

impl Key {
    /// Creates an empty key of the given kind.
    pub const fn new(kind: KeyKind) -> Self {
        Self {
            kind,
            uppercase_cap: None,
            lowercase_cap: None,
            uppercase_output: None,
            lowercase_output: None,
            target_page: None,
            force_color: None,
        }
    }

    /// Creates a key whose caps and outputs are `letter` in both cases.
    pub fn letter(kind: KeyKind, letter: &str) -> Self {
        let mut key = Self::new(kind);
        key.set_letter(letter);
        key
    }

    /// Sets caps and outputs to the lower- and uppercase forms of `letter`.
    pub fn set_letter(&mut self, letter: &str) {
        let lower = letter.to_lowercase();
        let upper = letter.to_uppercase();
        self.lowercase_cap = Some(lower.clone());
        self.uppercase_cap = Some(upper.clone());
        self.lowercase_output = Some(lower);
        self.uppercase_output = Some(upper);
    }

    /// Sets the uppercase cap, which also serves lowercase by fallback.
    #[must_use]
    pub fn with_cap(mut self, cap: &str) -> Self {
        self.uppercase_cap = Some(cap.to_string());
        self
    }

    /// Sets the same output for both cases.
    #[must_use]
    pub fn with_output(mut self, output: &str) -> Self {
        self.uppercase_output = Some(output.to_string());
        self.lowercase_output = Some(output.to_string());
        self
    }

    /// Sets the page a mode-change key switches to.
    #[must_use]
    pub fn with_target_page(mut self, page: usize) -> Self {
        self.target_page = Some(page);
        self
    }

    /// Sets a fill color that overrides the theme.
    #[must_use]
    pub fn with_force_color(mut self, color: Color) -> Self {
        self.force_color = Some(color);
        self
    }

    /// Returns `true` if committing this key inserts text.
    pub fn has_output(&self) -> bool {
        self.uppercase_output.is_some() || self.lowercase_output.is_some()
    }

    /// Text to insert for the given case.
    pub fn output_for_case(&self, uppercase: bool) -> &str {
        pick(&self.uppercase_output, &self.lowercase_output, uppercase)
    }

    /// Label to draw for the given case.
    pub fn key_cap_for_case(&self, uppercase: bool) -> &str {
        pick(&self.uppercase_cap, &self.lowercase_cap, uppercase)
    }
}

fn pick<'a>(upper: &'a Option<String>, lower: &'a Option<String>, uppercase: bool) -> &'a str {
    let (first, second) = if uppercase {
        (upper, lower)
    } else {
        (lower, upper)
    };
    first.as_deref().or(second.as_deref()).unwrap_or("")
}
