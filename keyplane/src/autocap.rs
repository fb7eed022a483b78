// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context rules for auto-capitalization and the period shortcut.

use crate::host::Autocapitalization;

/// Progress of the double-space period shortcut.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AutoPeriodState {
    /// The last committed key was not a space.
    #[default]
    NoSpace,
    /// The last committed key was a space.
    FirstSpace,
}

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Whether the next character should be uppercase under `policy`, given the
/// text before the cursor.
///
/// Missing context counts as the start of the document.
///
/// ```
/// use keyplane::{Autocapitalization, should_autocapitalize};
///
/// let sentences = Autocapitalization::Sentences;
/// assert!(should_autocapitalize(sentences, None));
/// assert!(should_autocapitalize(sentences, Some("Done. ")));
/// assert!(!should_autocapitalize(sentences, Some("Done.")));
/// assert!(!should_autocapitalize(sentences, Some("Done and ")));
/// ```
pub fn should_autocapitalize(policy: Autocapitalization, before: Option<&str>) -> bool {
    match policy {
        Autocapitalization::None => false,
        Autocapitalization::AllCharacters => true,
        Autocapitalization::Words => before
            .and_then(|text| text.chars().next_back())
            .is_none_or(is_whitespace),
        Autocapitalization::Sentences => {
            let Some(text) = before else {
                return true;
            };
            for (i, c) in text.chars().rev().take(3).enumerate() {
                if is_sentence_end(c) {
                    // Punctuation needs at least one space after it.
                    return i > 0;
                }
                if !is_whitespace(c) {
                    return false;
                }
                if is_newline(c) {
                    return true;
                }
            }
            true
        }
    }
}

/// Whether the text before the cursor ends in a word followed by two spaces,
/// so that the spaces can become ". ".
///
/// ```
/// use keyplane::period_shortcut_applies;
///
/// assert!(period_shortcut_applies(Some("Hello  ")));
/// assert!(!period_shortcut_applies(Some("Hello,  ")));
/// assert!(!period_shortcut_applies(Some("Hello ")));
/// ```
pub fn period_shortcut_applies(before: Option<&str>) -> bool {
    let Some(text) = before else {
        return false;
    };
    let mut tail = text.chars().rev();
    match (tail.next(), tail.next(), tail.next()) {
        (Some(' '), Some(' '), Some(c)) => !(is_whitespace(c) || is_sentence_end(c) || c == ','),
        _ => false,
    }
}
