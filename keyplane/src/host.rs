// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits implemented by the embedding host.

use alloc::string::String;

use keyplane_layout::{DeviceClass, Orientation, PopupPlacement};
use keyplane_pool::{ViewId, ViewSink};

use crate::appearance::KeyAppearance;

/// Capitalization policy of the focused text field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Autocapitalization {
    /// Never capitalize automatically.
    #[default]
    None,
    /// Capitalize the first letter of every word.
    Words,
    /// Capitalize the first letter of every sentence.
    Sentences,
    /// Capitalize everything.
    AllCharacters,
}

/// Environment facts the controller polls on every layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Environment {
    /// Phone or tablet.
    pub device: DeviceClass,
    /// Interface orientation.
    pub orientation: Orientation,
    /// Device pixels per point.
    pub scale: f64,
    /// Physical screen width in points, independent of orientation.
    pub screen_width: f64,
    /// Dark keyboard appearance requested by the text field.
    pub dark: bool,
    /// Reduced transparency accessibility setting.
    pub reduced_transparency: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            device: DeviceClass::Phone,
            orientation: Orientation::Portrait,
            scale: 2.0,
            screen_width: 320.0,
            dark: false,
            reduced_transparency: false,
        }
    }
}

/// Text document the keyboard types into.
///
/// All calls are best effort; the controller never learns whether an edit
/// was applied.
pub trait KeyboardHost {
    /// Inserts `text` at the cursor.
    fn insert_text(&mut self, text: &str);

    /// Deletes one character before the cursor.
    fn delete_backward(&mut self);

    /// Text before the cursor, if the host exposes any. May be truncated.
    fn text_before_cursor(&self) -> Option<String>;

    /// Capitalization policy of the focused field.
    fn autocapitalization(&self) -> Autocapitalization;

    /// Current environment.
    fn environment(&self) -> Environment {
        Environment::default()
    }

    /// Switches to the next system input mode.
    fn advance_input_mode(&mut self) {}

    /// Plays the system input click.
    fn play_input_click(&mut self) {}
}

/// Visual side of a key view.
///
/// Extends [`ViewSink`] with the per-key state the controller drives. The
/// controller never draws; it only reports what each view should show.
pub trait KeyRenderer: ViewSink {
    /// Sets the label of `view`.
    fn set_text(&mut self, view: ViewId, text: &str);

    /// Sets the pressed look of `view`.
    fn set_highlighted(&mut self, view: ViewId, highlighted: bool);

    /// Sets the selected look of `view` (the shift lock glyph).
    fn set_selected(&mut self, view: ViewId, selected: bool);

    /// Applies the colors of `view`.
    fn set_appearance(&mut self, view: ViewId, appearance: &KeyAppearance);

    /// Shows the preview callout of `view` at `placement`.
    fn show_popup(&mut self, view: ViewId, placement: &PopupPlacement);

    /// Hides the preview callout of `view`.
    fn hide_popup(&mut self, view: ViewId);
}

impl KeyRenderer for () {
    fn set_text(&mut self, _: ViewId, _: &str) {}
    fn set_highlighted(&mut self, _: ViewId, _: bool) {}
    fn set_selected(&mut self, _: ViewId, _: bool) {}
    fn set_appearance(&mut self, _: ViewId, _: &KeyAppearance) {}
    fn show_popup(&mut self, _: ViewId, _: &PopupPlacement) {}
    fn hide_popup(&mut self, _: ViewId) {}
}
