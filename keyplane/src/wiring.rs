// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which controller actions a view event triggers.

use keyplane_layout::DeviceClass;
use keyplane_table::KeyKind;
use keyplane_touch::ViewEvent;

bitflags::bitflags! {
    /// Controller actions triggered by one view event.
    ///
    /// The controller runs them in declaration order.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyActions: u16 {
        /// Ask the host for an input click.
        const PLAY_CLICK = 1 << 0;
        /// Start a shift gesture.
        const SHIFT_DOWN = 1 << 1;
        /// Finish a shift gesture.
        const SHIFT_UP = 1 << 2;
        /// Toggle caps lock.
        const SHIFT_DOUBLE_TAP = 1 << 3;
        /// Delete once and arm the repeat timers.
        const BACKSPACE_DOWN = 1 << 4;
        /// Stop deleting.
        const BACKSPACE_UP = 1 << 5;
        /// Switch to the key's target page.
        const CHANGE_PAGE = 1 << 6;
        /// Switch to the next system input mode.
        const ADVANCE_INPUT_MODE = 1 << 7;
        /// Show the pressed look.
        const HIGHLIGHT = 1 << 8;
        /// Clear the pressed look.
        const UNHIGHLIGHT = 1 << 9;
        /// Show the preview callout.
        const SHOW_POPUP = 1 << 10;
        /// Hide the preview callout now.
        const HIDE_POPUP = 1 << 11;
        /// Hide the preview callout after a short delay.
        const HIDE_POPUP_DELAYED = 1 << 12;
        /// Type the key's output.
        const COMMIT_OUTPUT = 1 << 13;
    }
}

/// Actions for `event` arriving at a key of `kind`.
///
/// ```
/// use keyplane::{KeyActions, key_actions};
/// use keyplane_layout::DeviceClass;
/// use keyplane_table::KeyKind;
/// use keyplane_touch::ViewEvent;
///
/// let up = key_actions(KeyKind::Character, DeviceClass::Phone, true, ViewEvent::UpInside);
/// assert!(up.contains(KeyActions::COMMIT_OUTPUT | KeyActions::HIDE_POPUP_DELAYED));
/// ```
pub fn key_actions(
    kind: KeyKind,
    device: DeviceClass,
    has_output: bool,
    event: ViewEvent,
) -> KeyActions {
    use ViewEvent::*;

    let mut actions = KeyActions::empty();
    let pressing = matches!(event, Down | DragInside | DragEnter);
    let releasing = matches!(event, UpInside | DragExit | Cancel);

    match (kind, event) {
        (KeyKind::KeyboardChange, UpInside) => actions |= KeyActions::ADVANCE_INPUT_MODE,
        (KeyKind::Backspace, Down) => actions |= KeyActions::BACKSPACE_DOWN,
        (KeyKind::Backspace, UpInside | DragExit | Cancel) => {
            actions |= KeyActions::BACKSPACE_UP;
        }
        (KeyKind::Shift, Down) => actions |= KeyActions::SHIFT_DOWN,
        (KeyKind::Shift, UpInside) => actions |= KeyActions::SHIFT_UP,
        (KeyKind::Shift, DownRepeat) => actions |= KeyActions::SHIFT_DOUBLE_TAP,
        (KeyKind::ModeChange, Down) => actions |= KeyActions::CHANGE_PAGE,
        _ => {}
    }

    if kind.is_character() && device == DeviceClass::Phone {
        match event {
            Down | DragInside | DragEnter => actions |= KeyActions::SHOW_POPUP,
            DragExit | Cancel => actions |= KeyActions::HIDE_POPUP,
            UpInside => actions |= KeyActions::HIDE_POPUP_DELAYED,
            DownRepeat => {}
        }
    }

    if has_output && event == UpInside {
        actions |= KeyActions::COMMIT_OUTPUT;
    }

    if !matches!(kind, KeyKind::Shift | KeyKind::ModeChange) {
        if pressing {
            actions |= KeyActions::HIGHLIGHT;
        } else if releasing {
            actions |= KeyActions::UNHIGHLIGHT;
        }
    }

    if event == Down {
        actions |= KeyActions::PLAY_CLICK;
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_never_highlights_from_touches() {
        for event in [
            ViewEvent::Down,
            ViewEvent::DragEnter,
            ViewEvent::UpInside,
            ViewEvent::Cancel,
        ] {
            let actions = key_actions(KeyKind::Shift, DeviceClass::Phone, false, event);
            assert!(!actions.intersects(KeyActions::HIGHLIGHT | KeyActions::UNHIGHLIGHT));
        }
        assert_eq!(
            key_actions(KeyKind::Shift, DeviceClass::Phone, false, ViewEvent::DownRepeat),
            KeyActions::SHIFT_DOUBLE_TAP
        );
    }

    #[test]
    fn backspace_stops_on_exit_and_cancel() {
        for event in [ViewEvent::UpInside, ViewEvent::DragExit, ViewEvent::Cancel] {
            let actions = key_actions(KeyKind::Backspace, DeviceClass::Phone, false, event);
            assert!(actions.contains(KeyActions::BACKSPACE_UP | KeyActions::UNHIGHLIGHT));
        }
        let down = key_actions(KeyKind::Backspace, DeviceClass::Phone, false, ViewEvent::Down);
        assert_eq!(
            down,
            KeyActions::BACKSPACE_DOWN | KeyActions::HIGHLIGHT | KeyActions::PLAY_CLICK
        );
    }

    #[test]
    fn popups_are_phone_only() {
        let phone = key_actions(KeyKind::Character, DeviceClass::Phone, true, ViewEvent::Down);
        let tablet = key_actions(KeyKind::Character, DeviceClass::Tablet, true, ViewEvent::Down);
        assert!(phone.contains(KeyActions::SHOW_POPUP));
        assert!(!tablet.contains(KeyActions::SHOW_POPUP));
        let space = key_actions(KeyKind::Space, DeviceClass::Phone, true, ViewEvent::Down);
        assert!(!space.contains(KeyActions::SHOW_POPUP));
    }

    #[test]
    fn mode_change_switches_on_press_and_commits_nothing() {
        let down = key_actions(KeyKind::ModeChange, DeviceClass::Phone, false, ViewEvent::Down);
        assert_eq!(down, KeyActions::CHANGE_PAGE | KeyActions::PLAY_CLICK);
        let up = key_actions(KeyKind::ModeChange, DeviceClass::Phone, false, ViewEvent::UpInside);
        assert!(up.is_empty());
    }

    #[test]
    fn globe_advances_on_release() {
        let up = key_actions(
            KeyKind::KeyboardChange,
            DeviceClass::Phone,
            false,
            ViewEvent::UpInside,
        );
        assert_eq!(up, KeyActions::ADVANCE_INPUT_MODE | KeyActions::UNHIGHLIGHT);
    }
}
