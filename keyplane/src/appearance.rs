// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind key colors.
//!
//! The stock palette has a light and a dark variant, each with an opaque
//! "solid" form used when the reduced transparency setting is on. Which role a
//! key takes (regular or special fill, pressed fill, text) depends only on its
//! kind, so the whole policy lives in [`key_appearance`].

use keyplane_layout::DeviceClass;
use keyplane_table::{Key, KeyKind};
use peniko::Color;

/// Theme inputs of the appearance policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Theme {
    /// Dark keyboard appearance.
    pub dark: bool,
    /// Opaque colors for reduced transparency.
    pub solid: bool,
    /// Device class; tablets darken character keys while pressed.
    pub device: DeviceClass,
}

/// Colors of one key view.
#[derive(Copy, Clone, Debug)]
pub struct KeyAppearance {
    /// Background fill.
    pub fill: Color,
    /// Background fill while pressed, when it differs from `fill`.
    pub pressed_fill: Option<Color>,
    /// Label color.
    pub text: Color,
    /// Label color while pressed, when it differs from `text`.
    pub pressed_text: Option<Color>,
    /// Fill of the preview callout.
    pub popup: Color,
    /// Shadow drawn under the key.
    pub under: Color,
    /// Key outline.
    pub border: Color,
}

fn regular(theme: Theme) -> Color {
    match (theme.dark, theme.solid) {
        (true, true) => Color::from_rgb8(83, 83, 83),
        (true, false) => Color::from_rgba8(255, 255, 255, 77),
        (false, _) => Color::WHITE,
    }
}

fn special(theme: Theme) -> Color {
    match (theme.dark, theme.solid) {
        (true, true) => Color::from_rgb8(45, 45, 45),
        (true, false) => Color::from_rgba8(128, 128, 128, 77),
        (false, _) => Color::from_rgb8(177, 177, 177),
    }
}

fn popup(theme: Theme) -> Color {
    match (theme.dark, theme.solid) {
        (true, true) => regular(theme),
        (true, false) => Color::from_rgb8(128, 128, 128),
        (false, _) => Color::WHITE,
    }
}

fn text(theme: Theme) -> Color {
    if theme.dark { Color::WHITE } else { Color::BLACK }
}

/// Colors for `key` under `theme`.
///
/// A forced key color replaces the fill and pressed fill of character keys and
/// doubles as their popup color.
///
/// ```
/// use keyplane::{Theme, key_appearance};
/// use keyplane_table::{Key, KeyKind};
/// use peniko::Color;
///
/// let light = Theme::default();
/// let space = Key::new(KeyKind::Space).with_output(" ");
/// let look = key_appearance(&space, light);
/// assert_eq!(look.fill.to_rgba8(), Color::WHITE.to_rgba8());
/// assert!(look.pressed_fill.is_some());
/// ```
pub fn key_appearance(key: &Key, theme: Theme) -> KeyAppearance {
    let theme_text = text(theme);
    let (fill, pressed_fill, label, pressed_text) = match key.kind {
        KeyKind::Character | KeyKind::SpecialCharacter | KeyKind::Period => {
            match key.force_color {
                Some(forced) => (forced, Some(forced), theme_text, None),
                None => {
                    let pressed = (theme.device == DeviceClass::Tablet).then(|| special(theme));
                    (regular(theme), pressed, theme_text, None)
                }
            }
        }
        KeyKind::Space => (regular(theme), Some(special(theme)), theme_text, None),
        KeyKind::Shift => {
            let pressed = if theme.dark {
                Color::from_rgb8(214, 220, 208)
            } else {
                Color::WHITE
            };
            (special(theme), Some(pressed), Color::WHITE, Some(Color::BLACK))
        }
        KeyKind::Backspace | KeyKind::KeyboardChange => {
            let pressed_text = (!theme.dark).then_some(Color::BLACK);
            (special(theme), Some(regular(theme)), Color::WHITE, pressed_text)
        }
        KeyKind::Return | KeyKind::Settings => {
            (special(theme), Some(regular(theme)), theme_text, None)
        }
        KeyKind::ModeChange | KeyKind::Other => (special(theme), None, theme_text, None),
    };
    let popup = match key.force_color {
        Some(forced) if key.kind.is_character() => forced,
        _ => popup(theme),
    };
    let (under, border) = if theme.dark {
        (Color::from_rgba8(39, 18, 39, 102), Color::from_rgba8(0, 0, 0, 0))
    } else {
        (Color::from_rgb8(137, 139, 143), Color::from_rgb8(159, 162, 166))
    };
    KeyAppearance {
        fill,
        pressed_fill,
        text: label,
        pressed_text,
        popup,
        under,
        border,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(color: Color) -> [u8; 4] {
        let c = color.to_rgba8();
        [c.r, c.g, c.b, c.a]
    }

    #[test]
    fn forced_color_overrides_character_fill_and_popup() {
        let forced = Color::from_rgb8(0x89, 0xcf, 0xf0);
        let key = Key::letter(KeyKind::Character, "A").with_force_color(forced);
        let look = key_appearance(&key, Theme::default());
        assert_eq!(rgba(look.fill), rgba(forced));
        assert_eq!(look.pressed_fill.map(rgba), Some(rgba(forced)));
        assert_eq!(rgba(look.popup), rgba(forced));
    }

    #[test]
    fn forced_color_is_ignored_on_function_keys() {
        let key = Key::new(KeyKind::Return).with_force_color(Color::from_rgb8(1, 2, 3));
        let look = key_appearance(&key, Theme::default());
        assert_eq!(rgba(look.fill), [177, 177, 177, 255]);
        assert_eq!(rgba(look.popup), rgba(Color::WHITE));
    }

    #[test]
    fn tablets_press_character_keys_darker() {
        let key = Key::letter(KeyKind::Character, "q");
        let phone = key_appearance(&key, Theme::default());
        let tablet = key_appearance(
            &key,
            Theme {
                device: DeviceClass::Tablet,
                ..Theme::default()
            },
        );
        assert!(phone.pressed_fill.is_none());
        assert_eq!(tablet.pressed_fill.map(rgba), Some([177, 177, 177, 255]));
    }

    #[test]
    fn dark_solid_theme_is_opaque() {
        let theme = Theme {
            dark: true,
            solid: true,
            device: DeviceClass::Phone,
        };
        let q = key_appearance(&Key::letter(KeyKind::Character, "q"), theme);
        let shift = key_appearance(&Key::new(KeyKind::Shift), theme);
        assert_eq!(rgba(q.fill), [83, 83, 83, 255]);
        assert_eq!(rgba(q.popup), [83, 83, 83, 255]);
        assert_eq!(rgba(shift.fill), [45, 45, 45, 255]);
        assert_eq!(shift.pressed_fill.map(rgba), Some([214, 220, 208, 255]));
        assert_eq!(rgba(q.border)[3], 0);
    }

    #[test]
    fn backspace_pressed_text_only_in_light_mode() {
        let key = Key::new(KeyKind::Backspace);
        let light = key_appearance(&key, Theme::default());
        let dark = key_appearance(
            &key,
            Theme {
                dark: true,
                ..Theme::default()
            },
        );
        assert_eq!(light.pressed_text.map(rgba), Some(rgba(Color::BLACK)));
        assert!(dark.pressed_text.is_none());
        assert_eq!(rgba(dark.text), rgba(Color::WHITE));
    }
}
