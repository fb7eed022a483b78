// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use crate::key::{Key, KeyKind};
use crate::keyboard::{Keyboard, KeyboardBuilder};

const LETTERS_PAGE: usize = 0;
const NUMBERS_PAGE: usize = 1;
const SYMBOLS_PAGE: usize = 2;

const PUNCTUATION: [&str; 5] = [".", ",", "?", "!", "'"];

/// Stock three-page QWERTY keyboard: letters, numbers, and symbols.
///
/// Space, return, backspace, the globe key, and the settings key are shared across
/// all pages. Mode-change keys that show the same label on two pages are copies
/// with their own identities.
pub fn default_keyboard() -> Keyboard {
    let mut b = KeyboardBuilder::new();

    for letter in ["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"] {
        b.add_key(Key::letter(KeyKind::Character, letter), 0, LETTERS_PAGE);
    }
    for letter in ["A", "S", "D", "F", "G", "H", "J", "K", "L"] {
        let mut key = Key::letter(KeyKind::Character, letter);
        if letter == "A" {
            key = key.with_force_color(Color::from_rgb8(0x89, 0xcf, 0xf0));
        }
        b.add_key(key, 1, LETTERS_PAGE);
    }
    b.add_key(Key::new(KeyKind::Shift), 2, LETTERS_PAGE);
    for letter in ["Z", "X", "C", "V", "B", "N", "M"] {
        let mut key = Key::letter(KeyKind::Character, letter);
        if letter == "B" {
            key = key.with_force_color(Color::from_rgb8(0xf0, 0x89, 0xcf));
        }
        b.add_key(key, 2, LETTERS_PAGE);
    }
    let backspace = b.add_key(Key::new(KeyKind::Backspace), 2, LETTERS_PAGE);

    let to_numbers = b.add_key(
        Key::new(KeyKind::ModeChange)
            .with_cap("123")
            .with_target_page(NUMBERS_PAGE),
        3,
        LETTERS_PAGE,
    );
    let globe = b.add_key(Key::new(KeyKind::KeyboardChange), 3, LETTERS_PAGE);
    let settings = b.add_key(Key::new(KeyKind::Settings), 3, LETTERS_PAGE);
    let space = b.add_key(
        Key::new(KeyKind::Space).with_cap("space").with_output(" "),
        3,
        LETTERS_PAGE,
    );
    let enter = b.add_key(
        Key::new(KeyKind::Return).with_cap("return").with_output("\n"),
        3,
        LETTERS_PAGE,
    );

    for digit in ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"] {
        b.add_key(Key::letter(KeyKind::SpecialCharacter, digit), 0, NUMBERS_PAGE);
    }
    for symbol in ["-", "/", ":", ";", "(", ")", "$", "&", "@", "\""] {
        b.add_key(Key::letter(KeyKind::SpecialCharacter, symbol), 1, NUMBERS_PAGE);
    }
    b.add_key(
        Key::new(KeyKind::ModeChange)
            .with_cap("#+=")
            .with_target_page(SYMBOLS_PAGE),
        2,
        NUMBERS_PAGE,
    );
    for symbol in PUNCTUATION {
        b.add_key(Key::letter(KeyKind::SpecialCharacter, symbol), 2, NUMBERS_PAGE);
    }
    b.share_key(backspace, 2, NUMBERS_PAGE);
    let to_letters = b.add_key(
        Key::new(KeyKind::ModeChange)
            .with_cap("ABC")
            .with_target_page(LETTERS_PAGE),
        3,
        NUMBERS_PAGE,
    );
    for shared in [globe, settings, space, enter] {
        b.share_key(shared, 3, NUMBERS_PAGE);
    }

    for symbol in ["[", "]", "{", "}", "#", "%", "^", "*", "+", "="] {
        b.add_key(Key::letter(KeyKind::SpecialCharacter, symbol), 0, SYMBOLS_PAGE);
    }
    for symbol in ["_", "\\", "|", "~", "<", ">", "€", "£", "¥", "•"] {
        b.add_key(Key::letter(KeyKind::SpecialCharacter, symbol), 1, SYMBOLS_PAGE);
    }
    b.copy_key(to_numbers, 2, SYMBOLS_PAGE);
    for symbol in PUNCTUATION {
        b.add_key(Key::letter(KeyKind::SpecialCharacter, symbol), 2, SYMBOLS_PAGE);
    }
    b.share_key(backspace, 2, SYMBOLS_PAGE);
    b.copy_key(to_letters, 3, SYMBOLS_PAGE);
    for shared in [globe, settings, space, enter] {
        b.share_key(shared, 3, SYMBOLS_PAGE);
    }

    match b.build() {
        Ok(keyboard) => keyboard,
        Err(err) => unreachable!("stock keyboard is well formed: {err}"),
    }
}
