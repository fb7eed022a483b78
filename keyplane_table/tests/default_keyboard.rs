// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape of the stock keyboard.

use keyplane_table::{KeyKind, default_keyboard};

#[test]
fn three_pages_of_four_rows() {
    let kb = default_keyboard();
    assert_eq!(kb.page_count(), 3);
    for page in kb.pages() {
        assert_eq!(page.rows().len(), 4);
    }
    let lens: Vec<usize> = kb.pages()[0].rows().iter().map(|r| r.len()).collect();
    assert_eq!(lens, [10, 9, 9, 5]);
    assert_eq!(kb.pages()[0].max_keys_per_row(), 10);
}

#[test]
fn function_keys_are_shared_across_pages() {
    let kb = default_keyboard();
    let last_row = kb.pages()[0].rows()[3].keys();
    let space = last_row[3];
    assert_eq!(kb.key(space).kind, KeyKind::Space);
    assert_eq!(kb.pages_containing(space).collect::<Vec<_>>(), [0, 1, 2]);

    let backspace = *kb.pages()[0].rows()[2].keys().last().unwrap();
    assert_eq!(kb.key(backspace).kind, KeyKind::Backspace);
    assert_eq!(kb.pages_containing(backspace).count(), 3);
}

#[test]
fn mode_change_keys_target_existing_pages() {
    let kb = default_keyboard();
    let mode_changes: Vec<(usize, Option<usize>)> = kb
        .pages()
        .iter()
        .enumerate()
        .flat_map(|(p, _)| kb.slots(p))
        .filter(|slot| kb.key(slot.key).kind == KeyKind::ModeChange)
        .map(|slot| (slot.page, kb.key(slot.key).target_page))
        .collect();
    assert_eq!(
        mode_changes,
        [
            (0, Some(1)),
            (1, Some(2)),
            (1, Some(0)),
            (2, Some(1)),
            (2, Some(0)),
        ]
    );
}

#[test]
fn forced_colors_on_a_and_b() {
    let kb = default_keyboard();
    let colored: Vec<&str> = kb
        .slots(0)
        .map(|slot| kb.key(slot.key))
        .filter(|key| key.force_color.is_some())
        .map(|key| key.key_cap_for_case(true))
        .collect();
    assert_eq!(colored, ["A", "B"]);
}

#[test]
fn symbols_keep_their_case() {
    let kb = default_keyboard();
    let first = kb.pages()[2].rows()[1].keys()[0];
    assert_eq!(kb.key(first).output_for_case(true), "_");
    assert_eq!(kb.key(first).output_for_case(false), "_");
}
