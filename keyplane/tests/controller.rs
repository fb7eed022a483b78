// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end typing scenarios on the stock keyboard.

use std::collections::HashMap;

use keyplane::{
    AutoPeriodState, Autocapitalization, BackspaceState, Environment, KeyAppearance,
    KeyRenderer, KeyboardController, KeyboardHost, PopupPreview, Settings, ShiftState, TimerKind,
    Timing,
};
use keyplane_layout::{Orientation, PopupPlacement};
use keyplane_pool::{ViewId, ViewSink};
use keyplane_table::{Key, KeyId, KeyKind, default_keyboard};
use kurbo::{Point, Rect};

const SURFACE: Rect = Rect::new(0.0, 0.0, 320.0, 216.0);

#[derive(Default)]
struct Field {
    text: String,
    policy: Autocapitalization,
    env: Environment,
    deletes: usize,
    clicks: usize,
    advanced: usize,
}

impl KeyboardHost for Field {
    fn insert_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn delete_backward(&mut self) {
        self.deletes += 1;
        self.text.pop();
    }

    fn text_before_cursor(&self) -> Option<String> {
        Some(self.text.clone())
    }

    fn autocapitalization(&self) -> Autocapitalization {
        self.policy
    }

    fn environment(&self) -> Environment {
        self.env
    }

    fn advance_input_mode(&mut self) {
        self.advanced += 1;
    }

    fn play_input_click(&mut self) {
        self.clicks += 1;
    }
}

#[derive(Default)]
struct Recorder {
    created: usize,
    text: HashMap<ViewId, String>,
    highlighted: HashMap<ViewId, bool>,
    selected: HashMap<ViewId, bool>,
    appearances: usize,
    popup: Option<ViewId>,
    popups_hidden: usize,
}

impl ViewSink for Recorder {
    fn create_view(&mut self, _view: ViewId) {
        self.created += 1;
    }

    fn set_frame(&mut self, _view: ViewId, _frame: Rect) {}

    fn set_hidden(&mut self, _view: ViewId, _hidden: bool) {}
}

impl KeyRenderer for Recorder {
    fn set_text(&mut self, view: ViewId, text: &str) {
        self.text.insert(view, text.to_string());
    }

    fn set_highlighted(&mut self, view: ViewId, highlighted: bool) {
        self.highlighted.insert(view, highlighted);
    }

    fn set_selected(&mut self, view: ViewId, selected: bool) {
        self.selected.insert(view, selected);
    }

    fn set_appearance(&mut self, _view: ViewId, _appearance: &KeyAppearance) {
        self.appearances += 1;
    }

    fn show_popup(&mut self, view: ViewId, _placement: &PopupPlacement) {
        self.popup = Some(view);
    }

    fn hide_popup(&mut self, view: ViewId) {
        if self.popup == Some(view) {
            self.popup = None;
        }
        self.popups_hidden += 1;
    }
}

type Board = KeyboardController<Field, Recorder>;

fn board(settings: Settings, field: Field) -> Board {
    let mut board = KeyboardController::new(default_keyboard(), settings, field, Recorder::default());
    board.layout(SURFACE);
    board
}

fn find(board: &Board, pred: impl Fn(&Key) -> bool) -> KeyId {
    let keyboard = board.keyboard();
    keyboard
        .slots(board.page())
        .map(|slot| slot.key)
        .find(|&id| pred(keyboard.key(id)))
        .expect("key on the visible page")
}

fn letter(board: &Board, cap: &str) -> KeyId {
    find(board, |key| key.lowercase_cap.as_deref() == Some(cap))
}

fn kind(board: &Board, kind: KeyKind) -> KeyId {
    find(board, |key| key.kind == kind)
}

fn center(board: &Board, key: KeyId) -> Point {
    board
        .page_frames()
        .and_then(|frames| frames.frame_of(key))
        .expect("laid out key")
        .center()
}

fn tap(board: &mut Board, key: KeyId, at: u64) {
    let pos = center(board, key);
    board.touch_began(1, pos, at, None);
    board.touch_ended(1, pos, at + 30);
}

#[test]
fn shift_applies_to_one_character() {
    let mut b = board(Settings::default(), Field::default());
    let shift = kind(&b, KeyKind::Shift);
    let q = letter(&b, "q");
    let w = letter(&b, "w");

    tap(&mut b, shift, 0);
    assert_eq!(b.shift_state(), ShiftState::Enabled);
    let q_view = b.pool().view_for_key(q).unwrap();
    assert_eq!(b.renderer().text[&q_view], "Q");

    tap(&mut b, q, 1000);
    tap(&mut b, w, 2000);
    assert_eq!(b.host().text, "Qw");
    assert_eq!(b.shift_state(), ShiftState::Disabled);
    assert_eq!(b.renderer().text[&q_view], "q");
}

#[test]
fn double_tap_locks_and_double_tap_unlocks() {
    let mut b = board(Settings::default(), Field::default());
    let shift = kind(&b, KeyKind::Shift);
    let q = letter(&b, "q");
    let shift_view = b.pool().view_for_key(shift).unwrap();

    tap(&mut b, shift, 0);
    tap(&mut b, shift, 100);
    assert_eq!(b.shift_state(), ShiftState::Locked);
    assert!(b.renderer().selected[&shift_view]);

    tap(&mut b, q, 1000);
    tap(&mut b, q, 2000);
    assert_eq!(b.host().text, "QQ");
    assert_eq!(b.shift_state(), ShiftState::Locked);

    tap(&mut b, shift, 3000);
    tap(&mut b, shift, 3100);
    assert_eq!(b.shift_state(), ShiftState::Disabled);
    assert!(!b.renderer().selected[&shift_view]);
}

#[test]
fn single_tap_releases_caps_lock() {
    let mut b = board(Settings::default(), Field::default());
    let shift = kind(&b, KeyKind::Shift);
    b.set_shift_state(ShiftState::Locked);
    tap(&mut b, shift, 0);
    assert_eq!(b.shift_state(), ShiftState::Disabled);
}

#[test]
fn sentences_start_uppercase() {
    let field = Field {
        policy: Autocapitalization::Sentences,
        ..Field::default()
    };
    let settings = Settings {
        auto_capitalization: true,
        ..Settings::default()
    };
    let mut b = board(settings, field);
    assert_eq!(b.shift_state(), ShiftState::Enabled);

    let h = letter(&b, "h");
    let i = letter(&b, "i");
    tap(&mut b, h, 0);
    assert_eq!(b.shift_state(), ShiftState::Disabled);
    tap(&mut b, i, 1000);
    assert_eq!(b.host().text, "Hi");

    b.host_mut().text.push_str(". ");
    b.text_did_change();
    assert_eq!(b.shift_state(), ShiftState::Enabled);
}

#[test]
fn backspace_repeats_until_release() {
    let field = Field {
        text: "abcdefgh".into(),
        ..Field::default()
    };
    let mut b = board(Settings::default(), field);
    let backspace = kind(&b, KeyKind::Backspace);
    let pos = center(&b, backspace);

    b.touch_began(1, pos, 0, None);
    let view = b.pool().view_for_key(backspace).unwrap();
    assert!(b.renderer().highlighted[&view]);
    assert_eq!(b.host().text, "abcdefg");
    assert_eq!(b.backspace_state(), BackspaceState::InitialDelay);
    assert_eq!(b.next_deadline(), Some(500));

    b.advance_time(499);
    assert_eq!(b.host().deletes, 1);
    b.advance_time(500);
    assert_eq!(b.backspace_state(), BackspaceState::Repeating);
    assert_eq!(b.host().deletes, 2);
    b.advance_time(640);
    assert_eq!(b.host().deletes, 4);
    assert_eq!(b.host().text, "abcd");

    b.touch_ended(1, pos, 650);
    assert_eq!(b.backspace_state(), BackspaceState::Idle);
    assert!(!b.renderer().highlighted[&view]);
    b.advance_time(5000);
    assert_eq!(b.host().deletes, 4);
}

#[test]
fn cancelled_backspace_stops_repeating() {
    let mut b = board(Settings::default(), Field::default());
    let backspace = kind(&b, KeyKind::Backspace);
    b.touch_began(7, center(&b, backspace), 0, None);
    b.touch_cancelled(7, 100);
    assert_eq!(b.backspace_state(), BackspaceState::Idle);
    assert_eq!(b.next_deadline(), None);
}

#[test]
fn double_space_becomes_period() {
    let settings = Settings {
        period_shortcut: true,
        ..Settings::default()
    };
    let field = Field {
        text: "Hello".into(),
        ..Field::default()
    };
    let mut b = board(settings, field);
    let space = kind(&b, KeyKind::Space);

    tap(&mut b, space, 0);
    assert_eq!(b.auto_period_state(), AutoPeriodState::FirstSpace);
    tap(&mut b, space, 100);
    assert_eq!(b.host().text, "Hello. ");
    assert_eq!(b.auto_period_state(), AutoPeriodState::NoSpace);
}

#[test]
fn double_space_after_comma_stays() {
    let settings = Settings {
        period_shortcut: true,
        ..Settings::default()
    };
    let field = Field {
        text: "Hello,".into(),
        ..Field::default()
    };
    let mut b = board(settings, field);
    let space = kind(&b, KeyKind::Space);
    tap(&mut b, space, 0);
    tap(&mut b, space, 1000);
    assert_eq!(b.host().text, "Hello,  ");
}

#[test]
fn mode_change_swaps_pages_without_new_views() {
    let mut b = board(Settings::default(), Field::default());
    let views = b.pool().len();
    let q = letter(&b, "q");
    let to_numbers = find(&b, |key| key.kind == KeyKind::ModeChange);

    tap(&mut b, to_numbers, 0);
    assert_eq!(b.page(), 1);
    assert_eq!(b.pool().len(), views);
    assert_eq!(b.renderer().created, views);
    assert!(b.pool().check_invariants().is_ok());
    assert_eq!(b.pool().view_for_key(q), None);

    let one = letter(&b, "1");
    let one_view = b.pool().view_for_key(one).unwrap();
    assert!(!b.pool().is_hidden(one_view));

    // Typing a digit stays on the numbers page; space returns to letters.
    tap(&mut b, one, 1000);
    assert_eq!(b.page(), 1);
    let space = kind(&b, KeyKind::Space);
    tap(&mut b, space, 2000);
    assert_eq!(b.page(), 0);
    assert_eq!(b.host().text, "1 ");
    assert!(b.pool().check_invariants().is_ok());
}

#[test]
fn per_slot_views_survive_page_switches() {
    let settings = Settings {
        pool_views: false,
        ..Settings::default()
    };
    let mut b = board(settings, Field::default());
    b.set_page(2);
    b.set_page(0);
    let after_first_visit = b.pool().len();
    b.set_page(2);
    b.set_page(0);
    assert_eq!(b.pool().len(), after_first_visit);
    assert!(b.pool().check_invariants().is_ok());
}

#[test]
fn missing_page_is_ignored() {
    let mut b = board(Settings::default(), Field::default());
    b.set_page(9);
    assert_eq!(b.page(), 0);
}

#[test]
fn popup_lingers_after_release() {
    let mut b = board(Settings::default(), Field::default());
    let q = letter(&b, "q");
    let q_view = b.pool().view_for_key(q).unwrap();
    let pos = center(&b, q);

    b.touch_began(1, pos, 0, None);
    assert_eq!(b.popup_preview(), PopupPreview::ShownFor(q));
    assert_eq!(b.renderer().popup, Some(q_view));

    b.touch_ended(1, pos, 30);
    assert_eq!(b.popup_preview(), PopupPreview::ShownFor(q));
    b.advance_time(79);
    assert_eq!(b.renderer().popup, Some(q_view));
    b.advance_time(80);
    assert_eq!(b.popup_preview(), PopupPreview::Hidden);
    assert_eq!(b.renderer().popup, None);
    assert_eq!(b.renderer().popups_hidden, 1);
}

#[test]
fn sliding_moves_the_popup() {
    let mut b = board(Settings::default(), Field::default());
    let q = letter(&b, "q");
    let w = letter(&b, "w");

    b.touch_began(1, center(&b, q), 0, None);
    b.touch_moved(1, center(&b, w), 20);
    assert_eq!(b.popup_preview(), PopupPreview::ShownFor(w));
    b.touch_ended(1, center(&b, w), 40);
    assert_eq!(b.host().text, "w");
}

#[test]
fn stale_timer_token_does_nothing() {
    let mut b = board(Settings::default(), Field::default());
    let q = letter(&b, "q");
    let w = letter(&b, "w");

    tap(&mut b, q, 0);
    let token = b.timers().token(TimerKind::PopupHide).unwrap();
    b.touch_began(2, center(&b, w), 40, None);
    assert!(!b.fire(token));
    assert_eq!(b.popup_preview(), PopupPreview::ShownFor(w));
}

#[test]
fn clicks_follow_the_setting() {
    let settings = Settings {
        keyboard_clicks: true,
        ..Settings::default()
    };
    let mut b = board(settings, Field::default());
    let q = letter(&b, "q");
    tap(&mut b, q, 0);
    assert_eq!(b.host().clicks, 1);

    let mut quiet = board(Settings::default(), Field::default());
    tap(&mut quiet, q, 0);
    assert_eq!(quiet.host().clicks, 0);
}

#[test]
fn globe_key_advances_input_mode() {
    let mut b = board(Settings::default(), Field::default());
    let globe = kind(&b, KeyKind::KeyboardChange);
    tap(&mut b, globe, 0);
    assert_eq!(b.host().advanced, 1);
    assert_eq!(b.host().text, "");
}

#[test]
fn rotation_cancels_held_keys() {
    let mut b = board(Settings::default(), Field::default());
    let backspace = kind(&b, KeyKind::Backspace);
    b.touch_began(1, center(&b, backspace), 0, None);

    let height = b.will_rotate(Orientation::Landscape);
    assert_eq!(height, 162.0);
    assert_eq!(b.backspace_state(), BackspaceState::Idle);
    assert_eq!(b.next_deadline(), None);
}

#[test]
fn resize_cancels_the_held_key() {
    let mut b = board(Settings::default(), Field::default());
    let q = letter(&b, "q");
    let pos = center(&b, q);

    b.touch_began(1, pos, 0, None);
    assert_eq!(b.popup_preview(), PopupPreview::ShownFor(q));
    b.layout(Rect::new(0.0, 0.0, 320.0, 260.0));
    assert_eq!(b.popup_preview(), PopupPreview::Hidden);
    b.touch_ended(1, pos, 30);
    assert_eq!(b.host().text, "");
    assert!(b.pool().check_invariants().is_ok());

    // The next touch lands on the rebound views.
    let q_pos = center(&b, q);
    b.touch_began(2, q_pos, 1000, None);
    b.touch_ended(2, q_pos, 1030);
    assert_eq!(b.host().text, "q");
}

#[test]
fn resize_stops_backspace_repeat() {
    let field = Field {
        text: "abc".into(),
        ..Field::default()
    };
    let mut b = board(Settings::default(), field);
    let backspace = kind(&b, KeyKind::Backspace);
    b.touch_began(1, center(&b, backspace), 0, None);
    b.layout(Rect::new(0.0, 0.0, 320.0, 260.0));
    assert_eq!(b.backspace_state(), BackspaceState::Idle);
    b.advance_time(2000);
    assert_eq!(b.host().text, "ab");
}

#[test]
fn empty_bounds_keep_previous_layout() {
    let mut b = board(Settings::default(), Field::default());
    b.layout(Rect::ZERO);
    assert_eq!(b.bounds(), Some(SURFACE));

    let mut fresh =
        KeyboardController::new(default_keyboard(), Settings::default(), Field::default(), ());
    fresh.layout(Rect::new(0.0, 0.0, 320.0, 0.0));
    assert_eq!(fresh.bounds(), None);
    assert!(fresh.pool().is_empty());
}

#[test]
fn trait_poll_repaints_on_theme_change() {
    let settings = Settings {
        timing: Timing {
            trait_poll_interval_ms: Some(1000),
            ..Timing::default()
        },
        ..Settings::default()
    };
    let mut b = board(settings, Field::default());
    let painted = b.renderer().appearances;

    b.advance_time(1000);
    assert_eq!(b.renderer().appearances, painted);

    b.host_mut().env.dark = true;
    b.advance_time(2000);
    assert!(b.environment().dark);
    assert!(b.renderer().appearances > painted);
}
