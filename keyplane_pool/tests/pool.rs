// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pool behavior across page switches.

use std::collections::HashMap;

use keyplane_layout::{DeviceClass, LayoutCalculator, LayoutParams, PageFrames};
use keyplane_pool::{PoolMode, ViewId, ViewPool, ViewSink};
use keyplane_table::{KeyKind, Keyboard, default_keyboard};
use kurbo::Rect;

#[derive(Default)]
struct Recorder {
    created: Vec<ViewId>,
    frames: HashMap<ViewId, Rect>,
    hidden: HashMap<ViewId, bool>,
}

impl ViewSink for Recorder {
    fn create_view(&mut self, view: ViewId) {
        self.created.push(view);
        self.hidden.insert(view, true);
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) {
        self.frames.insert(view, frame);
    }

    fn set_hidden(&mut self, view: ViewId, hidden: bool) {
        self.hidden.insert(view, hidden);
    }
}

fn pages(kb: &Keyboard) -> Vec<PageFrames> {
    let calc = LayoutCalculator::default();
    let params = LayoutParams::new(
        Rect::new(0.0, 0.0, 320.0, 216.0),
        DeviceClass::Phone,
        2.0,
    );
    (0..kb.page_count())
        .map(|p| calc.layout_page(kb, p, &params).unwrap())
        .collect()
}

fn assert_sink_agrees(pool: &ViewPool, sink: &Recorder) {
    for &view in &sink.created {
        assert_eq!(sink.hidden[&view], pool.is_hidden(view), "hidden flag of {view:?}");
        if !pool.is_hidden(view) {
            assert_eq!(sink.frames[&view], pool.frame_of(view).unwrap());
        }
    }
}

#[test]
fn reset_then_request_returns_the_freed_view() {
    let kb = default_keyboard();
    let frames = pages(&kb);
    let mut sink = Recorder::default();
    let mut pool = ViewPool::new(PoolMode::Pooled);
    pool.place_page(&frames[0], &mut sink);

    let space = frames[0]
        .slots()
        .iter()
        .find(|s| kb.key(s.slot.key).kind == KeyKind::Space)
        .unwrap();
    let view = pool.view_for_key(space.slot.key).unwrap();

    pool.reset_pool(&mut sink);
    assert!(pool.is_hidden(view));
    assert_eq!(pool.view_for_key(space.slot.key), None);
    assert_eq!(pool.request_view(space.frame), Some(view));
    assert_eq!(pool.request_view(space.frame), None);
}

#[test]
fn page_switch_reuses_matching_sizes() {
    let kb = default_keyboard();
    let frames = pages(&kb);
    let mut sink = Recorder::default();
    let mut pool = ViewPool::new(PoolMode::Pooled);

    pool.place_page(&frames[0], &mut sink);
    let q_view = pool.view_for_key(frames[0].slots()[0].slot.key).unwrap();
    pool.place_page(&frames[1], &mut sink);
    pool.check_invariants().unwrap();
    assert_sink_agrees(&pool, &sink);

    // Nothing new: the numbers page needs no more views than the letters page.
    assert_eq!(sink.created.len(), frames[0].len());
    assert_eq!(pool.visible_views().count(), frames[1].len());

    // The digit "1" has the same size as "q" and takes a view of that size.
    let one = frames[1].slots()[0];
    let one_view = pool.view_for_key(one.slot.key).unwrap();
    assert_eq!(pool.frame_of(one_view).unwrap().size(), one.frame.size());
    assert!(!pool.is_hidden(one_view));
    assert_eq!(pool.key_for_view(q_view).is_some(), !pool.is_hidden(q_view));

    for slot in frames[1].slots() {
        let view = pool.view_for_key(slot.slot.key).unwrap();
        assert_eq!(pool.key_for_view(view), Some(slot.slot.key));
        assert_eq!(pool.frame_of(view), Some(slot.frame));
    }
    for slot in frames[0].slots() {
        if !kb.pages()[1].contains(slot.slot.key) {
            assert_eq!(pool.view_for_key(slot.slot.key), None);
        }
    }
}

#[test]
fn cycling_pages_never_grows_past_the_largest_page() {
    let kb = default_keyboard();
    let frames = pages(&kb);
    let mut sink = Recorder::default();
    let mut pool = ViewPool::new(PoolMode::Pooled);
    let largest = frames.iter().map(PageFrames::len).max().unwrap();
    for _ in 0..3 {
        for page in &frames {
            pool.place_page(page, &mut sink);
            pool.check_invariants().unwrap();
            assert_sink_agrees(&pool, &sink);
        }
    }
    assert_eq!(pool.len(), largest);
}

#[test]
fn bind_view_keeps_mapping_bijective() {
    let kb = default_keyboard();
    let frames = pages(&kb);
    let mut sink = Recorder::default();
    let mut pool = ViewPool::new(PoolMode::Pooled);
    pool.place_page(&frames[0], &mut sink);

    let a = frames[0].slots()[0];
    let b = frames[0].slots()[1];
    let view_a = pool.view_for_key(a.slot.key).unwrap();
    let view_b = pool.view_for_key(b.slot.key).unwrap();

    // Rebinding b's key onto a's view releases both previous partners.
    pool.bind_view(view_a, b.slot.key, b.frame, &mut sink);
    pool.check_invariants().unwrap();
    assert_eq!(pool.view_for_key(b.slot.key), Some(view_a));
    assert_eq!(pool.view_for_key(a.slot.key), None);
    assert_eq!(pool.key_for_view(view_b), None);
    assert!(pool.is_hidden(view_b));
    assert_eq!(pool.request_view(b.frame), Some(view_b));
}

#[test]
fn per_slot_mode_gives_shared_keys_one_view_per_page() {
    let kb = default_keyboard();
    let frames = pages(&kb);
    let mut sink = Recorder::default();
    let mut pool = ViewPool::new(PoolMode::PerSlot);

    let space = frames[0]
        .slots()
        .iter()
        .find(|s| kb.key(s.slot.key).kind == KeyKind::Space)
        .unwrap()
        .slot
        .key;

    pool.place_page(&frames[0], &mut sink);
    let on_letters = pool.view_for_key(space).unwrap();
    pool.place_page(&frames[1], &mut sink);
    let on_numbers = pool.view_for_key(space).unwrap();
    assert_ne!(on_letters, on_numbers);
    assert!(pool.is_hidden(on_letters));
    assert_eq!(pool.len(), frames[0].len() + frames[1].len());
    assert_eq!(pool.visible_views().count(), frames[1].len());
    pool.check_invariants().unwrap();

    pool.place_page(&frames[0], &mut sink);
    assert_eq!(pool.view_for_key(space), Some(on_letters));
    assert_eq!(pool.len(), frames[0].len() + frames[1].len());
    assert_sink_agrees(&pool, &sink);
}

#[test]
fn visible_views_are_in_creation_order() {
    let kb = default_keyboard();
    let frames = pages(&kb);
    let mut pool = ViewPool::new(PoolMode::Pooled);
    pool.place_page(&frames[0], &mut ());
    let ids: Vec<usize> = pool.visible_views().map(|(v, _)| v.index()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}
