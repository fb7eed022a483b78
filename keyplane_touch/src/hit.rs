// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-view hit testing.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`
use kurbo::{Point, Rect};

/// Distance from `pos` to the closest point of `rect`; zero inside.
pub fn distance_to_rect(rect: Rect, pos: Point) -> f64 {
    let rect = rect.abs();
    let closest = Point::new(pos.x.clamp(rect.x0, rect.x1), pos.y.clamp(rect.y0, rect.y1));
    let dx = closest.x - pos.x;
    let dy = closest.y - pos.y;
    (dx * dx + dy * dy).sqrt()
}

/// Picks the candidate closest to `pos`.
///
/// Points outside `bounds` resolve to nothing. Among equally close candidates
/// the first one wins, so callers control tie-breaking through iteration order.
/// Every touch inside `bounds` lands somewhere as long as there is a candidate,
/// which keeps gaps between keys from swallowing taps.
pub fn nearest_view<V>(
    candidates: impl IntoIterator<Item = (V, Rect)>,
    pos: Point,
    bounds: Rect,
) -> Option<V> {
    if !bounds.contains(pos) {
        return None;
    }
    let mut best: Option<(V, f64)> = None;
    for (view, rect) in candidates {
        let distance = distance_to_rect(rect, pos);
        if best.as_ref().is_none_or(|&(_, d)| distance < d) {
            best = Some((view, distance));
        }
    }
    best.map(|(view, _)| view)
}
