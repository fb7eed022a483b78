// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device classes, orientation, and pixel snapping.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::Rect;

/// Hardware class that selects between phone and tablet metrics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Handheld device.
    #[default]
    Phone,
    /// Large-screen device. Never shrinks its keyboard area.
    Tablet,
}

/// Interface orientation as reported by the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
}

impl Orientation {
    /// Returns `true` for [`Orientation::Landscape`].
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Landscape)
    }
}

/// Width-to-height ratio from which a drawing area counts as landscape.
pub const LANDSCAPE_RATIO: f64 = 2.0;

/// Returns `true` when `bounds` is at least twice as wide as it is tall.
///
/// The keyboard area itself decides orientation for layout purposes, so a
/// portrait device with an unusually short keyboard lays out as landscape.
pub fn is_landscape(bounds: Rect) -> bool {
    let height = bounds.height();
    height > 0.0 && bounds.width() / height >= LANDSCAPE_RATIO
}

/// Snaps `x` to the nearest device pixel at `scale` pixels per point.
pub fn rounded(x: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return x;
    }
    (x * scale).round() / scale
}

/// Canonical keyboard height in points for the device, orientation, and
/// physical screen width in points.
pub fn keyboard_height(device: DeviceClass, orientation: Orientation, screen_width: f64) -> f64 {
    match (device, orientation) {
        (DeviceClass::Tablet, Orientation::Portrait) => 264.0,
        (DeviceClass::Tablet, Orientation::Landscape) => 352.0,
        (DeviceClass::Phone, Orientation::Portrait) if screen_width >= 400.0 => 226.0,
        (DeviceClass::Phone, Orientation::Portrait) => 216.0,
        (DeviceClass::Phone, Orientation::Landscape) => 162.0,
    }
}
