// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Metric tables that drive the layout calculator.

use crate::threshold::ThresholdTable;

/// Portrait and landscape variants of a metric.
#[derive(Clone, Debug, PartialEq)]
pub struct ByOrientation<T> {
    /// Used when the drawing area is portrait.
    pub portrait: T,
    /// Used when the drawing area is landscape.
    pub landscape: T,
}

impl<T> ByOrientation<T> {
    /// Picks the variant for `landscape`.
    pub fn get(&self, landscape: bool) -> &T {
        if landscape {
            &self.landscape
        } else {
            &self.portrait
        }
    }
}

/// Every tunable number the calculator uses.
///
/// [`Default`] reproduces the stock metrics. Widths fed to the tables are
/// drawing-area widths in points unless a field says otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConstants {
    /// Left/right margin. The bottom margin equals it.
    pub side_edges: ByOrientation<ThresholdTable>,
    /// Margin above the first row.
    pub top_edge: ByOrientation<ThresholdTable>,
    /// Width the keyboard area shrinks to on wide landscape phones, looked up by
    /// usable width.
    pub shrunk_size: ThresholdTable,
    /// Usable width from which a landscape phone keyboard shrinks.
    pub shrink_threshold: f64,
    /// Gap between rows.
    pub row_gap: ByOrientation<ThresholdTable>,
    /// Portrait gap above the last row, used only in the bracket named by
    /// [`last_row_gap_bracket`](Self::last_row_gap_bracket).
    pub last_row_gap_portrait: f64,
    /// Bracket of the portrait row-gap table that uses the special last gap.
    pub last_row_gap_bracket: usize,
    /// Regular key gap.
    pub key_gap_normal: f64,
    /// Key gap for compressed rows and shrunk keyboards.
    pub key_gap_small: f64,
    /// Portrait width below which compressed rows use the small gap.
    pub key_gap_uncompress_width: f64,
    /// Longest-row key count from which a page counts as compressed.
    pub compressed_threshold: usize,
    /// Slope of the flanking-key width as a function of side space.
    pub flexible_end_m: ByOrientation<f64>,
    /// Intercept of the flanking-key width as a function of side space.
    pub flexible_end_c: ByOrientation<f64>,
    /// Minimum number of standard keys a flanked row is widened to.
    pub minimum_standard_keys: f64,
    /// Key gap in the special (space bar) row.
    pub last_row_key_gap: ByOrientation<ThresholdTable>,
    /// Share of the row width given to the keys left of space.
    pub last_row_left_ratio: ByOrientation<f64>,
    /// Share of the row width given to the keys right of space.
    pub last_row_right_ratio: ByOrientation<f64>,
    /// Width of a third key left of space relative to the other two (portrait).
    pub mic_ratio: f64,
    /// Vertical gap between a popup and its key.
    pub popup_gap: f64,
    /// How much wider a popup is than its key.
    pub popup_width_increment: f64,
    /// Popup height plus gap plus key height, by device screen width.
    pub popup_total_height: ThresholdTable,
    /// Inset from the container edges that a popup must respect.
    pub popup_edge_inset: f64,
}

fn table(values: &[f64], breakpoints: &[f64]) -> ThresholdTable {
    ThresholdTable::new(values, breakpoints).unwrap_or_else(|_| ThresholdTable::constant(values[0]))
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            side_edges: ByOrientation {
                portrait: table(&[3.0, 4.0], &[400.0]),
                landscape: ThresholdTable::constant(3.0),
            },
            top_edge: ByOrientation {
                portrait: table(&[12.0, 10.0, 8.0], &[350.0, 400.0]),
                landscape: ThresholdTable::constant(6.0),
            },
            shrunk_size: table(&[522.0, 524.0], &[700.0]),
            shrink_threshold: 600.0,
            row_gap: ByOrientation {
                portrait: table(&[15.0, 11.0, 10.0], &[350.0, 400.0]),
                landscape: ThresholdTable::constant(7.0),
            },
            last_row_gap_portrait: 9.0,
            last_row_gap_bracket: 1,
            key_gap_normal: 6.0,
            key_gap_small: 5.0,
            key_gap_uncompress_width: 350.0,
            compressed_threshold: 11,
            flexible_end_m: ByOrientation {
                portrait: 1.0,
                landscape: 0.9231,
            },
            flexible_end_c: ByOrientation {
                portrait: -14.0,
                landscape: -9.4615,
            },
            minimum_standard_keys: 7.0,
            last_row_key_gap: ByOrientation {
                portrait: ThresholdTable::constant(6.0),
                landscape: table(&[8.0, 7.0, 5.0], &[500.0, 700.0]),
            },
            last_row_left_ratio: ByOrientation {
                portrait: 0.24,
                landscape: 0.19,
            },
            last_row_right_ratio: ByOrientation {
                portrait: 0.24,
                landscape: 0.19,
            },
            mic_ratio: 0.765,
            popup_gap: 8.0,
            popup_width_increment: 26.0,
            popup_total_height: table(&[102.0, 108.0], &[350.0]),
            popup_edge_inset: 3.0,
        }
    }
}

impl LayoutConstants {
    /// Side margin for a drawing area of `width`.
    pub fn side_edges(&self, width: f64, landscape: bool) -> f64 {
        self.side_edges.get(landscape).lookup(width)
    }

    /// Top margin for a drawing area of `width`.
    pub fn top_edge(&self, width: f64, landscape: bool) -> f64 {
        self.top_edge.get(landscape).lookup(width)
    }

    /// Regular row gap.
    pub fn row_gap(&self, width: f64, landscape: bool) -> f64 {
        self.row_gap.get(landscape).lookup(width)
    }

    /// Gap above the last row.
    pub fn last_row_gap(&self, width: f64, landscape: bool) -> f64 {
        let table = self.row_gap.get(landscape);
        if !landscape && table.bracket(width) == self.last_row_gap_bracket {
            self.last_row_gap_portrait
        } else {
            table.lookup(width)
        }
    }

    /// Returns `true` if a page whose longest row has `keys_in_row` keys is compressed.
    pub fn is_compressed(&self, keys_in_row: usize) -> bool {
        keys_in_row >= self.compressed_threshold
    }

    /// Key gap for a page whose longest row has `keys_in_row` keys.
    pub fn key_gap(&self, width: f64, keys_in_row: usize, landscape: bool, shrunk: bool) -> f64 {
        let compressed = self.is_compressed(keys_in_row);
        let small = if landscape {
            compressed || shrunk
        } else {
            compressed && width < self.key_gap_uncompress_width
        };
        if small {
            self.key_gap_small
        } else {
            self.key_gap_normal
        }
    }

    /// Width the keyboard area shrinks to, or `None` when it keeps `usable_width`.
    ///
    /// Only landscape phones shrink.
    pub fn shrunk_width(&self, usable_width: f64, landscape: bool, tablet: bool) -> Option<f64> {
        (landscape && !tablet && usable_width >= self.shrink_threshold)
            .then(|| self.shrunk_size.lookup(usable_width))
    }

    /// Popup height plus gap plus key height for a device `screen_width` wide.
    pub fn popup_total_height(&self, screen_width: f64) -> f64 {
        self.popup_total_height.lookup(screen_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_row_gap_only_differs_in_middle_bracket() {
        let c = LayoutConstants::default();
        assert_eq!(c.last_row_gap(320.0, false), 15.0);
        assert_eq!(c.last_row_gap(375.0, false), 9.0);
        assert_eq!(c.last_row_gap(414.0, false), 10.0);
        assert_eq!(c.last_row_gap(375.0, true), 7.0);
    }

    #[test]
    fn key_gap_rules() {
        let c = LayoutConstants::default();
        assert_eq!(c.key_gap(320.0, 10, false, false), 6.0);
        assert_eq!(c.key_gap(320.0, 11, false, false), 5.0);
        assert_eq!(c.key_gap(375.0, 11, false, false), 6.0);
        assert_eq!(c.key_gap(568.0, 10, true, false), 6.0);
        assert_eq!(c.key_gap(736.0, 10, true, true), 5.0);
    }

    #[test]
    fn only_landscape_phones_shrink() {
        let c = LayoutConstants::default();
        assert_eq!(c.shrunk_width(661.0, true, false), Some(522.0));
        assert_eq!(c.shrunk_width(730.0, true, false), Some(524.0));
        assert_eq!(c.shrunk_width(730.0, true, true), None);
        assert_eq!(c.shrunk_width(730.0, false, false), None);
        assert_eq!(c.shrunk_width(561.0, true, false), None);
    }
}
