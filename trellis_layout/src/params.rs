// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-element inputs of a layout pass.

use kurbo::Insets;

use crate::alignment::{HorizontalAlignment, VerticalAlignment, Visibility};

/// Snapshot of the layout-affecting properties of one element.
///
/// `width`/`height` are `NaN` when unset (size to content).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutParams {
    /// Explicit width, or `NaN`.
    pub width: f64,
    /// Explicit height, or `NaN`.
    pub height: f64,
    /// Lower width bound.
    pub min_width: f64,
    /// Upper width bound.
    pub max_width: f64,
    /// Lower height bound.
    pub min_height: f64,
    /// Upper height bound.
    pub max_height: f64,
    /// Space reserved outside the element.
    pub margin: Insets,
    /// Space reserved between the element's edge and its content.
    pub padding: Insets,
    /// Horizontal placement in the slot.
    pub horizontal_alignment: HorizontalAlignment,
    /// Vertical placement in the slot.
    pub vertical_alignment: VerticalAlignment,
    /// Collapsed elements take no space.
    pub visibility: Visibility,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            width: f64::NAN,
            height: f64::NAN,
            min_width: 0.0,
            max_width: f64::INFINITY,
            min_height: 0.0,
            max_height: f64::INFINITY,
            margin: Insets::ZERO,
            padding: Insets::ZERO,
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
            visibility: Visibility::Visible,
        }
    }
}

impl LayoutParams {
    /// Effective `(min, max)` width, folding in the explicit width.
    #[must_use]
    pub fn width_bounds(&self) -> (f64, f64) {
        bounded_measure(self.width, self.min_width, self.max_width)
    }

    /// Effective `(min, max)` height, folding in the explicit height.
    #[must_use]
    pub fn height_bounds(&self) -> (f64, f64) {
        bounded_measure(self.height, self.min_height, self.max_height)
    }
}

/// Folds an explicit size into min/max bounds.
///
/// An explicit value pins both bounds (still subject to `min` winning over
/// `max`); `NaN` leaves the bounds as given.
///
/// ```rust
/// use trellis_layout::bounded_measure;
///
/// assert_eq!(bounded_measure(f64::NAN, 50.0, 100.0), (50.0, 100.0));
/// assert_eq!(bounded_measure(80.0, 50.0, 100.0), (80.0, 80.0));
/// assert_eq!(bounded_measure(10.0, 50.0, 100.0), (50.0, 50.0));
/// ```
#[must_use]
pub fn bounded_measure(explicit: f64, min: f64, max: f64) -> (f64, f64) {
    let upper = if explicit.is_nan() {
        f64::INFINITY
    } else {
        explicit
    };
    let max = upper.min(max).max(min);
    let lower = if explicit.is_nan() { 0.0 } else { explicit };
    let min = max.min(lower).max(min);
    (min, max)
}

/// Parses a style length: a number, `auto` (`NaN`) or `infinity`.
#[must_use]
pub fn parse_length(text: &str) -> Option<f64> {
    let text = text.trim();
    let text = text.strip_suffix("px").unwrap_or(text);
    if text.eq_ignore_ascii_case("auto") {
        return Some(f64::NAN);
    }
    if text.eq_ignore_ascii_case("infinity") || text.eq_ignore_ascii_case("inf") {
        return Some(f64::INFINITY);
    }
    text.parse().ok()
}

/// Parses style insets: one value (uniform), two (horizontal vertical) or four
/// (left top right bottom), separated by whitespace or commas.
#[must_use]
pub fn parse_insets(text: &str) -> Option<Insets> {
    let mut values = [0.0_f64; 4];
    let mut count = 0;
    for part in text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
    {
        if count == 4 {
            return None;
        }
        values[count] = parse_length(part).filter(|v| v.is_finite())?;
        count += 1;
    }
    match count {
        1 => Some(Insets::uniform(values[0])),
        2 => Some(Insets::uniform_xy(values[0], values[1])),
        4 => Some(Insets::new(values[0], values[1], values[2], values[3])),
        _ => None,
    }
}
