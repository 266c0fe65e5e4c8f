// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The framework half of measure and arrange.
//!
//! [`measure_core`] and [`arrange_core`] apply margins, explicit sizes,
//! min/max bounds and alignment around an element-specific override, so
//! element implementations only ever see their content box.

use kurbo::{Rect, Size, Vec2};

use crate::alignment::{
    ArrangeOptions, HorizontalAlignment, VerticalAlignment, Visibility, horizontal_offset,
    vertical_offset,
};
use crate::params::LayoutParams;

/// Result of arranging one element.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ArrangeOutcome {
    /// Size the element occupies, excluding margin.
    pub used_size: Size,
    /// Position of the element's border box relative to its slot's origin.
    pub render_offset: Vec2,
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Measures an element.
///
/// `available` may be infinite or `NaN` in either dimension; both mean
/// "unconstrained". `measure_override` receives the space left for content
/// after margins and bounds and returns the content's natural size. The
/// result includes the margin and is never negative.
///
/// ```rust
/// use kurbo::Size;
/// use trellis_layout::{LayoutParams, measure_core};
///
/// let params = LayoutParams { min_width: 50.0, max_width: 100.0, ..LayoutParams::default() };
/// let desired = measure_core(&params, Size::new(30.0, 30.0), |_| Size::ZERO);
/// assert_eq!(desired.width, 50.0);
/// ```
pub fn measure_core(
    params: &LayoutParams,
    available: Size,
    measure_override: impl FnOnce(Size) -> Size,
) -> Size {
    if params.visibility == Visibility::Collapsed {
        return Size::ZERO;
    }
    let unconstrained = |v: f64| if v.is_nan() { f64::INFINITY } else { v };
    let x_margin = params.margin.x_value();
    let y_margin = params.margin.y_value();
    let (min_width, max_width) = params.width_bounds();
    let (min_height, max_height) = params.height_bounds();

    let sans_margin_w = (unconstrained(available.width) - x_margin).max(0.0);
    let sans_margin_h = (unconstrained(available.height) - y_margin).max(0.0);
    let tentative = Size::new(
        sans_margin_w.min(max_width).max(min_width),
        sans_margin_h.min(max_height).max(min_height),
    );

    let measured = measure_override(tentative);
    if !measured.is_finite() || measured.width < 0.0 || measured.height < 0.0 {
        tracing::trace!(?measured, "measure override returned an invalid size");
    }
    let measured_w = non_negative(measured.width).min(max_width).max(min_width);
    let measured_h = non_negative(measured.height).min(max_height).max(min_height);

    Size::new(
        non_negative(x_margin + measured_w),
        non_negative(y_margin + measured_h),
    )
}

/// Arranges an element inside `final_rect`, the slot chosen by its parent.
///
/// `desired` is the element's measured size (including margin).
/// `arrange_override` receives the size offered to the content and returns
/// the size it actually used, which is clamped to the offer.
pub fn arrange_core(
    params: &LayoutParams,
    desired: Size,
    final_rect: Rect,
    options: ArrangeOptions,
    arrange_override: impl FnOnce(Size, ArrangeOptions) -> Size,
) -> ArrangeOutcome {
    if params.visibility == Visibility::Collapsed {
        return ArrangeOutcome::default();
    }
    let margin = params.margin;
    let slot_sans_margin = Size::new(
        (final_rect.width() - margin.x_value()).max(0.0),
        (final_rect.height() - margin.y_value()).max(0.0),
    );

    let fill = options.contains(ArrangeOptions::FILL);
    let h_align = if fill {
        HorizontalAlignment::Stretch
    } else {
        params.horizontal_alignment
    };
    let v_align = if fill {
        VerticalAlignment::Stretch
    } else {
        params.vertical_alignment
    };

    let mut desired_w = desired.width;
    let mut desired_h = desired.height;
    if params.width.is_nan() && h_align == HorizontalAlignment::Stretch {
        desired_w = final_rect.width();
    }
    if params.height.is_nan() && v_align == VerticalAlignment::Stretch {
        desired_h = final_rect.height();
    }

    let candidate = Size::new(
        non_negative(desired_w - margin.x_value()),
        non_negative(desired_h - margin.y_value()),
    );
    let used = arrange_override(candidate, options);
    let used_size = Size::new(
        non_negative(used.width).min(candidate.width),
        non_negative(used.height).min(candidate.height),
    );

    let placement_h = if fill {
        HorizontalAlignment::Left
    } else {
        h_align
    };
    let placement_v = if fill {
        VerticalAlignment::Top
    } else {
        v_align
    };
    let render_offset = Vec2::new(
        margin.x0 + horizontal_offset(slot_sans_margin.width, used_size.width, placement_h),
        margin.y0 + vertical_offset(slot_sans_margin.height, used_size.height, placement_v),
    );

    ArrangeOutcome {
        used_size,
        render_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Insets;

    #[test]
    fn margin_is_added_to_content() {
        let params = LayoutParams {
            margin: Insets::uniform(5.0),
            ..LayoutParams::default()
        };
        let mut offered = Size::ZERO;
        let desired = measure_core(&params, Size::new(100.0, 100.0), |avail| {
            offered = avail;
            Size::new(20.0, 10.0)
        });
        assert_eq!(offered, Size::new(90.0, 90.0));
        assert_eq!(desired, Size::new(30.0, 20.0));
    }

    #[test]
    fn unconstrained_available_reaches_override() {
        let params = LayoutParams::default();
        let mut offered = Size::ZERO;
        let desired = measure_core(&params, Size::new(f64::NAN, f64::INFINITY), |avail| {
            offered = avail;
            Size::new(42.0, 7.0)
        });
        assert!(offered.width.is_infinite() && offered.height.is_infinite());
        assert_eq!(desired, Size::new(42.0, 7.0));
    }

    #[test]
    fn garbage_override_results_are_sanitized() {
        let params = LayoutParams::default();
        let desired = measure_core(&params, Size::new(10.0, 10.0), |_| {
            Size::new(f64::NAN, -3.0)
        });
        assert_eq!(desired, Size::ZERO);
    }

    #[test]
    fn explicit_size_overrides_content() {
        let params = LayoutParams {
            width: 64.0,
            height: 32.0,
            ..LayoutParams::default()
        };
        let desired = measure_core(&params, Size::new(10.0, 10.0), |_| Size::new(500.0, 500.0));
        assert_eq!(desired, Size::new(64.0, 32.0));
    }

    #[test]
    fn collapsed_takes_no_space() {
        let params = LayoutParams {
            visibility: Visibility::Collapsed,
            width: 10.0,
            ..LayoutParams::default()
        };
        let desired = measure_core(&params, Size::new(10.0, 10.0), |_| unreachable!());
        assert_eq!(desired, Size::ZERO);
    }

    #[test]
    fn stretch_fills_slot() {
        let params = LayoutParams {
            horizontal_alignment: HorizontalAlignment::Stretch,
            margin: Insets::uniform_xy(10.0, 0.0),
            ..LayoutParams::default()
        };
        let slot = Rect::new(0.0, 0.0, 200.0, 50.0);
        let outcome = arrange_core(&params, Size::new(40.0, 20.0), slot, ArrangeOptions::empty(), |s, _| s);
        assert_eq!(outcome.used_size, Size::new(180.0, 20.0));
        assert_eq!(outcome.render_offset, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn alignment_positions_used_size() {
        let params = LayoutParams {
            horizontal_alignment: HorizontalAlignment::Right,
            vertical_alignment: VerticalAlignment::Center,
            ..LayoutParams::default()
        };
        let slot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let outcome = arrange_core(&params, Size::new(20.0, 40.0), slot, ArrangeOptions::empty(), |s, _| s);
        assert_eq!(outcome.used_size, Size::new(20.0, 40.0));
        assert_eq!(outcome.render_offset, Vec2::new(80.0, 30.0));
    }

    #[test]
    fn fill_ignores_alignment() {
        let params = LayoutParams {
            horizontal_alignment: HorizontalAlignment::Right,
            ..LayoutParams::default()
        };
        let slot = Rect::new(0.0, 0.0, 100.0, 60.0);
        let outcome = arrange_core(&params, Size::new(20.0, 20.0), slot, ArrangeOptions::FILL, |s, _| s);
        assert_eq!(outcome.used_size, Size::new(100.0, 60.0));
        assert_eq!(outcome.render_offset, Vec2::ZERO);
    }

    #[test]
    fn override_cannot_exceed_candidate() {
        let params = LayoutParams::default();
        let slot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let outcome = arrange_core(&params, Size::new(30.0, 30.0), slot, ArrangeOptions::empty(), |_, _| {
            Size::new(1000.0, 1000.0)
        });
        assert_eq!(outcome.used_size, Size::new(30.0, 30.0));
    }
}
