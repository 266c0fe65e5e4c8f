// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measure bounds and caching.

use kurbo::{Insets, Rect, Size};
use proptest::prelude::*;
use trellis_layout::{
    ArrangeOptions, LayoutCache, LayoutParams, Visibility, arrange_core, measure_core,
};

#[test]
fn min_width_beats_small_available() {
    let params = LayoutParams {
        min_width: 50.0,
        max_width: 100.0,
        ..LayoutParams::default()
    };
    let desired = measure_core(&params, Size::new(30.0, 30.0), |avail| {
        assert_eq!(avail.width, 50.0, "content is offered at least the minimum");
        Size::new(10.0, 10.0)
    });
    assert_eq!(desired.width, 50.0);
}

#[test]
fn max_width_caps_greedy_content() {
    let params = LayoutParams {
        max_width: 100.0,
        ..LayoutParams::default()
    };
    let desired = measure_core(&params, Size::new(f64::INFINITY, 30.0), |_| {
        Size::new(400.0, 10.0)
    });
    assert_eq!(desired.width, 100.0);
}

fn length() -> impl Strategy<Value = f64> {
    prop_oneof![Just(f64::NAN), 0.0..500.0_f64]
}

fn params() -> impl Strategy<Value = LayoutParams> {
    (
        length(),
        length(),
        0.0..100.0_f64,
        0.0..400.0_f64,
        0.0..20.0_f64,
        prop_oneof![
            Just(Visibility::Visible),
            Just(Visibility::Hidden),
            Just(Visibility::Collapsed)
        ],
    )
        .prop_map(|(width, height, min, extra, margin, visibility)| LayoutParams {
            width,
            height,
            min_width: min,
            max_width: min + extra,
            margin: Insets::uniform(margin),
            visibility,
            ..LayoutParams::default()
        })
}

fn available() -> impl Strategy<Value = Size> {
    let axis = || prop_oneof![Just(f64::INFINITY), Just(f64::NAN), 0.0..1000.0_f64];
    (axis(), axis()).prop_map(|(w, h)| Size::new(w, h))
}

proptest! {
    #[test]
    fn measuring_twice_is_bit_identical(
        params in params(),
        available in available(),
        content in (0.0..600.0_f64, 0.0..600.0_f64),
    ) {
        let content = Size::new(content.0, content.1);
        let mut cache = LayoutCache::new();
        let first = cache.measure_with(available, |a| measure_core(&params, a, |_| content));
        let second = cache.measure_with(available, |a| measure_core(&params, a, |_| Size::new(1.0, 1.0)));
        prop_assert_eq!(first.width.to_bits(), second.width.to_bits());
        prop_assert_eq!(first.height.to_bits(), second.height.to_bits());

        // Without the cache the computation is deterministic as well.
        let fresh = measure_core(&params, available, |_| content);
        prop_assert_eq!(first.width.to_bits(), fresh.width.to_bits());
    }

    #[test]
    fn desired_size_respects_bounds(
        params in params(),
        available in available(),
        content in (0.0..600.0_f64, 0.0..600.0_f64),
    ) {
        let desired = measure_core(&params, available, |_| Size::new(content.0, content.1));
        prop_assert!(desired.width >= 0.0 && desired.height >= 0.0);
        prop_assert!(desired.is_finite());
        if params.visibility != Visibility::Collapsed {
            let (min, max) = params.width_bounds();
            let inner = desired.width - params.margin.x_value();
            prop_assert!(inner + 1e-9 >= min);
            prop_assert!(inner <= max + 1e-9);
        }
    }

    #[test]
    fn used_size_fits_candidate(
        params in params(),
        desired in (0.0..300.0_f64, 0.0..300.0_f64),
        slot in (0.0..300.0_f64, 0.0..300.0_f64),
    ) {
        let rect = Rect::new(0.0, 0.0, slot.0, slot.1);
        let outcome = arrange_core(
            &params,
            Size::new(desired.0, desired.1),
            rect,
            ArrangeOptions::empty(),
            |s, _| Size::new(s.width * 2.0, s.height * 2.0),
        );
        prop_assert!(outcome.used_size.width >= 0.0 && outcome.used_size.height >= 0.0);
        if params.visibility != Visibility::Collapsed {
            prop_assert!(outcome.used_size.width <= desired.0.max(0.0) + 1e-9);
        }
    }
}
