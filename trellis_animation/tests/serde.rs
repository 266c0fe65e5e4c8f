// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serialized curve keys rebuild the same curve.

#![cfg(feature = "serde")]

use trellis_animation::{
    ClockState, Curve, CurveKey, CurveLoop, Interpolation, LoopBehavior, StoryboardClock,
};

#[test]
fn keys_rebuild_curve() {
    let curve = Curve::new(
        CurveLoop::Constant,
        CurveLoop::Oscillate,
        [
            CurveKey::new(0.0, 1.0_f64).with_interpolation(Interpolation::Linear),
            CurveKey::new(2.0, 3.0_f64).with_tangents(0.5, 0.5),
        ],
    )
    .unwrap();
    let json = serde_json::to_string(curve.keys()).unwrap();
    let keys: Vec<CurveKey<f64>> = serde_json::from_str(&json).unwrap();
    let rebuilt = Curve::new(curve.pre_loop(), curve.post_loop(), keys).unwrap();
    assert_eq!(rebuilt, curve);
}

#[test]
fn interpolation_defaults_when_missing() {
    let key: CurveKey<f64> =
        serde_json::from_str(r#"{"position":0.5,"value":1.0,"tangent_in":0.0,"tangent_out":0.0}"#)
            .unwrap();
    assert_eq!(key.interpolation, Interpolation::Hermite);
}

#[test]
fn clock_state_round_trips() {
    let mut clock = StoryboardClock::new(1.0, LoopBehavior::Reverse);
    clock.start();
    clock.advance(0.25);
    clock.pause();
    let json = serde_json::to_string(&clock).unwrap();
    let restored: StoryboardClock = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.state(), ClockState::Paused);
    assert_eq!(restored.position(), 0.25);
}
