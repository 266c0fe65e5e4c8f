// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyframe curves.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::animatable::{Animatable, combine};
use crate::error::AnimationError;

/// How a segment blends from its left key to the next one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interpolation {
    /// Cubic Hermite spline using the keys' tangents.
    #[default]
    Hermite,
    /// Straight line; tangents are ignored.
    Linear,
    /// Holds the left key's value until the next key.
    Step,
}

/// Behavior of a curve before its first key or after its last.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveLoop {
    /// Holds the boundary key's value.
    #[default]
    Constant,
    /// Extrapolates along the boundary key's tangent.
    Linear,
    /// Repeats the curve.
    Cycle,
    /// Repeats the curve, shifting each repetition by the first-to-last delta.
    CycleOffset,
    /// Repeats the curve, playing every other repetition backwards.
    Oscillate,
}

/// One keyframe.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveKey<T> {
    /// Position on the curve, in seconds for storyboards.
    pub position: f64,
    /// Value at `position`.
    pub value: T,
    /// Incoming tangent, used by the segment ending here.
    pub tangent_in: T,
    /// Outgoing tangent, used by the segment starting here.
    pub tangent_out: T,
    /// Blend used by the segment starting here.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interpolation: Interpolation,
}

impl<T: Animatable> CurveKey<T> {
    /// A Hermite key with zero tangents.
    pub fn new(position: f64, value: T) -> Self {
        let zero = value.zeroed();
        Self {
            position,
            tangent_in: zero.clone(),
            tangent_out: zero,
            value,
            interpolation: Interpolation::Hermite,
        }
    }

    /// Replaces both tangents.
    #[must_use]
    pub fn with_tangents(mut self, tangent_in: T, tangent_out: T) -> Self {
        self.tangent_in = tangent_in;
        self.tangent_out = tangent_out;
        self
    }

    /// Replaces the interpolation of the segment that starts at this key.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}

/// Cubic Hermite interpolation between `v1` and `v2`.
///
/// `tangent_out` leaves `v1`, `tangent_in` arrives at `v2`. The basis
/// polynomials are exactly `(1, 0, 0, 0)` at `t = 0` and `(0, 0, 1, 0)` at
/// `t = 1`, so the endpoints are reproduced bit for bit.
///
/// ```rust
/// use trellis_animation::hermite;
///
/// assert_eq!(hermite(10.0, 0.0, 20.0, 0.0, 0.0), 10.0);
/// assert_eq!(hermite(10.0, 0.0, 20.0, 0.0, 0.5), 15.0);
/// assert_eq!(hermite(10.0, 0.0, 20.0, 0.0, 1.0), 20.0);
/// ```
#[must_use]
pub fn hermite(v1: f64, tangent_out: f64, v2: f64, tangent_in: f64, t: f64) -> f64 {
    let [h1, h2, h3, h4] = hermite_basis(t);
    v1 * h1 + tangent_out * h2 + v2 * h3 + tangent_in * h4
}

fn hermite_basis(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        2.0 * t3 - 3.0 * t2 + 1.0,
        t3 - 2.0 * t2 + t,
        -2.0 * t3 + 3.0 * t2,
        t3 - t2,
    ]
}

/// A validated, position-sorted sequence of keys.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve<T> {
    keys: Vec<CurveKey<T>>,
    pre_loop: CurveLoop,
    post_loop: CurveLoop,
}

impl<T: Animatable> Curve<T> {
    /// Builds a curve.
    ///
    /// Keys are sorted by position (stable for equal positions). Every value
    /// and tangent must decompose into the same number of components.
    pub fn new(
        pre_loop: CurveLoop,
        post_loop: CurveLoop,
        keys: impl IntoIterator<Item = CurveKey<T>>,
    ) -> Result<Self, AnimationError> {
        let mut keys: Vec<_> = keys.into_iter().collect();
        let Some(first) = keys.first() else {
            return Err(AnimationError::EmptyCurve);
        };
        let expected = first.value.components().len();
        for key in &keys {
            if !key.position.is_finite() {
                return Err(AnimationError::InvalidKeyPosition(key.position));
            }
            for part in [&key.value, &key.tangent_in, &key.tangent_out] {
                let found = part.components().len();
                if found != expected {
                    return Err(AnimationError::ComponentMismatch { expected, found });
                }
            }
        }
        keys.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self {
            keys,
            pre_loop,
            post_loop,
        })
    }

    /// A curve that holds its boundary values outside its keys.
    pub fn clamped(keys: impl IntoIterator<Item = CurveKey<T>>) -> Result<Self, AnimationError> {
        Self::new(CurveLoop::Constant, CurveLoop::Constant, keys)
    }

    /// Keys in position order.
    #[must_use]
    pub fn keys(&self) -> &[CurveKey<T>] {
        &self.keys
    }

    /// Behavior before the first key.
    #[must_use]
    pub fn pre_loop(&self) -> CurveLoop {
        self.pre_loop
    }

    /// Behavior after the last key.
    #[must_use]
    pub fn post_loop(&self) -> CurveLoop {
        self.post_loop
    }

    /// Position of the first key.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.first().position
    }

    /// Position of the last key.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.last().position
    }

    fn first(&self) -> &CurveKey<T> {
        &self.keys[0]
    }

    fn last(&self) -> &CurveKey<T> {
        &self.keys[self.keys.len() - 1]
    }

    /// Evaluates the curve at `position`.
    pub fn sample(&self, position: f64) -> Result<T, AnimationError> {
        let first = self.first();
        let last = self.last();
        if self.keys.len() == 1 {
            return Ok(first.value.clone());
        }
        if position < first.position {
            return self.sample_outside(position, self.pre_loop, first, true);
        }
        if position > last.position {
            return self.sample_outside(position, self.post_loop, last, false);
        }
        self.sample_inside(position)
    }

    fn sample_outside(
        &self,
        position: f64,
        mode: CurveLoop,
        boundary: &CurveKey<T>,
        before: bool,
    ) -> Result<T, AnimationError> {
        let first = self.first();
        let last = self.last();
        let length = last.position - first.position;
        match mode {
            CurveLoop::Constant => Ok(boundary.value.clone()),
            CurveLoop::Linear => {
                let tangent = if before {
                    &boundary.tangent_in
                } else {
                    &boundary.tangent_out
                };
                let delta = boundary.position - position;
                combine(&boundary.value, &[(&boundary.value, 1.0), (tangent, -delta)])
            }
            _ if length <= 0.0 => Ok(boundary.value.clone()),
            CurveLoop::Cycle | CurveLoop::CycleOffset | CurveLoop::Oscillate => {
                let cycle = ((position - first.position) / length).floor();
                let mut local = position - cycle * length;
                if mode == CurveLoop::Oscillate && cycle % 2.0 != 0.0 {
                    local = first.position + last.position - local;
                }
                let value = self.sample_inside(local.clamp(first.position, last.position))?;
                if mode == CurveLoop::CycleOffset {
                    combine(
                        &value,
                        &[
                            (&value, 1.0),
                            (&last.value, cycle),
                            (&first.value, -cycle),
                        ],
                    )
                } else {
                    Ok(value)
                }
            }
        }
    }

    fn sample_inside(&self, position: f64) -> Result<T, AnimationError> {
        let last = self.last();
        if position >= last.position {
            return Ok(last.value.clone());
        }
        // Index of the first key strictly after `position`.
        let next = self.keys.partition_point(|k| k.position <= position);
        if next == 0 {
            return Ok(self.first().value.clone());
        }
        let k1 = &self.keys[next - 1];
        let k2 = &self.keys[next];
        let span = k2.position - k1.position;
        if span <= 0.0 {
            return Ok(k2.value.clone());
        }
        let t = (position - k1.position) / span;
        match k1.interpolation {
            Interpolation::Step => Ok(k1.value.clone()),
            Interpolation::Linear => combine(&k1.value, &[(&k1.value, 1.0 - t), (&k2.value, t)]),
            Interpolation::Hermite => {
                let [h1, h2, h3, h4] = hermite_basis(t);
                combine(
                    &k1.value,
                    &[
                        (&k1.value, h1),
                        (&k1.tangent_out, h2),
                        (&k2.value, h3),
                        (&k2.tangent_in, h4),
                    ],
                )
            }
        }
    }
}
