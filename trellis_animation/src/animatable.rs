// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component decomposition of animatable values.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Insets, Point, Size, Vec2};
use peniko::Color;
use smallvec::{SmallVec, smallvec};

use crate::error::AnimationError;

/// Components of one animatable value, in a fixed order.
pub type Components = SmallVec<[f64; 4]>;

/// A value that curves can interpolate.
///
/// Values are taken apart into `f64` components, blended component-wise and
/// reassembled. Tangents use the same representation as values.
pub trait Animatable: Clone + fmt::Debug + 'static {
    /// Decomposes the value.
    fn components(&self) -> Components;

    /// Reassembles a value of the same shape as `like`.
    ///
    /// Fails with [`AnimationError::ComponentMismatch`] when `components` has
    /// the wrong length; values are never truncated or padded.
    fn from_components(components: &[f64], like: &Self) -> Result<Self, AnimationError>;

    /// A value of the same shape with every component zero.
    fn zeroed(&self) -> Self {
        let len = self.components().len();
        let zeros: Components = smallvec![0.0; len];
        match Self::from_components(&zeros, self) {
            Ok(value) => value,
            Err(_) => self.clone(),
        }
    }
}

fn expect_len(components: &[f64], expected: usize) -> Result<(), AnimationError> {
    if components.len() == expected {
        Ok(())
    } else {
        Err(AnimationError::ComponentMismatch {
            expected,
            found: components.len(),
        })
    }
}

impl Animatable for f64 {
    fn components(&self) -> Components {
        smallvec![*self]
    }

    fn from_components(components: &[f64], _like: &Self) -> Result<Self, AnimationError> {
        expect_len(components, 1)?;
        Ok(components[0])
    }
}

impl Animatable for f32 {
    fn components(&self) -> Components {
        smallvec![f64::from(*self)]
    }

    fn from_components(components: &[f64], _like: &Self) -> Result<Self, AnimationError> {
        expect_len(components, 1)?;
        #[expect(clippy::cast_possible_truncation, reason = "f32 property storage")]
        let value = components[0] as f32;
        Ok(value)
    }
}

impl Animatable for Point {
    fn components(&self) -> Components {
        smallvec![self.x, self.y]
    }

    fn from_components(components: &[f64], _like: &Self) -> Result<Self, AnimationError> {
        expect_len(components, 2)?;
        Ok(Self::new(components[0], components[1]))
    }
}

impl Animatable for Vec2 {
    fn components(&self) -> Components {
        smallvec![self.x, self.y]
    }

    fn from_components(components: &[f64], _like: &Self) -> Result<Self, AnimationError> {
        expect_len(components, 2)?;
        Ok(Self::new(components[0], components[1]))
    }
}

impl Animatable for Size {
    fn components(&self) -> Components {
        smallvec![self.width, self.height]
    }

    fn from_components(components: &[f64], _like: &Self) -> Result<Self, AnimationError> {
        expect_len(components, 2)?;
        Ok(Self::new(components[0], components[1]))
    }
}

impl Animatable for Insets {
    fn components(&self) -> Components {
        smallvec![self.x0, self.y0, self.x1, self.y1]
    }

    fn from_components(components: &[f64], _like: &Self) -> Result<Self, AnimationError> {
        expect_len(components, 4)?;
        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

/// Straight-alpha sRGB channels, each blended independently.
impl Animatable for Color {
    fn components(&self) -> Components {
        self.components.iter().copied().map(f64::from).collect()
    }

    fn from_components(components: &[f64], _like: &Self) -> Result<Self, AnimationError> {
        expect_len(components, 4)?;
        #[expect(clippy::cast_possible_truncation, reason = "peniko channels are f32")]
        let channels = [
            components[0] as f32,
            components[1] as f32,
            components[2] as f32,
            components[3] as f32,
        ];
        Ok(Self::new(channels))
    }
}

impl Animatable for Vec<f64> {
    fn components(&self) -> Components {
        self.iter().copied().collect()
    }

    fn from_components(components: &[f64], like: &Self) -> Result<Self, AnimationError> {
        expect_len(components, like.len())?;
        Ok(components.to_vec())
    }
}

impl Animatable for Vec<f32> {
    fn components(&self) -> Components {
        self.iter().copied().map(f64::from).collect()
    }

    fn from_components(components: &[f64], like: &Self) -> Result<Self, AnimationError> {
        expect_len(components, like.len())?;
        #[expect(clippy::cast_possible_truncation, reason = "f32 property storage")]
        let values = components.iter().map(|c| *c as f32).collect();
        Ok(values)
    }
}

/// Evaluates `sum(weight * value)` component-wise.
///
/// All terms must decompose into the same number of components as `like`.
pub fn combine<T: Animatable>(like: &T, terms: &[(&T, f64)]) -> Result<T, AnimationError> {
    let expected = like.components().len();
    let mut out: Components = smallvec![0.0; expected];
    for (value, weight) in terms {
        let parts = value.components();
        if parts.len() != expected {
            return Err(AnimationError::ComponentMismatch {
                expected,
                found: parts.len(),
            });
        }
        for (acc, part) in out.iter_mut().zip(parts) {
            *acc += part * weight;
        }
    }
    T::from_components(&out, like)
}
