// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storyboards: named groups of property tracks played on one clock.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use trellis_property::{ErasedValue, PropertyValue};

use crate::animatable::Animatable;
use crate::clock::{LoopBehavior, StoryboardClock};
use crate::curve::Curve;
use crate::error::AnimationError;

/// A curve with its value type erased, so tracks of different types can share
/// one storyboard.
pub trait TrackCurve: fmt::Debug {
    /// Samples the curve and boxes the result.
    fn sample_erased(&self, position: f64) -> Result<ErasedValue, AnimationError>;

    /// [`TypeId`] of the sampled values.
    fn value_type(&self) -> TypeId;

    /// Name of the sampled value type, for diagnostics.
    fn value_type_name(&self) -> &'static str;

    /// Position of the last key.
    fn end(&self) -> f64;
}

impl<T: Animatable + PropertyValue> TrackCurve for Curve<T> {
    fn sample_erased(&self, position: f64) -> Result<ErasedValue, AnimationError> {
        self.sample(position).map(ErasedValue::new)
    }

    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn value_type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    fn end(&self) -> f64 {
        Self::end(self)
    }
}

/// One animated property.
#[derive(Debug)]
pub struct Track {
    target: Option<String>,
    property: String,
    curve: Box<dyn TrackCurve>,
}

impl Track {
    /// Name of the targeted element, or `None` for the element the storyboard
    /// runs on.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Style name of the animated property.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The keyframes.
    #[must_use]
    pub fn curve(&self) -> &dyn TrackCurve {
        &*self.curve
    }

    /// Value at `position`.
    pub fn sample(&self, position: f64) -> Result<ErasedValue, AnimationError> {
        self.curve.sample_erased(position)
    }

    /// Fails unless this track produces values of `expected`.
    pub fn check_type(
        &self,
        expected: TypeId,
        expected_name: &'static str,
    ) -> Result<(), AnimationError> {
        if self.curve.value_type() == expected {
            Ok(())
        } else {
            Err(AnimationError::TypeMismatch {
                property: self.property.clone(),
                expected: expected_name,
                found: self.curve.value_type_name(),
            })
        }
    }
}

/// An immutable, named set of tracks.
///
/// ```rust
/// use trellis_animation::{Curve, CurveKey, LoopBehavior, StoryboardBuilder};
///
/// let grow = StoryboardBuilder::new("grow")
///     .track(
///         None,
///         "width",
///         Curve::clamped([CurveKey::new(0.0, 10.0), CurveKey::new(1.0, 20.0)]).unwrap(),
///     )
///     .build();
///
/// assert_eq!(grow.duration(), 1.0);
/// let sampled = grow.tracks()[0].sample(0.5).unwrap();
/// assert_eq!(sampled.downcast_ref::<f64>(), Some(&15.0));
/// ```
#[derive(Debug)]
pub struct Storyboard {
    name: String,
    loop_behavior: LoopBehavior,
    tracks: Vec<Track>,
}

impl Storyboard {
    /// Name used to reference the storyboard from styles.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What happens at the end.
    #[must_use]
    pub fn loop_behavior(&self) -> LoopBehavior {
        self.loop_behavior
    }

    /// Tracks in declaration order.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Latest key position over all tracks, in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.tracks
            .iter()
            .map(|t| t.curve.end())
            .fold(0.0, f64::max)
    }

    /// A stopped clock sized for this storyboard.
    #[must_use]
    pub fn create_clock(&self) -> StoryboardClock {
        StoryboardClock::new(self.duration(), self.loop_behavior)
    }
}

/// Builder for [`Storyboard`].
#[derive(Debug)]
pub struct StoryboardBuilder {
    storyboard: Storyboard,
}

impl StoryboardBuilder {
    /// Empty, non-looping storyboard called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            storyboard: Storyboard {
                name: name.into(),
                loop_behavior: LoopBehavior::None,
                tracks: Vec::new(),
            },
        }
    }

    /// Sets the loop behavior.
    #[must_use]
    pub fn loop_behavior(mut self, loop_behavior: LoopBehavior) -> Self {
        self.storyboard.loop_behavior = loop_behavior;
        self
    }

    /// Adds a track animating `property` (by style name) on `target`.
    #[must_use]
    pub fn track<T: Animatable + PropertyValue>(
        mut self,
        target: Option<&str>,
        property: &str,
        curve: Curve<T>,
    ) -> Self {
        self.storyboard.tracks.push(Track {
            target: target.map(ToString::to_string),
            property: property.to_string(),
            curve: Box::new(curve),
        });
        self
    }

    /// Adds a track with an already erased curve.
    #[must_use]
    pub fn erased_track(
        mut self,
        target: Option<&str>,
        property: &str,
        curve: Box<dyn TrackCurve>,
    ) -> Self {
        self.storyboard.tracks.push(Track {
            target: target.map(ToString::to_string),
            property: property.to_string(),
            curve,
        });
        self
    }

    /// Finishes the storyboard.
    #[must_use]
    pub fn build(self) -> Storyboard {
        self.storyboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveKey;
    use kurbo::Insets;

    #[test]
    fn duration_is_latest_key() {
        let storyboard = StoryboardBuilder::new("fade")
            .track(None, "opacity", Curve::clamped([CurveKey::new(0.0, 0.0), CurveKey::new(0.25, 1.0)]).unwrap())
            .track(
                Some("border"),
                "margin",
                Curve::clamped([CurveKey::new(0.0, Insets::ZERO), CurveKey::new(2.0, Insets::uniform(4.0))]).unwrap(),
            )
            .loop_behavior(LoopBehavior::Loop)
            .build();
        assert_eq!(storyboard.duration(), 2.0);
        assert_eq!(storyboard.tracks()[1].target(), Some("border"));
        let clock = storyboard.create_clock();
        assert_eq!(clock.duration(), 2.0);
        assert_eq!(clock.loop_behavior(), LoopBehavior::Loop);
    }

    #[test]
    fn type_check_reports_both_types() {
        let storyboard = StoryboardBuilder::new("s")
            .track(None, "width", Curve::clamped([CurveKey::new(0.0, 1.0_f32)]).unwrap())
            .build();
        let track = &storyboard.tracks()[0];
        assert!(track.check_type(TypeId::of::<f32>(), "f32").is_ok());
        let err = track.check_type(TypeId::of::<f64>(), "f64").unwrap_err();
        assert!(matches!(err, AnimationError::TypeMismatch { found: "f32", .. }));
    }

    #[test]
    fn empty_storyboard_has_zero_duration() {
        assert_eq!(StoryboardBuilder::new("empty").build().duration(), 0.0);
    }
}
