// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Animation: keyframe curves, storyboards and clocks.
//!
//! - [`Curve`] holds sorted [`CurveKey`]s and samples them with Hermite,
//!   linear or step interpolation. Outside its keys a curve can hold, extend
//!   along a tangent, cycle, cycle with offset or oscillate ([`CurveLoop`]).
//! - [`Animatable`] takes values apart into `f64` components so one curve
//!   implementation serves scalars, Kurbo geometry, Peniko colors and vectors.
//! - A [`Storyboard`] is a named set of [`Track`]s, each targeting a property
//!   by style name on an optionally named element.
//! - A [`StoryboardClock`] turns frame deltas into a storyboard position and
//!   tracks the play/pause/stop lifecycle.
//!
//! ```rust
//! use trellis_animation::{Curve, CurveKey, StoryboardBuilder};
//!
//! let storyboard = StoryboardBuilder::new("grow")
//!     .track(None, "width", Curve::clamped([CurveKey::new(0.0, 10.0), CurveKey::new(1.0, 20.0)]).unwrap())
//!     .build();
//!
//! let mut clock = storyboard.create_clock();
//! clock.start();
//! let tick = clock.advance(0.5);
//! let width = storyboard.tracks()[0].sample(tick.position).unwrap();
//! assert_eq!(width.downcast_ref::<f64>(), Some(&15.0));
//! ```
//!
//! Applying sampled values to elements is the host's job; see the `trellis`
//! crate.
//!
//! ## Features
//!
//! - `std` (enabled by default): use the Rust standard library through Kurbo.
//! - `libm`: use `libm` for float math in `no_std` builds.
//! - `serde`: serialize curve keys, loop modes and clock state.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animatable;
mod clock;
mod curve;
mod error;
mod storyboard;

pub use animatable::{Animatable, Components, combine};
pub use clock::{ClockState, ClockTick, LoopBehavior, StoryboardClock};
pub use curve::{Curve, CurveKey, CurveLoop, Interpolation, hermite};
pub use error::AnimationError;
pub use storyboard::{Storyboard, StoryboardBuilder, Track, TrackCurve};
