// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Layout: the two-pass measure/arrange protocol.
//!
//! Layout runs top-down in two passes over the visual tree:
//!
//! 1. **Measure**: each element is offered an available size (possibly
//!    infinite) and reports the size it would like, margin included.
//! 2. **Arrange**: each element is given a final slot rectangle and decides
//!    how much of it to use and where to sit inside it.
//!
//! A third, cheap **position** pass turns slot-relative offsets into absolute
//! coordinates and can be re-run for a subtree on scroll without measuring.
//!
//! This crate holds the element-independent math ([`measure_core`],
//! [`arrange_core`], [`bounded_measure`]) and the per-element [`LayoutCache`].
//! Walking the tree and calling element overrides is left to the host.
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use trellis_layout::{
//!     ArrangeOptions, HorizontalAlignment, LayoutCache, LayoutParams, arrange_core, measure_core,
//! };
//!
//! let params = LayoutParams {
//!     width: 40.0,
//!     horizontal_alignment: HorizontalAlignment::Center,
//!     ..LayoutParams::default()
//! };
//! let mut cache = LayoutCache::new();
//! let available = Size::new(100.0, 100.0);
//! let desired = cache.measure_with(available, |a| measure_core(&params, a, |_| Size::new(0.0, 20.0)));
//! assert_eq!(desired, Size::new(40.0, 20.0));
//!
//! let slot = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let outcome = arrange_core(&params, desired, slot, ArrangeOptions::empty(), |s, _| s);
//! assert_eq!(outcome.render_offset.x, 30.0);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): use the Rust standard library through Kurbo.
//! - `libm`: use `libm` for float math in `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod alignment;
mod cache;
mod params;
mod protocol;

pub use alignment::{
    ArrangeOptions, HorizontalAlignment, UnknownKeyword, VerticalAlignment, Visibility,
    horizontal_offset, vertical_offset,
};
pub use cache::{LayoutCache, LayoutState, child_position};
pub use params::{LayoutParams, bounded_measure, parse_insets, parse_length};
pub use protocol::{ArrangeOutcome, arrange_core, measure_core};
