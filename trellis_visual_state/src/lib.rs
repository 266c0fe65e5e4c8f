// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Visual State: named state machines for element appearance.
//!
//! An element owns a set of [`VisualStateGroup`]s. Each group holds mutually
//! exclusive states (`normal`/`hover`/`pressed`, `blurred`/`focused`), exactly
//! one of which is current. Moving between states can play a transition
//! storyboard; the lookup tries an exact `(from, to)` registration, then a
//! wildcard `(*, to)` one, and otherwise snaps.
//!
//! The storyboard type is a parameter so this crate stays independent of the
//! animation engine; hosts typically use a shared handle such as
//! `Rc<Storyboard>`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod group;

pub use error::VisualStateError;
pub use group::{
    BLURRED, FOCUS_GROUP, FOCUSED, StateChange, TransitionKey, VisualStateGroup,
    VisualStateGroups,
};
