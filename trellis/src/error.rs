// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use trellis_animation::AnimationError;
use trellis_property::PropertyError;
use trellis_style::StyleError;
use trellis_tree::TreeError;
use trellis_visual_state::VisualStateError;

/// Any failure surfaced by a [`View`](crate::View) operation.
///
/// A failing operation leaves the view as it was, except for a cascade pass,
/// which stops at the first element whose declarations cannot be applied.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ViewError {
    /// Property registration or a typed write failed.
    #[error(transparent)]
    Property(#[from] PropertyError),
    /// A tree mutation was rejected.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// A style declaration could not be applied.
    #[error(transparent)]
    Style(#[from] StyleError),
    /// A storyboard does not fit the properties it animates.
    #[error(transparent)]
    Animation(#[from] AnimationError),
    /// A visual state group or state is unknown or malformed.
    #[error(transparent)]
    VisualState(#[from] VisualStateError),
    /// The root element cannot be destroyed.
    #[error("the root element cannot be destroyed")]
    RootElement,
}
