// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use trellis_property::PropertyError;
use trellis_visual_state::VisualStateError;

/// Failures raised while applying style declarations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// A setter's value could not be converted for its property.
    #[error("invalid value for `{property}`")]
    InvalidValue {
        /// Property name as declared.
        property: String,
        /// Parse or type failure.
        #[source]
        source: PropertyError,
    },
    /// A transition declaration was malformed or named an unknown state.
    #[error(transparent)]
    InvalidTransition(#[from] VisualStateError),
}
