// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Failures raised while building or sampling animations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AnimationError {
    /// Two values that must line up component-wise do not.
    #[error("component count mismatch: expected {expected}, found {found}")]
    ComponentMismatch {
        /// Components in the reference value.
        expected: usize,
        /// Components in the offending value.
        found: usize,
    },
    /// A curve was built without keys.
    #[error("curve has no keys")]
    EmptyCurve,
    /// A key position was NaN or infinite.
    #[error("key position {0} is not finite")]
    InvalidKeyPosition(f64),
    /// A track's value type does not match the property it animates.
    #[error("track for `{property}` produces `{found}` but the property holds `{expected}`")]
    TypeMismatch {
        /// Style name of the animated property.
        property: alloc::string::String,
        /// The property's value type.
        expected: &'static str,
        /// The curve's value type.
        found: &'static str,
    },
}
