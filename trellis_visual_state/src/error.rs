// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Failures raised by visual state groups.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VisualStateError {
    /// No group with this name exists.
    #[error("unknown visual state group `{0}`")]
    UnknownGroup(String),
    /// The group has no state with this name.
    #[error("visual state group `{group}` has no state `{state}`")]
    UnknownState {
        /// Group that was searched.
        group: String,
        /// Missing state.
        state: String,
    },
    /// A group with this name already exists.
    #[error("visual state group `{0}` already exists")]
    DuplicateGroup(String),
    /// A state name appears twice in one group.
    #[error("visual state group `{group}` declares `{state}` twice")]
    DuplicateState {
        /// Group being created.
        group: String,
        /// Repeated state.
        state: String,
    },
    /// A group was created without states.
    #[error("visual state group `{0}` has no states")]
    EmptyGroup(String),
    /// Transition arguments were neither `(group, to)` nor `(group, from, to)`.
    #[error("a transition takes 2 or 3 arguments, got {0}")]
    AmbiguousArguments(usize),
}
