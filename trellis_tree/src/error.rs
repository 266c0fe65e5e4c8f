// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::node::ElementId;

/// Structural errors. Every failing operation leaves the tree unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The id is stale or was never issued by this tree.
    #[error("element {0:?} does not exist")]
    UnknownElement(ElementId),
    /// The child already has a parent in the tree being attached to.
    #[error("element {child:?} already has parent {parent:?}")]
    AlreadyParented {
        /// Element being attached.
        child: ElementId,
        /// Its current parent.
        parent: ElementId,
    },
    /// The child is the would-be parent or one of its ancestors.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Would-be parent.
        parent: ElementId,
        /// Element being attached.
        child: ElementId,
    },
    /// Another element in the target namescope already uses this name.
    #[error("name `{name}` is already registered in namescope {scope:?}")]
    DuplicateName {
        /// The clashing name.
        name: String,
        /// Owner of the namescope.
        scope: ElementId,
    },
    /// Insertion index past the end of the child list.
    #[error("child index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current child count.
        len: usize,
    },
}
