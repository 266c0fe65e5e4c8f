// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Tree: the element hierarchy.
//!
//! Elements live in one arena and take part in two independent trees:
//!
//! - The **logical tree** models ownership. Property inheritance, style
//!   selector context and name resolution follow it.
//! - The **visual tree** models composition. Layout, drawing and hit testing
//!   follow it. Template parts and decorators may appear here without a
//!   logical parent, and a logical child may be hosted visually elsewhere.
//!
//! Each element has at most one parent per tree. Attachment validates before it
//! mutates: double parenting, cycles and name clashes are rejected with a
//! [`TreeError`] and leave the tree untouched. Traversals are iterative, so
//! deep trees do not risk stack exhaustion.
//!
//! ## Namescopes
//!
//! An element created with [`ElementInfo::with_namescope`] owns a name table.
//! Attaching a subtree to the logical tree registers its named elements in the
//! nearest namescope above the attachment point, stopping at nested namescope
//! owners; detaching unregisters them again.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod namescope;
mod node;
mod tree;

pub use error::TreeError;
pub use namescope::Namescope;
pub use node::{Axis, ElementId, ElementInfo};
pub use tree::{Ancestors, Descendants, Tree};
