// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element handles and per-node bookkeeping.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::namescope::Namescope;

slotmap::new_key_type! {
    /// Generational handle to an element.
    ///
    /// Removing an element invalidates its id; a later element reusing the
    /// slot gets a different id, so stale handles never alias live elements.
    pub struct ElementId;
}

/// Which of the two trees an edge belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Ownership, inheritance, namescopes and style context.
    Logical,
    /// Composition for layout, drawing and hit testing.
    Visual,
}

/// Construction parameters for an element.
///
/// ```rust
/// use trellis_tree::ElementInfo;
///
/// let info = ElementInfo::new("Button").named("ok").class("primary").class("large");
/// assert_eq!(info.name.as_deref(), Some("ok"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementInfo {
    /// Type name matched by style selectors.
    pub type_name: &'static str,
    /// Identifying name. Empty names are treated as no name.
    pub name: Option<String>,
    /// Style classes.
    pub classes: Vec<String>,
    /// Whether the element owns a namescope for its logical descendants.
    pub namescope: bool,
}

impl ElementInfo {
    /// Info for an unnamed element of `type_name`.
    #[must_use]
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            ..Self::default()
        }
    }

    /// Sets the identifying name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a style class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Makes the element own a namescope.
    #[must_use]
    pub fn with_namescope(mut self) -> Self {
        self.namescope = true;
        self
    }
}

pub(crate) type Children = SmallVec<[ElementId; 4]>;

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) type_name: &'static str,
    pub(crate) name: Option<Box<str>>,
    /// Sorted and unique.
    pub(crate) classes: SmallVec<[Box<str>; 2]>,
    pub(crate) logical_parent: Option<ElementId>,
    pub(crate) visual_parent: Option<ElementId>,
    pub(crate) logical_children: Children,
    pub(crate) visual_children: Children,
    pub(crate) namescope: Option<Namescope>,
}

impl Node {
    pub(crate) fn from_info(info: ElementInfo) -> Self {
        let mut classes: SmallVec<[Box<str>; 2]> = info
            .classes
            .into_iter()
            .filter(|c| !c.is_empty())
            .map(String::into_boxed_str)
            .collect();
        classes.sort_unstable();
        classes.dedup();
        Self {
            type_name: info.type_name,
            name: info
                .name
                .filter(|n| !n.is_empty())
                .map(String::into_boxed_str),
            classes,
            logical_parent: None,
            visual_parent: None,
            logical_children: Children::new(),
            visual_children: Children::new(),
            namescope: info.namescope.then(Namescope::default),
        }
    }

    pub(crate) fn parent(&self, axis: Axis) -> Option<ElementId> {
        match axis {
            Axis::Logical => self.logical_parent,
            Axis::Visual => self.visual_parent,
        }
    }

    pub(crate) fn parent_mut(&mut self, axis: Axis) -> &mut Option<ElementId> {
        match axis {
            Axis::Logical => &mut self.logical_parent,
            Axis::Visual => &mut self.visual_parent,
        }
    }

    pub(crate) fn children(&self, axis: Axis) -> &Children {
        match axis {
            Axis::Logical => &self.logical_children,
            Axis::Visual => &self.visual_children,
        }
    }

    pub(crate) fn children_mut(&mut self, axis: Axis) -> &mut Children {
        match axis {
            Axis::Logical => &mut self.logical_children,
            Axis::Visual => &mut self.visual_children,
        }
    }
}
