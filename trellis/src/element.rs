// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element state owned by the view.

use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use kurbo::Vec2;
use trellis_animation::Storyboard;
use trellis_layout::LayoutCache;
use trellis_property::{DependencyObject, PropertyStore};
use trellis_tree::{ElementId, ElementInfo};
use trellis_visual_state::VisualStateGroups;

use crate::behavior::Behavior;

/// Everything the view keeps for one element next to its tree node.
pub(crate) struct ElementData {
    pub(crate) store: PropertyStore<ElementId>,
    /// Mirrors the tree's logical parent for inheritance lookups.
    pub(crate) logical_parent: Option<ElementId>,
    pub(crate) layout: LayoutCache,
    pub(crate) states: VisualStateGroups<Rc<Storyboard>>,
    /// Storyboard started by the last transition of each group.
    pub(crate) transition_storyboards: HashMap<String, String>,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    pub(crate) scroll_offset: Vec2,
}

impl ElementData {
    pub(crate) fn new(id: ElementId, behavior: Option<Box<dyn Behavior>>) -> Self {
        Self {
            store: PropertyStore::new(id),
            logical_parent: None,
            layout: LayoutCache::new(),
            states: VisualStateGroups::with_focus(),
            transition_storyboards: HashMap::new(),
            behavior,
            scroll_offset: Vec2::ZERO,
        }
    }
}

impl DependencyObject<ElementId> for ElementData {
    fn property_store(&self) -> &PropertyStore<ElementId> {
        &self.store
    }

    fn property_store_mut(&mut self) -> &mut PropertyStore<ElementId> {
        &mut self.store
    }

    fn parent_key(&self) -> Option<ElementId> {
        self.logical_parent
    }
}

/// Describes an element to create with [`View::create`](crate::View::create).
///
/// ```rust
/// use trellis::ElementBuilder;
///
/// let button = ElementBuilder::new("Button")
///     .named("ok")
///     .class("primary")
///     .state_group("common", ["normal", "hover", "pressed"]);
/// assert_eq!(button.info().type_name, "Button");
/// ```
pub struct ElementBuilder {
    info: ElementInfo,
    behavior: Option<Box<dyn Behavior>>,
    groups: Vec<(String, Vec<String>)>,
}

impl ElementBuilder {
    /// An element of `type_name`, the name type selectors match.
    #[must_use]
    pub fn new(type_name: &'static str) -> Self {
        Self {
            info: ElementInfo::new(type_name),
            behavior: None,
            groups: Vec::new(),
        }
    }

    /// Sets the identifying name registered in the enclosing namescope.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.info = self.info.named(name);
        self
    }

    /// Adds a style class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.info = self.info.class(class);
        self
    }

    /// Gives the element its own namescope.
    #[must_use]
    pub fn namescope(mut self) -> Self {
        self.info = self.info.with_namescope();
        self
    }

    /// Attaches custom measure, arrange, draw, focus or update behavior.
    #[must_use]
    pub fn behavior(mut self, behavior: impl Behavior) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    /// Adds a visual state group next to the built-in `focus` group. The
    /// first state is the initial one.
    #[must_use]
    pub fn state_group<I>(mut self, name: &str, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.groups
            .push((name.to_owned(), states.into_iter().map(Into::into).collect()));
        self
    }

    /// Tree-level description.
    #[must_use]
    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        ElementInfo,
        Option<Box<dyn Behavior>>,
        Vec<(String, Vec<String>)>,
    ) {
        (self.info, self.behavior, self.groups)
    }
}

impl fmt::Debug for ElementBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementBuilder")
            .field("info", &self.info)
            .field("has_behavior", &self.behavior.is_some())
            .field("groups", &self.groups)
            .finish()
    }
}
