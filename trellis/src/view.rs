// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view: element arena, property access and invalidation.

use std::fmt;

use hashbrown::{HashMap, HashSet};
use kurbo::{Rect, Size, Vec2};
use slotmap::{SecondaryMap, SlotMap};
use trellis_layout::LayoutState;
use trellis_property::{
    DependencyObjectExt, ErasedValue, Precedence, Property, PropertyChange, PropertyError,
    PropertyFlags, PropertyId, PropertyMetadata, PropertyRegistry, PropertyStore, PropertyValue,
    ValueSource, walk_inherited_erased,
};
use trellis_style::{ResourceDictionary, StyleSheet};
use trellis_tree::{Axis, ElementId, Tree, TreeError};

use crate::animation::{ActiveStoryboard, AnimationId};
use crate::content::{ContentCache, ContentHandle, ContentLoader, SourcedResource};
use crate::element::{ElementBuilder, ElementData};
use crate::error::ViewError;
use crate::properties::StandardProperties;

/// An inherited value recorded before a logical tree edit.
type InheritedValue = (ElementId, PropertyId, ErasedValue);

/// Configures a [`View`].
///
/// ```rust
/// use kurbo::Size;
/// use trellis::ViewBuilder;
/// use trellis_property::PropertyMetadataBuilder;
///
/// let mut builder = ViewBuilder::new().viewport(Size::new(800.0, 600.0));
/// let badge = builder
///     .register("BadgeCount", PropertyMetadataBuilder::new(0_u32).build())
///     .unwrap();
/// let view = builder.build().unwrap();
///
/// assert_eq!(*view.get_value(view.root(), badge), 0);
/// assert_eq!(view.viewport(), Size::new(800.0, 600.0));
/// ```
pub struct ViewBuilder {
    registry: PropertyRegistry,
    viewport: Size,
    root: ElementBuilder,
    stylesheet: StyleSheet,
    loader: Option<Box<dyn ContentLoader>>,
}

impl ViewBuilder {
    /// A builder with an empty registry and a zero viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: PropertyRegistry::new(),
            viewport: Size::ZERO,
            root: ElementBuilder::new("Root"),
            stylesheet: StyleSheet::default(),
            loader: None,
        }
    }

    /// Size the root element is laid out in.
    #[must_use]
    pub fn viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Replaces the root element's description. The root always owns a
    /// namescope.
    #[must_use]
    pub fn root(mut self, root: ElementBuilder) -> Self {
        self.root = root;
        self
    }

    /// Initial stylesheet.
    #[must_use]
    pub fn stylesheet(mut self, stylesheet: StyleSheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Loader used to resolve [`SourcedResource`] values.
    #[must_use]
    pub fn content_loader(mut self, loader: impl ContentLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Registers an application property next to the standard ones.
    pub fn register<T: PropertyValue>(
        &mut self,
        name: &'static str,
        metadata: PropertyMetadata<T>,
    ) -> Result<Property<T>, PropertyError> {
        self.registry.try_register(name, metadata)
    }

    /// Registers the standard properties and creates the view. The registry
    /// is frozen from here on.
    pub fn build(self) -> Result<View, ViewError> {
        let mut registry = self.registry;
        let props = StandardProperties::register(&mut registry)?;
        let mut tree = Tree::new();
        let (info, behavior, groups) = self.root.namescope().into_parts();
        let root = tree.insert(info);
        let mut elements = SecondaryMap::new();
        let mut data = ElementData::new(root, behavior);
        for (name, states) in groups {
            data.states.create(&name, states)?;
        }
        elements.insert(root, data);
        tracing::debug!(properties = registry.len(), "view created");
        let resources = self.stylesheet.view_resources().clone();
        Ok(View {
            registry,
            props,
            tree,
            elements,
            root,
            viewport: self.viewport,
            stylesheet: self.stylesheet,
            resources,
            restyle: HashSet::new(),
            restyle_all: true,
            animations: SlotMap::with_key(),
            bindings: HashMap::new(),
            focused: None,
            content: ContentCache::default(),
            loader: self.loader,
            position_dirty: true,
            redraw: true,
        })
    }
}

impl Default for ViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewBuilder")
            .field("properties", &self.registry.len())
            .field("viewport", &self.viewport)
            .field("root", &self.root)
            .field("has_loader", &self.loader.is_some())
            .finish_non_exhaustive()
    }
}

/// A retained element tree with styling, layout and animation.
///
/// The view owns the property registry, the element arena and all per-element
/// state. It is driven by an external frame loop: [`update`](Self::update)
/// once per frame, then [`draw`](Self::draw).
pub struct View {
    pub(crate) registry: PropertyRegistry,
    pub(crate) props: StandardProperties,
    pub(crate) tree: Tree,
    pub(crate) elements: SecondaryMap<ElementId, ElementData>,
    pub(crate) root: ElementId,
    pub(crate) viewport: Size,
    pub(crate) stylesheet: StyleSheet,
    pub(crate) resources: ResourceDictionary,
    /// Roots of logical subtrees waiting for a cascade pass.
    pub(crate) restyle: HashSet<ElementId>,
    pub(crate) restyle_all: bool,
    pub(crate) animations: SlotMap<AnimationId, ActiveStoryboard>,
    /// Which storyboard currently drives each animated property.
    pub(crate) bindings: HashMap<(ElementId, PropertyId), AnimationId>,
    pub(crate) focused: Option<ElementId>,
    pub(crate) content: ContentCache,
    pub(crate) loader: Option<Box<dyn ContentLoader>>,
    pub(crate) position_dirty: bool,
    pub(crate) redraw: bool,
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("root", &self.root)
            .field("elements", &self.tree.len())
            .field("viewport", &self.viewport)
            .field("rules", &self.stylesheet.len())
            .field("animations", &self.animations.len())
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl View {
    /// Shorthand for [`ViewBuilder::new`].
    #[must_use]
    pub fn builder() -> ViewBuilder {
        ViewBuilder::new()
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The frozen property registry.
    #[must_use]
    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// Handles to the standard properties.
    #[must_use]
    pub fn properties(&self) -> &StandardProperties {
        &self.props
    }

    /// Read access to both trees.
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Whether `element` is alive.
    #[must_use]
    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.contains_key(element)
    }

    /// Size the root is laid out in.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resizes the viewport; the next layout pass re-measures the root.
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.invalidate_measure(self.root);
        }
    }

    /// Whether something visible changed since the last [`draw`](Self::draw).
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Store and logical parent of each live element, for inheritance walks.
    pub(crate) fn parent_lookup<'a>(
        &'a self,
    ) -> impl Fn(ElementId) -> Option<(&'a PropertyStore<ElementId>, Option<ElementId>)> + 'a {
        |key| self.elements.get(key).map(|d| (&d.store, d.logical_parent))
    }

    fn data(&self, element: ElementId) -> Result<&ElementData, ViewError> {
        self.elements
            .get(element)
            .ok_or(ViewError::Tree(TreeError::UnknownElement(element)))
    }

    // --- Element lifecycle ------------------------------------------------

    /// Creates a detached element.
    pub fn create(&mut self, builder: ElementBuilder) -> Result<ElementId, ViewError> {
        let (info, behavior, groups) = builder.into_parts();
        let mut states = trellis_visual_state::VisualStateGroups::with_focus();
        for (name, group_states) in &groups {
            states.create(name, group_states)?;
        }
        let type_name = info.type_name;
        let id = self.tree.insert(info);
        let mut data = ElementData::new(id, behavior);
        data.states = states;
        self.elements.insert(id, data);
        self.restyle.insert(id);
        tracing::trace!(?id, type_name, "created element");
        Ok(id)
    }

    /// Appends `child` to `parent` in both the logical and the visual tree.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), ViewError> {
        self.attach_logical_child(parent, child)?;
        if let Err(err) = self.attach_visual_child(parent, child) {
            self.detach_logical(child)?;
            return Err(err);
        }
        Ok(())
    }

    /// Appends `child` to `parent`'s logical children.
    pub fn attach_logical_child(
        &mut self,
        parent: ElementId,
        child: ElementId,
    ) -> Result<(), ViewError> {
        let index = self.tree.logical_children(parent).len();
        self.insert_logical_child(parent, index, child)
    }

    /// Inserts `child` at `index` among `parent`'s logical children.
    pub fn insert_logical_child(
        &mut self,
        parent: ElementId,
        index: usize,
        child: ElementId,
    ) -> Result<(), ViewError> {
        let subtree: Vec<ElementId> = self.tree.descendants(child, Axis::Logical).collect();
        let before = self.inherited_snapshot(&subtree);
        self.tree.insert_child(Axis::Logical, parent, index, child)?;
        self.logical_parent_changed(child, before);
        Ok(())
    }

    /// Appends `child` to `parent`'s visual children.
    pub fn attach_visual_child(
        &mut self,
        parent: ElementId,
        child: ElementId,
    ) -> Result<(), ViewError> {
        let index = self.tree.visual_children(parent).len();
        self.insert_visual_child(parent, index, child)
    }

    /// Inserts `child` at `index` among `parent`'s visual children.
    pub fn insert_visual_child(
        &mut self,
        parent: ElementId,
        index: usize,
        child: ElementId,
    ) -> Result<(), ViewError> {
        self.tree.insert_child(Axis::Visual, parent, index, child)?;
        self.visual_parent_changed(Some(parent), child);
        Ok(())
    }

    /// Detaches `child` from its logical parent, releasing the animations
    /// and focus held in its subtree. Returns the old parent.
    pub fn detach_logical(&mut self, child: ElementId) -> Result<Option<ElementId>, ViewError> {
        let subtree: Vec<ElementId> = self.tree.descendants(child, Axis::Logical).collect();
        let before = self.inherited_snapshot(&subtree);
        let parent = self.tree.detach_logical(child)?;
        if parent.is_some() {
            self.release_subtree(&subtree);
            self.logical_parent_changed(child, before);
        }
        Ok(parent)
    }

    /// Detaches `child` from its visual parent. Returns the old parent.
    pub fn detach_visual(&mut self, child: ElementId) -> Result<Option<ElementId>, ViewError> {
        let parent = self.tree.detach_visual(child)?;
        if let Some(parent) = parent {
            self.invalidate_measure(parent);
            self.visual_parent_changed(None, child);
        }
        Ok(parent)
    }

    /// Moves `child` to `new_parent` in the logical tree, or detaches it for
    /// `None`. The move is validated before the old parent is left.
    pub fn change_logical_parent(
        &mut self,
        child: ElementId,
        new_parent: Option<ElementId>,
    ) -> Result<(), ViewError> {
        let old_parent = self.tree.logical_parent(child);
        if old_parent == new_parent {
            return Ok(());
        }
        let subtree: Vec<ElementId> = self.tree.descendants(child, Axis::Logical).collect();
        let before = self.inherited_snapshot(&subtree);
        self.tree.change_logical_parent(child, new_parent)?;
        if old_parent.is_some() {
            self.release_subtree(&subtree);
        }
        self.logical_parent_changed(child, before);
        Ok(())
    }

    /// Moves `child` to `new_parent` in the visual tree, or detaches it for
    /// `None`.
    pub fn change_visual_parent(
        &mut self,
        child: ElementId,
        new_parent: Option<ElementId>,
    ) -> Result<(), ViewError> {
        let old_parent = self.tree.visual_parent(child);
        if old_parent == new_parent {
            return Ok(());
        }
        self.tree.change_visual_parent(child, new_parent)?;
        if let Some(old_parent) = old_parent {
            self.invalidate_measure(old_parent);
        }
        self.visual_parent_changed(new_parent, child);
        Ok(())
    }

    /// Destroys `element`, its logical subtree and its visual-only
    /// descendants. Returns the removed ids.
    pub fn destroy(&mut self, element: ElementId) -> Result<Vec<ElementId>, ViewError> {
        if element == self.root {
            return Err(ViewError::RootElement);
        }
        let visual_parent = self.tree.visual_parent(element);
        let removed = self.tree.remove(element)?;
        self.release_subtree(&removed);
        for id in &removed {
            self.elements.remove(*id);
            self.restyle.remove(id);
        }
        if let Some(parent) = visual_parent {
            self.invalidate_measure(parent);
        }
        tracing::debug!(?element, count = removed.len(), "destroyed elements");
        Ok(removed)
    }

    /// Effective values of inheriting properties across `subtree` that are
    /// not stored on the element itself.
    fn inherited_snapshot(&self, subtree: &[ElementId]) -> Vec<InheritedValue> {
        let mut snapshot = Vec::new();
        for (id, registration) in self.registry.iter() {
            if !registration.inherits() {
                continue;
            }
            for &element in subtree {
                let Some(data) = self.elements.get(element) else {
                    continue;
                };
                if data.store.own_erased(id).is_some() {
                    continue;
                }
                if let Some(value) = self.get_erased(element, id) {
                    snapshot.push((element, id, value));
                }
            }
        }
        snapshot
    }

    fn logical_parent_changed(&mut self, child: ElementId, before: Vec<InheritedValue>) {
        let parent = self.tree.logical_parent(child);
        if let Some(data) = self.elements.get_mut(child) {
            data.logical_parent = parent;
        }
        let mut changed = 0_usize;
        for (element, id, old_value) in before {
            let Some(new_value) = self.get_erased(element, id) else {
                continue;
            };
            if new_value == old_value {
                continue;
            }
            let Some(registration) = self.registry.get(id) else {
                continue;
            };
            let flags = registration.flags();
            registration.notify_changed(&old_value, &new_value);
            self.invalidate_for(element, flags);
            changed += 1;
        }
        if changed > 0 {
            tracing::trace!(?child, changed, "inherited values moved with parent");
        }
        self.restyle.insert(child);
        self.redraw = true;
    }

    fn visual_parent_changed(&mut self, parent: Option<ElementId>, child: ElementId) {
        self.invalidate_measure(child);
        if let Some(parent) = parent {
            self.invalidate_measure(parent);
        }
        self.position_dirty = true;
        self.redraw = true;
    }

    /// Drops animations, bindings and focus held by `subtree`.
    fn release_subtree(&mut self, subtree: &[ElementId]) {
        let members: HashSet<ElementId> = subtree.iter().copied().collect();
        self.release_animations(&members);
        if self.focused.is_some_and(|f| members.contains(&f)) {
            let focused = self.focused.take();
            if let Some(focused) = focused
                && self.elements.contains_key(focused)
                && let Err(err) = self.on_lost_focus(focused)
            {
                tracing::debug!(%err, "could not blur detached element");
            }
        }
    }

    /// Adds a style class and schedules a restyle. Returns whether it was new.
    pub fn add_class(&mut self, element: ElementId, class: &str) -> Result<bool, ViewError> {
        let added = self.tree.add_class(element, class)?;
        if added {
            self.restyle.insert(element);
        }
        Ok(added)
    }

    /// Removes a style class and schedules a restyle. Returns whether it was
    /// present.
    pub fn remove_class(&mut self, element: ElementId, class: &str) -> Result<bool, ViewError> {
        let removed = self.tree.remove_class(element, class)?;
        if removed {
            self.restyle.insert(element);
        }
        Ok(removed)
    }

    /// Resolves `name` in the namescope visible from `element`.
    #[must_use]
    pub fn find_name(&self, element: ElementId, name: &str) -> Option<ElementId> {
        self.tree.find_name(element, name)
    }

    // --- Properties -------------------------------------------------------

    /// Effective value of `property` on `element`.
    ///
    /// Falls back to the default for stale ids.
    ///
    /// # Panics
    ///
    /// Panics if `property` was not registered with this view.
    #[must_use]
    pub fn get_value<T: 'static>(&self, element: ElementId, property: Property<T>) -> &T {
        let lookup = self.parent_lookup();
        match self.elements.get(element) {
            Some(data) => data.get_value(property, &self.registry, &lookup),
            None => self.registry.metadata(property).default_value(),
        }
    }

    /// Effective value by id, cloned out of its slot. `None` for unknown
    /// elements or properties.
    #[must_use]
    pub fn get_erased(&self, element: ElementId, id: PropertyId) -> Option<ErasedValue> {
        let registration = self.registry.get(id)?;
        let data = self.elements.get(element)?;
        if let Some((value, _)) = data.store.own_erased(id) {
            return Some(value.clone());
        }
        if registration.inherits()
            && let Some(value) = self.inherited_value(element, id)
        {
            return Some(value);
        }
        Some(registration.default_value())
    }

    /// Which precedence tier supplies `property` on `element`.
    #[must_use]
    pub fn value_source(&self, element: ElementId, id: impl Into<PropertyId>) -> ValueSource {
        let lookup = self.parent_lookup();
        self.elements.get(element).map_or(ValueSource::Default, |data| {
            data.value_source(&self.registry, id.into(), &lookup)
        })
    }

    /// Sets a local value.
    pub fn set_value<T: PropertyValue>(
        &mut self,
        element: ElementId,
        property: Property<T>,
        value: T,
    ) -> Result<(), ViewError> {
        self.set_value_at(element, property, Precedence::Local, value)
    }

    /// Clears the local value.
    pub fn clear_value<T: 'static>(
        &mut self,
        element: ElementId,
        property: Property<T>,
    ) -> Result<(), ViewError> {
        self.clear_value_at(element, property, Precedence::Local)
    }

    /// Sets a value at an explicit precedence.
    pub fn set_value_at<T: PropertyValue>(
        &mut self,
        element: ElementId,
        property: Property<T>,
        precedence: Precedence,
        value: T,
    ) -> Result<(), ViewError> {
        self.write_property(element, property.id(), precedence, Some(ErasedValue::new(value)))
            .map(drop)
    }

    /// Clears one precedence level.
    pub fn clear_value_at<T: 'static>(
        &mut self,
        element: ElementId,
        property: Property<T>,
        precedence: Precedence,
    ) -> Result<(), ViewError> {
        self.write_property(element, property.id(), precedence, None)
            .map(drop)
    }

    /// Value `element` would inherit for `id` from its logical ancestors.
    fn inherited_value(&self, element: ElementId, id: PropertyId) -> Option<ErasedValue> {
        let lookup = self.parent_lookup();
        let parent = self.elements.get(element)?.logical_parent;
        walk_inherited_erased(parent, id, &lookup).cloned()
    }

    /// The single write path: stores or clears one level, then invalidates
    /// layout and propagates inherited changes when the effective value
    /// changed.
    pub(crate) fn write_property(
        &mut self,
        element: ElementId,
        id: PropertyId,
        precedence: Precedence,
        value: Option<ErasedValue>,
    ) -> Result<Option<PropertyChange>, ViewError> {
        self.data(element)?;
        let inherits = self.registry.inherits(id);
        let inherited = if inherits {
            self.inherited_value(element, id)
        } else {
            None
        };
        let before = if inherits {
            self.get_erased(element, id)
        } else {
            None
        };
        let Some(data) = self.elements.get_mut(element) else {
            return Ok(None);
        };
        let change = data.write_erased(&self.registry, id, precedence, value, inherited.as_ref())?;
        if let Some(change) = change {
            self.invalidate_for(element, change.flags);
            if let Some(before) = before {
                self.propagate_inherited(element, id, change.flags, &before);
            }
        }
        Ok(change)
    }

    /// Pushes an inherited change down to logical descendants without a
    /// stored value of their own.
    fn propagate_inherited(
        &mut self,
        element: ElementId,
        id: PropertyId,
        flags: PropertyFlags,
        before: &ErasedValue,
    ) {
        let Some(after) = self.get_erased(element, id) else {
            return;
        };
        let mut stack: Vec<ElementId> = self.tree.logical_children(element).to_vec();
        let mut touched = 0_usize;
        while let Some(current) = stack.pop() {
            let Some(data) = self.elements.get(current) else {
                continue;
            };
            if data.store.own_erased(id).is_some() {
                continue;
            }
            touched += 1;
            if let Some(registration) = self.registry.get(id) {
                registration.notify_changed(before, &after);
            }
            self.invalidate_for(current, flags);
            stack.extend(self.tree.logical_children(current).iter().copied());
        }
        if touched > 0 {
            tracing::trace!(?element, %id, touched, "propagated inherited value");
        }
    }

    fn invalidate_for(&mut self, element: ElementId, flags: PropertyFlags) {
        if flags.contains(PropertyFlags::AFFECTS_MEASURE) {
            self.invalidate_measure(element);
        } else if flags.contains(PropertyFlags::AFFECTS_ARRANGE) {
            self.invalidate_arrange(element);
        }
        if flags.intersects(
            PropertyFlags::AFFECTS_RENDER
                | PropertyFlags::AFFECTS_MEASURE
                | PropertyFlags::AFFECTS_ARRANGE,
        ) {
            self.redraw = true;
        }
    }

    /// Marks `element` for re-measurement, walking up the visual parents
    /// until one is already dirty. Nothing is recomputed until the next
    /// layout pass.
    pub fn invalidate_measure(&mut self, element: ElementId) {
        let mut current = Some(element);
        let mut first = true;
        while let Some(id) = current {
            let Some(data) = self.elements.get_mut(id) else {
                break;
            };
            if !data.layout.invalidate_measure() && !first {
                break;
            }
            first = false;
            current = self.tree.visual_parent(id);
        }
    }

    /// Marks `element` for re-arrangement, walking up the visual parents
    /// until one is already dirty.
    pub fn invalidate_arrange(&mut self, element: ElementId) {
        let mut current = Some(element);
        let mut first = true;
        while let Some(id) = current {
            let Some(data) = self.elements.get_mut(id) else {
                break;
            };
            if !data.layout.invalidate_arrange() && !first {
                break;
            }
            first = false;
            current = self.tree.visual_parent(id);
        }
    }

    // --- Layout queries ---------------------------------------------------

    /// Where `element` is in the layout state machine.
    #[must_use]
    pub fn layout_state(&self, element: ElementId) -> LayoutState {
        self.elements
            .get(element)
            .map_or(LayoutState::Unmeasured, |d| d.layout.state())
    }

    /// Desired size from the last measure, margin included.
    #[must_use]
    pub fn desired_size(&self, element: ElementId) -> Size {
        self.elements
            .get(element)
            .map_or(Size::ZERO, |d| d.layout.desired_size())
    }

    /// Slot `element` was last arranged into, relative to its visual parent.
    #[must_use]
    pub fn final_rect(&self, element: ElementId) -> Rect {
        self.elements
            .get(element)
            .map_or(Rect::ZERO, |d| d.layout.final_rect())
    }

    /// Border box in root coordinates.
    #[must_use]
    pub fn absolute_bounds(&self, element: ElementId) -> Rect {
        self.elements
            .get(element)
            .map_or(Rect::ZERO, |d| d.layout.absolute_bounds())
    }

    /// Content scroll offset applied to `element`'s children.
    #[must_use]
    pub fn scroll_offset(&self, element: ElementId) -> Vec2 {
        self.elements
            .get(element)
            .map_or(Vec2::ZERO, |d| d.scroll_offset)
    }

    // --- Resources and content --------------------------------------------

    /// Resources declared by the stylesheet's `View` rules.
    #[must_use]
    pub fn resources(&self) -> &ResourceDictionary {
        &self.resources
    }

    /// Replaces the content loader and forgets every cached handle.
    pub fn set_content_loader(&mut self, loader: impl ContentLoader + 'static) {
        self.loader = Some(Box::new(loader));
        self.content.clear();
    }

    /// Resolves an asset reference through the loader, once per asset name.
    pub fn load_content(&mut self, resource: &SourcedResource) -> Option<ContentHandle> {
        let asset = resource.asset()?;
        let loader = self
            .loader
            .as_mut()
            .map(|loader| loader.as_mut() as &mut dyn ContentLoader);
        self.content.resolve(loader, asset)
    }

    /// Handle for the effective `Font` of `element`.
    pub fn font_handle(&mut self, element: ElementId) -> Option<ContentHandle> {
        let font = self.get_value(element, self.props.font).clone();
        self.load_content(&font)
    }
}
