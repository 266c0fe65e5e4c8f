// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities an element can opt into.
//!
//! An element without a [`Behavior`], or whose behavior does not provide a
//! capability, gets the framework default:
//!
//! - measure: children are overlaid inside the padding and the element wants
//!   the largest child's size plus padding;
//! - arrange: every child gets the padded content box;
//! - draw: only the `Background` fill;
//! - focus: the element accepts focus;
//! - update: nothing.

use std::fmt;

use kurbo::{Rect, Size};
use trellis_layout::ArrangeOptions;
use trellis_property::{Property, PropertyValue};
use trellis_tree::ElementId;

use crate::error::ViewError;
use crate::properties::StandardProperties;
use crate::render::{DrawingContext, FrameTime};
use crate::view::View;

/// Entry point for element-specific behavior.
///
/// Each accessor returns the matching capability, or `None` to keep the
/// default.
pub trait Behavior: 'static {
    /// Custom measurement.
    fn as_measurable(&mut self) -> Option<&mut dyn Measurable> {
        None
    }

    /// Custom arrangement.
    fn as_arrangeable(&mut self) -> Option<&mut dyn Arrangeable> {
        None
    }

    /// Custom drawing.
    fn as_drawable(&self) -> Option<&dyn Drawable> {
        None
    }

    /// Focus policy and notifications.
    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        None
    }

    /// Per-frame work.
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        None
    }
}

/// Computes the natural size of an element's content.
pub trait Measurable {
    /// Returns the content size wanted within `available`, which excludes
    /// margin and may be infinite.
    fn measure_override(&mut self, cx: &mut MeasureCx<'_>, available: Size) -> Size;
}

/// Places an element's children.
pub trait Arrangeable {
    /// Arranges children within `final_size` and returns the size used.
    fn arrange_override(
        &mut self,
        cx: &mut ArrangeCx<'_>,
        final_size: Size,
        options: ArrangeOptions,
    ) -> Size;
}

/// Emits drawing commands.
pub trait Drawable {
    /// Draws the element's own content; children are drawn afterwards.
    fn draw(&self, cx: &mut DrawCx<'_>);
}

/// Focus participation.
pub trait Focusable {
    /// Whether the element currently accepts focus.
    fn is_focusable(&self) -> bool {
        true
    }

    /// Called after the element gains or loses focus.
    fn focus_changed(&mut self, focused: bool) {
        let _ = focused;
    }
}

/// Per-frame hook.
pub trait Updatable {
    /// Called once per [`View::update`].
    fn update(&mut self, cx: &mut UpdateCx<'_>);
}

/// Context handed to [`Measurable::measure_override`].
pub struct MeasureCx<'a> {
    view: &'a mut View,
    element: ElementId,
}

impl<'a> MeasureCx<'a> {
    pub(crate) fn new(view: &'a mut View, element: ElementId) -> Self {
        Self { view, element }
    }

    /// The element being measured.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Read access to the view.
    #[must_use]
    pub fn view(&self) -> &View {
        &*self.view
    }

    /// Standard property handles.
    #[must_use]
    pub fn properties(&self) -> &StandardProperties {
        self.view.properties()
    }

    /// Effective value of `property` on the element.
    #[must_use]
    pub fn get<T: 'static>(&self, property: Property<T>) -> &T {
        self.view.get_value(self.element, property)
    }

    /// Number of visual children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.view.tree().visual_children(self.element).len()
    }

    /// The `index`th visual child.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<ElementId> {
        self.view.tree().visual_child(self.element, index)
    }

    /// Measures a child and returns its desired size, margin included.
    pub fn measure_child(&mut self, child: ElementId, available: Size) -> Size {
        self.view.measure_element(child, available)
    }
}

impl fmt::Debug for MeasureCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureCx")
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

/// Context handed to [`Arrangeable::arrange_override`].
pub struct ArrangeCx<'a> {
    view: &'a mut View,
    element: ElementId,
}

impl<'a> ArrangeCx<'a> {
    pub(crate) fn new(view: &'a mut View, element: ElementId) -> Self {
        Self { view, element }
    }

    /// The element being arranged.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Read access to the view.
    #[must_use]
    pub fn view(&self) -> &View {
        &*self.view
    }

    /// Effective value of `property` on the element.
    #[must_use]
    pub fn get<T: 'static>(&self, property: Property<T>) -> &T {
        self.view.get_value(self.element, property)
    }

    /// Number of visual children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.view.tree().visual_children(self.element).len()
    }

    /// The `index`th visual child.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<ElementId> {
        self.view.tree().visual_child(self.element, index)
    }

    /// Desired size the child reported from its last measure.
    #[must_use]
    pub fn desired_size(&self, child: ElementId) -> Size {
        self.view.desired_size(child)
    }

    /// Places a child in `slot`, relative to this element's top-left corner.
    pub fn arrange_child(&mut self, child: ElementId, slot: Rect, options: ArrangeOptions) {
        self.view.arrange_element(child, slot, options);
    }
}

impl fmt::Debug for ArrangeCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrangeCx")
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

/// Context handed to [`Drawable::draw`].
pub struct DrawCx<'a> {
    view: &'a View,
    element: ElementId,
    time: FrameTime,
    opacity: f64,
    context: &'a mut dyn DrawingContext,
}

impl<'a> DrawCx<'a> {
    pub(crate) fn new(
        view: &'a View,
        element: ElementId,
        time: FrameTime,
        opacity: f64,
        context: &'a mut dyn DrawingContext,
    ) -> Self {
        Self {
            view,
            element,
            time,
            opacity,
            context,
        }
    }

    /// The element being drawn.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Read access to the view.
    #[must_use]
    pub fn view(&self) -> &View {
        self.view
    }

    /// Frame timing.
    #[must_use]
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// Product of this element's and its visual ancestors' opacity.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Border box in root coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.view.absolute_bounds(self.element)
    }

    /// Effective value of `property` on the element.
    #[must_use]
    pub fn get<T: 'static>(&self, property: Property<T>) -> &T {
        self.view.get_value(self.element, property)
    }

    /// The output surface.
    pub fn context(&mut self) -> &mut dyn DrawingContext {
        &mut *self.context
    }
}

impl fmt::Debug for DrawCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawCx")
            .field("element", &self.element)
            .field("time", &self.time)
            .field("opacity", &self.opacity)
            .finish_non_exhaustive()
    }
}

/// Context handed to [`Updatable::update`].
pub struct UpdateCx<'a> {
    view: &'a mut View,
    element: ElementId,
    time: FrameTime,
}

impl<'a> UpdateCx<'a> {
    pub(crate) fn new(view: &'a mut View, element: ElementId, time: FrameTime) -> Self {
        Self {
            view,
            element,
            time,
        }
    }

    /// The element being updated.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Frame timing.
    #[must_use]
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// The view, mutably.
    pub fn view(&mut self) -> &mut View {
        &mut *self.view
    }

    /// Effective value of `property` on the element.
    #[must_use]
    pub fn get<T: 'static>(&self, property: Property<T>) -> &T {
        self.view.get_value(self.element, property)
    }

    /// Sets a local value on the element.
    pub fn set<T: PropertyValue>(&mut self, property: Property<T>, value: T) -> Result<(), ViewError> {
        self.view.set_value(self.element, property, value)
    }
}

impl fmt::Debug for UpdateCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateCx")
            .field("element", &self.element)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}
