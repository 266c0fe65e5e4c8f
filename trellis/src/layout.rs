// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measure, arrange and position passes over the visual tree.
//!
//! Measure and arrange recurse through element behaviors, so each element's
//! behavior is taken out of its slot while it runs and put back afterwards.
//! The position pass is iterative.

use kurbo::{Insets, Point, Rect, Size, Vec2};
use trellis_layout::{ArrangeOptions, Visibility, arrange_core, child_position, measure_core};
use trellis_tree::ElementId;

use crate::behavior::{ArrangeCx, MeasureCx};
use crate::view::View;

fn deflate(size: Size, padding: Insets) -> Size {
    Size::new(
        (size.width - padding.x_value()).max(0.0),
        (size.height - padding.y_value()).max(0.0),
    )
}

impl View {
    /// Runs a full layout: measure the root against the viewport, arrange it
    /// to fill the viewport, then recompute absolute positions.
    ///
    /// Elements whose cached results are still valid are skipped, so a pass
    /// after no changes does no element work.
    pub fn layout(&mut self) {
        let root = self.root;
        let viewport = self.viewport;
        self.measure_element(root, viewport);
        self.arrange_element(
            root,
            Rect::from_origin_size(Point::ZERO, viewport),
            ArrangeOptions::FILL,
        );
        self.update_positions();
    }

    /// Measures `element` within `available` and returns its desired size,
    /// margin included. A valid cached result for the same available size is
    /// returned as is.
    pub fn measure_element(&mut self, element: ElementId, available: Size) -> Size {
        let Some(data) = self.elements.get(element) else {
            return Size::ZERO;
        };
        if let Some(desired) = data.layout.cached_measure(available) {
            return desired;
        }
        let params = self.props.layout_params(&data.store, &self.registry);
        let mut behavior = self
            .elements
            .get_mut(element)
            .and_then(|d| d.behavior.take());

        let desired = measure_core(&params, available, |content| {
            match behavior.as_mut().and_then(|b| b.as_measurable()) {
                Some(measurable) => {
                    measurable.measure_override(&mut MeasureCx::new(self, element), content)
                }
                None => self.measure_overlay(element, content, params.padding),
            }
        });

        if let Some(data) = self.elements.get_mut(element) {
            data.behavior = behavior;
            data.layout.record_measure(available, desired);
        }
        tracing::trace!(?element, ?available, ?desired, "measured");
        desired
    }

    fn measure_overlay(&mut self, element: ElementId, available: Size, padding: Insets) -> Size {
        let inner = deflate(available, padding);
        let children = self.tree.visual_children(element).to_vec();
        let mut content = Size::ZERO;
        for child in children {
            let desired = self.measure_element(child, inner);
            content.width = content.width.max(desired.width);
            content.height = content.height.max(desired.height);
        }
        Size::new(
            content.width + padding.x_value(),
            content.height + padding.y_value(),
        )
    }

    /// Arranges `element` into `final_rect`, given relative to its visual
    /// parent's top-left corner.
    ///
    /// An element whose measure is stale is measured against the slot size
    /// first.
    pub fn arrange_element(&mut self, element: ElementId, final_rect: Rect, options: ArrangeOptions) {
        let Some(data) = self.elements.get(element) else {
            return;
        };
        if data.layout.cached_arrange(final_rect).is_some() {
            return;
        }
        if !data.layout.is_measure_valid() {
            self.measure_element(element, final_rect.size());
        }
        let Some(data) = self.elements.get(element) else {
            return;
        };
        let params = self.props.layout_params(&data.store, &self.registry);
        let desired = data.layout.desired_size();
        let mut behavior = self
            .elements
            .get_mut(element)
            .and_then(|d| d.behavior.take());

        let outcome = arrange_core(&params, desired, final_rect, options, |size, options| {
            match behavior.as_mut().and_then(|b| b.as_arrangeable()) {
                Some(arrangeable) => {
                    arrangeable.arrange_override(&mut ArrangeCx::new(self, element), size, options)
                }
                None => {
                    self.arrange_overlay(element, size, params.padding);
                    size
                }
            }
        });

        if let Some(data) = self.elements.get_mut(element) {
            data.behavior = behavior;
            data.layout.record_arrange(final_rect, outcome);
        }
        self.position_dirty = true;
        self.redraw = true;
        tracing::trace!(?element, ?final_rect, used = ?outcome.used_size, "arranged");
    }

    fn arrange_overlay(&mut self, element: ElementId, size: Size, padding: Insets) {
        let slot = Rect::from_origin_size(
            Point::new(padding.x0, padding.y0),
            deflate(size, padding),
        );
        let children = self.tree.visual_children(element).to_vec();
        for child in children {
            self.arrange_element(child, slot, ArrangeOptions::empty());
        }
    }

    /// Recomputes absolute positions top-down from the root.
    fn update_positions(&mut self) {
        if !self.position_dirty {
            return;
        }
        let Some(root) = self.elements.get(self.root) else {
            return;
        };
        let mut stack = vec![(self.root, Point::ZERO + root.layout.relative_offset())];
        while let Some((id, position)) = stack.pop() {
            let Some(data) = self.elements.get_mut(id) else {
                continue;
            };
            data.layout.record_position(position);
            let scroll = data.scroll_offset;
            for &child in self.tree.visual_children(id) {
                if let Some(child_data) = self.elements.get(child) {
                    stack.push((child, child_position(position, scroll, &child_data.layout)));
                }
            }
        }
        self.position_dirty = false;
    }

    /// Scrolls `element`'s content. Children move by `-offset` on the next
    /// layout without being re-measured.
    pub fn set_scroll_offset(&mut self, element: ElementId, offset: Vec2) {
        if let Some(data) = self.elements.get_mut(element)
            && data.scroll_offset != offset
        {
            data.scroll_offset = offset;
            self.position_dirty = true;
            self.redraw = true;
        }
    }

    /// Topmost visible element whose bounds contain `point`, in root
    /// coordinates. Later siblings are above earlier ones.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        let mut hit = None;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if *self.get_value(id, self.props.visibility) != Visibility::Visible {
                continue;
            }
            if self.absolute_bounds(id).contains(point) {
                hit = Some(id);
            }
            stack.extend(self.tree.visual_children(id).iter().rev().copied());
        }
        hit
    }
}
