// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element layout results and their validity.

use kurbo::{Point, Rect, Size, Vec2};

use crate::protocol::ArrangeOutcome;

/// How far an element has progressed through the current layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayoutState {
    /// Never measured, or measure was invalidated.
    #[default]
    Unmeasured,
    /// Has a valid desired size.
    Measured,
    /// Has a valid slot and used size.
    Arranged,
    /// Has a valid absolute position.
    Positioned,
}

/// Cached measure/arrange/position results for one element.
///
/// Measuring with the same available size while the measure is valid returns
/// the stored desired size without running the element's override, so repeated
/// passes are bit-identical.
#[derive(Clone, Debug, Default)]
pub struct LayoutCache {
    state: LayoutState,
    measure_valid: bool,
    arrange_valid: bool,
    available: Size,
    desired: Size,
    final_rect: Rect,
    outcome: ArrangeOutcome,
    absolute_position: Point,
}

fn same_size(a: Size, b: Size) -> bool {
    a.width.to_bits() == b.width.to_bits() && a.height.to_bits() == b.height.to_bits()
}

impl LayoutCache {
    /// Fresh, unmeasured cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// Whether the stored desired size can be reused.
    #[must_use]
    pub fn is_measure_valid(&self) -> bool {
        self.measure_valid
    }

    /// Whether the stored arrangement can be reused.
    #[must_use]
    pub fn is_arrange_valid(&self) -> bool {
        self.arrange_valid
    }

    /// The stored desired size if it was computed for exactly `available`.
    #[must_use]
    pub fn cached_measure(&self, available: Size) -> Option<Size> {
        (self.measure_valid && same_size(self.available, available)).then_some(self.desired)
    }

    /// Stores a measure result.
    pub fn record_measure(&mut self, available: Size, desired: Size) {
        if !same_size(self.desired, desired) {
            self.arrange_valid = false;
        }
        self.available = available;
        self.desired = desired;
        self.measure_valid = true;
        self.state = if self.arrange_valid {
            self.state.max(LayoutState::Measured)
        } else {
            LayoutState::Measured
        };
    }

    /// Runs `measure` unless a valid result for `available` is cached.
    pub fn measure_with(&mut self, available: Size, measure: impl FnOnce(Size) -> Size) -> Size {
        if let Some(desired) = self.cached_measure(available) {
            return desired;
        }
        let desired = measure(available);
        self.record_measure(available, desired);
        desired
    }

    /// The stored arrangement if it was computed for exactly `final_rect`.
    #[must_use]
    pub fn cached_arrange(&self, final_rect: Rect) -> Option<ArrangeOutcome> {
        (self.arrange_valid && self.final_rect == final_rect).then_some(self.outcome)
    }

    /// Stores an arrange result.
    pub fn record_arrange(&mut self, final_rect: Rect, outcome: ArrangeOutcome) {
        self.final_rect = final_rect;
        self.outcome = outcome;
        self.arrange_valid = true;
        self.state = LayoutState::Arranged;
    }

    /// Stores the absolute position computed by the position pass.
    pub fn record_position(&mut self, absolute_position: Point) {
        self.absolute_position = absolute_position;
        if self.arrange_valid {
            self.state = LayoutState::Positioned;
        }
    }

    /// Marks the desired size stale. Returns whether it was valid before.
    pub fn invalidate_measure(&mut self) -> bool {
        let was_valid = self.measure_valid;
        self.measure_valid = false;
        self.arrange_valid = false;
        self.state = LayoutState::Unmeasured;
        was_valid
    }

    /// Marks the arrangement stale. Returns whether it was valid before.
    pub fn invalidate_arrange(&mut self) -> bool {
        let was_valid = self.arrange_valid;
        self.arrange_valid = false;
        if self.measure_valid {
            self.state = LayoutState::Measured;
        }
        was_valid
    }

    /// Last measured desired size, margin included.
    #[must_use]
    pub fn desired_size(&self) -> Size {
        self.desired
    }

    /// Last available size offered to measure.
    #[must_use]
    pub fn available_size(&self) -> Size {
        self.available
    }

    /// Slot the parent last arranged this element into.
    #[must_use]
    pub fn final_rect(&self) -> Rect {
        self.final_rect
    }

    /// Size the element used inside its slot.
    #[must_use]
    pub fn used_size(&self) -> Size {
        self.outcome.used_size
    }

    /// Offset of the border box from the slot origin.
    #[must_use]
    pub fn render_offset(&self) -> Vec2 {
        self.outcome.render_offset
    }

    /// Offset of the border box from its visual parent's origin.
    #[must_use]
    pub fn relative_offset(&self) -> Vec2 {
        self.final_rect.origin().to_vec2() + self.outcome.render_offset
    }

    /// Top-left of the border box in root coordinates.
    #[must_use]
    pub fn absolute_position(&self) -> Point {
        self.absolute_position
    }

    /// Border box in root coordinates.
    #[must_use]
    pub fn absolute_bounds(&self) -> Rect {
        Rect::from_origin_size(self.absolute_position, self.outcome.used_size)
    }
}

/// Computes a child's absolute position from its parent's.
///
/// `scroll_offset` is the parent's content scroll, subtracted from every child.
#[must_use]
pub fn child_position(parent_absolute: Point, scroll_offset: Vec2, cache: &LayoutCache) -> Point {
    parent_absolute + cache.relative_offset() - scroll_offset
}
