// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame driving and drawing.

use core::time::Duration;

use kurbo::Rect;
use peniko::Color;
use trellis_layout::Visibility;
use trellis_tree::{Axis, ElementId};

use crate::behavior::{DrawCx, UpdateCx};
use crate::error::ViewError;
use crate::view::View;

/// Sink for drawing commands.
///
/// The view only emits filled rectangles and opacity groups; anything richer
/// is drawn by element behaviors against their own backend through this
/// trait object.
pub trait DrawingContext {
    /// Starts a group composited with `opacity` in `0.0..=1.0`.
    fn push_opacity(&mut self, opacity: f64);

    /// Ends the innermost opacity group.
    fn pop_opacity(&mut self);

    /// Fills `rect` in root coordinates.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Timing for one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameTime {
    /// Time since the previous frame.
    pub elapsed: Duration,
    /// Time since the first frame.
    pub total: Duration,
}

impl FrameTime {
    /// Frame timing from its two components.
    #[must_use]
    pub fn new(elapsed: Duration, total: Duration) -> Self {
        Self { elapsed, total }
    }
}

enum Visit {
    Enter(ElementId, f64),
    Exit { pushed: bool },
}

impl View {
    /// Runs one frame: apply pending styles, advance animations, run element
    /// updates and lay out.
    pub fn update(&mut self, time: FrameTime) -> Result<(), ViewError> {
        let _span = tracing::trace_span!("update", elapsed = ?time.elapsed).entered();
        self.apply_styles()?;
        self.advance_animations(time.elapsed.as_secs_f64())?;
        self.run_updates(time);
        // Updates may have written styled-affecting state.
        self.apply_styles()?;
        self.layout();
        Ok(())
    }

    fn run_updates(&mut self, time: FrameTime) {
        let order: Vec<ElementId> = self.tree.descendants(self.root, Axis::Visual).collect();
        for id in order {
            let Some(mut behavior) = self.elements.get_mut(id).and_then(|d| d.behavior.take())
            else {
                continue;
            };
            if let Some(updatable) = behavior.as_updatable() {
                updatable.update(&mut UpdateCx::new(self, id, time));
            }
            if let Some(data) = self.elements.get_mut(id) {
                data.behavior = Some(behavior);
            }
        }
    }

    /// Draws the visual tree from the root, parents before children.
    ///
    /// Hidden and collapsed elements are skipped along with their subtrees.
    /// Each element fills its `Background` over its border box, then its
    /// behavior draws.
    pub fn draw(&mut self, time: FrameTime, context: &mut dyn DrawingContext) {
        self.draw_tree(time, context);
        self.redraw = false;
    }

    fn draw_tree(&self, time: FrameTime, context: &mut dyn DrawingContext) {
        let mut stack = vec![Visit::Enter(self.root, 1.0)];
        while let Some(visit) = stack.pop() {
            let (id, inherited_opacity) = match visit {
                Visit::Enter(id, opacity) => (id, opacity),
                Visit::Exit { pushed } => {
                    if pushed {
                        context.pop_opacity();
                    }
                    continue;
                }
            };
            if *self.get_value(id, self.props.visibility) != Visibility::Visible {
                continue;
            }
            let opacity = *self.get_value(id, self.props.opacity);
            let pushed = opacity < 1.0;
            if pushed {
                context.push_opacity(opacity);
            }
            let bounds = self.absolute_bounds(id);
            let background = *self.get_value(id, self.props.background);
            if background.components[3] > 0.0 {
                context.fill_rect(bounds, background);
            }
            if let Some(drawable) = self
                .elements
                .get(id)
                .and_then(|d| d.behavior.as_deref())
                .and_then(|b| b.as_drawable())
            {
                let effective = inherited_opacity * opacity;
                drawable.draw(&mut DrawCx::new(self, id, time, effective, &mut *context));
            }
            stack.push(Visit::Exit { pushed });
            let effective = inherited_opacity * opacity;
            stack.extend(
                self.tree
                    .visual_children(id)
                    .iter()
                    .rev()
                    .map(|&child| Visit::Enter(child, effective)),
            );
        }
    }
}
