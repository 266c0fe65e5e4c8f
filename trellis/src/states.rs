// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual state changes and focus.

use trellis_tree::{ElementId, TreeError};
use trellis_visual_state::{BLURRED, FOCUS_GROUP, FOCUSED, StateChange};

use crate::error::ViewError;
use crate::view::View;

impl View {
    /// Current state of `group` on `element`.
    #[must_use]
    pub fn current_state(&self, element: ElementId, group: &str) -> Option<&str> {
        self.elements.get(element)?.states.current_state(group)
    }

    /// Whether any of `element`'s groups is in `state`.
    #[must_use]
    pub fn is_in_state(&self, element: ElementId, state: &str) -> bool {
        self.elements
            .get(element)
            .is_some_and(|d| d.states.is_in_state(state))
    }

    /// Moves `group` on `element` to `state`.
    ///
    /// The storyboard started by the group's previous transition is stopped.
    /// If a styled transition matches, its storyboard begins; otherwise the
    /// state snaps. Either way the element's logical subtree is restyled so
    /// state selectors pick up the change. Returns `false` if the group was
    /// already in `state`. A transition storyboard that does not fit the
    /// properties it animates is an error, and the group stays put.
    pub fn go_to_state(
        &mut self,
        element: ElementId,
        group: &str,
        state: &str,
    ) -> Result<bool, ViewError> {
        self.check_transition(element, group, state)?;
        let data = self
            .elements
            .get_mut(element)
            .ok_or(TreeError::UnknownElement(element))?;
        let storyboard = match data.states.go_to_state(group, state)? {
            StateChange::Unchanged => return Ok(false),
            StateChange::Snap => None,
            StateChange::Animate(storyboard) => Some(storyboard),
        };
        let previous = data.transition_storyboards.remove(group);
        tracing::debug!(?element, group, state, animated = storyboard.is_some(), "state changed");

        if let Some(previous) = previous {
            self.stop_storyboard(element, &previous)?;
        }
        if let Some(storyboard) = storyboard {
            let name = storyboard.name().to_owned();
            self.begin_storyboard_with(element, storyboard)?;
            if let Some(data) = self.elements.get_mut(element) {
                data.transition_storyboards.insert(group.to_owned(), name);
            }
        }
        self.restyle.insert(element);
        self.redraw = true;
        Ok(true)
    }

    /// Type-checks the storyboard that moving `group` to `state` would begin.
    fn check_transition(
        &self,
        element: ElementId,
        group: &str,
        state: &str,
    ) -> Result<(), ViewError> {
        let data = self
            .elements
            .get(element)
            .ok_or(TreeError::UnknownElement(element))?;
        let pending = data
            .states
            .get(group)
            .filter(|visuals| visuals.has_state(state) && visuals.current_state() != state)
            .and_then(|visuals| visuals.transition(visuals.current_state(), state));
        if let Some(pending) = pending {
            self.resolve_targets(element, pending)?;
        }
        Ok(())
    }

    /// The focused element.
    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Whether `element` currently accepts focus.
    #[must_use]
    pub fn is_focusable(&mut self, element: ElementId) -> bool {
        let Some(data) = self.elements.get_mut(element) else {
            return false;
        };
        data.behavior
            .as_mut()
            .and_then(|b| b.as_focusable())
            .is_none_or(|f| f.is_focusable())
    }

    /// Moves focus to `element`, or clears it for `None`.
    ///
    /// Returns `false` if focus did not move, either because `element` is
    /// already focused or because it refuses focus.
    pub fn set_focus(&mut self, element: Option<ElementId>) -> Result<bool, ViewError> {
        if self.focused == element {
            return Ok(false);
        }
        if let Some(element) = element {
            if !self.contains(element) {
                return Err(TreeError::UnknownElement(element).into());
            }
            if !self.is_focusable(element) {
                tracing::debug!(?element, "element refused focus");
                return Ok(false);
            }
        }
        if let Some(old) = self.focused {
            self.check_transition(old, FOCUS_GROUP, BLURRED)?;
        }
        if let Some(element) = element {
            self.check_transition(element, FOCUS_GROUP, FOCUSED)?;
        }
        if let Some(old) = self.focused.take() {
            self.on_lost_focus(old)?;
        }
        self.focused = element;
        if let Some(element) = element {
            self.on_got_focus(element)?;
        }
        Ok(true)
    }

    /// Moves `element`'s focus group to `focused` and notifies its behavior.
    pub fn on_got_focus(&mut self, element: ElementId) -> Result<bool, ViewError> {
        self.focus_changed(element, true)
    }

    /// Moves `element`'s focus group to `blurred` and notifies its behavior.
    pub fn on_lost_focus(&mut self, element: ElementId) -> Result<bool, ViewError> {
        self.focus_changed(element, false)
    }

    fn focus_changed(&mut self, element: ElementId, focused: bool) -> Result<bool, ViewError> {
        let state = if focused { FOCUSED } else { BLURRED };
        let changed = self.go_to_state(element, FOCUS_GROUP, state)?;
        if changed
            && let Some(focusable) = self
                .elements
                .get_mut(element)
                .and_then(|d| d.behavior.as_mut())
                .and_then(|b| b.as_focusable())
        {
            focusable.focus_changed(focused);
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use trellis_animation::{Curve, CurveKey, StoryboardBuilder};

    use super::*;
    use crate::behavior::{Behavior, Focusable};
    use crate::ElementBuilder;

    struct Label;

    impl Behavior for Label {
        fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
            Some(self)
        }
    }

    impl Focusable for Label {
        fn is_focusable(&self) -> bool {
            false
        }
    }

    #[test]
    fn focus_moves_between_elements() {
        let mut view = View::builder().build().unwrap();
        let root = view.root();
        let a = view.create(ElementBuilder::new("Button")).unwrap();
        let b = view.create(ElementBuilder::new("Button")).unwrap();
        view.add_child(root, a).unwrap();
        view.add_child(root, b).unwrap();

        assert!(view.set_focus(Some(a)).unwrap());
        assert_eq!(view.current_state(a, FOCUS_GROUP), Some(FOCUSED));
        assert!(!view.set_focus(Some(a)).unwrap());
        assert!(view.set_focus(Some(b)).unwrap());
        assert_eq!(view.current_state(a, FOCUS_GROUP), Some(BLURRED));
        assert_eq!(view.current_state(b, FOCUS_GROUP), Some(FOCUSED));
        assert!(view.set_focus(None).unwrap());
        assert_eq!(view.focused(), None);
        assert!(!view.is_in_state(b, FOCUSED));
    }

    #[test]
    fn unfocusable_behavior_refuses_focus() {
        let mut view = View::builder().build().unwrap();
        let label = view.create(ElementBuilder::new("Label").behavior(Label)).unwrap();
        assert!(!view.set_focus(Some(label)).unwrap());
        assert_eq!(view.focused(), None);
    }

    #[test]
    fn unknown_state_is_an_error() {
        let mut view = View::builder().build().unwrap();
        let root = view.root();
        assert!(matches!(
            view.go_to_state(root, "common", "hover"),
            Err(ViewError::VisualState(_))
        ));
        assert!(matches!(
            view.go_to_state(root, FOCUS_GROUP, "pressed"),
            Err(ViewError::VisualState(_))
        ));
    }

    #[test]
    fn mistyped_transition_keeps_state() {
        let mut view = View::builder().build().unwrap();
        let root = view.root();
        let a = view.create(ElementBuilder::new("Button")).unwrap();
        let b = view.create(ElementBuilder::new("Button")).unwrap();
        view.add_child(root, a).unwrap();
        view.add_child(root, b).unwrap();
        assert!(view.set_focus(Some(a)).unwrap());

        // Width holds f64, so an f32 track cannot drive it.
        let bad = Rc::new(
            StoryboardBuilder::new("bad")
                .track(
                    None,
                    "width",
                    Curve::clamped([CurveKey::new(0.0, 1.0_f32), CurveKey::new(1.0, 2.0_f32)])
                        .unwrap(),
                )
                .build(),
        );
        view.elements
            .get_mut(b)
            .unwrap()
            .states
            .set_transition(FOCUS_GROUP, None, FOCUSED, bad)
            .unwrap();

        assert!(matches!(
            view.go_to_state(b, FOCUS_GROUP, FOCUSED),
            Err(ViewError::Animation(_))
        ));
        assert_eq!(view.current_state(b, FOCUS_GROUP), Some(BLURRED));

        assert!(matches!(view.set_focus(Some(b)), Err(ViewError::Animation(_))));
        assert_eq!(view.focused(), Some(a));
        assert_eq!(view.current_state(a, FOCUS_GROUP), Some(FOCUSED));
        assert_eq!(view.current_state(b, FOCUS_GROUP), Some(BLURRED));
        assert_eq!(view.running_storyboards(), 0);
    }
}
