// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying the stylesheet to elements.
//!
//! Styling is deferred: tree changes, class changes and state changes mark
//! logical subtrees, and [`View::apply_styles`] (run by
//! [`View::update`](crate::View::update)) resolves and writes them at the
//! [`Styled`](Precedence::Styled) level.

use std::rc::Rc;

use hashbrown::HashSet;
use slotmap::SecondaryMap;
use trellis_animation::Storyboard;
use trellis_property::{ErasedValue, Precedence, PropertyId};
use trellis_style::{MatchContext, StyleError, StyleSheet};
use trellis_tree::{Axis, ElementId, Tree};
use trellis_visual_state::TransitionKey;

use crate::element::ElementData;
use crate::error::ViewError;
use crate::view::View;

/// Selector matching over the view's tree and visual states.
struct StyleScope<'a> {
    tree: &'a Tree,
    elements: &'a SecondaryMap<ElementId, ElementData>,
}

impl MatchContext for StyleScope<'_> {
    type Element = ElementId;

    fn element_type(&self, element: ElementId) -> &str {
        self.tree.type_name(element).unwrap_or_default()
    }

    fn element_name(&self, element: ElementId) -> Option<&str> {
        self.tree.name(element)
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.tree.has_class(element, class)
    }

    fn is_in_state(&self, element: ElementId, state: &str) -> bool {
        self.elements
            .get(element)
            .is_some_and(|d| d.states.is_in_state(state))
    }

    fn logical_parent(&self, element: ElementId) -> Option<ElementId> {
        self.tree.logical_parent(element)
    }
}

/// What the stylesheet currently says about one element, detached from the
/// stylesheet's borrow.
struct ElementStyle {
    values: Vec<(PropertyId, ErasedValue)>,
    transitions: Vec<(TransitionKey, Rc<Storyboard>)>,
}

impl View {
    /// The active stylesheet.
    #[must_use]
    pub fn stylesheet(&self) -> &StyleSheet {
        &self.stylesheet
    }

    /// Replaces the stylesheet and its view resources. Every element is
    /// restyled on the next [`apply_styles`](Self::apply_styles).
    pub fn set_stylesheet(&mut self, stylesheet: StyleSheet) {
        self.resources = stylesheet.view_resources().clone();
        self.stylesheet = stylesheet;
        self.restyle_all = true;
        tracing::debug!(rules = self.stylesheet.len(), "stylesheet replaced");
    }

    /// Schedules `element` and its logical descendants for restyling.
    pub fn invalidate_style(&mut self, element: ElementId) {
        if self.elements.contains_key(element) {
            self.restyle.insert(element);
        }
    }

    /// Restyles every pending element. Returns how many were styled.
    ///
    /// On error, the failing element and those not yet reached stay pending.
    pub fn apply_styles(&mut self) -> Result<usize, ViewError> {
        let targets = self.pending_styles();
        for (index, &element) in targets.iter().enumerate() {
            if let Err(err) = self.style_element(element) {
                self.restyle.extend(targets[index..].iter().copied());
                return Err(err);
            }
        }
        if !targets.is_empty() {
            tracing::trace!(count = targets.len(), "styles applied");
        }
        Ok(targets.len())
    }

    /// Drains the pending set into a list of elements, ancestors first.
    fn pending_styles(&mut self) -> Vec<ElementId> {
        if core::mem::take(&mut self.restyle_all) {
            self.restyle.clear();
            return self.tree.ids().collect();
        }
        let roots: Vec<ElementId> = self.restyle.drain().collect();
        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        for root in roots {
            for id in self.tree.descendants(root, Axis::Logical) {
                if seen.insert(id) {
                    targets.push(id);
                }
            }
        }
        targets
    }

    fn resolve_style(&self, element: ElementId) -> Result<ElementStyle, ViewError> {
        let scope = StyleScope {
            tree: &self.tree,
            elements: &self.elements,
        };
        let resolved = self.stylesheet.resolve(&scope, element);
        let mut values: Vec<(PropertyId, ErasedValue)> = Vec::new();
        for setter in resolved.setters() {
            let Some((id, registration)) = self
                .registry
                .by_style_name(setter.property)
                .and_then(|id| Some((id, self.registry.get(id)?)))
            else {
                tracing::warn!(property = setter.property, "style names an unknown property");
                continue;
            };
            let value = setter.value.to_erased(registration, setter.property)?;
            // Two names may alias one property; the later declaration wins.
            match values.iter_mut().find(|(existing, _)| *existing == id) {
                Some(slot) => slot.1 = value,
                None => values.push((id, value)),
            }
        }

        let mut transitions = Vec::new();
        for transition in resolved.transitions() {
            let key =
                TransitionKey::from_arguments(transition.arguments).map_err(StyleError::from)?;
            match self.stylesheet.instantiate_storyboard(transition.storyboard) {
                Some(storyboard) => transitions.push((key, storyboard)),
                None => {
                    tracing::debug!(
                        storyboard = transition.storyboard,
                        "transition names an unknown storyboard"
                    );
                }
            }
        }
        Ok(ElementStyle {
            values,
            transitions,
        })
    }

    fn style_element(&mut self, element: ElementId) -> Result<(), ViewError> {
        let Some(data) = self.elements.get(element) else {
            return Ok(());
        };
        let style = self.resolve_style(element)?;
        let stale: Vec<PropertyId> = data
            .store
            .ids_at(Precedence::Styled)
            .filter(|id| !style.values.iter().any(|(kept, _)| kept == id))
            .collect();
        for id in stale {
            self.write_property(element, id, Precedence::Styled, None)?;
        }
        for (id, value) in style.values {
            self.write_property(element, id, Precedence::Styled, Some(value))?;
        }

        let Some(data) = self.elements.get_mut(element) else {
            return Ok(());
        };
        data.states.clear_transitions();
        for (key, storyboard) in style.transitions {
            if let Err(err) = data.states.set_transition_key(&key, storyboard) {
                tracing::debug!(?element, %err, "skipped transition");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, ElementBuilder};
    use peniko::color::palette::css;
    use trellis_property::ValueSource;
    use trellis_style::{Declaration, Selector, SelectorPart, StyleRule, StyleSheetBuilder};

    fn sheet() -> StyleSheet {
        StyleSheetBuilder::new()
            .rule(StyleRule::new(
                [Selector::new(SelectorPart::of_type("Button"))],
                [
                    Declaration::text("background", "red"),
                    Declaration::text("width", "80"),
                ],
            ))
            .rule(StyleRule::new(
                [Selector::new(SelectorPart::of_type("Button").class("wide"))],
                [Declaration::text("width", "120")],
            ))
            .build()
    }

    #[test]
    fn class_change_restyles_and_clears_stale_values() {
        let mut view = View::builder().stylesheet(sheet()).build().unwrap();
        let props = *view.properties();
        let button = view.create(ElementBuilder::new("Button").class("wide")).unwrap();
        view.add_child(view.root(), button).unwrap();
        view.apply_styles().unwrap();
        assert_eq!(*view.get_value(button, props.width), 120.0);
        assert_eq!(
            view.get_value(button, props.background).to_rgba8(),
            css::RED.to_rgba8()
        );

        view.remove_class(button, "wide").unwrap();
        view.apply_styles().unwrap();
        assert_eq!(*view.get_value(button, props.width), 80.0);

        view.set_stylesheet(StyleSheet::default());
        view.apply_styles().unwrap();
        assert_eq!(view.value_source(button, props.width), ValueSource::Default);
        assert_eq!(*view.get_value(button, props.background), Color::TRANSPARENT);
    }

    #[test]
    fn unparseable_value_stays_pending() {
        let sheet = StyleSheetBuilder::new()
            .rule(StyleRule::new(
                [Selector::new(SelectorPart::of_type("Box"))],
                [Declaration::text("width", "wide")],
            ))
            .build();
        let mut view = View::builder().stylesheet(sheet).build().unwrap();
        let boxed = view.create(ElementBuilder::new("Box")).unwrap();
        view.add_child(view.root(), boxed).unwrap();
        let err = view.apply_styles().unwrap_err();
        assert!(matches!(err, ViewError::Style(StyleError::InvalidValue { .. })));
        assert!(view.apply_styles().is_err());
    }

    #[test]
    fn nothing_pending_styles_nothing() {
        let mut view = View::builder().stylesheet(sheet()).build().unwrap();
        assert_eq!(view.apply_styles().unwrap(), 1);
        assert_eq!(view.apply_styles().unwrap(), 0);
    }
}
