// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stylesheets: ordered rules plus the storyboards they reference.
//!
//! Resolution walks rules in stylesheet order. Every matching rule contributes
//! its setters, and a later rule overrides an earlier one for the same
//! property regardless of selector specificity. Transitions of every matching
//! rule are collected in order.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use trellis_animation::Storyboard;

use crate::resources::{ResourceDictionary, ResourceDictionaryBuilder};
use crate::rule::{Declaration, DeclaredValue, StyleRule};
use crate::selector::{MatchContext, Specificity};

#[derive(Debug, Default)]
struct StyleSheetData {
    rules: Vec<StyleRule>,
    storyboards: HashMap<String, Rc<Storyboard>>,
    resources: ResourceDictionary,
}

/// An immutable, cheaply cloned set of rules and storyboards.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    inner: Rc<StyleSheetData>,
}

impl StyleSheet {
    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.rules.len()
    }

    /// Whether the sheet has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.rules.is_empty()
    }

    /// Rules in stylesheet order.
    pub fn rules(&self) -> impl Iterator<Item = &StyleRule> + '_ {
        self.inner.rules.iter()
    }

    /// Number of named storyboards.
    #[must_use]
    pub fn storyboard_count(&self) -> usize {
        self.inner.storyboards.len()
    }

    /// Looks up a storyboard by name.
    ///
    /// A missing name is not an error; it simply has no effect.
    #[must_use]
    pub fn instantiate_storyboard(&self, name: &str) -> Option<Rc<Storyboard>> {
        let found = self.inner.storyboards.get(name).cloned();
        if found.is_none() {
            tracing::debug!(name, "no storyboard with this name");
        }
        found
    }

    /// Resources declared by `View` rules, later declarations winning.
    #[must_use]
    pub fn view_resources(&self) -> &ResourceDictionary {
        &self.inner.resources
    }

    /// Everything the sheet says about `element`.
    pub fn resolve<C: MatchContext + ?Sized>(&self, cx: &C, element: C::Element) -> ResolvedStyle<'_> {
        let mut resolved = ResolvedStyle::default();
        for (index, rule) in self.inner.rules.iter().enumerate() {
            let Some(selector) = rule.matches_element(cx, element) else {
                continue;
            };
            let specificity = selector.specificity();
            for declaration in rule.declarations() {
                match declaration {
                    Declaration::Setter { property, value } => resolved.set(ResolvedSetter {
                        property,
                        value,
                        specificity,
                        rule: index,
                    }),
                    Declaration::Transition { arguments, storyboard } => {
                        resolved.transitions.push(ResolvedTransition {
                            arguments,
                            storyboard,
                            rule: index,
                        });
                    }
                }
            }
        }
        resolved
    }
}

/// A setter that survived the cascade.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedSetter<'a> {
    /// Property style name as declared.
    pub property: &'a str,
    /// Declared value.
    pub value: &'a DeclaredValue,
    /// Specificity of the selector that matched.
    pub specificity: Specificity,
    /// Index of the contributing rule.
    pub rule: usize,
}

/// A transition contributed by a matching rule.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedTransition<'a> {
    /// Raw transition arguments.
    pub arguments: &'a [String],
    /// Storyboard name.
    pub storyboard: &'a str,
    /// Index of the contributing rule.
    pub rule: usize,
}

/// Result of [`StyleSheet::resolve`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedStyle<'a> {
    setters: Vec<ResolvedSetter<'a>>,
    transitions: Vec<ResolvedTransition<'a>>,
}

impl<'a> ResolvedStyle<'a> {
    fn set(&mut self, setter: ResolvedSetter<'a>) {
        match self.setters.iter_mut().find(|s| s.property == setter.property) {
            Some(slot) => *slot = setter,
            None => self.setters.push(setter),
        }
    }

    /// One winning setter per property name, in first-seen order.
    #[must_use]
    pub fn setters(&self) -> &[ResolvedSetter<'a>] {
        &self.setters
    }

    /// Winning setter for `property`.
    #[must_use]
    pub fn setter(&self, property: &str) -> Option<&ResolvedSetter<'a>> {
        self.setters.iter().find(|s| s.property == property)
    }

    /// Transitions in stylesheet order.
    #[must_use]
    pub fn transitions(&self) -> &[ResolvedTransition<'a>] {
        &self.transitions
    }

    /// Whether no rule matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.setters.is_empty() && self.transitions.is_empty()
    }
}

/// Builder for [`StyleSheet`].
///
/// ```rust
/// use trellis_style::{Declaration, Selector, SelectorPart, StyleRule, StyleSheetBuilder};
///
/// let sheet = StyleSheetBuilder::new()
///     .rule(StyleRule::new(
///         [Selector::new(SelectorPart::of_type("Button"))],
///         [Declaration::text("color", "red")],
///     ))
///     .rule(StyleRule::view_resources([Declaration::text("accent", "blue")]))
///     .build();
///
/// assert_eq!(sheet.len(), 2);
/// assert_eq!(sheet.view_resources().get_text("accent"), Some("blue"));
/// assert!(sheet.instantiate_storyboard("missing").is_none());
/// ```
#[derive(Debug, Default)]
pub struct StyleSheetBuilder {
    rules: Vec<StyleRule>,
    storyboards: HashMap<String, Rc<Storyboard>>,
}

impl StyleSheetBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    #[must_use]
    pub fn rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a storyboard under its own name, replacing any earlier one.
    #[must_use]
    pub fn storyboard(mut self, storyboard: Storyboard) -> Self {
        let name = String::from(storyboard.name());
        self.storyboards.insert(name, Rc::new(storyboard));
        self
    }

    /// Finishes the sheet.
    #[must_use]
    pub fn build(self) -> StyleSheet {
        let mut resources = ResourceDictionaryBuilder::new();
        for rule in self.rules.iter().filter(|r| r.is_view_resource_rule()) {
            resources.extend(rule.declarations());
        }
        StyleSheet {
            inner: Rc::new(StyleSheetData {
                rules: self.rules,
                storyboards: self.storyboards,
                resources: resources.build(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::tests::fixture;
    use crate::selector::{Selector, SelectorPart};
    use trellis_animation::{Curve, CurveKey, StoryboardBuilder};

    fn text_of<'a>(style: &'a ResolvedStyle<'_>, property: &str) -> Option<&'a str> {
        match style.setter(property)?.value {
            DeclaredValue::Text(text) => Some(text),
            DeclaredValue::Value(_) => None,
        }
    }

    #[test]
    fn later_rules_win_regardless_of_specificity() {
        let sheet = StyleSheetBuilder::new()
            .rule(StyleRule::new(
                [Selector::new(SelectorPart::universal().named("ok"))],
                [Declaration::text("color", "green"), Declaration::text("width", "10")],
            ))
            .rule(StyleRule::new(
                [Selector::new(SelectorPart::of_type("Button"))],
                [Declaration::text("color", "red")],
            ))
            .build();
        let cx = fixture();
        let style = sheet.resolve(&cx, 2);
        assert_eq!(text_of(&style, "color"), Some("red"));
        assert_eq!(style.setter("color").unwrap().rule, 1);
        assert_eq!(text_of(&style, "width"), Some("10"));
        let names: Vec<_> = style.setters().iter().map(|s| s.property).collect();
        assert_eq!(names, ["color", "width"]);

        let other = sheet.resolve(&cx, 3);
        assert_eq!(text_of(&other, "color"), Some("red"));
        assert!(other.setter("width").is_none());
        assert!(sheet.resolve(&cx, 0).is_empty());
    }

    #[test]
    fn transitions_are_collected_in_order() {
        let sheet = StyleSheetBuilder::new()
            .rule(StyleRule::new(
                [Selector::new(SelectorPart::of_type("Button"))],
                [Declaration::transition(&["focus", "focused"], "glow")],
            ))
            .rule(StyleRule::new(
                [Selector::new(SelectorPart::universal().class("primary"))],
                [Declaration::transition(&["focus", "focused", "blurred"], "dim")],
            ))
            .build();
        let style = sheet.resolve(&fixture(), 2);
        let boards: Vec<_> = style.transitions().iter().map(|t| t.storyboard).collect();
        assert_eq!(boards, ["glow", "dim"]);
    }

    #[test]
    fn view_rules_feed_resources_not_elements() {
        let sheet = StyleSheetBuilder::new()
            .rule(StyleRule::view_resources([Declaration::text("accent", "red")]))
            .rule(StyleRule::view_resources([Declaration::text("accent", "blue")]))
            .build();
        assert_eq!(sheet.view_resources().get_text("accent"), Some("blue"));
        let cx = fixture();
        for element in 0..cx.0.len() {
            assert!(sheet.resolve(&cx, element).is_empty());
        }
    }

    #[test]
    fn storyboards_are_shared() {
        let sheet = StyleSheetBuilder::new()
            .storyboard(
                StoryboardBuilder::new("glow")
                    .track(None, "opacity", Curve::clamped([CurveKey::new(0.0, 1.0_f64)]).unwrap())
                    .build(),
            )
            .build();
        let a = sheet.instantiate_storyboard("glow").unwrap();
        let b = sheet.clone().instantiate_storyboard("glow").unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(sheet.storyboard_count(), 1);
    }
}
