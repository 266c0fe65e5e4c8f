// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style rules and their declarations.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use trellis_property::{ErasedValue, PropertyRegistration, PropertyValue};
use trellis_visual_state::{TransitionKey, VisualStateError};

use crate::error::StyleError;
use crate::selector::{MatchContext, Selector};

/// The value side of a property setter.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclaredValue {
    /// Style text, parsed with the property's parser when applied.
    Text(String),
    /// An already typed value.
    Value(ErasedValue),
}

impl DeclaredValue {
    /// Converts to a value the property accepts.
    pub fn to_erased(
        &self,
        registration: &PropertyRegistration,
        declared_name: &str,
    ) -> Result<ErasedValue, StyleError> {
        let converted = match self {
            Self::Text(text) => registration.parse(text),
            Self::Value(value) => registration.coerce(value.clone()),
        };
        converted.map_err(|source| StyleError::InvalidValue {
            property: declared_name.to_string(),
            source,
        })
    }
}

/// One entry in a rule body.
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    /// `property: value;`
    Setter {
        /// Property style name.
        property: String,
        /// Declared value.
        value: DeclaredValue,
    },
    /// `transition(group, [from,] to): storyboard;`
    Transition {
        /// Raw transition arguments.
        arguments: Vec<String>,
        /// Name of the storyboard to play.
        storyboard: String,
    },
}

impl Declaration {
    /// A setter with style text.
    pub fn text(property: &str, text: &str) -> Self {
        Self::Setter {
            property: property.to_string(),
            value: DeclaredValue::Text(text.to_string()),
        }
    }

    /// A setter with a typed value.
    pub fn value<T: PropertyValue>(property: &str, value: T) -> Self {
        Self::Setter {
            property: property.to_string(),
            value: DeclaredValue::Value(ErasedValue::new(value)),
        }
    }

    /// A visual state transition.
    pub fn transition(arguments: &[&str], storyboard: &str) -> Self {
        Self::Transition {
            arguments: arguments.iter().map(ToString::to_string).collect(),
            storyboard: storyboard.to_string(),
        }
    }

    /// Interprets a transition's arguments. `None` for setters.
    pub fn transition_key(&self) -> Option<Result<TransitionKey, VisualStateError>> {
        match self {
            Self::Transition { arguments, .. } => Some(TransitionKey::from_arguments(arguments)),
            Self::Setter { .. } => None,
        }
    }
}

/// Selectors plus declarations. Immutable once built.
///
/// ```rust
/// use trellis_style::{Declaration, Selector, SelectorPart, StyleRule};
///
/// let rule = StyleRule::new(
///     [Selector::new(SelectorPart::of_type("Button"))],
///     [Declaration::text("color", "red")],
/// );
/// assert!(!rule.is_view_resource_rule());
/// assert_eq!(rule.declarations().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRule {
    selectors: Vec<Selector>,
    declarations: Vec<Declaration>,
}

impl StyleRule {
    /// Creates a rule.
    pub fn new(
        selectors: impl IntoIterator<Item = Selector>,
        declarations: impl IntoIterator<Item = Declaration>,
    ) -> Self {
        Self {
            selectors: selectors.into_iter().collect(),
            declarations: declarations.into_iter().collect(),
        }
    }

    /// A rule populating the view's resource dictionary.
    pub fn view_resources(declarations: impl IntoIterator<Item = Declaration>) -> Self {
        Self::new([Selector::view_resource()], declarations)
    }

    /// Selectors in declaration order.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Declarations in order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Whether the rule's only selector is the view resource selector.
    #[must_use]
    pub fn is_view_resource_rule(&self) -> bool {
        matches!(self.selectors.as_slice(), [only] if only.is_view_resource())
    }

    /// The most specific selector that matches `element`, if any.
    ///
    /// When several matching selectors share the highest specificity, the
    /// first declared one is returned.
    pub fn matches_element<C: MatchContext + ?Sized>(
        &self,
        cx: &C,
        element: C::Element,
    ) -> Option<&Selector> {
        let mut best: Option<&Selector> = None;
        for selector in &self.selectors {
            if !selector.matches(cx, element) {
                continue;
            }
            if best.is_none_or(|b| selector.specificity() > b.specificity()) {
                best = Some(selector);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::SelectorPart;
    use crate::selector::tests::fixture;
    use trellis_property::{PropertyError, PropertyMetadataBuilder, PropertyRegistry};

    #[test]
    fn most_specific_selector_wins() {
        let cx = fixture();
        let by_type = Selector::new(SelectorPart::of_type("Button"));
        let by_class = Selector::new(SelectorPart::universal().class("primary"));
        let rule = StyleRule::new([by_type.clone(), by_class.clone()], []);
        assert_eq!(rule.matches_element(&cx, 2), Some(&by_class));
        assert_eq!(rule.matches_element(&cx, 3), Some(&by_type));
        assert_eq!(rule.matches_element(&cx, 0), None);
    }

    #[test]
    fn equal_specificity_keeps_first_declared() {
        let cx = fixture();
        let first = Selector::new(SelectorPart::universal().class("primary"));
        let second = Selector::new(SelectorPart::universal().class("wide"));
        let rule = StyleRule::new([first.clone(), second], []);
        assert_eq!(rule.matches_element(&cx, 2), Some(&first));
    }

    #[test]
    fn view_resource_rules_need_a_single_selector() {
        assert!(StyleRule::view_resources([]).is_view_resource_rule());
        let mixed = StyleRule::new(
            [Selector::view_resource(), Selector::new(SelectorPart::universal())],
            [],
        );
        assert!(!mixed.is_view_resource_rule());
    }

    #[test]
    fn declared_values_convert_through_the_registration() {
        let mut registry = PropertyRegistry::new();
        let width = registry.register(
            "Width",
            PropertyMetadataBuilder::new(0.0_f64)
                .parse_with(|s| s.trim().parse().ok())
                .build(),
        );
        let registration = registry.get(width.id()).unwrap();

        let parsed = DeclaredValue::Text("12".into()).to_erased(registration, "width");
        assert_eq!(parsed.unwrap().downcast_ref::<f64>(), Some(&12.0));

        let bad = DeclaredValue::Text("wide".into()).to_erased(registration, "width");
        assert!(matches!(
            bad,
            Err(StyleError::InvalidValue { source: PropertyError::Unparseable { .. }, .. })
        ));

        let wrong_type = DeclaredValue::Value(ErasedValue::new(3_i32)).to_erased(registration, "width");
        assert!(matches!(
            wrong_type,
            Err(StyleError::InvalidValue { source: PropertyError::TypeMismatch { .. }, .. })
        ));
    }

    #[test]
    fn transition_arguments() {
        let decl = Declaration::transition(&["focus", "focused"], "glow");
        let key = decl.transition_key().unwrap().unwrap();
        assert_eq!(key.to, "focused");
        let bad = Declaration::transition(&["focus"], "glow");
        assert_eq!(
            bad.transition_key(),
            Some(Err(VisualStateError::AmbiguousArguments(1)))
        );
        assert!(Declaration::text("color", "red").transition_key().is_none());
    }
}
