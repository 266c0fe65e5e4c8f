// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selectors and their specificity.
//!
//! A [`Selector`] is a chain of [`SelectorPart`]s joined by [`Combinator`]s,
//! matched right to left against the logical tree through a
//! [`MatchContext`].

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

/// Type name reserved for the selector of view resource rules.
pub const VIEW_RESOURCE_TYPE: &str = "View";

/// Selector specificity: `(names, classes_and_pseudos, types)`.
///
/// Fields are ordered highest-weight-first so the derived `Ord` ranks a
/// `#name` above any number of classes, and a class above any number of type
/// names.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// Read access to the element tree for selector matching.
pub trait MatchContext {
    /// Element handle.
    type Element: Copy;

    /// Type name of `element`, such as `Button`.
    fn element_type(&self, element: Self::Element) -> &str;

    /// Identifying name of `element`, if any.
    fn element_name(&self, element: Self::Element) -> Option<&str>;

    /// Whether `element` carries `class`.
    fn has_class(&self, element: Self::Element, class: &str) -> bool;

    /// Whether one of `element`'s visual state groups is in `state`.
    fn is_in_state(&self, element: Self::Element, state: &str) -> bool;

    /// Logical parent of `element`.
    fn logical_parent(&self, element: Self::Element) -> Option<Self::Element>;
}

/// How a part relates to the part on its left.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Any logical ancestor (`A B`).
    Descendant,
    /// The logical parent (`A > B`).
    Child,
}

type Names = SmallVec<[String; 2]>;

fn sorted_insert(names: &mut Names, name: &str) {
    if let Err(index) = names.binary_search_by(|n| n.as_str().cmp(name)) {
        names.insert(index, name.to_string());
    }
}

/// A compound selector for a single element: `Button#ok.primary:hover`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectorPart {
    element_type: Option<String>,
    name: Option<String>,
    classes: Names,
    pseudo_classes: Names,
}

impl SelectorPart {
    /// Matches every element (`*`).
    #[must_use]
    pub fn universal() -> Self {
        Self::default()
    }

    /// Matches elements of one type.
    #[must_use]
    pub fn of_type(element_type: &str) -> Self {
        Self {
            element_type: Some(element_type.to_string()),
            ..Self::default()
        }
    }

    /// Also requires the element's name (`#name`).
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Also requires a class (`.class`).
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        sorted_insert(&mut self.classes, class);
        self
    }

    /// Also requires a visual state (`:state`).
    #[must_use]
    pub fn pseudo_class(mut self, state: &str) -> Self {
        sorted_insert(&mut self.pseudo_classes, state);
        self
    }

    /// Required type, or `None` for any type.
    #[must_use]
    pub fn element_type(&self) -> Option<&str> {
        self.element_type.as_deref()
    }

    /// Required name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Required classes, sorted.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Required visual states, sorted.
    #[must_use]
    pub fn pseudo_classes(&self) -> &[String] {
        &self.pseudo_classes
    }

    /// Whether `element` satisfies this part on its own.
    pub fn matches<C: MatchContext + ?Sized>(&self, cx: &C, element: C::Element) -> bool {
        if let Some(ty) = &self.element_type
            && cx.element_type(element) != ty
        {
            return false;
        }
        if let Some(name) = &self.name
            && cx.element_name(element) != Some(name.as_str())
        {
            return false;
        }
        self.classes.iter().all(|c| cx.has_class(element, c))
            && self.pseudo_classes.iter().all(|p| cx.is_in_state(element, p))
    }

    fn specificity(&self) -> Specificity {
        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        Specificity(
            u32::from(self.name.is_some()),
            count(self.classes.len() + self.pseudo_classes.len()),
            u32::from(self.element_type.is_some()),
        )
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element_type {
            Some(ty) => f.write_str(ty)?,
            None if self.name.is_none()
                && self.classes.is_empty()
                && self.pseudo_classes.is_empty() =>
            {
                f.write_str("*")?;
            }
            None => {}
        }
        if let Some(name) = &self.name {
            write!(f, "#{name}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for state in &self.pseudo_classes {
            write!(f, ":{state}")?;
        }
        Ok(())
    }
}

/// A complex selector: parts joined by combinators.
///
/// ```rust
/// use trellis_style::{Selector, SelectorPart, Specificity};
///
/// // `Grid > Button.primary:hover`
/// let selector = Selector::new(SelectorPart::of_type("Grid"))
///     .child(SelectorPart::of_type("Button").class("primary").pseudo_class("hover"));
/// assert_eq!(selector.specificity(), Specificity(0, 2, 2));
/// assert_eq!(selector.to_string(), "Grid > Button.primary:hover");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selector {
    parts: Vec<SelectorPart>,
    /// `combinators[i]` joins `parts[i]` and `parts[i + 1]`.
    combinators: Vec<Combinator>,
    view_resource: bool,
    specificity: Specificity,
}

impl Selector {
    /// A selector with a single part.
    #[must_use]
    pub fn new(part: SelectorPart) -> Self {
        let specificity = part.specificity();
        Self {
            parts: alloc::vec![part],
            combinators: Vec::new(),
            view_resource: false,
            specificity,
        }
    }

    /// The reserved selector of rules that define view resources.
    ///
    /// It never matches an element.
    #[must_use]
    pub fn view_resource() -> Self {
        Self {
            view_resource: true,
            ..Self::new(SelectorPart::of_type(VIEW_RESOURCE_TYPE))
        }
    }

    fn push(mut self, combinator: Combinator, part: SelectorPart) -> Self {
        let Specificity(a, b, c) = self.specificity;
        let Specificity(x, y, z) = part.specificity();
        self.specificity = Specificity(
            a.saturating_add(x),
            b.saturating_add(y),
            c.saturating_add(z),
        );
        self.combinators.push(combinator);
        self.parts.push(part);
        self
    }

    /// Appends `part`, required to be a logical descendant of what precedes it.
    #[must_use]
    pub fn descendant(self, part: SelectorPart) -> Self {
        self.push(Combinator::Descendant, part)
    }

    /// Appends `part`, required to be a logical child of what precedes it.
    #[must_use]
    pub fn child(self, part: SelectorPart) -> Self {
        self.push(Combinator::Child, part)
    }

    /// Parts, leftmost first.
    #[must_use]
    pub fn parts(&self) -> &[SelectorPart] {
        &self.parts
    }

    /// Combinators between consecutive parts.
    #[must_use]
    pub fn combinators(&self) -> &[Combinator] {
        &self.combinators
    }

    /// Whether this is the reserved view resource selector.
    #[must_use]
    pub fn is_view_resource(&self) -> bool {
        self.view_resource
    }

    /// Ranking among competing matches.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Whether `element` is selected.
    pub fn matches<C: MatchContext + ?Sized>(&self, cx: &C, element: C::Element) -> bool {
        if self.view_resource {
            return false;
        }
        self.matches_from(cx, element, self.parts.len() - 1)
    }

    fn matches_from<C: MatchContext + ?Sized>(
        &self,
        cx: &C,
        element: C::Element,
        index: usize,
    ) -> bool {
        if !self.parts[index].matches(cx, element) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match self.combinators[index - 1] {
            Combinator::Child => cx
                .logical_parent(element)
                .is_some_and(|parent| self.matches_from(cx, parent, index - 1)),
            Combinator::Descendant => {
                let mut ancestor = cx.logical_parent(element);
                while let Some(current) = ancestor {
                    if self.matches_from(cx, current, index - 1) {
                        return true;
                    }
                    ancestor = cx.logical_parent(current);
                }
                false
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, part) in self.parts.iter().enumerate() {
            if index > 0 {
                match self.combinators[index - 1] {
                    Combinator::Descendant => f.write_str(" ")?,
                    Combinator::Child => f.write_str(" > ")?,
                }
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}
