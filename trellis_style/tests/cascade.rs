// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascade resolution over a small element tree.

use proptest::prelude::*;
use trellis_style::{
    Declaration, DeclaredValue, MatchContext, Selector, SelectorPart, StyleRule, StyleSheet,
    StyleSheetBuilder,
};

struct Element {
    ty: &'static str,
    classes: &'static [&'static str],
    parent: Option<usize>,
}

struct Tree(Vec<Element>);

impl MatchContext for Tree {
    type Element = usize;

    fn element_type(&self, element: usize) -> &str {
        self.0[element].ty
    }

    fn element_name(&self, _: usize) -> Option<&str> {
        None
    }

    fn has_class(&self, element: usize, class: &str) -> bool {
        self.0[element].classes.iter().any(|c| *c == class)
    }

    fn is_in_state(&self, _: usize, _: &str) -> bool {
        false
    }

    fn logical_parent(&self, element: usize) -> Option<usize> {
        self.0[element].parent
    }
}

fn tree() -> Tree {
    Tree(vec![
        Element { ty: "Panel", classes: &["toolbar"], parent: None },
        Element { ty: "Button", classes: &["primary"], parent: Some(0) },
        Element { ty: "Button", classes: &[], parent: None },
        Element { ty: "Label", classes: &["primary"], parent: Some(0) },
    ])
}

const SELECTORS: [(&str, Option<&str>, Option<&str>); 5] = [
    ("any", None, None),
    ("buttons", Some("Button"), None),
    ("primary", None, Some("primary")),
    ("primary-buttons", Some("Button"), Some("primary")),
    ("labels", Some("Label"), None),
];

fn selector(index: usize) -> Selector {
    let (_, ty, class) = SELECTORS[index];
    let mut part = ty.map_or_else(SelectorPart::universal, SelectorPart::of_type);
    if let Some(class) = class {
        part = part.class(class);
    }
    Selector::new(part)
}

fn sheet(rules: &[(usize, u8)]) -> StyleSheet {
    rules
        .iter()
        .fold(StyleSheetBuilder::new(), |builder, &(sel, value)| {
            builder.rule(StyleRule::new(
                [selector(sel)],
                [Declaration::text("width", &value.to_string())],
            ))
        })
        .build()
}

fn width(sheet: &StyleSheet, tree: &Tree, element: usize) -> Option<String> {
    let style = sheet.resolve(tree, element);
    match style.setter("width")?.value {
        DeclaredValue::Text(text) => Some(text.clone()),
        DeclaredValue::Value(_) => None,
    }
}

#[test]
fn button_color_red() {
    let sheet = StyleSheetBuilder::new()
        .rule(StyleRule::new(
            [Selector::new(SelectorPart::of_type("Button"))],
            [Declaration::text("color", "red")],
        ))
        .build();
    let tree = tree();
    let style = sheet.resolve(&tree, 2);
    assert_eq!(
        style.setter("color").map(|s| s.value),
        Some(&DeclaredValue::Text("red".into()))
    );
    assert!(sheet.resolve(&tree, 3).setter("color").is_none());
}

#[test]
fn child_selector_scopes_to_toolbar() {
    let sheet = StyleSheetBuilder::new()
        .rule(StyleRule::new(
            [Selector::new(SelectorPart::universal().class("toolbar"))
                .child(SelectorPart::of_type("Button"))],
            [Declaration::text("height", "24")],
        ))
        .build();
    let tree = tree();
    assert!(sheet.resolve(&tree, 1).setter("height").is_some());
    assert!(sheet.resolve(&tree, 2).setter("height").is_none());
}

proptest! {
    #[test]
    fn resolution_is_deterministic(rules in prop::collection::vec((0..SELECTORS.len(), any::<u8>()), 0..12)) {
        let sheet = sheet(&rules);
        let tree = tree();
        for element in 0..tree.0.len() {
            let first = sheet.resolve(&tree, element);
            let second = sheet.resolve(&tree, element);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn last_matching_rule_wins(rules in prop::collection::vec((0..SELECTORS.len(), any::<u8>()), 1..12)) {
        let sheet = sheet(&rules);
        let tree = tree();
        for element in 0..tree.0.len() {
            let expected = rules
                .iter()
                .rev()
                .find(|(sel, _)| selector(*sel).matches(&tree, element))
                .map(|(_, value)| value.to_string());
            prop_assert_eq!(width(&sheet, &tree, element), expected);
        }
    }
}
