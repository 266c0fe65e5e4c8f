// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for selector matching and stylesheet resolution.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use trellis::{ElementBuilder, FrameTime, View};
use trellis_style::{
    Declaration, MatchContext, Selector, SelectorPart, StyleRule, StyleSheet, StyleSheetBuilder,
};

/// A flat parent-pointer tree: element `i` has parent `i - 1`.
struct Chain {
    types: Vec<&'static str>,
    classes: Vec<Vec<&'static str>>,
}

impl MatchContext for Chain {
    type Element = usize;

    fn element_type(&self, element: usize) -> &str {
        self.types[element]
    }

    fn element_name(&self, _element: usize) -> Option<&str> {
        None
    }

    fn has_class(&self, element: usize, class: &str) -> bool {
        self.classes[element].iter().any(|c| *c == class)
    }

    fn is_in_state(&self, _element: usize, state: &str) -> bool {
        state == "normal"
    }

    fn logical_parent(&self, element: usize) -> Option<usize> {
        element.checked_sub(1)
    }
}

fn sheet(rules: usize) -> StyleSheet {
    let mut builder = StyleSheetBuilder::new();
    for i in 0..rules {
        let selector = match i % 4 {
            0 => Selector::new(SelectorPart::of_type("Button")),
            1 => Selector::new(SelectorPart::universal().class("primary")),
            2 => Selector::new(SelectorPart::of_type("Panel"))
                .descendant(SelectorPart::of_type("Button").pseudo_class("normal")),
            _ => Selector::new(SelectorPart::of_type("Toolbar"))
                .child(SelectorPart::universal().class("missing")),
        };
        builder = builder.rule(StyleRule::new(
            [selector],
            [Declaration::text("width", "10"), Declaration::text("color", "red")],
        ));
    }
    builder.build()
}

fn bench_resolve(c: &mut Criterion) {
    let depth = 12;
    let mut types = vec!["Panel"; depth];
    types[depth - 1] = "Button";
    let mut classes = vec![Vec::new(); depth];
    classes[depth - 1].push("primary");
    let chain = Chain { types, classes };

    let mut group = c.benchmark_group("style/resolve");
    for rules in [8, 64, 256] {
        let sheet = sheet(rules);
        group.bench_with_input(BenchmarkId::from_parameter(rules), &sheet, |b, sheet| {
            b.iter(|| black_box(sheet.resolve(&chain, depth - 1).setters().len()));
        });
    }
    group.finish();
}

fn bench_cascade_pass(c: &mut Criterion) {
    let mut view = View::builder().stylesheet(sheet(64)).build().unwrap();
    let root = view.root();
    for _ in 0..32 {
        let panel = view.create(ElementBuilder::new("Panel")).unwrap();
        view.add_child(root, panel).unwrap();
        for _ in 0..4 {
            let button = view
                .create(ElementBuilder::new("Button").class("primary"))
                .unwrap();
            view.add_child(panel, button).unwrap();
        }
    }
    view.update(FrameTime::default()).unwrap();

    c.bench_function("style/restyle_all_160", |b| {
        b.iter(|| {
            view.set_stylesheet(sheet(64));
            black_box(view.apply_styles().unwrap())
        });
    });
}

criterion_group!(benches, bench_resolve, bench_cascade_pass);
criterion_main!(benches);
