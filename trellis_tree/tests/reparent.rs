// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural invariants under arbitrary attach/detach sequences.

use proptest::prelude::*;
use trellis_tree::{Axis, ElementId, ElementInfo, Tree};

fn build(count: usize) -> (Tree, ElementId, Vec<ElementId>) {
    let mut tree = Tree::new();
    let root = tree.insert(ElementInfo::new("Root").with_namescope());
    let items = (0..count)
        .map(|i| tree.insert(ElementInfo::new("Item").named(format!("item{i}"))))
        .collect();
    (tree, root, items)
}

fn assert_consistent(tree: &Tree, root: ElementId) {
    for id in tree.ids() {
        for axis in [Axis::Logical, Axis::Visual] {
            if let Some(parent) = tree.parent(id, axis) {
                let hits = tree.children(parent, axis).iter().filter(|c| **c == id).count();
                assert_eq!(hits, 1, "child listed exactly once by its parent");
                assert!(!tree.is_ancestor(id, parent, axis), "no cycles");
            }
            for &child in tree.children(id, axis) {
                assert_eq!(tree.parent(child, axis), Some(id));
            }
        }
    }
    let scope = tree.namescope(root).unwrap();
    for (name, id) in scope.iter() {
        assert_eq!(tree.name(id), Some(name));
        assert!(tree.is_ancestor(root, id, Axis::Logical), "registered names are attached");
    }
    for id in tree.descendants(root, Axis::Logical).skip(1) {
        if let Some(name) = tree.name(id) {
            assert_eq!(scope.find(name), Some(id), "attached names are registered");
        }
    }
}

#[test]
fn detach_then_reattach_elsewhere() {
    let (mut tree, root, items) = build(3);
    let (a, b, c) = (items[0], items[1], items[2]);
    tree.attach_logical_child(root, a).unwrap();
    tree.attach_logical_child(root, b).unwrap();
    tree.attach_logical_child(a, c).unwrap();

    tree.detach_logical(c).unwrap();
    assert_eq!(tree.find_name(root, "item2"), None);
    tree.attach_logical_child(b, c).unwrap();

    assert_eq!(tree.logical_parent(c), Some(b));
    assert!(tree.logical_children(a).is_empty());
    assert_eq!(tree.find_name(root, "item2"), Some(c));
    assert_eq!(tree.namescope(root).unwrap().len(), 3);
    assert_consistent(&tree, root);
}

#[derive(Clone, Debug)]
enum Op {
    Attach(Axis, usize, usize),
    Move(Axis, usize, Option<usize>),
    Detach(Axis, usize),
}

fn axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::Logical), Just(Axis::Visual)]
}

fn op(n: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (axis(), 0..=n, 0..n).prop_map(|(a, p, c)| Op::Attach(a, p, c)),
        (axis(), 0..n, proptest::option::of(0..=n)).prop_map(|(a, c, p)| Op::Move(a, c, p)),
        (axis(), 0..n).prop_map(|(a, c)| Op::Detach(a, c)),
    ]
}

proptest! {
    #[test]
    fn random_edits_keep_tree_consistent(ops in proptest::collection::vec(op(6), 0..40)) {
        let (mut tree, root, items) = build(6);
        // Index `n` stands for the root.
        let pick = |i: usize| if i == items.len() { root } else { items[i] };
        for op in ops {
            // Failures are expected (cycles, double parenting); state must stay valid.
            let _ = match op {
                Op::Attach(axis, p, c) => {
                    let parent = pick(p);
                    let len = tree.children(parent, axis).len();
                    tree.insert_child(axis, parent, len, pick(c))
                }
                Op::Move(axis, c, p) => tree.change_parent(axis, pick(c), p.map(pick)),
                Op::Detach(axis, c) => tree.detach(axis, pick(c)).map(|_| ()),
            };
            assert_consistent(&tree, root);
        }
    }
}
