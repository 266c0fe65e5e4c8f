// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element arena and its two parent/child relations.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashSet;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::error::TreeError;
use crate::namescope::Namescope;
use crate::node::{Axis, ElementId, ElementInfo, Node};

/// Arena of elements linked into a logical and a visual tree.
///
/// Both relations store the parent on the child and an ordered child list on
/// the parent. They are only mutated through [`insert_child`](Self::insert_child)
/// and [`detach`](Self::detach), which keep the two sides in sync and maintain
/// namescope registrations for the logical tree.
///
/// ```rust
/// use trellis_tree::{ElementInfo, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(ElementInfo::new("Root").with_namescope());
/// let panel = tree.insert(ElementInfo::new("Panel"));
/// let ok = tree.insert(ElementInfo::new("Button").named("ok"));
///
/// tree.attach_logical_child(root, panel).unwrap();
/// tree.attach_logical_child(panel, ok).unwrap();
/// assert_eq!(tree.find_name(panel, "ok"), Some(ok));
///
/// tree.detach_logical(panel).unwrap();
/// assert_eq!(tree.find_name(root, "ok"), None);
/// ```
#[derive(Debug, Default)]
pub struct Tree {
    nodes: SlotMap<ElementId, Node>,
}

impl Tree {
    /// Empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached element.
    pub fn insert(&mut self, info: ElementInfo) -> ElementId {
        self.nodes.insert(Node::from_info(info))
    }

    /// Whether `id` refers to a live element.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All live element ids, in arena order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.nodes.keys()
    }

    fn node(&self, id: ElementId) -> Result<&Node, TreeError> {
        self.nodes.get(id).ok_or(TreeError::UnknownElement(id))
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::UnknownElement(id))
    }

    /// Style type name of `id`.
    #[must_use]
    pub fn type_name(&self, id: ElementId) -> Option<&'static str> {
        self.nodes.get(id).map(|n| n.type_name)
    }

    /// Identifying name of `id`.
    #[must_use]
    pub fn name(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.name.as_deref())
    }

    /// Sorted style classes of `id`.
    #[must_use]
    pub fn classes(&self, id: ElementId) -> &[alloc::boxed::Box<str>] {
        self.nodes.get(id).map_or(&[], |n| n.classes.as_slice())
    }

    /// Whether `id` carries `class`.
    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes(id)
            .binary_search_by(|c| (**c).cmp(class))
            .is_ok()
    }

    /// Adds a class. Returns `false` if it was already present.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> Result<bool, TreeError> {
        let node = self.node_mut(id)?;
        match node.classes.binary_search_by(|c| (**c).cmp(class)) {
            Ok(_) => Ok(false),
            Err(_) if class.is_empty() => Ok(false),
            Err(idx) => {
                node.classes.insert(idx, class.into());
                Ok(true)
            }
        }
    }

    /// Removes a class. Returns `false` if it was absent.
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> Result<bool, TreeError> {
        let node = self.node_mut(id)?;
        match node.classes.binary_search_by(|c| (**c).cmp(class)) {
            Ok(idx) => {
                node.classes.remove(idx);
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    /// Parent of `id` on `axis`.
    #[must_use]
    pub fn parent(&self, id: ElementId, axis: Axis) -> Option<ElementId> {
        self.nodes.get(id).and_then(|n| n.parent(axis))
    }

    /// Logical parent of `id`.
    #[must_use]
    pub fn logical_parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent(id, Axis::Logical)
    }

    /// Visual parent of `id`.
    #[must_use]
    pub fn visual_parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent(id, Axis::Visual)
    }

    /// Ordered children of `id` on `axis`.
    #[must_use]
    pub fn children(&self, id: ElementId, axis: Axis) -> &[ElementId] {
        self.nodes.get(id).map_or(&[], |n| n.children(axis).as_slice())
    }

    /// Ordered logical children.
    #[must_use]
    pub fn logical_children(&self, id: ElementId) -> &[ElementId] {
        self.children(id, Axis::Logical)
    }

    /// Ordered visual children.
    #[must_use]
    pub fn visual_children(&self, id: ElementId) -> &[ElementId] {
        self.children(id, Axis::Visual)
    }

    /// The `index`th logical child.
    #[must_use]
    pub fn logical_child(&self, id: ElementId, index: usize) -> Option<ElementId> {
        self.logical_children(id).get(index).copied()
    }

    /// The `index`th visual child.
    #[must_use]
    pub fn visual_child(&self, id: ElementId, index: usize) -> Option<ElementId> {
        self.visual_children(id).get(index).copied()
    }

    /// Whether `ancestor` is a strict ancestor of `id` on `axis`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: ElementId, id: ElementId, axis: Axis) -> bool {
        self.ancestors(id, axis).any(|a| a == ancestor)
    }

    /// Strict ancestors of `id`, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: ElementId, axis: Axis) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id, axis),
            axis,
        }
    }

    /// `id` and its descendants in depth-first pre-order.
    #[must_use]
    pub fn descendants(&self, id: ElementId, axis: Axis) -> Descendants<'_> {
        let mut stack = SmallVec::new();
        if self.contains(id) {
            stack.push(id);
        }
        Descendants {
            tree: self,
            stack,
            axis,
        }
    }

    /// Appends `child` to `parent`'s logical children.
    pub fn attach_logical_child(
        &mut self,
        parent: ElementId,
        child: ElementId,
    ) -> Result<(), TreeError> {
        let index = self.logical_children(parent).len();
        self.insert_child(Axis::Logical, parent, index, child)
    }

    /// Appends `child` to `parent`'s visual children.
    pub fn attach_visual_child(
        &mut self,
        parent: ElementId,
        child: ElementId,
    ) -> Result<(), TreeError> {
        let index = self.visual_children(parent).len();
        self.insert_child(Axis::Visual, parent, index, child)
    }

    /// Detaches `child` from its logical parent.
    pub fn detach_logical(&mut self, child: ElementId) -> Result<Option<ElementId>, TreeError> {
        self.detach(Axis::Logical, child)
    }

    /// Detaches `child` from its visual parent.
    pub fn detach_visual(&mut self, child: ElementId) -> Result<Option<ElementId>, TreeError> {
        self.detach(Axis::Visual, child)
    }

    /// Moves `child` under `new_parent` in the logical tree, detaching it first.
    pub fn change_logical_parent(
        &mut self,
        child: ElementId,
        new_parent: Option<ElementId>,
    ) -> Result<(), TreeError> {
        self.change_parent(Axis::Logical, child, new_parent)
    }

    /// Moves `child` under `new_parent` in the visual tree, detaching it first.
    pub fn change_visual_parent(
        &mut self,
        child: ElementId,
        new_parent: Option<ElementId>,
    ) -> Result<(), TreeError> {
        self.change_parent(Axis::Visual, child, new_parent)
    }

    /// Detaches `child` on `axis`, then appends it to `new_parent` if given.
    ///
    /// The new attachment is validated before the old one is broken, so a
    /// failure leaves `child` where it was.
    pub fn change_parent(
        &mut self,
        axis: Axis,
        child: ElementId,
        new_parent: Option<ElementId>,
    ) -> Result<(), TreeError> {
        let old_parent = self.node(child)?.parent(axis);
        if old_parent == new_parent {
            return Ok(());
        }
        if let Some(parent) = new_parent {
            self.node(parent)?;
            self.check_acyclic(axis, parent, child)?;
            if axis == Axis::Logical {
                let names = self.scope_names(child);
                let target = self.scope_from(Some(parent));
                if let Some(scope) = target {
                    // The subtree's own registrations are released by the
                    // detach below and do not count as clashes.
                    self.check_names(scope, &names, &names)?;
                }
            }
        }
        self.detach(axis, child)?;
        if let Some(parent) = new_parent {
            let index = self.children(parent, axis).len();
            self.insert_child(axis, parent, index, child)?;
        }
        Ok(())
    }

    /// Inserts `child` at `index` among `parent`'s children on `axis`.
    ///
    /// Fails if `child` already has a parent on that axis or if the insertion
    /// would form a cycle. Logical attachment registers the names of the
    /// attached subtree in the nearest enclosing namescope; a clash fails the
    /// whole operation.
    pub fn insert_child(
        &mut self,
        axis: Axis,
        parent: ElementId,
        index: usize,
        child: ElementId,
    ) -> Result<(), TreeError> {
        let len = self.node(parent)?.children(axis).len();
        if let Some(current) = self.node(child)?.parent(axis) {
            return Err(TreeError::AlreadyParented {
                child,
                parent: current,
            });
        }
        if index > len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
        self.check_acyclic(axis, parent, child)?;

        let mut registrations = None;
        if axis == Axis::Logical
            && let Some(scope) = self.scope_from(Some(parent))
        {
            let names = self.scope_names(child);
            self.check_names(scope, &names, &[])?;
            registrations = Some((scope, names));
        }

        self.node_mut(parent)?.children_mut(axis).insert(index, child);
        *self.node_mut(child)?.parent_mut(axis) = Some(parent);
        if let Some((scope, names)) = registrations
            && let Some(namescope) = self.namescope_mut(scope)
        {
            for (name, id) in &names {
                namescope.insert(name, *id);
            }
        }
        tracing::trace!(?axis, ?parent, ?child, index, "attached");
        Ok(())
    }

    /// Removes `child` from its parent on `axis`, returning the old parent.
    ///
    /// Logical detachment unregisters the subtree's names from the namescope
    /// it is leaving.
    pub fn detach(&mut self, axis: Axis, child: ElementId) -> Result<Option<ElementId>, TreeError> {
        let Some(parent) = self.node(child)?.parent(axis) else {
            return Ok(None);
        };
        if axis == Axis::Logical
            && let Some(scope) = self.scope_from(Some(parent))
        {
            let names = self.scope_names(child);
            if let Some(namescope) = self.namescope_mut(scope) {
                for (name, id) in &names {
                    namescope.remove(name, *id);
                }
            }
        }
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children_mut(axis).retain(|c| *c != child);
        }
        *self.node_mut(child)?.parent_mut(axis) = None;
        tracing::trace!(?axis, ?parent, ?child, "detached");
        Ok(Some(parent))
    }

    /// Destroys `id`, its logical subtree and any visual descendants that have
    /// no logical parent of their own. Returns every removed id.
    ///
    /// Visual children owned elsewhere in the logical tree are only detached.
    pub fn remove(&mut self, id: ElementId) -> Result<Vec<ElementId>, TreeError> {
        self.node(id)?;
        self.detach(Axis::Logical, id)?;
        self.detach(Axis::Visual, id)?;

        let mut doomed = vec![id];
        let mut members: HashSet<ElementId> = HashSet::new();
        members.insert(id);
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor];
            cursor += 1;
            for &child in self.logical_children(current) {
                if members.insert(child) {
                    doomed.push(child);
                }
            }
            for &child in self.visual_children(current) {
                if self.logical_parent(child).is_none() && members.insert(child) {
                    doomed.push(child);
                }
            }
        }

        for &gone in &doomed {
            let Some(node) = self.nodes.remove(gone) else {
                continue;
            };
            for child in node.visual_children {
                if !members.contains(&child)
                    && let Some(child_node) = self.nodes.get_mut(child)
                {
                    child_node.visual_parent = None;
                }
            }
            if let Some(parent) = node.visual_parent
                && !members.contains(&parent)
                && let Some(parent_node) = self.nodes.get_mut(parent)
            {
                parent_node.visual_children.retain(|c| *c != gone);
            }
        }
        tracing::debug!(root = ?id, count = doomed.len(), "removed elements");
        Ok(doomed)
    }

    /// Whether `id` owns a namescope.
    #[must_use]
    pub fn owns_namescope(&self, id: ElementId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.namescope.is_some())
    }

    /// The namescope owned by `owner`.
    #[must_use]
    pub fn namescope(&self, owner: ElementId) -> Option<&Namescope> {
        self.nodes.get(owner).and_then(|n| n.namescope.as_ref())
    }

    fn namescope_mut(&mut self, owner: ElementId) -> Option<&mut Namescope> {
        self.nodes.get_mut(owner).and_then(|n| n.namescope.as_mut())
    }

    /// Namescope `id`'s own name is registered in: the nearest strict logical
    /// ancestor owning one.
    #[must_use]
    pub fn enclosing_namescope(&self, id: ElementId) -> Option<ElementId> {
        self.scope_from(self.logical_parent(id))
    }

    /// Resolves `name` from `from`'s point of view: in `from`'s own namescope
    /// if it owns one, otherwise in the enclosing one.
    #[must_use]
    pub fn find_name(&self, from: ElementId, name: &str) -> Option<ElementId> {
        let scope = self.scope_from(Some(from))?;
        self.namescope(scope)?.find(name)
    }

    fn scope_from(&self, start: Option<ElementId>) -> Option<ElementId> {
        let mut current = start;
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            if node.namescope.is_some() {
                return Some(id);
            }
            current = node.logical_parent;
        }
        None
    }

    /// Named elements that register alongside `root`: `root` itself and its
    /// logical descendants, not descending into nested namescope owners.
    fn scope_names(&self, root: ElementId) -> Vec<(String, ElementId)> {
        let mut names = Vec::new();
        let mut stack: SmallVec<[ElementId; 16]> = SmallVec::new();
        stack.push(root);
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if let Some(name) = &node.name {
                names.push((String::from(&**name), id));
            }
            if node.namescope.is_none() {
                stack.extend(node.logical_children.iter().rev().copied());
            }
        }
        names
    }

    fn check_names(
        &self,
        scope: ElementId,
        names: &[(String, ElementId)],
        ignore: &[(String, ElementId)],
    ) -> Result<(), TreeError> {
        let namescope = self.namescope(scope);
        let mut seen: HashSet<&str> = HashSet::new();
        for (name, _) in names {
            let registered = namescope.and_then(|s| s.find(name));
            let released = registered.is_some_and(|id| ignore.iter().any(|(_, i)| *i == id));
            let clash = namescope.is_some_and(|s| s.contains(name)) && !released;
            if clash || !seen.insert(name) {
                return Err(TreeError::DuplicateName {
                    name: name.clone(),
                    scope,
                });
            }
        }
        Ok(())
    }

    fn check_acyclic(&self, axis: Axis, parent: ElementId, child: ElementId) -> Result<(), TreeError> {
        if parent == child || self.is_ancestor(child, parent, axis) {
            return Err(TreeError::WouldCreateCycle { parent, child });
        }
        Ok(())
    }
}

/// Iterator over strict ancestors; see [`Tree::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<ElementId>,
    axis: Axis,
}

impl Iterator for Ancestors<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.next?;
        self.next = self.tree.parent(current, self.axis);
        Some(current)
    }
}

/// Pre-order iterator over a subtree; see [`Tree::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: SmallVec<[ElementId; 16]>,
    axis: Axis,
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current, self.axis).iter().rev().copied());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;


    fn el(tree: &mut Tree, name: &str) -> ElementId {
        tree.insert(ElementInfo::new("Element").named(name))
    }

    #[test]
    fn attach_sets_both_sides() {
        let mut tree = Tree::new();
        let parent = el(&mut tree, "p");
        let a = el(&mut tree, "a");
        let b = el(&mut tree, "b");
        tree.attach_logical_child(parent, a).unwrap();
        tree.insert_child(Axis::Logical, parent, 0, b).unwrap();
        assert_eq!(tree.logical_children(parent), &[b, a]);
        assert_eq!(tree.logical_parent(a), Some(parent));
        assert_eq!(tree.visual_parent(a), None);
    }

    #[test]
    fn double_parenting_is_rejected() {
        let mut tree = Tree::new();
        let p1 = el(&mut tree, "p1");
        let p2 = el(&mut tree, "p2");
        let c = el(&mut tree, "c");
        tree.attach_logical_child(p1, c).unwrap();
        assert_eq!(
            tree.attach_logical_child(p2, c),
            Err(TreeError::AlreadyParented { child: c, parent: p1 })
        );
        assert!(tree.logical_children(p2).is_empty());
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = Tree::new();
        let a = el(&mut tree, "a");
        let b = el(&mut tree, "b");
        let c = el(&mut tree, "c");
        tree.attach_visual_child(a, b).unwrap();
        tree.attach_visual_child(b, c).unwrap();
        assert_eq!(
            tree.attach_visual_child(c, a),
            Err(TreeError::WouldCreateCycle { parent: c, child: a })
        );
        assert_eq!(
            tree.attach_visual_child(a, a),
            Err(TreeError::WouldCreateCycle { parent: a, child: a })
        );
    }

    #[test]
    fn index_is_checked() {
        let mut tree = Tree::new();
        let p = el(&mut tree, "p");
        let c = el(&mut tree, "c");
        assert_eq!(
            tree.insert_child(Axis::Visual, p, 1, c),
            Err(TreeError::IndexOutOfRange { index: 1, len: 0 })
        );
    }

    #[test]
    fn trees_are_independent() {
        let mut tree = Tree::new();
        let decorator = el(&mut tree, "decorator");
        let content = el(&mut tree, "content");
        let owner = el(&mut tree, "owner");
        tree.attach_logical_child(owner, content).unwrap();
        tree.attach_visual_child(decorator, content).unwrap();
        assert_eq!(tree.logical_parent(content), Some(owner));
        assert_eq!(tree.visual_parent(content), Some(decorator));
        tree.detach_visual(content).unwrap();
        assert_eq!(tree.logical_parent(content), Some(owner));
    }

    #[test]
    fn descendants_are_preorder() {
        let mut tree = Tree::new();
        let r = el(&mut tree, "r");
        let a = el(&mut tree, "a");
        let a1 = el(&mut tree, "a1");
        let b = el(&mut tree, "b");
        tree.attach_logical_child(r, a).unwrap();
        tree.attach_logical_child(a, a1).unwrap();
        tree.attach_logical_child(r, b).unwrap();
        let order: Vec<_> = tree.descendants(r, Axis::Logical).collect();
        assert_eq!(order, vec![r, a, a1, b]);
        let up: Vec<_> = tree.ancestors(a1, Axis::Logical).collect();
        assert_eq!(up, vec![a, r]);
    }

    #[test]
    fn names_register_in_nearest_scope() {
        let mut tree = Tree::new();
        let root = tree.insert(ElementInfo::new("Root").with_namescope());
        let user_control = tree.insert(ElementInfo::new("UserControl").named("uc").with_namescope());
        let inner = el(&mut tree, "inner");
        tree.attach_logical_child(user_control, inner).unwrap();
        tree.attach_logical_child(root, user_control).unwrap();

        assert_eq!(tree.find_name(root, "uc"), Some(user_control));
        assert_eq!(tree.find_name(root, "inner"), None);
        assert_eq!(tree.find_name(user_control, "inner"), Some(inner));
        assert_eq!(tree.find_name(inner, "inner"), Some(inner));
    }

    #[test]
    fn duplicate_name_fails_without_mutation() {
        let mut tree = Tree::new();
        let root = tree.insert(ElementInfo::new("Root").with_namescope());
        let first = el(&mut tree, "x");
        let second = el(&mut tree, "x");
        tree.attach_logical_child(root, first).unwrap();
        assert!(matches!(
            tree.attach_logical_child(root, second),
            Err(TreeError::DuplicateName { .. })
        ));
        assert_eq!(tree.logical_parent(second), None);
        assert_eq!(tree.find_name(root, "x"), Some(first));
    }

    #[test]
    fn unnamed_and_empty_names_are_skipped() {
        let mut tree = Tree::new();
        let root = tree.insert(ElementInfo::new("Root").with_namescope());
        let a = tree.insert(ElementInfo::new("A").named(""));
        let b = tree.insert(ElementInfo::new("B"));
        tree.attach_logical_child(root, a).unwrap();
        tree.attach_logical_child(root, b).unwrap();
        assert!(tree.namescope(root).unwrap().is_empty());
    }

    #[test]
    fn reparent_within_scope_keeps_name() {
        let mut tree = Tree::new();
        let root = tree.insert(ElementInfo::new("Root").with_namescope());
        let left = el(&mut tree, "left");
        let right = el(&mut tree, "right");
        let item = el(&mut tree, "item");
        for p in [left, right] {
            tree.attach_logical_child(root, p).unwrap();
        }
        tree.attach_logical_child(left, item).unwrap();
        tree.change_logical_parent(item, Some(right)).unwrap();
        assert_eq!(tree.logical_parent(item), Some(right));
        assert!(tree.logical_children(left).is_empty());
        assert_eq!(tree.find_name(root, "item"), Some(item));
    }

    #[test]
    fn remove_takes_visual_only_parts() {
        let mut tree = Tree::new();
        let root = el(&mut tree, "root");
        let control = el(&mut tree, "control");
        let template_part = el(&mut tree, "part");
        let borrowed = el(&mut tree, "borrowed");
        tree.attach_logical_child(root, control).unwrap();
        tree.attach_visual_child(root, control).unwrap();
        tree.attach_visual_child(control, template_part).unwrap();
        tree.attach_logical_child(root, borrowed).unwrap();
        tree.attach_visual_child(control, borrowed).unwrap();

        let removed = tree.remove(control).unwrap();
        assert_eq!(removed, vec![control, template_part]);
        assert!(tree.contains(borrowed));
        assert_eq!(tree.visual_parent(borrowed), None);
        assert!(tree.visual_children(root).is_empty());
        assert_eq!(tree.logical_children(root), &[borrowed]);
        assert!(!tree.contains(control));
    }

    #[test]
    fn classes_are_sorted_sets() {
        let mut tree = Tree::new();
        let id = tree.insert(ElementInfo::new("Button").class("b").class("a").class("b"));
        assert_eq!(tree.classes(id).len(), 2);
        assert!(tree.has_class(id, "a"));
        assert_eq!(tree.add_class(id, "c"), Ok(true));
        assert_eq!(tree.add_class(id, "c"), Ok(false));
        assert_eq!(tree.remove_class(id, "a"), Ok(true));
        assert!(!tree.has_class(id, "a"));
    }
}
