// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual state groups and their transitions.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::VisualStateError;

/// Name of the group every element carries for keyboard focus.
pub const FOCUS_GROUP: &str = "focus";
/// Focus state of an element without keyboard focus. Initial state.
pub const BLURRED: &str = "blurred";
/// Focus state of the element with keyboard focus.
pub const FOCUSED: &str = "focused";

/// Parsed `transition(group, [from,] to)` arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionKey {
    /// Group the transition belongs to.
    pub group: String,
    /// Source state, or `None` for "from any state".
    pub from: Option<String>,
    /// Destination state.
    pub to: String,
}

impl TransitionKey {
    /// Interprets transition arguments.
    ///
    /// Two arguments are `(group, to)`, three are `(group, from, to)`.
    ///
    /// ```rust
    /// use trellis_visual_state::{TransitionKey, VisualStateError};
    ///
    /// let key = TransitionKey::from_arguments(&["focus", "focused"]).unwrap();
    /// assert_eq!(key.from, None);
    /// let key = TransitionKey::from_arguments(&["focus", "blurred", "focused"]).unwrap();
    /// assert_eq!(key.from.as_deref(), Some("blurred"));
    /// assert_eq!(
    ///     TransitionKey::from_arguments(&["focus"]),
    ///     Err(VisualStateError::AmbiguousArguments(1)),
    /// );
    /// ```
    pub fn from_arguments<S: AsRef<str>>(arguments: &[S]) -> Result<Self, VisualStateError> {
        match arguments {
            [group, to] => Ok(Self {
                group: group.as_ref().to_string(),
                from: None,
                to: to.as_ref().to_string(),
            }),
            [group, from, to] => Ok(Self {
                group: group.as_ref().to_string(),
                from: Some(from.as_ref().to_string()),
                to: to.as_ref().to_string(),
            }),
            _ => Err(VisualStateError::AmbiguousArguments(arguments.len())),
        }
    }
}

/// Outcome of a state change request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateChange<S> {
    /// Already in the requested state.
    Unchanged,
    /// Moved without a transition storyboard.
    Snap,
    /// Moved; play this storyboard.
    Animate(S),
}

/// A set of mutually exclusive states. Exactly one is current.
#[derive(Clone, Debug)]
pub struct VisualStateGroup<S> {
    name: String,
    states: Vec<String>,
    current: usize,
    transitions: HashMap<(Option<String>, String), S>,
}

impl<S: Clone> VisualStateGroup<S> {
    /// Creates a group. The first state is current.
    pub fn new<I>(name: &str, states: I) -> Result<Self, VisualStateError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for state in states {
            let state = state.as_ref();
            if list.iter().any(|s| s == state) {
                return Err(VisualStateError::DuplicateState {
                    group: name.to_string(),
                    state: state.to_string(),
                });
            }
            list.push(state.to_string());
        }
        if list.is_empty() {
            return Err(VisualStateError::EmptyGroup(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            states: list,
            current: 0,
            transitions: HashMap::new(),
        })
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// States in declaration order.
    #[must_use]
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// The current state.
    #[must_use]
    pub fn current_state(&self) -> &str {
        &self.states[self.current]
    }

    /// Whether `state` belongs to this group.
    #[must_use]
    pub fn has_state(&self, state: &str) -> bool {
        self.index_of(state).is_some()
    }

    fn index_of(&self, state: &str) -> Option<usize> {
        self.states.iter().position(|s| s == state)
    }

    fn require(&self, state: &str) -> Result<usize, VisualStateError> {
        self.index_of(state)
            .ok_or_else(|| VisualStateError::UnknownState {
                group: self.name.clone(),
                state: state.to_string(),
            })
    }

    /// Registers the storyboard played when moving from `from` (or any state)
    /// to `to`, replacing a previous registration for the same pair.
    pub fn set_transition(
        &mut self,
        from: Option<&str>,
        to: &str,
        storyboard: S,
    ) -> Result<(), VisualStateError> {
        if let Some(from) = from {
            self.require(from)?;
        }
        self.require(to)?;
        self.transitions
            .insert((from.map(ToString::to_string), to.to_string()), storyboard);
        Ok(())
    }

    /// Storyboard for `from → to`: an exact registration first, then the
    /// wildcard one for `to`.
    #[must_use]
    pub fn transition(&self, from: &str, to: &str) -> Option<&S> {
        self.transitions
            .get(&(Some(from.to_string()), to.to_string()))
            .or_else(|| self.transitions.get(&(None, to.to_string())))
    }

    /// Number of registered transitions.
    #[must_use]
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Drops every registered transition.
    pub fn clear_transitions(&mut self) {
        self.transitions.clear();
    }

    /// Moves to `state`.
    pub fn go_to_state(&mut self, state: &str) -> Result<StateChange<S>, VisualStateError> {
        let target = self.require(state)?;
        if target == self.current {
            return Ok(StateChange::Unchanged);
        }
        let from = self.current_state().to_string();
        self.current = target;
        match self.transition(&from, state) {
            Some(storyboard) => {
                tracing::debug!(group = %self.name, %from, to = state, "animated state change");
                Ok(StateChange::Animate(storyboard.clone()))
            }
            None => {
                tracing::debug!(group = %self.name, %from, to = state, "state change");
                Ok(StateChange::Snap)
            }
        }
    }
}

/// All visual state groups of one element.
///
/// ```rust
/// use trellis_visual_state::{StateChange, VisualStateGroups, FOCUS_GROUP, FOCUSED};
///
/// let mut groups = VisualStateGroups::<&str>::with_focus();
/// groups.create("common", ["normal", "hover", "pressed"]).unwrap();
/// groups.set_transition("common", None, "hover", "glow").unwrap();
///
/// assert_eq!(groups.go_to_state("common", "hover"), Ok(StateChange::Animate("glow")));
/// assert_eq!(groups.go_to_state("common", "hover"), Ok(StateChange::Unchanged));
/// assert_eq!(groups.go_to_state(FOCUS_GROUP, FOCUSED), Ok(StateChange::Snap));
/// assert!(groups.is_in_state("focused"));
/// ```
#[derive(Clone, Debug)]
pub struct VisualStateGroups<S> {
    groups: Vec<VisualStateGroup<S>>,
}

impl<S> Default for VisualStateGroups<S> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<S: Clone> VisualStateGroups<S> {
    /// No groups.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the standard focus group (`blurred`, `focused`).
    #[must_use]
    pub fn with_focus() -> Self {
        let mut groups = Self::new();
        if let Ok(focus) = VisualStateGroup::new(FOCUS_GROUP, [BLURRED, FOCUSED]) {
            groups.groups.push(focus);
        }
        groups
    }

    /// Adds a group.
    pub fn create<I>(&mut self, name: &str, states: I) -> Result<(), VisualStateError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.get(name).is_some() {
            return Err(VisualStateError::DuplicateGroup(name.to_string()));
        }
        self.groups.push(VisualStateGroup::new(name, states)?);
        Ok(())
    }

    /// Looks up a group.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VisualStateGroup<S>> {
        self.groups.iter().find(|g| g.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut VisualStateGroup<S>, VisualStateError> {
        self.groups
            .iter_mut()
            .find(|g| g.name == name)
            .ok_or_else(|| VisualStateError::UnknownGroup(name.to_string()))
    }

    /// Groups in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &VisualStateGroup<S>> {
        self.groups.iter()
    }

    /// Whether any group's current state is `state`.
    #[must_use]
    pub fn is_in_state(&self, state: &str) -> bool {
        self.groups.iter().any(|g| g.current_state() == state)
    }

    /// Current state of `group`.
    #[must_use]
    pub fn current_state(&self, group: &str) -> Option<&str> {
        self.get(group).map(VisualStateGroup::current_state)
    }

    /// Moves `group` to `state`.
    pub fn go_to_state(
        &mut self,
        group: &str,
        state: &str,
    ) -> Result<StateChange<S>, VisualStateError> {
        self.get_mut(group)?.go_to_state(state)
    }

    /// Registers a transition storyboard on `group`.
    pub fn set_transition(
        &mut self,
        group: &str,
        from: Option<&str>,
        to: &str,
        storyboard: S,
    ) -> Result<(), VisualStateError> {
        self.get_mut(group)?.set_transition(from, to, storyboard)
    }

    /// Registers a transition from parsed arguments.
    pub fn set_transition_key(
        &mut self,
        key: &TransitionKey,
        storyboard: S,
    ) -> Result<(), VisualStateError> {
        self.set_transition(&key.group, key.from.as_deref(), &key.to, storyboard)
    }

    /// Drops the transitions of every group. States are kept.
    pub fn clear_transitions(&mut self) {
        for group in &mut self.groups {
            group.clear_transitions();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common() -> VisualStateGroup<u32> {
        VisualStateGroup::new("common", ["normal", "hover", "pressed"]).unwrap()
    }

    #[test]
    fn first_state_is_initial() {
        assert_eq!(common().current_state(), "normal");
    }

    #[test]
    fn exact_transition_beats_wildcard() {
        let mut group = common();
        group.set_transition(None, "pressed", 1).unwrap();
        group.set_transition(Some("hover"), "pressed", 2).unwrap();
        assert_eq!(group.go_to_state("pressed"), Ok(StateChange::Animate(1)));
        group.go_to_state("hover").unwrap();
        assert_eq!(group.go_to_state("pressed"), Ok(StateChange::Animate(2)));
    }

    #[test]
    fn missing_transition_snaps() {
        let mut group = common();
        assert_eq!(group.go_to_state("hover"), Ok(StateChange::Snap));
        assert_eq!(group.current_state(), "hover");
    }

    #[test]
    fn same_state_is_a_no_op() {
        let mut group = common();
        group.set_transition(None, "normal", 9).unwrap();
        assert_eq!(group.go_to_state("normal"), Ok(StateChange::Unchanged));
    }

    #[test]
    fn unknown_states_are_rejected() {
        let mut group = common();
        assert!(matches!(
            group.go_to_state("disabled"),
            Err(VisualStateError::UnknownState { .. })
        ));
        assert!(group.set_transition(Some("gone"), "hover", 1).is_err());
        assert_eq!(group.current_state(), "normal");
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            VisualStateGroup::<u32>::new("x", ["a", "a"]).unwrap_err(),
            VisualStateError::DuplicateState {
                group: "x".into(),
                state: "a".into()
            }
        );
        assert_eq!(
            VisualStateGroup::<u32>::new("x", Vec::<String>::new()).unwrap_err(),
            VisualStateError::EmptyGroup("x".into())
        );
        let mut groups = VisualStateGroups::<u32>::with_focus();
        assert_eq!(
            groups.create(FOCUS_GROUP, ["a"]),
            Err(VisualStateError::DuplicateGroup(FOCUS_GROUP.into()))
        );
        assert_eq!(
            groups.go_to_state("missing", "a"),
            Err(VisualStateError::UnknownGroup("missing".into()))
        );
    }

    #[test]
    fn clearing_keeps_current_state() {
        let mut groups = VisualStateGroups::<u32>::with_focus();
        let key = TransitionKey::from_arguments(&["focus", "focused"]).unwrap();
        groups.set_transition_key(&key, 3).unwrap();
        groups.go_to_state(FOCUS_GROUP, FOCUSED).unwrap();
        groups.clear_transitions();
        assert_eq!(groups.current_state(FOCUS_GROUP), Some(FOCUSED));
        assert_eq!(groups.go_to_state(FOCUS_GROUP, BLURRED), Ok(StateChange::Snap));
    }
}
