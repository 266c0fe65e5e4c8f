// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Running storyboards against element properties.
//!
//! Every running storyboard owns a clock and a resolved target per track.
//! Each animated `(element, property)` pair is bound to the storyboard that
//! began most recently; older storyboards keep their clocks but stop writing
//! to a pair once it is taken over.

use std::rc::Rc;

use hashbrown::HashSet;
use trellis_animation::{ClockState, Storyboard, StoryboardClock};
use trellis_property::{Precedence, PropertyId};
use trellis_tree::ElementId;

use crate::error::ViewError;
use crate::view::View;

slotmap::new_key_type! {
    /// Identifies a running storyboard.
    pub(crate) struct AnimationId;
}

#[derive(Debug)]
pub(crate) struct ActiveStoryboard {
    /// Element the storyboard was begun on.
    pub(crate) element: ElementId,
    pub(crate) storyboard: Rc<Storyboard>,
    pub(crate) clock: StoryboardClock,
    /// One entry per track; `None` when the target could not be resolved.
    pub(crate) targets: Vec<Option<(ElementId, PropertyId)>>,
}

impl View {
    /// Begins the stylesheet storyboard called `name` on `element`.
    ///
    /// Returns `false` when the stylesheet has no such storyboard.
    pub fn begin_storyboard(&mut self, element: ElementId, name: &str) -> Result<bool, ViewError> {
        match self.stylesheet.instantiate_storyboard(name) {
            Some(storyboard) => {
                self.begin_storyboard_with(element, storyboard)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Begins `storyboard` on `element`.
    ///
    /// Track targets are looked up by name from `element`'s namescope;
    /// tracks whose element or property cannot be found are skipped. Track
    /// value types are checked before anything changes. A storyboard of the
    /// same name already running on `element` restarts.
    pub fn begin_storyboard_with(
        &mut self,
        element: ElementId,
        storyboard: Rc<Storyboard>,
    ) -> Result<(), ViewError> {
        let targets = self.resolve_targets(element, &storyboard)?;

        if let Some(previous) = self.find_animation(element, storyboard.name()) {
            self.stop_animation(previous)?;
        }

        let mut clock = storyboard.create_clock();
        clock.start();
        tracing::debug!(?element, storyboard = storyboard.name(), "storyboard begun");
        let id = self.animations.insert(ActiveStoryboard {
            element,
            storyboard,
            clock,
            targets,
        });
        if let Some(active) = self.animations.get(id) {
            for target in active.targets.iter().flatten() {
                self.bindings.insert(*target, id);
            }
        }
        self.apply_animation(id)
    }

    /// Resolves the animated `(element, property)` of each track, checking
    /// value types. Unresolvable tracks map to `None`.
    pub(crate) fn resolve_targets(
        &self,
        element: ElementId,
        storyboard: &Storyboard,
    ) -> Result<Vec<Option<(ElementId, PropertyId)>>, ViewError> {
        if !self.contains(element) {
            return Err(trellis_tree::TreeError::UnknownElement(element).into());
        }
        let mut targets = Vec::with_capacity(storyboard.tracks().len());
        for track in storyboard.tracks() {
            let target = match track.target() {
                None => Some(element),
                Some(name) => self.find_name(element, name),
            };
            let Some(target) = target else {
                tracing::debug!(
                    storyboard = storyboard.name(),
                    name = track.target(),
                    "animation target not found"
                );
                targets.push(None);
                continue;
            };
            let Some((id, registration)) = self
                .registry
                .by_style_name(track.property())
                .and_then(|id| Some((id, self.registry.get(id)?)))
            else {
                tracing::debug!(
                    storyboard = storyboard.name(),
                    property = track.property(),
                    "animated property not found"
                );
                targets.push(None);
                continue;
            };
            track.check_type(registration.type_id(), registration.type_name())?;
            targets.push(Some((target, id)));
        }
        Ok(targets)
    }

    /// Stops the storyboard `name` on `element` and removes its animated
    /// values. Returns whether one was running.
    pub fn stop_storyboard(&mut self, element: ElementId, name: &str) -> Result<bool, ViewError> {
        match self.find_animation(element, name) {
            Some(id) => {
                self.stop_animation(id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Pauses a running storyboard. Returns whether its state changed.
    pub fn pause_storyboard(&mut self, element: ElementId, name: &str) -> bool {
        self.find_animation(element, name)
            .and_then(|id| self.animations.get_mut(id))
            .is_some_and(|active| active.clock.pause())
    }

    /// Resumes a paused storyboard. Returns whether its state changed.
    pub fn resume_storyboard(&mut self, element: ElementId, name: &str) -> bool {
        self.find_animation(element, name)
            .and_then(|id| self.animations.get_mut(id))
            .is_some_and(|active| active.clock.resume())
    }

    /// Clock state of the storyboard `name` on `element`; `None` if it is
    /// not running.
    #[must_use]
    pub fn storyboard_state(&self, element: ElementId, name: &str) -> Option<ClockState> {
        self.find_animation(element, name)
            .and_then(|id| self.animations.get(id))
            .map(|active| active.clock.state())
    }

    /// Number of storyboards with a live clock, completed ones included.
    #[must_use]
    pub fn running_storyboards(&self) -> usize {
        self.animations.len()
    }

    fn find_animation(&self, element: ElementId, name: &str) -> Option<AnimationId> {
        self.animations
            .iter()
            .find(|(_, a)| a.element == element && a.storyboard.name() == name)
            .map(|(id, _)| id)
    }

    /// Removes a storyboard and clears the animated values it still owns.
    pub(crate) fn stop_animation(&mut self, id: AnimationId) -> Result<(), ViewError> {
        let Some(active) = self.animations.remove(id) else {
            return Ok(());
        };
        tracing::debug!(
            element = ?active.element,
            storyboard = active.storyboard.name(),
            "storyboard stopped"
        );
        for target in active.targets.into_iter().flatten() {
            if self.bindings.get(&target) == Some(&id) {
                self.bindings.remove(&target);
                if self.contains(target.0) {
                    self.write_property(target.0, target.1, Precedence::Animated, None)?;
                }
            }
        }
        Ok(())
    }

    /// Writes the current sample of every track still bound to `id`.
    fn apply_animation(&mut self, id: AnimationId) -> Result<(), ViewError> {
        let Some(active) = self.animations.get(id) else {
            return Ok(());
        };
        let position = active.clock.position();
        let mut writes = Vec::new();
        for (track, target) in active.storyboard.tracks().iter().zip(&active.targets) {
            if let Some(target) = target
                && self.bindings.get(target) == Some(&id)
            {
                writes.push((*target, track.sample(position)?));
            }
        }
        for ((element, property), value) in writes {
            self.write_property(element, property, Precedence::Animated, Some(value))?;
        }
        Ok(())
    }

    /// Advances every clock by `delta` seconds and writes the new samples at
    /// the animated level. Completed storyboards write their final value once
    /// and keep holding it.
    pub fn advance_animations(&mut self, delta: f64) -> Result<(), ViewError> {
        let mut writes = Vec::new();
        for (id, active) in &mut self.animations {
            let tick = active.clock.advance(delta);
            if tick.state != ClockState::Running && !tick.completed {
                continue;
            }
            if tick.completed {
                tracing::debug!(storyboard = active.storyboard.name(), "storyboard completed");
            }
            for (track, target) in active.storyboard.tracks().iter().zip(&active.targets) {
                if let Some(target) = target
                    && self.bindings.get(target) == Some(&id)
                {
                    writes.push((*target, track.sample(tick.position)?));
                }
            }
        }
        for ((element, property), value) in writes {
            self.write_property(element, property, Precedence::Animated, Some(value))?;
        }
        Ok(())
    }

    /// Stops storyboards begun on `members` and drops every binding that
    /// targets them.
    pub(crate) fn release_animations(&mut self, members: &HashSet<ElementId>) {
        let owned: Vec<AnimationId> = self
            .animations
            .iter()
            .filter(|(_, a)| members.contains(&a.element))
            .map(|(id, _)| id)
            .collect();
        for id in owned {
            if let Err(err) = self.stop_animation(id) {
                tracing::debug!(%err, "could not clear animated value");
            }
        }
        let targeted: Vec<(ElementId, PropertyId)> = self
            .bindings
            .keys()
            .filter(|(element, _)| members.contains(element))
            .copied()
            .collect();
        for target in targeted {
            self.bindings.remove(&target);
            if let Err(err) = self.write_property(target.0, target.1, Precedence::Animated, None) {
                tracing::debug!(%err, "could not clear animated value");
            }
        }
    }
}
