// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storyboard playback clocks.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Lifecycle of a clock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClockState {
    /// Not playing; the storyboard has no effect.
    #[default]
    Stopped,
    /// Advancing with every frame.
    Running,
    /// Holding its current position.
    Paused,
    /// Reached the end of a non-looping storyboard; holds the final value.
    Completed,
}

impl ClockState {
    /// Whether a storyboard on this clock should be applied to its targets.
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::Stopped
    }
}

/// What a clock does when it reaches the end of its duration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopBehavior {
    /// Play once and complete.
    #[default]
    None,
    /// Restart from the beginning.
    Loop,
    /// Alternate between playing forwards and backwards.
    Reverse,
}

/// Result of advancing a clock.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClockTick {
    /// Position within the storyboard, in seconds.
    pub position: f64,
    /// State after the advance.
    pub state: ClockState,
    /// Whether this advance moved the clock to [`ClockState::Completed`].
    pub completed: bool,
}

/// Converts frame time into a storyboard position.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoryboardClock {
    duration: f64,
    loop_behavior: LoopBehavior,
    state: ClockState,
    elapsed: f64,
}

impl StoryboardClock {
    /// A stopped clock for a storyboard of `duration` seconds.
    #[must_use]
    pub fn new(duration: f64, loop_behavior: LoopBehavior) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            duration,
            loop_behavior,
            state: ClockState::Stopped,
            elapsed: 0.0,
        }
    }

    /// Duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Loop behavior.
    #[must_use]
    pub fn loop_behavior(&self) -> LoopBehavior {
        self.loop_behavior
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Total time spent running since the last start.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Starts (or restarts) from the beginning.
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.state = ClockState::Running;
        if self.loop_behavior == LoopBehavior::None && self.duration <= 0.0 {
            self.state = ClockState::Completed;
        }
        tracing::trace!(duration = self.duration, state = ?self.state, "clock started");
    }

    /// Stops and rewinds.
    pub fn stop(&mut self) {
        if self.state != ClockState::Stopped {
            tracing::trace!(elapsed = self.elapsed, "clock stopped");
        }
        self.elapsed = 0.0;
        self.state = ClockState::Stopped;
    }

    /// Pauses a running clock. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
            tracing::trace!(elapsed = self.elapsed, "clock paused");
            true
        } else {
            false
        }
    }

    /// Resumes a paused clock. Returns whether the state changed.
    pub fn resume(&mut self) -> bool {
        if self.state == ClockState::Paused {
            self.state = ClockState::Running;
            tracing::trace!(elapsed = self.elapsed, "clock resumed");
            true
        } else {
            false
        }
    }

    /// Position within the storyboard for the current elapsed time.
    #[must_use]
    pub fn position(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        match self.loop_behavior {
            LoopBehavior::None => self.elapsed.min(self.duration),
            LoopBehavior::Loop => {
                let cycles = (self.elapsed / self.duration).floor();
                self.elapsed - cycles * self.duration
            }
            LoopBehavior::Reverse => {
                let cycles = (self.elapsed / self.duration).floor();
                let local = self.elapsed - cycles * self.duration;
                if cycles % 2.0 == 0.0 {
                    local
                } else {
                    self.duration - local
                }
            }
        }
    }

    /// Advances a running clock by `delta` seconds.
    ///
    /// Stopped, paused and completed clocks do not move.
    pub fn advance(&mut self, delta: f64) -> ClockTick {
        let mut completed = false;
        if self.state == ClockState::Running && delta.is_finite() && delta > 0.0 {
            self.elapsed += delta;
            if self.loop_behavior == LoopBehavior::None && self.elapsed >= self.duration {
                self.elapsed = self.duration;
                self.state = ClockState::Completed;
                completed = true;
                tracing::debug!(duration = self.duration, "clock completed");
            }
        }
        ClockTick {
            position: self.position(),
            state: self.state,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_to_completion_and_holds() {
        let mut clock = StoryboardClock::new(1.0, LoopBehavior::None);
        clock.start();
        assert_eq!(clock.advance(0.5).position, 0.5);
        let tick = clock.advance(0.75);
        assert!(tick.completed);
        assert_eq!(tick.state, ClockState::Completed);
        assert_eq!(tick.position, 1.0);
        let tick = clock.advance(1.0);
        assert!(!tick.completed);
        assert_eq!(tick.position, 1.0);
        assert!(clock.state().is_active());
    }

    #[test]
    fn loop_wraps() {
        let mut clock = StoryboardClock::new(2.0, LoopBehavior::Loop);
        clock.start();
        assert_eq!(clock.advance(2.5).position, 0.5);
        assert_eq!(clock.state(), ClockState::Running);
    }

    #[test]
    fn reverse_plays_backwards_on_odd_cycles() {
        let mut clock = StoryboardClock::new(2.0, LoopBehavior::Reverse);
        clock.start();
        assert_eq!(clock.advance(2.5).position, 1.5);
        assert_eq!(clock.advance(2.0).position, 0.5);
    }

    #[test]
    fn pause_freezes_position() {
        let mut clock = StoryboardClock::new(4.0, LoopBehavior::None);
        clock.start();
        clock.advance(1.0);
        assert!(clock.pause());
        assert!(!clock.pause());
        assert_eq!(clock.advance(1.0).position, 1.0);
        assert!(clock.resume());
        assert_eq!(clock.advance(1.0).position, 2.0);
    }

    #[test]
    fn stop_rewinds_and_deactivates() {
        let mut clock = StoryboardClock::new(1.0, LoopBehavior::None);
        clock.start();
        clock.advance(0.3);
        clock.stop();
        assert_eq!(clock.state(), ClockState::Stopped);
        assert!(!clock.state().is_active());
        assert_eq!(clock.advance(0.3).position, 0.0);
    }

    #[test]
    fn zero_duration_completes_on_start() {
        let mut clock = StoryboardClock::new(0.0, LoopBehavior::None);
        clock.start();
        assert_eq!(clock.state(), ClockState::Completed);
    }
}
