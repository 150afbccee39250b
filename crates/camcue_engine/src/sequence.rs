// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequences and the steps they are made of.

use crate::action::CameraAction;
use crate::event::GameEvent;
use serde::{Deserialize, Serialize};

/// One step of a sequence: when `event` arrives at the cursor, schedule
/// `action` to run `delay` seconds later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    /// The event this step waits for.
    #[serde(rename = "eventName")]
    pub event: GameEvent,
    /// The camera action scheduled when the event matches.
    #[serde(rename = "actionName")]
    pub action: CameraAction,
    /// Seconds between the matching event and the action firing.
    pub delay: f32,
    /// Action-specific value: a swivel percentage for yaw, 0/1 for the
    /// boolean camera modes.
    #[serde(rename = "customValue")]
    pub value: f32,
}

impl Mapping {
    /// Create a step.
    pub fn new(event: GameEvent, action: CameraAction, delay: f32, value: f32) -> Self {
        Self {
            event,
            action,
            delay: delay.max(0.0),
            value,
        }
    }
}

/// A named, ordered list of steps.
///
/// Owned by the [`SequenceLibrary`](crate::SequenceLibrary); the
/// playback engine copies the steps at start so library edits during
/// playback cannot touch the run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    /// Display name; also the key in the sequence library.
    pub name: String,
    /// Steps in playback order.
    pub steps: Vec<Mapping>,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Create a sequence from existing steps.
    pub fn with_steps(name: impl Into<String>, steps: Vec<Mapping>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Append a step.
    pub fn add_step(&mut self, step: Mapping) {
        self.steps.push(step);
    }

    /// Remove the step at `index`, if it exists.
    pub fn remove_step(&mut self, index: usize) -> Option<Mapping> {
        if index < self.steps.len() {
            Some(self.steps.remove(index))
        } else {
            None
        }
    }

    /// Move a step one slot earlier.
    pub fn move_step_up(&mut self, index: usize) {
        if index > 0 && index < self.steps.len() {
            self.steps.swap(index, index - 1);
        }
    }

    /// Move a step one slot later.
    pub fn move_step_down(&mut self, index: usize) {
        if index < self.steps.len().saturating_sub(1) {
            self.steps.swap(index, index + 1);
        }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the sequence has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
