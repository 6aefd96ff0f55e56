// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard sensor: lift, step, drop and cancel with keys.
//!
//! Keyboard drags have no click to disambiguate, so the lift key lifts
//! immediately. While dragging:
//!
//! - arrows emit [`MoveTo::Step`] commands,
//! - the lift key again emits [`DragCommand::Drop`],
//! - Escape emits [`DragCommand::Cancel`],
//! - Tab and Enter are swallowed so focus can't wander off mid-drag.
//!
//! The sensor assumes its own lift was accepted. The consumer may refuse it,
//! for example while a pointer drag is already running, so hosts call
//! [`KeyboardSensor::sync`] after delivering each command with whether a
//! keyboard drag is really active. Otherwise the next lift-key press would be
//! reported as a drop.
//!
//! ```
//! use understory_event_state::keyboard::KeyboardSensor;
//! use understory_event_state::{Direction, DragCommand, Key, LiftMode, MoveTo};
//!
//! let mut sensor = KeyboardSensor::default();
//!
//! let out = sensor.on_key_down(Some(&"first"), Key::Space);
//! assert_eq!(out.command, Some(DragCommand::Lift { id: "first", mode: LiftMode::Keyboard }));
//!
//! let out = sensor.on_key_down(Some(&"first"), Key::ArrowDown);
//! assert_eq!(out.command, Some(DragCommand::Move(MoveTo::Step(Direction::Down))));
//!
//! let out = sensor.on_key_down(Some(&"first"), Key::Space);
//! assert_eq!(out.command, Some(DragCommand::Drop));
//! assert!(!sensor.is_dragging());
//! ```

use crate::command::{DragCommand, InputOutcome, Key, LiftMode, MoveTo};

/// Keyboard sensor configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyboardConfig {
    /// Key that lifts and drops (default: [`Key::Space`]).
    pub lift_key: Key,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            lift_key: Key::Space,
        }
    }
}

/// Normalizes key presses into [`DragCommand`]s.
#[derive(Clone, Debug, Default)]
pub struct KeyboardSensor {
    config: KeyboardConfig,
    dragging: bool,
}

impl KeyboardSensor {
    /// Creates an idle sensor with the given configuration.
    #[must_use]
    pub fn new(config: KeyboardConfig) -> Self {
        Self {
            config,
            dragging: false,
        }
    }

    /// Returns `true` while a keyboard drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// A key went down. `focused` is the draggable currently holding focus, if any.
    pub fn on_key_down<K: Clone>(&mut self, focused: Option<&K>, key: Key) -> InputOutcome<K> {
        if !self.dragging {
            return match focused {
                Some(id) if key == self.config.lift_key => {
                    self.dragging = true;
                    InputOutcome::emit(
                        DragCommand::Lift {
                            id: id.clone(),
                            mode: LiftMode::Keyboard,
                        },
                        true,
                    )
                }
                _ => InputOutcome::ignored(),
            };
        }

        if key == self.config.lift_key {
            self.dragging = false;
            return InputOutcome::emit(DragCommand::Drop, true);
        }
        match key {
            Key::Escape => {
                self.dragging = false;
                InputOutcome::emit(DragCommand::Cancel, true)
            }
            Key::Tab | Key::Enter => InputOutcome::swallowed(),
            _ => match key.direction() {
                Some(direction) => {
                    InputOutcome::emit(DragCommand::Move(MoveTo::Step(direction)), true)
                }
                None => InputOutcome::ignored(),
            },
        }
    }

    /// Focus left the window or the drag handle.
    pub fn on_blur<K>(&mut self) -> InputOutcome<K> {
        if self.dragging {
            self.dragging = false;
            InputOutcome::emit(DragCommand::Cancel, false)
        } else {
            InputOutcome::ignored()
        }
    }

    /// Align the sensor with the consumer's view of whether a keyboard drag
    /// is active.
    pub fn sync(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Forget the current drag without emitting anything.
    pub fn reset(&mut self) {
        self.dragging = false;
    }
}
