// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized drag commands shared by every input sensor.

use kurbo::Point;

/// A single normalized drag command.
///
/// Sensors emit at most one command per raw input event. The command stream is
/// modality-agnostic apart from [`LiftMode`] and [`MoveTo`], which carry just
/// enough information for the consumer to pick the right transition.
#[derive(Clone, Debug, PartialEq)]
pub enum DragCommand<K> {
    /// Begin a drag of the draggable `id`.
    Lift {
        /// The draggable being lifted.
        id: K,
        /// How the lift was initiated.
        mode: LiftMode,
    },
    /// Move the active drag.
    Move(MoveTo),
    /// Drop the active drag where it currently is.
    Drop,
    /// Cancel the active drag and return the item home.
    Cancel,
}

impl<K> DragCommand<K> {
    /// Returns `true` for [`DragCommand::Move`].
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move(_))
    }

    /// Returns `true` for [`DragCommand::Cancel`].
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel)
    }
}

/// How a lift was initiated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LiftMode {
    /// Mouse press at the given position.
    ///
    /// This is not yet a drag: consumers wait for movement past a threshold so
    /// that plain clicks stay clicks.
    Pointer(Point),
    /// Keyboard lift. There is no click to disambiguate, so this lifts
    /// immediately.
    Keyboard,
    /// Touch long-press at the given position. The long-press already
    /// disambiguated the gesture, so this lifts immediately.
    Touch(Point),
}

/// Where a move command goes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveTo {
    /// Absolute pointer position, in the same frame as the lift position.
    Pointer(Point),
    /// Discrete move by one slot.
    Step(Direction),
}

/// Arrow-key direction of a discrete step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the top.
    Up,
    /// Towards the bottom.
    Down,
    /// Towards the left.
    Left,
    /// Towards the right.
    Right,
}

/// Result of feeding one raw event to a sensor.
#[derive(Clone, Debug, PartialEq)]
pub struct InputOutcome<K> {
    /// The command produced by the event, if any.
    pub command: Option<DragCommand<K>>,
    /// Whether the host should suppress the event's default action
    /// (scrolling, text selection, focus traversal).
    pub prevent_default: bool,
}

impl<K> InputOutcome<K> {
    /// An event the sensor did not care about.
    #[must_use]
    pub const fn ignored() -> Self {
        Self {
            command: None,
            prevent_default: false,
        }
    }

    /// An event consumed by an active drag without producing a command.
    #[must_use]
    pub const fn swallowed() -> Self {
        Self {
            command: None,
            prevent_default: true,
        }
    }

    /// An event producing `command`.
    #[must_use]
    pub const fn emit(command: DragCommand<K>, prevent_default: bool) -> Self {
        Self {
            command: Some(command),
            prevent_default,
        }
    }
}

/// Identity of a key, as normalized by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Any other key.
    Other,
}

impl Key {
    /// Maps arrow keys to a step direction.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::ArrowUp => Some(Direction::Up),
            Self::ArrowDown => Some(Direction::Down),
            Self::ArrowLeft => Some(Direction::Left),
            Self::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}
