// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer sensor: turn raw mouse and touch events into drag commands.
//!
//! ## Usage
//!
//! 1) Forward pointer-down on a draggable to [`PointerSensor::on_down`]. A mouse press emits a
//!    [`LiftMode::Pointer`] lift, which consumers treat as *pending* until the pointer moves.
//! 2) Forward moves to [`PointerSensor::on_move`]. Every move while pressed emits a
//!    [`MoveTo::Pointer`] command; once the pointer travels past the drag threshold the sensor
//!    starts asking the host to suppress default handling.
//! 3) Forward pointer-up to [`PointerSensor::on_up`] to emit [`DragCommand::Drop`].
//! 4) Forward Escape, pointer-cancel and window blur to [`PointerSensor::on_key`] and
//!    [`PointerSensor::on_cancel`].
//!
//! Touch input uses a basic long-press: the touch must be held for
//! [`PointerConfig::long_press_ms`] before [`PointerSensor::on_tick`] lifts it. A touch that
//! moves past the drag threshold first is treated as a scroll and abandoned.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::drag::{PointerButton, PointerKind, PointerSensor};
//! use understory_event_state::{DragCommand, LiftMode, MoveTo};
//!
//! let mut sensor = PointerSensor::default();
//!
//! let out = sensor.on_down(7_u32, PointerKind::Mouse, PointerButton::Primary, Point::new(10.0, 20.0), 0);
//! assert_eq!(
//!     out.command,
//!     Some(DragCommand::Lift { id: 7, mode: LiftMode::Pointer(Point::new(10.0, 20.0)) })
//! );
//!
//! let out = sensor.on_move(Point::new(10.0, 40.0), 16);
//! assert_eq!(out.command, Some(DragCommand::Move(MoveTo::Pointer(Point::new(10.0, 40.0)))));
//! assert!(out.prevent_default);
//!
//! let out = sensor.on_up(Point::new(10.0, 40.0), 32);
//! assert_eq!(out.command, Some(DragCommand::Drop));
//! assert!(!sensor.is_active());
//! ```

use kurbo::Point;

use crate::command::{DragCommand, InputOutcome, Key, LiftMode, MoveTo};

/// Default distance in logical pixels a press must travel before it becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;

/// Default long-press delay for touch input, in milliseconds.
pub const DEFAULT_LONG_PRESS_MS: u64 = 150;

/// Pointer sensor configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerConfig {
    /// Distance before a press is considered a drag (default: 5.0).
    ///
    /// Must equal the threshold the command consumer promotes presses with,
    /// or `prevent_default` will start too early or too late.
    pub drag_threshold: f64,
    /// How long a touch must be held before it lifts (default: 150ms).
    pub long_press_ms: u64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
        }
    }
}

/// Kind of pointing device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or pen.
    Mouse,
    /// Touch contact.
    Touch,
}

/// Pointer button that went down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (usually left) button, or a touch contact.
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Auxiliary (usually middle) button.
    Auxiliary,
}

#[derive(Clone, Debug, PartialEq)]
enum Phase<K> {
    Idle,
    /// Mouse pressed but not yet past the threshold.
    Pressed { origin: Point },
    /// Touch held, waiting for the long-press delay.
    Holding { id: K, origin: Point, since: u64 },
    /// Past the threshold or long-press.
    Dragging,
}

/// Tracks one pointer interaction and normalizes it into [`DragCommand`]s.
#[derive(Clone, Debug)]
pub struct PointerSensor<K> {
    config: PointerConfig,
    phase: Phase<K>,
    /// Last pointer position seen while active.
    last_pos: Option<Point>,
}

impl<K> Default for PointerSensor<K> {
    fn default() -> Self {
        Self::new(PointerConfig::default())
    }
}

impl<K> PointerSensor<K> {
    /// Creates an idle sensor with the given configuration.
    #[must_use]
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            last_pos: None,
        }
    }

    /// Returns the sensor configuration.
    #[must_use]
    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    /// Returns `true` while a press, hold, or drag is being tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Returns `true` once the interaction has become a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging)
    }

    /// Last pointer position seen during the active interaction.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.last_pos
    }

    /// Forget the current interaction without emitting anything.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.last_pos = None;
    }
}

impl<K: Clone> PointerSensor<K> {
    /// Pointer went down on the draggable `id`.
    pub fn on_down(
        &mut self,
        id: K,
        kind: PointerKind,
        button: PointerButton,
        pos: Point,
        now_ms: u64,
    ) -> InputOutcome<K> {
        if self.is_active() {
            // A second contact while one is tracked; never lift twice.
            return if self.is_dragging() {
                InputOutcome::swallowed()
            } else {
                InputOutcome::ignored()
            };
        }
        if button != PointerButton::Primary {
            return InputOutcome::ignored();
        }
        self.last_pos = Some(pos);
        match kind {
            PointerKind::Mouse => {
                self.phase = Phase::Pressed { origin: pos };
                InputOutcome::emit(
                    DragCommand::Lift {
                        id,
                        mode: LiftMode::Pointer(pos),
                    },
                    false,
                )
            }
            PointerKind::Touch => {
                self.phase = Phase::Holding {
                    id,
                    origin: pos,
                    since: now_ms,
                };
                InputOutcome::ignored()
            }
        }
    }

    /// Pointer moved.
    pub fn on_move(&mut self, pos: Point, _now_ms: u64) -> InputOutcome<K> {
        match &self.phase {
            Phase::Idle => InputOutcome::ignored(),
            Phase::Pressed { origin } => {
                if (pos - *origin).hypot() >= self.config.drag_threshold {
                    self.phase = Phase::Dragging;
                }
                self.last_pos = Some(pos);
                InputOutcome::emit(DragCommand::Move(MoveTo::Pointer(pos)), self.is_dragging())
            }
            Phase::Holding { origin, .. } => {
                if (pos - *origin).hypot() >= self.config.drag_threshold {
                    // Moved before the long-press fired: this is a scroll.
                    self.reset();
                } else {
                    self.last_pos = Some(pos);
                }
                InputOutcome::ignored()
            }
            Phase::Dragging => {
                self.last_pos = Some(pos);
                InputOutcome::emit(DragCommand::Move(MoveTo::Pointer(pos)), true)
            }
        }
    }

    /// Pointer went up.
    pub fn on_up(&mut self, _pos: Point, _now_ms: u64) -> InputOutcome<K> {
        let outcome = match self.phase {
            Phase::Idle => return InputOutcome::ignored(),
            Phase::Pressed { .. } => InputOutcome::emit(DragCommand::Drop, false),
            // Released before the long-press: a tap.
            Phase::Holding { .. } => InputOutcome::ignored(),
            Phase::Dragging => InputOutcome::emit(DragCommand::Drop, true),
        };
        self.reset();
        outcome
    }

    /// Timer tick; lifts a touch once it has been held long enough.
    pub fn on_tick(&mut self, now_ms: u64) -> InputOutcome<K> {
        let Phase::Holding { id, origin, since } = &self.phase else {
            return InputOutcome::ignored();
        };
        if now_ms.saturating_sub(*since) < self.config.long_press_ms {
            return InputOutcome::ignored();
        }
        let command = DragCommand::Lift {
            id: id.clone(),
            mode: LiftMode::Touch(*origin),
        };
        self.phase = Phase::Dragging;
        InputOutcome::emit(command, true)
    }

    /// Key pressed while the pointer interaction is tracked.
    ///
    /// Escape cancels; other keys are swallowed once dragging.
    pub fn on_key(&mut self, key: Key) -> InputOutcome<K> {
        match self.phase {
            Phase::Idle => InputOutcome::ignored(),
            Phase::Holding { .. } => {
                if key == Key::Escape {
                    self.reset();
                }
                InputOutcome::ignored()
            }
            Phase::Pressed { .. } | Phase::Dragging if key == Key::Escape => {
                self.reset();
                InputOutcome::emit(DragCommand::Cancel, true)
            }
            Phase::Dragging => InputOutcome::swallowed(),
            Phase::Pressed { .. } => InputOutcome::ignored(),
        }
    }

    /// Pointer cancel, window blur, or visibility loss.
    pub fn on_cancel(&mut self) -> InputOutcome<K> {
        let outcome = match self.phase {
            Phase::Idle | Phase::Holding { .. } => InputOutcome::ignored(),
            Phase::Pressed { .. } | Phase::Dragging => {
                InputOutcome::emit(DragCommand::Cancel, false)
            }
        };
        self.reset();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse_down(sensor: &mut PointerSensor<u32>, pos: Point) -> InputOutcome<u32> {
        sensor.on_down(1, PointerKind::Mouse, PointerButton::Primary, pos, 0)
    }

    #[test]
    fn new_sensor_is_idle() {
        let sensor = PointerSensor::<u32>::default();
        assert!(!sensor.is_active());
        assert!(!sensor.is_dragging());
        assert_eq!(sensor.last_position(), None);
    }

    #[test]
    fn mouse_down_emits_pointer_lift() {
        let mut sensor = PointerSensor::default();
        let out = mouse_down(&mut sensor, Point::new(3.0, 4.0));

        assert_eq!(
            out.command,
            Some(DragCommand::Lift {
                id: 1,
                mode: LiftMode::Pointer(Point::new(3.0, 4.0)),
            })
        );
        assert!(!out.prevent_default);
        assert!(sensor.is_active());
        assert!(!sensor.is_dragging());
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut sensor = PointerSensor::<u32>::default();
        let out = sensor.on_down(
            1,
            PointerKind::Mouse,
            PointerButton::Secondary,
            Point::ZERO,
            0,
        );
        assert_eq!(out, InputOutcome::ignored());
        assert!(!sensor.is_active());
    }

    #[test]
    fn small_moves_do_not_prevent_default() {
        let mut sensor = PointerSensor::default();
        mouse_down(&mut sensor, Point::ZERO);

        let out = sensor.on_move(Point::new(2.0, 2.0), 10);
        assert_eq!(
            out.command,
            Some(DragCommand::Move(MoveTo::Pointer(Point::new(2.0, 2.0))))
        );
        assert!(!out.prevent_default);
        assert!(!sensor.is_dragging());
    }

    #[test]
    fn moving_past_threshold_starts_preventing_default() {
        let mut sensor = PointerSensor::default();
        mouse_down(&mut sensor, Point::ZERO);

        let out = sensor.on_move(Point::new(0.0, 5.0), 10);
        assert!(out.prevent_default);
        assert!(sensor.is_dragging());
        assert_eq!(sensor.last_position(), Some(Point::new(0.0, 5.0)));
    }

    #[test]
    fn release_before_threshold_is_a_drop_without_prevent_default() {
        let mut sensor = PointerSensor::default();
        mouse_down(&mut sensor, Point::ZERO);
        sensor.on_move(Point::new(1.0, 1.0), 10);

        let out = sensor.on_up(Point::new(1.0, 1.0), 20);
        assert_eq!(out.command, Some(DragCommand::Drop));
        assert!(!out.prevent_default);
        assert!(!sensor.is_active());
    }

    #[test]
    fn second_down_while_dragging_is_swallowed() {
        let mut sensor = PointerSensor::default();
        mouse_down(&mut sensor, Point::ZERO);
        sensor.on_move(Point::new(0.0, 50.0), 10);

        let out = mouse_down(&mut sensor, Point::ZERO);
        assert_eq!(out, InputOutcome::swallowed());
        assert!(sensor.is_dragging());
    }

    #[test]
    fn escape_cancels_a_pointer_drag() {
        let mut sensor = PointerSensor::default();
        mouse_down(&mut sensor, Point::ZERO);
        sensor.on_move(Point::new(0.0, 50.0), 10);

        let out = sensor.on_key(Key::Escape);
        assert_eq!(out.command, Some(DragCommand::Cancel));
        assert!(!sensor.is_active());
    }

    #[test]
    fn other_keys_are_swallowed_while_dragging() {
        let mut sensor = PointerSensor::default();
        mouse_down(&mut sensor, Point::ZERO);
        sensor.on_move(Point::new(0.0, 50.0), 10);

        assert_eq!(sensor.on_key(Key::Tab), InputOutcome::swallowed());
        assert!(sensor.is_dragging());
    }

    #[test]
    fn blur_cancels_an_active_press() {
        let mut sensor = PointerSensor::default();
        mouse_down(&mut sensor, Point::ZERO);

        let out = sensor.on_cancel();
        assert_eq!(out.command, Some(DragCommand::Cancel));
        assert!(!sensor.is_active());
        assert_eq!(sensor.on_cancel(), InputOutcome::ignored());
    }

    #[test]
    fn touch_lifts_after_long_press() {
        let mut sensor = PointerSensor::default();
        let down = sensor.on_down(
            9_u32,
            PointerKind::Touch,
            PointerButton::Primary,
            Point::new(5.0, 5.0),
            1000,
        );
        assert_eq!(down.command, None);

        // Not yet held long enough.
        assert_eq!(sensor.on_tick(1100), InputOutcome::ignored());

        let out = sensor.on_tick(1000 + DEFAULT_LONG_PRESS_MS);
        assert_eq!(
            out.command,
            Some(DragCommand::Lift {
                id: 9,
                mode: LiftMode::Touch(Point::new(5.0, 5.0)),
            })
        );
        assert!(sensor.is_dragging());

        let out = sensor.on_move(Point::new(5.0, 30.0), 1200);
        assert_eq!(
            out.command,
            Some(DragCommand::Move(MoveTo::Pointer(Point::new(5.0, 30.0))))
        );
    }

    #[test]
    fn touch_moving_before_long_press_is_a_scroll() {
        let mut sensor = PointerSensor::default();
        sensor.on_down(
            9_u32,
            PointerKind::Touch,
            PointerButton::Primary,
            Point::ZERO,
            0,
        );

        assert_eq!(
            sensor.on_move(Point::new(0.0, 40.0), 50),
            InputOutcome::ignored()
        );
        assert!(!sensor.is_active());
        assert_eq!(sensor.on_tick(500), InputOutcome::ignored());
    }

    #[test]
    fn touch_tap_emits_nothing() {
        let mut sensor = PointerSensor::default();
        sensor.on_down(
            9_u32,
            PointerKind::Touch,
            PointerButton::Primary,
            Point::ZERO,
            0,
        );
        assert_eq!(sensor.on_up(Point::ZERO, 40), InputOutcome::ignored());
        assert!(!sensor.is_active());
    }

    #[test]
    fn custom_threshold_is_respected() {
        let mut sensor = PointerSensor::new(PointerConfig {
            drag_threshold: 20.0,
            ..PointerConfig::default()
        });
        mouse_down(&mut sensor, Point::ZERO);

        sensor.on_move(Point::new(0.0, 10.0), 10);
        assert!(!sensor.is_dragging());
        sensor.on_move(Point::new(0.0, 20.0), 20);
        assert!(sensor.is_dragging());
    }

    #[test]
    fn up_without_down_is_ignored() {
        let mut sensor = PointerSensor::<u32>::default();
        assert_eq!(sensor.on_up(Point::ZERO, 0), InputOutcome::ignored());
        assert_eq!(sensor.on_move(Point::ZERO, 0), InputOutcome::ignored());
    }
}
