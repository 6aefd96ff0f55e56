// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_event_state` sensors.
//!
//! These feed whole raw-event sequences through the pointer and keyboard
//! sensors and check the resulting command stream, one command at most per
//! raw event.

use kurbo::Point;
use understory_event_state::drag::{PointerButton, PointerConfig, PointerKind, PointerSensor};
use understory_event_state::keyboard::KeyboardSensor;
use understory_event_state::{Direction, DragCommand, InputOutcome, Key, LiftMode, MoveTo};

fn commands(outcomes: impl IntoIterator<Item = InputOutcome<u32>>) -> Vec<DragCommand<u32>> {
    outcomes.into_iter().filter_map(|o| o.command).collect()
}

#[test]
fn mouse_drag_stream() {
    let mut sensor = PointerSensor::default();
    let outcomes = [
        sensor.on_down(7, PointerKind::Mouse, PointerButton::Primary, Point::new(10.0, 10.0), 0),
        sensor.on_move(Point::new(11.0, 10.0), 5),
        sensor.on_move(Point::new(10.0, 30.0), 10),
        sensor.on_up(Point::new(10.0, 30.0), 15),
    ];
    assert_eq!(
        outcomes.iter().map(|o| o.prevent_default).collect::<Vec<_>>(),
        [false, false, true, true]
    );
    assert_eq!(
        commands(outcomes),
        [
            DragCommand::Lift {
                id: 7,
                mode: LiftMode::Pointer(Point::new(10.0, 10.0)),
            },
            DragCommand::Move(MoveTo::Pointer(Point::new(11.0, 10.0))),
            DragCommand::Move(MoveTo::Pointer(Point::new(10.0, 30.0))),
            DragCommand::Drop,
        ]
    );
    assert!(!sensor.is_active());
}

#[test]
fn secondary_button_never_lifts() {
    let mut sensor = PointerSensor::<u32>::default();
    let down = sensor.on_down(7, PointerKind::Mouse, PointerButton::Secondary, Point::ZERO, 0);
    let up = sensor.on_up(Point::ZERO, 1);
    assert!(commands([down, up]).is_empty());
}

#[test]
fn touch_long_press_then_drag() {
    let mut sensor = PointerSensor::new(PointerConfig {
        long_press_ms: 200,
        ..PointerConfig::default()
    });
    let outcomes = [
        sensor.on_down(3, PointerKind::Touch, PointerButton::Primary, Point::new(5.0, 5.0), 1000),
        sensor.on_tick(1100),
        sensor.on_tick(1200),
        sensor.on_move(Point::new(5.0, 60.0), 1250),
        sensor.on_up(Point::new(5.0, 60.0), 1300),
    ];
    assert_eq!(
        commands(outcomes),
        [
            DragCommand::Lift {
                id: 3,
                mode: LiftMode::Touch(Point::new(5.0, 5.0)),
            },
            DragCommand::Move(MoveTo::Pointer(Point::new(5.0, 60.0))),
            DragCommand::Drop,
        ]
    );
}

#[test]
fn touch_scroll_is_not_a_drag() {
    let mut sensor = PointerSensor::default();
    let outcomes = [
        sensor.on_down(3, PointerKind::Touch, PointerButton::Primary, Point::ZERO, 0),
        sensor.on_move(Point::new(0.0, 40.0), 50),
        sensor.on_tick(500),
        sensor.on_up(Point::new(0.0, 40.0), 600),
    ];
    assert!(outcomes.iter().all(|o| !o.prevent_default));
    assert!(commands(outcomes).is_empty());
}

#[test]
fn blur_cancels_an_active_pointer_drag() {
    let mut sensor = PointerSensor::default();
    sensor.on_down(1_u32, PointerKind::Mouse, PointerButton::Primary, Point::ZERO, 0);
    sensor.on_move(Point::new(0.0, 20.0), 1);
    assert_eq!(sensor.on_cancel().command, Some(DragCommand::Cancel));
    assert_eq!(sensor.on_up(Point::ZERO, 2).command, None);
}

#[test]
fn keyboard_reorder_stream() {
    let mut sensor = KeyboardSensor::default();
    let focused = Some(&9_u32);
    let outcomes = [
        sensor.on_key_down(focused, Key::ArrowDown),
        sensor.on_key_down(focused, Key::Space),
        sensor.on_key_down(focused, Key::ArrowDown),
        sensor.on_key_down(focused, Key::Tab),
        sensor.on_key_down(focused, Key::ArrowUp),
        sensor.on_key_down(focused, Key::Escape),
    ];
    // The first arrow is ordinary navigation and is left alone.
    assert!(!outcomes[0].prevent_default);
    // Tab mid-drag is swallowed without a command.
    assert!(outcomes[3].prevent_default && outcomes[3].command.is_none());
    assert_eq!(
        commands(outcomes),
        [
            DragCommand::Lift {
                id: 9,
                mode: LiftMode::Keyboard,
            },
            DragCommand::Move(MoveTo::Step(Direction::Down)),
            DragCommand::Move(MoveTo::Step(Direction::Up)),
            DragCommand::Cancel,
        ]
    );
    assert!(!sensor.is_dragging());
}

#[test]
fn keyboard_without_focus_does_nothing() {
    let mut sensor = KeyboardSensor::default();
    let outcome = sensor.on_key_down::<u32>(None, Key::Space);
    assert_eq!(outcome, InputOutcome::ignored());
    assert!(!sensor.is_dragging());
}
