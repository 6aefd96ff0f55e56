// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for `understory_reorder`.
//!
//! Random command sequences are fed to a `DragEngine` over a fixed column of
//! items. Whatever the sequence, the engine must:
//! - render at most once per dispatched message,
//! - render exactly when some item's visual changed, and report those items,
//! - never list the dragged item as displaced, and keep targets in bounds,
//! - end every started drag exactly once, and end nothing it didn't start.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use proptest::prelude::*;
use understory_reorder::{
    Direction, DragCommand, DragEngine, DragHooks, DragState, DraggableDescriptor, DropResult,
    LiftMode, Message, MoveTo, ReorderConfig,
};

const ITEMS: u32 = 4;

#[derive(Default)]
struct Counts {
    starts: usize,
    ends: usize,
}

struct Counter(Rc<RefCell<Counts>>);

impl DragHooks<u32> for Counter {
    fn on_drag_start(&mut self, _descriptor: &DraggableDescriptor<u32>) {
        self.0.borrow_mut().starts += 1;
    }

    fn on_drag_end(&mut self, _result: &DropResult<u32>) {
        self.0.borrow_mut().ends += 1;
    }
}

fn measure(id: &u32) -> Option<Rect> {
    let top = f64::from(*id) * 30.0;
    (*id < ITEMS).then(|| Rect::new(0.0, top, 100.0, top + 20.0))
}

fn arb_point() -> impl Strategy<Value = Point> {
    (-20.0..120.0_f64, -40.0..160.0_f64).prop_map(|(x, y)| Point::new(x, y))
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn arb_lift_mode() -> impl Strategy<Value = LiftMode> {
    prop_oneof![
        Just(LiftMode::Keyboard),
        arb_point().prop_map(LiftMode::Pointer),
        arb_point().prop_map(LiftMode::Touch),
    ]
}

fn arb_message() -> impl Strategy<Value = Message<u32>> {
    prop_oneof![
        1 => (0..=ITEMS, arb_lift_mode())
            .prop_map(|(id, mode)| Message::Command(DragCommand::Lift { id, mode })),
        3 => arb_point().prop_map(|p| Message::Command(DragCommand::Move(MoveTo::Pointer(p)))),
        2 => arb_direction().prop_map(|d| Message::Command(DragCommand::Move(MoveTo::Step(d)))),
        1 => Just(Message::Command(DragCommand::Drop)),
        1 => Just(Message::Command(DragCommand::Cancel)),
        1 => Just(Message::DropAnimationComplete),
    ]
}

fn visible_ids(prev: &DragState<u32>, next: &DragState<u32>) -> Vec<u32> {
    (0..ITEMS)
        .filter(|id| prev.visual_for(id) != next.visual_for(id))
        .collect()
}

proptest! {
    #[test]
    fn renders_track_visual_changes(
        messages in proptest::collection::vec(arb_message(), 0..40),
        hysteresis in prop_oneof![Just(0.0), 0.0..8.0_f64],
    ) {
        let renders: Rc<RefCell<Vec<Vec<u32>>>> = Rc::default();
        let counts: Rc<RefCell<Counts>> = Rc::default();
        let sink = renders.clone();
        let renderer = move |_: &DragState<u32>, changed: &[u32]| {
            sink.borrow_mut().push(changed.to_vec());
        };
        let config = ReorderConfig::default().with_hysteresis(hysteresis);
        let mut engine = DragEngine::new(config, measure, renderer, Counter(counts.clone()));
        for id in 0..ITEMS {
            engine
                .registry_mut()
                .register(DraggableDescriptor::new(id, id as usize, 99))
                .unwrap();
        }

        for message in messages {
            let before = engine.state().clone();
            renders.borrow_mut().clear();
            engine.dispatch(message);
            let after = engine.state();

            let rendered = renders.borrow();
            prop_assert!(rendered.len() <= 1);
            let expected = visible_ids(&before, after);
            if expected.is_empty() {
                prop_assert!(rendered.is_empty());
            } else {
                prop_assert_eq!(rendered.len(), 1);
                prop_assert_eq!(&rendered[0], &expected);
            }

            if let DragState::Dragging { descriptor, target_index, displaced, .. } = after {
                prop_assert!(!displaced.contains(&descriptor.id));
                prop_assert!(*target_index < ITEMS as usize);
            }
            let counts = counts.borrow();
            prop_assert!(counts.ends <= counts.starts);
            prop_assert!(counts.starts - counts.ends <= 1);
        }

        engine.abort();
        prop_assert!(engine.state().is_idle());
        prop_assert!(!engine.registry().is_locked());
        let counts = counts.borrow();
        prop_assert_eq!(counts.starts, counts.ends);
    }
}
