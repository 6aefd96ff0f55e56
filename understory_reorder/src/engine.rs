// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag state machine and its render synchronization.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --Lift(pointer)--> Pending --move past threshold--> Dragging
//!   |                       |
//!   |                       +--Drop/Cancel--> Idle            (a click; invisible)
//!   +--Lift(keyboard/touch)---------------------> Dragging
//!
//! Dragging --Move--> Dragging
//! Dragging --Drop--> DropAnimating --complete--> Idle       (or straight to Idle when
//!                                                          already resting in place)
//! Dragging --Cancel--> DropAnimating(home) --complete--> Idle
//! ```
//!
//! Every accepted transition replaces the state atomically and renders
//! exactly once if it changed how any item looks. Commands that don't apply
//! to the current state, and moves that leave the state unchanged by value,
//! are dropped without rendering.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::time::Duration;

use hashbrown::HashSet;
use kurbo::{Point, Rect, Vec2};
use tracing::{debug, trace, warn};
use understory_event_state::{Direction, DragCommand, LiftMode, MoveTo};

use crate::config::ReorderConfig;
use crate::descriptor::{DraggableDescriptor, Registry, SiblingList};
use crate::geometry::{Axis, Measure};
use crate::hooks::DragHooks;
use crate::render::{Renderer, changed_items};
use crate::reorder::SiblingLayout;
use crate::state::{DragMode, DragState, DragUpdate, DraggableLocation, DropReason, DropResult};

/// A unit of work for the engine's transition handler.
#[derive(Clone, Debug, PartialEq)]
pub enum Message<K> {
    /// A normalized input command.
    Command(DragCommand<K>),
    /// The host's drop animation finished.
    DropAnimationComplete,
}

impl<K> From<DragCommand<K>> for Message<K> {
    fn from(command: DragCommand<K>) -> Self {
        Self::Command(command)
    }
}

impl<K> Message<K> {
    fn is_move(&self) -> bool {
        matches!(self, Self::Command(command) if command.is_move())
    }

    fn is_cancel(&self) -> bool {
        matches!(self, Self::Command(command) if command.is_cancel())
    }
}

/// Drag-and-drop engine for reorderable lists.
///
/// Owns the [`DragState`], the [`Registry`] of draggables, and a queue of
/// [`Message`]s. Measurements come from `M`, renders go to `R`, and lifecycle
/// callbacks go to `H`.
///
/// ```
/// use kurbo::Rect;
/// use understory_event_state::{DragCommand, LiftMode};
/// use understory_reorder::{DragEngine, DragState, DraggableDescriptor, ReorderConfig};
///
/// let measure = |id: &u32| Some(Rect::new(0.0, f64::from(*id) * 20.0, 100.0, f64::from(*id + 1) * 20.0));
/// let mut renders = 0;
/// let renderer = |_: &DragState<u32>, _: &[u32]| renders += 1;
///
/// let mut engine = DragEngine::new(ReorderConfig::default(), measure, renderer, ());
/// engine.registry_mut().register(DraggableDescriptor::new(0, 0, 100)).unwrap();
/// engine.registry_mut().register(DraggableDescriptor::new(1, 1, 100)).unwrap();
///
/// engine.command(DragCommand::Lift { id: 0, mode: LiftMode::Keyboard });
/// assert!(engine.state().is_dragging());
/// ```
pub struct DragEngine<K: Eq + Hash, M, R, H = ()> {
    config: ReorderConfig,
    registry: Registry<K>,
    state: DragState<K>,
    /// Siblings of the active drag, frozen at lift.
    siblings: SiblingList<K>,
    queue: VecDeque<Message<K>>,
    drop_duration: Option<Duration>,
    measure: M,
    renderer: R,
    hooks: H,
}

impl<K: Eq + Hash + fmt::Debug, M, R, H> fmt::Debug for DragEngine<K, M, R, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl<K, M, R, H> DragEngine<K, M, R, H>
where
    K: Clone + Eq + Hash + fmt::Debug,
    M: Measure<K>,
    R: Renderer<K>,
    H: DragHooks<K>,
{
    /// Creates an idle engine with an empty registry.
    pub fn new(config: ReorderConfig, measure: M, renderer: R, hooks: H) -> Self {
        Self {
            config,
            registry: Registry::new(),
            state: DragState::Idle,
            siblings: SiblingList::default(),
            queue: VecDeque::new(),
            drop_duration: None,
            measure,
            renderer,
            hooks,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Returns the current state.
    pub fn state(&self) -> &DragState<K> {
        &self.state
    }

    /// Returns the registry of draggables.
    pub fn registry(&self) -> &Registry<K> {
        &self.registry
    }

    /// Returns the registry for registration changes.
    ///
    /// Mutations fail with
    /// [`RegistryError::DragInProgress`](crate::RegistryError::DragInProgress)
    /// until the current drag resolves.
    pub fn registry_mut(&mut self) -> &mut Registry<K> {
        &mut self.registry
    }

    /// Siblings of the active drag, or an empty list while idle.
    pub fn siblings(&self) -> &SiblingList<K> {
        &self.siblings
    }

    /// Returns the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the renderer mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Returns the hooks.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Returns the hooks mutably.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Returns `true` while a keyboard-driven drag is in progress.
    ///
    /// Hosts feed this back to their
    /// [`KeyboardSensor`](understory_event_state::keyboard::KeyboardSensor)
    /// after each dispatch, so a lift the engine ignored never turns the next
    /// lift-key press into a drop of someone else's drag.
    pub fn is_keyboard_drag(&self) -> bool {
        matches!(
            self.state,
            DragState::Dragging {
                mode: DragMode::Keyboard,
                ..
            }
        )
    }

    /// Suggested duration of the running drop animation.
    pub fn drop_duration(&self) -> Option<Duration> {
        match self.state {
            DragState::DropAnimating { .. } => self.drop_duration,
            _ => None,
        }
    }

    /// Queues a message without processing it.
    pub fn enqueue(&mut self, message: impl Into<Message<K>>) {
        self.queue.push_back(message.into());
    }

    /// Processes every queued message in arrival order.
    ///
    /// A cancel wins over the moves of the drag it cancels: moves queued
    /// between the latest lift, drop or animation completion and a later
    /// cancel in the same batch are discarded, so cleanup never commits a
    /// spurious reorder. Moves of earlier interactions in the batch still run.
    pub fn process(&mut self) {
        while !self.queue.is_empty() {
            let batch: Vec<Message<K>> = self.queue.drain(..).collect();
            let superseded = superseded_moves(&batch);
            for (message, skip) in batch.into_iter().zip(superseded) {
                if skip {
                    trace!("move superseded by a queued cancel");
                    continue;
                }
                self.handle(message);
            }
        }
    }

    /// Queues `message` and processes the queue.
    pub fn dispatch(&mut self, message: impl Into<Message<K>>) {
        self.enqueue(message);
        self.process();
    }

    /// Dispatches an input command.
    pub fn command(&mut self, command: DragCommand<K>) {
        self.dispatch(Message::Command(command));
    }

    /// Dispatches the end of the drop animation.
    pub fn complete_drop_animation(&mut self) {
        self.dispatch(Message::DropAnimationComplete);
    }

    /// Resolves any in-flight interaction immediately, for example when the
    /// list unmounts.
    ///
    /// Queued messages are discarded. A pending press is forgotten silently;
    /// a drag or drop animation jumps straight to idle, still rendering once
    /// and still ending with exactly one `on_drag_end`.
    pub fn abort(&mut self) {
        self.queue.clear();
        match self.state.clone() {
            DragState::Idle => {}
            DragState::Pending { .. } => self.reset_silently(),
            DragState::Dragging { descriptor, .. } => {
                self.finish(descriptor, None, DropReason::Cancel);
            }
            DragState::DropAnimating {
                descriptor,
                destination,
                reason,
                ..
            } => self.finish(descriptor, destination, reason),
        }
    }

    /// The single transition handler.
    fn handle(&mut self, message: Message<K>) {
        match message {
            Message::Command(DragCommand::Lift { id, mode }) => self.on_lift(id, mode),
            Message::Command(DragCommand::Move(MoveTo::Pointer(point))) => {
                self.on_pointer_move(point);
            }
            Message::Command(DragCommand::Move(MoveTo::Step(direction))) => {
                self.on_step(direction);
            }
            Message::Command(DragCommand::Drop) => self.on_drop(),
            Message::Command(DragCommand::Cancel) => self.on_cancel(),
            Message::DropAnimationComplete => self.on_animation_complete(),
        }
    }

    fn ignore(&self, command: &'static str) {
        trace!(command, state = self.state.name(), "command ignored");
    }

    fn on_lift(&mut self, id: K, mode: LiftMode) {
        if !self.state.is_idle() {
            self.ignore("lift");
            return;
        }
        let Some(descriptor) = self.registry.get(&id).cloned() else {
            warn!(?id, "lift ignored: draggable is not registered");
            return;
        };
        let Some(initial_box) = self.measure.measure(&id) else {
            warn!(?id, "lift ignored: draggable can't be measured");
            return;
        };
        let siblings = self.registry.siblings(&descriptor.droppable);
        let Some(index) = siblings.position(&id) else {
            return;
        };
        let descriptor = DraggableDescriptor { index, ..descriptor };
        self.siblings = siblings;
        self.registry.set_locked(true);

        match mode {
            LiftMode::Pointer(origin) => {
                debug!(?id, index, "pending");
                self.state = DragState::Pending {
                    descriptor,
                    initial_box,
                    origin,
                };
            }
            LiftMode::Keyboard => {
                let next = DragState::Dragging {
                    descriptor: descriptor.clone(),
                    mode: DragMode::Keyboard,
                    initial_box,
                    current_offset: Vec2::ZERO,
                    target_index: index,
                    displaced: HashSet::new(),
                    displacement: Vec2::ZERO,
                };
                self.start_drag(&descriptor, next);
            }
            LiftMode::Touch(origin) => {
                let next = DragState::Dragging {
                    descriptor: descriptor.clone(),
                    mode: DragMode::Pointer { origin },
                    initial_box,
                    current_offset: Vec2::ZERO,
                    target_index: index,
                    displaced: HashSet::new(),
                    displacement: Vec2::ZERO,
                };
                self.start_drag(&descriptor, next);
            }
        }
    }

    fn start_drag(&mut self, descriptor: &DraggableDescriptor<K>, next: DragState<K>) {
        let target_index = next.target_index();
        self.hooks.on_before_drag_start(descriptor);
        self.commit(next);
        self.hooks.on_drag_start(descriptor);
        // A pointer can promote already past a sibling.
        if let Some(target_index) = target_index.filter(|&t| t != descriptor.index) {
            self.notify_update(descriptor, target_index);
        }
    }

    fn on_pointer_move(&mut self, point: Point) {
        match self.state.clone() {
            DragState::Pending {
                descriptor,
                origin,
                ..
            } => {
                if (point - origin).hypot() < self.config.drag_threshold {
                    self.ignore("move below threshold");
                    return;
                }
                match self.pointer_dragging(&descriptor, origin, point, &HashSet::new()) {
                    Some(next) => self.start_drag(&descriptor, next),
                    None => {
                        warn!(id = ?descriptor.id, "pending press dropped: draggable can't be measured");
                        self.reset_silently();
                    }
                }
            }
            DragState::Dragging {
                descriptor,
                mode: DragMode::Pointer { origin },
                target_index,
                displaced,
                ..
            } => match self.pointer_dragging(&descriptor, origin, point, &displaced) {
                Some(next) => self.commit_move(target_index, next),
                None => self.force_cancel(descriptor),
            },
            _ => self.ignore("pointer move"),
        }
    }

    /// Measures fresh and builds the dragging state for a pointer at `point`.
    fn pointer_dragging(
        &self,
        descriptor: &DraggableDescriptor<K>,
        origin: Point,
        point: Point,
        displaced: &HashSet<K>,
    ) -> Option<DragState<K>> {
        let resting = self.measure.measure(&descriptor.id)?;
        let boxes = self.measure_siblings();
        let layout = SiblingLayout {
            axis: self.config.axis,
            siblings: &self.siblings,
            boxes: &boxes,
            source: descriptor.index,
        };
        let offset = point - origin;
        let target = layout.pointer_target(
            resting + offset,
            offset,
            displaced,
            self.config.hysteresis,
            self.config.tie_tolerance,
        );
        Some(DragState::Dragging {
            descriptor: descriptor.clone(),
            mode: DragMode::Pointer { origin },
            initial_box: resting,
            current_offset: offset,
            target_index: target.target_index,
            displaced: target.displaced,
            displacement: target.displacement,
        })
    }

    fn on_step(&mut self, direction: Direction) {
        let DragState::Dragging {
            descriptor,
            mode: DragMode::Keyboard,
            initial_box,
            target_index,
            ..
        } = self.state.clone()
        else {
            self.ignore("step");
            return;
        };
        let Some(step) = step_along(self.config.axis, direction) else {
            self.ignore("cross-axis step");
            return;
        };
        if self.measure.measure(&descriptor.id).is_none() {
            self.force_cancel(descriptor);
            return;
        }
        let boxes = self.measure_siblings();
        let layout = SiblingLayout {
            axis: self.config.axis,
            siblings: &self.siblings,
            boxes: &boxes,
            source: descriptor.index,
        };
        let Some(next_index) = layout.step_target(target_index, step) else {
            trace!(target_index, step, "step past the end of the list");
            return;
        };
        let target = layout.target(next_index);
        let current_offset = layout.resting_offset(next_index);
        let next = DragState::Dragging {
            descriptor,
            mode: DragMode::Keyboard,
            initial_box,
            current_offset,
            target_index: target.target_index,
            displaced: target.displaced,
            displacement: target.displacement,
        };
        self.commit_move(target_index, next);
    }

    fn on_drop(&mut self) {
        match self.state.clone() {
            DragState::Pending { descriptor, .. } => {
                debug!(id = ?descriptor.id, "released before threshold; treated as a click");
                self.reset_silently();
            }
            DragState::Dragging {
                descriptor,
                current_offset,
                target_index,
                displaced,
                displacement,
                ..
            } => {
                if self.measure.measure(&descriptor.id).is_none() {
                    self.force_cancel(descriptor);
                    return;
                }
                let boxes = self.measure_siblings();
                let layout = SiblingLayout {
                    axis: self.config.axis,
                    siblings: &self.siblings,
                    boxes: &boxes,
                    source: descriptor.index,
                };
                let final_offset = layout.resting_offset(target_index);
                if final_offset == current_offset {
                    // Already resting in its slot; nothing to animate.
                    self.finish(descriptor, Some(target_index), DropReason::Drop);
                    return;
                }
                let distance = (final_offset - current_offset).hypot();
                self.drop_duration = Some(self.config.drop_animation.duration(distance, false));
                self.commit(DragState::DropAnimating {
                    descriptor,
                    final_offset,
                    destination: Some(target_index),
                    displaced,
                    displacement,
                    reason: DropReason::Drop,
                });
            }
            _ => self.ignore("drop"),
        }
    }

    fn on_cancel(&mut self) {
        match self.state.clone() {
            DragState::Pending { .. } => self.reset_silently(),
            DragState::Dragging {
                descriptor,
                current_offset,
                ..
            } => {
                let distance = current_offset.hypot();
                self.drop_duration = Some(self.config.drop_animation.duration(distance, true));
                self.commit(DragState::DropAnimating {
                    descriptor,
                    final_offset: Vec2::ZERO,
                    destination: None,
                    displaced: HashSet::new(),
                    displacement: Vec2::ZERO,
                    reason: DropReason::Cancel,
                });
            }
            _ => self.ignore("cancel"),
        }
    }

    fn on_animation_complete(&mut self) {
        let DragState::DropAnimating {
            descriptor,
            destination,
            reason,
            ..
        } = self.state.clone()
        else {
            self.ignore("drop animation complete");
            return;
        };
        self.finish(descriptor, destination, reason);
    }

    /// The dragged item vanished mid-drag: end the drag without a destination.
    fn force_cancel(&mut self, descriptor: DraggableDescriptor<K>) {
        warn!(id = ?descriptor.id, "dragged item can't be measured; cancelling drag");
        self.finish(descriptor, None, DropReason::Cancel);
    }

    /// Returns to idle, renders once, releases the registry and reports the result.
    fn finish(
        &mut self,
        descriptor: DraggableDescriptor<K>,
        destination: Option<usize>,
        reason: DropReason,
    ) {
        self.commit(DragState::Idle);
        self.release();
        let result = DropResult {
            draggable_id: descriptor.id,
            droppable_id: descriptor.droppable,
            source: DraggableLocation {
                index: descriptor.index,
            },
            destination: destination.map(|index| DraggableLocation { index }),
            reason,
        };
        debug!(?result, "drag ended");
        self.hooks.on_drag_end(&result);
    }

    /// Leaves a pending press without any renderer-visible change.
    fn reset_silently(&mut self) {
        self.state = DragState::Idle;
        self.release();
    }

    fn release(&mut self) {
        self.registry.set_locked(false);
        self.siblings = SiblingList::default();
        self.drop_duration = None;
    }

    fn measure_siblings(&self) -> Vec<Rect> {
        self.siblings
            .iter()
            .map(|d| self.measure.measure(&d.id).unwrap_or(Rect::ZERO))
            .collect()
    }

    /// Replaces the state and renders once if any item's visual changed.
    ///
    /// A state that differs only in bookkeeping, such as a re-measured
    /// `initial_box`, is stored without rendering. Returns whether it rendered.
    fn commit(&mut self, next: DragState<K>) -> bool {
        if next == self.state {
            return false;
        }
        let changed = changed_items(&self.state, &next, &self.siblings);
        debug!(
            from = self.state.name(),
            to = next.name(),
            target_index = ?next.target_index(),
            changed = changed.len(),
            "transition"
        );
        self.state = next;
        if changed.is_empty() {
            return false;
        }
        self.renderer.render(&self.state, &changed);
        true
    }

    fn commit_move(&mut self, previous_target: usize, next: DragState<K>) {
        let Some(target_index) = next.target_index() else {
            return;
        };
        if !self.commit(next) || target_index == previous_target {
            return;
        }
        if let Some(descriptor) = self.state.descriptor().cloned() {
            self.notify_update(&descriptor, target_index);
        }
    }

    fn notify_update(&mut self, descriptor: &DraggableDescriptor<K>, target_index: usize) {
        let update = DragUpdate {
            draggable_id: descriptor.id.clone(),
            source: DraggableLocation {
                index: descriptor.index,
            },
            destination: Some(DraggableLocation {
                index: target_index,
            }),
        };
        trace!(?update, "drag update");
        self.hooks.on_drag_update(&update);
    }
}

/// Marks the moves in `batch` that a later cancel overrides.
///
/// A cancel only reaches back to the latest lifecycle message before it.
fn superseded_moves<K>(batch: &[Message<K>]) -> Vec<bool> {
    let mut superseded = vec![false; batch.len()];
    let mut cancel_ahead = false;
    for (index, message) in batch.iter().enumerate().rev() {
        if message.is_cancel() {
            cancel_ahead = true;
        } else if message.is_move() {
            superseded[index] = cancel_ahead;
        } else {
            cancel_ahead = false;
        }
    }
    superseded
}

/// Slot delta of an arrow step along `axis`; `None` for cross-axis arrows.
fn step_along(axis: Axis, direction: Direction) -> Option<isize> {
    match (axis, direction) {
        (Axis::Vertical, Direction::Down) | (Axis::Horizontal, Direction::Right) => Some(1),
        (Axis::Vertical, Direction::Up) | (Axis::Horizontal, Direction::Left) => Some(-1),
        _ => None,
    }
}
