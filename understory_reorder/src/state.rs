// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag lifecycle state, per-item visuals, and drag outcomes.

use core::hash::Hash;

use hashbrown::HashSet;
use kurbo::{Point, Rect, Vec2};

use crate::descriptor::DraggableDescriptor;

/// How the active drag is being driven.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragMode {
    /// Pointer drag; offsets are measured from `origin`.
    Pointer {
        /// Pointer position at lift.
        origin: Point,
    },
    /// Keyboard drag; offsets snap to sibling slots.
    Keyboard,
}

/// Why a drag ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The user dropped the item.
    Drop,
    /// The drag was cancelled, by the user or by the engine.
    Cancel,
}

/// The authoritative state of the drag lifecycle.
///
/// Exactly one instance lives in a [`DragEngine`](crate::DragEngine). States
/// compare by value; a transition producing an equal state is a no-op.
#[derive(Clone, Debug, PartialEq)]
pub enum DragState<K: Eq + Hash> {
    /// Nothing is being dragged.
    Idle,
    /// A pointer is down on an item but hasn't moved far enough to be a drag.
    Pending {
        /// The pressed item.
        descriptor: DraggableDescriptor<K>,
        /// The item's box when pressed.
        initial_box: Rect,
        /// Pointer position when pressed.
        origin: Point,
    },
    /// An item is being dragged.
    Dragging {
        /// The dragged item, at its source index.
        descriptor: DraggableDescriptor<K>,
        /// Input modality driving the drag.
        mode: DragMode,
        /// The item's box at lift.
        initial_box: Rect,
        /// Visual offset of the dragged item from its resting position.
        current_offset: Vec2,
        /// Index the item would land at if dropped now.
        target_index: usize,
        /// Siblings shifted to make room; never contains the dragged id.
        displaced: HashSet<K>,
        /// Offset applied to every displaced sibling.
        displacement: Vec2,
    },
    /// The drag is over and the item is settling into place.
    DropAnimating {
        /// The dropped item, at its source index.
        descriptor: DraggableDescriptor<K>,
        /// Offset the item is animating to.
        final_offset: Vec2,
        /// Landing index, or `None` when returning home after a cancel.
        destination: Option<usize>,
        /// Siblings that stay shifted until the animation completes.
        displaced: HashSet<K>,
        /// Offset applied to every displaced sibling.
        displacement: Vec2,
        /// Why the drag ended.
        reason: DropReason,
    },
}

impl<K: Eq + Hash> Default for DragState<K> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<K: Eq + Hash> DragState<K> {
    /// Short state name, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending { .. } => "pending",
            Self::Dragging { .. } => "dragging",
            Self::DropAnimating { .. } => "drop-animating",
        }
    }

    /// Returns `true` in [`DragState::Idle`].
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` in [`DragState::Dragging`].
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The item involved in the current interaction, if any.
    #[must_use]
    pub fn descriptor(&self) -> Option<&DraggableDescriptor<K>> {
        match self {
            Self::Idle => None,
            Self::Pending { descriptor, .. }
            | Self::Dragging { descriptor, .. }
            | Self::DropAnimating { descriptor, .. } => Some(descriptor),
        }
    }

    /// Current target index while dragging.
    #[must_use]
    pub fn target_index(&self) -> Option<usize> {
        match self {
            Self::Dragging { target_index, .. } => Some(*target_index),
            _ => None,
        }
    }

    /// The visual description of item `id` in this state.
    ///
    /// `Pending` is deliberately indistinguishable from `Idle`.
    #[must_use]
    pub fn visual_for(&self, id: &K) -> ItemVisual {
        match self {
            Self::Idle | Self::Pending { .. } => ItemVisual::Resting,
            Self::Dragging {
                descriptor,
                current_offset,
                displaced,
                displacement,
                ..
            } => {
                if &descriptor.id == id {
                    ItemVisual::Lifted {
                        offset: *current_offset,
                    }
                } else if displaced.contains(id) {
                    ItemVisual::Shifted {
                        offset: *displacement,
                    }
                } else {
                    ItemVisual::Resting
                }
            }
            Self::DropAnimating {
                descriptor,
                final_offset,
                displaced,
                displacement,
                ..
            } => {
                if &descriptor.id == id {
                    ItemVisual::Dropping {
                        offset: *final_offset,
                    }
                } else if displaced.contains(id) {
                    ItemVisual::Shifted {
                        offset: *displacement,
                    }
                } else {
                    ItemVisual::Resting
                }
            }
        }
    }
}

/// How one item should currently be drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ItemVisual {
    /// At its layout position.
    Resting,
    /// The dragged item, following the drag.
    Lifted {
        /// Offset from the resting position.
        offset: Vec2,
    },
    /// A sibling moved aside to make room.
    Shifted {
        /// Offset from the resting position.
        offset: Vec2,
    },
    /// The dropped item, animating to its final offset.
    Dropping {
        /// Offset the animation ends at.
        offset: Vec2,
    },
}

/// A position within a droppable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DraggableLocation {
    /// Index among the droppable's draggables.
    pub index: usize,
}

/// Payload of [`DragHooks::on_drag_update`](crate::DragHooks::on_drag_update).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragUpdate<K> {
    /// The dragged item.
    pub draggable_id: K,
    /// Where the drag started.
    pub source: DraggableLocation,
    /// Where the item would land if dropped now.
    pub destination: Option<DraggableLocation>,
}

/// Terminal outcome of a drag, delivered once through
/// [`DragHooks::on_drag_end`](crate::DragHooks::on_drag_end).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropResult<K> {
    /// The dragged item.
    pub draggable_id: K,
    /// Its container.
    pub droppable_id: K,
    /// Where the drag started.
    pub source: DraggableLocation,
    /// Where the item landed; `None` if cancelled or force-terminated.
    pub destination: Option<DraggableLocation>,
    /// Why the drag ended.
    pub reason: DropReason,
}
