// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consumer-facing drag lifecycle callbacks.

use crate::descriptor::DraggableDescriptor;
use crate::state::{DragUpdate, DropResult};

/// Lifecycle callbacks for the application.
///
/// Ordering, for every drag:
///
/// 1. [`on_before_drag_start`](Self::on_before_drag_start), before the first
///    render showing the lift;
/// 2. [`on_drag_start`](Self::on_drag_start), right after that render;
/// 3. [`on_drag_update`](Self::on_drag_update), after the render of each move
///    that changed the destination;
/// 4. [`on_drag_end`](Self::on_drag_end), after the render returning to idle.
///    This fires exactly once per drag, including cancelled drags and drags
///    the engine had to abort.
///
/// A pointer press released before it became a drag triggers none of these.
///
/// All methods default to doing nothing; `()` implements the trait.
pub trait DragHooks<K> {
    /// A drag is about to start.
    fn on_before_drag_start(&mut self, _descriptor: &DraggableDescriptor<K>) {}

    /// A drag started and its lift has been rendered.
    fn on_drag_start(&mut self, _descriptor: &DraggableDescriptor<K>) {}

    /// The destination of the drag changed.
    fn on_drag_update(&mut self, _update: &DragUpdate<K>) {}

    /// The drag is over.
    fn on_drag_end(&mut self, _result: &DropResult<K>) {}
}

impl<K> DragHooks<K> for () {}
