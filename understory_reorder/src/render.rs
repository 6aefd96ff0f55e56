// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer contract.

use core::hash::Hash;

use smallvec::SmallVec;

use crate::descriptor::SiblingList;
use crate::state::DragState;

/// The external rendering layer.
///
/// The engine calls [`Renderer::render`] exactly once per accepted,
/// renderer-visible transition and never for ignored commands. Renders are
/// fire-and-forget: the engine does not wait for them, and the renderer must
/// apply them in the order they arrive.
///
/// Any `FnMut(&DragState<K>, &[K])` is a `Renderer<K>`.
pub trait Renderer<K: Eq + Hash> {
    /// Draw `state`.
    ///
    /// `changed` lists the items whose [`ItemVisual`](crate::ItemVisual)
    /// differs from the previous render; everything else may be skipped.
    fn render(&mut self, state: &DragState<K>, changed: &[K]);
}

impl<K, F> Renderer<K> for F
where
    K: Eq + Hash,
    F: FnMut(&DragState<K>, &[K]),
{
    fn render(&mut self, state: &DragState<K>, changed: &[K]) {
        self(state, changed);
    }
}

/// Ids among `siblings` whose visual differs between `prev` and `next`, in
/// render order.
pub(crate) fn changed_items<K: Clone + Eq + Hash>(
    prev: &DragState<K>,
    next: &DragState<K>,
    siblings: &SiblingList<K>,
) -> SmallVec<[K; 4]> {
    siblings
        .ids()
        .filter(|id| prev.visual_for(id) != next.visual_for(id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DraggableDescriptor;
    use crate::state::DragMode;
    use hashbrown::HashSet;
    use kurbo::{Rect, Vec2};

    #[test]
    fn lift_changes_only_the_dragged_item() {
        let siblings = SiblingList::from_descriptors([
            DraggableDescriptor::new(1_u32, 0, 0),
            DraggableDescriptor::new(2_u32, 1, 0),
        ]);
        let lifted = DragState::Dragging {
            descriptor: DraggableDescriptor::new(1, 0, 0),
            mode: DragMode::Keyboard,
            initial_box: Rect::new(0.0, 0.0, 10.0, 10.0),
            current_offset: Vec2::ZERO,
            target_index: 0,
            displaced: HashSet::new(),
            displacement: Vec2::ZERO,
        };
        let changed = changed_items(&DragState::Idle, &lifted, &siblings);
        assert_eq!(changed.as_slice(), &[1]);
        assert!(changed_items(&lifted, &lifted, &siblings).is_empty());
    }

    #[test]
    fn closures_are_renderers() {
        let mut calls = 0;
        let mut renderer = |_: &DragState<u32>, changed: &[u32]| calls += changed.len();
        renderer.render(&DragState::Idle, &[1, 2]);
        assert_eq!(calls, 2);
    }
}
