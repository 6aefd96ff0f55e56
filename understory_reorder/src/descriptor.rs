// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable descriptors, sibling lists, and the registry that owns them.

use alloc::vec::Vec;
use core::fmt;

use crate::state::DropResult;

/// Identifies one draggable's current position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DraggableDescriptor<K> {
    /// Application id of the draggable.
    pub id: K,
    /// Position among its siblings.
    pub index: usize,
    /// Id of the droppable container the draggable lives in.
    pub droppable: K,
}

impl<K> DraggableDescriptor<K> {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(id: K, index: usize, droppable: K) -> Self {
        Self {
            id,
            index,
            droppable,
        }
    }
}

/// The ordered draggables of one container.
///
/// List order is render order, and each descriptor's `index` equals its
/// position in the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiblingList<K> {
    items: Vec<DraggableDescriptor<K>>,
}

impl<K> Default for SiblingList<K> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<K: Clone + Eq> SiblingList<K> {
    /// Builds a list ordered by the descriptors' `index`, renumbering them to
    /// contiguous positions. Descriptors with equal indices keep their input order.
    #[must_use]
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = DraggableDescriptor<K>>) -> Self {
        let mut items: Vec<_> = descriptors.into_iter().collect();
        items.sort_by_key(|d| d.index);
        for (position, item) in items.iter_mut().enumerate() {
            item.index = position;
        }
        Self { items }
    }

    /// Number of siblings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no siblings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Descriptor at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DraggableDescriptor<K>> {
        self.items.get(index)
    }

    /// Position of the draggable `id`.
    #[must_use]
    pub fn position(&self, id: &K) -> Option<usize> {
        self.items.iter().position(|d| &d.id == id)
    }

    /// Descriptors in render order.
    pub fn iter(&self) -> impl Iterator<Item = &DraggableDescriptor<K>> {
        self.items.iter()
    }

    /// Ids in render order.
    pub fn ids(&self) -> impl Iterator<Item = &K> {
        self.items.iter().map(|d| &d.id)
    }

    /// Returns the list with the item at `source` moved to `destination`.
    ///
    /// Out-of-range positions leave the order unchanged.
    #[must_use]
    pub fn reordered(&self, source: usize, destination: usize) -> Self {
        let mut items = self.items.clone();
        if source < items.len() && destination < items.len() {
            let moved = items.remove(source);
            items.insert(destination, moved);
        }
        for (position, item) in items.iter_mut().enumerate() {
            item.index = position;
        }
        Self { items }
    }
}

/// Error returned by [`Registry`] mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError<K> {
    /// Descriptors are frozen while a drag is in flight.
    DragInProgress,
    /// A draggable with this id is already registered.
    DuplicateId(K),
    /// No draggable with this id is registered.
    UnknownId(K),
}

impl<K: fmt::Debug> fmt::Display for RegistryError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DragInProgress => write!(f, "draggables can't change while a drag is in progress"),
            Self::DuplicateId(id) => write!(f, "draggable {id:?} is already registered"),
            Self::UnknownId(id) => write!(f, "draggable {id:?} is not registered"),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for RegistryError<K> {}

/// Registered draggables across all containers.
///
/// The registry is frozen by the engine from lift until the drag resolves so
/// the sibling list can't be torn mid-drag.
#[derive(Clone, Debug)]
pub struct Registry<K> {
    entries: Vec<DraggableDescriptor<K>>,
    locked: bool,
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            locked: false,
        }
    }
}

impl<K: Clone + Eq> Registry<K> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered draggables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` while a drag holds the registry.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Registers a draggable.
    pub fn register(&mut self, descriptor: DraggableDescriptor<K>) -> Result<(), RegistryError<K>> {
        if self.locked {
            return Err(RegistryError::DragInProgress);
        }
        if self.get(&descriptor.id).is_some() {
            return Err(RegistryError::DuplicateId(descriptor.id));
        }
        self.entries.push(descriptor);
        Ok(())
    }

    /// Removes a draggable, returning its descriptor.
    pub fn unregister(&mut self, id: &K) -> Result<DraggableDescriptor<K>, RegistryError<K>> {
        if self.locked {
            return Err(RegistryError::DragInProgress);
        }
        let position = self
            .entries
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| RegistryError::UnknownId(id.clone()))?;
        Ok(self.entries.remove(position))
    }

    /// Descriptor of the draggable `id`.
    #[must_use]
    pub fn get(&self, id: &K) -> Option<&DraggableDescriptor<K>> {
        self.entries.iter().find(|d| &d.id == id)
    }

    /// The draggables of `droppable`, in index order.
    #[must_use]
    pub fn siblings(&self, droppable: &K) -> SiblingList<K> {
        SiblingList::from_descriptors(
            self.entries
                .iter()
                .filter(|d| &d.droppable == droppable)
                .cloned(),
        )
    }

    /// Renumbers the dropped container to reflect a completed reorder.
    ///
    /// Results without a destination leave the registry untouched.
    pub fn apply_drop(&mut self, result: &DropResult<K>) -> Result<(), RegistryError<K>> {
        if self.locked {
            return Err(RegistryError::DragInProgress);
        }
        let Some(destination) = result.destination else {
            return Ok(());
        };
        let siblings = self.siblings(&result.droppable_id);
        if siblings.position(&result.draggable_id).is_none() {
            return Err(RegistryError::UnknownId(result.draggable_id.clone()));
        }
        let reordered = siblings.reordered(result.source.index, destination.index);
        for descriptor in reordered.iter() {
            if let Some(entry) = self.entries.iter_mut().find(|d| d.id == descriptor.id) {
                entry.index = descriptor.index;
            }
        }
        Ok(())
    }
}
