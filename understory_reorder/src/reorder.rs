// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder engine: target index and sibling displacement for a drag.
//!
//! Everything here is a pure function of the sibling list, freshly measured
//! boxes, and the current drag position. Nothing is remembered between calls;
//! hysteresis comes from the previous displaced set, which the caller passes
//! back in.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;
use kurbo::{Rect, Vec2};

use crate::descriptor::SiblingList;
use crate::geometry::{Axis, Overlap, Travel, crossed, is_degenerate, overlap};

/// Where a drag would land and what moves aside for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Target<K: Eq + Hash> {
    /// Index the dragged item would land at.
    pub target_index: usize,
    /// Siblings that shift to make room.
    pub displaced: HashSet<K>,
    /// Offset applied to each displaced sibling.
    pub displacement: Vec2,
}

/// A sibling list paired with its freshly measured resting boxes.
#[derive(Debug)]
pub struct SiblingLayout<'a, K> {
    /// Main axis of the list.
    pub axis: Axis,
    /// The siblings, in render order.
    pub siblings: &'a SiblingList<K>,
    /// Resting box of each sibling, in the same order. Unmeasurable siblings
    /// should be given a degenerate box.
    pub boxes: &'a [Rect],
    /// Index of the dragged item.
    pub source: usize,
}

impl<K: Clone + Eq + Hash> SiblingLayout<'_, K> {
    fn box_at(&self, index: usize) -> Rect {
        self.boxes.get(index).copied().unwrap_or(Rect::ZERO)
    }

    fn extent_at(&self, index: usize) -> f64 {
        let rect = self.box_at(index);
        if is_degenerate(rect) {
            0.0
        } else {
            self.axis.extent(rect)
        }
    }

    /// Target for a pointer drag whose dragged item currently occupies `moved`
    /// after being offset by `offset` from its resting position.
    ///
    /// `displaced` is the displaced set from the previous computation; those
    /// siblings stay crossed until the edge retreats `margin` past their center.
    /// Crossed siblings whose centers lie within `tie_tolerance` of the
    /// frontier tie.
    #[must_use]
    pub fn pointer_target(
        &self,
        moved: Rect,
        offset: Vec2,
        displaced: &HashSet<K>,
        margin: f64,
        tie_tolerance: f64,
    ) -> Target<K> {
        let travel = Travel::of(self.axis, offset);
        let range = match travel {
            Travel::Home => 0..0,
            Travel::Forward => (self.source + 1)..self.siblings.len(),
            Travel::Backward => 0..self.source.min(self.siblings.len()),
        };

        let crossed_siblings: Vec<(usize, f64)> = range
            .filter_map(|index| {
                let descriptor = self.siblings.get(index)?;
                let rect = self.box_at(index);
                let edge_margin = if displaced.contains(&descriptor.id) {
                    -margin
                } else {
                    margin
                };
                crossed(self.axis, moved, rect, travel, edge_margin)
                    .then(|| (index, self.axis.center(rect)))
            })
            .collect();

        let target_index = pick_frontier(
            self.axis,
            travel,
            moved,
            &crossed_siblings,
            tie_tolerance,
            |index| self.box_at(index),
        )
        .unwrap_or(self.source);
        self.target(target_index)
    }

    /// Target after a keyboard step of `step` slots from `current`.
    ///
    /// Returns `None` when the step would leave the list; callers treat that
    /// as a no-op.
    #[must_use]
    pub fn step_target(&self, current: usize, step: isize) -> Option<usize> {
        let next = current.checked_add_signed(step)?;
        (next < self.siblings.len()).then_some(next)
    }

    /// Displaced set and displacement for landing at `target_index`.
    #[must_use]
    pub fn target(&self, target_index: usize) -> Target<K> {
        let (range, sign) = if target_index > self.source {
            ((self.source + 1)..(target_index + 1), -1.0)
        } else if target_index < self.source {
            (target_index..self.source, 1.0)
        } else {
            (0..0, 0.0)
        };
        let displaced = range
            .filter_map(|index| self.siblings.get(index))
            .map(|d| d.id.clone())
            .collect();
        Target {
            target_index,
            displaced,
            displacement: self.axis.vector(sign * self.extent_at(self.source)),
        }
    }

    /// Offset that places the dragged item into the slot at `target_index`.
    ///
    /// Moving forward the trailing edges line up; moving backward the leading
    /// edges do. If either box is unmeasurable the extents of the siblings in
    /// between are summed instead.
    #[must_use]
    pub fn resting_offset(&self, target_index: usize) -> Vec2 {
        if target_index == self.source {
            return Vec2::ZERO;
        }
        let source_box = self.box_at(self.source);
        let target_box = self.box_at(target_index);
        let along = if !is_degenerate(source_box) && !is_degenerate(target_box) {
            if target_index > self.source {
                self.axis.end(target_box) - self.axis.end(source_box)
            } else {
                self.axis.start(target_box) - self.axis.start(source_box)
            }
        } else if target_index > self.source {
            ((self.source + 1)..=target_index)
                .map(|i| self.extent_at(i))
                .sum()
        } else {
            -(target_index..self.source)
                .map(|i| self.extent_at(i))
                .sum::<f64>()
        };
        self.axis.vector(along)
    }
}

/// Chooses among crossed siblings: the one farthest along the direction of
/// travel, with near-coincident siblings resolved by closeness to the moved
/// item's center and then by lower index.
fn pick_frontier(
    axis: Axis,
    travel: Travel,
    moved: Rect,
    crossed: &[(usize, f64)],
    tie_tolerance: f64,
    box_at: impl Fn(usize) -> Rect,
) -> Option<usize> {
    let frontier = match travel {
        Travel::Home => return None,
        Travel::Forward => crossed.iter().map(|&(_, c)| c).reduce(f64::max)?,
        Travel::Backward => crossed.iter().map(|&(_, c)| c).reduce(f64::min)?,
    };
    crossed
        .iter()
        .filter(|&&(_, center)| (center - frontier).abs() <= tie_tolerance)
        .map(|&(index, _)| {
            let distance = match overlap(axis, box_at(index), moved) {
                Overlap::Amount(amount) => amount.abs(),
                Overlap::None => f64::INFINITY,
            };
            (index, distance)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
        .map(|(index, _)| index)
}
