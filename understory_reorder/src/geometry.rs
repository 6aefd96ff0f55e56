// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry service: measured boxes and the spatial relations between them.
//!
//! Boxes are plain [`Rect`]s in a single coordinate frame chosen by the host
//! (`x0` = left, `y0` = top, `x1` = right, `y1` = bottom). A measurement is an
//! immutable snapshot; re-measuring produces a new value. Nothing here caches:
//! layout may change between frames, so callers measure again on every move.

use kurbo::{Rect, Vec2};

/// Source of box measurements for registered draggables.
///
/// Implementations return the item's *resting* layout box, without any drag
/// offset or displacement applied. `None` means the item cannot be measured
/// right now (for example because it was unmounted).
///
/// Any `Fn(&K) -> Option<Rect>` is a `Measure<K>`.
pub trait Measure<K> {
    /// Measures the item `id` against the current layout.
    fn measure(&self, id: &K) -> Option<Rect>;
}

impl<K, F> Measure<K> for F
where
    F: Fn(&K) -> Option<Rect>,
{
    fn measure(&self, id: &K) -> Option<Rect> {
        self(id)
    }
}

/// Main axis of a list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Items stacked top to bottom.
    #[default]
    Vertical,
    /// Items laid out left to right.
    Horizontal,
}

impl Axis {
    /// Leading edge of `rect` along this axis.
    #[must_use]
    pub fn start(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.min_y(),
            Self::Horizontal => rect.min_x(),
        }
    }

    /// Trailing edge of `rect` along this axis.
    #[must_use]
    pub fn end(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.max_y(),
            Self::Horizontal => rect.max_x(),
        }
    }

    /// Center of `rect` along this axis.
    #[must_use]
    pub fn center(self, rect: Rect) -> f64 {
        (self.start(rect) + self.end(rect)) * 0.5
    }

    /// Size of `rect` along this axis.
    #[must_use]
    pub fn extent(self, rect: Rect) -> f64 {
        self.end(rect) - self.start(rect)
    }

    /// Component of `v` along this axis.
    #[must_use]
    pub fn component(self, v: Vec2) -> f64 {
        match self {
            Self::Vertical => v.y,
            Self::Horizontal => v.x,
        }
    }

    /// A vector of length `amount` along this axis.
    #[must_use]
    pub fn vector(self, amount: f64) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(0.0, amount),
            Self::Horizontal => Vec2::new(amount, 0.0),
        }
    }
}

/// Direction of travel of a dragged item relative to its home position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Travel {
    /// At home along the axis.
    Home,
    /// Towards higher indices.
    Forward,
    /// Towards lower indices.
    Backward,
}

impl Travel {
    /// Classifies an offset from home.
    #[must_use]
    pub fn of(axis: Axis, offset: Vec2) -> Self {
        let along = axis.component(offset);
        if along > 0.0 {
            Self::Forward
        } else if along < 0.0 {
            Self::Backward
        } else {
            Self::Home
        }
    }
}

/// Signed relation between two boxes along an axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Overlap {
    /// At least one box is degenerate; there is no meaningful relation.
    None,
    /// Center of the first box minus center of the second.
    Amount(f64),
}

/// Returns `true` if `rect` has no area or non-finite coordinates.
///
/// Unmounted or collapsed items measure like this.
#[must_use]
pub fn is_degenerate(rect: Rect) -> bool {
    !rect.is_finite() || rect.width() == 0.0 || rect.height() == 0.0
}

/// Signed displacement of `a`'s center relative to `b`'s center along `axis`.
///
/// Degenerate boxes yield [`Overlap::None`] so that a single collapsed item
/// can't abort a whole drag.
#[must_use]
pub fn overlap(axis: Axis, a: Rect, b: Rect) -> Overlap {
    if is_degenerate(a) || is_degenerate(b) {
        return Overlap::None;
    }
    Overlap::Amount(axis.center(a) - axis.center(b))
}

/// Direction-aware crossing test.
///
/// Travelling forward, `moved` crosses `sibling` once its trailing edge
/// reaches `margin` past the sibling's center; travelling backward, once its
/// leading edge reaches `margin` before it. A negative margin makes crossing
/// easier, which is how already-displaced siblings hold their position.
#[must_use]
pub fn crossed(axis: Axis, moved: Rect, sibling: Rect, travel: Travel, margin: f64) -> bool {
    if is_degenerate(moved) || is_degenerate(sibling) {
        return false;
    }
    let center = axis.center(sibling);
    match travel {
        Travel::Home => false,
        Travel::Forward => axis.end(moved) >= center + margin,
        Travel::Backward => axis.start(moved) <= center - margin,
    }
}
