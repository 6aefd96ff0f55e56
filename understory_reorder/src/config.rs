// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use core::time::Duration;

use understory_event_state::drag::{DEFAULT_DRAG_THRESHOLD, PointerConfig};

use crate::geometry::Axis;

/// Default tie window for coincident sibling centers (half a pixel).
pub const DEFAULT_TIE_TOLERANCE: f64 = 0.5;

/// Configuration for a [`DragEngine`](crate::DragEngine).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReorderConfig {
    /// Main axis of the list (default: vertical).
    pub axis: Axis,
    /// Pointer travel that promotes a pending press into a drag (default: 5.0).
    pub drag_threshold: f64,
    /// Extra distance past a sibling's center needed to cross it, and to
    /// un-cross it once displaced (default: 0.0).
    pub hysteresis: f64,
    /// Crossed siblings whose centers lie within this distance of the
    /// farthest one tie, and the one nearest the dragged item wins
    /// (default: 0.5).
    pub tie_tolerance: f64,
    /// Drop animation timing.
    pub drop_animation: DropAnimation,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            hysteresis: 0.0,
            tie_tolerance: DEFAULT_TIE_TOLERANCE,
            drop_animation: DropAnimation::default(),
        }
    }
}

impl ReorderConfig {
    /// Use `axis` as the list direction.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Use a custom pending → dragging threshold.
    #[must_use]
    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Use a custom crossing hysteresis margin.
    #[must_use]
    pub fn with_hysteresis(mut self, margin: f64) -> Self {
        self.hysteresis = margin;
        self
    }

    /// Use a custom tie window for coincident siblings.
    #[must_use]
    pub fn with_tie_tolerance(mut self, tolerance: f64) -> Self {
        self.tie_tolerance = tolerance;
        self
    }

    /// Use custom drop animation timing.
    #[must_use]
    pub fn with_drop_animation(mut self, drop_animation: DropAnimation) -> Self {
        self.drop_animation = drop_animation;
        self
    }

    /// Pointer sensor configuration matching this engine.
    ///
    /// Build the host's [`PointerSensor`](understory_event_state::drag::PointerSensor)
    /// from this so that the sensor starts suppressing default actions at the
    /// same distance at which the engine promotes a press into a drag.
    #[must_use]
    pub fn pointer_config(&self) -> PointerConfig {
        PointerConfig {
            drag_threshold: self.drag_threshold,
            ..PointerConfig::default()
        }
    }
}

/// Drop animation timing.
///
/// The duration grows linearly with the distance the item has to travel, from
/// `min` at zero distance to `max` at `max_distance` and beyond. Cancels are
/// scaled by `cancel_factor` so that returning home feels snappier.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DropAnimation {
    /// Shortest animation (default: 330ms).
    pub min: Duration,
    /// Longest animation (default: 550ms).
    pub max: Duration,
    /// Distance at which `max` is reached (default: 1500.0).
    pub max_distance: f64,
    /// Multiplier applied to cancel animations (default: 0.6).
    pub cancel_factor: f64,
}

impl Default for DropAnimation {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(330),
            max: Duration::from_millis(550),
            max_distance: 1500.0,
            cancel_factor: 0.6,
        }
    }
}

impl DropAnimation {
    /// Duration of an animation covering `distance`.
    #[must_use]
    pub fn duration(&self, distance: f64, cancelled: bool) -> Duration {
        let fraction = if self.max_distance > 0.0 {
            (distance.abs() / self.max_distance).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let duration = if fraction >= 1.0 {
            self.max
        } else {
            self.min + self.max.saturating_sub(self.min).mul_f64(fraction)
        };
        if cancelled {
            duration.mul_f64(self.cancel_factor.max(0.0))
        } else {
            duration
        }
    }
}
