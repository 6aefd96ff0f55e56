// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reorder --heading-base-level=0

//! Understory Reorder: a drag-and-drop engine for reorderable lists.
//!
//! The engine owns one authoritative [`DragState`] and advances it from a
//! queue of normalized input commands (see `understory_event_state`). Each
//! accepted transition replaces the state in one step and triggers exactly
//! one render; the renderer is told which items' visuals changed so it never
//! sees a half-updated drag.
//!
//! - [`DragEngine`]: the state machine, message queue, and render trigger.
//! - [`Registry`]: the draggables per container, frozen while a drag is in flight.
//! - [`SiblingLayout`]: target-index computation for pointer and keyboard moves.
//! - [`Renderer`], [`Measure`], [`DragHooks`]: the seams to the host.
//!
//! Geometry is expressed with [`kurbo`] types. [`Measure`] returns each item's
//! *resting* box, i.e. its layout position without any drag offset applied.
//!
//! ## Keyboard reorder
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_event_state::{Direction, DragCommand, LiftMode, MoveTo};
//! use understory_reorder::{
//!     DragEngine, DragHooks, DragState, DraggableDescriptor, DropResult, ReorderConfig,
//! };
//!
//! #[derive(Default)]
//! struct Outcome(Option<DropResult<&'static str>>);
//!
//! impl DragHooks<&'static str> for Outcome {
//!     fn on_drag_end(&mut self, result: &DropResult<&'static str>) {
//!         self.0 = Some(result.clone());
//!     }
//! }
//!
//! let measure = |id: &&str| match *id {
//!     "first" => Some(Rect::new(0.0, 0.0, 100.0, 20.0)),
//!     "second" => Some(Rect::new(0.0, 30.0, 100.0, 50.0)),
//!     _ => None,
//! };
//! let renderer = |_: &DragState<&str>, _: &[&str]| {};
//!
//! let mut engine = DragEngine::new(ReorderConfig::default(), measure, renderer, Outcome::default());
//! engine.registry_mut().register(DraggableDescriptor::new("first", 0, "list")).unwrap();
//! engine.registry_mut().register(DraggableDescriptor::new("second", 1, "list")).unwrap();
//!
//! engine.command(DragCommand::Lift { id: "first", mode: LiftMode::Keyboard });
//! engine.command(DragCommand::Move(MoveTo::Step(Direction::Down)));
//! assert_eq!(engine.state().target_index(), Some(1));
//!
//! // The keyboard already moved the item into its slot, so the drop settles at once.
//! engine.command(DragCommand::Drop);
//! assert!(engine.state().is_idle());
//!
//! let result = engine.hooks_mut().0.take().unwrap();
//! engine.registry_mut().apply_drop(&result).unwrap();
//! let order: Vec<_> = engine.registry().siblings(&"list").ids().copied().collect();
//! assert_eq!(order, ["second", "first"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod descriptor;
mod engine;
mod geometry;
mod hooks;
mod reorder;
mod render;
mod state;

pub use config::{DEFAULT_TIE_TOLERANCE, DropAnimation, ReorderConfig};
pub use descriptor::{DraggableDescriptor, Registry, RegistryError, SiblingList};
pub use engine::{DragEngine, Message};
pub use geometry::{Axis, Measure, Overlap, Travel, crossed, is_degenerate, overlap};
pub use hooks::DragHooks;
pub use reorder::{SiblingLayout, Target};
pub use render::Renderer;
pub use state::{
    DragMode, DragState, DragUpdate, DraggableLocation, DropReason, DropResult, ItemVisual,
};

pub use understory_event_state::{Direction, DragCommand, LiftMode, MoveTo};
