// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: input normalization for drag interactions.
//!
//! This crate turns raw pointer and keyboard events into a single, uniform
//! stream of [`DragCommand`]s (lift, move, drop, cancel). Each sensor is a
//! small state machine that consumes exactly one raw event per call and
//! produces at most one command, plus a flag telling the host whether to
//! suppress the event's default behavior (scrolling, text selection, focus
//! traversal) while a drag is active.
//!
//! - [`drag`]: [`drag::PointerSensor`] for mouse and basic touch long-press.
//! - [`keyboard`]: [`keyboard::KeyboardSensor`] for lift / arrow-step / drop / cancel keys.
//!
//! The crate does not assume any particular UI framework or event system.
//! Hosts normalize their native events into positions ([`kurbo::Point`]),
//! buttons, and [`Key`] identities, and resolve which draggable an event
//! targets (for example with `understory_box_tree` hit testing).
//!
//! ## Pointer vs. keyboard
//!
//! A mouse press is ambiguous: it may be a click. The pointer sensor
//! therefore emits [`LiftMode::Pointer`], and consumers wait for movement
//! past a threshold before treating it as a drag. Keyboard lifts and touch
//! long-presses are unambiguous and emit [`LiftMode::Keyboard`] and
//! [`LiftMode::Touch`], which lift immediately.
//!
//! ```rust
//! use understory_event_state::keyboard::KeyboardSensor;
//! use understory_event_state::{Direction, DragCommand, Key, MoveTo};
//!
//! let mut keys = KeyboardSensor::default();
//! keys.on_key_down(Some(&42_u32), Key::Space);
//!
//! let out = keys.on_key_down(Some(&42_u32), Key::ArrowDown);
//! assert_eq!(out.command, Some(DragCommand::Move(MoveTo::Step(Direction::Down))));
//! assert!(out.prevent_default);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod command;
pub mod drag;
pub mod keyboard;

pub use command::{Direction, DragCommand, InputOutcome, Key, LiftMode, MoveTo};
