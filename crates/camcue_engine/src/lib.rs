// SPDX-License-Identifier: MIT OR Apache-2.0
//! Event-triggered camera sequence engine.
//!
//! This crate is the host-independent core of CamCue:
//! - Closed event and action vocabularies with drift tolerance
//! - The mapping/sequence data model
//! - The playback engine: cursor state machine, delayed scheduler,
//!   action executor, recurring yaw correction, reset/guard logic
//! - The named sequence library and its JSON persistence
//!
//! ## Architecture
//!
//! Everything the game-modification host does for the engine goes
//! through the [`GameHost`] trait. The shell crate implements it
//! against the real runtime and forwards host callbacks (events,
//! timer firings, swivel ticks) into one owned [`PlaybackEngine`].

pub mod action;
pub mod event;
pub mod host;
pub mod library;
pub mod playback;
pub mod sequence;

pub use action::CameraAction;
pub use event::GameEvent;
pub use host::{GameHost, Permission, Swivel, TimerToken};
pub use library::{LibraryError, SequenceLibrary};
pub use playback::PlaybackEngine;
pub use sequence::{Mapping, Sequence};
