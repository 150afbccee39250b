// SPDX-License-Identifier: MIT OR Apache-2.0
//! CamCue - camera automation for a game-modification host runtime.
//!
//! The plugin watches a small set of in-game events (ball touch, goal
//! explosion, jump, double jump, flip) and plays back a user-authored
//! sequence of camera actions with per-step delays.
//!
//! This crate is the host-facing shell:
//! - Plugin lifecycle and the entry points the host calls
//! - The event-hook dispatch table
//! - Console text commands
//! - A tracing layer bridging log output into the host console
//! - The egui overlay panel for authoring sequences
//!
//! ## Architecture
//!
//! The host runtime is abstract: the shell talks to it through
//! [`camcue_engine::GameHost`], and the host drives the shell through
//! [`CamCuePlugin`]'s entry points. All playback semantics live in
//! `camcue_engine`.

pub mod commands;
pub mod hooks;
pub mod log_bridge;
pub mod panels;
pub mod plugin;

pub use plugin::{CamCuePlugin, SEQUENCE_FILE};
