// SPDX-License-Identifier: MIT OR Apache-2.0
//! Overlay panels rendered into the host-provided UI.

pub mod sequence_editor;

pub use sequence_editor::SequenceEditorPanel;
