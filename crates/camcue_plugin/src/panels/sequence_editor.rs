// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence editor panel - authoring, reordering, and playback control.

use camcue_engine::{
    CameraAction, GameEvent, GameHost, Mapping, PlaybackEngine, SequenceLibrary,
};
use std::path::Path;

/// A deferred edit to the step list, applied after rendering so the
/// list is not mutated mid-iteration.
enum StepEdit {
    MoveUp(usize),
    MoveDown(usize),
    Remove(usize),
}

/// The sequence editor panel.
pub struct SequenceEditorPanel {
    /// Name of the sequence being edited.
    selected: Option<String>,
    /// Input buffer for a new sequence name.
    new_name: String,
    /// Input buffer for renaming the selected sequence.
    rename_buffer: String,
    /// Index into [`GameEvent::ALL`] for the step being authored.
    event_choice: usize,
    /// Index into [`CameraAction::ALL`] for the step being authored.
    action_choice: usize,
    /// Delay of the step being authored, in seconds.
    delay_input: f32,
    /// Swivel percentage of the step being authored.
    swivel_input: f32,
    /// Ball-cam state of the step being authored.
    ball_cam_input: bool,
}

impl SequenceEditorPanel {
    /// Create a new panel.
    pub fn new() -> Self {
        Self {
            selected: None,
            new_name: String::new(),
            rename_buffer: String::new(),
            event_choice: 0,
            action_choice: 0,
            delay_input: 0.0,
            swivel_input: 50.0,
            ball_cam_input: true,
        }
    }

    /// Render the panel.
    pub fn ui<H: GameHost>(
        &mut self,
        ui: &mut egui::Ui,
        library: &mut SequenceLibrary,
        engine: &mut PlaybackEngine<H>,
        sequence_path: &Path,
    ) {
        ui.heading("CamCue");

        if engine.is_running() {
            ui.label(format!(
                "Playing - waiting for step {}/{}",
                engine.cursor() + 1,
                engine.step_count()
            ));
        } else {
            ui.label("Idle");
        }

        ui.separator();
        self.sequence_row(ui, library);
        ui.separator();

        // Drop the selection if its sequence was deleted or renamed.
        if let Some(name) = &self.selected {
            if !library.contains(name) {
                self.selected = None;
            }
        }

        if let Some(name) = self.selected.clone() {
            self.step_author_row(ui, library, &name);
            ui.separator();
            self.step_list(ui, library, &name);
            ui.separator();
            self.playback_row(ui, library, engine, &name);
        } else {
            ui.label("Select or create a sequence to edit it.");
        }

        ui.separator();
        self.persistence_row(ui, library, sequence_path);
    }

    fn sequence_row(&mut self, ui: &mut egui::Ui, library: &mut SequenceLibrary) {
        ui.horizontal(|ui| {
            let selected_text = self.selected.as_deref().unwrap_or("(none)").to_string();
            egui::ComboBox::from_label("Sequence")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    let names: Vec<String> = library.names().map(ToString::to_string).collect();
                    for name in names {
                        let checked = self.selected.as_deref() == Some(name.as_str());
                        if ui.selectable_label(checked, &name).clicked() {
                            self.rename_buffer = name.clone();
                            self.selected = Some(name);
                        }
                    }
                });

            if ui.button("Delete").clicked() {
                if let Some(name) = self.selected.take() {
                    library.remove(&name);
                }
            }
        });

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.new_name)
                    .hint_text("New sequence name...")
                    .desired_width(160.0),
            );
            if ui.button("Add").clicked() && library.add_empty(&self.new_name) {
                self.selected = Some(self.new_name.clone());
                self.rename_buffer = self.new_name.clone();
                self.new_name.clear();
            }
        });

        if self.selected.is_some() {
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.rename_buffer)
                        .hint_text("Rename to...")
                        .desired_width(160.0),
                );
                if ui.button("Rename").clicked() {
                    if let Some(old) = &self.selected {
                        if library.rename(old, &self.rename_buffer) {
                            self.selected = Some(self.rename_buffer.clone());
                        }
                    }
                }
            });
        }
    }

    fn step_author_row(
        &mut self,
        ui: &mut egui::Ui,
        library: &mut SequenceLibrary,
        name: &str,
    ) {
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Event")
                .selected_text(GameEvent::ALL[self.event_choice].name())
                .show_ui(ui, |ui| {
                    for (i, event) in GameEvent::ALL.iter().enumerate() {
                        ui.selectable_value(&mut self.event_choice, i, event.name());
                    }
                });

            egui::ComboBox::from_label("Action")
                .selected_text(CameraAction::ALL[self.action_choice].name())
                .show_ui(ui, |ui| {
                    for (i, action) in CameraAction::ALL.iter().enumerate() {
                        ui.selectable_value(&mut self.action_choice, i, action.name());
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Delay (s)");
            ui.add(
                egui::DragValue::new(&mut self.delay_input)
                    .speed(0.1)
                    .range(0.0..=60.0),
            );

            let action = &CameraAction::ALL[self.action_choice];
            match action {
                CameraAction::AdjustYaw => {
                    ui.add(
                        egui::Slider::new(&mut self.swivel_input, -100.0..=100.0)
                            .suffix("%")
                            .text("Swivel"),
                    );
                }
                CameraAction::ToggleBallCam => {
                    ui.checkbox(&mut self.ball_cam_input, "Ball cam on");
                }
                _ => {}
            }

            if ui.button("Add Step").clicked() {
                if let Some(sequence) = library.get_mut(name) {
                    let action = CameraAction::ALL[self.action_choice].clone();
                    let value = match action {
                        CameraAction::AdjustYaw => self.swivel_input,
                        CameraAction::ToggleBallCam => {
                            if self.ball_cam_input {
                                1.0
                            } else {
                                0.0
                            }
                        }
                        _ => 0.0,
                    };
                    sequence.add_step(Mapping::new(
                        GameEvent::ALL[self.event_choice].clone(),
                        action,
                        self.delay_input,
                        value,
                    ));
                }
            }
        });
    }

    fn step_list(&mut self, ui: &mut egui::Ui, library: &mut SequenceLibrary, name: &str) {
        let Some(sequence) = library.get_mut(name) else {
            return;
        };

        if sequence.is_empty() {
            ui.label("No steps yet.");
            return;
        }

        let mut edit: Option<StepEdit> = None;

        for (i, step) in sequence.steps.iter().enumerate() {
            ui.horizontal(|ui| {
                let mut text = format!(
                    "{}. {} -> {} (delay {:.1}s)",
                    i + 1,
                    step.event,
                    step.action,
                    step.delay
                );
                if step.action.uses_value() {
                    text.push_str(&format!(" [{:.1}]", step.value));
                }
                ui.label(text);

                if ui.small_button("Up").clicked() {
                    edit = Some(StepEdit::MoveUp(i));
                }
                if ui.small_button("Down").clicked() {
                    edit = Some(StepEdit::MoveDown(i));
                }
                if ui.small_button("Remove").clicked() {
                    edit = Some(StepEdit::Remove(i));
                }
            });
        }

        match edit {
            Some(StepEdit::MoveUp(i)) => sequence.move_step_up(i),
            Some(StepEdit::MoveDown(i)) => sequence.move_step_down(i),
            Some(StepEdit::Remove(i)) => {
                sequence.remove_step(i);
            }
            None => {}
        }
    }

    fn playback_row<H: GameHost>(
        &mut self,
        ui: &mut egui::Ui,
        library: &SequenceLibrary,
        engine: &mut PlaybackEngine<H>,
        name: &str,
    ) {
        ui.horizontal(|ui| {
            if ui.button("Start").clicked() {
                if let Some(sequence) = library.get(name) {
                    engine.start(sequence);
                }
            }
            if ui.button("Stop").clicked() {
                engine.stop();
            }
        });
    }

    fn persistence_row(
        &mut self,
        ui: &mut egui::Ui,
        library: &mut SequenceLibrary,
        sequence_path: &Path,
    ) {
        ui.horizontal(|ui| {
            if ui.button("Save All").clicked() {
                if let Err(err) = library.save_to(sequence_path) {
                    tracing::error!("sequence file not saved: {err}");
                }
            }
            if ui.button("Reload").clicked() {
                match SequenceLibrary::load_from(sequence_path) {
                    Ok(loaded) => *library = loaded,
                    Err(err) => tracing::warn!("sequence file not loaded: {err}"),
                }
            }
        });
    }
}

impl Default for SequenceEditorPanel {
    fn default() -> Self {
        Self::new()
    }
}
