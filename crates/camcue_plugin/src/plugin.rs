// SPDX-License-Identifier: MIT OR Apache-2.0
//! The plugin shell.
//!
//! One owner for the engine, the library, and the overlay panel, with
//! the entry points the host runtime calls. Nothing in here may panic:
//! every failure is reported through the log and recovered locally.

use crate::commands::{self, COMMANDS};
use crate::hooks;
use crate::log_bridge::HostLogBridge;
use crate::panels::SequenceEditorPanel;
use camcue_engine::{
    CameraAction, GameHost, PlaybackEngine, SequenceLibrary, TimerToken,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// File the sequence library persists to, inside the host's data
/// directory.
pub const SEQUENCE_FILE: &str = "camcue_sequences.json";

/// The CamCue plugin.
pub struct CamCuePlugin<H: GameHost> {
    engine: PlaybackEngine<H>,
    library: SequenceLibrary,
    panel: SequenceEditorPanel,
    sequence_path: PathBuf,
    log_rx: Option<mpsc::Receiver<String>>,
}

impl<H: GameHost> CamCuePlugin<H> {
    /// Create the plugin around a host handle. `data_dir` is where the
    /// sequence file lives.
    pub fn new(host: H, data_dir: &Path) -> Self {
        Self {
            engine: PlaybackEngine::new(host),
            library: SequenceLibrary::new(),
            panel: SequenceEditorPanel::new(),
            sequence_path: data_dir.join(SEQUENCE_FILE),
            log_rx: None,
        }
    }

    /// The host loaded the plugin: install logging, subscribe the event
    /// hooks, register the console commands, read the sequence file.
    pub fn on_load(&mut self) {
        let (bridge, rx) = HostLogBridge::new();
        let mut filter = tracing_subscriber::EnvFilter::from_default_env();
        if let Ok(directive) = "camcue_engine=debug".parse() {
            filter = filter.add_directive(directive);
        }
        if let Ok(directive) = "camcue_plugin=debug".parse() {
            filter = filter.add_directive(directive);
        }
        // try_init: the host process may already carry a subscriber.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(bridge)
            .try_init();
        self.log_rx = Some(rx);

        tracing::info!("plugin loaded");

        for (hook_name, _) in &hooks::GAME_EVENT_HOOKS {
            self.engine.host_mut().hook_event(hook_name);
        }
        for command in &COMMANDS {
            self.engine
                .host_mut()
                .register_command(command.name, command.help, command.permission);
        }

        match SequenceLibrary::load_from(&self.sequence_path) {
            Ok(library) => self.library = library,
            Err(err) => tracing::warn!("sequence file not loaded: {err}"),
        }

        self.flush_logs();
    }

    /// The host is unloading the plugin; leave the camera at defaults.
    pub fn on_unload(&mut self) {
        self.engine.stop();
        tracing::info!("plugin unloaded");
        self.flush_logs();
    }

    /// A subscribed engine event fired.
    pub fn on_host_event(&mut self, hook_name: &str) {
        if let Some(event) = hooks::event_for_hook(hook_name) {
            self.engine.on_event(event);
        }
        self.flush_logs();
    }

    /// A deferred timer fired.
    pub fn on_timer(&mut self, token: TimerToken) {
        self.engine.on_timer(token);
        self.flush_logs();
    }

    /// The camera swivel-update hook fired.
    pub fn on_swivel_tick(&mut self) {
        self.engine.on_swivel_tick();
        self.flush_logs();
    }

    /// A registered console command was invoked.
    pub fn handle_command(&mut self, name: &str, args: &[String]) {
        match name {
            "camcue_yaw" => {
                if let Some(value) = commands::parse_float(name, args) {
                    self.engine.adjust_yaw(value);
                }
            }
            "camcue_reversecam" => {
                self.engine.execute(&CameraAction::ToggleReverseCam, 0.0);
            }
            "camcue_ballcam" => {
                if let Some(value) = commands::parse_switch(name, args) {
                    self.engine.execute(&CameraAction::ToggleBallCam, value);
                }
            }
            "camcue_start" => {
                let Some(sequence_name) = args.first() else {
                    tracing::error!("{name}: missing sequence name");
                    self.flush_logs();
                    return;
                };
                match self.library.get(sequence_name) {
                    Some(sequence) => self.engine.start(sequence),
                    None => tracing::error!("no sequence named {sequence_name:?}"),
                }
            }
            "camcue_stop" => self.engine.stop(),
            "camcue_save" => {
                if let Err(err) = self.library.save_to(&self.sequence_path) {
                    tracing::error!("sequence file not saved: {err}");
                }
            }
            "camcue_load" => {
                let Some(sequence_name) = args.first() else {
                    tracing::error!("{name}: missing sequence name");
                    self.flush_logs();
                    return;
                };
                match SequenceLibrary::load_named(&self.sequence_path, sequence_name) {
                    Ok(sequence) => {
                        tracing::info!("loaded sequence {sequence_name:?}");
                        self.library.insert(sequence);
                    }
                    Err(err) => tracing::error!("sequence not loaded: {err}"),
                }
            }
            "camcue_list" => {
                if self.library.is_empty() {
                    tracing::info!("no sequences");
                } else {
                    let names: Vec<_> = self.library.names().collect();
                    tracing::info!("sequences: {}", names.join(", "));
                }
            }
            other => tracing::warn!("unrecognized command {other:?}"),
        }
        self.flush_logs();
    }

    /// Render the overlay settings window into the host-provided UI.
    pub fn render_settings(&mut self, ui: &mut egui::Ui) {
        self.panel
            .ui(ui, &mut self.library, &mut self.engine, &self.sequence_path);
        self.flush_logs();
    }

    /// The authored sequences.
    pub fn library(&self) -> &SequenceLibrary {
        &self.library
    }

    /// The playback engine.
    pub fn engine_mut(&mut self) -> &mut PlaybackEngine<H> {
        &mut self.engine
    }

    /// Push buffered tracing output into the host console.
    fn flush_logs(&mut self) {
        let Some(rx) = &self.log_rx else {
            return;
        };
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        for line in lines {
            self.engine.host_mut().log(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camcue_engine::{Mapping, Permission, Sequence, Swivel};
    use camcue_engine::{CameraAction, GameEvent};

    #[derive(Default)]
    struct FakeHost {
        hooked: Vec<String>,
        registered: Vec<String>,
        log_lines: Vec<String>,
        ball_cam: Option<bool>,
        behind_view: Option<bool>,
        swivel_hooked: bool,
    }

    impl GameHost for FakeHost {
        fn now(&self) -> f64 {
            0.0
        }

        fn schedule_once(&mut self, _delay_seconds: f32, _token: TimerToken) {}

        fn set_behind_view(&mut self, enabled: bool) {
            self.behind_view = Some(enabled);
        }

        fn set_ball_cam(&mut self, enabled: bool) {
            self.ball_cam = Some(enabled);
        }

        fn current_swivel(&mut self) -> Option<Swivel> {
            Some(Swivel::default())
        }

        fn set_swivel(&mut self, _swivel: Swivel) {}

        fn is_car_grounded(&self) -> Option<bool> {
            Some(true)
        }

        fn hook_swivel_updates(&mut self) {
            self.swivel_hooked = true;
        }

        fn unhook_swivel_updates(&mut self) {
            self.swivel_hooked = false;
        }

        fn hook_event(&mut self, hook_name: &str) {
            self.hooked.push(hook_name.to_string());
        }

        fn register_command(&mut self, name: &str, _help: &str, _permission: Permission) {
            self.registered.push(name.to_string());
        }

        fn log(&mut self, message: &str) {
            self.log_lines.push(message.to_string());
        }
    }

    fn plugin(data_dir: &Path) -> CamCuePlugin<FakeHost> {
        CamCuePlugin::new(FakeHost::default(), data_dir)
    }

    #[test]
    fn test_on_load_registers_hooks_and_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = plugin(dir.path());
        plugin.on_load();

        let host = plugin.engine_mut().host_mut();
        assert_eq!(host.hooked.len(), hooks::GAME_EVENT_HOOKS.len());
        assert_eq!(host.registered.len(), COMMANDS.len());
        assert!(host.hooked.contains(&"Function TAGame.Car_TA.OnHitBall".to_string()));
    }

    #[test]
    fn test_hook_delivery_drives_playback() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = plugin(dir.path());

        let sequence = Sequence::with_steps(
            "Kickoff",
            vec![Mapping::new(
                GameEvent::BallTouch,
                CameraAction::ToggleBallCam,
                0.0,
                1.0,
            )],
        );
        plugin.engine_mut().start(&sequence);

        plugin.on_host_event("Function TAGame.Car_TA.OnHitBall");
        assert!(!plugin.engine_mut().is_running());
    }

    #[test]
    fn test_unknown_hook_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = plugin(dir.path());
        plugin.on_host_event("Function TAGame.Ball_TA.Explode");
        assert!(!plugin.engine_mut().is_running());
    }

    #[test]
    fn test_yaw_command_arms_correction() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = plugin(dir.path());

        plugin.handle_command("camcue_yaw", &["50".to_string()]);
        assert!(plugin.engine_mut().host_mut().swivel_hooked);

        plugin.handle_command("camcue_yaw", &["0".to_string()]);
        assert!(!plugin.engine_mut().host_mut().swivel_hooked);
    }

    #[test]
    fn test_malformed_argument_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = plugin(dir.path());

        plugin.handle_command("camcue_yaw", &["sideways".to_string()]);
        assert!(!plugin.engine_mut().host_mut().swivel_hooked);

        plugin.handle_command("camcue_ballcam", &["maybe".to_string()]);
        assert_eq!(plugin.engine_mut().host_mut().ball_cam, None);
    }

    #[test]
    fn test_ballcam_command_sets_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = plugin(dir.path());

        plugin.handle_command("camcue_ballcam", &["1".to_string()]);
        assert_eq!(plugin.engine_mut().host_mut().ball_cam, Some(true));

        plugin.handle_command("camcue_ballcam", &["0".to_string()]);
        assert_eq!(plugin.engine_mut().host_mut().ball_cam, Some(false));
    }

    #[test]
    fn test_save_and_load_commands_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = plugin(dir.path());

        let sequence = Sequence::with_steps(
            "Replay",
            vec![Mapping::new(
                GameEvent::Explosion,
                CameraAction::AdjustYaw,
                0.5,
                -25.0,
            )],
        );
        let steps = sequence.steps.clone();

        plugin.library.insert(sequence);
        plugin.handle_command("camcue_save", &[]);

        let mut reloaded = CamCuePlugin::new(FakeHost::default(), dir.path());
        reloaded.handle_command("camcue_load", &["Replay".to_string()]);
        assert_eq!(reloaded.library().get("Replay").unwrap().steps, steps);
    }

    #[test]
    fn test_start_command_requires_known_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = plugin(dir.path());

        plugin.handle_command("camcue_start", &["Missing".to_string()]);
        assert!(!plugin.engine_mut().is_running());

        plugin.library.insert(Sequence::with_steps(
            "Known",
            vec![Mapping::new(
                GameEvent::Flip,
                CameraAction::ToggleReverseCam,
                0.0,
                0.0,
            )],
        ));
        plugin.handle_command("camcue_start", &["Known".to_string()]);
        assert!(plugin.engine_mut().is_running());

        plugin.handle_command("camcue_stop", &[]);
        assert!(!plugin.engine_mut().is_running());
    }
}
