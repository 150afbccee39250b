// SPDX-License-Identifier: MIT OR Apache-2.0
//! Console text commands.
//!
//! Argument parsing happens here, at the boundary: a malformed argument
//! is reported through the log and the command does nothing.

use camcue_engine::Permission;

/// A console command the plugin registers at load.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Console name.
    pub name: &'static str,
    /// Help text shown by the host console.
    pub help: &'static str,
    /// Who may run it.
    pub permission: Permission,
}

/// Every command the plugin exposes.
pub const COMMANDS: [CommandSpec; 8] = [
    CommandSpec {
        name: "camcue_yaw",
        help: "Manually adjust camera yaw (percentage, -100 to 100; 0 restores default swivel)",
        permission: Permission::All,
    },
    CommandSpec {
        name: "camcue_reversecam",
        help: "Toggle reverse camera",
        permission: Permission::All,
    },
    CommandSpec {
        name: "camcue_ballcam",
        help: "Enable (1) or disable (0) ball camera",
        permission: Permission::All,
    },
    CommandSpec {
        name: "camcue_start",
        help: "Start playback of a named sequence",
        permission: Permission::All,
    },
    CommandSpec {
        name: "camcue_stop",
        help: "Stop playback and restore camera defaults",
        permission: Permission::All,
    },
    CommandSpec {
        name: "camcue_save",
        help: "Save all sequences to disk",
        permission: Permission::All,
    },
    CommandSpec {
        name: "camcue_load",
        help: "Load a named sequence from disk",
        permission: Permission::All,
    },
    CommandSpec {
        name: "camcue_list",
        help: "List known sequences",
        permission: Permission::All,
    },
];

/// Parse the first argument as a float, reporting failure the way the
/// console expects: a logged message, no state change.
pub(crate) fn parse_float(command: &str, args: &[String]) -> Option<f32> {
    let Some(raw) = args.first() else {
        tracing::error!("{command}: missing numeric argument");
        return None;
    };
    match raw.parse::<f32>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::error!("{command}: {raw:?} is not a number");
            None
        }
    }
}

/// Parse the first argument as a 0/1 switch.
pub(crate) fn parse_switch(command: &str, args: &[String]) -> Option<f32> {
    let Some(raw) = args.first() else {
        tracing::error!("{command}: use 1 (enable) or 0 (disable)");
        return None;
    };
    match raw.parse::<i32>() {
        Ok(value) => Some(if value != 0 { 1.0 } else { 0.0 }),
        Err(_) => {
            tracing::error!("{command}: {raw:?} is not 1 or 0");
            None
        }
    }
}
