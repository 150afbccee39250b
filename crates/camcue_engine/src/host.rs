// SPDX-License-Identifier: MIT OR Apache-2.0
//! The seam between the engine and the game-modification host runtime.
//!
//! The engine never links the host directly: everything it needs goes
//! through [`GameHost`]. The shell crate implements the trait against
//! the real runtime; tests implement it with a recording fake.

/// The camera's free-look orientation offset relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Swivel {
    /// Horizontal offset, in camera units (±23500 covers the range).
    pub yaw: f32,
    /// Vertical offset.
    pub pitch: f32,
    /// Roll offset.
    pub roll: f32,
}

/// Opaque handle pairing a deferred-timer request with its later firing.
///
/// The host timer is single-shot and fire-and-forget with no
/// cancellation; the token is how the engine recognizes which request a
/// firing belongs to, and whether it is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// Console command access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Usable anywhere.
    All,
    /// Usable only in freeplay.
    Freeplay,
}

/// The surface the host runtime exposes to the plugin.
///
/// The host serializes its callbacks into the plugin; none of these
/// methods are invoked re-entrantly.
pub trait GameHost {
    /// Monotonic in-game time, in seconds.
    fn now(&self) -> f64;

    /// Request a single-shot callback after `delay_seconds`, identified
    /// by `token`. There is no cancellation.
    fn schedule_once(&mut self, delay_seconds: f32, token: TimerToken);

    /// Write the behind-view (reverse cam) flag.
    fn set_behind_view(&mut self, enabled: bool);

    /// Write the secondary-camera (ball cam) flag.
    fn set_ball_cam(&mut self, enabled: bool);

    /// Read the current camera swivel; `None` when no camera exists.
    fn current_swivel(&mut self) -> Option<Swivel>;

    /// Write the camera swivel.
    fn set_swivel(&mut self, swivel: Swivel);

    /// Whether the local car is on the ground; `None` when no car
    /// exists.
    fn is_car_grounded(&self) -> Option<bool>;

    /// Start delivering camera swivel-update ticks.
    fn hook_swivel_updates(&mut self);

    /// Stop delivering camera swivel-update ticks.
    fn unhook_swivel_updates(&mut self);

    /// Subscribe to a named engine event.
    fn hook_event(&mut self, hook_name: &str);

    /// Register a console text command.
    fn register_command(&mut self, name: &str, help: &str, permission: Permission);

    /// Write a line to the host's diagnostic console.
    fn log(&mut self, message: &str);
}
