// SPDX-License-Identifier: MIT OR Apache-2.0
//! The engine-event dispatch table.
//!
//! Hook names are the engine's own function identifiers; the table maps
//! each one to the event it signals. Registered once at load, looked up
//! on every delivery.

use camcue_engine::GameEvent;

/// Engine hooks the plugin subscribes to, paired with the event each
/// one signals.
pub const GAME_EVENT_HOOKS: [(&str, GameEvent); 5] = [
    ("Function TAGame.Car_TA.OnHitBall", GameEvent::BallTouch),
    (
        "Function TAGame.GameEvent_Soccar_TA.EventGoalScored",
        GameEvent::Explosion,
    ),
    ("Function TAGame.Car_TA.OnJumpPressed", GameEvent::Jump),
    (
        "Function CarComponent_DoubleJump_TA.Active.BeginState",
        GameEvent::DoubleJump,
    ),
    (
        "Function TAGame.CarComponent_Dodge_TA.EventActivateDodge",
        GameEvent::Flip,
    ),
];

/// The recurring camera swivel-update hook driving the yaw correction.
pub const SWIVEL_HOOK: &str = "Function TAGame.Camera_TA.ApplySwivel";

/// Map a delivered hook name back to its event, if registered.
pub fn event_for_hook(hook_name: &str) -> Option<GameEvent> {
    GAME_EVENT_HOOKS
        .iter()
        .find(|(name, _)| *name == hook_name)
        .map(|(_, event)| event.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_registered_hook_resolves() {
        for (name, event) in &GAME_EVENT_HOOKS {
            assert_eq!(event_for_hook(name).as_ref(), Some(event));
        }
    }

    #[test]
    fn test_unregistered_hook_is_ignored() {
        assert_eq!(event_for_hook("Function TAGame.Ball_TA.Explode"), None);
    }
}
