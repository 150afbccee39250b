// SPDX-License-Identifier: MIT OR Apache-2.0
//! The closed vocabulary of recognized in-game events.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An in-game event a sequence step can wait for.
///
/// The vocabulary is closed, but names outside it survive loading as
/// [`GameEvent::Unknown`] so sequence files written by newer or older
/// builds still parse. An unknown event never matches a delivered one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameEvent {
    /// The local car touched the ball.
    BallTouch,
    /// A goal explosion went off.
    Explosion,
    /// A jump pressed while on the ground.
    Jump,
    /// A second jump while airborne.
    DoubleJump,
    /// A flip/dodge activation.
    Flip,
    /// An event name outside the known vocabulary.
    Unknown(String),
}

impl GameEvent {
    /// Every known member, in the order the authoring UI lists them.
    pub const ALL: [GameEvent; 5] = [
        GameEvent::BallTouch,
        GameEvent::Explosion,
        GameEvent::Jump,
        GameEvent::DoubleJump,
        GameEvent::Flip,
    ];

    /// The display name, as written to sequence files.
    pub fn name(&self) -> &str {
        match self {
            Self::BallTouch => "Ball Touch",
            Self::Explosion => "Explosion",
            Self::Jump => "Jump",
            Self::DoubleJump => "Double Jump",
            Self::Flip => "Flip",
            Self::Unknown(name) => name,
        }
    }

    /// Whether this is a member of the known vocabulary.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for GameEvent {
    fn from(name: &str) -> Self {
        match name {
            "Ball Touch" => Self::BallTouch,
            "Explosion" => Self::Explosion,
            "Jump" => Self::Jump,
            "Double Jump" => Self::DoubleJump,
            "Flip" => Self::Flip,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for GameEvent {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<GameEvent> for String {
    fn from(event: GameEvent) -> Self {
        event.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_round_trip() {
        for event in GameEvent::ALL {
            let name = event.name().to_string();
            assert_eq!(GameEvent::from(name), event);
        }
    }

    #[test]
    fn test_unknown_name_is_tolerated() {
        let event: GameEvent = serde_json::from_str("\"Teleport\"").unwrap();
        assert_eq!(event, GameEvent::Unknown("Teleport".to_string()));
        assert!(!event.is_known());
        assert_eq!(serde_json::to_string(&event).unwrap(), "\"Teleport\"");
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&GameEvent::DoubleJump).unwrap();
        assert_eq!(json, "\"Double Jump\"");
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GameEvent::DoubleJump);
    }
}
