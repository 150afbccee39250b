// SPDX-License-Identifier: MIT OR Apache-2.0
//! The closed vocabulary of camera actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A camera effect a sequence step can schedule.
///
/// Like [`GameEvent`](crate::GameEvent), the vocabulary is closed but
/// drift-tolerant: names outside it load as [`CameraAction::Unknown`]
/// and execute as a logged no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CameraAction {
    /// Flip the behind-view flag.
    ToggleReverseCam,
    /// Turn behind-view on, only if it is currently off.
    EnableReverseCam,
    /// Turn behind-view off, only if it is currently on.
    DisableReverseCam,
    /// Flip the direction sign applied to later yaw adjustments.
    ToggleSwivelDirection,
    /// Arm (nonzero) or clear (zero) the recurring yaw correction.
    /// The value is a percentage of the full swivel range.
    AdjustYaw,
    /// Set the ball-cam flag from the value (nonzero = on). A set, not
    /// a toggle, despite the name the sequence files use.
    ToggleBallCam,
    /// An action name outside the known vocabulary.
    Unknown(String),
}

impl CameraAction {
    /// Every known member, in the order the authoring UI lists them.
    pub const ALL: [CameraAction; 6] = [
        CameraAction::ToggleReverseCam,
        CameraAction::EnableReverseCam,
        CameraAction::DisableReverseCam,
        CameraAction::ToggleSwivelDirection,
        CameraAction::AdjustYaw,
        CameraAction::ToggleBallCam,
    ];

    /// The display name, as written to sequence files.
    pub fn name(&self) -> &str {
        match self {
            Self::ToggleReverseCam => "Toggle Reverse Cam",
            Self::EnableReverseCam => "Enable Reverse Cam",
            Self::DisableReverseCam => "Disable Reverse Cam",
            Self::ToggleSwivelDirection => "Toggle Swivel Direction",
            Self::AdjustYaw => "Adjust Yaw",
            Self::ToggleBallCam => "Toggle Ball Cam",
            Self::Unknown(name) => name,
        }
    }

    /// Whether the step value carries meaning for this action.
    pub fn uses_value(&self) -> bool {
        matches!(self, Self::AdjustYaw | Self::ToggleBallCam)
    }

    /// Whether this is a member of the known vocabulary.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for CameraAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for CameraAction {
    fn from(name: &str) -> Self {
        match name {
            "Toggle Reverse Cam" => Self::ToggleReverseCam,
            "Enable Reverse Cam" => Self::EnableReverseCam,
            "Disable Reverse Cam" => Self::DisableReverseCam,
            "Toggle Swivel Direction" => Self::ToggleSwivelDirection,
            "Adjust Yaw" => Self::AdjustYaw,
            "Toggle Ball Cam" => Self::ToggleBallCam,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for CameraAction {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<CameraAction> for String {
    fn from(action: CameraAction) -> Self {
        action.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_round_trip() {
        for action in CameraAction::ALL {
            let name = action.name().to_string();
            assert_eq!(CameraAction::from(name), action);
        }
    }

    #[test]
    fn test_unknown_name_is_tolerated() {
        let action: CameraAction = serde_json::from_str("\"Zoom Out\"").unwrap();
        assert_eq!(action, CameraAction::Unknown("Zoom Out".to_string()));
        assert!(!action.is_known());
    }

    #[test]
    fn test_value_carrying_actions() {
        assert!(CameraAction::AdjustYaw.uses_value());
        assert!(CameraAction::ToggleBallCam.uses_value());
        assert!(!CameraAction::ToggleReverseCam.uses_value());
        assert!(!CameraAction::ToggleSwivelDirection.uses_value());
    }
}
