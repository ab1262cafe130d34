//! High-level control modes.

use std::fmt;

/// The exclusive locomotion context the character is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ControlMode {
    /// Third-person orbit camera, camera-relative movement.
    #[default]
    Tpp,
    /// First-person camera, character-relative movement and mouse yaw.
    Fpp,
    /// Ledge and wall climbing.
    Climb,
    /// Near a vault/slide/reach object.
    Parkour,
    /// Input is ignored until pause is toggled again.
    Pause,
}

impl ControlMode {
    /// Every mode, in declaration order.
    pub const ALL: [ControlMode; 5] = [
        ControlMode::Tpp,
        ControlMode::Fpp,
        ControlMode::Climb,
        ControlMode::Parkour,
        ControlMode::Pause,
    ];

    /// Short uppercase label used in logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ControlMode::Tpp => "TPP",
            ControlMode::Fpp => "FPP",
            ControlMode::Climb => "CLIMB",
            ControlMode::Parkour => "PARKOUR",
            ControlMode::Pause => "PAUSE",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_third_person() {
        assert_eq!(ControlMode::default(), ControlMode::Tpp);
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = ControlMode::ALL.iter().map(|m| m.to_string()).collect();
        labels.dedup();
        assert_eq!(labels.len(), ControlMode::ALL.len());
        assert_eq!(ControlMode::Parkour.to_string(), "PARKOUR");
    }
}
