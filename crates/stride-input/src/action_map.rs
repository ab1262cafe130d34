//! Digital control actions and their per-tick state.
//!
//! [`ActionHistory`] keeps the pressed set for the current and previous tick,
//! so edge queries compare two explicit samples instead of relying on the
//! input device to report transitions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Semantic buttons the character controller reacts to.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ControlAction {
    /// Run modifier (level-triggered).
    Run,
    /// Jump (edge-triggered).
    Jump,
    /// Pause toggle (edge-triggered).
    Pause,
    /// Explicit switch to first person (edge-triggered).
    EnterFirstPerson,
    /// Explicit switch back to third person (edge-triggered).
    ExitFirstPerson,
}

impl ControlAction {
    /// Every action, in a stable order.
    pub const ALL: [ControlAction; 5] = [
        ControlAction::Run,
        ControlAction::Jump,
        ControlAction::Pause,
        ControlAction::EnterFirstPerson,
        ControlAction::ExitFirstPerson,
    ];
}

/// Pressed buttons for this tick and the one before it.
#[derive(Debug, Clone, Default)]
pub struct ActionHistory {
    pressed: HashSet<ControlAction>,
    prev_pressed: HashSet<ControlAction>,
}

impl ActionHistory {
    /// Create a history with nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift current presses into history and start a fresh tick.
    pub fn begin_frame(&mut self) {
        std::mem::swap(&mut self.prev_pressed, &mut self.pressed);
        self.pressed.clear();
    }

    /// Record a digital sample for this tick.
    pub fn set_pressed(&mut self, action: ControlAction, pressed: bool) {
        if pressed {
            self.pressed.insert(action);
        } else {
            self.pressed.remove(&action);
        }
    }

    /// Whether the action is held this tick.
    #[must_use]
    pub fn is_pressed(&self, action: ControlAction) -> bool {
        self.pressed.contains(&action)
    }

    /// True only on the tick the action went from released to pressed.
    #[must_use]
    pub fn just_pressed(&self, action: ControlAction) -> bool {
        self.is_pressed(action) && !self.prev_pressed.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_action_is_released() {
        let history = ActionHistory::new();
        for action in ControlAction::ALL {
            assert!(!history.is_pressed(action));
            assert!(!history.just_pressed(action));
        }
    }

    #[test]
    fn test_just_pressed_only_on_first_tick() {
        let mut history = ActionHistory::new();

        history.begin_frame();
        history.set_pressed(ControlAction::Jump, true);
        assert!(history.just_pressed(ControlAction::Jump));

        history.begin_frame();
        history.set_pressed(ControlAction::Jump, true);
        assert!(!history.just_pressed(ControlAction::Jump));
        assert!(history.is_pressed(ControlAction::Jump));
    }

    #[test]
    fn test_release_clears_press() {
        let mut history = ActionHistory::new();
        history.begin_frame();
        history.set_pressed(ControlAction::Pause, true);
        history.set_pressed(ControlAction::Pause, false);
        assert!(!history.is_pressed(ControlAction::Pause));

        history.begin_frame();
        assert!(!history.just_pressed(ControlAction::Pause));
    }

    #[test]
    fn test_release_and_press_again_re_arms_edge() {
        let mut history = ActionHistory::new();
        for pressed in [true, false, true] {
            history.begin_frame();
            history.set_pressed(ControlAction::EnterFirstPerson, pressed);
        }
        assert!(history.just_pressed(ControlAction::EnterFirstPerson));
    }

    #[test]
    fn test_actions_tracked_independently() {
        let mut history = ActionHistory::new();
        history.begin_frame();
        history.set_pressed(ControlAction::Run, true);
        history.set_pressed(ControlAction::Jump, false);
        assert!(history.is_pressed(ControlAction::Run));
        assert!(!history.is_pressed(ControlAction::Jump));
    }
}
