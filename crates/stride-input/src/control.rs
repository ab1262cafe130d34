//! Raw polled input and the per-tick control snapshot derived from it.
//!
//! An [`InputSource`] is polled once per tick for a [`RawInput`] holding level
//! values only. [`InputTracker`] keeps one tick of history and turns those
//! levels into a [`ControlInput`] whose button fields are edges where the
//! controller needs edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::action_map::{ActionHistory, ControlAction};

/// Scroll magnitude below which the wheel counts as idle.
pub const SCROLL_THRESHOLD: f32 = 0.01;

/// Level-valued input as read from a device layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInput {
    /// Planar stick/WASD vector: `x` strafes right, `y` moves forward.
    pub movement: Vec2,
    /// Run button held.
    pub run: bool,
    /// Jump button held.
    pub jump: bool,
    /// Pause button held.
    pub pause: bool,
    /// Enter-first-person button held.
    pub enter_fpp: bool,
    /// Exit-first-person button held.
    pub exit_fpp: bool,
    /// Horizontal mouse delta this tick.
    pub mouse_x: f32,
    /// Scroll wheel delta this tick (positive zooms in).
    pub scroll: f32,
}

/// Anything the controller can poll for input once per tick.
pub trait InputSource {
    /// Read the current level values.
    fn poll(&mut self) -> RawInput;
}

/// Per-tick control snapshot consumed by the character controller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    /// Planar movement vector.
    pub movement: Vec2,
    /// Run held (level).
    pub run: bool,
    /// Jump pressed this tick (edge).
    pub jump: bool,
    /// Pause pressed this tick (edge).
    pub pause: bool,
    /// Enter-first-person pressed this tick (edge).
    pub enter_fpp: bool,
    /// Exit-first-person pressed this tick (edge).
    pub exit_fpp: bool,
    /// Horizontal mouse delta.
    pub mouse_x: f32,
    /// Scroll wheel delta.
    pub scroll: f32,
}

impl ControlInput {
    /// Scroll wheel moved toward the character this tick.
    #[must_use]
    pub fn zoom_in(&self) -> bool {
        self.scroll > SCROLL_THRESHOLD
    }

    /// Scroll wheel moved away from the character this tick.
    #[must_use]
    pub fn zoom_out(&self) -> bool {
        self.scroll < -SCROLL_THRESHOLD
    }
}

/// Converts successive [`RawInput`] samples into [`ControlInput`] snapshots.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    actions: ActionHistory,
}

impl InputTracker {
    /// Create a tracker with no history (every held button reads as a fresh edge).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick of raw input into the history and return the snapshot.
    pub fn resolve(&mut self, raw: &RawInput) -> ControlInput {
        self.actions.begin_frame();
        self.actions.set_pressed(ControlAction::Run, raw.run);
        self.actions.set_pressed(ControlAction::Jump, raw.jump);
        self.actions.set_pressed(ControlAction::Pause, raw.pause);
        self.actions.set_pressed(ControlAction::EnterFirstPerson, raw.enter_fpp);
        self.actions.set_pressed(ControlAction::ExitFirstPerson, raw.exit_fpp);

        ControlInput {
            movement: raw.movement,
            run: self.actions.is_pressed(ControlAction::Run),
            jump: self.actions.just_pressed(ControlAction::Jump),
            pause: self.actions.just_pressed(ControlAction::Pause),
            enter_fpp: self.actions.just_pressed(ControlAction::EnterFirstPerson),
            exit_fpp: self.actions.just_pressed(ControlAction::ExitFirstPerson),
            mouse_x: raw.mouse_x,
            scroll: raw.scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held_pause() -> RawInput {
        RawInput {
            pause: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_held_button_produces_single_edge() {
        let mut tracker = InputTracker::new();
        assert!(tracker.resolve(&held_pause()).pause);
        assert!(!tracker.resolve(&held_pause()).pause);
        assert!(!tracker.resolve(&held_pause()).pause);
    }

    #[test]
    fn test_release_re_arms_edge() {
        let mut tracker = InputTracker::new();
        tracker.resolve(&held_pause());
        tracker.resolve(&RawInput::default());
        assert!(tracker.resolve(&held_pause()).pause);
    }

    #[test]
    fn test_run_is_level_triggered() {
        let mut tracker = InputTracker::new();
        let raw = RawInput {
            run: true,
            ..Default::default()
        };
        assert!(tracker.resolve(&raw).run);
        assert!(tracker.resolve(&raw).run);
    }

    #[test]
    fn test_analog_values_pass_through() {
        let mut tracker = InputTracker::new();
        let raw = RawInput {
            movement: Vec2::new(0.3, -0.4),
            mouse_x: 2.5,
            scroll: -0.2,
            ..Default::default()
        };
        let input = tracker.resolve(&raw);
        assert_eq!(input.movement, Vec2::new(0.3, -0.4));
        assert_eq!(input.mouse_x, 2.5);
        assert!(input.zoom_out());
        assert!(!input.zoom_in());
    }

    #[test]
    fn test_scroll_inside_threshold_is_idle() {
        let input = ControlInput {
            scroll: 0.005,
            ..Default::default()
        };
        assert!(!input.zoom_in());
        assert!(!input.zoom_out());
    }
}
