//! Logs control mode and flag changes, once per change.

use crate::flags::ControllerFlags;
use crate::mode::ControlMode;

#[derive(Debug, Clone, Default)]
pub struct StateWatcher {
    last: Option<(ControlMode, ControllerFlags)>,
}

impl StateWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current state. Returns `true` (and logs) if it differs from
    /// the last observed one.
    pub fn observe(&mut self, mode: ControlMode, flags: ControllerFlags) -> bool {
        if self.last == Some((mode, flags)) {
            return false;
        }
        tracing::debug!(
            mode = %mode,
            grounded = flags.is_grounded,
            on_air = flags.on_air,
            jumping = flags.is_jumping,
            vaulting = flags.is_vaulting,
            allow_movement = flags.allow_movement,
            dummy = flags.dummy,
            "controller state"
        );
        self.last = Some((mode, flags));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_only_changes() {
        let mut watcher = StateWatcher::new();
        let flags = ControllerFlags::default();
        assert!(watcher.observe(ControlMode::Tpp, flags));
        assert!(!watcher.observe(ControlMode::Tpp, flags));
        assert!(watcher.observe(ControlMode::Pause, flags));
        let grounded = ControllerFlags {
            is_grounded: true,
            ..flags
        };
        assert!(watcher.observe(ControlMode::Pause, grounded));
        assert!(!watcher.observe(ControlMode::Pause, grounded));
    }
}
