//! Coordinator flags and the events that change them.

/// Discrete happenings reported to the controller between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterEvent {
    /// The character left the ground without jumping, or a jump peaked.
    Fell,
    /// The character touched down.
    Landed,
    /// A vault/slide action began.
    VaultStarted,
    /// The vault/slide action completed.
    VaultFinished,
}

/// Locomotion events produced by the movement driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementEvent {
    Fell,
    Landed,
}

impl From<MovementEvent> for CharacterEvent {
    fn from(event: MovementEvent) -> Self {
        match event {
            MovementEvent::Fell => CharacterEvent::Fell,
            MovementEvent::Landed => CharacterEvent::Landed,
        }
    }
}

/// Boolean state owned by the character controller.
///
/// `dummy || !allow_movement` suppresses all per-mode handling for the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerFlags {
    /// Ground probe hit this tick.
    pub is_grounded: bool,
    /// Cleared while paused or disabled.
    pub allow_movement: bool,
    /// Airborne since the last landing.
    pub on_air: bool,
    /// A jump started and has not landed yet.
    pub is_jumping: bool,
    /// A vault/slide action is running.
    pub is_vaulting: bool,
    /// Scripted: the controller ignores player input.
    pub dummy: bool,
}

impl Default for ControllerFlags {
    fn default() -> Self {
        Self {
            is_grounded: false,
            allow_movement: true,
            on_air: false,
            is_jumping: false,
            is_vaulting: false,
            dummy: false,
        }
    }
}

impl ControllerFlags {
    /// Whether per-mode movement and camera handling runs this tick.
    #[must_use]
    pub fn can_move(&self) -> bool {
        !self.dummy && self.allow_movement
    }

    /// Fold one event into the flags.
    pub fn apply(&mut self, event: CharacterEvent) {
        match event {
            CharacterEvent::Fell => self.on_air = true,
            CharacterEvent::Landed => {
                self.on_air = false;
                self.is_jumping = false;
            }
            CharacterEvent::VaultStarted => self.is_vaulting = true,
            CharacterEvent::VaultFinished => self.is_vaulting = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_movement() {
        let flags = ControllerFlags::default();
        assert!(flags.can_move());
        assert!(!flags.is_grounded);
    }

    #[test]
    fn test_dummy_or_disallowed_blocks_movement() {
        let mut flags = ControllerFlags {
            dummy: true,
            ..Default::default()
        };
        assert!(!flags.can_move());
        flags.dummy = false;
        flags.allow_movement = false;
        assert!(!flags.can_move());
    }

    #[test]
    fn test_landing_clears_air_and_jump() {
        let mut flags = ControllerFlags {
            is_jumping: true,
            ..Default::default()
        };
        flags.apply(MovementEvent::Fell.into());
        assert!(flags.on_air);
        flags.apply(CharacterEvent::Landed);
        assert!(!flags.on_air);
        assert!(!flags.is_jumping);
    }

    #[test]
    fn test_vault_events_toggle_vaulting() {
        let mut flags = ControllerFlags::default();
        flags.apply(CharacterEvent::VaultStarted);
        assert!(flags.is_vaulting);
        flags.apply(CharacterEvent::VaultFinished);
        assert!(!flags.is_vaulting);
    }
}
