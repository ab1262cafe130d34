//! The aggregate of all derived player state.

use crate::holder::StateCell;
use crate::modifiers::ModifierSet;
use crate::states::{ActionState, InteractionProfile, MovementState, ReactionState};

/// Five independent state holders describing what the player is doing.
///
/// Movement, action and modifiers are rewritten every tick by the controller's
/// synchronization pass. Reaction and interaction belong to whichever gameplay
/// system triggers them and are only changed through the `_mut` accessors.
#[derive(Debug, Clone)]
pub struct PlayerState {
    movement: StateCell<MovementState>,
    action: StateCell<ActionState>,
    reaction: StateCell<ReactionState>,
    modifiers: ModifierSet,
    interaction: StateCell<InteractionProfile>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            movement: StateCell::new("movement"),
            action: StateCell::new("action"),
            reaction: StateCell::new("reaction"),
            modifiers: ModifierSet::new(),
            interaction: StateCell::new("interaction"),
        }
    }

    pub fn movement(&self) -> &StateCell<MovementState> {
        &self.movement
    }

    pub fn movement_mut(&mut self) -> &mut StateCell<MovementState> {
        &mut self.movement
    }

    pub fn action(&self) -> &StateCell<ActionState> {
        &self.action
    }

    pub fn action_mut(&mut self) -> &mut StateCell<ActionState> {
        &mut self.action
    }

    pub fn reaction(&self) -> &StateCell<ReactionState> {
        &self.reaction
    }

    pub fn reaction_mut(&mut self) -> &mut StateCell<ReactionState> {
        &mut self.reaction
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn modifiers_mut(&mut self) -> &mut ModifierSet {
        &mut self.modifiers
    }

    pub fn interaction(&self) -> &StateCell<InteractionProfile> {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut StateCell<InteractionProfile> {
        &mut self.interaction
    }

    /// Sum of all holder revisions. Unchanged between two reads means nothing
    /// observable happened in between.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.movement.revision()
            + self.action.revision()
            + self.reaction.revision()
            + self.modifiers.revision()
            + self.interaction.revision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::Modifier;

    #[test]
    fn test_new_state_is_neutral() {
        let state = PlayerState::new();
        assert_eq!(state.movement().current(), MovementState::Idle);
        assert_eq!(state.action().current(), ActionState::None);
        assert_eq!(state.reaction().current(), ReactionState::None);
        assert_eq!(state.interaction().current(), InteractionProfile::None);
        assert!(state.modifiers().current().is_empty());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_holders_are_independent() {
        let mut state = PlayerState::new();
        state.reaction_mut().set(ReactionState::Stagger);
        state.interaction_mut().set(InteractionProfile::Carry);
        state.modifiers_mut().add(Modifier::INJURED);
        assert_eq!(state.movement().current(), MovementState::Idle);
        assert_eq!(state.reaction().current(), ReactionState::Stagger);
        assert!(state.modifiers().has(Modifier::INJURED));
        assert_eq!(state.revision(), 3);
    }
}
