//! A playable character: input, controller and derived state ticked together.

use stride_config::Config;
use stride_input::{ControlInput, InputSource, InputTracker};
use stride_state::PlayerState;

use crate::collaborators::Collaborators;
use crate::controller::CharacterController;
use crate::sync::synchronize;

/// Owns the per-character pieces and enforces the tick order: poll input,
/// run the controller, then synchronize the derived state from the
/// post-transition controller state.
pub struct Character {
    input: Box<dyn InputSource>,
    tracker: InputTracker,
    controller: CharacterController,
    state: PlayerState,
    last_input: ControlInput,
}

impl Character {
    pub fn new(
        config: &Config,
        collaborators: Collaborators,
        input: impl InputSource + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            tracker: InputTracker::new(),
            controller: CharacterController::new(config, collaborators),
            state: PlayerState::new(),
            last_input: ControlInput::default(),
        }
    }

    /// Run one tick. Returns `true` if the derived state changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        let raw = self.input.poll();
        self.last_input = self.tracker.resolve(&raw);
        self.controller.tick(&self.last_input, dt);
        synchronize(&self.controller.snapshot(), &mut self.state)
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CharacterController {
        &mut self.controller
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Reaction and interaction are set through here by gameplay systems.
    pub fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    /// The control snapshot used by the last tick.
    pub fn last_input(&self) -> &ControlInput {
        &self.last_input
    }
}

impl std::fmt::Debug for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Character")
            .field("controller", &self.controller)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ControlMode;
    use crate::sim::SimWorld;
    use glam::Vec2;
    use stride_input::{RawInput, ScriptedInput};
    use stride_state::{ActionState, MovementState};

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_tick_syncs_after_controller() {
        let world = SimWorld::new();
        world.state_mut().climb.to_ledge = true;
        let mut character = Character::new(
            &Config::default(),
            world.collaborators(),
            ScriptedInput::new(),
        );

        character.tick(DT);

        assert_eq!(character.controller().mode(), ControlMode::Climb);
        assert_eq!(character.state().movement().current(), MovementState::Ladder);
        assert_eq!(character.state().action().current(), ActionState::Interact);
    }

    #[test]
    fn test_walking_input_yields_walk_state() {
        let world = SimWorld::new();
        let mut input = ScriptedInput::new();
        input.push_held(
            5,
            RawInput {
                movement: Vec2::new(0.0, 1.0),
                ..Default::default()
            },
        );
        let mut character = Character::new(&Config::default(), world.collaborators(), input);

        for _ in 0..5 {
            character.tick(DT);
        }
        assert_eq!(character.state().movement().current(), MovementState::Walk);
        assert_eq!(character.last_input().movement, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_idle_tick_reports_no_change() {
        let world = SimWorld::new();
        let mut character = Character::new(
            &Config::default(),
            world.collaborators(),
            ScriptedInput::new(),
        );
        character.tick(DT);
        assert!(!character.tick(DT));
    }
}
