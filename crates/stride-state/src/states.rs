//! Exclusive semantic state enums. The first variant of each is its neutral value.

/// What the character's body is doing locomotion-wise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MovementState {
    #[default]
    Idle,
    Walk,
    Run,
    Sprint,
    Jump,
    Fall,
    Land,
    Swim,
    Dive,
    Ladder,
    Crawl,
    AllFours,
    Crouch,
    CarryHeavy,
    DragHeavy,
}

impl MovementState {
    /// States in which the character is supported by the ground.
    #[must_use]
    pub fn is_grounded_like(self) -> bool {
        matches!(
            self,
            MovementState::Idle
                | MovementState::Walk
                | MovementState::Run
                | MovementState::Sprint
                | MovementState::Crouch
                | MovementState::Crawl
                | MovementState::AllFours
        )
    }
}

/// The deliberate activity the character is engaged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActionState {
    #[default]
    None,
    Work,
    Train,
    Sleep,
    Rest,
    Attack,
    Throw,
    UseObject,
    Interact,
}

/// Involuntary response to an outside event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReactionState {
    #[default]
    None,
    Dodge,
    Stagger,
    Fall,
}

/// How the character is manipulating a world object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InteractionProfile {
    #[default]
    None,
    Push,
    Pull,
    Carry,
    Roll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_values() {
        assert_eq!(MovementState::default(), MovementState::Idle);
        assert_eq!(ActionState::default(), ActionState::None);
        assert_eq!(ReactionState::default(), ReactionState::None);
        assert_eq!(InteractionProfile::default(), InteractionProfile::None);
    }

    #[test]
    fn test_grounded_like_states() {
        assert!(MovementState::Idle.is_grounded_like());
        assert!(MovementState::Crawl.is_grounded_like());
        assert!(!MovementState::Jump.is_grounded_like());
        assert!(!MovementState::Ladder.is_grounded_like());
        assert!(!MovementState::Land.is_grounded_like());
    }
}
