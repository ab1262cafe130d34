//! Per-tick synchronization of derived player state from the controller.

use stride_state::{ActionState, Modifier, MovementState, PlayerState};

use crate::collaborators::Gait;
use crate::flags::ControllerFlags;
use crate::mode::ControlMode;

/// Speed below which a grounded character counts as standing still.
pub const IDLE_SPEED_THRESHOLD: f32 = 0.05;

/// Post-transition controller state read by the synchronization pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSnapshot {
    pub mode: ControlMode,
    pub flags: ControllerFlags,
    /// Velocity magnitude reported by the movement driver.
    pub speed: f32,
    pub gait: Gait,
}

/// Movement state for a snapshot. First matching rule wins.
#[must_use]
pub fn movement_state(snapshot: &ControllerSnapshot) -> MovementState {
    let flags = &snapshot.flags;
    match snapshot.mode {
        ControlMode::Climb => MovementState::Ladder,
        ControlMode::Parkour => MovementState::Run,
        _ if !flags.is_grounded => {
            if flags.is_jumping {
                MovementState::Jump
            } else {
                MovementState::Fall
            }
        }
        _ if flags.on_air => MovementState::Land,
        _ if snapshot.speed < IDLE_SPEED_THRESHOLD => MovementState::Idle,
        _ => match snapshot.gait {
            Gait::Running => MovementState::Run,
            Gait::Walking | Gait::Crouching => MovementState::Walk,
        },
    }
}

/// Action state for a snapshot.
#[must_use]
pub fn action_state(snapshot: &ControllerSnapshot) -> ActionState {
    let interacting = snapshot.flags.is_vaulting
        || matches!(snapshot.mode, ControlMode::Parkour | ControlMode::Climb);
    if interacting {
        ActionState::Interact
    } else {
        ActionState::None
    }
}

/// Rewrite movement, action and the three mirrored modifiers.
///
/// Reaction and interaction profile are never touched, nor are any other
/// modifier bits. Returns `true` if anything changed; a second call with the
/// same snapshot always returns `false`.
pub fn synchronize(snapshot: &ControllerSnapshot, state: &mut PlayerState) -> bool {
    let flags = &snapshot.flags;
    let mut changed = state.movement_mut().set(movement_state(snapshot));
    changed |= state.action_mut().set(action_state(snapshot));

    let modifiers = state.modifiers_mut();
    changed |= modifiers.set(Modifier::EXHAUSTED, flags.dummy);
    changed |= modifiers.set(Modifier::ENCUMBERED, !flags.allow_movement);
    changed |= modifiers.set(Modifier::IN_AIR, flags.on_air && !flags.is_grounded);
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_state::{InteractionProfile, ReactionState};

    fn grounded() -> ControllerSnapshot {
        ControllerSnapshot {
            mode: ControlMode::Tpp,
            flags: ControllerFlags {
                is_grounded: true,
                ..Default::default()
            },
            speed: 0.0,
            gait: Gait::Walking,
        }
    }

    #[test]
    fn test_idle_when_grounded_and_still() {
        assert_eq!(movement_state(&grounded()), MovementState::Idle);
    }

    #[test]
    fn test_jump_versus_fall() {
        let mut snap = grounded();
        snap.flags.is_grounded = false;
        assert_eq!(movement_state(&snap), MovementState::Fall);
        snap.flags.is_jumping = true;
        assert_eq!(movement_state(&snap), MovementState::Jump);
    }

    #[test]
    fn test_land_when_grounded_but_on_air() {
        let mut snap = grounded();
        snap.flags.on_air = true;
        snap.speed = 0.8;
        assert_eq!(movement_state(&snap), MovementState::Land);
    }

    #[test]
    fn test_gait_mapping() {
        let mut snap = grounded();
        snap.speed = 0.7;
        assert_eq!(movement_state(&snap), MovementState::Walk);
        snap.gait = Gait::Running;
        assert_eq!(movement_state(&snap), MovementState::Run);
        snap.gait = Gait::Crouching;
        assert_eq!(movement_state(&snap), MovementState::Walk);
        snap.speed = 0.049;
        assert_eq!(movement_state(&snap), MovementState::Idle);
    }

    #[test]
    fn test_mode_overrides_flags() {
        let mut snap = grounded();
        snap.flags.is_grounded = false;
        snap.mode = ControlMode::Climb;
        assert_eq!(movement_state(&snap), MovementState::Ladder);
        assert_eq!(action_state(&snap), ActionState::Interact);
        snap.mode = ControlMode::Parkour;
        assert_eq!(movement_state(&snap), MovementState::Run);
        assert_eq!(action_state(&snap), ActionState::Interact);
    }

    #[test]
    fn test_vaulting_is_interact() {
        let mut snap = grounded();
        snap.flags.is_vaulting = true;
        assert_eq!(action_state(&snap), ActionState::Interact);
        snap.flags.is_vaulting = false;
        snap.mode = ControlMode::Pause;
        assert_eq!(action_state(&snap), ActionState::None);
    }

    #[test]
    fn test_modifiers_mirror_flags() {
        let mut state = PlayerState::new();
        let mut snap = grounded();
        snap.flags.dummy = true;
        snap.flags.allow_movement = false;
        snap.flags.is_grounded = false;
        snap.flags.on_air = true;
        synchronize(&snap, &mut state);
        let mods = state.modifiers();
        assert!(mods.has(Modifier::EXHAUSTED));
        assert!(mods.has(Modifier::ENCUMBERED));
        assert!(mods.has(Modifier::IN_AIR));
        assert!(!mods.has(Modifier::SNEAKING | Modifier::IN_COMBAT));

        synchronize(&grounded(), &mut state);
        assert!(state.modifiers().current().is_empty());
    }

    #[test]
    fn test_unrelated_state_untouched() {
        let mut state = PlayerState::new();
        state.reaction_mut().set(ReactionState::Dodge);
        state.interaction_mut().set(InteractionProfile::Push);
        state.modifiers_mut().add(Modifier::IN_COMBAT | Modifier::EXHAUSTED);

        synchronize(&grounded(), &mut state);

        assert_eq!(state.reaction().current(), ReactionState::Dodge);
        assert_eq!(state.interaction().current(), InteractionProfile::Push);
        assert!(state.modifiers().has(Modifier::IN_COMBAT));
        assert!(!state.modifiers().has(Modifier::EXHAUSTED));
    }

    #[test]
    fn test_second_pass_is_silent() {
        let mut state = PlayerState::new();
        let mut snap = grounded();
        snap.mode = ControlMode::Climb;
        snap.flags.dummy = true;
        assert!(synchronize(&snap, &mut state));
        let revision = state.revision();
        assert!(!synchronize(&snap, &mut state));
        assert_eq!(state.revision(), revision);
    }
}
