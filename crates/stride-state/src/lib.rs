//! Derived player state: movement, action, reaction, modifier, and interaction
//! holders consumed by animation and gameplay systems.

pub mod holder;
pub mod modifiers;
pub mod player;
pub mod states;

pub use holder::StateCell;
pub use modifiers::{Modifier, ModifierSet};
pub use player::PlayerState;
pub use states::{ActionState, InteractionProfile, MovementState, ReactionState};
