//! Character control: the control-mode state machine, per-mode locomotion and
//! camera handling, and the synchronization pass that derives player state.
//!
//! The controller never touches physics, animation or cameras directly. It
//! talks to them through the traits in [`collaborators`]; [`sim`] provides an
//! in-memory implementation of all of them.

pub mod character;
pub mod collaborators;
pub mod controller;
pub mod flags;
pub mod mode;
pub mod motion;
pub mod parkour;
pub mod sim;
pub mod sync;
pub mod visibility;
pub mod watcher;
pub mod zoom;

pub use character::Character;
pub use collaborators::{
    AnimSignal, AnimationSink, CameraRig, CameraRigs, CharacterVisual, ClimbProbe, ClimbState,
    ClimbStatus, CollaboratorKind, CollaboratorReport, Collaborators, Gait, GroundDetector,
    JumpAction, MovementDriver, ParkourQuery,
};
pub use controller::{BEHIND_VERTICAL_AXIS, CharacterController, RUN_INPUT_THRESHOLD};
pub use flags::{CharacterEvent, ControllerFlags, MovementEvent};
pub use mode::ControlMode;
pub use parkour::{ParkourObject, ParkourProximityProbe, ParkourTag};
pub use sim::{SimHandle, SimState, SimWorld};
pub use sync::{ControllerSnapshot, IDLE_SPEED_THRESHOLD, synchronize};
pub use visibility::DelayedVisibility;
pub use watcher::StateWatcher;
pub use zoom::{OrbitZoom, ZoomOutcome, ZoomSubState};
