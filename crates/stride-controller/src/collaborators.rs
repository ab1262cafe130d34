//! Interfaces to the systems the controller drives but does not own.
//!
//! Physics integration, IK, raycasting, climb solving and camera rig internals
//! live elsewhere. The controller sees each of them through one narrow trait
//! and holds them in [`Collaborators`]. Any of them may be absent: the report
//! built at construction names what is missing, and the behavior that depends
//! on a missing collaborator becomes a no-op.

use glam::Vec3;

use crate::flags::MovementEvent;

/// Locomotion gait tracked by the movement driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Gait {
    #[default]
    Walking,
    Running,
    Crouching,
}

/// Ground probe.
pub trait GroundDetector {
    /// Whether there is ground within `probe_height` below the character.
    fn is_grounded(&mut self, probe_height: f32) -> bool;
}

/// Physics-side character mover.
///
/// Headings are degrees about +Y, zero facing +Z, increasing toward +X.
pub trait MovementDriver {
    fn velocity(&self) -> Vec3;
    /// Target velocity for the next physics step, already clamped to length 1.
    fn set_velocity(&mut self, velocity: Vec3);
    fn gait(&self) -> Gait;
    /// Switch gait, also switching the driver's target speed.
    fn set_gait(&mut self, gait: Gait);
    fn reset_speed(&mut self);
    fn set_kinematic(&mut self, kinematic: bool);
    fn set_feet_ik(&mut self, enabled: bool);
    fn apply_gravity(&mut self);
    /// Clear any stop-motion hold.
    fn resume_motion(&mut self);
    fn position(&self) -> Vec3;
    fn heading(&self) -> f32;
    fn set_heading(&mut self, heading: f32);
    /// Landing/falling events since the last call, oldest first.
    fn drain_events(&mut self) -> Vec<MovementEvent>;
}

/// Named boolean animation parameters the controller writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimSignal {
    Run,
    Released,
}

impl AnimSignal {
    /// Parameter name in the animator.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AnimSignal::Run => "Run",
            AnimSignal::Released => "Released",
        }
    }
}

/// Animation state sink.
pub trait AnimationSink {
    fn set_signal(&mut self, signal: AnimSignal, value: bool);
    fn on_landed(&mut self);
    fn on_fall(&mut self);
}

/// Climb solver phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClimbState {
    #[default]
    None,
    Hanging,
    Shimmying,
    Climbing,
}

/// What the climb solver reports each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClimbStatus {
    /// Moving toward a detected ledge.
    pub to_ledge: bool,
    /// Attached to a ledge.
    pub on_ledge: bool,
    pub climb_state: ClimbState,
    pub active: bool,
}

impl ClimbStatus {
    /// Conditions under which the controller switches into climbing.
    #[must_use]
    pub fn starts_climb(&self) -> bool {
        self.to_ledge || (self.climb_state != ClimbState::None && self.active)
    }

    /// Conditions under which climbing ends.
    #[must_use]
    pub fn ends_climb(&self) -> bool {
        self.climb_state == ClimbState::None && !self.to_ledge && !self.on_ledge
    }
}

/// Climb solver.
pub trait ClimbProbe {
    fn status(&self) -> ClimbStatus;
    /// Enabled/disabled together with the controller.
    fn set_enabled(&mut self, enabled: bool);
}

/// Sphere query for parkour-interactable objects.
pub trait ParkourQuery {
    fn query_nearby(&self, position: Vec3, radius: f32, layer_mask: u32) -> bool;
}

/// Per-mode camera rigs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraRig {
    ThirdPerson,
    FirstPerson,
    Climb,
}

impl CameraRig {
    pub const ALL: [CameraRig; 3] = [
        CameraRig::ThirdPerson,
        CameraRig::FirstPerson,
        CameraRig::Climb,
    ];
}

/// Camera rig control.
pub trait CameraRigs {
    fn set_active(&mut self, rig: CameraRig, active: bool);
    fn set_orbit_radius(&mut self, rig: CameraRig, radius: f32);
    /// Orbit heading in degrees.
    fn set_heading(&mut self, rig: CameraRig, heading: f32);
    /// Normalized vertical orbit position, 0 bottom to 1 top.
    fn set_vertical_axis(&mut self, rig: CameraRig, value: f32);
    /// Yaw of the rendering camera in degrees.
    fn main_camera_yaw(&self) -> f32;
}

/// The character's renderable body.
pub trait CharacterVisual {
    fn set_visible(&mut self, visible: bool);
}

/// Jump execution.
pub trait JumpAction {
    /// Attempt a jump. Returns `true` if one started.
    fn basic_jump(&mut self) -> bool;
}

/// Identifies one collaborator slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollaboratorKind {
    Ground,
    Movement,
    Animation,
    Climb,
    Parkour,
    Cameras,
    Visual,
    Jump,
}

impl CollaboratorKind {
    /// Without these the controller cannot do its core job.
    #[must_use]
    pub fn is_required(self) -> bool {
        matches!(
            self,
            CollaboratorKind::Ground
                | CollaboratorKind::Movement
                | CollaboratorKind::Animation
                | CollaboratorKind::Climb
                | CollaboratorKind::Cameras
        )
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CollaboratorKind::Ground => "ground detector",
            CollaboratorKind::Movement => "movement driver",
            CollaboratorKind::Animation => "animation sink",
            CollaboratorKind::Climb => "climb probe",
            CollaboratorKind::Parkour => "parkour probe",
            CollaboratorKind::Cameras => "camera rigs",
            CollaboratorKind::Visual => "character visual",
            CollaboratorKind::Jump => "jump action",
        }
    }
}

/// Which collaborator slots were empty at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollaboratorReport {
    pub missing: Vec<CollaboratorKind>,
}

impl CollaboratorReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    #[must_use]
    pub fn is_missing(&self, kind: CollaboratorKind) -> bool {
        self.missing.contains(&kind)
    }

    /// Emit one log line per missing collaborator.
    pub fn log(&self) {
        for kind in &self.missing {
            if kind.is_required() {
                tracing::error!(collaborator = kind.name(), "missing collaborator, behavior disabled");
            } else {
                tracing::warn!(collaborator = kind.name(), "missing optional collaborator");
            }
        }
    }
}

/// The set of collaborators handed to the controller.
#[derive(Default)]
pub struct Collaborators {
    pub ground: Option<Box<dyn GroundDetector>>,
    pub movement: Option<Box<dyn MovementDriver>>,
    pub animation: Option<Box<dyn AnimationSink>>,
    pub climb: Option<Box<dyn ClimbProbe>>,
    pub parkour: Option<Box<dyn ParkourQuery>>,
    pub cameras: Option<Box<dyn CameraRigs>>,
    pub visual: Option<Box<dyn CharacterVisual>>,
    pub jump: Option<Box<dyn JumpAction>>,
}

impl Collaborators {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ground(mut self, ground: impl GroundDetector + 'static) -> Self {
        self.ground = Some(Box::new(ground));
        self
    }

    #[must_use]
    pub fn with_movement(mut self, movement: impl MovementDriver + 'static) -> Self {
        self.movement = Some(Box::new(movement));
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: impl AnimationSink + 'static) -> Self {
        self.animation = Some(Box::new(animation));
        self
    }

    #[must_use]
    pub fn with_climb(mut self, climb: impl ClimbProbe + 'static) -> Self {
        self.climb = Some(Box::new(climb));
        self
    }

    #[must_use]
    pub fn with_parkour(mut self, parkour: impl ParkourQuery + 'static) -> Self {
        self.parkour = Some(Box::new(parkour));
        self
    }

    #[must_use]
    pub fn with_cameras(mut self, cameras: impl CameraRigs + 'static) -> Self {
        self.cameras = Some(Box::new(cameras));
        self
    }

    #[must_use]
    pub fn with_visual(mut self, visual: impl CharacterVisual + 'static) -> Self {
        self.visual = Some(Box::new(visual));
        self
    }

    #[must_use]
    pub fn with_jump(mut self, jump: impl JumpAction + 'static) -> Self {
        self.jump = Some(Box::new(jump));
        self
    }

    /// List the empty slots.
    #[must_use]
    pub fn report(&self) -> CollaboratorReport {
        let slots = [
            (CollaboratorKind::Ground, self.ground.is_some()),
            (CollaboratorKind::Movement, self.movement.is_some()),
            (CollaboratorKind::Animation, self.animation.is_some()),
            (CollaboratorKind::Climb, self.climb.is_some()),
            (CollaboratorKind::Parkour, self.parkour.is_some()),
            (CollaboratorKind::Cameras, self.cameras.is_some()),
            (CollaboratorKind::Visual, self.visual.is_some()),
            (CollaboratorKind::Jump, self.jump.is_some()),
        ];
        CollaboratorReport {
            missing: slots
                .into_iter()
                .filter(|(_, present)| !present)
                .map(|(kind, _)| kind)
                .collect(),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("missing", &self.report().missing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysGrounded;

    impl GroundDetector for AlwaysGrounded {
        fn is_grounded(&mut self, _probe_height: f32) -> bool {
            true
        }
    }

    #[test]
    fn test_empty_set_reports_everything_missing() {
        let report = Collaborators::new().report();
        assert_eq!(report.missing.len(), 8);
        assert!(report.is_missing(CollaboratorKind::Climb));
    }

    #[test]
    fn test_report_lists_only_missing() {
        let report = Collaborators::new().with_ground(AlwaysGrounded).report();
        assert!(!report.is_missing(CollaboratorKind::Ground));
        assert!(report.is_missing(CollaboratorKind::Movement));
        assert!(!report.is_complete());
    }

    #[test]
    fn test_climb_start_and_end_conditions() {
        let idle = ClimbStatus::default();
        assert!(!idle.starts_climb());
        assert!(idle.ends_climb());

        let to_ledge = ClimbStatus {
            to_ledge: true,
            ..Default::default()
        };
        assert!(to_ledge.starts_climb());
        assert!(!to_ledge.ends_climb());

        let inactive_hang = ClimbStatus {
            climb_state: ClimbState::Hanging,
            active: false,
            ..Default::default()
        };
        assert!(!inactive_hang.starts_climb());
        assert!(!inactive_hang.ends_climb());

        let on_ledge_only = ClimbStatus {
            on_ledge: true,
            ..Default::default()
        };
        assert!(!on_ledge_only.ends_climb());
    }

    #[test]
    fn test_signal_names() {
        assert_eq!(AnimSignal::Run.name(), "Run");
        assert_eq!(AnimSignal::Released.name(), "Released");
    }
}
