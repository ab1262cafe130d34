//! In-memory collaborators backed by one shared [`SimState`].
//!
//! [`SimWorld::collaborators`] hands the controller a full [`Collaborators`]
//! set whose members all read and write the same state, so a test or the demo
//! can poke the world (drop the ground, start a climb, move the camera) and
//! inspect what the controller asked for (velocity, rigs, signals).

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use glam::Vec3;

use crate::collaborators::{
    AnimSignal, AnimationSink, CameraRig, CameraRigs, CharacterVisual, ClimbProbe, ClimbStatus,
    Collaborators, Gait, GroundDetector, JumpAction, MovementDriver, ParkourQuery,
};
use crate::flags::MovementEvent;
use crate::parkour::ParkourProximityProbe;

/// Speed in meters per second for each gait when integrating position.
pub const WALK_SPEED: f32 = 2.0;
pub const RUN_SPEED: f32 = 5.0;
pub const CROUCH_SPEED: f32 = 1.0;

/// Everything the simulated collaborators observe and record.
#[derive(Debug, Clone)]
pub struct SimState {
    pub grounded: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    pub heading: f32,
    pub gait: Gait,
    pub kinematic: bool,
    pub feet_ik: bool,
    pub gravity_applications: u32,
    pub motion_resumes: u32,
    pub speed_resets: u32,
    pub events: Vec<MovementEvent>,
    pub signals: HashMap<AnimSignal, bool>,
    pub landings: u32,
    pub falls: u32,
    pub climb: ClimbStatus,
    pub climb_enabled: bool,
    pub parkour: ParkourProximityProbe,
    pub active_rigs: HashSet<CameraRig>,
    pub rig_radius: HashMap<CameraRig, f32>,
    pub rig_heading: HashMap<CameraRig, f32>,
    pub rig_vertical_axis: HashMap<CameraRig, f32>,
    pub camera_yaw: f32,
    pub visible: bool,
    pub visibility_changes: u32,
    /// Whether `basic_jump` succeeds.
    pub can_jump: bool,
    pub jumps: u32,
    /// Ticks left before a started jump lands.
    pub airborne_ticks: u32,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            grounded: true,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            heading: 0.0,
            gait: Gait::Walking,
            kinematic: false,
            feet_ik: true,
            gravity_applications: 0,
            motion_resumes: 0,
            speed_resets: 0,
            events: Vec::new(),
            signals: HashMap::new(),
            landings: 0,
            falls: 0,
            climb: ClimbStatus::default(),
            climb_enabled: true,
            parkour: ParkourProximityProbe::new(),
            active_rigs: HashSet::from([CameraRig::ThirdPerson]),
            rig_radius: HashMap::new(),
            rig_heading: HashMap::new(),
            rig_vertical_axis: HashMap::new(),
            camera_yaw: 0.0,
            visible: true,
            visibility_changes: 0,
            can_jump: true,
            jumps: 0,
            airborne_ticks: 0,
        }
    }
}

impl SimState {
    pub fn signal(&self, signal: AnimSignal) -> Option<bool> {
        self.signals.get(&signal).copied()
    }

    pub fn is_rig_active(&self, rig: CameraRig) -> bool {
        self.active_rigs.contains(&rig)
    }

    pub fn radius(&self, rig: CameraRig) -> Option<f32> {
        self.rig_radius.get(&rig).copied()
    }
}

/// Shared handle to a simulated world.
#[derive(Debug, Clone, Default)]
pub struct SimWorld {
    state: Rc<RefCell<SimState>>,
}

impl SimWorld {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(state: SimState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn state(&self) -> Ref<'_, SimState> {
        self.state.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, SimState> {
        self.state.borrow_mut()
    }

    /// A complete collaborator set over this world.
    #[must_use]
    pub fn collaborators(&self) -> Collaborators {
        Collaborators::new()
            .with_ground(self.handle())
            .with_movement(self.handle())
            .with_animation(self.handle())
            .with_climb(self.handle())
            .with_parkour(self.handle())
            .with_cameras(self.handle())
            .with_visual(self.handle())
            .with_jump(self.handle())
    }

    fn handle(&self) -> SimHandle {
        SimHandle(Rc::clone(&self.state))
    }

    /// Advance the toy physics: integrate position and resolve jumps.
    pub fn step(&self, dt: f32) {
        let mut state = self.state.borrow_mut();
        if !state.kinematic {
            let speed = match state.gait {
                Gait::Walking => WALK_SPEED,
                Gait::Running => RUN_SPEED,
                Gait::Crouching => CROUCH_SPEED,
            };
            let planar = Vec3::new(state.velocity.x, 0.0, state.velocity.z);
            state.position += planar * speed * dt;
        }
        if state.airborne_ticks > 0 {
            state.airborne_ticks -= 1;
            if state.airborne_ticks == 0 {
                state.grounded = true;
                state.events.push(MovementEvent::Landed);
            }
        }
    }
}

/// One view onto the shared state, implementing every collaborator trait.
#[derive(Debug, Clone)]
pub struct SimHandle(Rc<RefCell<SimState>>);

impl GroundDetector for SimHandle {
    fn is_grounded(&mut self, _probe_height: f32) -> bool {
        self.0.borrow().grounded
    }
}

impl MovementDriver for SimHandle {
    fn velocity(&self) -> Vec3 {
        self.0.borrow().velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.0.borrow_mut().velocity = velocity;
    }

    fn gait(&self) -> Gait {
        self.0.borrow().gait
    }

    fn set_gait(&mut self, gait: Gait) {
        self.0.borrow_mut().gait = gait;
    }

    fn reset_speed(&mut self) {
        let mut state = self.0.borrow_mut();
        state.velocity = Vec3::ZERO;
        state.speed_resets += 1;
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        self.0.borrow_mut().kinematic = kinematic;
    }

    fn set_feet_ik(&mut self, enabled: bool) {
        self.0.borrow_mut().feet_ik = enabled;
    }

    fn apply_gravity(&mut self) {
        self.0.borrow_mut().gravity_applications += 1;
    }

    fn resume_motion(&mut self) {
        self.0.borrow_mut().motion_resumes += 1;
    }

    fn position(&self) -> Vec3 {
        self.0.borrow().position
    }

    fn heading(&self) -> f32 {
        self.0.borrow().heading
    }

    fn set_heading(&mut self, heading: f32) {
        self.0.borrow_mut().heading = heading;
    }

    fn drain_events(&mut self) -> Vec<MovementEvent> {
        std::mem::take(&mut self.0.borrow_mut().events)
    }
}

impl AnimationSink for SimHandle {
    fn set_signal(&mut self, signal: AnimSignal, value: bool) {
        self.0.borrow_mut().signals.insert(signal, value);
    }

    fn on_landed(&mut self) {
        self.0.borrow_mut().landings += 1;
    }

    fn on_fall(&mut self) {
        self.0.borrow_mut().falls += 1;
    }
}

impl ClimbProbe for SimHandle {
    fn status(&self) -> ClimbStatus {
        let state = self.0.borrow();
        if state.climb_enabled {
            state.climb
        } else {
            ClimbStatus::default()
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().climb_enabled = enabled;
    }
}

impl ParkourQuery for SimHandle {
    fn query_nearby(&self, position: Vec3, radius: f32, layer_mask: u32) -> bool {
        self.0.borrow().parkour.query_nearby(position, radius, layer_mask)
    }
}

impl CameraRigs for SimHandle {
    fn set_active(&mut self, rig: CameraRig, active: bool) {
        let mut state = self.0.borrow_mut();
        if active {
            state.active_rigs.insert(rig);
        } else {
            state.active_rigs.remove(&rig);
        }
    }

    fn set_orbit_radius(&mut self, rig: CameraRig, radius: f32) {
        self.0.borrow_mut().rig_radius.insert(rig, radius);
    }

    fn set_heading(&mut self, rig: CameraRig, heading: f32) {
        self.0.borrow_mut().rig_heading.insert(rig, heading);
    }

    fn set_vertical_axis(&mut self, rig: CameraRig, value: f32) {
        self.0.borrow_mut().rig_vertical_axis.insert(rig, value);
    }

    fn main_camera_yaw(&self) -> f32 {
        self.0.borrow().camera_yaw
    }
}

impl CharacterVisual for SimHandle {
    fn set_visible(&mut self, visible: bool) {
        let mut state = self.0.borrow_mut();
        state.visible = visible;
        state.visibility_changes += 1;
    }
}

impl JumpAction for SimHandle {
    fn basic_jump(&mut self) -> bool {
        let mut state = self.0.borrow_mut();
        if !state.can_jump || !state.grounded {
            return false;
        }
        state.jumps += 1;
        state.grounded = false;
        state.airborne_ticks = 30;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_share_state() {
        let world = SimWorld::new();
        let mut collaborators = world.collaborators();
        assert!(collaborators.report().is_complete());

        if let Some(movement) = collaborators.movement.as_mut() {
            movement.set_velocity(Vec3::X);
        }
        assert_eq!(world.state().velocity, Vec3::X);

        world.state_mut().grounded = false;
        let grounded = collaborators
            .ground
            .as_mut()
            .map(|g| g.is_grounded(0.8));
        assert_eq!(grounded, Some(false));
    }

    #[test]
    fn test_jump_lands_after_airborne_ticks() {
        let world = SimWorld::new();
        let mut handle = world.handle();
        assert!(handle.basic_jump());
        assert!(!handle.basic_jump());
        for _ in 0..30 {
            world.step(1.0 / 60.0);
        }
        assert!(world.state().grounded);
        assert_eq!(handle.drain_events(), vec![MovementEvent::Landed]);
    }

    #[test]
    fn test_step_integrates_by_gait() {
        let world = SimWorld::new();
        world.state_mut().velocity = Vec3::Z;
        world.step(0.5);
        assert_eq!(world.state().position, Vec3::new(0.0, 0.0, 1.0));
        world.state_mut().gait = Gait::Running;
        world.step(0.5);
        assert_eq!(world.state().position, Vec3::new(0.0, 0.0, 3.5));
    }

    #[test]
    fn test_disabled_climb_reports_nothing() {
        let world = SimWorld::new();
        world.state_mut().climb.to_ledge = true;
        let mut handle = world.handle();
        assert!(handle.status().starts_climb());
        handle.set_enabled(false);
        assert!(!handle.status().starts_climb());
    }
}
