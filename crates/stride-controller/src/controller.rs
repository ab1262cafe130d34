//! The character controller: control-mode state machine and per-mode handling.
//!
//! One [`CharacterController::tick`] runs, in order:
//!
//! 1. advance the delayed show/hide timer,
//! 2. drain reported events into the flags,
//! 3. probe the ground,
//! 4. evaluate mode transitions (first matching rule wins),
//! 5. run the current mode's handler, unless `dummy || !allow_movement`,
//! 6. let the state watcher log any change.
//!
//! The mode only changes through [`CharacterController::set_mode`], which is a
//! no-op for the current mode and otherwise runs exit then enter side effects.

use glam::{Quat, Vec2, Vec3};
use stride_config::Config;
use stride_input::ControlInput;

use crate::collaborators::{
    AnimSignal, CameraRig, ClimbStatus, CollaboratorReport, Collaborators, Gait,
};
use crate::flags::{CharacterEvent, ControllerFlags};
use crate::mode::ControlMode;
use crate::motion;
use crate::sync::ControllerSnapshot;
use crate::visibility::DelayedVisibility;
use crate::watcher::StateWatcher;
use crate::zoom::{OrbitZoom, ZoomOutcome, ZoomSubState};

/// Vertical orbit position used when snapping the third-person camera behind
/// the character.
pub const BEHIND_VERTICAL_AXIS: f32 = 0.31;

/// Stick magnitude above which holding run switches to the run gait.
pub const RUN_INPUT_THRESHOLD: f32 = 0.5;

/// Tuning copied out of [`Config`] at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tuning {
    step_height: f32,
    turn_smooth_time: f32,
    fpp_mouse_sensitivity: f32,
    show_delay: f32,
    hide_delay: f32,
    parkour_radius: f32,
    parkour_layer_mask: u32,
}

impl Tuning {
    fn from_config(config: &Config) -> Self {
        Self {
            step_height: config.controller.step_height,
            turn_smooth_time: config.controller.turn_smooth_time,
            fpp_mouse_sensitivity: config.controller.fpp_mouse_sensitivity,
            show_delay: config.visibility.show_delay,
            hide_delay: config.visibility.hide_delay,
            parkour_radius: config.parkour.detection_radius,
            parkour_layer_mask: config.parkour.layer_mask,
        }
    }
}

/// Drives one character's control mode, camera rigs and locomotion requests.
pub struct CharacterController {
    tuning: Tuning,
    collaborators: Collaborators,
    report: CollaboratorReport,
    mode: ControlMode,
    flags: ControllerFlags,
    tpp_zoom: ZoomSubState,
    climb_zoom: OrbitZoom,
    visibility: DelayedVisibility,
    turn_velocity: f32,
    pending_events: Vec<CharacterEvent>,
    watcher: Option<StateWatcher>,
}

impl CharacterController {
    /// Build a controller in third-person mode.
    ///
    /// Missing collaborators are logged here, once.
    pub fn new(config: &Config, collaborators: Collaborators) -> Self {
        let report = collaborators.report();
        report.log();
        Self {
            tuning: Tuning::from_config(config),
            collaborators,
            report,
            mode: ControlMode::Tpp,
            flags: ControllerFlags::default(),
            tpp_zoom: ZoomSubState::new(&config.tpp_zoom, config.controller.fpp_transition_delay),
            climb_zoom: OrbitZoom::new(&config.climb_zoom),
            visibility: DelayedVisibility::new(),
            turn_velocity: 0.0,
            pending_events: Vec::new(),
            watcher: config.debug.state_watcher.then(StateWatcher::new),
        }
    }

    // --- Read accessors ---

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn flags(&self) -> ControllerFlags {
        self.flags
    }

    pub fn is_grounded(&self) -> bool {
        self.flags.is_grounded
    }

    pub fn on_air(&self) -> bool {
        self.flags.on_air
    }

    pub fn is_jumping(&self) -> bool {
        self.flags.is_jumping
    }

    pub fn is_vaulting(&self) -> bool {
        self.flags.is_vaulting
    }

    pub fn allow_movement(&self) -> bool {
        self.flags.allow_movement
    }

    pub fn dummy(&self) -> bool {
        self.flags.dummy
    }

    pub fn tpp_zoom(&self) -> &ZoomSubState {
        &self.tpp_zoom
    }

    pub fn climb_zoom(&self) -> &OrbitZoom {
        &self.climb_zoom
    }

    pub fn visibility(&self) -> &DelayedVisibility {
        &self.visibility
    }

    pub fn collaborator_report(&self) -> &CollaboratorReport {
        &self.report
    }

    /// Magnitude of the movement driver's velocity, zero without a driver.
    pub fn current_velocity_magnitude(&self) -> f32 {
        self.collaborators
            .movement
            .as_ref()
            .map_or(0.0, |m| m.velocity().length())
    }

    /// State read by the synchronization pass.
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            mode: self.mode,
            flags: self.flags,
            speed: self.current_velocity_magnitude(),
            gait: self.current_gait(),
        }
    }

    // --- Tick ---

    /// Run one logic tick.
    pub fn tick(&mut self, input: &ControlInput, dt: f32) {
        self.advance_visibility(dt);
        self.intake_events();
        self.check_ground();
        self.update_control_mode(input);
        if self.flags.can_move() {
            self.handle_mode(input, dt);
        }
        if let Some(watcher) = self.watcher.as_mut() {
            watcher.observe(self.mode, self.flags);
        }
    }

    /// Queue an event for the next tick's intake.
    pub fn report(&mut self, event: CharacterEvent) {
        self.pending_events.push(event);
    }

    fn intake_events(&mut self) {
        if let Some(movement) = self.collaborators.movement.as_mut() {
            self.pending_events
                .extend(movement.drain_events().into_iter().map(CharacterEvent::from));
        }
        for event in std::mem::take(&mut self.pending_events) {
            if let Some(animation) = self.collaborators.animation.as_mut() {
                match event {
                    CharacterEvent::Landed => animation.on_landed(),
                    CharacterEvent::Fell => animation.on_fall(),
                    CharacterEvent::VaultStarted | CharacterEvent::VaultFinished => {}
                }
            }
            self.flags.apply(event);
        }
    }

    fn check_ground(&mut self) {
        if let Some(ground) = self.collaborators.ground.as_mut() {
            self.flags.is_grounded = ground.is_grounded(self.tuning.step_height);
        }
    }

    fn climb_status(&self) -> Option<ClimbStatus> {
        self.collaborators.climb.as_ref().map(|c| c.status())
    }

    fn parkour_nearby(&self) -> bool {
        match (&self.collaborators.parkour, &self.collaborators.movement) {
            (Some(parkour), Some(movement)) => parkour.query_nearby(
                movement.position(),
                self.tuning.parkour_radius,
                self.tuning.parkour_layer_mask,
            ),
            _ => false,
        }
    }

    fn update_control_mode(&mut self, input: &ControlInput) {
        if input.pause {
            let next = if self.mode == ControlMode::Pause {
                ControlMode::Tpp
            } else {
                ControlMode::Pause
            };
            self.set_mode(next);
            return;
        }

        if self.mode == ControlMode::Pause {
            return;
        }

        if self.mode == ControlMode::Tpp && input.enter_fpp {
            self.set_mode(ControlMode::Fpp);
            return;
        }

        if self.mode == ControlMode::Fpp && input.exit_fpp {
            self.set_mode(ControlMode::Tpp);
            return;
        }

        if let Some(status) = self.climb_status() {
            if status.starts_climb() {
                self.set_mode(ControlMode::Climb);
                return;
            }
            if self.mode == ControlMode::Climb && status.ends_climb() {
                self.set_mode(ControlMode::Tpp);
                return;
            }
        }

        let nearby = self.parkour_nearby();
        match self.mode {
            ControlMode::Tpp | ControlMode::Fpp if nearby => self.set_mode(ControlMode::Parkour),
            ControlMode::Parkour if !nearby => self.set_mode(ControlMode::Tpp),
            _ => {}
        }
    }

    // --- Mode switching ---

    /// Switch modes. Does nothing if `mode` is already current.
    pub fn set_mode(&mut self, mode: ControlMode) {
        if self.mode == mode {
            return;
        }
        let previous = self.mode;
        self.exit_mode(previous);
        self.mode = mode;
        self.enter_mode(mode);
        tracing::info!(from = %previous, to = %mode, "control mode changed");
    }

    fn enter_mode(&mut self, mode: ControlMode) {
        tracing::debug!(mode = %mode, "entering mode");
        if mode != ControlMode::Pause {
            self.deactivate_rigs();
        }
        match mode {
            ControlMode::Tpp | ControlMode::Parkour => {
                self.show_character(true);
                self.force_camera_behind();
                self.activate_rig(CameraRig::ThirdPerson);
            }
            ControlMode::Fpp => {
                self.show_character(false);
                self.activate_rig(CameraRig::FirstPerson);
            }
            ControlMode::Climb => {
                self.show_character(true);
                self.activate_rig(CameraRig::Climb);
            }
            ControlMode::Pause => self.flags.allow_movement = false,
        }
    }

    fn exit_mode(&mut self, mode: ControlMode) {
        tracing::debug!(mode = %mode, "leaving mode");
        match mode {
            ControlMode::Pause => self.flags.allow_movement = true,
            ControlMode::Tpp => self.tpp_zoom.cancel_waiting(),
            ControlMode::Fpp | ControlMode::Climb | ControlMode::Parkour => {}
        }
    }

    // --- Cameras and visibility ---

    fn deactivate_rigs(&mut self) {
        if let Some(cameras) = self.collaborators.cameras.as_mut() {
            for rig in CameraRig::ALL {
                cameras.set_active(rig, false);
            }
        }
    }

    fn activate_rig(&mut self, rig: CameraRig) {
        if let Some(cameras) = self.collaborators.cameras.as_mut() {
            cameras.set_active(rig, true);
        }
    }

    fn push_radius(&mut self, rig: CameraRig, radius: f32) {
        if let Some(cameras) = self.collaborators.cameras.as_mut() {
            cameras.set_orbit_radius(rig, radius);
        }
    }

    fn camera_yaw(&self) -> f32 {
        self.collaborators
            .cameras
            .as_ref()
            .map_or(0.0, |c| c.main_camera_yaw())
    }

    fn character_heading(&self) -> f32 {
        self.collaborators
            .movement
            .as_ref()
            .map_or(0.0, |m| m.heading())
    }

    /// Snap the third-person orbit behind the character at minimum radius.
    fn force_camera_behind(&mut self) {
        self.tpp_zoom.orbit_mut().reset_to_min();
        let heading = self.character_heading();
        let radius = self.tpp_zoom.radius();
        if let Some(cameras) = self.collaborators.cameras.as_mut() {
            cameras.set_heading(CameraRig::ThirdPerson, heading);
            cameras.set_vertical_axis(CameraRig::ThirdPerson, BEHIND_VERTICAL_AXIS);
            cameras.set_orbit_radius(CameraRig::ThirdPerson, radius);
        }
    }

    fn show_character(&mut self, visible: bool) {
        let delay = if visible {
            self.tuning.show_delay
        } else {
            self.tuning.hide_delay
        };
        if let Some(now) = self.visibility.request(visible, delay) {
            self.apply_visibility(now);
        }
    }

    fn advance_visibility(&mut self, dt: f32) {
        if let Some(visible) = self.visibility.advance(dt) {
            self.apply_visibility(visible);
        }
    }

    fn apply_visibility(&mut self, visible: bool) {
        tracing::debug!(visible, "character visibility");
        if let Some(visual) = self.collaborators.visual.as_mut() {
            visual.set_visible(visible);
        }
    }

    // --- Per-mode handling ---

    fn handle_mode(&mut self, input: &ControlInput, dt: f32) {
        match self.mode {
            ControlMode::Tpp => self.handle_tpp(input, dt),
            ControlMode::Fpp => self.handle_fpp(input, dt),
            ControlMode::Climb => self.handle_climb(input, dt),
            ControlMode::Parkour => self.handle_parkour(input, dt),
            ControlMode::Pause => {}
        }
    }

    fn handle_tpp(&mut self, input: &ControlInput, dt: f32) {
        let outcome = self.tpp_zoom.update(input, dt);
        self.push_radius(CameraRig::ThirdPerson, self.tpp_zoom.radius());
        if outcome == ZoomOutcome::EnterFirstPerson {
            self.set_mode(ControlMode::Fpp);
            return;
        }

        self.add_movement_input_basic(input.movement, dt);
        if input.jump {
            self.dispatch_jump();
        }
        self.update_gait(input);
    }

    fn handle_fpp(&mut self, input: &ControlInput, dt: f32) {
        let translation = self.ground_movement_fpp(input.movement);
        self.set_velocity(translation.clamp_length_max(1.0));
        self.update_gait(input);
        self.rotate_fpp(input.mouse_x, dt);

        if input.zoom_out() {
            self.set_mode(ControlMode::Tpp);
        }
    }

    fn handle_climb(&mut self, input: &ControlInput, dt: f32) {
        let radius = self.climb_zoom.update(input, dt);
        self.push_radius(CameraRig::Climb, radius);
        self.add_movement_input(input.movement, dt);
        self.update_gait(input);
    }

    fn handle_parkour(&mut self, input: &ControlInput, dt: f32) {
        let radius = self.tpp_zoom.orbit_mut().update(input, dt);
        self.push_radius(CameraRig::ThirdPerson, radius);
        self.add_movement_input(input.movement, dt);
        self.update_gait(input);
    }

    fn update_gait(&mut self, input: &ControlInput) {
        if input.run && input.movement.length() > RUN_INPUT_THRESHOLD {
            self.toggle_run();
        } else {
            self.toggle_walk();
        }
    }

    fn dispatch_jump(&mut self) {
        if let Some(jump) = self.collaborators.jump.as_mut()
            && jump.basic_jump()
        {
            self.flags.is_jumping = true;
        }
    }

    // --- Movement ---

    fn set_velocity(&mut self, velocity: Vec3) {
        if let Some(movement) = self.collaborators.movement.as_mut() {
            movement.set_velocity(velocity);
        }
    }

    fn set_signal(&mut self, signal: AnimSignal, value: bool) {
        if let Some(animation) = self.collaborators.animation.as_mut() {
            animation.set_signal(signal, value);
        }
    }

    fn current_gait(&self) -> Gait {
        self.collaborators
            .movement
            .as_ref()
            .map_or(Gait::Walking, |m| m.gait())
    }

    /// Camera-relative movement used by climb and parkour.
    fn add_movement_input(&mut self, direction: Vec2, dt: f32) {
        let translation = self.ground_movement(direction, dt);
        self.set_velocity(translation.clamp_length_max(1.0));
    }

    /// Third-person movement: keeps the vertical velocity while airborne.
    fn add_movement_input_basic(&mut self, direction: Vec2, dt: f32) {
        let mut translation = self.ground_movement(direction, dt);
        if (self.flags.is_jumping || self.flags.on_air)
            && let Some(movement) = self.collaborators.movement.as_ref()
        {
            translation.y = movement.velocity().y;
        }
        self.set_velocity(translation.clamp_length_max(1.0));
    }

    fn ground_movement(&mut self, input: Vec2, dt: f32) -> Vec3 {
        let translation = motion::planar_translation(input, self.camera_yaw());
        if translation.length() > 0.0 {
            self.rotate_toward_input(input, dt);
            self.set_signal(AnimSignal::Released, false);
        } else {
            self.toggle_walk();
            self.set_signal(AnimSignal::Released, true);
        }
        translation
    }

    fn ground_movement_fpp(&mut self, input: Vec2) -> Vec3 {
        let translation = motion::planar_translation(input, self.character_heading());
        if translation.length() > 0.0 {
            self.set_signal(AnimSignal::Released, false);
        } else {
            self.toggle_walk();
            self.set_signal(AnimSignal::Released, true);
        }
        translation
    }

    fn rotate_toward_input(&mut self, input: Vec2, dt: f32) {
        let target = motion::input_heading(input) + self.camera_yaw();
        let smooth_time = self.tuning.turn_smooth_time;
        if let Some(movement) = self.collaborators.movement.as_mut() {
            let heading = motion::smooth_damp_angle(
                movement.heading(),
                target,
                &mut self.turn_velocity,
                smooth_time,
                dt,
            );
            movement.set_heading(motion::wrap_degrees(heading));
        }
    }

    fn rotate_fpp(&mut self, mouse_x: f32, dt: f32) {
        if mouse_x == 0.0 {
            return;
        }
        let delta = mouse_x * self.tuning.fpp_mouse_sensitivity * dt;
        if let Some(movement) = self.collaborators.movement.as_mut() {
            let heading = movement.heading();
            movement.set_heading(motion::wrap_degrees(heading + delta));
        }
    }

    /// Heading that faces `direction` as seen from the main camera.
    pub fn rotate_to_camera_direction(&self, direction: Vec3) -> Quat {
        motion::heading_rotation(motion::direction_heading(direction) + self.camera_yaw())
    }

    /// Reset the driver's target speed.
    pub fn reset_movement(&mut self) {
        if let Some(movement) = self.collaborators.movement.as_mut() {
            movement.reset_speed();
        }
    }

    /// Switch to the run gait if not already running.
    pub fn toggle_run(&mut self) {
        if self.current_gait() != Gait::Running {
            if let Some(movement) = self.collaborators.movement.as_mut() {
                movement.set_gait(Gait::Running);
            }
            self.set_signal(AnimSignal::Run, true);
        }
    }

    /// Switch to the walk gait if not already walking.
    pub fn toggle_walk(&mut self) {
        if self.current_gait() != Gait::Walking {
            if let Some(movement) = self.collaborators.movement.as_mut() {
                movement.set_gait(Gait::Walking);
            }
            self.set_signal(AnimSignal::Run, false);
        }
    }

    // --- External control ---

    /// Hand the character over to scripted control.
    pub fn disable_controller(&mut self) {
        if let Some(movement) = self.collaborators.movement.as_mut() {
            movement.set_kinematic(true);
            movement.set_feet_ik(false);
        }
        if let Some(climb) = self.collaborators.climb.as_mut() {
            climb.set_enabled(false);
        }
        self.flags.dummy = true;
        self.flags.allow_movement = false;
        tracing::debug!("controller disabled");
    }

    /// Return the character to player control.
    pub fn enable_controller(&mut self) {
        if let Some(movement) = self.collaborators.movement.as_mut() {
            movement.set_kinematic(false);
            movement.set_feet_ik(true);
            movement.apply_gravity();
            movement.resume_motion();
        }
        if let Some(climb) = self.collaborators.climb.as_mut() {
            climb.set_enabled(true);
        }
        self.flags.dummy = false;
        self.flags.allow_movement = true;
        tracing::debug!("controller enabled");
    }
}

impl std::fmt::Debug for CharacterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterController")
            .field("mode", &self.mode)
            .field("flags", &self.flags)
            .field("tpp_zoom", &self.tpp_zoom)
            .field("climb_zoom", &self.climb_zoom)
            .field("collaborators", &self.collaborators)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
