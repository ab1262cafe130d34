//! Orbit camera zoom and the zoom-to-first-person sub-state machine.

use stride_config::OrbitZoomConfig;
use stride_input::ControlInput;

/// Scroll-to-radius scale applied on top of the configured zoom speed.
pub const ZOOM_RATE_SCALE: f32 = 50.0;

/// Radius within this distance of the minimum counts as fully zoomed in.
const MIN_RADIUS_EPSILON: f32 = 0.001;

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Radius-only orbit zoom.
///
/// Both scroll directions apply `radius -= scroll * zoom_speed * dt * 50`,
/// so a positive scroll shrinks the radius and a negative one grows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitZoom {
    radius: f32,
    zoom_speed: f32,
    min_radius: f32,
    max_radius: f32,
}

impl OrbitZoom {
    /// Start at the minimum radius.
    ///
    /// Non-finite bounds fall back to zero, and a maximum below the minimum is
    /// raised to it, so a config that skipped validation still zooms.
    #[must_use]
    pub fn new(config: &OrbitZoomConfig) -> Self {
        let min_radius = finite_or_zero(config.min_radius);
        let max_radius = finite_or_zero(config.max_radius).max(min_radius);
        if min_radius != config.min_radius || max_radius != config.max_radius {
            tracing::warn!(
                min = config.min_radius,
                max = config.max_radius,
                "unusable zoom range, using [{min_radius}, {max_radius}]"
            );
        }
        Self {
            radius: min_radius,
            zoom_speed: finite_or_zero(config.zoom_speed),
            min_radius,
            max_radius,
        }
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[must_use]
    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }

    #[must_use]
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    /// Whether the radius is at its minimum.
    #[must_use]
    pub fn at_min(&self) -> bool {
        self.radius <= self.min_radius + MIN_RADIUS_EPSILON
    }

    /// Snap to the minimum radius.
    pub fn reset_to_min(&mut self) {
        self.radius = self.min_radius;
    }

    fn apply_scroll(&mut self, scroll: f32, dt: f32) {
        self.radius -= scroll * self.zoom_speed * dt * ZOOM_RATE_SCALE;
    }

    fn clamp(&mut self) {
        // `f32::max` drops a NaN radius in favor of the bound.
        self.radius = self.radius.max(self.min_radius).min(self.max_radius);
    }

    /// Plain zoom for one tick. Returns the clamped radius.
    pub fn update(&mut self, input: &ControlInput, dt: f32) -> f32 {
        if input.zoom_in() || input.zoom_out() {
            self.apply_scroll(input.scroll, dt);
        }
        self.clamp();
        self.radius
    }
}

/// Result of one third-person zoom update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomOutcome {
    Stay,
    /// Held at minimum zoom long enough; switch to first person.
    EnterFirstPerson,
}

/// Third-person zoom with the hold-at-minimum first-person entry.
///
/// Scrolling in while already at the minimum radius arms a timer of
/// `transition_delay` seconds. The timer counts down every tick while armed,
/// and a further scroll-in once it reaches zero requests first person. Any
/// scroll-out, or a scroll-in that actually moves the camera, disarms it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSubState {
    orbit: OrbitZoom,
    waiting_for_fpp: bool,
    transition_timer: f32,
    transition_delay: f32,
}

impl ZoomSubState {
    #[must_use]
    pub fn new(config: &OrbitZoomConfig, transition_delay: f32) -> Self {
        Self {
            orbit: OrbitZoom::new(config),
            waiting_for_fpp: false,
            transition_timer: 0.0,
            transition_delay,
        }
    }

    #[must_use]
    pub fn orbit(&self) -> &OrbitZoom {
        &self.orbit
    }

    /// Radius-only access, used while parkour shares the third-person rig.
    pub fn orbit_mut(&mut self) -> &mut OrbitZoom {
        &mut self.orbit
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.orbit.radius
    }

    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.waiting_for_fpp
    }

    #[must_use]
    pub fn transition_timer(&self) -> f32 {
        self.transition_timer
    }

    /// Drop any armed first-person entry. The radius is kept.
    pub fn cancel_waiting(&mut self) {
        self.waiting_for_fpp = false;
        self.transition_timer = 0.0;
    }

    pub fn update(&mut self, input: &ControlInput, dt: f32) -> ZoomOutcome {
        let mut outcome = ZoomOutcome::Stay;

        if input.zoom_in() {
            if self.orbit.at_min() {
                if !self.waiting_for_fpp {
                    self.orbit.reset_to_min();
                    self.waiting_for_fpp = true;
                    self.transition_timer = self.transition_delay;
                } else if self.transition_timer <= 0.0 {
                    outcome = ZoomOutcome::EnterFirstPerson;
                    self.waiting_for_fpp = false;
                }
            } else {
                self.orbit.apply_scroll(input.scroll, dt);
                self.waiting_for_fpp = false;
            }
        }

        if input.zoom_out() {
            self.orbit.apply_scroll(input.scroll, dt);
            self.waiting_for_fpp = false;
        }

        if self.waiting_for_fpp {
            self.transition_timer = (self.transition_timer - dt).max(0.0);
        }

        self.orbit.clamp();
        outcome
    }
}
