//! Planar movement math and smooth-damped turning.
//!
//! Headings are degrees about +Y, zero facing +Z, increasing toward +X. With
//! that convention a heading `h` has forward `(sin h, 0, cos h)` and right
//! `(cos h, 0, -sin h)`.

use glam::{Quat, Vec2, Vec3};

/// Forward and right unit vectors on the ground plane for a heading.
#[must_use]
pub fn heading_axes(heading: f32) -> (Vec3, Vec3) {
    let (sin, cos) = heading.to_radians().sin_cos();
    (Vec3::new(sin, 0.0, cos), Vec3::new(cos, 0.0, -sin))
}

/// Ground-plane translation for a stick vector relative to `heading`.
///
/// `input.y` moves along forward and `input.x` along right. The result is not
/// normalized.
#[must_use]
pub fn planar_translation(input: Vec2, heading: f32) -> Vec3 {
    let (forward, right) = heading_axes(heading);
    let mut translation = forward * input.y + right * input.x;
    translation.y = 0.0;
    translation
}

/// Heading of a stick vector relative to its own frame, in degrees.
#[must_use]
pub fn input_heading(input: Vec2) -> f32 {
    input.x.atan2(input.y).to_degrees()
}

/// Heading of a direction vector projected on the ground plane.
#[must_use]
pub fn direction_heading(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z).to_degrees()
}

/// Rotation about +Y for a heading.
#[must_use]
pub fn heading_rotation(heading: f32) -> Quat {
    Quat::from_rotation_y(heading.to_radians())
}

/// Wrap into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed difference `target - current`, in `(-180, 180]`.
#[must_use]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` carries between calls. Reaches the target in roughly
/// `smooth_time` seconds and never overshoots it.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// [`smooth_damp`] for angles in degrees, taking the short way around.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_zero_heading_axes() {
        let (forward, right) = heading_axes(0.0);
        assert!(approx(forward, Vec3::Z));
        assert!(approx(right, Vec3::X));
    }

    #[test]
    fn test_quarter_turn_axes() {
        let (forward, right) = heading_axes(90.0);
        assert!(approx(forward, Vec3::X));
        assert!(approx(right, Vec3::NEG_Z));
    }

    #[test]
    fn test_planar_translation_follows_heading() {
        let t = planar_translation(Vec2::new(0.0, 1.0), 90.0);
        assert!(approx(t, Vec3::X));
        let t = planar_translation(Vec2::new(1.0, 1.0), 0.0);
        assert!(approx(t, Vec3::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_heading_rotation_maps_forward() {
        let q = heading_rotation(90.0);
        assert!(approx(q * Vec3::Z, Vec3::X));
    }

    #[test]
    fn test_input_heading() {
        assert!((input_heading(Vec2::new(1.0, 0.0)) - 90.0).abs() < EPS);
        assert!((input_heading(Vec2::new(0.0, -1.0)).abs() - 180.0).abs() < EPS);
        assert!((direction_heading(Vec3::new(-1.0, 0.0, 0.0)) + 90.0).abs() < EPS);
    }

    #[test]
    fn test_delta_angle_takes_short_way() {
        assert!((delta_angle(350.0, 10.0) - 20.0).abs() < EPS);
        assert!((delta_angle(10.0, 350.0) + 20.0).abs() < EPS);
        assert!((delta_angle(0.0, 180.0) - 180.0).abs() < EPS);
    }

    #[test]
    fn test_wrap_degrees() {
        assert!((wrap_degrees(-90.0) - 270.0).abs() < EPS);
        assert!((wrap_degrees(725.0) - 5.0).abs() < EPS);
        assert!(wrap_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn test_smooth_damp_converges_without_overshoot() {
        let mut velocity = 0.0;
        let mut value = 0.0;
        for _ in 0..120 {
            value = smooth_damp(value, 90.0, &mut velocity, 0.1, 1.0 / 60.0);
            assert!(value <= 90.0);
        }
        assert!((value - 90.0).abs() < 0.01, "got {value}");
    }

    #[test]
    fn test_smooth_damp_angle_wraps() {
        let mut velocity = 0.0;
        let mut value = 350.0;
        for _ in 0..120 {
            value = smooth_damp_angle(value, 10.0, &mut velocity, 0.1, 1.0 / 60.0);
        }
        assert!((wrap_degrees(value) - 10.0).abs() < 0.01, "got {value}");
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut velocity = 3.0;
        assert_eq!(smooth_damp(5.0, 10.0, &mut velocity, 0.1, 0.0), 5.0);
        assert_eq!(velocity, 3.0);
    }
}
