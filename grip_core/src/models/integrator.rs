// grip_core/src/models/integrator.rs

//! Two-point ("bicycle") position and heading update.
//!
//! Each axle is a point half a wheelbase from the body origin. Every tick both
//! points travel along their own effective direction, then the body is placed
//! halfway between them and pointed from the rear point to the front one.

use std::f64::consts::PI;

use crate::types::{Axle, PerAxle, Vec3};
use crate::utils::math::wrap_degrees;
use crate::vehicle::config::VehicleConfig;
use crate::vehicle::state::VehicleState;

/// Unit forward and left vectors on the ground plane for a heading in
/// degrees. Heading 0 faces +X and grows towards +Z; left is `up × forward`.
pub fn direction_vectors(heading_deg: f64) -> (Vec3, Vec3) {
    let (sin, cos) = heading_deg.to_radians().sin_cos();
    let forward = Vec3::new(cos, 0.0, sin);
    let left = Vec3::y().cross(&forward);
    (forward, left)
}

/// Axle reference points (at ground level) for the current body pose.
pub fn axle_points(position: &Vec3, heading_deg: f64, half_wheelbase: f64) -> PerAxle<Vec3> {
    let (forward, _) = direction_vectors(heading_deg);
    let origin = Vec3::new(position.x, 0.0, position.z);
    PerAxle::new(origin + forward * half_wheelbase, origin - forward * half_wheelbase)
}

/// Contact points ordered front-left, front-right, rear-left, rear-right.
pub fn wheel_contacts(
    points: &PerAxle<Vec3>,
    lefts: &PerAxle<Vec3>,
    half_track: f64,
    wheel_radius: f64,
) -> [Vec3; 4] {
    let lift = Vec3::new(0.0, wheel_radius, 0.0);
    [
        points.front + lefts.front * half_track + lift,
        points.front - lefts.front * half_track + lift,
        points.rear + lefts.rear * half_track + lift,
        points.rear - lefts.rear * half_track + lift,
    ]
}

/// Moves both axle points one tick and re-derives position, heading and wheel
/// contacts.
///
/// An axle that is blocking without a stored slide direction starts a slide
/// here and freezes its travel direction.
///
/// While only one axle slides, the car keeps a single forward speed: the
/// gripping axle rolls along its wheels and the sliding one is dragged along
/// its frozen direction at that same speed. Once both axles slide, the
/// forward speed from the start of the tick is handed over to the slide
/// speed and both axles ride on it. Returns which axles started a slide.
pub fn advance(
    state: &mut VehicleState,
    config: &VehicleConfig,
    steering_input: f64,
    speed_at_tick_start: f64,
    dt: f64,
) -> PerAxle<bool> {
    let (body_forward, body_left) = direction_vectors(state.heading);
    let (front_forward, front_left) = direction_vectors(state.heading - state.steering_angle);
    let grip_direction = PerAxle::new(front_forward, body_forward);

    let mut started = PerAxle::splat(false);
    for axle in Axle::BOTH {
        let axle_state = state.axles.get_mut(axle);
        if !axle_state.blocking || axle_state.slide_direction.is_some() {
            continue;
        }
        let direction = match axle {
            Axle::Front => (body_forward + body_left * steering_input * 0.5).normalize(),
            Axle::Rear => body_forward,
        };
        axle_state.sliding = true;
        axle_state.slide_direction = Some(direction);
        *started.get_mut(axle) = true;
    }

    let full_slide = state.all_sliding();
    if full_slide && started.any() {
        state.slide_speed = state.slide_speed.max(speed_at_tick_start);
        state.speed = 0.0;
    }

    // --- Travel ---
    let speed = state.speed;
    let slide_speed = state.slide_speed;
    let mut travel = PerAxle::splat(Vec3::zeros());
    for axle in Axle::BOTH {
        let axle_state = state.axles.get(axle);
        let grip = *grip_direction.get(axle) * speed;
        let velocity = match axle_state.slide_direction {
            Some(direction) if !full_slide => direction * speed,
            Some(direction) if axle_state.blocking => direction * slide_speed,
            Some(direction) => direction * slide_speed + grip,
            None => grip,
        };
        *travel.get_mut(axle) = velocity * dt;
    }

    let mut points = axle_points(&state.position, state.heading, config.half_wheelbase());
    points.front += travel.front;
    points.rear += travel.rear;

    // --- Pose ---
    let shift = (travel.front + travel.rear) * 0.5;
    state.position.x += shift.x;
    state.position.z += shift.z;
    state.position.y = config.ride_height();

    let span = points.front - points.rear;
    state.heading = wrap_degrees(span.z.atan2(span.x).to_degrees());

    // --- Wheels ---
    let lefts = PerAxle::new(front_left, body_left);
    state.wheel_positions =
        wheel_contacts(&points, &lefts, config.half_track(), config.wheel_radius);
    for axle in Axle::BOTH {
        let axle_state = state.axles.get_mut(axle);
        axle_state.point = *points.get(axle);
        axle_state.left = *lefts.get(axle);
    }

    started
}

/// Wheel rotation for one tick, degrees. Rolling forward turns the wheel
/// negatively; a locked wheel does not turn and a spinning one turns
/// `spin_multiplier` times faster than it rolls.
pub fn spin_delta(
    speed: f64,
    dt: f64,
    wheel_radius: f64,
    blocking: bool,
    spinning: bool,
    spin_multiplier: f64,
) -> f64 {
    if blocking {
        return 0.0;
    }
    let rolled = -(speed * dt) / (2.0 * PI * wheel_radius) * 360.0;
    if spinning {
        rolled * spin_multiplier
    } else {
        rolled
    }
}

/// Fake weight shift for the body mesh: pitch from the pedals and roll from
/// speed times steering. Returned as `(roll, yaw, pitch)` in degrees with yaw
/// `-heading`. Purely cosmetic.
pub fn body_rotation(
    mass: f64,
    throttle: f64,
    brake: f64,
    steering_input: f64,
    speed: f64,
    heading: f64,
) -> Vec3 {
    let max_pitch = 3.0 * mass * 0.001 * 0.5;
    let max_roll = 4.0 * mass * 0.001 * 0.5;
    let pitch = (throttle - brake) * max_pitch;
    let roll = (speed / 4.0).min(max_roll) * steering_input;
    Vec3::new(roll, -heading, pitch)
}
