// grip_core/src/models/steering.rs

use crate::models::axle_forces::STANDSTILL_SPEED;

/// Inputs of the grip-limited steering search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringParams {
    pub mass: f64,
    pub wheelbase: f64,
    /// Degrees at full input.
    pub max_angle: f64,
    /// Decrement per search iteration, degrees.
    pub step: f64,
    /// Grip budget of the front axle, N.
    pub max_front_force: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringResult {
    /// Applied steering angle, degrees. Same sign as the input.
    pub angle: f64,
    /// Centripetal force the turn demands from the whole car, N.
    pub lateral_force: f64,
    /// How many times the angle was reduced.
    pub iterations: u32,
}

/// `wheelbase / sin(angle)`; `None` when driving straight.
pub fn turn_radius(wheelbase: f64, angle_deg: f64) -> Option<f64> {
    let sin = angle_deg.to_radians().sin();
    (sin != 0.0).then(|| wheelbase / sin)
}

/// `m * v² / R`, zero on a straight line.
pub fn lateral_force(mass: f64, speed: f64, wheelbase: f64, angle_deg: f64) -> f64 {
    turn_radius(wheelbase, angle_deg).map_or(0.0, |radius| mass * speed * speed / radius)
}

/// Maps a steering input to an angle, backing the angle off in fixed steps
/// until the front axle can carry its half of the cornering force. This is
/// what makes the car understeer at speed.
pub fn limit_steering(input: f64, speed: f64, params: &SteeringParams) -> SteeringResult {
    let mut angle = input * params.max_angle;

    if input == 0.0 || speed < STANDSTILL_SPEED {
        return SteeringResult {
            angle,
            lateral_force: 0.0,
            iterations: 0,
        };
    }

    let mut lateral = lateral_force(params.mass, speed, params.wheelbase, angle);
    let mut iterations = 0;
    while lateral.abs() * 0.5 > params.max_front_force && angle != 0.0 {
        angle = angle.signum() * (angle.abs() - params.step).max(0.0);
        lateral = lateral_force(params.mass, speed, params.wheelbase, angle);
        iterations += 1;
    }

    SteeringResult {
        angle,
        lateral_force: lateral,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> SteeringParams {
        SteeringParams {
            mass: 1490.0,
            wheelbase: 2.45,
            max_angle: 28.5,
            step: 0.1,
            // Road, 0.8 static friction.
            max_front_force: 0.8 * 1490.0 * 9.81 * 0.5,
        }
    }

    #[test]
    fn straight_ahead_has_no_radius() {
        assert_eq!(turn_radius(2.45, 0.0), None);
        assert_relative_eq!(turn_radius(2.0, 30.0).unwrap(), 4.0, max_relative = 1e-12);
        assert_eq!(lateral_force(1000.0, 30.0, 2.45, 0.0), 0.0);
    }

    #[test]
    fn standing_still_keeps_the_naive_angle() {
        let result = limit_steering(-0.5, 0.0, &params());
        assert_relative_eq!(result.angle, -14.25);
        assert_eq!(result.lateral_force, 0.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn slow_corners_are_not_limited() {
        let result = limit_steering(1.0, 2.0, &params());
        assert_relative_eq!(result.angle, 28.5);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn fast_corners_are_clamped_to_grip() {
        let p = params();
        let result = limit_steering(1.0, 30.0, &p);
        assert!(result.angle < p.max_angle);
        assert!(result.angle > 0.0);
        assert!(result.iterations > 0);
        assert!(result.lateral_force.abs() * 0.5 <= p.max_front_force);

        // One step wider would have broken traction.
        let wider = lateral_force(p.mass, 30.0, p.wheelbase, result.angle + p.step);
        assert!(wider.abs() * 0.5 > p.max_front_force);
    }

    #[test]
    fn clamping_is_symmetric() {
        let p = params();
        let left = limit_steering(1.0, 30.0, &p);
        let right = limit_steering(-1.0, 30.0, &p);
        assert_relative_eq!(left.angle, -right.angle);
        assert_eq!(left.iterations, right.iterations);
    }

    #[test]
    fn zero_grip_steers_straight() {
        let p = SteeringParams {
            max_front_force: 0.0,
            ..params()
        };
        let result = limit_steering(1.0, 10.0, &p);
        assert_eq!(result.angle, 0.0);
        assert_eq!(result.lateral_force, 0.0);
    }
}
