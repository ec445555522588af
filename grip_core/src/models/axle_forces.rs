// grip_core/src/models/axle_forces.rs

//! Longitudinal force budget of the two axles for one tick.

use crate::ground::GroundType;
use crate::types::{Axle, PerAxle};
use crate::utils::math::weight;
use crate::vehicle::config::VehicleConfig;

/// Below this forward speed the car counts as standing still.
pub const STANDSTILL_SPEED: f64 = 1.0e-5;

/// Friction limits of the whole car on one ground type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceBudget {
    /// Static grip of a single axle, N. Load is split 50/50 with no weight
    /// transfer.
    pub max_axle_force: f64,
    /// Rolling resistance of the whole car, N.
    pub rolling_force: f64,
    /// Kinetic friction of the whole car once the tires have let go, N.
    pub sliding_force: f64,
}

impl ForceBudget {
    pub fn new(mass: f64, ground: &GroundType) -> Self {
        let weight = weight(mass);
        Self {
            max_axle_force: ground.static_friction * weight * 0.5,
            rolling_force: ground.rolling_friction * weight,
            sliding_force: ground.sliding_friction * weight,
        }
    }
}

/// What the force model needs from the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxleForceInput {
    pub throttle: f64,
    /// Brake demand per axle, `[0, 1]`.
    pub brake: PerAxle<f64>,
    /// Forward speed at the start of the tick.
    pub speed: f64,
    /// Axles already in a slide from an earlier tick.
    pub sliding: PerAxle<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxleForces {
    pub budget: ForceBudget,
    pub gear: usize,
    /// Engine force at the contact patches before the per-axle split.
    pub motor_force: f64,
    /// Net longitudinal force of each axle (drive minus resistance).
    pub axle_force: PerAxle<f64>,
    pub drag_force: f64,
    /// `front + rear + drag`.
    pub forward_force: f64,
    pub blocking: PerAxle<bool>,
    pub spinning: PerAxle<bool>,
}

impl AxleForces {
    pub fn acceleration(&self, mass: f64) -> f64 {
        self.forward_force / mass
    }
}

/// Whether `demand` on one axle asks for more brake force than its tires can
/// hold.
pub fn brake_exceeds_grip(config: &VehicleConfig, budget: &ForceBudget, demand: f64) -> bool {
    config.max_brake_force * demand * 0.5 > budget.max_axle_force
}

/// Splits engine, brake, friction and drag into per-axle forces and decides
/// which axles are blocking (brake beats grip) or spinning (engine beats grip).
pub fn compute_axle_forces(
    config: &VehicleConfig,
    ground: &GroundType,
    input: &AxleForceInput,
) -> AxleForces {
    let budget = ForceBudget::new(config.mass, ground);
    let gear = config.drivetrain.gear_for_speed(input.speed);
    let motor_force = config.motor_force(gear) * input.throttle;
    let moving = input.speed > STANDSTILL_SPEED;

    let mut axle_force = PerAxle::splat(0.0);
    let mut blocking = PerAxle::splat(false);
    let mut spinning = PerAxle::splat(false);

    for axle in Axle::BOTH {
        // --- Drive ---
        let mut drive = motor_force * config.drive.share(axle);
        if drive > budget.max_axle_force {
            *spinning.get_mut(axle) = true;
            drive = budget.sliding_force * 0.5;
        }

        // --- Resistance ---
        let demand = *input.brake.get(axle);
        let sliding = *input.sliding.get(axle);
        let resistance = if demand > 0.0 && !sliding {
            let brake = config.max_brake_force * demand * 0.5;
            if brake_exceeds_grip(config, &budget, demand) && moving {
                *blocking.get_mut(axle) = true;
                budget.sliding_force * 0.5
            } else {
                // Rolling resistance stays on top of the brake so any brake
                // input slows the car at least as much as coasting.
                brake.min(budget.max_axle_force) + budget.rolling_force * 0.5
            }
        } else if sliding {
            budget.sliding_force * 0.5
        } else {
            budget.rolling_force * 0.5
        };

        *axle_force.get_mut(axle) = drive - resistance;
    }

    let drag_force = -config.drag_constant() * input.speed * input.speed;
    let forward_force = axle_force.front + axle_force.rear + drag_force;

    AxleForces {
        budget,
        gear,
        motor_force,
        axle_force,
        drag_force,
        forward_force,
        blocking,
        spinning,
    }
}

/// Explicit Euler step of the forward speed, clamped at zero.
pub fn integrate_speed(speed: f64, acceleration: f64, dt: f64) -> f64 {
    (speed + acceleration * dt).max(0.0)
}

/// Decays the slide momentum under kinetic friction and drag. The result may
/// be negative; the caller treats `<= 0` as the end of the slide.
pub fn decay_slide_speed(
    slide_speed: f64,
    budget: &ForceBudget,
    drag_constant: f64,
    mass: f64,
    dt: f64,
) -> f64 {
    let slide_force = -budget.sliding_force - drag_constant * slide_speed * slide_speed;
    slide_speed + slide_force / mass * dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::G;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn input(throttle: f64, brake: f64, speed: f64) -> AxleForceInput {
        AxleForceInput {
            throttle,
            brake: PerAxle::splat(brake),
            speed,
            sliding: PerAxle::splat(false),
        }
    }

    #[test]
    fn budget_follows_ground_and_mass() {
        let budget = ForceBudget::new(2000.0, &GroundType::road());
        assert_relative_eq!(budget.max_axle_force, 0.8 * 2000.0 * G * 0.5, max_relative = 1e-12);
        assert_relative_eq!(budget.rolling_force, 0.013 * 2000.0 * G, max_relative = 1e-12);
        assert_relative_eq!(budget.sliding_force, 0.5 * 2000.0 * G, max_relative = 1e-12);
    }

    #[test]
    fn coasting_is_rolling_resistance_plus_drag() {
        let config = VehicleConfig::offroad();
        let forces = compute_axle_forces(&config, &GroundType::road(), &input(0.0, 0.0, 10.0));
        let roll = 0.013 * config.mass * G;
        assert_relative_eq!(forces.axle_force.front, -roll * 0.5, max_relative = 1e-12);
        assert_relative_eq!(forces.drag_force, -config.drag_constant() * 100.0, max_relative = 1e-12);
        assert_relative_eq!(
            forces.forward_force,
            -roll - config.drag_constant() * 100.0,
            max_relative = 1e-12
        );
        assert!(!forces.blocking.any() && !forces.spinning.any());
    }

    #[test]
    fn all_wheel_drive_splits_evenly() {
        let config = VehicleConfig::offroad();
        let forces = compute_axle_forces(&config, &GroundType::road(), &input(1.0, 0.0, 0.0));
        assert_relative_eq!(forces.axle_force.front, forces.axle_force.rear, max_relative = 1e-12);
        assert_relative_eq!(
            forces.axle_force.front + forces.axle_force.rear,
            forces.motor_force - 0.013 * config.mass * G,
            max_relative = 1e-12
        );
    }

    #[test]
    fn rear_drive_overpowers_grip_and_spins() {
        let config = VehicleConfig::sport();
        let forces = compute_axle_forces(&config, &GroundType::road(), &input(1.0, 0.0, 0.0));
        assert!(forces.spinning.rear);
        assert!(!forces.spinning.front);
        let budget = forces.budget;
        assert_relative_eq!(
            forces.axle_force.rear,
            budget.sliding_force * 0.5 - budget.rolling_force * 0.5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn hard_braking_on_ice_blocks_both_axles() {
        let config = VehicleConfig::offroad();
        let forces = compute_axle_forces(&config, &GroundType::ice(), &input(0.0, 1.0, 20.0));
        assert!(forces.blocking.front && forces.blocking.rear);
        assert_relative_eq!(forces.axle_force.front, -forces.budget.sliding_force * 0.5);
    }

    #[test]
    fn gentle_braking_stays_within_grip() {
        let config = VehicleConfig::offroad();
        let forces = compute_axle_forces(&config, &GroundType::road(), &input(0.0, 0.2, 20.0));
        assert!(!forces.blocking.any());
        let roll = 0.013 * config.mass * G;
        assert_relative_eq!(
            forces.axle_force.front,
            -(24000.0 * 0.2 * 0.5 + roll * 0.5),
            max_relative = 1e-12
        );
    }

    #[test]
    fn a_car_at_rest_does_not_lock_its_wheels() {
        let config = VehicleConfig::offroad();
        let forces = compute_axle_forces(&config, &GroundType::ice(), &input(0.0, 1.0, 0.0));
        assert!(!forces.blocking.any());
    }

    #[test]
    fn speed_never_goes_negative() {
        assert_abs_diff_eq!(integrate_speed(0.1, -50.0, 1.0 / 60.0), 0.0);
        assert_relative_eq!(integrate_speed(10.0, 6.0, 0.5), 13.0);
    }

    #[test]
    fn slide_speed_decays() {
        let budget = ForceBudget::new(1000.0, &GroundType::ice());
        let next = decay_slide_speed(20.0, &budget, 1.0, 1000.0, 0.1);
        let expected = 20.0 + (-0.05 * 1000.0 * G - 400.0) / 1000.0 * 0.1;
        assert_relative_eq!(next, expected, max_relative = 1e-12);
    }
}
