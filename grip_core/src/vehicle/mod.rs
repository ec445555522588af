// grip_core/src/vehicle/mod.rs

//! The vehicle entity: configuration, current ground and kinematic state,
//! advanced one tick at a time by [`Vehicle::update`].

pub mod config;
pub mod input;
pub mod state;
pub mod telemetry;


use std::sync::Arc;

use tracing::debug;

use crate::error::ConfigError;
use crate::ground::{GroundType, TerrainProvider};
use crate::models::axle_forces::{
    brake_exceeds_grip, compute_axle_forces, decay_slide_speed, integrate_speed, AxleForceInput,
    STANDSTILL_SPEED,
};
use crate::models::integrator::{self, axle_points, direction_vectors, wheel_contacts};
use crate::models::steering::{limit_steering, SteeringParams};
use crate::types::{Axle, PerAxle, Vec2, Vec3};
use crate::utils::math::{mps_to_kmh, wrap_degrees};

use self::config::VehicleConfig;
use self::input::DriverInput;
use self::state::VehicleState;
use self::telemetry::{grip_utilization, AxleTelemetry, SkidMark, VehicleTelemetry, WheelVisual};

/// One simulated car.
///
/// All getters copy out. The only ways to change the state are the explicit
/// setters and [`Vehicle::update`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Component))]
pub struct Vehicle {
    config: VehicleConfig,
    ground: Arc<GroundType>,
    state: VehicleState,
    diagnostics: bool,
}

impl Vehicle {
    /// Validates `config` and places the car at rest at `position`, facing +X.
    /// The height of `position` is replaced by the ride height.
    pub fn new(
        config: VehicleConfig,
        position: Vec3,
        ground: Arc<GroundType>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        ground.validate()?;

        let mut vehicle = Self {
            state: VehicleState::at_rest(position),
            config,
            ground,
            diagnostics: false,
        };
        vehicle.place();
        Ok(vehicle)
    }

    // --- Accessors ---

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn ground(&self) -> Arc<GroundType> {
        Arc::clone(&self.ground)
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn heading(&self) -> f64 {
        self.state.heading
    }

    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    pub fn slide_speed(&self) -> f64 {
        self.state.slide_speed
    }

    pub fn gear(&self) -> usize {
        self.state.gear
    }

    pub fn steering_angle(&self) -> f64 {
        self.state.steering_angle
    }

    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    // --- Mutation ---

    /// Turns debug logging of ground changes and slide transitions on or off.
    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.diagnostics = enabled;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.state.position = position;
        self.place();
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.state.position += offset;
        self.place();
    }

    pub fn set_heading(&mut self, heading_deg: f64) {
        self.state.heading = wrap_degrees(heading_deg);
        self.place();
    }

    /// Sets the forward speed; negative values read as zero.
    pub fn set_speed(&mut self, speed: f64) {
        self.state.speed = speed.max(0.0);
    }

    /// Swaps the ground the car is on. Takes effect on the next force
    /// computation.
    pub fn set_ground(&mut self, ground: Arc<GroundType>) {
        if Arc::ptr_eq(&self.ground, &ground) {
            return;
        }
        if self.diagnostics {
            debug!(
                ground = %ground.name,
                rolling_friction = ground.rolling_friction,
                sliding_friction = ground.sliding_friction,
                static_friction = ground.static_friction,
                "ground changed"
            );
        }
        self.ground = ground;
    }

    /// Re-derives axle points and wheel contacts from position and heading,
    /// keeping the body at ride height.
    fn place(&mut self) {
        self.state.position.y = self.config.ride_height();
        let points = axle_points(
            &self.state.position,
            self.state.heading,
            self.config.half_wheelbase(),
        );
        let (_, body_left) = direction_vectors(self.state.heading);
        let (_, front_left) = direction_vectors(self.state.heading - self.state.steering_angle);
        let lefts = PerAxle::new(front_left, body_left);
        self.state.wheel_positions = wheel_contacts(
            &points,
            &lefts,
            self.config.half_track(),
            self.config.wheel_radius,
        );
        for axle in Axle::BOTH {
            let axle_state = self.state.axles.get_mut(axle);
            axle_state.point = *points.get(axle);
            axle_state.left = *lefts.get(axle);
        }
    }

    // --- Simulation ---

    /// Looks up the ground under the car, then ticks.
    pub fn update_on<T>(&mut self, terrain: &T, input: &DriverInput, dt: f64)
    where
        T: TerrainProvider + ?Sized,
    {
        let ground = terrain.ground_at(&self.state.position);
        self.set_ground(ground);
        self.update(input, dt);
    }

    /// Advances the car by `dt` seconds.
    ///
    /// Order: axle forces, speed, slide decay and recovery, grip-limited
    /// steering, then the two-axle integrator.
    pub fn update(&mut self, input: &DriverInput, dt: f64) {
        debug_assert!(dt.is_finite() && dt >= 0.0, "dt must be finite and >= 0");
        let input = input.clamped();
        let config = &self.config;
        let state = &mut self.state;

        let speed_at_tick_start = state.speed;
        let sliding = PerAxle::new(state.axles.front.sliding, state.axles.rear.sliding);
        let brake = PerAxle::new(input.brake, input.rear_brake());

        // 1. Longitudinal forces and per-axle flags.
        let forces = compute_axle_forces(
            config,
            &self.ground,
            &AxleForceInput {
                throttle: input.throttle,
                brake,
                speed: speed_at_tick_start,
                sliding,
            },
        );
        state.gear = forces.gear;
        for axle in Axle::BOTH {
            let axle_state = state.axles.get_mut(axle);
            axle_state.blocking = *forces.blocking.get(axle);
            axle_state.spinning = *forces.spinning.get(axle);
            axle_state.max_force = forces.budget.max_axle_force;
        }

        // 2. Speed.
        state.speed = integrate_speed(state.speed, forces.acceleration(config.mass), dt);

        // 3. Slide momentum, or a single locked axle letting go.
        if sliding.all() {
            state.slide_speed = decay_slide_speed(
                state.slide_speed,
                &forces.budget,
                config.drag_constant(),
                config.mass,
                dt,
            );
            if state.slide_speed <= 0.0 {
                state.slide_speed = 0.0;
                state.axles.front.recover();
                state.axles.rear.recover();
                if self.diagnostics {
                    debug!(ground = %self.ground.name, "slide recovered");
                }
            }
        } else if sliding.any() {
            for axle in Axle::BOTH {
                let held = brake_exceeds_grip(config, &forces.budget, *brake.get(axle))
                    && state.speed > STANDSTILL_SPEED;
                if *sliding.get(axle) && !held {
                    state.axles.get_mut(axle).recover();
                    if self.diagnostics {
                        debug!(?axle, ground = %self.ground.name, "axle regained grip");
                    }
                }
            }
        }

        // 4. Steering.
        let steering = limit_steering(
            input.steering,
            state.speed,
            &SteeringParams {
                mass: config.mass,
                wheelbase: config.wheelbase,
                max_angle: config.max_steering_angle,
                step: config.steering_step_deg,
                max_front_force: forces.budget.max_axle_force,
            },
        );
        state.steering_angle = steering.angle;
        state.lateral_force = steering.lateral_force;
        for axle in Axle::BOTH {
            state.axles.get_mut(axle).combined_force =
                Vec2::new(*forces.axle_force.get(axle), -steering.lateral_force * 0.5);
        }

        // 5. Position, heading and wheels.
        let started =
            integrator::advance(state, config, input.steering, speed_at_tick_start, dt);
        if self.diagnostics && started.any() {
            debug!(
                front = started.front,
                rear = started.rear,
                slide_speed = state.slide_speed,
                ground = %self.ground.name,
                "slide started"
            );
        }

        // A lone sliding axle is held by its brake.
        let full_slide = state.all_sliding();
        for axle in Axle::BOTH {
            let axle_state = state.axles.get_mut(axle);
            let locked = axle_state.blocking || (axle_state.sliding && !full_slide);
            let delta = integrator::spin_delta(
                state.speed,
                dt,
                config.wheel_radius,
                locked,
                axle_state.spinning,
                config.spin_visual_multiplier,
            );
            axle_state.spin_angle = wrap_degrees(axle_state.spin_angle + delta);
        }

        state.body_rotation = integrator::body_rotation(
            config.mass,
            input.throttle,
            input.brake,
            input.steering,
            state.speed,
            state.heading,
        );
    }

    // --- Outputs ---

    pub fn telemetry(&self) -> VehicleTelemetry {
        let axles = self.state.axles.map(|axle| AxleTelemetry {
            combined_force: axle.combined_force,
            max_force: axle.max_force,
            blocking: axle.blocking,
            sliding: axle.sliding,
            spinning: axle.spinning,
            grip_utilization: grip_utilization(&axle.combined_force, axle.max_force),
        });
        VehicleTelemetry {
            speed: self.state.speed,
            speed_kmh: mps_to_kmh(self.state.speed),
            slide_speed: self.state.slide_speed,
            gear: self.state.gear,
            heading: self.state.heading,
            steering_angle: self.state.steering_angle,
            lateral_force: self.state.lateral_force,
            ground: self.ground(),
            axles,
        }
    }

    /// Wheel poses ordered front-left, front-right, rear-left, rear-right.
    pub fn wheels(&self) -> [WheelVisual; 4] {
        let front = &self.state.axles.front;
        let rear = &self.state.axles.rear;
        let p = self.state.wheel_positions;
        let steer = self.state.steering_angle;
        [
            WheelVisual {
                position: p[0],
                steer_angle: steer,
                spin_angle: front.spin_angle,
            },
            WheelVisual {
                position: p[1],
                steer_angle: steer,
                spin_angle: front.spin_angle,
            },
            WheelVisual {
                position: p[2],
                steer_angle: 0.0,
                spin_angle: rear.spin_angle,
            },
            WheelVisual {
                position: p[3],
                steer_angle: 0.0,
                spin_angle: rear.spin_angle,
            },
        ]
    }

    /// Cosmetic `(roll, yaw, pitch)` for the body mesh, degrees.
    pub fn body_rotation(&self) -> Vec3 {
        self.state.body_rotation
    }

    /// One mark per wheel on every axle that is blocking, sliding or spinning.
    pub fn skid_marks(&self) -> Vec<SkidMark> {
        let slipping = [
            self.state.axles.front.is_slipping(),
            self.state.axles.front.is_slipping(),
            self.state.axles.rear.is_slipping(),
            self.state.axles.rear.is_slipping(),
        ];
        self.state
            .wheel_positions
            .iter()
            .zip(slipping)
            .filter(|(_, slipping)| *slipping)
            .map(|(position, _)| SkidMark {
                position: *position,
                heading: self.state.heading,
                ground: self.ground(),
            })
            .collect()
    }
}
