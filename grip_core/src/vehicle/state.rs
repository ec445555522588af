// grip_core/src/vehicle/state.rs

use crate::types::{PerAxle, Vec2, Vec3};

/// Tire state and bookkeeping for one axle of the bicycle model.
///
/// `blocking` and `spinning` are recomputed every tick. `sliding` and the
/// stored `slide_direction` persist from the tick the axle locks until the
/// shared slide speed has decayed to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxleState {
    pub blocking: bool,
    pub sliding: bool,
    pub spinning: bool,
    /// Unit travel direction frozen when the slide started.
    pub slide_direction: Option<Vec3>,
    /// Axle reference point at ground level.
    pub point: Vec3,
    /// Unit left vector of the axle (the front one follows the steered wheels).
    pub left: Vec3,
    /// Accumulated wheel rotation in degrees, `[0, 360)`.
    pub spin_angle: f64,
    /// `(longitudinal, lateral)` force in N, for the grip-circle readout.
    pub combined_force: Vec2,
    /// Grip budget of this axle on the current ground, N.
    pub max_force: f64,
}

impl AxleState {
    pub fn is_slipping(&self) -> bool {
        self.blocking || self.sliding || self.spinning
    }

    pub(crate) fn recover(&mut self) {
        self.blocking = false;
        self.sliding = false;
        self.spinning = false;
        self.slide_direction = None;
    }
}

/// Kinematic state of one car. Mutated only by [`crate::vehicle::Vehicle`].
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    pub position: Vec3,
    /// Degrees in `[0, 360)`, measured from +X towards +Z.
    pub heading: f64,
    /// Forward (grip) speed in m/s, never negative.
    pub speed: f64,
    /// Speed carried by the slide momentum, m/s.
    pub slide_speed: f64,
    pub gear: usize,
    /// Steering angle actually applied after the grip limit, degrees.
    pub steering_angle: f64,
    pub lateral_force: f64,
    pub axles: PerAxle<AxleState>,
    /// Contact points ordered front-left, front-right, rear-left, rear-right.
    pub wheel_positions: [Vec3; 4],
    /// Cosmetic body rotation `(roll, yaw, pitch)` in degrees.
    pub body_rotation: Vec3,
}

impl VehicleState {
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            heading: 0.0,
            speed: 0.0,
            slide_speed: 0.0,
            gear: 1,
            steering_angle: 0.0,
            lateral_force: 0.0,
            axles: PerAxle::splat(AxleState {
                left: Vec3::new(0.0, 0.0, -1.0),
                ..AxleState::default()
            }),
            wheel_positions: [position; 4],
            body_rotation: Vec3::zeros(),
        }
    }

    pub fn any_sliding(&self) -> bool {
        self.axles.front.sliding || self.axles.rear.sliding
    }

    /// Both axles have let go: the car moves on slide momentum alone.
    pub fn all_sliding(&self) -> bool {
        self.axles.front.sliding && self.axles.rear.sliding
    }
}
