// grip_core/src/vehicle/telemetry.rs

use std::sync::Arc;

use crate::ground::GroundType;
use crate::types::{PerAxle, Vec2, Vec3};

/// Per-axle readout for the force/grip-circle gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxleTelemetry {
    /// `(longitudinal, lateral)` in N.
    pub combined_force: Vec2,
    pub max_force: f64,
    pub blocking: bool,
    pub sliding: bool,
    pub spinning: bool,
    /// `|combined_force| / max_force`; above 1 the axle is past its grip.
    pub grip_utilization: f64,
}

impl AxleTelemetry {
    pub fn is_slipping(&self) -> bool {
        self.blocking || self.sliding || self.spinning
    }
}

pub(crate) fn grip_utilization(combined_force: &Vec2, max_force: f64) -> f64 {
    let magnitude = combined_force.norm();
    if magnitude == 0.0 {
        0.0
    } else if max_force > 0.0 {
        magnitude / max_force
    } else {
        f64::INFINITY
    }
}

/// Snapshot of everything the HUD shows.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleTelemetry {
    /// m/s
    pub speed: f64,
    pub speed_kmh: f64,
    pub slide_speed: f64,
    pub gear: usize,
    pub heading: f64,
    pub steering_angle: f64,
    pub lateral_force: f64,
    pub ground: Arc<GroundType>,
    pub axles: PerAxle<AxleTelemetry>,
}

/// Pose of one wheel mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelVisual {
    pub position: Vec3,
    /// Degrees; zero on the rear axle.
    pub steer_angle: f64,
    /// Accumulated rotation, degrees.
    pub spin_angle: f64,
}

/// A tire mark left by a slipping wheel this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SkidMark {
    pub position: Vec3,
    pub heading: f64,
    pub ground: Arc<GroundType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn utilization_handles_zero_cases() {
        assert_eq!(grip_utilization(&Vec2::zeros(), 0.0), 0.0);
        assert_eq!(grip_utilization(&Vec2::new(1.0, 0.0), 0.0), f64::INFINITY);
        assert_relative_eq!(grip_utilization(&Vec2::new(300.0, -400.0), 1000.0), 0.5);
    }
}
