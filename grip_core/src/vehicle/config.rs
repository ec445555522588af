// grip_core/src/vehicle/config.rs

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, ConfigError};
use crate::models::drivetrain::DriveTrain;
use crate::models::engine::Engine;
use crate::types::Axle;
use crate::utils::math::drag_constant;

/// Body shape inputs for the quadratic drag term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Aerodynamics {
    /// Drag coefficient `c_w` (dimensionless).
    pub drag_area_coefficient: f64,
    /// Frontal area in m².
    pub frontal_area: f64,
}

impl Aerodynamics {
    /// `c` in `F_drag = -c * v²`.
    pub fn drag_constant(&self) -> f64 {
        drag_constant(self.drag_area_coefficient, self.frontal_area)
    }
}

/// Which axles receive engine force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriveLayout {
    pub front: bool,
    pub rear: bool,
}

impl DriveLayout {
    pub const ALL_WHEEL: Self = Self {
        front: true,
        rear: true,
    };
    pub const FRONT_WHEEL: Self = Self {
        front: true,
        rear: false,
    };
    pub const REAR_WHEEL: Self = Self {
        front: false,
        rear: true,
    };

    pub fn drives(&self, axle: Axle) -> bool {
        match axle {
            Axle::Front => self.front,
            Axle::Rear => self.rear,
        }
    }

    /// Fraction of the motor force delivered to `axle`.
    pub fn share(&self, axle: Axle) -> f64 {
        match (self.drives(axle), self.front && self.rear) {
            (false, _) => 0.0,
            (true, true) => 0.5,
            (true, false) => 1.0,
        }
    }
}

fn default_drive_rpm() -> f64 {
    5000.0
}

fn default_steering_step() -> f64 {
    0.1
}

fn default_spin_multiplier() -> f64 {
    4.0
}

/// Immutable description of one car. Validated once by [`VehicleConfig::validate`]
/// (which [`crate::vehicle::Vehicle::new`] calls) and never touched by the tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfig {
    /// kg
    pub mass: f64,
    /// Distance between the axles in m.
    pub wheelbase: f64,
    pub track_width: f64,
    pub wheel_radius: f64,
    /// Body height above the wheel centres; stands in for a suspension model.
    pub suspension_offset: f64,
    /// Degrees at full steering input.
    pub max_steering_angle: f64,
    /// Total brake force in N, split evenly between the axles.
    pub max_brake_force: f64,
    pub aero: Aerodynamics,
    pub engine: Engine,
    pub drivetrain: DriveTrain,
    pub drive: DriveLayout,
    /// Fixed engine speed used for the force lookup. There is no clutch or
    /// flywheel model.
    #[serde(default = "default_drive_rpm")]
    pub drive_rpm: f64,
    /// Decrement (degrees) of the grip-limited steering search.
    #[serde(default = "default_steering_step")]
    pub steering_step_deg: f64,
    /// How much faster a wheelspinning wheel turns than a rolling one.
    #[serde(default = "default_spin_multiplier")]
    pub spin_visual_multiplier: f64,
}

impl VehicleConfig {
    /// Heavy all-wheel-drive off-roader.
    pub fn offroad() -> Self {
        Self {
            mass: 2450.0,
            wheelbase: 3.2,
            track_width: 1.57,
            wheel_radius: 0.43,
            suspension_offset: 0.1,
            max_steering_angle: 32.5,
            max_brake_force: 24000.0,
            aero: Aerodynamics {
                drag_area_coefficient: 0.41,
                frontal_area: 2.75,
            },
            engine: Engine::preset(
                800.0,
                6400.0,
                &[0.0, 395.0, 435.0, 455.0, 480.0, 470.0, 395.0, 300.0],
            ),
            drivetrain: DriveTrain::preset(0.7, 3.42, &[-2.90, 2.66, 1.78, 1.30, 1.0, 0.74, 0.50]),
            drive: DriveLayout::ALL_WHEEL,
            drive_rpm: default_drive_rpm(),
            steering_step_deg: default_steering_step(),
            spin_visual_multiplier: default_spin_multiplier(),
        }
    }

    /// Light rear-wheel-drive sports car.
    pub fn sport() -> Self {
        Self {
            mass: 1490.0,
            wheelbase: 2.45,
            track_width: 1.6,
            wheel_radius: 0.3,
            suspension_offset: -0.15,
            max_steering_angle: 28.5,
            max_brake_force: 24000.0,
            aero: Aerodynamics {
                drag_area_coefficient: 0.42,
                frontal_area: 1.95,
            },
            engine: Engine::preset(
                800.0,
                6900.0,
                &[0.0, 250.0, 400.0, 445.0, 465.0, 500.0, 490.0, 460.0],
            ),
            drivetrain: DriveTrain::preset(0.7, 4.09, &[-2.13, 2.27, 1.77, 1.31, 0.99, 0.78, 0.78]),
            drive: DriveLayout::REAR_WHEEL,
            drive_rpm: default_drive_rpm(),
            steering_step_deg: default_steering_step(),
            spin_visual_multiplier: default_spin_multiplier(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("mass", self.mass)?;
        ensure_positive("wheelbase", self.wheelbase)?;
        ensure_positive("track_width", self.track_width)?;
        ensure_positive("wheel_radius", self.wheel_radius)?;
        ensure_finite("suspension_offset", self.suspension_offset)?;
        ensure_non_negative("max_steering_angle", self.max_steering_angle)?;
        ensure_non_negative("max_brake_force", self.max_brake_force)?;
        ensure_non_negative("aero.drag_area_coefficient", self.aero.drag_area_coefficient)?;
        ensure_non_negative("aero.frontal_area", self.aero.frontal_area)?;
        ensure_positive("drive_rpm", self.drive_rpm)?;
        ensure_positive("steering_step_deg", self.steering_step_deg)?;
        ensure_non_negative("spin_visual_multiplier", self.spin_visual_multiplier)?;
        if !self.drive.front && !self.drive.rear {
            return Err(ConfigError::NoDrivenAxle);
        }
        Ok(())
    }

    pub fn half_wheelbase(&self) -> f64 {
        self.wheelbase * 0.5
    }

    pub fn half_track(&self) -> f64 {
        self.track_width * 0.5
    }

    pub fn drag_constant(&self) -> f64 {
        self.aero.drag_constant()
    }

    /// Resting height of the body origin.
    pub fn ride_height(&self) -> f64 {
        self.wheel_radius + self.suspension_offset
    }

    /// Total engine force at the contact patches for `gear` at full throttle.
    pub fn motor_force(&self, gear: usize) -> f64 {
        let torque = self.engine.torque(self.drive_rpm);
        self.drivetrain.wheel_force(torque, gear, self.wheel_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn presets_pass_validation() {
        for config in [VehicleConfig::offroad(), VehicleConfig::sport()] {
            config.validate().unwrap();
            Engine::new(
                config.engine.idle_rpm(),
                config.engine.max_rpm(),
                config.engine.torque_chart().to_vec(),
            )
            .unwrap();
            DriveTrain::new(
                config.drivetrain.efficiency(),
                config.drivetrain.diff_ratio(),
                config.drivetrain.gear_ratios().to_vec(),
            )
            .unwrap();
        }
    }

    #[test]
    fn drive_layout_shares() {
        assert_relative_eq!(DriveLayout::ALL_WHEEL.share(Axle::Front), 0.5);
        assert_relative_eq!(DriveLayout::ALL_WHEEL.share(Axle::Rear), 0.5);
        assert_relative_eq!(DriveLayout::REAR_WHEEL.share(Axle::Front), 0.0);
        assert_relative_eq!(DriveLayout::REAR_WHEEL.share(Axle::Rear), 1.0);
        assert_relative_eq!(DriveLayout::FRONT_WHEEL.share(Axle::Front), 1.0);
    }

    #[test]
    fn derived_quantities() {
        let config = VehicleConfig::offroad();
        assert_relative_eq!(config.drag_constant(), 0.5 * 0.41 * 2.75 * 1.29, epsilon = 1e-12);
        assert_relative_eq!(config.ride_height(), 0.53, epsilon = 1e-12);
        // 470 Nm at 5000 rpm through first gear.
        let expected = 470.0 * 2.66 * 3.42 * 0.7 / 0.43;
        assert_relative_eq!(config.motor_force(1), expected, max_relative = 1e-12);
    }

    #[test]
    fn validation_errors() {
        let mut config = VehicleConfig::sport();
        config.mass = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "mass", .. })
        ));

        let mut config = VehicleConfig::sport();
        config.wheelbase = -1.0;
        assert!(config.validate().is_err());

        let mut config = VehicleConfig::sport();
        config.drive = DriveLayout {
            front: false,
            rear: false,
        };
        assert_eq!(config.validate(), Err(ConfigError::NoDrivenAxle));

        let mut config = VehicleConfig::offroad();
        config.steering_step_deg = 0.0;
        assert!(config.validate().is_err());

        let mut config = VehicleConfig::offroad();
        config.max_brake_force = f64::NAN;
        assert!(config.validate().is_err());
    }
}
