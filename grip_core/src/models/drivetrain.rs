// grip_core/src/models/drivetrain.rs

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, ConfigError};

/// Upshift points in m/s. Gear `n` is used from `SHIFT_SPEEDS[n - 2]` up to
/// (but excluding) `SHIFT_SPEEDS[n - 1]`.
///
/// There is no hysteresis, so holding the car right at a threshold can flip
/// between two gears from one tick to the next.
pub const SHIFT_SPEEDS: [f64; 5] = [24.0, 33.0, 46.0, 54.0, 58.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriveTrainSpec {
    pub efficiency: f64,
    pub diff_ratio: f64,
    /// Index 0 is reverse, 1.. are the forward gears.
    pub gear_ratios: Vec<f64>,
}

/// Gearbox plus differential with a fixed, speed-driven automatic shift
/// policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DriveTrainSpec", into = "DriveTrainSpec")]
pub struct DriveTrain {
    efficiency: f64,
    diff_ratio: f64,
    gear_ratios: Vec<f64>,
}

impl DriveTrain {
    pub fn new(efficiency: f64, diff_ratio: f64, gear_ratios: Vec<f64>) -> Result<Self, ConfigError> {
        if !(efficiency > 0.0 && efficiency <= 1.0) {
            return Err(ConfigError::Efficiency(efficiency));
        }
        ensure_positive("diff_ratio", diff_ratio)?;
        if gear_ratios.len() < 2 {
            return Err(ConfigError::TooFewGears(gear_ratios.len()));
        }
        ensure_finite("gear_ratios[0]", gear_ratios[0])?;
        for &ratio in &gear_ratios[1..] {
            ensure_positive("gear_ratios", ratio)?;
        }

        Ok(Self {
            efficiency,
            diff_ratio,
            gear_ratios,
        })
    }

    pub(crate) fn preset(efficiency: f64, diff_ratio: f64, gear_ratios: &[f64]) -> Self {
        Self {
            efficiency,
            diff_ratio,
            gear_ratios: gear_ratios.to_vec(),
        }
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn diff_ratio(&self) -> f64 {
        self.diff_ratio
    }

    pub fn gear_ratios(&self) -> &[f64] {
        &self.gear_ratios
    }

    /// Highest forward gear in the ratio table.
    pub fn top_gear(&self) -> usize {
        self.gear_ratios.len() - 1
    }

    /// Gear for a given forward speed (m/s). Pure step function of speed.
    pub fn gear_for_speed(&self, speed: f64) -> usize {
        let upshifts = SHIFT_SPEEDS.iter().filter(|&&s| speed >= s).count();
        (1 + upshifts).min(self.top_gear())
    }

    /// Ratio for `gear`, falling back to the top gear for out-of-range indices.
    pub fn ratio(&self, gear: usize) -> f64 {
        self.gear_ratios[gear.min(self.top_gear())]
    }

    /// Force at the contact patch produced by `torque` (Nm) through `gear`.
    pub fn wheel_force(&self, torque: f64, gear: usize, wheel_radius: f64) -> f64 {
        torque * self.ratio(gear) * self.diff_ratio * self.efficiency / wheel_radius
    }
}

impl TryFrom<DriveTrainSpec> for DriveTrain {
    type Error = ConfigError;

    fn try_from(spec: DriveTrainSpec) -> Result<Self, Self::Error> {
        DriveTrain::new(spec.efficiency, spec.diff_ratio, spec.gear_ratios)
    }
}

impl From<DriveTrain> for DriveTrainSpec {
    fn from(drivetrain: DriveTrain) -> Self {
        Self {
            efficiency: drivetrain.efficiency,
            diff_ratio: drivetrain.diff_ratio,
            gear_ratios: drivetrain.gear_ratios,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn offroad() -> DriveTrain {
        DriveTrain::new(0.7, 3.42, vec![-2.90, 2.66, 1.78, 1.30, 1.0, 0.74, 0.50]).unwrap()
    }

    #[test]
    fn gear_steps_at_documented_thresholds() {
        let dt = offroad();
        assert_eq!(dt.gear_for_speed(0.0), 1);
        assert_eq!(dt.gear_for_speed(23.9), 1);
        assert_eq!(dt.gear_for_speed(24.1), 2);
        assert_eq!(dt.gear_for_speed(32.99), 2);
        assert_eq!(dt.gear_for_speed(33.0), 3);
        assert_eq!(dt.gear_for_speed(50.0), 4);
        assert_eq!(dt.gear_for_speed(55.0), 5);
        assert_eq!(dt.gear_for_speed(58.0), 6);
        assert_eq!(dt.gear_for_speed(500.0), 6);
    }

    #[test]
    fn gear_is_clamped_to_the_table() {
        let dt = DriveTrain::new(0.9, 3.0, vec![-3.0, 2.5, 1.5]).unwrap();
        assert_eq!(dt.gear_for_speed(10.0), 1);
        assert_eq!(dt.gear_for_speed(30.0), 2);
        assert_eq!(dt.gear_for_speed(70.0), 2);
        assert_relative_eq!(dt.ratio(9), 1.5);
    }

    #[test]
    fn wheel_force_follows_the_ratio_chain() {
        let dt = offroad();
        // 470 Nm in first through a 0.43 m wheel.
        let expected = 470.0 * 2.66 * 3.42 * 0.7 / 0.43;
        assert_relative_eq!(dt.wheel_force(470.0, 1, 0.43), expected, max_relative = 1e-12);
        assert!(dt.wheel_force(470.0, 2, 0.43) < dt.wheel_force(470.0, 1, 0.43));
    }

    #[test]
    fn rejects_invalid_tables() {
        assert_eq!(
            DriveTrain::new(0.7, 3.42, vec![-2.9]),
            Err(ConfigError::TooFewGears(1))
        );
        assert_eq!(
            DriveTrain::new(0.0, 3.42, vec![-2.9, 2.6]),
            Err(ConfigError::Efficiency(0.0))
        );
        assert!(DriveTrain::new(1.2, 3.42, vec![-2.9, 2.6]).is_err());
        assert!(DriveTrain::new(0.7, 3.42, vec![-2.9, -1.0]).is_err());
        assert!(DriveTrain::new(0.7, 0.0, vec![-2.9, 2.6]).is_err());
    }
}
