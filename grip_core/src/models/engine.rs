// grip_core/src/models/engine.rs

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, ConfigError};
use crate::utils::math::lerp;

/// Spacing of the torque chart samples.
pub const RPM_STEP: f64 = 1000.0;

/// Plain, unvalidated engine description as it appears in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSpec {
    pub idle_rpm: f64,
    pub max_rpm: f64,
    /// Torque in Nm at 0, 1000, 2000, ... rpm.
    pub torque_chart: Vec<f64>,
}

/// An engine described by its usable rpm range and a torque curve sampled
/// every [`RPM_STEP`] rpm starting at 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EngineSpec", into = "EngineSpec")]
pub struct Engine {
    idle_rpm: f64,
    max_rpm: f64,
    torque_chart: Vec<f64>,
}

impl Engine {
    pub fn new(idle_rpm: f64, max_rpm: f64, torque_chart: Vec<f64>) -> Result<Self, ConfigError> {
        ensure_non_negative("idle_rpm", idle_rpm)?;
        ensure_positive("max_rpm", max_rpm)?;
        if idle_rpm >= max_rpm {
            return Err(ConfigError::RpmRange {
                idle: idle_rpm,
                max: max_rpm,
            });
        }

        // Interpolation reads one sample past the one at or below max_rpm.
        let required = ((max_rpm / RPM_STEP).ceil() as usize + 1).max(2);
        if torque_chart.len() < required {
            return Err(ConfigError::TorqueChartTooShort {
                required,
                actual: torque_chart.len(),
                max_rpm,
            });
        }
        for &sample in &torque_chart {
            ensure_finite("torque_chart", sample)?;
        }

        Ok(Self {
            idle_rpm,
            max_rpm,
            torque_chart,
        })
    }

    /// For the built-in presets, whose charts are checked by the tests below.
    pub(crate) fn preset(idle_rpm: f64, max_rpm: f64, torque_chart: &[f64]) -> Self {
        Self {
            idle_rpm,
            max_rpm,
            torque_chart: torque_chart.to_vec(),
        }
    }

    pub fn idle_rpm(&self) -> f64 {
        self.idle_rpm
    }

    pub fn max_rpm(&self) -> f64 {
        self.max_rpm
    }

    pub fn torque_chart(&self) -> &[f64] {
        &self.torque_chart
    }

    /// Engine torque in Nm at `rpm`, clamped to the idle..max range and
    /// linearly interpolated between the neighbouring chart samples.
    pub fn torque(&self, rpm: f64) -> f64 {
        let rpm = rpm.clamp(self.idle_rpm, self.max_rpm);
        // Clamp to the last full segment so rpm == max_rpm on an exact
        // multiple of RPM_STEP lands on the final sample.
        let last_segment = self.torque_chart.len() - 2;
        let index = ((rpm / RPM_STEP).floor() as usize).min(last_segment);
        let t = (rpm - index as f64 * RPM_STEP) / RPM_STEP;
        lerp(self.torque_chart[index], self.torque_chart[index + 1], t)
    }
}

impl TryFrom<EngineSpec> for Engine {
    type Error = ConfigError;

    fn try_from(spec: EngineSpec) -> Result<Self, Self::Error> {
        Engine::new(spec.idle_rpm, spec.max_rpm, spec.torque_chart)
    }
}

impl From<Engine> for EngineSpec {
    fn from(engine: Engine) -> Self {
        Self {
            idle_rpm: engine.idle_rpm,
            max_rpm: engine.max_rpm,
            torque_chart: engine.torque_chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const OFFROAD_CHART: [f64; 8] = [0.0, 395.0, 435.0, 455.0, 480.0, 470.0, 395.0, 300.0];

    fn offroad() -> Engine {
        Engine::new(800.0, 6400.0, OFFROAD_CHART.to_vec()).unwrap()
    }

    #[test]
    fn interpolates_between_samples() {
        let engine = offroad();
        assert_abs_diff_eq!(engine.torque(2500.0), 445.0, epsilon = 1e-9);
        assert_abs_diff_eq!(engine.torque(5000.0), 470.0, epsilon = 1e-9);
        assert_abs_diff_eq!(engine.torque(4250.0), 477.5, epsilon = 1e-9);
    }

    #[test]
    fn clamps_to_idle_and_max() {
        let engine = offroad();
        // 800 rpm -> 0.8 of the way from 0 to 395.
        assert_abs_diff_eq!(engine.torque(0.0), 316.0, epsilon = 1e-9);
        assert_abs_diff_eq!(engine.torque(-50.0), 316.0, epsilon = 1e-9);
        // 6400 rpm -> 0.4 of the way from 395 to 300.
        assert_abs_diff_eq!(engine.torque(9000.0), 357.0, epsilon = 1e-9);
    }

    #[test]
    fn max_rpm_on_a_step_reads_the_final_sample() {
        let engine = Engine::new(800.0, 7000.0, OFFROAD_CHART.to_vec()).unwrap();
        assert_abs_diff_eq!(engine.torque(7000.0), 300.0, epsilon = 1e-9);
        assert!(engine.torque(1.0e9).is_finite());
    }

    #[test]
    fn rejects_short_chart_and_bad_range() {
        assert!(matches!(
            Engine::new(800.0, 6400.0, vec![0.0, 100.0, 200.0]),
            Err(ConfigError::TorqueChartTooShort {
                required: 8,
                actual: 3,
                ..
            })
        ));
        assert!(matches!(
            Engine::new(7000.0, 6400.0, OFFROAD_CHART.to_vec()),
            Err(ConfigError::RpmRange { .. })
        ));
        assert!(Engine::new(800.0, 6400.0, vec![f64::NAN; 8]).is_err());
    }

    #[test]
    fn deserializing_runs_validation() {
        let ok: Result<Engine, _> = from_spec(800.0, 6400.0, &OFFROAD_CHART);
        assert!(ok.is_ok());
        let short: Result<Engine, _> = from_spec(800.0, 6400.0, &[0.0, 1.0]);
        assert!(short.is_err());
    }

    // Same path serde takes through `try_from`.
    fn from_spec(idle: f64, max: f64, chart: &[f64]) -> Result<Engine, ConfigError> {
        Engine::try_from(EngineSpec {
            idle_rpm: idle,
            max_rpm: max,
            torque_chart: chart.to_vec(),
        })
    }
}
