// grip_core/src/error.rs

use thiserror::Error;

/// Everything that can be wrong with a vehicle, engine, drivetrain or ground
/// description. These are programmer errors, so they surface once at
/// construction and never from the per-tick update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("`{field}` must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("idle rpm ({idle}) must be below max rpm ({max})")]
    RpmRange { idle: f64, max: f64 },

    #[error(
        "torque chart needs at least {required} samples to reach {max_rpm} rpm, got {actual}"
    )]
    TorqueChartTooShort {
        required: usize,
        actual: usize,
        max_rpm: f64,
    },

    #[error("drivetrain efficiency must be in (0, 1], got {0}")]
    Efficiency(f64),

    #[error("gear table needs a reverse entry and at least one forward gear, got {0} entries")]
    TooFewGears(usize),

    #[error("at least one axle must be driven")]
    NoDrivenAxle,

    #[error("ground type name must not be empty")]
    UnnamedGround,

    #[error("terrain band bounds must be strictly increasing ({previous} then {next})")]
    UnorderedBands { previous: f64, next: f64 },
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}
