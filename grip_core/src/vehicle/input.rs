// grip_core/src/vehicle/input.rs

use serde::{Deserialize, Serialize};

/// Driver controls for one tick. Pedals and handbrake are in `[0, 1]`,
/// steering in `[-1, 1]` with positive to the left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Component))]
pub struct DriverInput {
    pub throttle: f64,
    pub brake: f64,
    pub steering: f64,
    pub handbrake: f64,
}

impl DriverInput {
    pub const IDLE: Self = Self {
        throttle: 0.0,
        brake: 0.0,
        steering: 0.0,
        handbrake: 0.0,
    };

    pub fn new(throttle: f64, brake: f64, steering: f64, handbrake: f64) -> Self {
        Self {
            throttle,
            brake,
            steering,
            handbrake,
        }
    }

    /// Copy with every channel forced into its valid range. NaN reads as 0.
    pub fn clamped(&self) -> Self {
        fn unit(v: f64) -> f64 {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, 1.0)
            }
        }
        Self {
            throttle: unit(self.throttle),
            brake: unit(self.brake),
            steering: if self.steering.is_nan() {
                0.0
            } else {
                self.steering.clamp(-1.0, 1.0)
            },
            handbrake: unit(self.handbrake),
        }
    }

    /// Brake demand on the rear axle; the handbrake only acts there.
    pub fn rear_brake(&self) -> f64 {
        self.brake.max(self.handbrake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_every_channel() {
        let input = DriverInput::new(1.5, -0.2, -3.0, f64::NAN).clamped();
        assert_eq!(input, DriverInput::new(1.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn handbrake_only_raises_rear_demand() {
        let input = DriverInput::new(0.0, 0.3, 0.0, 1.0);
        assert_eq!(input.rear_brake(), 1.0);
        assert_eq!(DriverInput::new(0.0, 0.6, 0.0, 0.2).rear_brake(), 0.6);
    }
}
