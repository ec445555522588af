// grip_sim/src/simulation/core/components.rs

use std::fmt;

use bevy::prelude::Component;
use grip_core::prelude::Vec3;

/// Distance and top speed of one car over the run.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Odometer {
    /// Metres travelled on the ground plane.
    pub distance: f64,
    /// Metres per second.
    pub top_speed: f64,
    pub last_position: Vec3,
}

impl Odometer {
    pub fn new(start: Vec3) -> Self {
        Self {
            distance: 0.0,
            top_speed: 0.0,
            last_position: start,
        }
    }

    pub fn record(&mut self, position: Vec3, speed: f64) {
        let mut step = position - self.last_position;
        step.y = 0.0;
        self.distance += step.norm();
        self.top_speed = self.top_speed.max(speed);
        self.last_position = position;
    }
}

/// The end-of-run line for one car.
#[derive(Debug, Clone, PartialEq)]
pub struct CarSummary {
    pub name: String,
    pub distance: f64,
    pub top_speed_kmh: f64,
    pub final_ground: String,
    pub skid_marks: usize,
}

impl fmt::Display for CarSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.1} m, top speed {:.1} km/h, ended on {}, {} skid marks",
            self.name, self.distance, self.top_speed_kmh, self.final_ground, self.skid_marks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn odometer_ignores_height() {
        let mut odo = Odometer::new(Vec3::new(0.0, 0.5, 0.0));
        odo.record(Vec3::new(3.0, 0.2, 4.0), 10.0);
        odo.record(Vec3::new(3.0, 0.9, 4.0), 4.0);
        assert_relative_eq!(odo.distance, 5.0);
        assert_relative_eq!(odo.top_speed, 10.0);
    }

    #[test]
    fn summary_line() {
        let summary = CarSummary {
            name: "truck".into(),
            distance: 123.456,
            top_speed_kmh: 88.04,
            final_ground: "road".into(),
            skid_marks: 12,
        };
        assert_eq!(
            summary.to_string(),
            "truck: 123.5 m, top speed 88.0 km/h, ended on road, 12 skid marks"
        );
    }
}
