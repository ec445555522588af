// grip_sim/src/simulation/plugins/telemetry.rs

//! What the HUD would show, as log lines: a periodic status line per car,
//! skid marks collected for the whole run and a summary at the end.

use grip_core::prelude::Vec2;
use grip_core::utils::math::mps_to_kmh;

use crate::prelude::*;
use crate::simulation::plugins::vehicles::CarName;

/// Metres of gauge per newton, as on the debug HUD.
pub const GAUGE_SCALE: f64 = 0.005;

pub struct TelemetryPlugin;

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SkidMarks>()
            .add_systems(
                FixedUpdate,
                record_telemetry.in_set(SimulationSet::Telemetry),
            )
            .add_systems(OnEnter(AppState::Finished), log_summaries);
    }
}

/// One skid mark, tagged with the car and tick that left it.
#[derive(Debug, Clone, PartialEq)]
pub struct SkidMarkRecord {
    pub car: String,
    pub tick: u64,
    pub mark: SkidMark,
}

/// Every skid mark of the run, in the order they were laid down.
#[derive(Resource, Debug, Default)]
pub struct SkidMarks(pub Vec<SkidMarkRecord>);

impl SkidMarks {
    pub fn count_for(&self, car: &str) -> usize {
        self.0.iter().filter(|record| record.car == car).count()
    }
}

/// One axle's line on the force gauge: a circle for the grip budget and a
/// needle for the force actually used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceGauge {
    pub circle_radius: f64,
    pub needle_length: f64,
    /// Degrees, pointing away from the force.
    pub needle_angle: f64,
}

impl ForceGauge {
    pub fn new(combined_force: &Vec2, max_force: f64) -> Self {
        Self {
            circle_radius: max_force * GAUGE_SCALE,
            needle_length: combined_force.norm() * GAUGE_SCALE,
            needle_angle: combined_force.y.atan2(combined_force.x).to_degrees() + 180.0,
        }
    }

    pub fn from_axle(axle: &AxleTelemetry) -> Self {
        Self::new(&axle.combined_force, axle.max_force)
    }
}

fn axle_flags(axle: &AxleTelemetry) -> &'static str {
    if axle.blocking {
        "locked"
    } else if axle.spinning {
        "spinning"
    } else if axle.sliding {
        "sliding"
    } else {
        "grip"
    }
}

/// The periodic HUD line for one car.
pub fn hud_line(name: &str, telemetry: &VehicleTelemetry) -> String {
    let front = ForceGauge::from_axle(&telemetry.axles.front);
    let rear = ForceGauge::from_axle(&telemetry.axles.rear);
    format!(
        "{name}: Speed: {} KM/H | gear {} | {} | steer {:.1} | front {:.2}/{:.2} @ {:.0} ({}) | rear {:.2}/{:.2} @ {:.0} ({})",
        // Truncated, not rounded.
        telemetry.speed_kmh as i64,
        telemetry.gear,
        telemetry.ground.name,
        telemetry.steering_angle,
        front.needle_length,
        front.circle_radius,
        front.needle_angle,
        axle_flags(&telemetry.axles.front),
        rear.needle_length,
        rear.circle_radius,
        rear.needle_angle,
        axle_flags(&telemetry.axles.rear),
    )
}

fn record_telemetry(
    clock: Res<SimulationClock>,
    scenario: Res<ScenarioConfig>,
    mut skid_marks: ResMut<SkidMarks>,
    mut query: Query<(&CarName, &Vehicle, &mut Odometer)>,
) {
    let every = u64::from(scenario.simulation.hud_every_ticks);
    let tick = clock.tick + 1;
    let log_hud = every > 0 && tick % every == 0;

    for (name, vehicle, mut odometer) in &mut query {
        odometer.record(vehicle.position(), vehicle.speed());

        skid_marks
            .0
            .extend(vehicle.skid_marks().into_iter().map(|mark| SkidMarkRecord {
                car: name.0.clone(),
                tick,
                mark,
            }));

        if log_hud {
            info!("[t={:.2}] {}", clock.elapsed(), hud_line(&name.0, &vehicle.telemetry()));
        }
    }
}

fn log_summaries(
    query: Query<(&CarName, &Vehicle, &Odometer)>,
    skid_marks: Res<SkidMarks>,
    mut exit: EventWriter<AppExit>,
) {
    info!("--- Run summary ---");
    for (name, vehicle, odometer) in &query {
        let summary = CarSummary {
            name: name.0.clone(),
            distance: odometer.distance,
            top_speed_kmh: mps_to_kmh(odometer.top_speed),
            final_ground: vehicle.ground().name.clone(),
            skid_marks: skid_marks.count_for(&name.0),
        };
        info!("{}", summary);
    }
    exit.write(AppExit::Success);
}
