// grip_sim/src/simulation/plugins/vehicles.rs

use grip_core::prelude::Vec3;

use crate::prelude::*;
use crate::simulation::core::app_state::SceneBuildSet;
use crate::simulation::core::transforms::vehicle_transform;
use crate::simulation::plugins::driver::{DriveScript, HeldKeys, InputShaper};

pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            spawn_vehicles.in_set(SceneBuildSet::Spawn),
        )
        .add_systems(FixedUpdate, step_vehicles.in_set(SimulationSet::Dynamics));
    }
}

/// Name of the car an entity simulates. `Name` is for display; this is the
/// key used in skid-mark records and summaries.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct CarName(pub String);

fn spawn_vehicles(
    mut commands: Commands,
    resolved: Res<ResolvedCars>,
    scenario: Res<ScenarioConfig>,
    terrain: Res<Terrain>,
    mut exit: EventWriter<AppExit>,
) {
    for car in &resolved.0 {
        let [x, y, z] = car.start.position;
        let position = Vec3::new(x, y, z);
        let ground = terrain.0.ground_at(&position);

        let mut vehicle = match Vehicle::new(car.vehicle.clone(), position, ground) {
            Ok(vehicle) => vehicle,
            Err(e) => {
                error!("[SPAWN] Could not build car '{}': {}", car.name, e);
                exit.write(AppExit::error());
                return;
            }
        };
        vehicle.set_heading(car.start.heading_deg);
        vehicle.set_diagnostics(scenario.simulation.diagnostics);

        info!(
            "[SPAWN] '{}' at ({:.1}, {:.1}) heading {:.0} deg on {}",
            car.name,
            position.x,
            position.z,
            vehicle.heading(),
            vehicle.ground().name
        );

        commands.spawn((
            Name::new(car.name.clone()),
            CarName(car.name.clone()),
            vehicle_transform(&vehicle),
            Odometer::new(vehicle.position()),
            DriveScript::new(car.script.clone()),
            HeldKeys::default(),
            InputShaper::default(),
            DriverInput::IDLE,
            vehicle,
        ));
    }
}

fn step_vehicles(
    clock: Res<SimulationClock>,
    mut query: Query<(&mut Vehicle, &DriverInput, &mut Transform)>,
) {
    for (mut vehicle, input, mut transform) in &mut query {
        vehicle.update(input, clock.dt);
        *transform = vehicle_transform(&vehicle);
    }
}
