// grip_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::config::ConfigPlugin;
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::driver::DriverInputPlugin;
use crate::simulation::plugins::telemetry::TelemetryPlugin;
use crate::simulation::plugins::terrain::TerrainPlugin;
use crate::simulation::plugins::vehicles::VehiclePlugin;

// This prelude is for convenience for other files WITHIN the grip_sim crate.
pub mod prelude;

pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
///
/// The host app supplies the schedule runner, `StatesPlugin`, logging and
/// `init_state::<AppState>()`; see `examples/01_scripted_drive.rs`.
pub struct GripSimulationPlugin;

impl Plugin for GripSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Scenario + catalog loading, resolution of every car.
            ConfigPlugin,
            // Fixed-step clock, system set ordering, state transitions.
            SimulationSetupPlugin,
            // Scripted keys shaped into analog pedals and steering.
            DriverInputPlugin,
            // Ground lookup under each car.
            TerrainPlugin,
            // Spawning and stepping the vehicles.
            VehiclePlugin,
            // HUD readout, skid marks and the end-of-run summary.
            TelemetryPlugin,
        ));
    }
}
