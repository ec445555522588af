// grip_sim/examples/01_scripted_drive.rs

//! Runs a scenario headless and logs what the HUD would show.
//!
//! This example demonstrates how to:
//! 1. Parse the command line into the `Cli` resource.
//! 2. Set up a windowless Bevy app that ticks as fast as it can.
//! 3. Add the `GripSimulationPlugin`, which loads the scenario, drives the
//!    cars by their scripts and exits when the run is over.
//!
//! To run this example from the workspace root:
//! `cargo run --example 01_scripted_drive -- --scenario assets/scenarios/01_ice_braking.toml`

use std::time::Duration;

use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*, state::app::StatesPlugin};
use clap::Parser;

use grip_sim::cli::Cli;
use grip_sim::prelude::AppState;
use grip_sim::GripSimulationPlugin;

fn main() -> AppExit {
    let cli = Cli::parse();

    let mut app = App::new();

    app.add_plugins((
        // No window: the fixed-step clock paces the run, not the wall clock.
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)),
        StatesPlugin,
        LogPlugin {
            level: bevy::log::Level::INFO,
            // Slide and ground-change diagnostics are logged at debug level.
            filter: "info,grip_sim=debug,grip_core=debug".to_string(),
            ..default()
        },
    ))
    .insert_resource(cli);

    app.init_state::<AppState>();
    app.add_plugins(GripSimulationPlugin);

    app.run()
}
