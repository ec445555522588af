// grip_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state. Catalog and scenario are read and resolved here.
    #[default]
    Loading,

    /// Configuration is resolved. Cars are being spawned from it.
    SceneBuilding,

    /// The fixed-step loop is ticking the cars.
    Running,

    /// The scenario's duration has elapsed. Summaries are logged and the app
    /// exits.
    Finished,
}

/// System sets to control the order of execution during the SceneBuilding state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneBuildSet {
    /// Pass 1: Fixed time step and other run-wide resources.
    Configure,
    /// Pass 2: One entity per resolved car.
    Spawn,
    /// Pass 3: Hand over to the main loop.
    Finalize,
}

// =========================================================================
// == Main Simulation Sets (per fixed tick, in order) ==
// =========================================================================

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Driver scripts and key shaping produce this tick's `DriverInput`.
    Input,
    /// Each car learns the ground under it.
    Terrain,
    /// The vehicle update itself, and syncing the result to `Transform`.
    Dynamics,
    /// HUD lines, skid marks, odometers.
    Telemetry,
    /// Advances the tick counter and ends the run when the duration is up.
    Clock,
}
