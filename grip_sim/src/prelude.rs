// grip_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// The pure types from grip_core. Listed one by one because the core `Vec3`
// alias would clash with Bevy's.
pub use grip_core::prelude::{
    AxleTelemetry, BandedTerrain, ConfigError, DriveLayout, DriverInput, GroundType, SkidMark,
    TerrainBand, TerrainProvider, UniformTerrain, Vehicle, VehicleConfig, VehicleTelemetry,
};

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::config::{ResolvedCar, ResolvedCars, SimConfigError};
pub use crate::simulation::core::app_state::{AppState, SimulationSet};
pub use crate::simulation::core::clock::SimulationClock;
pub use crate::simulation::core::components::{CarSummary, Odometer};
pub use crate::simulation::plugins::terrain::Terrain;
