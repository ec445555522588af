// grip_core/src/prelude.rs

// --- Core Abstractions ---
pub use crate::error::ConfigError;
pub use crate::ground::TerrainProvider;
pub use crate::types::{Axle, PerAxle, Vec2, Vec3};

// --- Core Data Structures ---
pub use crate::ground::{BandedTerrain, GroundType, TerrainBand, UniformTerrain};
pub use crate::vehicle::config::{Aerodynamics, DriveLayout, VehicleConfig};
pub use crate::vehicle::input::DriverInput;
pub use crate::vehicle::state::{AxleState, VehicleState};
pub use crate::vehicle::telemetry::{AxleTelemetry, SkidMark, VehicleTelemetry, WheelVisual};
pub use crate::vehicle::Vehicle;

// --- Model Building Blocks ---
pub use crate::models::drivetrain::{DriveTrain, DriveTrainSpec};
pub use crate::models::engine::{Engine, EngineSpec};
