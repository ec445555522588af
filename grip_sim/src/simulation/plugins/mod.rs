// grip_sim/src/simulation/plugins/mod.rs

pub mod driver;
pub mod telemetry;
pub mod terrain;
pub mod vehicles;
