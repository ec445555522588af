// grip_sim/src/simulation/core/mod.rs

pub mod app_state;
pub mod clock;
pub mod components;
pub mod simulation_setup;
pub mod transforms;
