// grip_core/src/models/mod.rs

//! The per-tick building blocks of the vehicle model, leaves first:
//! engine and drivetrain feed the axle force budget, which bounds the
//! steering model, and both feed the two-axle integrator.

pub mod axle_forces;
pub mod drivetrain;
pub mod engine;
pub mod integrator;
pub mod steering;
