// grip_core/src/lib.rs

//! Vehicle dynamics for a two-axle car: engine and gearbox, per-axle grip
//! budgets, a slide/lock state machine and a bicycle-model integrator.
//!
//! The crate does no I/O and owns no global state. A host feeds it driver
//! input, a time step and the ground under the car, and reads back poses and
//! telemetry.

pub mod error;
pub mod ground;
pub mod models;
pub mod prelude;
pub mod types;
pub mod utils;
pub mod vehicle;
