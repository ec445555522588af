use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

/// Grip: headless driving-physics simulator.
///
/// Runs a scenario of scripted cars on banded terrain and logs a HUD line and
/// a per-car summary.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/00_terrain_tour.toml")]
    pub scenario: PathBuf,

    /// Directory holding the vehicle and ground prefab catalog.
    #[arg(long, default_value = "assets/catalog")]
    pub catalog: PathBuf,

    /// Override the scenario's duration, in seconds.
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Log a HUD line every N ticks (0 disables it).
    #[arg(long)]
    pub hud_every: Option<u32>,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            scenario: "assets/scenarios/00_terrain_tour.toml".into(),
            catalog: "assets/catalog".into(),
            duration: None,
            hud_every: None,
        }
    }
}
