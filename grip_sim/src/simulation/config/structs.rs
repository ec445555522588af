// grip_sim/src/simulation/config/structs.rs

use bevy::prelude::Resource;
use figment::value::Value;
use serde::{Deserialize, Serialize};

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// Root of a `scenario.toml`: run settings, the terrain layout and the cars.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: SimulationSettings,

    #[serde(default)]
    pub terrain: TerrainConfig,

    // The TOML has `[[cars]]`, which becomes a Vec of CarConfig structs.
    #[serde(default)]
    pub cars: Vec<CarConfig>,
}

impl ScenarioConfig {
    /// Parses a scenario straight from TOML text, without env overrides.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSettings {
    /// Length of the run in simulated seconds.
    pub duration_seconds: f64,
    /// Fixed update rate in Hz. Every tick advances the cars by `1 / rate`.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: f64,
    /// Log a HUD line every this many ticks; 0 disables it.
    #[serde(default = "default_hud_every")]
    pub hud_every_ticks: u32,
    /// Log ground changes and slide transitions of every car.
    #[serde(default)]
    pub diagnostics: bool,
}

fn default_tick_rate() -> f64 {
    60.0
}

fn default_hud_every() -> u32 {
    60
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            duration_seconds: 30.0,
            tick_rate_hz: default_tick_rate(),
            hud_every_ticks: default_hud_every(),
            diagnostics: false,
        }
    }
}

/// Ground zones along world X. Grounds are catalog keys such as `grounds.ice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerrainConfig {
    #[serde(default)]
    pub bands: Vec<BandConfig>,
    /// Ground beyond the last band.
    pub fallback: String,
}

impl Default for TerrainConfig {
    /// Ice, road, hard sand and soft sand from west to east.
    fn default() -> Self {
        let band = |up_to_x: f64, ground: &str| BandConfig {
            up_to_x,
            ground: ground.to_string(),
        };
        Self {
            bands: vec![
                band(-250.0, "grounds.ice"),
                band(25.0, "grounds.road"),
                band(250.0, "grounds.sand_hard"),
            ],
            fallback: "grounds.sand_soft".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BandConfig {
    pub up_to_x: f64,
    pub ground: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarConfig {
    pub name: String,
    /// Catalog key of the vehicle prefab, e.g. `vehicles.offroad`.
    pub vehicle: String,
    /// Partial `VehicleConfig` deep-merged over the prefab.
    #[serde(default)]
    pub overrides: Option<Value>,
    #[serde(default)]
    pub start: StartPose,
    /// Keys held over time; each step lasts until the next one.
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StartPose {
    /// World position `[x, y, z]`; `y` is replaced by the ride height.
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub heading_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    /// Simulated time in seconds at which these keys become held.
    pub at: f64,
    #[serde(default)]
    pub keys: Vec<DriverKey>,
}

/// The keyboard keys a driver script can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKey {
    /// Throttle.
    Up,
    /// Brake.
    Down,
    Left,
    Right,
    /// Handbrake.
    Space,
}
