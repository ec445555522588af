// grip_sim/src/simulation/config/mod.rs

//! This module handles loading, resolving, and validating all simulation
//! configuration from disk, including the prefab catalog system.

mod catalog;
mod resolver;

pub mod structs;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy::prelude::*;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use grip_core::prelude::{BandedTerrain, ConfigError, VehicleConfig};
use thiserror::Error;

use crate::cli::Cli;
use crate::prelude::{AppState, SimulationClock, Terrain};

// Re-export public types
pub use catalog::PrefabCatalog;
pub use resolver::{build_terrain, resolve_ground, resolve_vehicle};
use structs::{ScenarioConfig, ScriptStep, StartPose};

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app
            // A resource to hold the final, resolved car configurations.
            .init_resource::<ResolvedCars>()
            .add_systems(OnEnter(AppState::Loading), load_and_resolve_scenario);
    }
}

#[derive(Debug, Error)]
pub enum SimConfigError {
    #[error("failed to read configuration: {0}")]
    Figment(#[from] figment::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("scenario file not found at {0:?}")]
    MissingFile(PathBuf),

    #[error("failed to load catalog item {path:?}: {source}")]
    Prefab {
        path: PathBuf,
        source: Box<figment::Error>,
    },

    #[error("unknown prefab '{0}'")]
    UnknownPrefab(String),

    #[error("invalid configuration for '{name}': {source}")]
    Invalid { name: String, source: ConfigError },

    #[error("scenario has no cars")]
    NoCars,

    #[error("tick rate must be positive and finite, got {0}")]
    TickRate(f64),

    #[error("duration must be non-negative and finite, got {0}")]
    Duration(f64),

    #[error("car name '{0}' is used more than once")]
    DuplicateCar(String),
}

/// A car after its prefab and overrides have been merged and validated.
#[derive(Debug, Clone)]
pub struct ResolvedCar {
    pub name: String,
    pub vehicle: VehicleConfig,
    pub start: StartPose,
    pub script: Vec<ScriptStep>,
}

#[derive(Resource, Default, Debug)]
pub struct ResolvedCars(pub Vec<ResolvedCar>);

/// Everything a run needs, loaded and checked up front.
#[derive(Debug)]
pub struct LoadedSimulation {
    pub scenario: ScenarioConfig,
    pub cars: Vec<ResolvedCar>,
    pub terrain: BandedTerrain,
}

/// Reads a scenario file, layering `GRIP_SIM_*` environment variables on top
/// (`GRIP_SIM_SIMULATION__DURATION_SECONDS=5` sets `simulation.duration_seconds`).
pub fn read_scenario(path: &Path) -> Result<ScenarioConfig, SimConfigError> {
    if !path.exists() {
        return Err(SimConfigError::MissingFile(path.to_path_buf()));
    }
    let scenario = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("GRIP_SIM_").split("__"))
        .extract()?;
    Ok(scenario)
}

/// Checks run settings and resolves every car and the terrain against the
/// catalog.
pub fn resolve_scenario(
    scenario: ScenarioConfig,
    catalog: &PrefabCatalog,
) -> Result<LoadedSimulation, SimConfigError> {
    let settings = &scenario.simulation;
    if !(settings.tick_rate_hz.is_finite() && settings.tick_rate_hz > 0.0) {
        return Err(SimConfigError::TickRate(settings.tick_rate_hz));
    }
    if !(settings.duration_seconds.is_finite() && settings.duration_seconds >= 0.0) {
        return Err(SimConfigError::Duration(settings.duration_seconds));
    }
    if scenario.cars.is_empty() {
        return Err(SimConfigError::NoCars);
    }

    let mut names = HashSet::new();
    let mut cars = Vec::with_capacity(scenario.cars.len());
    for car in &scenario.cars {
        if !names.insert(car.name.as_str()) {
            return Err(SimConfigError::DuplicateCar(car.name.clone()));
        }
        let vehicle = resolve_vehicle(catalog, &car.vehicle, car.overrides.as_ref()).map_err(
            |err| match err {
                SimConfigError::Invalid { source, .. } => SimConfigError::Invalid {
                    name: car.name.clone(),
                    source,
                },
                other => other,
            },
        )?;
        info!(
            "Resolved car '{}' from '{}' ({} kg)",
            car.name, car.vehicle, vehicle.mass
        );
        cars.push(ResolvedCar {
            name: car.name.clone(),
            vehicle,
            start: car.start,
            script: car.script.clone(),
        });
    }

    let terrain = build_terrain(&scenario.terrain, catalog)?;

    Ok(LoadedSimulation {
        scenario,
        cars,
        terrain,
    })
}

/// The whole loading pipeline: catalog, scenario file, command-line
/// overrides, resolution.
pub fn load_simulation(cli: &Cli) -> Result<LoadedSimulation, SimConfigError> {
    let mut catalog = PrefabCatalog::with_builtins()?;
    catalog.load_dir(&cli.catalog)?;

    info!("Loading scenario from: {:?}", cli.scenario);
    let mut scenario = read_scenario(&cli.scenario)?;
    if let Some(duration) = cli.duration {
        scenario.simulation.duration_seconds = duration;
    }
    if let Some(every) = cli.hud_every {
        scenario.simulation.hud_every_ticks = every;
    }

    resolve_scenario(scenario, &catalog)
}

fn load_and_resolve_scenario(
    mut commands: Commands,
    cli: Option<Res<Cli>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    let cli = cli.map(|cli| (*cli).clone()).unwrap_or_default();

    let loaded = match load_simulation(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Failed to load simulation: {}", e);
            exit.write(AppExit::error());
            return;
        }
    };

    let settings = &loaded.scenario.simulation;
    let clock = SimulationClock::new(settings.tick_rate_hz, settings.duration_seconds);
    info!(
        "Scenario ready: {} car(s), {} ticks at {} Hz",
        loaded.cars.len(),
        clock.total_ticks,
        settings.tick_rate_hz
    );

    commands.insert_resource(clock);
    commands.insert_resource(Terrain(Arc::new(loaded.terrain)));
    commands.insert_resource(ResolvedCars(loaded.cars));
    commands.insert_resource(loaded.scenario);

    info!("Configuration loading and resolution complete. Transitioning to SceneBuilding state.");
    next_state.set(AppState::SceneBuilding);
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::structs::CarConfig;

    fn assets() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets")
    }

    fn car(name: &str, vehicle: &str) -> CarConfig {
        CarConfig {
            name: name.to_string(),
            vehicle: vehicle.to_string(),
            overrides: None,
            start: StartPose::default(),
            script: Vec::new(),
        }
    }

    fn scenario(cars: Vec<CarConfig>) -> ScenarioConfig {
        ScenarioConfig {
            cars,
            ..Default::default()
        }
    }

    #[test]
    fn shipped_scenario_loads() {
        let cli = Cli {
            scenario: assets().join("scenarios/00_terrain_tour.toml"),
            catalog: assets().join("catalog"),
            duration: Some(2.0),
            hud_every: Some(0),
        };
        let loaded = load_simulation(&cli).unwrap();
        assert!(!loaded.cars.is_empty());
        assert_eq!(loaded.scenario.simulation.duration_seconds, 2.0);
        assert_eq!(loaded.scenario.simulation.hud_every_ticks, 0);
        for car in &loaded.cars {
            assert!(car.vehicle.validate().is_ok());
        }
    }

    #[test]
    fn every_shipped_scenario_resolves() {
        let mut catalog = PrefabCatalog::with_builtins().unwrap();
        catalog.load_dir(&assets().join("catalog")).unwrap();
        let dir = assets().join("scenarios");
        for entry in std::fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            let text = std::fs::read_to_string(&path).unwrap();
            let scenario = ScenarioConfig::from_toml_str(&text).unwrap();
            assert!(
                resolve_scenario(scenario, &catalog).is_ok(),
                "{path:?} did not resolve"
            );
        }
    }

    #[test]
    fn missing_scenario_file_is_reported() {
        let err = read_scenario(Path::new("nowhere/scenario.toml")).unwrap_err();
        assert!(matches!(err, SimConfigError::MissingFile(_)));
    }

    #[test]
    fn rejects_bad_scenarios() {
        let catalog = PrefabCatalog::with_builtins().unwrap();

        assert!(matches!(
            resolve_scenario(scenario(vec![]), &catalog),
            Err(SimConfigError::NoCars)
        ));

        let twins = scenario(vec![car("a", "vehicles.sport"), car("a", "vehicles.offroad")]);
        assert!(matches!(
            resolve_scenario(twins, &catalog),
            Err(SimConfigError::DuplicateCar(name)) if name == "a"
        ));

        let mut stalled = scenario(vec![car("a", "vehicles.sport")]);
        stalled.simulation.tick_rate_hz = 0.0;
        assert!(matches!(
            resolve_scenario(stalled, &catalog),
            Err(SimConfigError::TickRate(_))
        ));

        let unknown = scenario(vec![car("a", "vehicles.bus")]);
        assert!(matches!(
            resolve_scenario(unknown, &catalog),
            Err(SimConfigError::UnknownPrefab(_))
        ));
    }

    #[test]
    fn invalid_overrides_name_the_car() {
        let catalog = PrefabCatalog::with_builtins().unwrap();
        let mut broken = car("heavy", "vehicles.offroad");
        broken.overrides = Some(toml::from_str("mass = 0.0").unwrap());
        let err = resolve_scenario(scenario(vec![broken]), &catalog).unwrap_err();
        assert!(matches!(err, SimConfigError::Invalid { ref name, .. } if name == "heavy"));
    }
}
