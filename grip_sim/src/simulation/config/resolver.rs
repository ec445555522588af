// grip_sim/src/simulation/config/resolver.rs

//! Turns catalog keys (plus optional per-car overrides) into validated core
//! types.

use std::collections::HashMap;
use std::sync::Arc;

use figment::{providers::Serialized, value::Value, Figment};
use grip_core::prelude::{BandedTerrain, GroundType, TerrainBand, VehicleConfig};

use super::catalog::PrefabCatalog;
use super::structs::TerrainConfig;
use super::SimConfigError;

/// Deep-merges `overrides` over the prefab at `key` and validates the result.
/// Nested tables merge key by key; arrays (like the torque chart) are
/// replaced whole.
pub fn resolve_vehicle(
    catalog: &PrefabCatalog,
    key: &str,
    overrides: Option<&Value>,
) -> Result<VehicleConfig, SimConfigError> {
    let base = catalog.get(key)?;
    let mut figment = Figment::new().merge(Serialized::defaults(base.clone()));
    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides.clone()));
    }

    let config: VehicleConfig = figment.extract()?;
    config
        .validate()
        .map_err(|source| SimConfigError::Invalid {
            name: key.to_string(),
            source,
        })?;
    Ok(config)
}

pub fn resolve_ground(catalog: &PrefabCatalog, key: &str) -> Result<GroundType, SimConfigError> {
    let ground: GroundType = Figment::new()
        .merge(Serialized::defaults(catalog.get(key)?.clone()))
        .extract()?;
    ground.validate().map_err(|source| SimConfigError::Invalid {
        name: key.to_string(),
        source,
    })?;
    Ok(ground)
}

/// Builds the banded terrain. Bands naming the same ground share one
/// `Arc<GroundType>`.
pub fn build_terrain(
    terrain: &TerrainConfig,
    catalog: &PrefabCatalog,
) -> Result<BandedTerrain, SimConfigError> {
    let mut grounds: HashMap<String, Arc<GroundType>> = HashMap::new();
    let mut lookup = |key: &str| -> Result<Arc<GroundType>, SimConfigError> {
        if let Some(ground) = grounds.get(key) {
            return Ok(Arc::clone(ground));
        }
        let ground = Arc::new(resolve_ground(catalog, key)?);
        grounds.insert(key.to_string(), Arc::clone(&ground));
        Ok(ground)
    };

    let mut bands = Vec::with_capacity(terrain.bands.len());
    for band in &terrain.bands {
        bands.push(TerrainBand {
            up_to_x: band.up_to_x,
            ground: lookup(&band.ground)?,
        });
    }
    let fallback = lookup(&terrain.fallback)?;

    BandedTerrain::new(bands, fallback).map_err(|source| SimConfigError::Invalid {
        name: "terrain".to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::structs::BandConfig;
    use approx::assert_relative_eq;
    use grip_core::prelude::{DriveLayout, TerrainProvider};
    use grip_core::types::Vec3;

    fn overrides(text: &str) -> Value {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn prefab_without_overrides_is_the_preset() {
        let catalog = PrefabCatalog::with_builtins().unwrap();
        let config = resolve_vehicle(&catalog, "vehicles.sport", None).unwrap();
        assert_eq!(config, VehicleConfig::sport());
    }

    #[test]
    fn overrides_merge_into_nested_tables() {
        let catalog = PrefabCatalog::with_builtins().unwrap();
        let patch = overrides(
            r#"
            mass = 1800.0
            drive = { front = true }
            aero = { frontal_area = 2.2 }
            "#,
        );
        let config = resolve_vehicle(&catalog, "vehicles.sport", Some(&patch)).unwrap();
        assert_relative_eq!(config.mass, 1800.0);
        assert_eq!(config.drive, DriveLayout::ALL_WHEEL);
        assert_relative_eq!(config.aero.frontal_area, 2.2);
        // Untouched siblings survive the merge.
        assert_relative_eq!(config.aero.drag_area_coefficient, 0.42);
        assert_eq!(config.engine, VehicleConfig::sport().engine);
    }

    #[test]
    fn invalid_results_are_rejected() {
        let catalog = PrefabCatalog::with_builtins().unwrap();

        let patch = overrides("mass = -5.0");
        assert!(matches!(
            resolve_vehicle(&catalog, "vehicles.offroad", Some(&patch)),
            Err(SimConfigError::Invalid { .. })
        ));

        // The torque chart is validated while deserializing.
        let patch = overrides("engine = { torque_chart = [0.0, 100.0] }");
        assert!(matches!(
            resolve_vehicle(&catalog, "vehicles.offroad", Some(&patch)),
            Err(SimConfigError::Figment(_))
        ));

        assert!(matches!(
            resolve_vehicle(&catalog, "vehicles.hovercraft", None),
            Err(SimConfigError::UnknownPrefab(_))
        ));
    }

    #[test]
    fn terrain_bands_share_grounds() {
        let catalog = PrefabCatalog::with_builtins().unwrap();
        let config = TerrainConfig {
            bands: vec![
                BandConfig {
                    up_to_x: 0.0,
                    ground: "grounds.road".into(),
                },
                BandConfig {
                    up_to_x: 10.0,
                    ground: "grounds.ice".into(),
                },
            ],
            fallback: "grounds.road".into(),
        };
        let terrain = build_terrain(&config, &catalog).unwrap();
        let near = terrain.ground_at(&Vec3::new(-5.0, 0.0, 0.0));
        let far = terrain.ground_at(&Vec3::new(50.0, 0.0, 0.0));
        assert!(Arc::ptr_eq(&near, &far));
        assert_eq!(terrain.ground_at(&Vec3::new(5.0, 0.0, 0.0)).name, "ice");
    }

    #[test]
    fn default_terrain_matches_the_reference_layout() {
        let catalog = PrefabCatalog::with_builtins().unwrap();
        let terrain = build_terrain(&TerrainConfig::default(), &catalog).unwrap();
        let reference = BandedTerrain::reference();
        for x in [-400.0, -250.0, 0.0, 25.0, 100.0, 250.0, 1000.0] {
            let at = Vec3::new(x, 0.0, 0.0);
            assert_eq!(*terrain.ground_at(&at), *reference.ground_at(&at), "x = {x}");
        }
    }
}
