// grip_sim/src/simulation/config/catalog.rs

//! The `PrefabCatalog` resource: every vehicle and ground prefab a scenario
//! can refer to by key.

use bevy::prelude::*;
use figment::{
    providers::{Format, Toml},
    value::Value,
    Figment,
};
use grip_core::prelude::{GroundType, VehicleConfig};
use std::{collections::HashMap, path::Path};
use walkdir::WalkDir;

use super::SimConfigError;

/// The key is a namespace string (e.g. "vehicles.offroad") and the value is
/// the raw, parsed data for that prefab.
#[derive(Resource, Default, Debug, Clone)]
pub struct PrefabCatalog(pub HashMap<String, Value>);

impl PrefabCatalog {
    /// A catalog holding the presets compiled into `grip_core`:
    /// `vehicles.offroad`, `vehicles.sport` and `grounds.<name>` for each
    /// built-in ground.
    pub fn with_builtins() -> Result<Self, SimConfigError> {
        let mut catalog = Self::default();
        catalog.insert("vehicles.offroad", Value::serialize(VehicleConfig::offroad())?);
        catalog.insert("vehicles.sport", Value::serialize(VehicleConfig::sport())?);
        for ground in GroundType::presets() {
            let key = format!("grounds.{}", ground.name);
            catalog.insert(&key, Value::serialize(ground)?);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.0.insert(key.to_string(), value)
    }

    pub fn get(&self, key: &str) -> Result<&Value, SimConfigError> {
        self.0
            .get(key)
            .ok_or_else(|| SimConfigError::UnknownPrefab(key.to_string()))
    }

    /// Walks `root`, parses every `.toml` file and inserts it under a key
    /// built from its relative path (`vehicles/rally.toml` becomes
    /// `vehicles.rally`). Disk entries replace built-ins with the same key.
    /// Returns how many files were loaded.
    pub fn load_dir(&mut self, root: &Path) -> Result<usize, SimConfigError> {
        if !root.exists() {
            warn!(
                "Catalog directory not found at {:?}, only built-in prefabs are available.",
                root
            );
            return Ok(0);
        }

        info!("Loading prefab catalog from: {:?}", root);

        let mut loaded = 0;
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| {
                !e.file_type().is_dir() && e.path().extension().is_some_and(|ext| ext == "toml")
            })
        {
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let key = relative
                .with_extension("")
                .to_string_lossy()
                .replace(std::path::MAIN_SEPARATOR, ".");

            let data = Figment::new()
                .merge(Toml::file(path))
                .extract::<Value>()
                .map_err(|source| SimConfigError::Prefab {
                    path: path.to_path_buf(),
                    source: Box::new(source),
                })?;
            if self.insert(&key, data).is_some() {
                info!("Catalog item '{}' replaces the built-in prefab", key);
            } else {
                info!("Loaded catalog item: '{}'", key);
            }
            loaded += 1;
        }
        Ok(loaded)
    }
}
