// grip_core/src/ground.rs

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ConfigError};
use crate::types::Vec3;

/// A terrain classification and its friction coefficients.
///
/// Ground types are created once, never mutated, and shared between vehicles
/// as `Arc<GroundType>`. Crossing a terrain boundary swaps the `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroundType {
    pub name: String,
    /// Rolling resistance coefficient (`F = c_roll * weight`).
    pub rolling_friction: f64,
    /// Kinetic coefficient used once a tire has broken loose.
    pub sliding_friction: f64,
    /// Static coefficient; sets the per-axle grip budget.
    pub static_friction: f64,
}

impl GroundType {
    pub fn new(
        name: impl Into<String>,
        rolling_friction: f64,
        sliding_friction: f64,
        static_friction: f64,
    ) -> Result<Self, ConfigError> {
        let ground = Self {
            name: name.into(),
            rolling_friction,
            sliding_friction,
            static_friction,
        };
        ground.validate()?;
        Ok(ground)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::UnnamedGround);
        }
        ensure_non_negative("rolling_friction", self.rolling_friction)?;
        ensure_non_negative("sliding_friction", self.sliding_friction)?;
        ensure_non_negative("static_friction", self.static_friction)?;
        Ok(())
    }

    fn preset(name: &str, rolling: f64, sliding: f64, stat: f64) -> Self {
        Self {
            name: name.to_string(),
            rolling_friction: rolling,
            sliding_friction: sliding,
            static_friction: stat,
        }
    }

    pub fn road() -> Self {
        Self::preset("road", 0.013, 0.5, 0.8)
    }

    pub fn sand_hard() -> Self {
        Self::preset("sand_hard", 0.08, 0.25, 0.4)
    }

    pub fn sand_soft() -> Self {
        Self::preset("sand_soft", 0.2, 0.5, 0.6)
    }

    pub fn ice() -> Self {
        Self::preset("ice", 0.015, 0.05, 0.10)
    }

    /// All built-in ground types.
    pub fn presets() -> [GroundType; 4] {
        [Self::road(), Self::sand_hard(), Self::sand_soft(), Self::ice()]
    }
}

// --- Terrain lookup ---
// The environment owns the policy of which ground lies where. The vehicle
// only asks for the ground under its current position.
pub trait TerrainProvider: Send + Sync {
    /// Returns the ground type at the given world position.
    fn ground_at(&self, position: &Vec3) -> Arc<GroundType>;
}

/// A single ground everywhere.
#[derive(Debug, Clone)]
pub struct UniformTerrain(pub Arc<GroundType>);

impl TerrainProvider for UniformTerrain {
    fn ground_at(&self, _position: &Vec3) -> Arc<GroundType> {
        Arc::clone(&self.0)
    }
}

/// Everything at or below `up_to_x` (and above the previous band) uses `ground`.
#[derive(Debug, Clone)]
pub struct TerrainBand {
    pub up_to_x: f64,
    pub ground: Arc<GroundType>,
}

/// Terrain split into zones along the world X axis.
#[derive(Debug, Clone)]
pub struct BandedTerrain {
    bands: Vec<TerrainBand>,
    fallback: Arc<GroundType>,
}

impl BandedTerrain {
    /// `bands` must be ordered by strictly increasing `up_to_x`. Positions
    /// beyond the last band use `fallback`.
    pub fn new(bands: Vec<TerrainBand>, fallback: Arc<GroundType>) -> Result<Self, ConfigError> {
        for pair in bands.windows(2) {
            if !(pair[0].up_to_x < pair[1].up_to_x) {
                return Err(ConfigError::UnorderedBands {
                    previous: pair[0].up_to_x,
                    next: pair[1].up_to_x,
                });
            }
        }
        for band in &bands {
            band.ground.validate()?;
        }
        fallback.validate()?;
        Ok(Self { bands, fallback })
    }

    /// Ice west of x = -250, road up to 25, hard sand up to 250, soft sand beyond.
    pub fn reference() -> Self {
        Self {
            bands: vec![
                TerrainBand {
                    up_to_x: -250.0,
                    ground: Arc::new(GroundType::ice()),
                },
                TerrainBand {
                    up_to_x: 25.0,
                    ground: Arc::new(GroundType::road()),
                },
                TerrainBand {
                    up_to_x: 250.0,
                    ground: Arc::new(GroundType::sand_hard()),
                },
            ],
            fallback: Arc::new(GroundType::sand_soft()),
        }
    }

    pub fn bands(&self) -> &[TerrainBand] {
        &self.bands
    }

    pub fn fallback(&self) -> &Arc<GroundType> {
        &self.fallback
    }
}

impl TerrainProvider for BandedTerrain {
    fn ground_at(&self, position: &Vec3) -> Arc<GroundType> {
        self.bands
            .iter()
            .find(|band| position.x <= band.up_to_x)
            .map(|band| Arc::clone(&band.ground))
            .unwrap_or_else(|| Arc::clone(&self.fallback))
    }
}
