// grip_sim/src/simulation/plugins/terrain.rs

use std::sync::Arc;

use crate::prelude::*;

/// The world's ground layout, shared with every car.
#[derive(Resource, Clone)]
pub struct Terrain(pub Arc<dyn TerrainProvider>);

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, sample_terrain.in_set(SimulationSet::Terrain));
    }
}

/// Hands each car the ground under its current position. Cars whose ground
/// is unchanged are not marked as changed.
fn sample_terrain(terrain: Res<Terrain>, mut query: Query<&mut Vehicle>) {
    for mut vehicle in &mut query {
        let ground = terrain.0.ground_at(&vehicle.position());
        if !Arc::ptr_eq(&ground, &vehicle.ground()) {
            vehicle.set_ground(ground);
        }
    }
}
