// grip_sim/src/simulation/core/transforms.rs

use bevy::prelude::{EulerRot, Quat, Transform, Vec3 as BevyVec3};
use grip_core::prelude::{Vec3, Vehicle};

// =========================================================================
// == Coordinate System Conversion Helpers ==
// =========================================================================
//
// Both worlds are Y-up with the ground on X/Z, so positions only change
// precision. A car's local +X is its forward axis.

pub fn to_bevy_vec3(v: &Vec3) -> BevyVec3 {
    BevyVec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Yaw about +Y from the heading, plus the cosmetic roll and pitch.
///
/// Heading turns from +X towards +Z, which is a negative rotation about +Y.
pub fn vehicle_rotation(heading_deg: f64, roll_deg: f64, pitch_deg: f64) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        (-heading_deg).to_radians() as f32,
        roll_deg.to_radians() as f32,
        pitch_deg.to_radians() as f32,
    )
}

pub fn vehicle_transform(vehicle: &Vehicle) -> Transform {
    let body = vehicle.body_rotation();
    Transform {
        translation: to_bevy_vec3(&vehicle.position()),
        rotation: vehicle_rotation(vehicle.heading(), body.x, body.z),
        ..Default::default()
    }
}
