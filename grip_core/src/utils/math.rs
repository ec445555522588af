// grip_core/src/utils/math.rs

use num_traits::Float;

/// Gravitational acceleration in m/s^2.
pub const G: f64 = 9.81;

/// Air density at sea level in kg/m^3.
pub const AIR_DENSITY: f64 = 1.29;

fn cast<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Linear interpolation between `a` and `b`; `t = 0` gives `a`, `t = 1` gives `b`.
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees<T: Float>(angle: T) -> T {
    let full_turn = cast::<T>(360.0);
    let mut wrapped = angle % full_turn;
    if wrapped < T::zero() {
        wrapped = wrapped + full_turn;
    }
    // `-1e-17 + 360.0` rounds to exactly 360.0.
    if wrapped >= full_turn {
        T::zero()
    } else {
        wrapped
    }
}

/// Weight force in newtons.
pub fn weight(mass: f64) -> f64 {
    mass * G
}

/// Aerodynamic drag constant `c` such that `F_drag = c * v^2`.
pub fn drag_constant(drag_coefficient: f64, frontal_area: f64) -> f64 {
    0.5 * drag_coefficient * frontal_area * AIR_DENSITY
}

pub fn mps_to_kmh(meters_per_second: f64) -> f64 {
    meters_per_second * 3.6
}
