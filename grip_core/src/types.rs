// grip_core/src/types.rs

use nalgebra::{Vector2, Vector3};

// --- Core Type Aliases ---
/// World-space vector. The ground plane is X/Z, Y is up.
pub type Vec3 = Vector3<f64>;
/// Axle-local force pair: `x` longitudinal, `y` lateral.
pub type Vec2 = Vector2<f64>;

/// The two axles of the bicycle model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axle {
    Front,
    Rear,
}

impl Axle {
    pub const BOTH: [Axle; 2] = [Axle::Front, Axle::Rear];
}

/// One value per axle. Most of the per-tick bookkeeping is symmetric, so the
/// solver writes it once and indexes with an [`Axle`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerAxle<T> {
    pub front: T,
    pub rear: T,
}

impl<T> PerAxle<T> {
    pub fn new(front: T, rear: T) -> Self {
        Self { front, rear }
    }

    pub fn get(&self, axle: Axle) -> &T {
        match axle {
            Axle::Front => &self.front,
            Axle::Rear => &self.rear,
        }
    }

    pub fn get_mut(&mut self, axle: Axle) -> &mut T {
        match axle {
            Axle::Front => &mut self.front,
            Axle::Rear => &mut self.rear,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerAxle<U> {
        PerAxle {
            front: f(self.front),
            rear: f(self.rear),
        }
    }
}

impl<T: Clone> PerAxle<T> {
    pub fn splat(value: T) -> Self {
        Self {
            front: value.clone(),
            rear: value,
        }
    }
}

impl PerAxle<bool> {
    pub fn any(&self) -> bool {
        self.front || self.rear
    }

    pub fn all(&self) -> bool {
        self.front && self.rear
    }
}
