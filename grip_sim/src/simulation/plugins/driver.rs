// grip_sim/src/simulation/plugins/driver.rs

//! Scripted driving. A `DriveScript` says which keys are held when, and an
//! `InputShaper` turns held keys into the analog `DriverInput` the vehicle
//! consumes, ramping the way a keyboard driver would.

use crate::prelude::*;

/// Pedal rise per tick while the key is held.
pub const PEDAL_INCREASE: f64 = 0.02;
/// Pedal fall per tick once the key is released.
pub const PEDAL_DECREASE: f64 = 0.06;
/// Steering change per tick, both when steering and when re-centering.
pub const STEERING_SPEED: f64 = 0.1;
/// Released steering inside this band snaps to zero.
pub const STEERING_DEADZONE: f64 = 0.1;

pub struct DriverInputPlugin;

impl Plugin for DriverInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (apply_drive_scripts, shape_driver_input)
                .chain()
                .in_set(SimulationSet::Input),
        );
    }
}

// --- Components ---

/// The keys held during the current tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub space: bool,
}

impl HeldKeys {
    pub fn from_keys(keys: &[DriverKey]) -> Self {
        let mut held = Self::default();
        for key in keys {
            match key {
                DriverKey::Up => held.up = true,
                DriverKey::Down => held.down = true,
                DriverKey::Left => held.left = true,
                DriverKey::Right => held.right = true,
                DriverKey::Space => held.space = true,
            }
        }
        held
    }

    pub fn pressed(&self, key: DriverKey) -> bool {
        match key {
            DriverKey::Up => self.up,
            DriverKey::Down => self.down,
            DriverKey::Left => self.left,
            DriverKey::Right => self.right,
            DriverKey::Space => self.space,
        }
    }
}

/// Analog pedal and steering positions carried from tick to tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputShaper {
    pub throttle: f64,
    pub brake: f64,
    pub steering: f64,
}

impl InputShaper {
    /// Moves the pedals and wheel one tick towards what `keys` asks for.
    /// Left wins over right when both are held.
    pub fn step(&mut self, keys: &HeldKeys) -> DriverInput {
        self.throttle = ramp_pedal(self.throttle, keys.up);
        self.brake = ramp_pedal(self.brake, keys.down);

        self.steering = if keys.left {
            (self.steering + STEERING_SPEED).min(1.0)
        } else if keys.right {
            (self.steering - STEERING_SPEED).max(-1.0)
        } else if self.steering < -STEERING_DEADZONE {
            self.steering + STEERING_SPEED
        } else if self.steering > STEERING_DEADZONE {
            self.steering - STEERING_SPEED
        } else {
            0.0
        };

        DriverInput {
            throttle: self.throttle,
            brake: self.brake,
            steering: self.steering,
            handbrake: if keys.space { 1.0 } else { 0.0 },
        }
    }
}

fn ramp_pedal(value: f64, held: bool) -> f64 {
    if held {
        (value + PEDAL_INCREASE).min(1.0)
    } else {
        (value - PEDAL_DECREASE).max(0.0)
    }
}

/// Keys over time. Each step holds its keys until the next step starts.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct DriveScript {
    steps: Vec<ScriptStep>,
}

impl DriveScript {
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { steps }
    }

    /// Keys held at `time` seconds. Nothing is held before the first step.
    pub fn keys_at(&self, time: f64) -> &[DriverKey] {
        self.steps
            .iter()
            .rev()
            .find(|step| step.at <= time)
            .map(|step| step.keys.as_slice())
            .unwrap_or(&[])
    }
}

// --- Systems ---

fn apply_drive_scripts(
    clock: Res<SimulationClock>,
    mut query: Query<(&DriveScript, &mut HeldKeys)>,
) {
    let time = clock.elapsed();
    for (script, mut held) in &mut query {
        let keys = HeldKeys::from_keys(script.keys_at(time));
        if *held != keys {
            *held = keys;
        }
    }
}

fn shape_driver_input(mut query: Query<(&HeldKeys, &mut InputShaper, &mut DriverInput)>) {
    for (keys, mut shaper, mut input) in &mut query {
        *input = shaper.step(keys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn step(at: f64, keys: &[DriverKey]) -> ScriptStep {
        ScriptStep {
            at,
            keys: keys.to_vec(),
        }
    }

    #[test]
    fn pedals_ramp_up_slowly_and_drop_fast() {
        let mut shaper = InputShaper::default();
        let held = HeldKeys::from_keys(&[DriverKey::Up]);
        for _ in 0..10 {
            shaper.step(&held);
        }
        assert_relative_eq!(shaper.throttle, 0.2, epsilon = 1e-12);

        for _ in 0..60 {
            shaper.step(&held);
        }
        assert_relative_eq!(shaper.throttle, 1.0);

        let released = HeldKeys::default();
        let input = shaper.step(&released);
        assert_relative_eq!(input.throttle, 0.94, epsilon = 1e-12);
        for _ in 0..20 {
            shaper.step(&released);
        }
        assert_eq!(shaper.throttle, 0.0);
    }

    #[test]
    fn steering_saturates_and_recenters() {
        let mut shaper = InputShaper::default();
        let left = HeldKeys::from_keys(&[DriverKey::Left]);
        for _ in 0..15 {
            shaper.step(&left);
        }
        assert_relative_eq!(shaper.steering, 1.0);

        let released = HeldKeys::default();
        for _ in 0..5 {
            shaper.step(&released);
        }
        assert_relative_eq!(shaper.steering, 0.5, epsilon = 1e-9);
        for _ in 0..10 {
            shaper.step(&released);
        }
        assert_eq!(shaper.steering, 0.0);

        let right = HeldKeys::from_keys(&[DriverKey::Right]);
        let input = shaper.step(&right);
        assert_relative_eq!(input.steering, -0.1);
    }

    #[test]
    fn handbrake_is_binary() {
        let mut shaper = InputShaper::default();
        let input = shaper.step(&HeldKeys::from_keys(&[DriverKey::Space]));
        assert_eq!(input.handbrake, 1.0);
        let input = shaper.step(&HeldKeys::default());
        assert_eq!(input.handbrake, 0.0);
    }

    #[test]
    fn script_holds_keys_until_the_next_step() {
        let script = DriveScript::new(vec![
            step(5.0, &[]),
            step(1.0, &[DriverKey::Up]),
            step(3.0, &[DriverKey::Down, DriverKey::Space]),
        ]);
        assert!(script.keys_at(0.5).is_empty());
        assert_eq!(script.keys_at(1.0), &[DriverKey::Up]);
        assert_eq!(script.keys_at(2.9), &[DriverKey::Up]);
        let held = HeldKeys::from_keys(script.keys_at(4.0));
        assert!(held.pressed(DriverKey::Down) && held.pressed(DriverKey::Space));
        assert!(!held.pressed(DriverKey::Up));
        assert!(script.keys_at(100.0).is_empty());
    }
}
