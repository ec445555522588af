// grip_sim/src/simulation/core/simulation_setup.rs

use bevy::time::TimeUpdateStrategy;

use crate::prelude::*;
use crate::simulation::core::app_state::SceneBuildSet;

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // --- CONFIGURE THE SPAWNING PIPELINE ---
        // This chain of SystemSets guarantees the correct spawning order.
        app.configure_sets(
            OnEnter(AppState::SceneBuilding),
            (
                SceneBuildSet::Configure,
                SceneBuildSet::Spawn,
                SceneBuildSet::Finalize,
            )
                .chain(),
        );

        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            (
                configure_fixed_time.in_set(SceneBuildSet::Configure),
                transition_to_running.in_set(SceneBuildSet::Finalize),
            ),
        );

        // Configure the runtime schedule graph.
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Input,
                SimulationSet::Terrain,
                SimulationSet::Dynamics,
                SimulationSet::Telemetry,
                SimulationSet::Clock,
            )
                .chain()
                .distributive_run_if(in_state(AppState::Running))
                .distributive_run_if(ticks_remaining),
        );

        app.add_systems(FixedUpdate, advance_clock.in_set(SimulationSet::Clock));
    }
}

/// Pins both the fixed timestep and the virtual clock to one tick, so every
/// app update runs exactly one `FixedUpdate`.
fn configure_fixed_time(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    mut fixed: ResMut<Time<Fixed>>,
) {
    let step = clock.tick_duration();
    fixed.set_timestep(step);
    commands.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    info!(
        "Fixed timestep set to {:.4} s for {} ticks.",
        clock.dt, clock.total_ticks
    );
}

/// This simple system runs once at the end of the `OnEnter(SceneBuilding)` chain.
/// Its only job is to move the app into the main `Running` state. A run of
/// zero ticks goes straight to `Finished`.
fn transition_to_running(clock: Res<SimulationClock>, mut next_state: ResMut<NextState<AppState>>) {
    if clock.is_finished() {
        info!("Scenario has no ticks to run. Transitioning to Finished state.");
        next_state.set(AppState::Finished);
        return;
    }
    info!("Scene building complete. Transitioning to Running state.");
    next_state.set(AppState::Running);
}

/// False once the run is complete, even if the state change to `Finished` has
/// not been applied yet.
fn ticks_remaining(clock: Option<Res<SimulationClock>>) -> bool {
    clock.is_some_and(|clock| !clock.is_finished())
}

fn advance_clock(mut clock: ResMut<SimulationClock>, mut next_state: ResMut<NextState<AppState>>) {
    if clock.advance() {
        info!(
            "Simulated {:.2} s in {} ticks. Transitioning to Finished state.",
            clock.elapsed(),
            clock.tick
        );
        next_state.set(AppState::Finished);
    }
}
