//! `axe-sim`: headless driver for the axe.
//!
//! Builds a world with one hand and one axe, replays a scenario of grab,
//! contact and recall inputs at a fixed step and logs what the axe does.
//! Feedback commands are drained by a logging thread in place of real audio
//! and haptics.
//!
//! # Main Loop
//!
//! 1. Load `axe.ini` (missing file means defaults) and the scenario
//! 2. Spawn the feedback thread, the hand, the mesh and the axe
//! 3. Register the contact dispatch and state change observers
//! 4. Every step: advance time, apply due scenario steps, run the schedule
//! 5. Shut the feedback thread down and print a summary
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --scenario demos/throw_and_recall.json
//! ```

use axe_recall::components::axe::AxeController;
use axe_recall::components::axemesh::AxeMesh;
use axe_recall::components::recallsignal::RecallSignal;
use axe_recall::components::transform::Transform3D;
use axe_recall::error::AxeError;
use axe_recall::events::axe::AxeStateChanged;
use axe_recall::resources::axeconfig::AxeConfig;
use axe_recall::resources::feedback::{setup_feedback, shutdown_feedback};
use axe_recall::resources::worldtime::WorldTime;
use axe_recall::scenario::{Scenario, ScenarioRunner};
use axe_recall::setup::AxeSetup;
use axe_recall::systems::axe::axe_tick_system;
use axe_recall::systems::contact::register_ground_contact_dispatch;
use axe_recall::systems::feedback::{feedback_thread, forward_feedback_cmds, update_feedback_cmds};
use axe_recall::systems::meshspin::mesh_spin_system;
use axe_recall::systems::movement::movement;
use axe_recall::systems::recallpoll::recall_poll_system;
use axe_recall::systems::time::update_world_time;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

/// Throwable, recallable axe simulation
#[derive(Parser)]
#[command(version, about = "Replays a scripted throw-and-recall session for the axe.")]
struct Cli {
    /// INI file with the axe tuning. Missing file means defaults.
    #[arg(long, value_name = "PATH", default_value = "./axe.ini")]
    config: PathBuf,

    /// JSON scenario to replay. Defaults to the built-in scenario.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Fixed simulation step, in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = 1.0 / 90.0)]
    dt: f32,

    /// Override the scenario length, in seconds.
    #[arg(long, value_name = "SECONDS")]
    duration: Option<f32>,

    /// Write the effective configuration to the --config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AxeError> {
    let mut config = AxeConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        info!("{e}; using defaults");
    }

    // Early-exit: dump the configuration and quit
    if cli.write_config {
        config.save_to_file()?;
        println!("configuration written to {}", cli.config.display());
        return Ok(());
    }

    if !(cli.dt.is_finite() && cli.dt > 0.0) {
        return Err(AxeError::Config(format!("--dt must be positive, got {}", cli.dt)));
    }

    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::builtin(),
    };
    if let Some(duration) = cli.duration {
        scenario.duration = duration;
    }

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    let poll_interval = config.poll_interval;
    world.insert_resource(config);

    let rx_cmd = setup_feedback(&mut world);
    let feedback = std::thread::spawn(move || feedback_thread(rx_cmd));

    let hand = world
        .spawn((
            Transform3D::new(scenario.hand),
            RecallSignal::new(poll_interval),
        ))
        .id();
    let mesh = world.spawn(AxeMesh::new()).id();
    let axe = AxeSetup::new()
        .with_hand(hand)
        .with_mesh(mesh)
        .at(scenario.axe)
        .spawn(&mut world)?;

    register_ground_contact_dispatch(&mut world);
    world.add_observer(
        |trigger: On<AxeStateChanged>, world_time: Res<WorldTime>| {
            let change = trigger.event();
            info!(
                "t={:.3} axe {:?}: {:?} -> {:?}",
                world_time.elapsed, change.axe, change.from, change.to
            );
        },
    );
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(recall_poll_system);
    update.add_systems(movement);
    update.add_systems(axe_tick_system.after(movement));
    update.add_systems(mesh_spin_system);
    update.add_systems(
        // feedback systems must be together
        (update_feedback_cmds, forward_feedback_cmds)
            .chain()
            .after(recall_poll_system),
    );

    // --------------- Main loop ---------------
    let mut runner = ScenarioRunner::new(scenario);
    let duration = runner.scenario().duration;
    info!("running {:.2}s at dt {:.4}s", duration, cli.dt);
    while world.resource::<WorldTime>().elapsed < duration {
        update_world_time(&mut world, cli.dt);
        let now = world.resource::<WorldTime>().elapsed;
        runner.apply_due(&mut world, now, hand, axe)?;
        update.run(&mut world);
        world.clear_trackers();
    }

    let (state, position) = {
        let controller = world.get::<AxeController>(axe.axe);
        let transform = world.get::<Transform3D>(axe.axe);
        (
            controller.map(|c| c.state()),
            transform.map(|t| t.position),
        )
    };
    let frames = world.resource::<WorldTime>().frame_count;

    shutdown_feedback(&mut world);
    let delivered = feedback.join().unwrap_or_else(|_| {
        error!("feedback thread panicked");
        0
    });

    info!(
        "done after {} steps: axe {:?} at {:?}, {} feedback commands, {} steps left unapplied",
        frames,
        state,
        position,
        delivered,
        runner.remaining()
    );
    Ok(())
}
