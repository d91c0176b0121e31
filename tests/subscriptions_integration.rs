//! Axe subscription lifecycle tests.
//!
//! Activation spawns observers bound to one axe; deactivation despawns them.
//! These tests check that events stop reaching deactivated axes, that tick
//! systems skip them, and that several axes never react to each other's
//! events.

use bevy_ecs::prelude::*;
use glam::Vec3;

use axe_recall::components::axe::{AxeController, AxeState};
use axe_recall::components::axemesh::AxeMesh;
use axe_recall::components::recallsignal::RecallSignal;
use axe_recall::components::subscriptions::AxeSubscriptions;
use axe_recall::components::transform::Transform3D;
use axe_recall::error::AxeError;
use axe_recall::events::contact::HeadEmbedded;
use axe_recall::events::deliver;
use axe_recall::events::grab::{GrabBegin, GrabEnd};
use axe_recall::resources::worldtime::WorldTime;
use axe_recall::scenario::{Scenario, ScenarioRunner};
use axe_recall::setup::{
    AxeSetup, SpawnedAxe, activate_axe, deactivate_axe, despawn_axe, is_active,
};
use axe_recall::systems::axe::axe_tick_system;
use axe_recall::systems::contact::register_ground_contact_dispatch;
use axe_recall::systems::meshspin::mesh_spin_system;
use axe_recall::systems::movement::movement;
use axe_recall::systems::recallpoll::recall_poll_system;
use axe_recall::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    register_ground_contact_dispatch(&mut world);
    world.flush();
    world
}

fn spawn_hand(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((Transform3D::new(position), RecallSignal::new(0.0)))
        .id()
}

fn spawn_axe(world: &mut World, hand: Entity, position: Vec3) -> SpawnedAxe {
    let mesh = world.spawn(AxeMesh::new()).id();
    AxeSetup::new()
        .with_hand(hand)
        .with_mesh(mesh)
        .at(position)
        .spawn(world)
        .unwrap()
}

fn tick(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(recall_poll_system);
    schedule.add_systems(movement);
    schedule.add_systems(axe_tick_system.after(movement));
    schedule.add_systems(mesh_spin_system);
    schedule.run(world);
}

fn state(world: &World, axe: Entity) -> AxeState {
    world.get::<AxeController>(axe).unwrap().state()
}

fn position(world: &World, entity: Entity) -> Vec3 {
    world.get::<Transform3D>(entity).unwrap().position
}

fn throw(world: &mut World, axe: Entity) {
    deliver(world, GrabBegin { axe });
    deliver(world, GrabEnd {
        axe,
        linear: Vec3::new(0.0, 0.0, 2.0),
        angular: Vec3::new(500.0, 0.0, 0.0),
    });
}

fn set_recall(world: &mut World, hand: Entity, active: bool) {
    world
        .get_mut::<RecallSignal>(hand)
        .unwrap()
        .set_active(active);
}

// ==================== DEACTIVATION ====================

#[test]
fn deactivated_axe_ignores_events() {
    let mut world = make_world();
    let hand = spawn_hand(&mut world, Vec3::ZERO);
    let axe = spawn_axe(&mut world, hand, Vec3::Z).axe;

    deactivate_axe(&mut world, axe).unwrap();
    deliver(&mut world, GrabBegin { axe });

    assert_eq!(state(&world, axe), AxeState::Idle);
    assert!(!is_active(&world, axe));
}

#[test]
fn deactivation_mid_recall_freezes_the_axe() {
    let mut world = make_world();
    let hand = spawn_hand(&mut world, Vec3::new(0.0, 1.5, 0.0));
    let axe = spawn_axe(&mut world, hand, Vec3::new(0.0, 1.5, 4.0)).axe;

    throw(&mut world, axe);
    deliver(&mut world, HeadEmbedded { axe });
    set_recall(&mut world, hand, true);
    tick(&mut world, 0.0);
    assert_eq!(state(&world, axe), AxeState::Recalling);
    tick(&mut world, 0.1);
    let frozen_at = position(&world, axe);

    deactivate_axe(&mut world, axe).unwrap();
    for _ in 0..10 {
        tick(&mut world, 0.1);
    }
    deliver(&mut world, GrabBegin { axe });

    assert_eq!(state(&world, axe), AxeState::Recalling);
    assert!(approx_vec(position(&world, axe), frozen_at));
}

#[test]
fn deactivated_axe_does_not_count_down() {
    let mut world = make_world();
    let hand = spawn_hand(&mut world, Vec3::ZERO);
    let axe = spawn_axe(&mut world, hand, Vec3::Z).axe;

    throw(&mut world, axe);
    deactivate_axe(&mut world, axe).unwrap();
    for _ in 0..20 {
        tick(&mut world, 0.1);
    }

    let controller = world.get::<AxeController>(axe).unwrap();
    assert!(!controller.recall_eligible());
    assert!(controller.cooldown_remaining() > 0.9);
}

#[test]
fn reactivated_axe_reacts_again() {
    let mut world = make_world();
    let hand = spawn_hand(&mut world, Vec3::ZERO);
    let axe = spawn_axe(&mut world, hand, Vec3::Z).axe;

    deactivate_axe(&mut world, axe).unwrap();
    activate_axe(&mut world, axe).unwrap();
    assert_eq!(world.get::<AxeSubscriptions>(axe).unwrap().len(), 5);

    deliver(&mut world, GrabBegin { axe });
    assert_eq!(state(&world, axe), AxeState::Held);
}

#[test]
fn despawned_axe_leaves_no_observers() {
    let mut world = make_world();
    let hand = spawn_hand(&mut world, Vec3::ZERO);
    let axe = spawn_axe(&mut world, hand, Vec3::Z).axe;
    let observers = world
        .get::<AxeSubscriptions>(axe)
        .unwrap()
        .observers
        .clone();

    despawn_axe(&mut world, axe).unwrap();
    for observer in observers {
        assert!(world.get_entity(observer).is_err());
    }
    // Events for the gone axe reach nobody
    deliver(&mut world, GrabBegin { axe });
    assert!(matches!(
        activate_axe(&mut world, axe),
        Err(AxeError::NotAnAxe(_))
    ));
}

// ==================== SEVERAL AXES ====================

#[test]
fn events_only_reach_their_axe() {
    let mut world = make_world();
    let hand = spawn_hand(&mut world, Vec3::ZERO);
    let first = spawn_axe(&mut world, hand, Vec3::Z).axe;
    let second = spawn_axe(&mut world, hand, Vec3::X).axe;

    deliver(&mut world, GrabBegin { axe: first });

    assert_eq!(state(&world, first), AxeState::Held);
    assert_eq!(state(&world, second), AxeState::Idle);
}

#[test]
fn recall_only_reaches_axes_of_that_hand() {
    let mut world = make_world();
    let left = spawn_hand(&mut world, Vec3::new(-1.0, 1.5, 0.0));
    let right = spawn_hand(&mut world, Vec3::new(1.0, 1.5, 0.0));
    let left_axe = spawn_axe(&mut world, left, Vec3::new(-1.0, 1.0, 3.0)).axe;
    let right_axe = spawn_axe(&mut world, right, Vec3::new(1.0, 1.0, 3.0)).axe;

    for axe in [left_axe, right_axe] {
        throw(&mut world, axe);
        deliver(&mut world, HeadEmbedded { axe });
    }
    set_recall(&mut world, left, true);
    tick(&mut world, 0.0);

    assert_eq!(state(&world, left_axe), AxeState::Recalling);
    assert_eq!(state(&world, right_axe), AxeState::Stuck);

    tick(&mut world, 1.0);
    assert!(approx_vec(
        position(&world, left_axe),
        Vec3::new(-1.0, 1.5, 0.0)
    ));
}

// ==================== SCENARIO ====================

#[test]
fn builtin_scenario_ends_in_hand() {
    let mut world = make_world();
    let scenario = Scenario::builtin();
    let hand = world
        .spawn((Transform3D::new(scenario.hand), RecallSignal::new(0.5)))
        .id();
    let axe = spawn_axe(&mut world, hand, scenario.axe);

    let dt = 1.0 / 90.0;
    let duration = scenario.duration;
    let mut runner = ScenarioRunner::new(scenario);
    while world.resource::<WorldTime>().elapsed < duration {
        update_world_time(&mut world, dt);
        let now = world.resource::<WorldTime>().elapsed;
        runner.apply_due(&mut world, now, hand, axe).unwrap();
        let mut schedule = Schedule::default();
        schedule.add_systems(recall_poll_system);
        schedule.add_systems(movement);
        schedule.add_systems(axe_tick_system.after(movement));
        schedule.add_systems(mesh_spin_system);
        schedule.run(&mut world);
    }

    assert!(runner.is_finished());
    assert_eq!(state(&world, axe.axe), AxeState::Held);
}

#[test]
fn scenario_can_toggle_activation() {
    let text = r#"{
        "duration": 1.0, "hand": [0, 0, 0], "axe": [0, 0, 1],
        "steps": [
            { "at": 0.1, "action": "deactivate" },
            { "at": 0.2, "action": "grab_begin" },
            { "at": 0.3, "action": "activate" },
            { "at": 0.4, "action": "grab_begin" }
        ]
    }"#;
    let scenario = Scenario::from_json(text).unwrap();
    let mut world = make_world();
    let hand = spawn_hand(&mut world, scenario.hand);
    let axe = spawn_axe(&mut world, hand, scenario.axe);
    let mut runner = ScenarioRunner::new(scenario);

    assert_eq!(runner.apply_due(&mut world, 0.25, hand, axe).unwrap(), 2);
    assert_eq!(state(&world, axe.axe), AxeState::Idle);
    assert!(!is_active(&world, axe.axe));

    assert_eq!(runner.apply_due(&mut world, 0.5, hand, axe).unwrap(), 2);
    assert_eq!(state(&world, axe.axe), AxeState::Held);
    assert!(runner.is_finished());
}
