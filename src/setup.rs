//! Building, activating and removing axes.
//!
//! [`AxeSetup`] validates the two collaborators an axe cannot work without
//! (a hand with a [`Transform3D`] and a mesh with an [`AxeMesh`]) and spawns
//! the axe together with its head and body collider parts. Spawned axes are
//! activated right away.
//!
//! Activation spawns one [`Observer`] entity per inbound event kind, each
//! bound to the axe it was created for, and records them in
//! [`AxeSubscriptions`]. Deactivation despawns those observers; from then on
//! no event reaches the axe and the tick systems skip it. Activation is
//! idempotent in both directions.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use log::{debug, info};

use crate::components::axe::{AxeController, AxeTuning};
use crate::components::axemesh::AxeMesh;
use crate::components::axepart::AxePart;
use crate::components::rigidbody::RigidBody;
use crate::components::subscriptions::AxeSubscriptions;
use crate::components::transform::Transform3D;
use crate::error::AxeError;
use crate::events::contact::{BodyImpacted, HeadEmbedded};
use crate::events::feedback::FeedbackCmd;
use crate::events::grab::{GrabBegin, GrabEnd};
use crate::events::recall::RecallPoll;
use crate::resources::axeconfig::AxeConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::axe::{
    AxeEventContext, handle_body_impacted, handle_grab_begin, handle_grab_end,
    handle_head_embedded, handle_recall_poll,
};

/// Entities created for one axe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnedAxe {
    pub axe: Entity,
    pub head: Entity,
    pub body: Entity,
}

/// Builder for a new axe.
#[derive(Clone, Debug, Default)]
pub struct AxeSetup {
    hand: Option<Entity>,
    mesh: Option<Entity>,
    position: Vec3,
    rotation: Quat,
    center_of_mass: Vec3,
    tuning: Option<AxeTuning>,
}

impl AxeSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand the axe is grabbed by and recalled to.
    pub fn with_hand(mut self, hand: Entity) -> Self {
        self.hand = Some(hand);
        self
    }

    /// Visual mesh that spins in flight.
    pub fn with_mesh(mut self, mesh: Entity) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_center_of_mass(mut self, center_of_mass: Vec3) -> Self {
        self.center_of_mass = center_of_mass;
        self
    }

    /// Override the tuning. Without it, [`AxeConfig::tuning`] is used.
    pub fn with_tuning(mut self, tuning: AxeTuning) -> Self {
        self.tuning = Some(tuning);
        self
    }

    /// Validate the collaborators, spawn the axe and its parts, and activate it.
    ///
    /// Also makes sure the resources the axe observers read exist.
    /// Feedback commands are only written once a
    /// [`FeedbackBridge`](crate::resources::feedback::FeedbackBridge) is
    /// installed, and whoever installs it must also run
    /// [`update_feedback_cmds`](crate::systems::feedback::update_feedback_cmds)
    /// every tick.
    pub fn spawn(self, world: &mut World) -> Result<SpawnedAxe, AxeError> {
        let hand = self
            .hand
            .filter(|&hand| world.get::<Transform3D>(hand).is_some())
            .ok_or(AxeError::MissingHand)?;
        let mesh = self
            .mesh
            .filter(|&mesh| world.get::<AxeMesh>(mesh).is_some())
            .ok_or(AxeError::MissingMesh)?;

        ensure_axe_resources(world);
        let tuning = match self.tuning {
            Some(tuning) => tuning,
            None => world.resource::<AxeConfig>().tuning(),
        };

        let axe = world
            .spawn((
                AxeController::new(hand, mesh, tuning),
                RigidBody::with_gravity(tuning.normal_gravity)
                    .with_center_of_mass(self.center_of_mass),
                Transform3D::new(self.position).with_rotation(self.rotation),
            ))
            .id();
        let head = world.spawn(AxePart::head(axe)).id();
        let body = world.spawn(AxePart::body(axe)).id();

        activate_axe(world, axe)?;
        info!(
            "spawned axe {:?} at {:?} (hand {:?}, mesh {:?})",
            axe, self.position, hand, mesh
        );
        Ok(SpawnedAxe { axe, head, body })
    }
}

fn ensure_axe_resources(world: &mut World) {
    world.init_resource::<WorldTime>();
    world.init_resource::<AxeConfig>();
    world.init_resource::<Messages<FeedbackCmd>>();
}

/// Subscribe `axe` to grab, contact and recall events.
pub fn activate_axe(world: &mut World, axe: Entity) -> Result<(), AxeError> {
    if world.get::<AxeController>(axe).is_none() {
        return Err(AxeError::NotAnAxe(axe));
    }
    if world.get::<AxeSubscriptions>(axe).is_some() {
        debug!("axe {:?} already active", axe);
        return Ok(());
    }
    ensure_axe_resources(world);

    let observers = [
        world
            .spawn(Observer::new(
                move |trigger: On<GrabBegin>, mut ctx: AxeEventContext| {
                    handle_grab_begin(axe, trigger.event(), &mut ctx);
                },
            ))
            .id(),
        world
            .spawn(Observer::new(
                move |trigger: On<GrabEnd>, mut ctx: AxeEventContext| {
                    handle_grab_end(axe, trigger.event(), &mut ctx);
                },
            ))
            .id(),
        world
            .spawn(Observer::new(
                move |trigger: On<HeadEmbedded>, mut ctx: AxeEventContext| {
                    handle_head_embedded(axe, trigger.event(), &mut ctx);
                },
            ))
            .id(),
        world
            .spawn(Observer::new(
                move |trigger: On<BodyImpacted>, mut ctx: AxeEventContext| {
                    handle_body_impacted(axe, trigger.event(), &mut ctx);
                },
            ))
            .id(),
        world
            .spawn(Observer::new(
                move |trigger: On<RecallPoll>, mut ctx: AxeEventContext| {
                    handle_recall_poll(axe, trigger.event(), &mut ctx);
                },
            ))
            .id(),
    ];
    world.flush();

    world
        .entity_mut(axe)
        .insert(AxeSubscriptions::new(observers));
    debug!("axe {:?} activated", axe);
    Ok(())
}

/// Drop every subscription of `axe`. No event reaches it afterwards.
pub fn deactivate_axe(world: &mut World, axe: Entity) -> Result<(), AxeError> {
    if world.get::<AxeController>(axe).is_none() {
        return Err(AxeError::NotAnAxe(axe));
    }
    let Some(subscriptions) = world.entity_mut(axe).take::<AxeSubscriptions>() else {
        debug!("axe {:?} already inactive", axe);
        return Ok(());
    };
    for observer in subscriptions.observers {
        world.despawn(observer);
    }
    debug!("axe {:?} deactivated", axe);
    Ok(())
}

pub fn is_active(world: &World, axe: Entity) -> bool {
    world.get::<AxeSubscriptions>(axe).is_some()
}

/// Deactivate `axe` and despawn it with its collider parts.
///
/// The hand and mesh are not owned by the axe and are left alone.
pub fn despawn_axe(world: &mut World, axe: Entity) -> Result<(), AxeError> {
    deactivate_axe(world, axe)?;
    let parts: Vec<Entity> = world
        .query::<(Entity, &AxePart)>()
        .iter(world)
        .filter(|(_, part)| part.axe == axe)
        .map(|(entity, _)| entity)
        .collect();
    for part in parts {
        world.despawn(part);
    }
    world.despawn(axe);
    info!("despawned axe {:?}", axe);
    Ok(())
}
