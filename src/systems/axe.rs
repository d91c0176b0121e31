//! Axe systems and observers.
//!
//! Inbound events ([`GrabBegin`], [`GrabEnd`], [`HeadEmbedded`],
//! [`BodyImpacted`], [`RecallPoll`]) are handled by per-axe observers spawned
//! by [`activate_axe`](crate::setup::activate_axe). Each observer forwards to
//! one of the `handle_*` functions here, which run the matching
//! [`AxeController`] transition and then apply the returned cues:
//!
//! - mesh reset on the axe's [`AxeMesh`]
//! - trigger/solid mode on the axe's [`AxePart`] colliders
//! - [`FeedbackCmd`] messages for audio and haptics, only while a
//!   [`FeedbackBridge`] is installed
//! - an [`AxeStateChanged`] trigger when the state actually changed
//!
//! [`axe_tick_system`] advances cooldowns and recall flights every tick.
//!
//! # Related
//!
//! - [`crate::systems::meshspin`] – mesh spin per state
//! - [`crate::systems::recallpoll`] – emits the debounced [`RecallPoll`]

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, info, warn};

use crate::components::axe::{AxeCollision, AxeController, AxeCue, AxeCues, AxeState};
use crate::components::axemesh::AxeMesh;
use crate::components::axepart::AxePart;
use crate::components::rigidbody::RigidBody;
use crate::components::subscriptions::AxeSubscriptions;
use crate::components::transform::Transform3D;
use crate::events::axe::AxeStateChanged;
use crate::events::contact::{BodyImpacted, HeadEmbedded};
use crate::events::feedback::FeedbackCmd;
use crate::events::grab::{GrabBegin, GrabEnd};
use crate::events::recall::RecallPoll;
use crate::resources::axeconfig::AxeConfig;
use crate::resources::feedback::FeedbackBridge;
use crate::resources::worldtime::WorldTime;

/// Bundled parameters shared by the axe observers.
#[derive(SystemParam)]
pub struct AxeEventContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub axes: Query<
        'w,
        's,
        (
            &'static mut AxeController,
            &'static mut RigidBody,
            &'static Transform3D,
        ),
    >,
    pub hands: Query<'w, 's, &'static Transform3D, Without<AxeController>>,
    pub meshes: Query<'w, 's, &'static mut AxeMesh>,
    pub parts: Query<'w, 's, &'static mut AxePart>,
    pub world_time: Res<'w, WorldTime>,
    pub config: Res<'w, AxeConfig>,
    pub feedback_cmds: MessageWriter<'w, FeedbackCmd>,
    /// Nothing drains the feedback messages without a bridge.
    pub bridge: Option<Res<'w, FeedbackBridge>>,
}

/// Outcome of one transition, detached from the controller borrow.
struct Reaction {
    from: AxeState,
    to: AxeState,
    hand: Entity,
    mesh: Entity,
    cues: AxeCues,
}

impl AxeEventContext<'_, '_> {
    /// Run `transition` on `axe`'s controller and body.
    fn react(
        &mut self,
        axe: Entity,
        transition: impl FnOnce(&mut AxeController, &mut RigidBody, &Transform3D) -> AxeCues,
    ) -> Option<Reaction> {
        let Ok((mut controller, mut body, transform)) = self.axes.get_mut(axe) else {
            warn!("axe {:?} has no controller, event dropped", axe);
            return None;
        };
        let from = controller.state();
        let cues = transition(&mut *controller, &mut *body, transform);
        Some(Reaction {
            from,
            to: controller.state(),
            hand: controller.hand(),
            mesh: controller.mesh(),
            cues,
        })
    }

    /// Apply the cues of a transition and announce a state change.
    fn apply(&mut self, axe: Entity, reaction: Reaction) {
        for cue in reaction.cues {
            match cue {
                AxeCue::ResetMesh => match self.meshes.get_mut(reaction.mesh) {
                    Ok(mut mesh) => mesh.reset(),
                    Err(_) => warn!("axe {:?}: mesh {:?} is gone", axe, reaction.mesh),
                },
                AxeCue::TriggerColliders(is_trigger) => {
                    for mut part in self.parts.iter_mut().filter(|part| part.axe == axe) {
                        part.is_trigger = is_trigger;
                    }
                }
                AxeCue::PlayOneShot(kind) => self.send_feedback(FeedbackCmd::PlayOneShot {
                    axe,
                    clip: self.config.clip_id(kind).to_string(),
                }),
                AxeCue::PlayLoop(kind) => self.send_feedback(FeedbackCmd::PlayLoop {
                    axe,
                    clip: self.config.clip_id(kind).to_string(),
                }),
                AxeCue::HapticPulse => self.send_feedback(FeedbackCmd::HapticPulse {
                    hand: reaction.hand,
                }),
                AxeCue::HapticSustained => self.send_feedback(FeedbackCmd::HapticSustained {
                    hand: reaction.hand,
                }),
            }
        }

        if reaction.from != reaction.to {
            debug!("axe {:?}: {:?} -> {:?}", axe, reaction.from, reaction.to);
            self.commands.trigger(AxeStateChanged {
                axe,
                from: reaction.from,
                to: reaction.to,
            });
        }
    }

    fn send_feedback(&mut self, cmd: FeedbackCmd) {
        if self.bridge.is_some() {
            self.feedback_cmds.write(cmd);
        }
    }

    fn run(
        &mut self,
        axe: Entity,
        transition: impl FnOnce(&mut AxeController, &mut RigidBody, &Transform3D) -> AxeCues,
    ) {
        if let Some(reaction) = self.react(axe, transition) {
            self.apply(axe, reaction);
        }
    }
}

pub fn handle_grab_begin(axe: Entity, event: &GrabBegin, ctx: &mut AxeEventContext) {
    if event.axe != axe {
        return;
    }
    ctx.run(axe, |controller, body, _| controller.grab_begin(body));
}

pub fn handle_grab_end(axe: Entity, event: &GrabEnd, ctx: &mut AxeEventContext) {
    if event.axe != axe {
        return;
    }
    let (linear, angular) = (event.linear, event.angular);
    ctx.run(axe, |controller, body, _| {
        controller.grab_end(linear, angular, body)
    });
}

pub fn handle_head_embedded(axe: Entity, event: &HeadEmbedded, ctx: &mut AxeEventContext) {
    if event.axe != axe {
        return;
    }
    ctx.run(axe, |controller, body, _| controller.on_embed(body));
}

pub fn handle_body_impacted(axe: Entity, event: &BodyImpacted, ctx: &mut AxeEventContext) {
    if event.axe != axe {
        return;
    }
    ctx.run(axe, |controller, body, _| controller.on_impact(body));
}

/// Recall check for `axe`. Only reports from the axe's own hand count.
pub fn handle_recall_poll(axe: Entity, event: &RecallPoll, ctx: &mut AxeEventContext) {
    let Ok((controller, _, _)) = ctx.axes.get(axe) else {
        return;
    };
    if controller.hand() != event.hand {
        return;
    }
    let Ok(hand) = ctx.hands.get(event.hand) else {
        warn!("axe {:?}: hand {:?} has no transform", axe, event.hand);
        return;
    };
    let hand_position = hand.position;
    let now = ctx.world_time.elapsed;
    let active = event.active;
    debug!("axe {:?}: recall poll (active={})", axe, active);
    ctx.run(axe, |controller, body, transform| {
        controller.poll_recall(active, now, transform, hand_position, body)
    });
}

/// Advance cooldowns and recall flights of active axes.
pub fn axe_tick_system(
    world_time: Res<WorldTime>,
    mut axes: Query<(Entity, &mut AxeController, &mut Transform3D), With<AxeSubscriptions>>,
) {
    for (entity, mut controller, mut transform) in axes.iter_mut() {
        let report = controller.tick(world_time.delta, world_time.elapsed, &mut transform);
        if report.became_eligible {
            debug!("axe {:?}: recall available", entity);
        }
        if report.arrived {
            info!("axe {:?}: arrived at hand, waiting for grab", entity);
        }
    }
}
