//! Throwable, recallable axe.
//!
//! [`AxeController`] is the state machine that decides what the axe does in
//! response to grabs, releases, ground contacts and recall requests, and
//! which physics parameters its [`RigidBody`] gets in each state.
//!
//! ```text
//! Idle ──grab──▶ Held ──release (slow)──▶ Dropped ─┐
//!                 │                                ├─head embeds─▶ Stuck
//!                 └─────release (spin)───▶ Thrown ─┘
//! Dropped / Thrown / Stuck ──recall (eligible)──▶ Recalling ──grab──▶ Held
//! ```
//!
//! A body impact forces a drop from every state but Dropped, and a grab
//! wins from every state. Any other (state, event) pair is ignored.
//!
//! The controller is ECS-agnostic: transition methods mutate the body they
//! are given and return [`AxeCues`] describing the side effects that live on
//! other entities (mesh reset, collider mode, audio and haptics). The
//! observers in [`crate::systems::axe`] apply those cues.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;
use log::{debug, trace};
use smallvec::SmallVec;

use super::rigidbody::{MotionConstraints, RigidBody};
use super::transform::Transform3D;

/// Phase of the axe. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxeState {
    /// Spawned and never grabbed.
    #[default]
    Idle,
    Held,
    Dropped,
    /// Released with spin; flying under low gravity.
    Thrown,
    /// Head embedded in a surface.
    Stuck,
    /// Flying back to the hand.
    Recalling,
}

/// Tunable constants of an axe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxeTuning {
    /// Seconds after a drop or throw before recall is allowed.
    pub cooldown: f32,
    /// Recall distances below this take the straight path.
    pub throw_threshold: f32,
    /// Sideways offset of the arched path's control point, along world Z.
    pub arc_height: f32,
    /// Releases with `|angular.x|` below this are drops, the rest throws.
    pub drop_spin_threshold: f32,
    /// Factor applied to the release velocity of a throw.
    pub throw_boost: f32,
    /// Mesh spin while thrown, degrees per second.
    pub travel_spin_rate: f32,
    /// Mesh spin while recalling, degrees per second.
    pub recall_spin_rate: f32,
    pub normal_gravity: Vec3,
    /// Gravity while thrown.
    pub low_gravity: Vec3,
}

impl Default for AxeTuning {
    fn default() -> Self {
        Self {
            cooldown: 1.0,
            throw_threshold: 12.0,
            arc_height: 10.0,
            drop_spin_threshold: 350.0,
            throw_boost: 2.0,
            travel_spin_rate: -720.0,
            recall_spin_rate: 360.0,
            normal_gravity: Vec3::new(0.0, -9.81, 0.0),
            low_gravity: Vec3::new(0.0, -2.81, 0.0),
        }
    }
}

/// How a release is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseKind {
    Drop,
    Throw,
}

impl ReleaseKind {
    /// Classify a release by the spin around the axe's X axis.
    ///
    /// The magnitude is truncated to a whole number before comparing, as the
    /// grab source reports it. Non-finite spin is a drop.
    pub fn classify(angular_velocity: Vec3, threshold: f32) -> Self {
        let spin = angular_velocity.x;
        if !spin.is_finite() {
            return ReleaseKind::Drop;
        }
        if spin.trunc().abs() < threshold {
            ReleaseKind::Drop
        } else {
            ReleaseKind::Throw
        }
    }
}

/// Audio clips the axe asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClipKind {
    /// Looping whoosh while thrown.
    Spin,
    Grab,
    Returning,
    /// Head embedding in a surface.
    Collision,
    /// Handle hitting a surface.
    WrongCollision,
}

/// Side effect of a transition that lives outside the axe's own body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxeCue {
    /// Put the mesh back to its rest orientation.
    ResetMesh,
    /// Switch the head and body colliders to trigger (`true`) or solid mode.
    TriggerColliders(bool),
    PlayOneShot(ClipKind),
    PlayLoop(ClipKind),
    /// Short buzz on the hand; stops any sustained buzz.
    HapticPulse,
    /// Continuous buzz on the hand until the next pulse.
    HapticSustained,
}

pub type AxeCues = SmallVec<[AxeCue; 4]>;

/// Return-flight path, fixed when the recall starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecallPath {
    /// Simulation time the recall started at.
    pub started_at: f32,
    pub origin: Vec3,
    /// Hand position when the recall started. Not re-sampled.
    pub target: Vec3,
    /// Control point of the arched path. Unused by short recalls.
    pub midpoint: Vec3,
    /// Straight-line distance from origin to target.
    pub length: f32,
    pub is_short: bool,
}

impl RecallPath {
    /// Plan a recall from `origin` to `target`.
    ///
    /// Short recalls fly straight. Long ones arch through a control point
    /// half way between origin and target, pushed `arc_height` along world
    /// `-Z` when the axe faces `-Z` and along `+Z` otherwise.
    pub fn new(origin: Vec3, target: Vec3, forward: Vec3, now: f32, tuning: &AxeTuning) -> Self {
        let length = origin.distance(target);
        let is_short = length < tuning.throw_threshold;
        let midpoint = if is_short {
            origin
        } else {
            let side = if forward.z < 0.0 { -Vec3::Z } else { Vec3::Z };
            origin + (target - origin) / 2.0 + side * tuning.arc_height
        };
        Self {
            started_at: now,
            origin,
            target,
            midpoint,
            length,
            is_short,
        }
    }

    /// Raw path parameter at time `now`.
    ///
    /// Distance covered is elapsed time times the path length, normalised
    /// back by the same length: every recall covers its path in the same
    /// wall-clock time. A zero-length path falls back to the elapsed time.
    pub fn parameter(&self, now: f32) -> f32 {
        let elapsed = now - self.started_at;
        if self.length > 0.0 {
            let covered = elapsed * self.length;
            covered / self.length
        } else {
            elapsed
        }
    }

    /// Position on the path for raw parameter `t`.
    pub fn position_for(&self, t: f32) -> Vec3 {
        if self.is_short {
            self.origin.lerp(self.target, (t * 2.0).clamp(0.0, 1.0))
        } else {
            let t = t.clamp(0.0, 1.0);
            let p1 = self.origin.lerp(self.midpoint, t);
            let p2 = self.midpoint.lerp(self.target, t);
            p1.lerp(p2, t)
        }
    }

    pub fn position_at(&self, now: f32) -> Vec3 {
        self.position_for(self.parameter(now))
    }

    /// Whether the path has reached the target at time `now`.
    pub fn has_arrived(&self, now: f32) -> bool {
        let t = self.parameter(now);
        if self.is_short { t * 2.0 >= 1.0 } else { t >= 1.0 }
    }
}

/// What happened during one [`AxeController::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The cooldown ran out on this tick.
    pub became_eligible: bool,
    /// The recall path reached the hand on this tick.
    pub arrived: bool,
}

/// State machine of one axe.
///
/// Holds the ids of the two entities it depends on: the hand it returns to
/// and the mesh it spins. Both are validated when the axe is spawned via
/// [`AxeSetup`](crate::setup::AxeSetup).
#[derive(Component, Clone, Debug)]
pub struct AxeController {
    state: AxeState,
    recall_eligible: bool,
    cooldown_remaining: f32,
    recall: Option<RecallPath>,
    recall_arrived: bool,
    hand: Entity,
    mesh: Entity,
    tuning: AxeTuning,
}

impl AxeController {
    pub fn new(hand: Entity, mesh: Entity, tuning: AxeTuning) -> Self {
        Self {
            state: AxeState::Idle,
            recall_eligible: false,
            cooldown_remaining: 0.0,
            recall: None,
            recall_arrived: false,
            hand,
            mesh,
            tuning,
        }
    }

    pub fn state(&self) -> AxeState {
        self.state
    }

    pub fn recall_eligible(&self) -> bool {
        self.recall_eligible
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Path of the current (or last) recall.
    pub fn recall_path(&self) -> Option<&RecallPath> {
        self.recall.as_ref()
    }

    pub fn hand(&self) -> Entity {
        self.hand
    }

    pub fn mesh(&self) -> Entity {
        self.mesh
    }

    pub fn tuning(&self) -> &AxeTuning {
        &self.tuning
    }

    // ==================== TRANSITIONS ====================

    /// The hand closed on the axe. Applies from every state.
    pub fn grab_begin(&mut self, body: &mut RigidBody) -> AxeCues {
        body.stop();
        body.set_use_gravity(false);
        body.kinematic = true;

        self.recall_eligible = false;
        self.recall = None;
        self.recall_arrived = false;
        self.state = AxeState::Held;

        SmallVec::from_slice(&[
            AxeCue::ResetMesh,
            AxeCue::TriggerColliders(false),
            AxeCue::HapticPulse,
            AxeCue::PlayOneShot(ClipKind::Grab),
        ])
    }

    /// The hand let go with the given release velocities.
    ///
    /// Only meaningful while held.
    pub fn grab_end(&mut self, linear: Vec3, angular: Vec3, body: &mut RigidBody) -> AxeCues {
        if self.state != AxeState::Held {
            trace!("grab_end ignored in {:?}", self.state);
            return AxeCues::new();
        }
        match ReleaseKind::classify(angular, self.tuning.drop_spin_threshold) {
            ReleaseKind::Drop => {
                self.drop(body);
                AxeCues::new()
            }
            ReleaseKind::Throw => self.throw(linear, angular, body),
        }
    }

    /// The head embedded in a surface while dropped or thrown.
    pub fn head_embedded(&mut self, body: &mut RigidBody) -> AxeCues {
        if !matches!(self.state, AxeState::Dropped | AxeState::Thrown) {
            trace!("head_embedded ignored in {:?}", self.state);
            return AxeCues::new();
        }
        body.set_use_gravity(false);
        body.kinematic = true;
        self.recall_eligible = true;
        self.state = AxeState::Stuck;
        SmallVec::from_slice(&[AxeCue::PlayOneShot(ClipKind::Collision)])
    }

    /// The handle hit a surface. Forces a drop unless already dropped.
    pub fn body_impacted(&mut self, body: &mut RigidBody) -> AxeCues {
        if self.state == AxeState::Dropped {
            trace!("body_impacted ignored while dropped");
            return AxeCues::new();
        }
        self.drop(body);
        SmallVec::from_slice(&[AxeCue::PlayOneShot(ClipKind::WrongCollision)])
    }

    /// Debounced recall check.
    ///
    /// Starts a recall when the gesture is active, the axe is dropped,
    /// thrown or stuck, and recall is eligible. `transform` is the axe's
    /// current placement and `hand_position` the recall target.
    pub fn poll_recall(
        &mut self,
        active: bool,
        now: f32,
        transform: &Transform3D,
        hand_position: Vec3,
        body: &mut RigidBody,
    ) -> AxeCues {
        if !active {
            return AxeCues::new();
        }
        let can_recall = matches!(
            self.state,
            AxeState::Dropped | AxeState::Stuck | AxeState::Thrown
        );
        if !can_recall || !self.recall_eligible {
            trace!(
                "recall ignored in {:?} (eligible={})",
                self.state, self.recall_eligible
            );
            return AxeCues::new();
        }

        // The path owns the placement until the next grab or impact
        body.stop();
        body.set_use_gravity(false);
        body.kinematic = true;
        let path = RecallPath::new(
            transform.position,
            hand_position,
            transform.forward(),
            now,
            &self.tuning,
        );
        debug!(
            "recall path: {:?} -> {:?}, length {:.2}, short={}, midpoint {:?}",
            path.origin, path.target, path.length, path.is_short, path.midpoint
        );
        self.recall = Some(path);
        self.recall_arrived = false;
        self.state = AxeState::Recalling;

        SmallVec::from_slice(&[
            AxeCue::TriggerColliders(true),
            AxeCue::PlayOneShot(ClipKind::Returning),
            AxeCue::HapticSustained,
        ])
    }

    /// Advance cooldown and recall flight by one tick.
    ///
    /// While recalling, `transform.position` is overwritten with the point on
    /// the recall path. Arrival does not end the recall; the axe waits at the
    /// hand until it is grabbed.
    pub fn tick(&mut self, dt: f32, now: f32, transform: &mut Transform3D) -> TickReport {
        let mut report = TickReport::default();
        match self.state {
            AxeState::Dropped | AxeState::Thrown => {
                report.became_eligible = self.count_down(dt);
            }
            AxeState::Recalling => {
                if let Some(path) = self.recall {
                    transform.position = path.position_at(now);
                    if !self.recall_arrived && path.has_arrived(now) {
                        self.recall_arrived = true;
                        report.arrived = true;
                    }
                }
            }
            _ => {}
        }
        report
    }

    fn count_down(&mut self, dt: f32) -> bool {
        self.cooldown_remaining = (self.cooldown_remaining - dt.max(0.0)).max(0.0);
        if self.cooldown_remaining <= 0.0 && !self.recall_eligible {
            self.recall_eligible = true;
            return true;
        }
        false
    }

    fn drop(&mut self, body: &mut RigidBody) {
        self.cooldown_remaining = self.tuning.cooldown;
        self.recall_eligible = false;
        body.set_gravity(self.tuning.normal_gravity);
        body.constraints = MotionConstraints::None;
        body.set_use_gravity(true);
        body.kinematic = false;
        self.state = AxeState::Dropped;
    }

    fn throw(&mut self, linear: Vec3, angular: Vec3, body: &mut RigidBody) -> AxeCues {
        self.cooldown_remaining = self.tuning.cooldown;
        self.recall_eligible = false;
        body.velocity = linear * self.tuning.throw_boost;
        body.angular_velocity = angular;
        body.set_gravity(self.tuning.low_gravity);
        body.constraints = MotionConstraints::FreezeRotation;
        body.set_use_gravity(true);
        body.kinematic = false;
        self.state = AxeState::Thrown;
        SmallVec::from_slice(&[AxeCue::PlayLoop(ClipKind::Spin)])
    }
}

/// Surface contacts an axe reacts to.
///
/// Ground-contact dispatch resolves the owning axe of the collided part and
/// calls into this capability rather than into the controller's full API.
pub trait AxeCollision {
    /// The striking edge anchored in a surface.
    fn on_embed(&mut self, body: &mut RigidBody) -> AxeCues;
    /// The handle struck a surface.
    fn on_impact(&mut self, body: &mut RigidBody) -> AxeCues;
}

impl AxeCollision for AxeController {
    fn on_embed(&mut self, body: &mut RigidBody) -> AxeCues {
        self.head_embedded(body)
    }

    fn on_impact(&mut self, body: &mut RigidBody) -> AxeCues {
        self.body_impacted(body)
    }
}
