//! Scripted input for the demo binary.
//!
//! A scenario places a hand and an axe, then lists timed actions standing in
//! for hand tracking, surface contacts and the recall gesture:
//!
//! ```json
//! { "duration": 6.0,
//!   "hand": [0.0, 1.0, 0.0],
//!   "axe": [0.0, 1.0, 0.5],
//!   "steps": [
//!     { "at": 0.1, "action": "grab_begin" },
//!     { "at": 0.5, "action": "grab_end", "linear": [0, 2, 8], "angular": [600, 0, 0] },
//!     { "at": 1.2, "action": "head_embedded" },
//!     { "at": 2.0, "action": "recall", "active": true }
//!   ] }
//! ```
//!
//! Contacts are reported as [`GroundContact`]s on the axe's collider parts,
//! so they go through the same dispatch a physics backend would use.

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::recallsignal::RecallSignal;
use crate::components::transform::Transform3D;
use crate::error::AxeError;
use crate::events::contact::{ContactKind, GroundContact};
use crate::events::deliver;
use crate::events::grab::{GrabBegin, GrabEnd};
use crate::setup::{SpawnedAxe, activate_axe, deactivate_axe};

/// One scripted input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioAction {
    GrabBegin,
    GrabEnd { linear: Vec3, angular: Vec3 },
    /// The head overlaps a surface trigger.
    HeadEmbedded,
    /// The handle collides with a surface.
    BodyImpacted,
    /// Hold (`true`) or release the recall gesture.
    Recall { active: bool },
    MoveHand { position: Vec3 },
    Deactivate,
    Activate,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioStep {
    /// Simulation time the action is applied at, in seconds.
    pub at: f32,
    #[serde(flatten)]
    pub action: ScenarioAction,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Simulated seconds.
    pub duration: f32,
    /// Initial hand position.
    pub hand: Vec3,
    /// Initial axe position.
    pub axe: Vec3,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Read a scenario from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AxeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| AxeError::Scenario(format!("failed to read {:?}: {}", path, e)))?;
        let scenario = Self::from_json(&text)?;
        info!(
            "Loaded scenario from {:?} ({} steps, {}s)",
            path,
            scenario.steps.len(),
            scenario.duration
        );
        Ok(scenario)
    }

    /// Parse a scenario. Steps are ordered by time, ties keep file order.
    pub fn from_json(text: &str) -> Result<Self, AxeError> {
        let mut scenario: Scenario = serde_json::from_str(text)
            .map_err(|e| AxeError::Scenario(format!("failed to parse scenario: {}", e)))?;
        scenario.validate()?;
        scenario.steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(scenario)
    }

    fn validate(&self) -> Result<(), AxeError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(AxeError::Scenario(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        if let Some(step) = self.steps.iter().find(|step| !step.at.is_finite()) {
            return Err(AxeError::Scenario(format!(
                "step {:?} has no valid time",
                step.action
            )));
        }
        Ok(())
    }

    /// Throw, embed, recall, catch, then a drop and a second recall.
    pub fn builtin() -> Self {
        use ScenarioAction as A;
        let step = |at: f32, action: ScenarioAction| ScenarioStep { at, action };
        Self {
            duration: 9.0,
            hand: Vec3::new(0.0, 1.5, 0.0),
            axe: Vec3::new(0.0, 1.0, 0.5),
            steps: vec![
                step(0.1, A::GrabBegin),
                step(
                    0.5,
                    A::GrabEnd {
                        linear: Vec3::new(0.0, 2.0, 6.0),
                        angular: Vec3::new(600.0, 0.0, 0.0),
                    },
                ),
                step(1.4, A::HeadEmbedded),
                step(2.0, A::Recall { active: true }),
                step(2.6, A::Recall { active: false }),
                step(2.8, A::MoveHand {
                    position: Vec3::new(0.5, 1.4, 0.0),
                }),
                step(3.8, A::GrabBegin),
                step(
                    4.2,
                    A::GrabEnd {
                        linear: Vec3::new(0.0, 0.0, 1.0),
                        angular: Vec3::new(20.0, 0.0, 0.0),
                    },
                ),
                step(4.6, A::BodyImpacted),
                step(6.0, A::Recall { active: true }),
                step(6.6, A::Recall { active: false }),
                step(8.0, A::GrabBegin),
            ],
        }
    }
}

/// Applies scenario steps as simulation time passes.
#[derive(Debug)]
pub struct ScenarioRunner {
    scenario: Scenario,
    next: usize,
}

impl ScenarioRunner {
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario, next: 0 }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    /// Steps not applied yet.
    pub fn remaining(&self) -> usize {
        self.scenario.steps.len().saturating_sub(self.next)
    }

    /// Apply every step due at or before `now`. Returns how many ran.
    pub fn apply_due(
        &mut self,
        world: &mut World,
        now: f32,
        hand: Entity,
        axe: SpawnedAxe,
    ) -> Result<usize, AxeError> {
        let mut applied = 0;
        while let Some(step) = self.scenario.steps.get(self.next) {
            if step.at > now {
                break;
            }
            let action = step.action.clone();
            self.next += 1;
            debug!("t={:.3}: {:?}", now, action);
            apply_action(world, action, hand, axe)?;
            applied += 1;
        }
        Ok(applied)
    }
}

fn apply_action(
    world: &mut World,
    action: ScenarioAction,
    hand: Entity,
    axe: SpawnedAxe,
) -> Result<(), AxeError> {
    match action {
        ScenarioAction::GrabBegin => deliver(world, GrabBegin { axe: axe.axe }),
        ScenarioAction::GrabEnd { linear, angular } => deliver(
            world,
            GrabEnd {
                axe: axe.axe,
                linear,
                angular,
            },
        ),
        ScenarioAction::HeadEmbedded => deliver(
            world,
            GroundContact {
                part: axe.head,
                kind: ContactKind::Trigger,
            },
        ),
        ScenarioAction::BodyImpacted => deliver(
            world,
            GroundContact {
                part: axe.body,
                kind: ContactKind::Collision,
            },
        ),
        ScenarioAction::Recall { active } => {
            let mut signal = world
                .get_mut::<RecallSignal>(hand)
                .ok_or(AxeError::MissingHand)?;
            signal.set_active(active);
        }
        ScenarioAction::MoveHand { position } => {
            let mut transform = world
                .get_mut::<Transform3D>(hand)
                .ok_or(AxeError::MissingHand)?;
            transform.position = position;
        }
        ScenarioAction::Deactivate => deactivate_axe(world, axe.axe)?,
        ScenarioAction::Activate => activate_axe(world, axe.axe)?,
    }
    Ok(())
}
