//! Ground contact events.
//!
//! Two levels are provided. [`GroundContact`] is what a surface reports: a
//! part entity touched it, either as a trigger overlap or as a solid
//! collision. The dispatch observer in
//! [`crate::systems::contact`] resolves the part to its axe and turns the
//! contact into [`HeadEmbedded`] or [`BodyImpacted`], which the axe observes.
//! Callers that already know the axe can trigger those two directly.

use bevy_ecs::prelude::*;

/// How a part met the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Overlap with a trigger collider.
    Trigger,
    /// Solid collision.
    Collision,
}

/// A collider part touched a surface.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    /// The part entity that touched; usually carries an
    /// [`AxePart`](crate::components::axepart::AxePart).
    pub part: Entity,
    pub kind: ContactKind,
}

/// The head of `axe` anchored in a surface.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HeadEmbedded {
    pub axe: Entity,
}

/// The handle of `axe` struck a surface.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BodyImpacted {
    pub axe: Entity,
}
