//! Collider parts of an axe.
//!
//! An axe has a head (the striking edge) and a body (the handle). Ground
//! contacts are reported against a part entity; the [`AxePart`] on that
//! entity names the owning axe, so contact dispatch is a direct id lookup
//! instead of a walk up the entity hierarchy.

use bevy_ecs::prelude::{Component, Entity};

/// Which piece of the axe a collider belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// Striking edge. Embeds into surfaces.
    Head,
    /// Handle. Hitting a surface with it is a miss.
    Body,
}

/// Collider part owned by an axe.
#[derive(Component, Clone, Copy, Debug)]
pub struct AxePart {
    /// The axe entity carrying the [`AxeController`](super::axe::AxeController).
    pub axe: Entity,
    pub kind: PartKind,
    /// Trigger colliders report overlaps instead of blocking.
    pub is_trigger: bool,
}

impl AxePart {
    pub fn new(axe: Entity, kind: PartKind) -> Self {
        Self {
            axe,
            kind,
            is_trigger: false,
        }
    }

    pub fn head(axe: Entity) -> Self {
        Self::new(axe, PartKind::Head)
    }

    pub fn body(axe: Entity) -> Self {
        Self::new(axe, PartKind::Body)
    }
}
