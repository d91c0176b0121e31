//! Grab events raised by the hand that holds the axe.
//!
//! Hand tracking decides when a grab starts and ends; the axe only hears
//! about it through these events. Each active axe observes both and ignores
//! events addressed to other axes.

use bevy_ecs::prelude::*;
use glam::Vec3;

/// The hand closed on `axe`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GrabBegin {
    pub axe: Entity,
}

/// The hand released `axe`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GrabEnd {
    pub axe: Entity,
    /// Linear velocity of the hand at release, world units per second.
    pub linear: Vec3,
    /// Angular velocity of the hand at release.
    pub angular: Vec3,
}
