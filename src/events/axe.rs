//! Axe state change notification.
//!
//! Triggered after every transition that changes an axe's
//! [`AxeState`]. Useful for logging, UI and tests; the axe itself does not
//! observe it.

use bevy_ecs::prelude::*;

use crate::components::axe::AxeState;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxeStateChanged {
    pub axe: Entity,
    pub from: AxeState,
    pub to: AxeState,
}
