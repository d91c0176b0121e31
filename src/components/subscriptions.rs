//! Event subscriptions held by an active axe.
//!
//! Activating an axe spawns one observer entity per inbound event kind and
//! records them here. Deactivating despawns every recorded observer, so no
//! event reaches an axe that has been switched off. The component's presence
//! is also what tick systems filter on: an axe without it does not advance.

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

#[derive(Component, Clone, Debug, Default)]
pub struct AxeSubscriptions {
    /// Observer entities owned by this axe.
    pub observers: SmallVec<[Entity; 5]>,
}

impl AxeSubscriptions {
    pub fn new(observers: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            observers: observers.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
