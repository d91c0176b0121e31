//! Debounced recall report.
//!
//! Emitted by [`recall_poll_system`](crate::systems::recallpoll::recall_poll_system)
//! once per poll interval for every hand carrying a
//! [`RecallSignal`](crate::components::recallsignal::RecallSignal).

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RecallPoll {
    /// The hand whose gesture is reported.
    pub hand: Entity,
    /// Whether the recall gesture is held.
    pub active: bool,
}
