//! Debounced recall polling.
//!
//! Every hand carrying a [`RecallSignal`] accumulates simulation time; once
//! per interval its current gesture state is reported as a [`RecallPoll`]
//! event. Axes bound to that hand decide whether to start a recall.

use bevy_ecs::prelude::*;

use crate::components::recallsignal::RecallSignal;
use crate::events::recall::RecallPoll;
use crate::resources::worldtime::WorldTime;

pub fn recall_poll_system(
    world_time: Res<WorldTime>,
    mut hands: Query<(Entity, &mut RecallSignal)>,
    mut commands: Commands,
) {
    for (hand, mut signal) in hands.iter_mut() {
        if signal.advance(world_time.delta) {
            commands.trigger(RecallPoll {
                hand,
                active: signal.active,
            });
        }
    }
}
