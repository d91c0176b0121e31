//! Bridge between the simulation and the audio/haptics consumer.
//!
//! Use [`setup_feedback`] once during initialization. It inserts the
//! [`FeedbackBridge`] and the `Messages<FeedbackCmd>` mailbox and returns the
//! receiving end of the channel; whoever owns audio and haptics drains it,
//! typically on its own thread. Call [`shutdown_feedback`] during teardown.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::feedback::FeedbackCmd;

/// Sending half of the feedback channel.
#[derive(Resource, Clone)]
pub struct FeedbackBridge {
    /// Sender for [`FeedbackCmd`] messages (ECS -> consumer).
    pub tx_cmd: Sender<FeedbackCmd>,
}

/// Create the feedback channel and register bridge resources.
pub fn setup_feedback(world: &mut World) -> Receiver<FeedbackCmd> {
    let (tx_cmd, rx_cmd) = unbounded::<FeedbackCmd>();
    world.insert_resource(FeedbackBridge { tx_cmd });
    world.init_resource::<Messages<FeedbackCmd>>();
    rx_cmd
}

/// Tell the consumer to stop and drop the bridge.
pub fn shutdown_feedback(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<FeedbackBridge>() {
        let _ = bridge.tx_cmd.send(FeedbackCmd::Shutdown);
    }
}
