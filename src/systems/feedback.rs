//! Feedback forwarding.
//!
//! Axe observers write [`FeedbackCmd`] messages during the tick.
//! [`update_feedback_cmds`] advances the message queue and
//! [`forward_feedback_cmds`] hands every new command to the
//! [`FeedbackBridge`] channel. [`feedback_thread`] is a consumer that only
//! logs, used by the demo binary in place of real audio and haptics.
//!
//! See also: [`crate::events::feedback`] and [`crate::resources::feedback`].

use bevy_ecs::prelude::{MessageReader, Messages, Res, ResMut};
use crossbeam_channel::Receiver;
use log::info;

use crate::events::feedback::FeedbackCmd;
use crate::resources::feedback::FeedbackBridge;

/// Advance the ECS message queue for FeedbackCmd so same-tick readers can observe writes.
pub fn update_feedback_cmds(mut msgs: ResMut<Messages<FeedbackCmd>>) {
    msgs.update();
}

/// Forward ECS FeedbackCmd messages to the consumer via the FeedbackBridge sender.
pub fn forward_feedback_cmds(bridge: Res<FeedbackBridge>, mut reader: MessageReader<FeedbackCmd>) {
    for cmd in reader.read() {
        // Ignore send error once the consumer is gone
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Logging consumer. Blocks until [`FeedbackCmd::Shutdown`] or until every
/// sender is dropped. Returns the number of commands it received.
pub fn feedback_thread(rx_cmd: Receiver<FeedbackCmd>) -> usize {
    let mut received = 0;
    for cmd in rx_cmd.iter() {
        match cmd {
            FeedbackCmd::Shutdown => break,
            FeedbackCmd::PlayOneShot { axe, clip } => {
                info!("[feedback] {:?} plays {}", axe, clip);
            }
            FeedbackCmd::PlayLoop { axe, clip } => {
                info!("[feedback] {:?} loops {}", axe, clip);
            }
            FeedbackCmd::HapticPulse { hand } => {
                info!("[feedback] {:?} pulse", hand);
            }
            FeedbackCmd::HapticSustained { hand } => {
                info!("[feedback] {:?} sustained buzz", hand);
            }
        }
        received += 1;
    }
    received
}
