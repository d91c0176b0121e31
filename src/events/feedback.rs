use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

/// Commands sent *to* the audio and haptics side.
///
/// The axe writes them as ECS messages;
/// [`forward_feedback_cmds`](crate::systems::feedback::forward_feedback_cmds)
/// hands them to whatever consumes the
/// [`FeedbackBridge`](crate::resources::feedback::FeedbackBridge) channel.
/// Nothing is expected back.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum FeedbackCmd {
    /// Play `clip` once on the axe's audio source, replacing what plays.
    PlayOneShot { axe: Entity, clip: String },
    /// Play `clip` in a loop on the axe's audio source.
    PlayLoop { axe: Entity, clip: String },
    /// Short vibration on `hand`; cancels a sustained one.
    HapticPulse { hand: Entity },
    /// Continuous vibration on `hand` until the next pulse.
    HapticSustained { hand: Entity },
    /// Stop the consumer.
    Shutdown,
}
