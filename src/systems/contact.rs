//! Ground contact dispatch.
//!
//! Surfaces report contacts against collider part entities. This observer
//! looks the part up, finds its axe through [`AxePart::axe`] and forwards:
//!
//! - a trigger overlap by a head part becomes [`HeadEmbedded`]
//! - a solid collision by a body part becomes [`BodyImpacted`]
//!
//! Anything else (non-axe entities, a head bumping solidly, a handle passing
//! through a trigger) is ignored.
//!
//! The resolved event is queued through [`Commands`]. [`dispatch_contact`]
//! reports a contact and resolves it before returning.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::axepart::{AxePart, PartKind};
use crate::events::contact::{BodyImpacted, ContactKind, GroundContact, HeadEmbedded};
use crate::events::deliver;

pub fn ground_contact_observer(
    trigger: On<GroundContact>,
    parts: Query<&AxePart>,
    mut commands: Commands,
) {
    let contact = trigger.event();
    let Ok(part) = parts.get(contact.part) else {
        trace!("contact on {:?} ignored: not an axe part", contact.part);
        return;
    };
    match (part.kind, contact.kind) {
        (PartKind::Head, ContactKind::Trigger) => {
            commands.trigger(HeadEmbedded { axe: part.axe });
        }
        (PartKind::Body, ContactKind::Collision) => {
            commands.trigger(BodyImpacted { axe: part.axe });
        }
        (kind, contact_kind) => {
            trace!(
                "contact on {:?} ignored: {:?} part, {:?} contact",
                contact.part, kind, contact_kind
            );
        }
    }
}

/// Register the global contact dispatch observer.
pub fn register_ground_contact_dispatch(world: &mut World) -> Entity {
    world.add_observer(ground_contact_observer).id()
}

/// Report `contact` and run the resulting axe transition to completion.
pub fn dispatch_contact(world: &mut World, contact: GroundContact) {
    deliver(world, contact);
}
