//! Event and message types.
//!
//! Events are triggered and reach observers immediately; messages are
//! buffered and read by systems.
//!
//! Observers react to axe events through
//! [`Commands`](bevy_ecs::system::Commands), so follow-up events
//! (resolved contacts, [`axe::AxeStateChanged`]) wait in the world's command
//! queue until the next flush. Inside a schedule that flush happens at the
//! sync points. Code that drives the world directly uses [`deliver`], which
//! flushes before returning, so the whole chain has run once it returns.
//!
//! Submodules:
//! - [`axe`] – state change notification for an axe
//! - [`contact`] – surface contacts, raw and resolved to head/body
//! - [`feedback`] – audio and haptic commands leaving the simulation
//! - [`grab`] – grab begin/end from the holding hand
//! - [`recall`] – debounced recall gesture reports
pub mod axe;
pub mod contact;
pub mod feedback;
pub mod grab;
pub mod recall;

use bevy_ecs::event::Event;
use bevy_ecs::world::World;

/// Trigger `event` and apply every command its observers queued.
pub fn deliver<'a, E: Event<Trigger<'a>: Default>>(world: &mut World, event: E) {
    world.trigger(event);
    world.flush();
}
