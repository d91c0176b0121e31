//! Throwable, recallable axe for a VR-style hand.
//!
//! The axe is an ECS entity driven by an [`AxeController`] state machine.
//! Grab, release, ground contact and recall gesture events reach it through
//! per-axe observers; per-tick systems advance cooldowns, recall flights and
//! the mesh spin. Audio and haptic requests leave the simulation as
//! [`FeedbackCmd`] messages forwarded over a channel.
//!
//! - [`components`] – axe state machine, rigid body, mesh, collider parts
//! - [`events`] – inbound grab/contact/recall events and outbound feedback
//! - [`resources`] – configuration, simulation clock, feedback bridge
//! - [`systems`] – observers and per-tick systems
//! - [`setup`] – spawning, activating and removing axes
//! - [`scenario`] – scripted inputs for the demo binary
//!
//! [`AxeController`]: components::axe::AxeController
//! [`FeedbackCmd`]: events::feedback::FeedbackCmd

pub mod components;
pub mod error;
pub mod events;
pub mod resources;
pub mod scenario;
pub mod setup;
pub mod systems;
