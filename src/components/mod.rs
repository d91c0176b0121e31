//! ECS components for the axe and its collaborators.
//!
//! Submodules overview:
//! - [`axe`] – the axe state machine, recall path math and tuning
//! - [`axemesh`] – visual mesh orientation and the per-state spinner
//! - [`axepart`] – head/body collider parts pointing back at their axe
//! - [`recallsignal`] – debounced recall gesture carried by the hand
//! - [`rigidbody`] – rigid body with velocities, named forces and flags
//! - [`subscriptions`] – observer entities owned by an active axe
//! - [`transform`] – world-space position and rotation

pub mod axe;
pub mod axemesh;
pub mod axepart;
pub mod recallsignal;
pub mod rigidbody;
pub mod subscriptions;
pub mod transform;
