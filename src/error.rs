//! Error type shared by the library and the `axe-sim` binary.
//!
//! Only setup and file loading can fail. Events that do not apply to the
//! axe's current state are ignored by the controller and never reach this
//! type.

use bevy_ecs::prelude::Entity;
use thiserror::Error;

/// Errors raised while building an axe or loading its inputs.
#[derive(Debug, Clone, Error)]
pub enum AxeError {
    /// The axe was set up without a visual mesh, or the mesh entity has no
    /// [`AxeMesh`](crate::components::axemesh::AxeMesh).
    #[error("axe needs a mesh entity carrying AxeMesh")]
    MissingMesh,

    /// The axe was set up without a hand, or the hand entity has no
    /// [`Transform3D`](crate::components::transform::Transform3D) to read
    /// the recall target from.
    #[error("axe needs a hand entity carrying Transform3D")]
    MissingHand,

    /// The entity has no [`AxeController`](crate::components::axe::AxeController).
    #[error("entity {0:?} is not an axe")]
    NotAnAxe(Entity),

    /// Configuration file could not be read or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// Scenario file could not be read or parsed.
    #[error("scenario error: {0}")]
    Scenario(String),
}
