//! World-space placement of an entity.
//!
//! [`Transform3D`] replaces the separate position and rotation components of
//! a flat scene: the axe, its hand and anything the physics integrator moves
//! carry one. The forward direction follows the usual convention of local
//! `+Z`.

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

/// Position and orientation in world space.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    /// World-space position (pivot).
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform3D {
    /// Create a transform at `position` with identity rotation.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Create a transform from raw coordinates.
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::new(Vec3::new(x, y, z))
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local `+Z` expressed in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Move by a world-space offset.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}
