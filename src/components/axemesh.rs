//! Visual mesh of the axe and the spin applied to it.
//!
//! While the axe travels or returns, its rigid body does not rotate (rotation
//! is frozen on throw, and recall overwrites the position directly). The
//! tumbling look comes from [`MeshSpinner`], which rolls the [`AxeMesh`]
//! about its local `Z` axis at a constant rate. Rolls are applied
//! incrementally, so many small per-tick deltas compose into the same
//! orientation as one large one.

use bevy_ecs::prelude::Component;
use glam::Quat;

use super::axe::{AxeState, AxeTuning};

/// Local orientation of the axe's visual mesh relative to its body.
#[derive(Component, Clone, Copy, Debug)]
pub struct AxeMesh {
    /// Local rotation applied on top of the body's rotation.
    pub local_rotation: Quat,
    /// Sum of every roll applied since the last reset, in degrees.
    pub rolled_degrees: f32,
}

impl Default for AxeMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl AxeMesh {
    pub fn new() -> Self {
        Self {
            local_rotation: Quat::IDENTITY,
            rolled_degrees: 0.0,
        }
    }

    /// Roll about the local `Z` axis by `degrees`.
    pub fn roll(&mut self, degrees: f32) {
        self.local_rotation =
            (self.local_rotation * Quat::from_rotation_z(degrees.to_radians())).normalize();
        self.rolled_degrees += degrees;
    }

    /// Back to the rest orientation.
    pub fn reset(&mut self) {
        self.local_rotation = Quat::IDENTITY;
        self.rolled_degrees = 0.0;
    }
}

/// Per-state spin rates for the axe mesh, in degrees per second.
///
/// Negative rates tumble the head forward over the handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshSpinner {
    pub travel_rate: f32,
    pub recall_rate: f32,
}

impl MeshSpinner {
    pub fn new(travel_rate: f32, recall_rate: f32) -> Self {
        Self {
            travel_rate,
            recall_rate,
        }
    }

    pub fn from_tuning(tuning: &AxeTuning) -> Self {
        Self::new(tuning.travel_spin_rate, tuning.recall_spin_rate)
    }

    /// Roll to apply this tick, or `None` when the state does not spin.
    pub fn delta_degrees(&self, state: AxeState, dt: f32) -> Option<f32> {
        match state {
            AxeState::Thrown => Some(self.travel_rate * dt),
            AxeState::Recalling => Some(self.recall_rate * dt),
            _ => None,
        }
    }

    /// Spin `mesh` for one tick. Returns true if a roll was applied.
    pub fn apply(&self, state: AxeState, dt: f32, mesh: &mut AxeMesh) -> bool {
        match self.delta_degrees(state, dt) {
            Some(degrees) => {
                mesh.roll(degrees);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn spinner() -> MeshSpinner {
        MeshSpinner::from_tuning(&AxeTuning::default())
    }

    // ==================== DELTA TESTS ====================

    #[test]
    fn test_delta_thrown_uses_travel_rate() {
        let d = spinner().delta_degrees(AxeState::Thrown, 0.5).unwrap();
        assert!(approx_eq(d, -360.0));
    }

    #[test]
    fn test_delta_recalling_uses_recall_rate() {
        let d = spinner().delta_degrees(AxeState::Recalling, 0.25).unwrap();
        assert!(approx_eq(d, 90.0));
    }

    #[test]
    fn test_delta_other_states_none() {
        let s = spinner();
        for state in [
            AxeState::Idle,
            AxeState::Held,
            AxeState::Dropped,
            AxeState::Stuck,
        ] {
            assert!(s.delta_degrees(state, 1.0).is_none(), "{state:?} spun");
        }
    }

    // ==================== ACCUMULATION TESTS ====================

    #[test]
    fn test_thrown_one_second_accumulates_travel_rate() {
        let s = spinner();
        let mut mesh = AxeMesh::new();
        let dt = 1.0 / 90.0;
        for _ in 0..90 {
            assert!(s.apply(AxeState::Thrown, dt, &mut mesh));
        }
        assert!(approx_eq(mesh.rolled_degrees, -720.0));
        // -720 degrees is two whole turns
        assert!(mesh.local_rotation.angle_between(Quat::IDENTITY) < 1e-2);
    }

    #[test]
    fn test_incremental_rolls_match_single_roll() {
        let mut stepped = AxeMesh::new();
        for _ in 0..10 {
            stepped.roll(9.0);
        }
        let mut single = AxeMesh::new();
        single.roll(90.0);
        assert!(stepped.local_rotation.angle_between(single.local_rotation) < 1e-4);
    }

    #[test]
    fn test_apply_idle_leaves_mesh() {
        let mut mesh = AxeMesh::new();
        assert!(!spinner().apply(AxeState::Held, 1.0, &mut mesh));
        assert_eq!(mesh.local_rotation, Quat::IDENTITY);
        assert_eq!(mesh.rolled_degrees, 0.0);
    }

    #[test]
    fn test_reset() {
        let mut mesh = AxeMesh::new();
        mesh.roll(45.0);
        mesh.reset();
        assert_eq!(mesh.local_rotation, Quat::IDENTITY);
        assert_eq!(mesh.rolled_degrees, 0.0);
    }
}
