//! Mesh spin system.
//!
//! Rolls each active axe's [`AxeMesh`] by the rate its
//! [`MeshSpinner`] assigns to the current state. The rigid body is not
//! touched.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::axe::AxeController;
use crate::components::axemesh::{AxeMesh, MeshSpinner};
use crate::components::subscriptions::AxeSubscriptions;
use crate::resources::worldtime::WorldTime;

pub fn mesh_spin_system(
    world_time: Res<WorldTime>,
    axes: Query<(Entity, &AxeController), With<AxeSubscriptions>>,
    mut meshes: Query<&mut AxeMesh>,
) {
    for (entity, controller) in axes.iter() {
        let spinner = MeshSpinner::from_tuning(controller.tuning());
        if spinner
            .delta_degrees(controller.state(), world_time.delta)
            .is_none()
        {
            continue;
        }
        match meshes.get_mut(controller.mesh()) {
            Ok(mut mesh) => {
                spinner.apply(controller.state(), world_time.delta, &mut mesh);
            }
            Err(_) => warn!("axe {:?}: mesh {:?} is gone", entity, controller.mesh()),
        }
    }
}
