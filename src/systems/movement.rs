//! Rigid body integration.
//!
//! Semi-implicit Euler: enabled forces update the velocity, then the velocity
//! updates the position. Kinematic bodies are skipped; whoever set them
//! kinematic owns their placement. Bodies with frozen rotation keep their
//! angular velocity but do not turn.

use bevy_ecs::prelude::*;
use glam::Quat;

use crate::components::rigidbody::RigidBody;
use crate::components::transform::Transform3D;
use crate::resources::worldtime::WorldTime;

pub fn movement(mut query: Query<(&mut Transform3D, &mut RigidBody)>, time: Res<WorldTime>) {
    let dt = time.delta;
    for (mut transform, mut rigidbody) in query.iter_mut() {
        if rigidbody.kinematic {
            continue;
        }

        let acceleration = rigidbody.total_acceleration();
        rigidbody.velocity += acceleration * dt;
        let delta = rigidbody.velocity * dt;
        transform.translate(delta);

        if !rigidbody.rotation_frozen() && rigidbody.angular_velocity != glam::Vec3::ZERO {
            let spin = Quat::from_scaled_axis(rigidbody.angular_velocity * dt);
            transform.rotation = (spin * transform.rotation).normalize();
        }
    }
}
