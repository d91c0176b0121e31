//! Rigid body component with named acceleration forces.
//!
//! The [`RigidBody`] component stores linear and angular velocity plus a set
//! of named acceleration forces. Gravity is one of those forces, stored under
//! [`GRAVITY_FORCE`], so each body carries its own gravity instead of reading
//! an engine-wide value: the axe's controller swaps it between normal and low
//! gravity without touching any other body.
//!
//! The `kinematic` flag removes the body from integration entirely; its
//! position is then driven by whoever owns it (the holding hand, the recall
//! trajectory, or nothing at all while stuck).

use bevy_ecs::prelude::Component;
use glam::Vec3;
use rustc_hash::FxHashMap;

/// Name of the force that models gravity.
pub const GRAVITY_FORCE: &str = "gravity";

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vec3,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            enabled: true,
        }
    }

    /// Create a new acceleration force with specified enabled state.
    pub fn with_enabled(value: Vec3, enabled: bool) -> Self {
        Self { value, enabled }
    }
}

/// Degrees of freedom locked by the integrator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionConstraints {
    /// Free body.
    #[default]
    None,
    /// Rotation is not integrated; angular velocity is kept but ignored.
    FreezeRotation,
}

/// Rigid body state read by the [`movement`](crate::systems::movement::movement) system.
///
/// # Fields
/// - `velocity` - linear velocity in world units per second
/// - `angular_velocity` - angular velocity in radians per second (axis * rate)
/// - `forces` - named acceleration forces that can be individually toggled
/// - `kinematic` - when true, the integrator leaves the body alone
/// - `constraints` - locked degrees of freedom
/// - `center_of_mass` - local offset of the center of mass
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::new();
/// rb.set_gravity(Vec3::new(0.0, -9.81, 0.0));
/// rb.set_use_gravity(true);
///
/// // Hold it in place
/// rb.kinematic = true;
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current linear velocity in world units per second.
    pub velocity: Vec3,
    /// Current angular velocity in radians per second.
    pub angular_velocity: Vec3,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// When true, movement system skips all physics calculations for this entity.
    pub kinematic: bool,
    /// Locked degrees of freedom.
    pub constraints: MotionConstraints,
    /// Local offset of the center of mass.
    pub center_of_mass: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest with no forces.
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            forces: FxHashMap::default(),
            kinematic: false,
            constraints: MotionConstraints::None,
            center_of_mass: Vec3::ZERO,
        }
    }

    /// Create a RigidBody with an enabled gravity force.
    pub fn with_gravity(gravity: Vec3) -> Self {
        let mut rb = Self::new();
        rb.add_force(GRAVITY_FORCE, gravity);
        rb
    }

    pub fn with_center_of_mass(mut self, center_of_mass: Vec3) -> Self {
        self.center_of_mass = center_of_mass;
        self
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec3) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Add or update a named acceleration force with specified enabled state.
    pub fn add_force_with_state(&mut self, name: &str, value: Vec3, enabled: bool) {
        self.forces.insert(
            name.to_string(),
            AccelerationForce::with_enabled(value, enabled),
        );
    }

    /// Enable or disable a specific force by name.
    /// Returns false if the force doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    /// Check if a force exists and is enabled.
    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).map(|f| f.enabled).unwrap_or(false)
    }

    /// Get the value of a force by name.
    pub fn get_force(&self, name: &str) -> Option<&AccelerationForce> {
        self.forces.get(name)
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec3 {
        self.forces
            .values()
            .filter(|force| force.enabled)
            .fold(Vec3::ZERO, |total, force| total + force.value)
    }

    /// Set this body's gravity vector, keeping the current enabled state.
    ///
    /// A body that had no gravity force gets one, disabled.
    pub fn set_gravity(&mut self, gravity: Vec3) {
        match self.forces.get_mut(GRAVITY_FORCE) {
            Some(force) => force.value = gravity,
            None => self.add_force_with_state(GRAVITY_FORCE, gravity, false),
        }
    }

    /// The gravity vector, whether enabled or not.
    pub fn gravity(&self) -> Option<Vec3> {
        self.get_force(GRAVITY_FORCE).map(|f| f.value)
    }

    /// Toggle gravity. Returns false if the body has no gravity force.
    pub fn set_use_gravity(&mut self, enabled: bool) -> bool {
        self.set_force_enabled(GRAVITY_FORCE, enabled)
    }

    pub fn use_gravity(&self) -> bool {
        self.is_force_enabled(GRAVITY_FORCE)
    }

    /// Zero linear and angular velocity.
    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    pub fn rotation_frozen(&self) -> bool {
        self.constraints == MotionConstraints::FreezeRotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    // ==================== ACCELERATION FORCE TESTS ====================

    #[test]
    fn test_acceleration_force_new_is_enabled() {
        let force = AccelerationForce::new(Vec3::new(10.0, 20.0, 30.0));
        assert!(force.enabled);
        assert!(vec_approx_eq(force.value, Vec3::new(10.0, 20.0, 30.0)));
    }

    #[test]
    fn test_acceleration_force_with_enabled_false() {
        let force = AccelerationForce::with_enabled(Vec3::ONE, false);
        assert!(!force.enabled);
    }

    // ==================== RIGIDBODY CONSTRUCTOR TESTS ====================

    #[test]
    fn test_rigidbody_new() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity, Vec3::ZERO);
        assert_eq!(rb.angular_velocity, Vec3::ZERO);
        assert!(rb.forces.is_empty());
        assert!(!rb.kinematic);
        assert_eq!(rb.constraints, MotionConstraints::None);
    }

    #[test]
    fn test_rigidbody_with_gravity_enabled() {
        let rb = RigidBody::with_gravity(Vec3::new(0.0, -9.81, 0.0));
        assert!(rb.use_gravity());
        assert!(vec_approx_eq(rb.gravity().unwrap(), Vec3::new(0.0, -9.81, 0.0)));
    }

    #[test]
    fn test_with_center_of_mass() {
        let rb = RigidBody::new().with_center_of_mass(Vec3::new(0.0, 0.3, 0.0));
        assert!(vec_approx_eq(rb.center_of_mass, Vec3::new(0.0, 0.3, 0.0)));
    }

    // ==================== FORCE MANAGEMENT TESTS ====================

    #[test]
    fn test_add_force_overwrites() {
        let mut rb = RigidBody::new();
        rb.add_force("wind", Vec3::X);
        rb.add_force("wind", Vec3::Y);
        assert_eq!(rb.forces.len(), 1);
        assert!(vec_approx_eq(rb.get_force("wind").unwrap().value, Vec3::Y));
    }

    #[test]
    fn test_set_force_enabled_nonexistent() {
        let mut rb = RigidBody::new();
        assert!(!rb.set_force_enabled("nonexistent", true));
        assert!(!rb.is_force_enabled("nonexistent"));
    }

    // ==================== GRAVITY TESTS ====================

    #[test]
    fn test_set_gravity_on_body_without_gravity_adds_disabled() {
        let mut rb = RigidBody::new();
        rb.set_gravity(Vec3::new(0.0, -2.81, 0.0));
        assert!(!rb.use_gravity());
        assert!(vec_approx_eq(rb.gravity().unwrap(), Vec3::new(0.0, -2.81, 0.0)));
    }

    #[test]
    fn test_set_gravity_keeps_enabled_state() {
        let mut rb = RigidBody::with_gravity(Vec3::new(0.0, -9.81, 0.0));
        rb.set_gravity(Vec3::new(0.0, -2.81, 0.0));
        assert!(rb.use_gravity());
        assert!(vec_approx_eq(rb.total_acceleration(), Vec3::new(0.0, -2.81, 0.0)));
    }

    #[test]
    fn test_set_use_gravity_without_force() {
        let mut rb = RigidBody::new();
        assert!(!rb.set_use_gravity(true));
        assert!(!rb.use_gravity());
    }

    #[test]
    fn test_gravity_is_per_body() {
        let mut a = RigidBody::with_gravity(Vec3::new(0.0, -9.81, 0.0));
        let b = RigidBody::with_gravity(Vec3::new(0.0, -9.81, 0.0));
        a.set_gravity(Vec3::new(0.0, -2.81, 0.0));
        assert!(vec_approx_eq(b.total_acceleration(), Vec3::new(0.0, -9.81, 0.0)));
    }

    // ==================== TOTAL ACCELERATION TESTS ====================

    #[test]
    fn test_total_acceleration_empty() {
        assert_eq!(RigidBody::new().total_acceleration(), Vec3::ZERO);
    }

    #[test]
    fn test_total_acceleration_disabled_forces_excluded() {
        let mut rb = RigidBody::new();
        rb.add_force("gravity", Vec3::new(0.0, -10.0, 0.0));
        rb.add_force_with_state("wind", Vec3::new(5.0, 0.0, 0.0), false);
        rb.add_force("thrust", Vec3::new(0.0, 0.0, 2.0));
        assert!(vec_approx_eq(
            rb.total_acceleration(),
            Vec3::new(0.0, -10.0, 2.0)
        ));
    }

    // ==================== VELOCITY TESTS ====================

    #[test]
    fn test_stop_zeroes_both_velocities() {
        let mut rb = RigidBody::new();
        rb.velocity = Vec3::new(1.0, 2.0, 3.0);
        rb.angular_velocity = Vec3::new(400.0, 0.0, 0.0);
        rb.stop();
        assert_eq!(rb.velocity, Vec3::ZERO);
        assert_eq!(rb.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_rotation_frozen() {
        let mut rb = RigidBody::new();
        assert!(!rb.rotation_frozen());
        rb.constraints = MotionConstraints::FreezeRotation;
        assert!(rb.rotation_frozen());
    }
}
