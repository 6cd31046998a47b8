//! A 3D physics world with bodies resting on the ground plane y = 0.
//!
//! This is a smaller sibling of [`physics2d`][crate::physics2d]
//! with three constraint types and only ray and pairwise overlap queries.

mod body;
pub use body::{Body, Shape, Velocity};

mod joint;
pub use joint::{Joint, JointType};
pub use crate::physics::JointParams;

mod solver;

use crate::{
    math::{Pose3, Rotor3, Vec3},
    physics::{
        collision::{query, Ray},
        contact, AabbContact, BodyKey, BodyKind, BodySet, CastHit, Contact, ContactBuffer,
        JointKey, JointLinks, JointSet, PhysicsError, DEFAULT_MAX_BODIES,
    },
    util::tracy_span,
};

/// Parameters for creating a [`PhysicsWorld`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WorldParams {
    pub gravity: [f64; 3],
    pub max_bodies: usize,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            max_bodies: DEFAULT_MAX_BODIES,
        }
    }
}

/// The 3D simulation.
///
/// Absent keys are handled the same way as in the 2D world:
/// mutators do nothing and getters return neutral values.
#[derive(Clone, Debug)]
pub struct PhysicsWorld {
    gravity: Vec3,
    bodies: BodySet<Body>,
    joints: JointSet<Joint>,
    contacts: ContactBuffer<Vec3>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::with_params(WorldParams::default())
    }
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self::with_params(WorldParams {
            gravity: [gravity.x, gravity.y, gravity.z],
            ..Default::default()
        })
    }

    pub fn with_params(params: WorldParams) -> Self {
        log::debug!(
            "Creating 3D physics world with gravity {:?} and room for {} bodies",
            params.gravity,
            params.max_bodies
        );
        let [x, y, z] = params.gravity;
        Self {
            gravity: Vec3::new(x, y, z),
            bodies: BodySet::new(params.max_bodies),
            joints: JointSet::new(),
            contacts: ContactBuffer::default(),
        }
    }

    #[inline]
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    #[inline]
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    pub fn clear(&mut self) {
        log::debug!(
            "Clearing 3D physics world of {} bodies and {} constraints",
            self.bodies.len(),
            self.joints.len()
        );
        self.bodies.clear();
        self.joints.clear();
        self.contacts.clear();
    }

    //
    // bodies
    //

    /// Create a body at the origin with no rotation and default properties.
    ///
    /// Fails if the world is already at its maximum number of bodies.
    pub fn create_body(
        &mut self,
        kind: BodyKind,
        shape: Shape,
        size: Vec3,
        mass: f64,
    ) -> Result<BodyKey, PhysicsError> {
        self.insert_body(Body::new(kind, shape, size, mass))
    }

    pub fn insert_body(&mut self, body: Body) -> Result<BodyKey, PhysicsError> {
        self.bodies.insert(body).map_err(|err| {
            log::warn!("Failed to create body: {err}");
            err
        })
    }

    /// Remove a body, along with every constraint attached to it.
    pub fn destroy_body(&mut self, key: BodyKey) -> Option<Body> {
        let body = self.bodies.remove(key)?;
        log::trace!("Destroyed body {key:?}");
        self.contacts.remove(key);
        let dropped = self.joints.remove_dangling(&self.bodies);
        if dropped > 0 {
            log::debug!("Dropped {dropped} constraints attached to destroyed body {key:?}");
        }
        Some(body)
    }

    #[inline]
    pub fn contains_body(&self, key: BodyKey) -> bool {
        self.bodies.contains(key)
    }

    #[inline]
    pub fn body(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    #[inline]
    pub fn body_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.bodies.get_mut(key)
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Keys of all bodies in the order they were created.
    #[inline]
    pub fn body_keys(&self) -> &[BodyKey] {
        self.bodies.keys()
    }

    fn read<T>(&self, key: BodyKey, neutral: T, f: impl FnOnce(&Body) -> T) -> T {
        self.bodies.get(key).map_or(neutral, f)
    }

    fn write(&mut self, key: BodyKey, f: impl FnOnce(&mut Body)) {
        if let Some(body) = self.bodies.get_mut(key) {
            f(body);
        }
    }

    /// The identity pose for bodies that don't exist.
    pub fn transform(&self, key: BodyKey) -> Pose3 {
        let identity = Pose3::new(Vec3::zero(), Rotor3::identity());
        self.read(key, identity, |b| b.pose)
    }

    pub fn set_transform(&mut self, key: BodyKey, pose: Pose3) {
        self.write(key, |b| b.pose = pose);
    }

    pub fn position(&self, key: BodyKey) -> Vec3 {
        self.read(key, Vec3::zero(), |b| b.pose.translation)
    }

    pub fn set_position(&mut self, key: BodyKey, position: Vec3) {
        self.write(key, |b| b.pose.translation = position);
    }

    pub fn rotation(&self, key: BodyKey) -> Rotor3 {
        self.read(key, Rotor3::identity(), |b| b.pose.rotation)
    }

    pub fn set_rotation(&mut self, key: BodyKey, rotation: Rotor3) {
        self.write(key, |b| b.pose.rotation = rotation);
    }

    pub fn linear_velocity(&self, key: BodyKey) -> Vec3 {
        self.read(key, Vec3::zero(), |b| b.velocity.linear)
    }

    pub fn set_linear_velocity(&mut self, key: BodyKey, velocity: Vec3) {
        self.write(key, |b| b.velocity.linear = velocity);
    }

    pub fn angular_velocity(&self, key: BodyKey) -> Vec3 {
        self.read(key, Vec3::zero(), |b| b.velocity.angular)
    }

    pub fn set_angular_velocity(&mut self, key: BodyKey, velocity: Vec3) {
        self.write(key, |b| b.velocity.angular = velocity);
    }

    pub fn mass(&self, key: BodyKey) -> f64 {
        self.read(key, 0.0, |b| b.mass)
    }

    pub fn set_mass(&mut self, key: BodyKey, mass: f64) {
        self.write(key, |b| b.mass = mass);
    }

    pub fn friction(&self, key: BodyKey) -> f64 {
        self.read(key, 0.0, |b| b.material.friction)
    }

    pub fn set_friction(&mut self, key: BodyKey, friction: f64) {
        self.write(key, |b| b.material.friction = friction);
    }

    pub fn restitution(&self, key: BodyKey) -> f64 {
        self.read(key, 0.0, |b| b.material.restitution)
    }

    pub fn set_restitution(&mut self, key: BodyKey, restitution: f64) {
        self.write(key, |b| b.material.restitution = restitution);
    }

    pub fn gravity_scale(&self, key: BodyKey) -> f64 {
        self.read(key, 1.0, |b| b.gravity_scale)
    }

    pub fn set_gravity_scale(&mut self, key: BodyKey, scale: f64) {
        self.write(key, |b| b.gravity_scale = scale);
    }

    pub fn linear_damping(&self, key: BodyKey) -> f64 {
        self.read(key, 0.0, |b| b.linear_damping)
    }

    pub fn set_linear_damping(&mut self, key: BodyKey, damping: f64) {
        self.write(key, |b| b.linear_damping = damping);
    }

    pub fn angular_damping(&self, key: BodyKey) -> f64 {
        self.read(key, 0.0, |b| b.angular_damping)
    }

    pub fn set_angular_damping(&mut self, key: BodyKey, damping: f64) {
        self.write(key, |b| b.angular_damping = damping);
    }

    pub fn is_active(&self, key: BodyKey) -> bool {
        self.read(key, false, |b| b.active)
    }

    pub fn set_active(&mut self, key: BodyKey, active: bool) {
        self.write(key, |b| b.active = active);
    }

    //
    // forces
    //

    pub fn apply_central_force(&mut self, key: BodyKey, force: Vec3) {
        self.write(key, |b| b.apply_central_force(force));
    }

    /// Apply a force at a position relative to the body's center.
    /// Bodies have no inertia tensor, so this is the same as a central force.
    pub fn apply_force(&mut self, key: BodyKey, force: Vec3, _relative_position: Vec3) {
        self.apply_central_force(key, force);
    }

    /// Apply an impulse at a position relative to the body's center.
    /// The position is ignored like in [`apply_force`][Self::apply_force].
    pub fn apply_impulse(&mut self, key: BodyKey, impulse: Vec3, _relative_position: Vec3) {
        self.write(key, |b| b.apply_central_impulse(impulse));
    }

    pub fn apply_torque(&mut self, key: BodyKey, torque: Vec3) {
        self.write(key, |b| b.apply_torque(torque));
    }

    pub fn apply_torque_impulse(&mut self, key: BodyKey, impulse: Vec3) {
        self.write(key, |b| b.apply_torque_impulse(impulse));
    }

    //
    // simulation and queries
    //

    /// Advance the world by `dt` seconds.
    ///
    /// Constraints are not enforced, so the iteration counts have no effect.
    /// Contacts found during the step replace the previous step's.
    pub fn step(&mut self, dt: f64, velocity_iterations: usize, position_iterations: usize) {
        let _span = tracy_span!("3D physics step", "step");
        log::trace!(
            "Stepping {} bodies by {dt}, iterations {velocity_iterations}/{position_iterations}",
            self.bodies.len()
        );

        self.contacts.clear();
        let gravity = self.gravity;
        let contacts = &mut self.contacts;
        self.bodies.for_each_mut(|key, body| {
            if solver::step_body(body, gravity, dt) {
                contacts.record_ground(key);
            }
        });

        let touching = contact::find_overlaps(&self.bodies, |a, b| {
            a.kind == BodyKind::Dynamic || b.kind == BodyKind::Dynamic
        });
        for (a, b, normal) in touching {
            self.contacts.record_pair(a, b, normal);
        }
    }

    /// Everything a body touched during the last step.
    /// Touching bodies are reported but not pushed apart.
    pub fn contacts(&self, key: BodyKey) -> &[Contact<Vec3>] {
        self.contacts.get(key)
    }

    pub fn ray_cast(&self, start: Vec3, end: Vec3) -> Option<CastHit<Vec3>> {
        query::ray_cast(&self.bodies, Ray::new(start, end))
    }

    /// Check whether the bounding boxes of two bodies overlap.
    /// The contact's `separation` is a fixed placeholder penetration depth.
    pub fn check_collision(&self, a: BodyKey, b: BodyKey) -> Option<AabbContact<Vec3>> {
        query::check_collision(self.bodies.get(a)?, self.bodies.get(b)?)
    }

    //
    // constraints
    //

    fn insert_joint(&mut self, joint: Joint) -> Result<JointKey, PhysicsError> {
        if let Some(missing) = joint
            .bodies()
            .into_iter()
            .flatten()
            .find(|b| !self.bodies.contains(*b))
        {
            return Err(PhysicsError::BodyNotFound(missing));
        }
        Ok(self.joints.insert(joint))
    }

    pub fn create_point_constraint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        pivot_a: Vec3,
        pivot_b: Vec3,
    ) -> Result<JointKey, PhysicsError> {
        self.insert_joint(Joint::new(
            body_a,
            body_b,
            JointType::Point { pivot_a, pivot_b },
        ))
    }

    pub fn create_hinge_constraint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        pivot_a: Vec3,
        pivot_b: Vec3,
        axis_a: Vec3,
        axis_b: Vec3,
    ) -> Result<JointKey, PhysicsError> {
        self.insert_joint(Joint::new(
            body_a,
            body_b,
            JointType::Hinge {
                pivot_a,
                pivot_b,
                axis_a,
                axis_b,
            },
        ))
    }

    pub fn create_slider_constraint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        pivot_a: Vec3,
        pivot_b: Vec3,
        axis_a: Vec3,
        axis_b: Vec3,
    ) -> Result<JointKey, PhysicsError> {
        self.insert_joint(Joint::new(
            body_a,
            body_b,
            JointType::Slider {
                pivot_a,
                pivot_b,
                axis_a,
                axis_b,
            },
        ))
    }

    pub fn destroy_constraint(&mut self, key: JointKey) -> Option<Joint> {
        self.joints.remove(key)
    }

    #[inline]
    pub fn constraint(&self, key: JointKey) -> Option<&Joint> {
        self.joints.get(key)
    }

    #[inline]
    pub fn constraint_count(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    pub fn is_joint_valid(&self, key: JointKey) -> bool {
        self.joints.is_valid(key, &self.bodies)
    }

    fn write_joint(&mut self, key: JointKey, f: impl FnOnce(&mut JointParams)) {
        if let Some(joint) = self.joints.get_mut(key) {
            f(&mut joint.params);
        }
    }

    pub fn set_motor_speed(&mut self, key: JointKey, speed: f64) {
        self.write_joint(key, |p| p.motor_speed = speed);
    }

    pub fn set_max_motor_force(&mut self, key: JointKey, force: f64) {
        self.write_joint(key, |p| p.max_force = force);
    }

    /// Set both motor settings at once.
    pub fn set_motor(&mut self, key: JointKey, speed: f64, max_force: f64) {
        self.write_joint(key, |p| {
            p.motor_speed = speed;
            p.max_force = max_force;
        });
    }

    pub fn set_limits(&mut self, key: JointKey, lower: f64, upper: f64) {
        self.write_joint(key, |p| {
            p.lower_limit = lower;
            p.upper_limit = upper;
        });
    }

    pub fn set_frequency(&mut self, key: JointKey, hz: f64) {
        self.write_joint(key, |p| p.frequency = hz);
    }

    pub fn set_damping(&mut self, key: JointKey, damping: f64) {
        self.write_joint(key, |p| p.damping = damping);
    }
}
