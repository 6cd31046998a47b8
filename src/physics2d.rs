//! A 2D physics world with bodies moving in the xy plane above a ground line at y = 0.

mod body;
pub use body::{Body, Shape, Transform2, Velocity};

pub mod debug;
pub use debug::{Color, DebugDraw};

mod filter;
pub use filter::{Filter, ALL_CATEGORIES, DEFAULT_CATEGORY};

mod joint;
pub use joint::{Joint, JointType};
pub use crate::physics::JointParams;

mod solver;

use crate::{
    math::Vec2,
    physics::{
        collision::{self, query, Ray},
        contact, AabbContact, BodyKey, BodyKind, BodySet, CastHit, Contact, ContactBuffer,
        JointKey, JointLinks, JointSet, PhysicsError, AABB, DEFAULT_MAX_BODIES,
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
    pub gravity: [f64; 2],
    /// Creating bodies fails once the world holds this many.
    pub max_bodies: usize,
    /// Stored for the user's benefit. Bodies never fall asleep in this world.
    pub allow_sleeping: bool,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81],
            max_bodies: DEFAULT_MAX_BODIES,
            allow_sleeping: true,
        }
    }
}

/// The 2D simulation: owns bodies and joints and steps them forward in time.
///
/// Bodies and joints are referred to with [`BodyKey`]s and [`JointKey`]s.
/// Operations given a key to something that no longer exists do nothing,
/// and getters return a neutral value instead (zero for most things,
/// one for gravity scale).
pub struct PhysicsWorld {
    gravity: Vec2,
    allow_sleeping: bool,
    bodies: BodySet<Body>,
    joints: JointSet<Joint>,
    contacts: ContactBuffer<Vec2>,
    debug_draw: Option<Box<dyn DebugDraw>>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::with_params(WorldParams::default())
    }
}

impl PhysicsWorld {
    /// Create a world with the given gravity and default parameters otherwise.
    pub fn new(gravity: Vec2) -> Self {
        Self::with_params(WorldParams {
            gravity: [gravity.x, gravity.y],
            ..Default::default()
        })
    }

    pub fn with_params(params: WorldParams) -> Self {
        log::debug!(
            "Creating 2D physics world with gravity {:?} and room for {} bodies",
            params.gravity,
            params.max_bodies
        );
        Self {
            gravity: Vec2::new(params.gravity[0], params.gravity[1]),
            allow_sleeping: params.allow_sleeping,
            bodies: BodySet::new(params.max_bodies),
            joints: JointSet::new(),
            contacts: ContactBuffer::default(),
            debug_draw: None,
        }
    }

    #[inline]
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    #[inline]
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    #[inline]
    pub fn allow_sleeping(&self) -> bool {
        self.allow_sleeping
    }

    #[inline]
    pub fn set_allow_sleeping(&mut self, allow: bool) {
        self.allow_sleeping = allow;
    }

    /// Remove every body and joint. The debug drawer and settings are kept.
    pub fn clear(&mut self) {
        log::debug!(
            "Clearing 2D physics world of {} bodies and {} joints",
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

    /// Create a body at the origin with default properties.
    ///
    /// Fails if the world is already at its maximum number of bodies.
    pub fn create_body(
        &mut self,
        kind: BodyKind,
        shape: Shape,
        size: Vec2,
        density: f64,
    ) -> Result<BodyKey, PhysicsError> {
        self.insert_body(Body::new(kind, shape, size, density))
    }

    /// Add a fully configured body to the world.
    pub fn insert_body(&mut self, body: Body) -> Result<BodyKey, PhysicsError> {
        self.bodies.insert(body).map_err(|err| {
            log::warn!("Failed to create body: {err}");
            err
        })
    }

    /// Remove a body from the world, returning it if it existed.
    ///
    /// Joints attached to the body are removed as well,
    /// along with gear joints built on top of those.
    pub fn destroy_body(&mut self, key: BodyKey) -> Option<Body> {
        let body = self.bodies.remove(key)?;
        log::trace!("Destroyed body {key:?}");
        self.contacts.remove(key);
        let dropped = self.joints.remove_dangling(&self.bodies);
        if dropped > 0 {
            log::debug!("Dropped {dropped} joints attached to destroyed body {key:?}");
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

    /// Number of bodies currently in the world.
    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn max_bodies(&self) -> usize {
        self.bodies.capacity()
    }

    /// Keys of all bodies in the order they were created.
    #[inline]
    pub fn body_keys(&self) -> &[BodyKey] {
        self.bodies.keys()
    }

    /// Iterate over all bodies in the order they were created.
    #[inline]
    pub fn bodies(&self) -> impl '_ + Iterator<Item = (BodyKey, &Body)> {
        self.bodies.iter()
    }

    fn read<T>(&self, key: BodyKey, neutral: T, f: impl FnOnce(&Body) -> T) -> T {
        self.bodies.get(key).map_or(neutral, f)
    }

    fn write(&mut self, key: BodyKey, f: impl FnOnce(&mut Body)) {
        if let Some(body) = self.bodies.get_mut(key) {
            f(body);
        }
    }

    pub fn transform(&self, key: BodyKey) -> Transform2 {
        self.read(key, Transform2::default(), |b| b.transform)
    }

    pub fn set_transform(&mut self, key: BodyKey, transform: Transform2) {
        self.write(key, |b| b.transform = transform);
    }

    pub fn position(&self, key: BodyKey) -> Vec2 {
        self.read(key, Vec2::zero(), |b| b.transform.position)
    }

    pub fn set_position(&mut self, key: BodyKey, position: Vec2) {
        self.write(key, |b| b.transform.position = position);
    }

    /// Rotation of the body in radians.
    pub fn angle(&self, key: BodyKey) -> f64 {
        self.read(key, 0.0, |b| b.transform.angle)
    }

    pub fn set_angle(&mut self, key: BodyKey, angle: f64) {
        self.write(key, |b| b.transform.angle = angle);
    }

    pub fn linear_velocity(&self, key: BodyKey) -> Vec2 {
        self.read(key, Vec2::zero(), |b| b.velocity.linear)
    }

    pub fn set_linear_velocity(&mut self, key: BodyKey, velocity: Vec2) {
        self.write(key, |b| b.velocity.linear = velocity);
    }

    pub fn angular_velocity(&self, key: BodyKey) -> f64 {
        self.read(key, 0.0, |b| b.velocity.angular)
    }

    pub fn set_angular_velocity(&mut self, key: BodyKey, velocity: f64) {
        self.write(key, |b| b.velocity.angular = velocity);
    }

    pub fn density(&self, key: BodyKey) -> f64 {
        self.read(key, 0.0, |b| b.density)
    }

    pub fn set_density(&mut self, key: BodyKey, density: f64) {
        self.write(key, |b| b.density = density);
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

    /// Bodies that don't exist count as inactive.
    pub fn is_active(&self, key: BodyKey) -> bool {
        self.read(key, false, |b| b.active)
    }

    pub fn set_active(&mut self, key: BodyKey, active: bool) {
        self.write(key, |b| b.active = active);
    }

    pub fn filter(&self, key: BodyKey) -> Filter {
        self.read(key, Filter::default(), |b| b.filter)
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

    pub fn fixed_rotation(&self, key: BodyKey) -> bool {
        self.read(key, false, |b| b.fixed_rotation)
    }

    /// Stop a body from rotating. Its angular velocity is zeroed on every step.
    pub fn set_fixed_rotation(&mut self, key: BodyKey, fixed: bool) {
        self.write(key, |b| b.fixed_rotation = fixed);
    }

    pub fn is_sensor(&self, key: BodyKey) -> bool {
        self.read(key, false, |b| b.sensor)
    }

    /// Sensors still report contacts but aren't stopped by the ground.
    pub fn set_sensor(&mut self, key: BodyKey, sensor: bool) {
        self.write(key, |b| b.sensor = sensor);
    }

    pub fn set_filter(&mut self, key: BodyKey, filter: Filter) {
        self.write(key, |b| b.filter = filter);
    }

    pub fn set_filter_category(&mut self, key: BodyKey, category: u16) {
        self.write(key, |b| b.filter.category = category);
    }

    pub fn set_filter_mask(&mut self, key: BodyKey, mask: u16) {
        self.write(key, |b| b.filter.mask = mask);
    }

    pub fn set_filter_group(&mut self, key: BodyKey, group: i32) {
        self.write(key, |b| b.filter.group = group);
    }

    /// Check whether two bodies are allowed to collide according to their filters.
    /// False if either body doesn't exist.
    pub fn should_collide(&self, a: BodyKey, b: BodyKey) -> bool {
        match (self.bodies.get(a), self.bodies.get(b)) {
            (Some(a), Some(b)) => a.filter.should_collide(&b.filter),
            _ => false,
        }
    }

    //
    // forces
    //

    /// Apply a force for one [`FORCE_TIMESTEP`][crate::physics::FORCE_TIMESTEP].
    ///
    /// Bodies have no rotational inertia, so the point of application
    /// doesn't matter and no torque is generated.
    pub fn apply_force(&mut self, key: BodyKey, force: Vec2, _point: Vec2) {
        self.apply_force_to_center(key, force);
    }

    pub fn apply_force_to_center(&mut self, key: BodyKey, force: Vec2) {
        self.write(key, |b| b.apply_force(force));
    }

    /// Apply an impulse, changing velocity immediately.
    /// Like with forces, the point of application is ignored.
    pub fn apply_linear_impulse(&mut self, key: BodyKey, impulse: Vec2, _point: Vec2) {
        self.apply_linear_impulse_to_center(key, impulse);
    }

    pub fn apply_linear_impulse_to_center(&mut self, key: BodyKey, impulse: Vec2) {
        self.write(key, |b| b.apply_linear_impulse(impulse));
    }

    pub fn apply_torque(&mut self, key: BodyKey, torque: f64) {
        self.write(key, |b| b.apply_torque(torque));
    }

    pub fn apply_angular_impulse(&mut self, key: BodyKey, impulse: f64) {
        self.write(key, |b| b.apply_angular_impulse(impulse));
    }

    //
    // simulation
    //

    /// Advance the world by `dt` seconds.
    ///
    /// Joints are not enforced, so the iteration counts have no effect on the result.
    ///
    /// Contacts from the previous step are forgotten, and the ones found
    /// during this step can be read with [`contacts`][Self::contacts] afterwards.
    pub fn step(&mut self, dt: f64, velocity_iterations: usize, position_iterations: usize) {
        let _span = tracy_span!("2D physics step", "step");
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

        // a pair only touches if at least one of them can be pushed around
        let touching = contact::find_overlaps(&self.bodies, |a, b| {
            (a.kind == BodyKind::Dynamic || b.kind == BodyKind::Dynamic)
                && a.filter.should_collide(&b.filter)
        });
        for (a, b, normal) in touching {
            self.contacts.record_pair(a, b, normal);
        }
    }

    /// Everything a body touched during the last step, ground first,
    /// then other bodies in creation order.
    ///
    /// Bodies only touch when their bounding boxes overlap, their filters allow it
    /// and at least one of them is dynamic. Touching doesn't push them apart.
    pub fn contacts(&self, key: BodyKey) -> &[Contact<Vec2>] {
        self.contacts.get(key)
    }

    //
    // queries
    //

    /// Cast a ray from `start` to `end` and find the first body it enters.
    pub fn ray_cast(&self, start: Vec2, end: Vec2) -> Option<CastHit<Vec2>> {
        query::ray_cast(&self.bodies, Ray::new(start, end))
    }

    /// Sweep a shape along `translation` from `start`.
    ///
    /// The size of the shape is not taken into account;
    /// this is a ray cast from the starting position.
    pub fn shape_cast(
        &self,
        _shape: Shape,
        _size: Vec2,
        start: Transform2,
        translation: Vec2,
    ) -> Option<CastHit<Vec2>> {
        let _span = tracy_span!("shape cast", "shape_cast");
        self.ray_cast(start.position, start.position + translation)
    }

    /// Check whether the bounding boxes of two bodies overlap.
    /// `None` if they don't or either body doesn't exist.
    pub fn check_collision(&self, a: BodyKey, b: BodyKey) -> Option<AabbContact<Vec2>> {
        query::check_collision(self.bodies.get(a)?, self.bodies.get(b)?)
    }

    /// Find the first body whose bounding box contains the point.
    pub fn query_point(&self, point: Vec2) -> Option<BodyKey> {
        query::query_point(&self.bodies, point)
    }

    /// Find all bodies whose bounding boxes overlap the region, in creation order.
    pub fn query_aabb(&self, region: &AABB<Vec2>) -> Vec<BodyKey> {
        query::query_aabb(&self.bodies, region)
    }

    /// The bounding box of a body, used by all queries.
    pub fn body_aabb(&self, key: BodyKey) -> Option<AABB<Vec2>> {
        self.bodies.get(key).map(collision::Collidable::aabb)
    }

    //
    // joints
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
        if let Some(missing) = joint
            .linked_joints()
            .into_iter()
            .flatten()
            .find(|j| !self.joints.contains(*j))
        {
            return Err(PhysicsError::JointNotFound(missing));
        }
        Ok(self.joints.insert(joint))
    }

    pub fn create_revolute_joint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        anchor: Vec2,
    ) -> Result<JointKey, PhysicsError> {
        self.insert_joint(Joint::new(
            body_a,
            Some(body_b),
            JointType::Revolute { anchor },
        ))
    }

    pub fn create_prismatic_joint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        anchor: Vec2,
        axis: Vec2,
    ) -> Result<JointKey, PhysicsError> {
        self.insert_joint(Joint::new(
            body_a,
            Some(body_b),
            JointType::Prismatic { anchor, axis },
        ))
    }

    pub fn create_distance_joint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        anchor_a: Vec2,
        anchor_b: Vec2,
        length: f64,
    ) -> Result<JointKey, PhysicsError> {
        self.insert_joint(Joint::new(
            body_a,
            Some(body_b),
            JointType::Distance {
                anchor_a,
                anchor_b,
                length,
            },
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_pulley_joint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        ground_anchor_a: Vec2,
        ground_anchor_b: Vec2,
        anchor_a: Vec2,
        anchor_b: Vec2,
        ratio: f64,
    ) -> Result<JointKey, PhysicsError> {
        self.insert_joint(Joint::new(
            body_a,
            Some(body_b),
            JointType::Pulley {
                ground_anchor_a,
                ground_anchor_b,
                anchor_a,
                anchor_b,
                ratio,
            },
        ))
    }

    /// A mouse joint only has one body; the other end is the target point.
    pub fn create_mouse_joint(
        &mut self,
        body: BodyKey,
        target: Vec2,
    ) -> Result<JointKey, PhysicsError> {
        self.insert_joint(Joint::new(body, None, JointType::Mouse { target }))
    }

    /// A gear joint is removed along with either of the joints it connects.
    pub fn create_gear_joint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        joint_a: JointKey,
        joint_b: JointKey,
        ratio: f64,
    ) -> Result<JointKey, PhysicsError> {
        self.insert_joint(Joint::new(
            body_a,
            Some(body_b),
            JointType::Gear {
                joint_a,
                joint_b,
                ratio,
            },
        ))
    }

    pub fn create_wheel_joint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        anchor: Vec2,
        axis: Vec2,
        damping: f64,
    ) -> Result<JointKey, PhysicsError> {
        let joint = Joint::new(body_a, Some(body_b), JointType::Wheel { anchor, axis })
            .with_params(JointParams {
                damping,
                ..Default::default()
            });
        self.insert_joint(joint)
    }

    pub fn create_weld_joint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        anchor: Vec2,
        reference_angle: f64,
    ) -> Result<JointKey, PhysicsError> {
        self.insert_joint(Joint::new(
            body_a,
            Some(body_b),
            JointType::Weld {
                anchor,
                reference_angle,
            },
        ))
    }

    pub fn create_friction_joint(
        &mut self,
        body_a: BodyKey,
        body_b: BodyKey,
        anchor: Vec2,
        max_force: f64,
        max_torque: f64,
    ) -> Result<JointKey, PhysicsError> {
        let joint = Joint::new(body_a, Some(body_b), JointType::Friction { anchor })
            .with_params(JointParams {
                max_force,
                max_torque,
                ..Default::default()
            });
        self.insert_joint(joint)
    }

    /// Remove a joint, returning it if it existed.
    ///
    /// Gear joints connecting the removed joint are removed too.
    pub fn destroy_joint(&mut self, key: JointKey) -> Option<Joint> {
        let joint = self.joints.remove(key)?;
        let dropped = self.joints.remove_dangling(&self.bodies);
        if dropped > 0 {
            log::debug!("Dropped {dropped} gear joints attached to destroyed joint {key:?}");
        }
        Some(joint)
    }

    #[inline]
    pub fn joint(&self, key: JointKey) -> Option<&Joint> {
        self.joints.get(key)
    }

    #[inline]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    pub fn joints(&self) -> impl '_ + Iterator<Item = (JointKey, &Joint)> {
        self.joints.iter()
    }

    /// Check that a joint exists and so does everything it's attached to.
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

    pub fn set_max_torque(&mut self, key: JointKey, torque: f64) {
        self.write_joint(key, |p| p.max_torque = torque);
    }

    /// Set the lower and upper limits of a joint's motion. Stored as given.
    pub fn set_limits(&mut self, key: JointKey, lower: f64, upper: f64) {
        self.write_joint(key, |p| {
            p.lower_limit = lower;
            p.upper_limit = upper;
        });
    }

    /// Set a joint's spring frequency in Hz.
    pub fn set_frequency(&mut self, key: JointKey, hz: f64) {
        self.write_joint(key, |p| p.frequency = hz);
    }

    pub fn set_damping(&mut self, key: JointKey, damping: f64) {
        self.write_joint(key, |p| p.damping = damping);
    }

    //
    // debug drawing
    //

    /// Set the receiver used by [`draw_debug_data`][Self::draw_debug_data].
    pub fn set_debug_draw(&mut self, drawer: Box<dyn DebugDraw>) {
        self.debug_draw = Some(drawer);
    }

    /// Remove the debug drawer, returning it if there was one.
    pub fn clear_debug_draw(&mut self) -> Option<Box<dyn DebugDraw>> {
        self.debug_draw.take()
    }

    /// Draw every active body with the drawer set with
    /// [`set_debug_draw`][Self::set_debug_draw]. Does nothing if there is none.
    pub fn draw_debug_data(&mut self) {
        if let Some(drawer) = self.debug_draw.as_deref_mut() {
            for (_, body) in self.bodies.iter() {
                debug::draw_body(body, drawer);
            }
        }
    }

    /// Draw every active body with the given drawer.
    pub fn draw_debug_data_with(&self, drawer: &mut dyn DebugDraw) {
        for (_, body) in self.bodies.iter() {
            debug::draw_body(body, drawer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::new(0.0, -10.0))
    }

    fn unit_box(world: &mut PhysicsWorld) -> BodyKey {
        world
            .create_body(BodyKind::Dynamic, Shape::Box, Vec2::one(), 1.0)
            .unwrap()
    }

    #[test]
    fn absent_bodies_give_neutral_values() {
        let mut world = world();
        let key = unit_box(&mut world);
        world.set_position(key, Vec2::new(3.0, 4.0));
        world.destroy_body(key);

        world.set_position(key, Vec2::new(1.0, 1.0));
        world.apply_force_to_center(key, Vec2::one());
        assert_eq!(world.position(key), Vec2::zero());
        assert_eq!(world.transform(key), Transform2::default());
        assert_eq!(world.angle(key), 0.0);
        assert_eq!(world.linear_velocity(key), Vec2::zero());
        assert_eq!(world.angular_velocity(key), 0.0);
        assert_eq!(world.density(key), 0.0);
        assert_eq!(world.friction(key), 0.0);
        assert_eq!(world.restitution(key), 0.0);
        assert_eq!(world.gravity_scale(key), 1.0);
        assert!(!world.is_active(key));
        assert!(world.check_collision(key, key).is_none());
        assert_eq!(world.linear_damping(key), 0.0);
        assert!(!world.fixed_rotation(key));
        assert!(!world.is_sensor(key));
        assert!(world.contacts(key).is_empty());
    }

    #[test]
    fn should_collide_needs_both_bodies() {
        let mut world = world();
        let a = unit_box(&mut world);
        let b = unit_box(&mut world);
        assert!(world.should_collide(a, b));
        world.set_filter_group(a, -1);
        world.set_filter_group(b, -1);
        assert!(!world.should_collide(a, b));
        world.set_filter_group(b, 0);

        world.destroy_body(b);
        assert!(!world.should_collide(a, b));
        assert!(!world.should_collide(b, a));
        assert!(!world.should_collide(b, b));
    }

    #[test]
    fn setters_round_trip_through_the_world() {
        let mut world = world();
        let key = unit_box(&mut world);
        world.set_angle(key, 0.25);
        world.set_linear_velocity(key, Vec2::new(1.0, 2.0));
        world.set_angular_velocity(key, -3.0);
        world.set_density(key, 4.0);
        world.set_friction(key, 0.9);
        world.set_restitution(key, 0.7);
        world.set_gravity_scale(key, 0.0);
        world.set_filter_category(key, 0x0004);
        world.set_filter_mask(key, 0x00F0);
        world.set_filter_group(key, -1);

        assert_eq!(world.angle(key), 0.25);
        assert_eq!(world.linear_velocity(key), Vec2::new(1.0, 2.0));
        assert_eq!(world.angular_velocity(key), -3.0);
        assert_eq!(world.density(key), 4.0);
        assert_eq!(world.friction(key), 0.9);
        assert_eq!(world.restitution(key), 0.7);
        assert_eq!(world.gravity_scale(key), 0.0);
        assert_eq!(
            world.filter(key),
            Filter {
                category: 0x0004,
                mask: 0x00F0,
                group: -1
            }
        );
    }

    #[test]
    fn force_point_is_ignored() {
        let mut world = world();
        let a = unit_box(&mut world);
        let b = unit_box(&mut world);
        world.apply_force(a, Vec2::new(60.0, 0.0), Vec2::new(10.0, 10.0));
        world.apply_force_to_center(b, Vec2::new(60.0, 0.0));
        assert_eq!(world.linear_velocity(a), world.linear_velocity(b));
        assert_eq!(world.angular_velocity(a), 0.0);

        world.apply_linear_impulse(a, Vec2::new(0.0, 2.0), Vec2::new(-1.0, 0.0));
        assert!((world.linear_velocity(a).y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn joints_require_live_references() {
        let mut world = world();
        let a = unit_box(&mut world);
        let b = unit_box(&mut world);
        let gone = unit_box(&mut world);
        world.destroy_body(gone);

        assert_eq!(
            world.create_revolute_joint(a, gone, Vec2::zero()),
            Err(PhysicsError::BodyNotFound(gone))
        );
        let hinge = world.create_revolute_joint(a, b, Vec2::zero()).unwrap();
        let slider = world
            .create_prismatic_joint(a, b, Vec2::zero(), Vec2::unit_x())
            .unwrap();
        world.destroy_joint(slider);
        assert_eq!(
            world.create_gear_joint(a, b, hinge, slider, 2.0),
            Err(PhysicsError::JointNotFound(slider))
        );
        assert_eq!(world.joint_count(), 1);
    }

    #[test]
    fn joint_parameters_are_stored() {
        let mut world = world();
        let a = unit_box(&mut world);
        let b = unit_box(&mut world);

        let wheel = world
            .create_wheel_joint(a, b, Vec2::zero(), Vec2::unit_y(), 0.7)
            .unwrap();
        world.set_motor_speed(wheel, 3.0);
        world.set_max_motor_force(wheel, 100.0);
        world.set_limits(wheel, -1.0, 1.0);
        world.set_frequency(wheel, 4.0);

        let params = world.joint(wheel).unwrap().params;
        assert_eq!(params.damping, 0.7);
        assert_eq!(params.motor_speed, 3.0);
        assert_eq!(params.max_force, 100.0);
        assert_eq!((params.lower_limit, params.upper_limit), (-1.0, 1.0));
        assert_eq!(params.frequency, 4.0);

        let friction = world
            .create_friction_joint(a, b, Vec2::zero(), 5.0, 6.0)
            .unwrap();
        let params = world.joint(friction).unwrap().params;
        assert_eq!((params.max_force, params.max_torque), (5.0, 6.0));

        let mouse = world.create_mouse_joint(a, Vec2::new(2.0, 2.0)).unwrap();
        let joint = world.joint(mouse).unwrap();
        assert_eq!(joint.body_b, None);
        assert_eq!(
            joint.ty,
            JointType::Mouse {
                target: Vec2::new(2.0, 2.0)
            }
        );
    }

    #[test]
    fn stepping_does_not_touch_joints() {
        let mut world = world();
        let a = unit_box(&mut world);
        let b = unit_box(&mut world);
        world.set_position(a, Vec2::new(0.0, 5.0));
        world.set_position(b, Vec2::new(3.0, 5.0));
        let rope = world
            .create_distance_joint(a, b, Vec2::new(0.0, 5.0), Vec2::new(3.0, 5.0), 3.0)
            .unwrap();
        let before = *world.joint(rope).unwrap();
        world.set_linear_velocity(b, Vec2::new(10.0, 0.0));
        world.step(0.1, 8, 3);
        // b moved freely regardless of the rope
        assert!(world.position(b).x > 3.9);
        assert_eq!(world.joint(rope).unwrap().ty, before.ty);
    }

    #[test]
    fn clear_empties_the_world() {
        let mut world = world();
        let a = unit_box(&mut world);
        let joint = world.create_mouse_joint(a, Vec2::zero()).unwrap();
        world.clear();
        assert_eq!(world.body_count(), 0);
        assert!(!world.contains_body(a));
        assert!(!world.is_joint_valid(joint));
        assert_eq!(world.max_bodies(), DEFAULT_MAX_BODIES);
    }
}
