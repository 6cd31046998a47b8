use crate::{
    math::{Pose3, Rotor3, Vec3},
    physics::{collision::AABB, BodyKind, Collidable, Material, FORCE_TIMESTEP},
};

/// The collision shape of a 3D body. Dimensions come from the body's `size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Box,
    /// A sphere with diameter `size.x`.
    Sphere,
    Plane,
    Cylinder,
    Capsule,
    Mesh,
}

/// Velocity of a 3D object.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    pub linear: Vec3,
    /// Angular velocity as a scaled axis of rotation.
    pub angular: Vec3,
}

impl Default for Velocity {
    fn default() -> Self {
        Velocity {
            linear: Vec3::zero(),
            angular: Vec3::zero(),
        }
    }
}

/// A rigid body in a 3D world.
#[derive(Clone, Copy, Debug)]
pub struct Body {
    pub kind: BodyKind,
    pub shape: Shape,
    /// Full dimensions of the body along each axis.
    pub size: Vec3,
    /// Non-positive mass makes forces and impulses do nothing.
    pub mass: f64,
    pub pose: Pose3,
    pub velocity: Velocity,
    pub material: Material,
    pub gravity_scale: f64,
    pub active: bool,
    /// Rate at which linear velocity decays, per second.
    pub linear_damping: f64,
    pub angular_damping: f64,
}

impl Body {
    /// Create a body at the origin with no rotation, at rest, with default material.
    pub fn new(kind: BodyKind, shape: Shape, size: Vec3, mass: f64) -> Self {
        Self {
            kind,
            shape,
            size,
            mass,
            pose: Pose3::new(Vec3::zero(), Rotor3::identity()),
            velocity: Velocity::default(),
            material: Material::default(),
            gravity_scale: 1.0,
            active: true,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.pose.translation = position;
        self
    }

    pub fn with_velocity(mut self, vel: Velocity) -> Self {
        self.velocity = vel;
        self
    }

    /// Full side lengths of the body's bounding box.
    /// Spheres are as large as their diameter in every direction.
    #[inline]
    pub fn extent(&self) -> Vec3 {
        match self.shape {
            Shape::Sphere => Vec3::broadcast(self.size.x),
            _ => self.size,
        }
    }

    /// Distance from the body's center to the bottom of its shape.
    #[inline]
    pub fn half_height(&self) -> f64 {
        self.extent().y * 0.5
    }

    #[inline]
    fn force_mass(&self) -> Option<f64> {
        (self.kind.sees_forces() && self.mass > 0.0).then_some(self.mass)
    }

    /// Apply a force through the center of mass
    /// for one [`FORCE_TIMESTEP`][crate::physics::FORCE_TIMESTEP].
    pub fn apply_central_force(&mut self, force: Vec3) {
        if let Some(mass) = self.force_mass() {
            self.velocity.linear += force / mass * FORCE_TIMESTEP;
        }
    }

    pub fn apply_central_impulse(&mut self, impulse: Vec3) {
        if let Some(mass) = self.force_mass() {
            self.velocity.linear += impulse / mass;
        }
    }

    /// Torque acts on angular velocity directly; bodies have no inertia tensor.
    pub fn apply_torque(&mut self, torque: Vec3) {
        if self.force_mass().is_some() {
            self.velocity.angular += torque * FORCE_TIMESTEP;
        }
    }

    pub fn apply_torque_impulse(&mut self, impulse: Vec3) {
        if self.force_mass().is_some() {
            self.velocity.angular += impulse;
        }
    }
}

impl Collidable for Body {
    type Vector = Vec3;

    #[inline]
    fn aabb(&self) -> AABB<Vec3> {
        AABB::from_center_size(self.pose.translation, self.extent())
    }

    #[inline]
    fn is_active(&self) -> bool {
        self.active
    }
}
