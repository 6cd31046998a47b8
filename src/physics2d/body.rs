use super::Filter;
use crate::{
    math::{self as m, Vec2},
    physics::{collision::AABB, BodyKind, Collidable, Material, FORCE_TIMESTEP},
};

/// The collision shape of a 2D body.
///
/// Shapes carry no geometry of their own; the body's `size` gives their dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Box,
    /// A circle with diameter `size.x`.
    Circle,
    /// A line segment of length `size.x`.
    Edge,
    Polygon,
    Chain,
}

/// Position and rotation of a 2D body.
///
/// The angle is stored as-is rather than as a rotor,
/// so it keeps accumulating past a full turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform2 {
    pub position: Vec2,
    /// Rotation in radians, counterclockwise.
    pub angle: f64,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            angle: 0.0,
        }
    }
}

impl Transform2 {
    #[inline]
    pub fn new(position: Vec2, angle: m::Angle) -> Self {
        Self {
            position,
            angle: angle.rad(),
        }
    }

    /// Transform a point from body-local space to world space.
    #[inline]
    pub fn apply(&self, local: Vec2) -> Vec2 {
        m::rotate2(local, self.angle) + self.position
    }
}

/// Velocity of an object.
///
// Equivalent to a Vec3 but with names for the translational and rotational part.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    /// Linear velocity in metres per second.
    pub linear: Vec2,
    /// Angular velocity in radians per second.
    pub angular: f64,
}

impl Default for Velocity {
    fn default() -> Self {
        Velocity {
            linear: Vec2::zero(),
            angular: 0.0,
        }
    }
}

/// A rigid body in a 2D world.
#[derive(Clone, Copy, Debug)]
pub struct Body {
    pub kind: BodyKind,
    pub shape: Shape,
    /// Full width and height of the body.
    /// Circles only use `size.x`, as their diameter.
    pub size: Vec2,
    /// Used as the body's mass when applying forces and impulses.
    /// Non-positive values make forces do nothing.
    pub density: f64,
    pub transform: Transform2,
    pub velocity: Velocity,
    pub material: Material,
    /// Multiplier for the world's gravity.
    pub gravity_scale: f64,
    /// Inactive bodies are neither simulated nor found by queries.
    pub active: bool,
    pub filter: Filter,
    /// Rate at which linear velocity decays, per second.
    pub linear_damping: f64,
    pub angular_damping: f64,
    /// Keep the body from rotating at all.
    pub fixed_rotation: bool,
    /// Sensors report contacts but pass through the ground.
    pub sensor: bool,
}

impl Body {
    /// Create a body at the origin, at rest, with default material and filter.
    pub fn new(kind: BodyKind, shape: Shape, size: Vec2, density: f64) -> Self {
        Self {
            kind,
            shape,
            size,
            density,
            transform: Transform2::default(),
            velocity: Velocity::default(),
            material: Material::default(),
            gravity_scale: 1.0,
            active: true,
            filter: Filter::default(),
            linear_damping: 0.0,
            angular_damping: 0.0,
            fixed_rotation: false,
            sensor: false,
        }
    }

    /// Set the transform of the body in a builder-like chain.
    pub fn with_transform(mut self, transform: Transform2) -> Self {
        self.transform = transform;
        self
    }

    /// Set the velocity of the body in a builder-like chain.
    pub fn with_velocity(mut self, vel: Velocity) -> Self {
        self.velocity = vel;
        self
    }

    /// Full side lengths of the body's bounding box.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        match self.shape {
            Shape::Circle => Vec2::broadcast(self.size.x),
            _ => self.size,
        }
    }

    /// Distance from the body's center to the bottom of its shape.
    #[inline]
    pub fn half_height(&self) -> f64 {
        self.extent().y * 0.5
    }

    /// The mass forces are divided by, if forces affect this body at all.
    #[inline]
    fn force_mass(&self) -> Option<f64> {
        (self.kind.sees_forces() && self.density > 0.0).then_some(self.density)
    }

    /// Apply a force for one [`FORCE_TIMESTEP`][crate::physics::FORCE_TIMESTEP].
    pub fn apply_force(&mut self, force: Vec2) {
        if let Some(mass) = self.force_mass() {
            self.velocity.linear += force / mass * FORCE_TIMESTEP;
        }
    }

    /// Change the velocity directly by `impulse / mass`.
    pub fn apply_linear_impulse(&mut self, impulse: Vec2) {
        if let Some(mass) = self.force_mass() {
            self.velocity.linear += impulse / mass;
        }
    }

    /// Apply a torque for one [`FORCE_TIMESTEP`][crate::physics::FORCE_TIMESTEP].
    ///
    /// There is no moment of inertia; torque acts on angular velocity directly.
    pub fn apply_torque(&mut self, torque: f64) {
        if self.force_mass().is_some() {
            self.velocity.angular += torque * FORCE_TIMESTEP;
        }
    }

    pub fn apply_angular_impulse(&mut self, impulse: f64) {
        if self.force_mass().is_some() {
            self.velocity.angular += impulse;
        }
    }

    /// World-space corners of the body's size rectangle, rotated with the body,
    /// counterclockwise starting from the bottom left.
    pub fn corners(&self) -> [Vec2; 4] {
        let hw = self.size.x * 0.5;
        let hh = self.size.y * 0.5;
        [
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ]
        .map(|c| self.transform.apply(c))
    }
}

impl Collidable for Body {
    type Vector = Vec2;

    #[inline]
    fn aabb(&self) -> AABB<Vec2> {
        AABB::from_center_size(self.transform.position, self.extent())
    }

    #[inline]
    fn is_active(&self) -> bool {
        self.active
    }
}
