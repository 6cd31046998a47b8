pub mod math;
pub use math::{uv, Angle, Pose3, Rotor2, Rotor3, Vec2, Vec3};

pub mod physics;
pub use physics::{
    collision::{self, Ray, AABB},
    AabbContact, BodyKey, BodyKind, CastHit, Contact, JointKey, JointParams, Material, PhysicsError,
    FORCE_TIMESTEP,
};

pub mod physics2d;
pub mod physics3d;

pub(crate) mod util;
