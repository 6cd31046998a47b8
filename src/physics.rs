//! Pieces shared by the 2D and 3D physics worlds:
//! handle types, body and joint storage, material properties and spatial queries.
//!
//! The worlds themselves live in [`physics2d`][crate::physics2d]
//! and [`physics3d`][crate::physics3d].

mod body_set;
pub use body_set::{BodyKey, BodySet};

mod joint_set;
pub use joint_set::{JointKey, JointLinks, JointParams, JointSet};

pub mod collision;
pub use collision::{AabbContact, CastHit, Collidable, AABB};

pub mod contact;
pub use contact::{Contact, ContactBuffer};

//

/// Timestep assumed by force and torque application.
///
/// Forces are turned into velocity changes immediately when applied
/// instead of being accumulated until the next step,
/// so they are scaled by this fixed value rather than the `dt` given to `step`.
/// Impulses are not scaled at all.
pub const FORCE_TIMESTEP: f64 = 1.0 / 60.0;

/// Maximum number of bodies in a world unless configured otherwise.
pub const DEFAULT_MAX_BODIES: usize = 100;

/// How a body participates in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyKind {
    /// Never moves on its own and ignores forces.
    Static,
    /// Moved by gravity, forces and ground contact.
    Dynamic,
    /// Ignores forces and gravity but can be moved by setting its pose or velocity.
    Kinematic,
}

impl BodyKind {
    /// Whether forces and impulses have an effect on bodies of this kind.
    #[inline]
    pub fn sees_forces(&self) -> bool {
        matches!(self, BodyKind::Dynamic)
    }
}

/// Surface properties of a body, used in ground contact.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// Fraction of tangential (and angular) velocity removed on contact, in `[0, 1]`.
    pub friction: f64,
    /// Fraction of normal velocity kept, reversed, on contact, in `[0, 1]`.
    pub restitution: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.1,
        }
    }
}

/// Errors from operations that create things in a physics world.
///
/// Operations on handles that no longer exist don't produce errors;
/// mutators do nothing and getters return neutral defaults.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("The world already holds its maximum of {capacity} bodies")]
    CapacityExceeded { capacity: usize },
    #[error("Body {0:?} does not exist in this world")]
    BodyNotFound(BodyKey),
    #[error("Joint {0:?} does not exist in this world")]
    JointNotFound(JointKey),
}
