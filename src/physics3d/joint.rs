//! Constraints between pairs of 3D bodies.
//!
//! Like in 2D, these are recorded and kept valid by the world but not enforced.

use crate::{
    math::Vec3,
    physics::{BodyKey, JointLinks, JointParams},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joint {
    pub body_a: BodyKey,
    pub body_b: BodyKey,
    pub ty: JointType,
    /// Motor and limit settings. Hinges use angles, sliders use distances.
    pub params: JointParams,
}

impl Joint {
    pub(crate) fn new(body_a: BodyKey, body_b: BodyKey, ty: JointType) -> Self {
        Self {
            body_a,
            body_b,
            ty,
            params: JointParams::default(),
        }
    }
}

/// Pivots and axes are given in the local space of each body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JointType {
    /// Ball-and-socket: the two pivots coincide.
    Point { pivot_a: Vec3, pivot_b: Vec3 },
    /// Rotation is only allowed about the hinge axis.
    Hinge {
        pivot_a: Vec3,
        pivot_b: Vec3,
        axis_a: Vec3,
        axis_b: Vec3,
    },
    /// Translation and rotation are only allowed along the slider axis.
    Slider {
        pivot_a: Vec3,
        pivot_b: Vec3,
        axis_a: Vec3,
        axis_b: Vec3,
    },
}

impl JointLinks for Joint {
    fn bodies(&self) -> [Option<BodyKey>; 2] {
        [Some(self.body_a), Some(self.body_b)]
    }
}
