//! Joints between 2D bodies.
//!
//! Joints are parameter records only. The world stores them and keeps them consistent
//! with the bodies they reference, but stepping the world does not enforce them.

use crate::{
    math::Vec2,
    physics::{BodyKey, JointKey, JointLinks, JointParams},
};

/// A joint restricts the relative motion of two bodies,
/// or the motion of a single body in the world.
#[derive(Clone, Copy, Debug)]
pub struct Joint {
    /// The first body, which every joint has.
    pub body_a: BodyKey,
    /// The second body. `None` represents ground.
    pub body_b: Option<BodyKey>,
    /// Type of the joint, with its type-specific geometry.
    pub ty: JointType,
    /// Motor, limit and spring settings.
    pub params: JointParams,
}

/// Type-specific variables for joints.
///
/// Anchor points are in world space at the time the joint is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JointType {
    /// Pins two bodies together at a point, leaving rotation free.
    Revolute { anchor: Vec2 },
    /// Lets two bodies slide relative to each other along an axis.
    Prismatic { anchor: Vec2, axis: Vec2 },
    /// Keeps two points a fixed distance apart.
    Distance {
        anchor_a: Vec2,
        anchor_b: Vec2,
        length: f64,
    },
    /// Connects two bodies with a rope running over two fixed ground points.
    Pulley {
        ground_anchor_a: Vec2,
        ground_anchor_b: Vec2,
        anchor_a: Vec2,
        anchor_b: Vec2,
        ratio: f64,
    },
    /// Pulls a single body towards a target point.
    Mouse { target: Vec2 },
    /// Couples the motion of two other revolute or prismatic joints.
    Gear {
        joint_a: JointKey,
        joint_b: JointKey,
        ratio: f64,
    },
    /// A suspension: slides along an axis with a spring, rotation free.
    Wheel { anchor: Vec2, axis: Vec2 },
    /// Glues two bodies together.
    Weld { anchor: Vec2, reference_angle: f64 },
    /// Resists relative motion up to a maximum force and torque.
    Friction { anchor: Vec2 },
}

impl Joint {
    pub(crate) fn new(body_a: BodyKey, body_b: Option<BodyKey>, ty: JointType) -> Self {
        Self {
            body_a,
            body_b,
            ty,
            params: JointParams::default(),
        }
    }

    pub(crate) fn with_params(mut self, params: JointParams) -> Self {
        self.params = params;
        self
    }
}

impl JointLinks for Joint {
    fn bodies(&self) -> [Option<BodyKey>; 2] {
        [Some(self.body_a), self.body_b]
    }

    fn linked_joints(&self) -> [Option<JointKey>; 2] {
        match self.ty {
            JointType::Gear {
                joint_a, joint_b, ..
            } => [Some(joint_a), Some(joint_b)],
            _ => [None, None],
        }
    }
}
