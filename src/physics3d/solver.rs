use super::Body;
use crate::{math::Vec3, physics::BodyKind};

/// Advance a body by one step of semi-implicit Euler integration
/// and resolve contact with the ground plane y = 0.
/// Returns whether the body touched the ground.
///
/// Only the position is integrated. Orientation changes only when set from outside.
/// Kinematic bodies move with their velocity and pass through the ground.
pub(super) fn step_body(body: &mut Body, gravity: Vec3, dt: f64) -> bool {
    if !body.active || body.kind == BodyKind::Static {
        return false;
    }
    let dynamic = body.kind == BodyKind::Dynamic;
    if dynamic {
        body.velocity.linear += gravity * body.gravity_scale * dt;
        body.velocity.linear = body.velocity.linear / (1.0 + dt * body.linear_damping);
        body.velocity.angular = body.velocity.angular / (1.0 + dt * body.angular_damping);
    }
    body.pose.translation += body.velocity.linear * dt;

    let half_height = body.half_height();
    if !dynamic || body.pose.translation.y - half_height >= 0.0 {
        return false;
    }
    body.pose.translation.y = half_height;
    let keep_tangential = 1.0 - body.material.friction;
    let vel = &mut body.velocity.linear;
    vel.y *= -body.material.restitution;
    vel.x *= keep_tangential;
    vel.z *= keep_tangential;
    true
}
