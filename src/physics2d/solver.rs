//! Per-body motion: gravity, damping, integration and ground contact.

use super::Body;
use crate::{math::Vec2, physics::BodyKind};

/// Advance a body by one step with semi-implicit Euler integration,
/// then push it out of the ground if it ended up below it.
/// Returns whether the body touched the ground.
///
/// Static and inactive bodies are left alone.
/// Kinematic bodies and sensors move but never touch the ground.
pub(super) fn step_body(body: &mut Body, gravity: Vec2, dt: f64) -> bool {
    if !body.active || body.kind == BodyKind::Static {
        return false;
    }
    let dynamic = body.kind == BodyKind::Dynamic;
    // kinematic bodies keep moving with whatever velocity they were given
    if dynamic {
        body.velocity.linear += gravity * body.gravity_scale * dt;
        body.velocity.linear = body.velocity.linear / (1.0 + dt * body.linear_damping);
        body.velocity.angular /= 1.0 + dt * body.angular_damping;
    }
    if body.fixed_rotation {
        body.velocity.angular = 0.0;
    }
    body.transform.position += body.velocity.linear * dt;
    body.transform.angle += body.velocity.angular * dt;

    dynamic && !body.sensor && resolve_ground_contact(body)
}

/// Ground is the line y = 0.
fn resolve_ground_contact(body: &mut Body) -> bool {
    let half_height = body.half_height();
    if body.transform.position.y - half_height >= 0.0 {
        return false;
    }
    body.transform.position.y = half_height;

    let keep_tangential = 1.0 - body.material.friction;
    body.velocity.linear.y *= -body.material.restitution;
    body.velocity.linear.x *= keep_tangential;
    body.velocity.angular *= keep_tangential;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics2d::{Shape, Transform2, Velocity};

    fn falling_box(y: f64) -> Body {
        Body::new(BodyKind::Dynamic, Shape::Box, Vec2::new(1.0, 1.0), 1.0).with_transform(
            Transform2 {
                position: Vec2::new(0.0, y),
                angle: 0.0,
            },
        )
    }

    #[test]
    fn gravity_ignores_density() {
        let gravity = Vec2::new(0.0, -10.0);
        let mut light = falling_box(10.0);
        let mut heavy = falling_box(10.0);
        heavy.density = 50.0;
        heavy.gravity_scale = 0.5;
        step_body(&mut light, gravity, 0.1);
        step_body(&mut heavy, gravity, 0.1);
        assert!((light.velocity.linear.y + 1.0).abs() < 1e-12);
        assert!((heavy.velocity.linear.y + 0.5).abs() < 1e-12);
        // position uses the updated velocity
        assert!((light.transform.position.y - 9.9).abs() < 1e-12);
    }

    #[test]
    fn static_and_kinematic_bodies_ignore_gravity() {
        let gravity = Vec2::new(0.0, -10.0);
        let mut stat = falling_box(5.0);
        stat.kind = BodyKind::Static;
        stat.velocity.linear = Vec2::new(1.0, 0.0);
        step_body(&mut stat, gravity, 0.5);
        assert_eq!(stat.transform.position, Vec2::new(0.0, 5.0));

        let mut kin = falling_box(5.0).with_velocity(Velocity {
            linear: Vec2::new(2.0, 0.0),
            angular: 1.0,
        });
        kin.kind = BodyKind::Kinematic;
        step_body(&mut kin, gravity, 0.5);
        assert_eq!(kin.velocity.linear, Vec2::new(2.0, 0.0));
        assert_eq!(kin.transform.position, Vec2::new(1.0, 5.0));
        assert_eq!(kin.transform.angle, 0.5);
    }

    #[test]
    fn kinematic_bodies_pass_through_the_ground() {
        let mut kin = falling_box(0.6).with_velocity(Velocity {
            linear: Vec2::new(1.0, -10.0),
            angular: 2.0,
        });
        kin.kind = BodyKind::Kinematic;
        assert!(!step_body(&mut kin, Vec2::new(0.0, -10.0), 0.1));
        assert_eq!(kin.velocity.linear, Vec2::new(1.0, -10.0));
        assert_eq!(kin.velocity.angular, 2.0);
        assert!((kin.transform.position - Vec2::new(0.1, -0.4)).mag() < 1e-12);
    }

    #[test]
    fn sensors_fall_through_the_ground() {
        let mut sensor = falling_box(0.6).with_velocity(Velocity {
            linear: Vec2::new(0.0, -2.0),
            angular: 0.0,
        });
        sensor.sensor = true;
        assert!(!step_body(&mut sensor, Vec2::zero(), 0.1));
        assert!((sensor.transform.position.y - 0.4).abs() < 1e-12);
        assert_eq!(sensor.velocity.linear, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn damping_slows_dynamic_bodies() {
        let mut body = falling_box(10.0).with_velocity(Velocity {
            linear: Vec2::new(6.0, 0.0),
            angular: 4.0,
        });
        body.linear_damping = 2.0;
        body.angular_damping = 10.0;
        step_body(&mut body, Vec2::zero(), 0.5);
        assert!((body.velocity.linear.x - 3.0).abs() < 1e-12);
        assert!((body.velocity.angular - 4.0 / 6.0).abs() < 1e-12);
        assert!((body.transform.position.x - 1.5).abs() < 1e-12);

        // damping is a dynamic body property like gravity
        let mut kin = falling_box(10.0).with_velocity(Velocity {
            linear: Vec2::new(6.0, 0.0),
            angular: 0.0,
        });
        kin.kind = BodyKind::Kinematic;
        kin.linear_damping = 2.0;
        step_body(&mut kin, Vec2::zero(), 0.5);
        assert_eq!(kin.velocity.linear.x, 6.0);
    }

    #[test]
    fn fixed_rotation_stops_spinning() {
        let mut body = falling_box(10.0).with_velocity(Velocity {
            linear: Vec2::zero(),
            angular: 3.0,
        });
        body.fixed_rotation = true;
        step_body(&mut body, Vec2::zero(), 0.1);
        assert_eq!(body.transform.angle, 0.0);
        assert_eq!(body.velocity.angular, 0.0);
    }

    #[test]
    fn inactive_bodies_are_frozen() {
        let mut body = falling_box(5.0);
        body.active = false;
        step_body(&mut body, Vec2::new(0.0, -10.0), 0.5);
        assert_eq!(body.transform.position.y, 5.0);
        assert_eq!(body.velocity, Velocity::default());
    }

    #[test]
    fn ground_contact_snaps_and_bounces() {
        let mut body = falling_box(0.6).with_velocity(Velocity {
            linear: Vec2::new(4.0, -6.0),
            angular: 3.0,
        });
        body.material.restitution = 0.5;
        body.material.friction = 0.25;
        assert!(step_body(&mut body, Vec2::zero(), 0.1));
        assert_eq!(body.transform.position.y, 0.5);
        assert!((body.velocity.linear.y - 3.0).abs() < 1e-12);
        assert!((body.velocity.linear.x - 3.0).abs() < 1e-12);
        assert!((body.velocity.angular - 2.25).abs() < 1e-12);
    }

    #[test]
    fn circles_land_on_their_radius() {
        let mut ball = Body::new(BodyKind::Dynamic, Shape::Circle, Vec2::new(2.0, 0.2), 1.0)
            .with_velocity(Velocity {
                linear: Vec2::new(0.0, -1.0),
                angular: 0.0,
            });
        ball.transform.position.y = 1.05;
        step_body(&mut ball, Vec2::zero(), 0.1);
        assert_eq!(ball.transform.position.y, 1.0);
    }
}
