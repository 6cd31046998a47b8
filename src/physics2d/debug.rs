//! Utilities for visualizing bodies.
//!
//! The world doesn't draw anything itself. It computes world-space geometry
//! and hands it to a [`DebugDraw`] implementation supplied by the user.

use itertools::Itertools;

use super::{Body, Shape};
use crate::{math::Vec2, physics::BodyKind};

/// RGBA color with components in `[0, 1]`.
pub type Color = [f32; 4];

pub const STATIC_COLOR: Color = [0.5, 0.9, 0.5, 1.0];
pub const DYNAMIC_COLOR: Color = [0.9, 0.7, 0.7, 1.0];
pub const KINEMATIC_COLOR: Color = [0.5, 0.5, 0.9, 1.0];

/// Receiver for debug geometry.
///
/// Every method does nothing by default,
/// so implementors only need to handle the primitives they care about.
pub trait DebugDraw {
    fn draw_circle(&mut self, _center: Vec2, _radius: f64, _color: Color) {}
    fn draw_segment(&mut self, _p1: Vec2, _p2: Vec2, _color: Color) {}
    /// Draw the outline of a closed polygon.
    fn draw_polygon(&mut self, _vertices: &[Vec2], _color: Color) {}
    fn draw_solid_polygon(&mut self, _vertices: &[Vec2], _color: Color) {}
}

fn kind_color(kind: BodyKind) -> Color {
    match kind {
        BodyKind::Static => STATIC_COLOR,
        BodyKind::Dynamic => DYNAMIC_COLOR,
        BodyKind::Kinematic => KINEMATIC_COLOR,
    }
}

/// Send the geometry of one body to the drawer. Inactive bodies are skipped.
pub(super) fn draw_body(body: &Body, drawer: &mut dyn DebugDraw) {
    if !body.active {
        return;
    }
    let color = kind_color(body.kind);
    match body.shape {
        Shape::Box | Shape::Polygon => {
            let corners = body.corners();
            if body.kind == BodyKind::Static {
                drawer.draw_solid_polygon(&corners, color);
            } else {
                drawer.draw_polygon(&corners, color);
            }
        }
        Shape::Circle => {
            drawer.draw_circle(body.transform.position, body.size.x * 0.5, color);
        }
        Shape::Edge => {
            let half = Vec2::new(body.size.x * 0.5, 0.0);
            drawer.draw_segment(
                body.transform.apply(-half),
                body.transform.apply(half),
                color,
            );
        }
        Shape::Chain => {
            for (p1, p2) in body.corners().into_iter().tuple_windows() {
                drawer.draw_segment(p1, p2, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics2d::Transform2;
    use std::f64::consts::FRAC_PI_2;

    #[derive(Default)]
    struct Recorder {
        circles: Vec<(Vec2, f64)>,
        segments: Vec<(Vec2, Vec2)>,
        outlines: Vec<Vec<Vec2>>,
        solids: Vec<Vec<Vec2>>,
    }

    impl DebugDraw for Recorder {
        fn draw_circle(&mut self, center: Vec2, radius: f64, _color: Color) {
            self.circles.push((center, radius));
        }
        fn draw_segment(&mut self, p1: Vec2, p2: Vec2, _color: Color) {
            self.segments.push((p1, p2));
        }
        fn draw_polygon(&mut self, vertices: &[Vec2], _color: Color) {
            self.outlines.push(vertices.to_vec());
        }
        fn draw_solid_polygon(&mut self, vertices: &[Vec2], _color: Color) {
            self.solids.push(vertices.to_vec());
        }
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).mag() < 1e-9
    }

    #[test]
    fn rotated_box_corners() {
        let body = Body::new(BodyKind::Dynamic, Shape::Box, Vec2::new(4.0, 2.0), 1.0)
            .with_transform(Transform2 {
                position: Vec2::new(1.0, 1.0),
                angle: FRAC_PI_2,
            });
        let mut rec = Recorder::default();
        draw_body(&body, &mut rec);

        assert!(rec.solids.is_empty());
        let outline = &rec.outlines[0];
        // a quarter turn swaps width and height
        assert!(close(outline[0], Vec2::new(2.0, -1.0)));
        assert!(close(outline[1], Vec2::new(2.0, 3.0)));
        assert!(close(outline[2], Vec2::new(0.0, 3.0)));
        assert!(close(outline[3], Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn shapes_map_to_primitives() {
        let mut rec = Recorder::default();
        draw_body(
            &Body::new(BodyKind::Static, Shape::Polygon, Vec2::one(), 1.0),
            &mut rec,
        );
        draw_body(
            &Body::new(BodyKind::Dynamic, Shape::Circle, Vec2::new(3.0, 3.0), 1.0),
            &mut rec,
        );
        draw_body(
            &Body::new(BodyKind::Kinematic, Shape::Edge, Vec2::new(2.0, 0.0), 1.0),
            &mut rec,
        );
        draw_body(
            &Body::new(BodyKind::Dynamic, Shape::Chain, Vec2::one(), 1.0),
            &mut rec,
        );

        assert_eq!(rec.solids.len(), 1);
        assert_eq!(rec.circles, vec![(Vec2::zero(), 1.5)]);
        // one edge segment plus three chain links
        assert_eq!(rec.segments.len(), 4);
        assert_eq!(rec.segments[0], (Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn inactive_bodies_are_not_drawn() {
        let mut body = Body::new(BodyKind::Dynamic, Shape::Circle, Vec2::one(), 1.0);
        body.active = false;
        let mut rec = Recorder::default();
        draw_body(&body, &mut rec);
        assert!(rec.circles.is_empty());
    }
}
