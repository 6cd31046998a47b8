//! Intersection queries for points, rays and boxes vs. the bodies of a world.

use super::{ray_aabb, Ray, AABB};
use crate::{
    math::Coords,
    physics::{BodyKey, BodySet},
    util::tracy_span,
};

/// Anything that can be found by spatial queries.
pub trait Collidable {
    type Vector: Coords;

    /// The world-space bounding box used for every query.
    fn aabb(&self) -> AABB<Self::Vector>;

    /// Inactive bodies are invisible to queries.
    fn is_active(&self) -> bool;
}

/// Result of a successful ray or shape cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastHit<V> {
    /// The body that was hit.
    pub body: BodyKey,
    /// Where the cast first touched the body.
    pub point: V,
    /// Normal of the face that was hit.
    pub normal: V,
    /// How far along the cast the hit happened, between 0 and 1.
    pub fraction: f64,
}

/// An overlap between the bounding boxes of two bodies.
///
/// This is not a real contact manifold; there is always exactly one point,
/// placed at the average of the two boxes' centers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AabbContact<V> {
    pub point: V,
    /// Always the up axis.
    pub normal: V,
    /// Always [`PLACEHOLDER_SEPARATION`][self::PLACEHOLDER_SEPARATION].
    pub separation: f64,
}

/// Separation reported for every overlap found by [`check_collision`][self::check_collision].
pub const PLACEHOLDER_SEPARATION: f64 = 0.1;

/// Cast a segment through the world and find the first active body it enters.
///
/// If several bodies are entered at the same fraction,
/// the one created first wins.
pub fn ray_cast<B: Collidable>(
    bodies: &BodySet<B>,
    ray: Ray<B::Vector>,
) -> Option<CastHit<B::Vector>> {
    let _span = tracy_span!("ray cast", "ray_cast");

    let mut closest: Option<CastHit<B::Vector>> = None;
    for (key, body) in bodies.iter().filter(|(_, b)| b.is_active()) {
        let Some(entry) = ray_aabb(ray, &body.aabb()) else {
            continue;
        };
        if closest.map_or(true, |c| entry.fraction < c.fraction) {
            closest = Some(CastHit {
                body: key,
                point: ray.point_at(entry.fraction),
                normal: entry.normal,
                fraction: entry.fraction,
            });
        }
    }
    closest
}

/// Find the first active body whose bounding box contains the point.
pub fn query_point<B: Collidable>(bodies: &BodySet<B>, point: B::Vector) -> Option<BodyKey> {
    bodies
        .iter()
        .find(|(_, b)| b.is_active() && b.aabb().contains_point(point))
        .map(|(key, _)| key)
}

/// Find all active bodies whose bounding boxes overlap the region, in creation order.
pub fn query_aabb<B: Collidable>(bodies: &BodySet<B>, region: &AABB<B::Vector>) -> Vec<BodyKey> {
    let _span = tracy_span!("AABB query", "query_aabb");

    bodies
        .iter()
        .filter(|(_, b)| b.is_active() && b.aabb().overlaps(region))
        .map(|(key, _)| key)
        .collect()
}

/// Check whether the bounding boxes of two bodies overlap.
/// Inactive bodies never collide.
pub fn check_collision<B: Collidable>(a: &B, b: &B) -> Option<AabbContact<B::Vector>> {
    if !a.is_active() || !b.is_active() {
        return None;
    }
    let (aabb_a, aabb_b) = (a.aabb(), b.aabb());
    if !aabb_a.overlaps(&aabb_b) {
        return None;
    }
    Some(AabbContact {
        point: (aabb_a.center() + aabb_b.center()) * 0.5,
        normal: B::Vector::up(),
        separation: PLACEHOLDER_SEPARATION,
    })
}
