//! Axis-aligned bounding boxes and the queries built on them.
//!
//! Every body is represented by its AABB for collision checks, point and region
//! queries and ray casts. Nothing here modifies bodies.

pub mod query;
pub use query::{AabbContact, CastHit, Collidable};

use crate::math::Coords;

/// An axis-aligned bounding box, in 2D or 3D depending on `V`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABB<V> {
    pub min: V,
    pub max: V,
}

impl<V: Coords> AABB<V> {
    /// Create a box centered on a point with the given full side lengths.
    #[inline]
    pub fn from_center_size(center: V, size: V) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> V {
        (self.min + self.max) * 0.5
    }

    /// Side length along the given axis.
    #[inline]
    pub fn extent(&self, axis: usize) -> f64 {
        self.max.component(axis) - self.min.component(axis)
    }

    /// Check whether two boxes overlap. Touching boundaries count as overlapping.
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..V::DIM).all(|axis| {
            self.max.component(axis) >= other.min.component(axis)
                && self.min.component(axis) <= other.max.component(axis)
        })
    }

    /// Check whether a point is inside the box or on its boundary.
    pub fn contains_point(&self, point: V) -> bool {
        (0..V::DIM).all(|axis| {
            let p = point.component(axis);
            p >= self.min.component(axis) && p <= self.max.component(axis)
        })
    }
}

/// A line segment to cast against bodies, from `start` to `end`.
#[derive(Clone, Copy, Debug)]
pub struct Ray<V> {
    pub start: V,
    pub end: V,
}

impl<V: Coords> Ray<V> {
    #[inline]
    pub fn new(start: V, end: V) -> Self {
        Self { start, end }
    }

    /// The point at a fraction of the way from start to end.
    #[inline]
    pub fn point_at(&self, fraction: f64) -> V {
        self.start + (self.end - self.start) * fraction
    }
}

/// Where a segment enters a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayEntry<V> {
    /// Fraction along the segment in `[0, 1]`.
    pub fraction: f64,
    /// Outward normal of the face the segment enters through.
    pub normal: V,
}

/// Intersect a segment with a box using the slab method.
///
/// Returns `None` if the segment misses the box, ends before reaching it,
/// or starts inside it (the entry would be behind the start point).
pub fn ray_aabb<V: Coords>(ray: Ray<V>, aabb: &AABB<V>) -> Option<RayEntry<V>> {
    let dir = ray.end - ray.start;
    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit = f64::INFINITY;
    let mut normal = V::zero();

    for axis in 0..V::DIM {
        let start = ray.start.component(axis);
        let d = dir.component(axis);
        let (lo, hi) = (aabb.min.component(axis), aabb.max.component(axis));
        if d == 0.0 {
            // parallel to this slab, either always inside it or never
            if start < lo || start > hi {
                return None;
            }
            continue;
        }
        let t1 = (lo - start) / d;
        let t2 = (hi - start) / d;
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        if near > t_enter {
            t_enter = near;
            // entering through the face that faces against the direction of travel
            normal = V::axis(axis, -d.signum());
        }
        t_exit = t_exit.min(far);
    }

    if t_enter <= t_exit && (0.0..=1.0).contains(&t_enter) {
        Some(RayEntry {
            fraction: t_enter,
            normal,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec2, Vec3};

    fn unit_box() -> AABB<Vec2> {
        AABB::from_center_size(Vec2::zero(), Vec2::new(2.0, 2.0))
    }

    #[test]
    fn overlap_and_containment() {
        let a = unit_box();
        let touching = AABB::from_center_size(Vec2::new(2.0, 0.0), Vec2::new(2.0, 2.0));
        let apart = AABB::from_center_size(Vec2::new(2.5, 0.0), Vec2::new(2.0, 2.0));
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
        assert!(a.contains_point(Vec2::new(1.0, -1.0)));
        assert!(!a.contains_point(Vec2::new(1.0, 1.1)));
        assert_eq!(a.extent(0), 2.0);
        assert_eq!(a.center(), Vec2::zero());
    }

    #[test]
    fn slab_hits_and_misses() {
        let b = unit_box();
        let hit = ray_aabb(Ray::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0)), &b).unwrap();
        assert!((hit.fraction - 0.4).abs() < 1e-12);
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));

        // coming from above
        let hit = ray_aabb(Ray::new(Vec2::new(0.5, 3.0), Vec2::new(0.5, -3.0)), &b).unwrap();
        assert!((hit.fraction - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(hit.normal, Vec2::new(0.0, 1.0));

        // diagonal entering through the right face
        let hit = ray_aabb(Ray::new(Vec2::new(3.0, 0.5), Vec2::new(-1.0, 0.0)), &b).unwrap();
        assert!((hit.fraction - 0.5).abs() < 1e-12);
        assert_eq!(hit.normal, Vec2::new(1.0, 0.0));

        assert!(ray_aabb(Ray::new(Vec2::new(-5.0, 5.0), Vec2::new(5.0, 5.0)), &b).is_none());
        // too short to reach
        assert!(ray_aabb(Ray::new(Vec2::new(-5.0, 0.0), Vec2::new(-2.0, 0.0)), &b).is_none());
        // pointing away
        assert!(ray_aabb(Ray::new(Vec2::new(-5.0, 0.0), Vec2::new(-9.0, 0.0)), &b).is_none());
        // starting inside
        assert!(ray_aabb(Ray::new(Vec2::zero(), Vec2::new(5.0, 0.0)), &b).is_none());
        // zero length
        assert!(ray_aabb(Ray::new(Vec2::zero(), Vec2::zero()), &b).is_none());
    }

    #[test]
    fn slab_works_in_3d() {
        let b = AABB::from_center_size(Vec3::new(0.0, 0.0, 4.0), Vec3::new(2.0, 2.0, 2.0));
        let hit = ray_aabb(Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, 10.0)), &b).unwrap();
        assert!((hit.fraction - 0.3).abs() < 1e-12);
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0));
        let above = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 2.0, 10.0));
        assert!(ray_aabb(above, &b).is_none());
    }
}
