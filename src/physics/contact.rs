//! Contacts recorded during a step, readable until the next one.

use std::collections::HashMap;

use itertools::Itertools;

use super::{collision::AABB, BodyKey, BodySet, Collidable};
use crate::{math::Coords, util::tracy_span};

/// Something a body touched during the last step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact<V> {
    /// The other body, or `None` for the ground.
    pub other: Option<BodyKey>,
    /// Unit normal pointing from this body towards the other.
    pub normal: V,
}

/// Per-body lists of contacts, emptied at the start of every step.
#[derive(Clone, Debug)]
pub struct ContactBuffer<V> {
    contacts: HashMap<BodyKey, Vec<Contact<V>>>,
}

impl<V> Default for ContactBuffer<V> {
    fn default() -> Self {
        Self {
            contacts: HashMap::new(),
        }
    }
}

impl<V: Coords> ContactBuffer<V> {
    /// Contacts of a body in the order they were found. Empty for unknown bodies.
    pub fn get(&self, key: BodyKey) -> &[Contact<V>] {
        self.contacts.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record_ground(&mut self, key: BodyKey) {
        self.contacts.entry(key).or_default().push(Contact {
            other: None,
            normal: V::up() * -1.0,
        });
    }

    /// Record a contact on both bodies, with `normal` pointing from `a` to `b`.
    pub fn record_pair(&mut self, a: BodyKey, b: BodyKey, normal: V) {
        self.contacts.entry(a).or_default().push(Contact {
            other: Some(b),
            normal,
        });
        self.contacts.entry(b).or_default().push(Contact {
            other: Some(a),
            normal: normal * -1.0,
        });
    }

    /// Forget the contacts of one body, e.g. when it's destroyed.
    pub fn remove(&mut self, key: BodyKey) {
        self.contacts.remove(&key);
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }
}

/// The axis of least penetration between two overlapping boxes,
/// pointing from `a` towards `b`.
///
/// Ties go to the lowest axis, and coincident centers give the positive direction.
pub fn overlap_normal<V: Coords>(a: &AABB<V>, b: &AABB<V>) -> V {
    let depth = |axis: usize| {
        a.max.component(axis).min(b.max.component(axis))
            - a.min.component(axis).max(b.min.component(axis))
    };
    let mut best = 0;
    for axis in 1..V::DIM {
        if depth(axis) < depth(best) {
            best = axis;
        }
    }
    let towards_b = b.center().component(best) - a.center().component(best);
    V::axis(best, if towards_b < 0.0 { -1.0 } else { 1.0 })
}

/// Find every pair of active bodies with overlapping bounding boxes
/// that `accept` lets through, in creation order.
pub fn find_overlaps<B: Collidable>(
    bodies: &BodySet<B>,
    accept: impl Fn(&B, &B) -> bool,
) -> Vec<(BodyKey, BodyKey, B::Vector)> {
    let _span = tracy_span!("overlap search", "find_overlaps");

    let active: Vec<(BodyKey, &B, AABB<B::Vector>)> = bodies
        .iter()
        .filter(|(_, b)| b.is_active())
        .map(|(key, b)| (key, b, b.aabb()))
        .collect();
    active
        .iter()
        .tuple_combinations::<(_, _)>()
        .filter(|((_, a, aabb_a), (_, b, aabb_b))| aabb_a.overlaps(aabb_b) && accept(*a, *b))
        .map(|((ka, _, aabb_a), (kb, _, aabb_b))| (*ka, *kb, overlap_normal(aabb_a, aabb_b)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec2, Vec3};

    #[derive(Clone, Copy)]
    struct Block {
        aabb: AABB<Vec2>,
        tag: u8,
    }

    impl Collidable for Block {
        type Vector = Vec2;
        fn aabb(&self) -> AABB<Vec2> {
            self.aabb
        }
        fn is_active(&self) -> bool {
            self.tag != 0
        }
    }

    fn block(x: f64, y: f64, tag: u8) -> Block {
        Block {
            aabb: AABB::from_center_size(Vec2::new(x, y), Vec2::new(2.0, 2.0)),
            tag,
        }
    }

    #[test]
    fn normal_follows_shallowest_axis() {
        let a = AABB::from_center_size(Vec2::zero(), Vec2::new(2.0, 2.0));
        let right = AABB::from_center_size(Vec2::new(1.5, 0.2), Vec2::new(2.0, 2.0));
        assert_eq!(overlap_normal(&a, &right), Vec2::unit_x());
        let below = AABB::from_center_size(Vec2::new(0.2, -1.8), Vec2::new(2.0, 2.0));
        assert_eq!(overlap_normal(&a, &below), Vec2::new(0.0, -1.0));

        let cube = AABB::from_center_size(Vec3::zero(), Vec3::one());
        let behind = AABB::from_center_size(Vec3::new(0.0, 0.0, -0.9), Vec3::one());
        assert_eq!(overlap_normal(&cube, &behind), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn overlaps_respect_activity_and_predicate() {
        let mut bodies = BodySet::new(10);
        let a = bodies.insert(block(0.0, 0.0, 1)).unwrap();
        let b = bodies.insert(block(1.5, 0.0, 1)).unwrap();
        let _asleep = bodies.insert(block(0.5, 0.0, 0)).unwrap();
        let c = bodies.insert(block(0.0, 1.5, 2)).unwrap();
        let _far = bodies.insert(block(10.0, 0.0, 1)).unwrap();

        let all = find_overlaps(&bodies, |_, _| true);
        assert_eq!(
            all,
            vec![
                (a, b, Vec2::unit_x()),
                (a, c, Vec2::unit_y()),
                // equal depth on both axes picks x
                (b, c, Vec2::new(-1.0, 0.0)),
            ]
        );

        let same_tag = find_overlaps(&bodies, |x, y| x.tag == y.tag);
        assert_eq!(same_tag, vec![(a, b, Vec2::unit_x())]);
    }

    #[test]
    fn buffer_records_both_sides() {
        let mut bodies = BodySet::new(4);
        let a = bodies.insert(()).unwrap();
        let b = bodies.insert(()).unwrap();

        let mut buffer = ContactBuffer::<Vec2>::default();
        buffer.record_ground(a);
        buffer.record_pair(a, b, Vec2::unit_x());
        assert_eq!(
            buffer.get(a),
            &[
                Contact {
                    other: None,
                    normal: Vec2::new(0.0, -1.0)
                },
                Contact {
                    other: Some(b),
                    normal: Vec2::unit_x()
                },
            ]
        );
        assert_eq!(
            buffer.get(b),
            &[Contact {
                other: Some(a),
                normal: Vec2::new(-1.0, 0.0)
            }]
        );

        buffer.remove(a);
        assert!(buffer.get(a).is_empty());
        buffer.clear();
        assert!(buffer.get(b).is_empty());
    }
}
