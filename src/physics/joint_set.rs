use super::{BodyKey, BodySet};

use thunderdome as td;

/// Key type to look up a joint stored in a physics world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JointKey(pub(crate) td::Index);

impl JointKey {
    /// Get the underlying [`thunderdome::Index`][thunderdome::Index] of this key.
    #[inline]
    pub fn index(&self) -> td::Index {
        self.0
    }
}

/// Things a joint refers to, used to tell when a joint has lost one of them.
pub trait JointLinks {
    /// The bodies this joint connects. `None` stands for ground.
    fn bodies(&self) -> [Option<BodyKey>; 2];

    /// Other joints this joint is defined in terms of.
    fn linked_joints(&self) -> [Option<JointKey>; 2] {
        [None, None]
    }
}

/// Adjustable settings shared by all joint types.
/// Each type only makes use of the ones that apply to it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct JointParams {
    pub motor_speed: f64,
    /// Maximum motor force, or maximum friction force for friction joints.
    pub max_force: f64,
    /// Maximum friction torque.
    pub max_torque: f64,
    pub lower_limit: f64,
    pub upper_limit: f64,
    /// Spring frequency in Hz.
    pub frequency: f64,
    /// Spring damping ratio.
    pub damping: f64,
}

/// Manager struct holding joints inside of a physics world.
#[derive(Clone, Debug)]
pub struct JointSet<J> {
    joints: td::Arena<J>,
}

impl<J> Default for JointSet<J> {
    fn default() -> Self {
        Self {
            joints: td::Arena::new(),
        }
    }
}

impl<J: JointLinks> JointSet<J> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Add a joint. Returns a key that can be used to remove it later.
    #[inline]
    pub fn insert(&mut self, joint: J) -> JointKey {
        JointKey(self.joints.insert(joint))
    }

    /// Access a joint, if it still exists.
    #[inline]
    pub fn get(&self, key: JointKey) -> Option<&J> {
        self.joints.get(key.0)
    }

    /// Mutably access a joint, if it still exists.
    #[inline]
    pub fn get_mut(&mut self, key: JointKey) -> Option<&mut J> {
        self.joints.get_mut(key.0)
    }

    #[inline]
    pub fn contains(&self, key: JointKey) -> bool {
        self.joints.contains(key.0)
    }

    /// Remove a joint, returning it if it still existed.
    ///
    /// Joints can also disappear on their own if the bodies they're attached to
    /// are destroyed, so it's not guaranteed the joint will exist
    /// even if it hasn't been explicitly removed before.
    #[inline]
    pub fn remove(&mut self, key: JointKey) -> Option<J> {
        self.joints.remove(key.0)
    }

    pub fn iter(&self) -> impl '_ + Iterator<Item = (JointKey, &J)> {
        self.joints.iter().map(|(idx, j)| (JointKey(idx), j))
    }

    /// Check that a joint exists and everything it refers to does too.
    pub fn is_valid<B>(&self, key: JointKey, bodies: &BodySet<B>) -> bool {
        self.get(key).is_some_and(|joint| self.links_alive(joint, bodies))
    }

    fn links_alive<B>(&self, joint: &J, bodies: &BodySet<B>) -> bool {
        joint.bodies().iter().flatten().all(|b| bodies.contains(*b))
            && joint
                .linked_joints()
                .iter()
                .flatten()
                .all(|j| self.joints.contains(j.0))
    }

    /// Remove every joint that refers to a body or joint that no longer exists.
    /// Returns the number of joints removed.
    ///
    /// Removal cascades: a joint defined in terms of a removed joint is removed too.
    pub fn remove_dangling<B>(&mut self, bodies: &BodySet<B>) -> usize {
        let mut removed_total = 0;
        loop {
            let dead: Vec<td::Index> = self
                .joints
                .iter()
                .filter(|(_, joint)| !self.links_alive(joint, bodies))
                .map(|(idx, _)| idx)
                .collect();
            if dead.is_empty() {
                return removed_total;
            }
            removed_total += dead.len();
            for idx in dead {
                self.joints.remove(idx);
            }
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.joints.clear();
    }
}
