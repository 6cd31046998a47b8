use super::PhysicsError;

use thunderdome as td;

/// Key type to look up a body stored in a physics world.
///
/// Keys carry a generation, so a key to a removed body never refers to
/// another body created later in the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyKey(pub(crate) td::Index);

impl BodyKey {
    /// Get the underlying [`thunderdome::Index`][thunderdome::Index] of this key.
    /// Useful for creating your own mappings from bodies to other things.
    #[inline]
    pub fn index(&self) -> td::Index {
        self.0
    }
}

/// Storage for the bodies of one world.
///
/// Bodies live in a generational arena for stable keys,
/// and a separate list remembers the order they were created in.
/// Everything that walks over bodies (stepping, queries, debug drawing)
/// goes in that order, which keeps results independent of slot reuse.
#[derive(Clone, Debug)]
pub struct BodySet<B> {
    bodies: td::Arena<B>,
    order: Vec<BodyKey>,
    capacity: usize,
}

impl<B> BodySet<B> {
    pub fn new(capacity: usize) -> Self {
        Self {
            bodies: td::Arena::new(),
            order: Vec::new(),
            capacity,
        }
    }

    /// The maximum number of bodies this set accepts.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert a body, failing without changes if the set is full.
    pub fn insert(&mut self, body: B) -> Result<BodyKey, PhysicsError> {
        if self.order.len() >= self.capacity {
            return Err(PhysicsError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let key = BodyKey(self.bodies.insert(body));
        self.order.push(key);
        Ok(key)
    }

    /// Remove a body, returning it if it still existed.
    ///
    /// The creation order of the remaining bodies is preserved.
    pub fn remove(&mut self, key: BodyKey) -> Option<B> {
        let body = self.bodies.remove(key.0)?;
        if let Some(pos) = self.order.iter().position(|k| *k == key) {
            self.order.remove(pos);
        }
        Some(body)
    }

    #[inline]
    pub fn contains(&self, key: BodyKey) -> bool {
        self.bodies.contains(key.0)
    }

    /// Access a body, if it still exists.
    #[inline]
    pub fn get(&self, key: BodyKey) -> Option<&B> {
        self.bodies.get(key.0)
    }

    /// Mutably access a body, if it still exists.
    #[inline]
    pub fn get_mut(&mut self, key: BodyKey) -> Option<&mut B> {
        self.bodies.get_mut(key.0)
    }

    /// Keys of all live bodies in creation order.
    #[inline]
    pub fn keys(&self) -> &[BodyKey] {
        &self.order
    }

    /// Iterate over all live bodies in creation order.
    pub fn iter(&self) -> impl '_ + Iterator<Item = (BodyKey, &B)> {
        self.order
            .iter()
            .filter_map(move |&key| self.bodies.get(key.0).map(|b| (key, b)))
    }

    /// Run a function on every live body in creation order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(BodyKey, &mut B)) {
        for &key in &self.order {
            if let Some(body) = self.bodies.get_mut(key.0) {
                f(key, body);
            }
        }
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.order.clear();
    }
}
