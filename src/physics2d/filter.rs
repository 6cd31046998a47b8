//! Collision filtering with categories, masks and groups.

/// Category bit set on new bodies.
pub const DEFAULT_CATEGORY: u16 = 0x0001;
/// Mask that accepts every category.
pub const ALL_CATEGORIES: u16 = 0xFFFF;

/// Decides which pairs of bodies are allowed to collide.
///
/// Each body belongs to the categories set in `category`
/// and accepts collisions with the categories set in `mask`.
/// Groups override this: two bodies in the same positive group always collide,
/// two bodies in the same negative group never do. Group zero means no group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
pub struct Filter {
    pub category: u16,
    pub mask: u16,
    pub group: i32,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY,
            mask: ALL_CATEGORIES,
            group: 0,
        }
    }
}

impl Filter {
    /// A category bit for the given index in `0..16`.
    ///
    /// # Panics
    /// Panics if `index >= 16`.
    #[inline]
    pub const fn category_bit(index: u32) -> u16 {
        assert!(index < 16, "There are only 16 filter categories");
        1 << index
    }

    /// Check whether two bodies with these filters should collide.
    pub fn should_collide(&self, other: &Filter) -> bool {
        if self.group == other.group && self.group != 0 {
            return self.group > 0;
        }
        (self.category & other.mask) != 0 && (other.category & self.mask) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(category: u16, mask: u16, group: i32) -> Filter {
        Filter {
            category,
            mask,
            group,
        }
    }

    #[test]
    fn defaults_collide() {
        assert!(Filter::default().should_collide(&Filter::default()));
    }

    #[test]
    fn masks_must_accept_each_other() {
        let player = filter(Filter::category_bit(1), !Filter::category_bit(1), 0);
        let other_player = player;
        let wall = filter(Filter::category_bit(2), ALL_CATEGORIES, 0);
        let ghost = filter(Filter::category_bit(3), 0, 0);

        assert!(!player.should_collide(&other_player));
        assert!(player.should_collide(&wall));
        assert!(wall.should_collide(&player));
        assert!(!ghost.should_collide(&wall));
        assert!(!wall.should_collide(&ghost));
    }

    #[test]
    fn groups_override_masks() {
        let positive_a = filter(0x1, 0x0, 3);
        let positive_b = filter(0x2, 0x0, 3);
        assert!(positive_a.should_collide(&positive_b));

        let negative_a = filter(0x1, ALL_CATEGORIES, -2);
        let negative_b = filter(0x1, ALL_CATEGORIES, -2);
        assert!(!negative_a.should_collide(&negative_b));

        // different groups fall back to masks
        let other_group = filter(0x1, ALL_CATEGORIES, -5);
        assert!(negative_a.should_collide(&other_group));
        assert!(!positive_a.should_collide(&filter(0x1, ALL_CATEGORIES, 4)));
    }
}
