//! Quadratic collision detection
//!
//! Circles only, every candidate pair tested every tick. Entity counts are in
//! the tens, so there is no broad phase.
//!
//! Pairs come out in passes over insertion order, one per role combination
//! that [`CollisionRole::should_collide`] allows:
//! 1. every (chaff, bullet) pair
//! 2. every unordered (chaff, chaff) pair
//!
//! An entity never pairs with itself.
//!
//! Entities for which the position lookup returns `None` (killed or removed)
//! are skipped.

use crate::ecs::EntityId;
use crate::foundation::math::{distance_squared, Vec2};

use super::CollisionRole;

/// Two entities found overlapping, in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Chaff side of the pair
    pub entity_a: EntityId,
    /// Bullet for chaff/bullet pairs, the later-registered chaff otherwise
    pub entity_b: EntityId,
}

/// Collider registered for one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Entity the collider belongs to
    pub owner: EntityId,
    /// Circle radius
    pub radius: f32,
}

/// Whether two circles overlap (touching does not count)
pub fn circles_overlap(a: &Vec2, radius_a: f32, b: &Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    distance_squared(a, b) < reach * reach
}

/// Colliders partitioned by role
#[derive(Debug, Default)]
pub struct CollisionSet {
    chaff: Vec<Collider>,
    bullets: Vec<Collider>,
}

impl CollisionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a circle collider for `owner`
    pub fn add(&mut self, owner: EntityId, role: CollisionRole, radius: f32) {
        let collider = Collider { owner, radius };
        match role {
            CollisionRole::Chaff => self.chaff.push(collider),
            CollisionRole::Bullet => self.bullets.push(collider),
        }
    }

    /// Colliders registered with `role`
    pub fn colliders(&self, role: CollisionRole) -> &[Collider] {
        match role {
            CollisionRole::Chaff => &self.chaff,
            CollisionRole::Bullet => &self.bullets,
        }
    }

    /// Remove every collider owned by `owner`, returning how many were removed
    pub fn purge_owner(&mut self, owner: EntityId) -> usize {
        let before = self.chaff.len() + self.bullets.len();
        self.chaff.retain(|c| c.owner != owner);
        self.bullets.retain(|c| c.owner != owner);
        before - self.chaff.len() - self.bullets.len()
    }

    /// Number of colliders owned by `owner`
    pub fn count_owned(&self, owner: EntityId) -> usize {
        self.chaff
            .iter()
            .chain(&self.bullets)
            .filter(|c| c.owner == owner)
            .count()
    }

    /// Find every overlapping pair
    ///
    /// `position` maps an entity to its position, or `None` when the entity
    /// should not take part this tick.
    pub fn overlapping_pairs(&self, position: impl Fn(EntityId) -> Option<Vec2>) -> Vec<CollisionPair> {
        let live = |colliders: &[Collider]| -> Vec<(Collider, Vec2)> {
            colliders
                .iter()
                .filter_map(|c| position(c.owner).map(|p| (*c, p)))
                .collect()
        };
        let chaff = live(&self.chaff);
        let bullets = live(&self.bullets);

        let mut pairs = Vec::new();
        for (first, second) in PASSES {
            if !CollisionRole::should_collide(first, second) {
                continue;
            }
            let xs = side(first, &chaff, &bullets);
            let ys = side(second, &chaff, &bullets);
            for (i, (x, x_pos)) in xs.iter().enumerate() {
                // Same role: unordered pairs only.
                let candidates = if first == second { &ys[i + 1..] } else { ys };
                for (y, y_pos) in candidates {
                    if x.owner != y.owner && circles_overlap(x_pos, x.radius, y_pos, y.radius) {
                        pairs.push(CollisionPair { entity_a: x.owner, entity_b: y.owner });
                    }
                }
            }
        }
        pairs
    }
}

fn side<'a, T>(role: CollisionRole, chaff: &'a [T], bullets: &'a [T]) -> &'a [T] {
    match role {
        CollisionRole::Chaff => chaff,
        CollisionRole::Bullet => bullets,
    }
}

/// Role combinations in detection order; filtered through
/// [`CollisionRole::should_collide`]
const PASSES: [(CollisionRole, CollisionRole); 3] = [
    (CollisionRole::Chaff, CollisionRole::Bullet),
    (CollisionRole::Chaff, CollisionRole::Chaff),
    (CollisionRole::Bullet, CollisionRole::Bullet),
];
