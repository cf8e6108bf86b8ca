//! Collision roles for filtering collision detection
//!
//! Every collider is either chaff (things that can be hit: asteroids, ships)
//! or a bullet. Bullets only ever test against chaff; chaff tests against
//! everything.

/// Role a collider plays in overlap tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionRole {
    /// Can be hit; tested against bullets and other chaff
    Chaff,
    /// Projectile; tested against chaff only
    Bullet,
}

impl CollisionRole {
    /// Check if two roles are ever tested against each other
    ///
    /// ```
    /// use roid_engine::physics::CollisionRole;
    ///
    /// assert!(CollisionRole::should_collide(CollisionRole::Chaff, CollisionRole::Bullet));
    /// assert!(!CollisionRole::should_collide(CollisionRole::Bullet, CollisionRole::Bullet));
    /// ```
    pub fn should_collide(a: Self, b: Self) -> bool {
        !(a == Self::Bullet && b == Self::Bullet)
    }
}
