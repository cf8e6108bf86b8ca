//! Entity implementation

use crate::foundation::math::Vec2;

slotmap::new_key_type! {
    /// Generational handle to an entity in the [`World`](super::World)
    ///
    /// Handles stay valid for the entity's whole lifetime. Once the entity is
    /// swept the handle goes stale and every lookup through it returns `None`,
    /// even if the slot is later reused.
    pub struct EntityId;
}

/// Lifecycle of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityState {
    /// Simulated and visited by every tick phase
    Alive,
    /// Killed this tick; still addressable but skipped until the sweep removes it
    Zombie,
    /// No longer in the registry (also reported for stale handles)
    Removed,
}

/// A simulated object: kinematic state plus a random identity
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    guid: u64,
    /// World-space position
    pub position: Vec2,
    /// Linear velocity in units per second
    pub velocity: Vec2,
    /// Heading in radians
    pub angle: f32,
    /// Angular velocity in radians per second
    pub angular_velocity: f32,
    state: EntityState,
}

impl Entity {
    /// Create an entity at rest at the origin
    pub(super) fn new(guid: u64) -> Self {
        Self {
            guid,
            position: Vec2::zeros(),
            velocity: Vec2::zeros(),
            angle: 0.0,
            angular_velocity: 0.0,
            state: EntityState::Alive,
        }
    }

    /// Random 64-bit identity assigned at creation
    pub fn guid(&self) -> u64 {
        self.guid
    }

    /// Current lifecycle state
    pub fn state(&self) -> EntityState {
        self.state
    }

    /// Whether the entity has not been killed
    pub fn is_alive(&self) -> bool {
        self.state == EntityState::Alive
    }

    pub(super) fn mark_zombie(&mut self) {
        self.state = EntityState::Zombie;
    }

    /// Advance position and heading by one step
    pub(super) fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_entity_is_alive_at_rest() {
        let entity = Entity::new(99);
        assert_eq!(entity.guid(), 99);
        assert!(entity.is_alive());
        assert_eq!(entity.position, Vec2::zeros());
        assert_eq!(entity.velocity, Vec2::zeros());
    }

    #[test]
    fn test_integrate() {
        let mut entity = Entity::new(1);
        entity.velocity = Vec2::new(2.0, -1.0);
        entity.angular_velocity = 0.5;
        entity.integrate(0.5);
        assert_relative_eq!(entity.position.x, 1.0);
        assert_relative_eq!(entity.position.y, -0.5);
        assert_relative_eq!(entity.angle, 0.25);
    }

    #[test]
    fn test_zombie_is_not_alive() {
        let mut entity = Entity::new(1);
        entity.mark_zombie();
        assert_eq!(entity.state(), EntityState::Zombie);
        assert!(!entity.is_alive());
    }
}
