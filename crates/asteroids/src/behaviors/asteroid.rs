//! Asteroids: drift, wrap, split when damaged, crash whatever they touch

use std::f32::consts::TAU;

use rand::Rng;
use roid_engine::ecs::{EntityId, World};
use roid_engine::events::Message;
use roid_engine::foundation::math::heading;
use roid_engine::physics::CollisionRole;

use super::bounds::wrap_screen;
use crate::config::GameConfig;
use crate::shapes::Shape;

/// Turn `id` into an asteroid of the given magnitude
///
/// The asteroid starts at a random point in the arena, drifting in a random
/// direction at its tier's speed. Magnitudes past the largest tier are
/// clamped.
pub fn asteroid(world: &mut World, id: EntityId, magnitude: u8, config: &GameConfig) {
    let magnitude = magnitude.min(config.asteroids.max_magnitude());
    let radius = config.asteroids.radius(magnitude);
    let speed = config.asteroids.speed(magnitude);
    let arena = config.arena;

    let rng = world.rng();
    let x = rng.gen_range(-arena.half_width..=arena.half_width);
    let y = rng.gen_range(-arena.half_height..=arena.half_height);
    let direction = rng.gen_range(0.0..TAU);

    let Some(entity) = world.get_mut(id) else {
        log::warn!("Cannot make an asteroid of removed {id:?}");
        return;
    };
    entity.position.x = x;
    entity.position.y = y;
    entity.velocity = heading(direction) * speed;
    entity.angular_velocity = config.asteroids.angular_velocity;

    wrap_screen(world, id, arena);
    world.renderer_mut().add(id, Shape::Asteroid.id(), radius);
    world.add_collider(id, CollisionRole::Chaff, radius);

    let config = *config;
    world.subscribe(id, Message::Damage, move |world, _| {
        if magnitude > 0 {
            split(world, id, magnitude - 1, &config);
        }
        world.kill(id);
        true
    });
    world.subscribe(id, Message::Collide, move |world, hit| {
        world.publish(id, hit, Message::Crash);
        true
    });

    log::debug!("Asteroid {id:?} magnitude {magnitude} radius {radius}");
}

/// Spawn a fresh asteroid
pub fn spawn_asteroid(world: &mut World, magnitude: u8, config: &GameConfig) -> EntityId {
    let id = world.add_object();
    asteroid(world, id, magnitude, config);
    id
}

/// Spawn the children of `parent` at its current position
fn split(world: &mut World, parent: EntityId, magnitude: u8, config: &GameConfig) {
    let Some(origin) = world.get(parent).map(|entity| entity.position) else {
        return;
    };
    for _ in 0..config.asteroids.split_count {
        let child = spawn_asteroid(world, magnitude, config);
        if let Some(entity) = world.get_mut(child) {
            entity.position = origin;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use roid_engine::ecs::EntityState;
    use roid_engine::foundation::math::Vec2;

    fn living(world: &World) -> Vec<EntityId> {
        world
            .iter()
            .filter(|(id, _)| world.is_alive(*id))
            .map(|(id, _)| id)
            .collect()
    }

    #[test]
    fn test_asteroid_setup() {
        let config = GameConfig::default();
        let mut world = World::seeded(9);
        let id = spawn_asteroid(&mut world, 3, &config);

        let entity = world.get(id).unwrap();
        assert!(config.arena.contains(&entity.position));
        assert_relative_eq!(entity.velocity.norm(), 0.3, epsilon = 1e-5);
        assert_relative_eq!(entity.angular_velocity, 0.1);
        assert_eq!(world.collisions().colliders(CollisionRole::Chaff).len(), 1);
        assert_eq!(world.renderer().count_shape(Shape::Asteroid.id()), 1);
        assert_eq!(world.renderer().iter().next().map(|e| e.scale), Some(2.0));
        assert!(world.messages().is_subscribed(id, Message::Damage));
        assert!(world.messages().is_subscribed(id, Message::Collide));
    }

    #[test]
    fn test_damage_splits_into_three_children() {
        let config = GameConfig::default();
        let mut world = World::seeded(9);
        let shooter = world.add_object();
        let parent = spawn_asteroid(&mut world, 2, &config);
        world.get_mut(parent).unwrap().position = Vec2::new(1.5, -2.0);

        assert!(world.publish(shooter, parent, Message::Damage));
        assert_eq!(world.state(parent), EntityState::Zombie);

        let children: Vec<EntityId> = living(&world)
            .into_iter()
            .filter(|&id| id != shooter)
            .collect();
        assert_eq!(children.len(), 3);
        for child in children {
            let entity = world.get(child).unwrap();
            assert_eq!(entity.position, Vec2::new(1.5, -2.0));
            assert_relative_eq!(entity.velocity.norm(), 0.9, epsilon = 1e-5);
            assert!(world
                .collisions()
                .colliders(CollisionRole::Chaff)
                .iter()
                .any(|c| c.owner == child && c.radius == 0.6));
        }
    }

    #[test]
    fn test_smallest_asteroid_does_not_split() {
        let config = GameConfig::default();
        let mut world = World::seeded(9);
        let shooter = world.add_object();
        let rock = spawn_asteroid(&mut world, 0, &config);

        assert!(world.publish(shooter, rock, Message::Damage));
        world.sweep_removals();
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_collide_sends_crash_to_the_hit_entity() {
        let config = GameConfig::default();
        let mut world = World::seeded(9);
        let rock = spawn_asteroid(&mut world, 1, &config);
        let ship = world.add_object();
        world.subscribe(ship, Message::Crash, move |world, sender| {
            assert_eq!(sender, rock);
            world.kill(ship);
            true
        });

        assert!(world.publish(ship, rock, Message::Collide));
        assert_eq!(world.state(ship), EntityState::Zombie);
        assert!(world.is_alive(rock));
    }
}
