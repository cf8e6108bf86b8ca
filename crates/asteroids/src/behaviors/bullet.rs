//! Bullets: short-lived projectiles that damage what they hit

use roid_engine::ecs::{EntityId, World};
use roid_engine::events::Message;
use roid_engine::foundation::math::heading;
use roid_engine::physics::CollisionRole;

use super::bounds::kill_when_exiting_screen;
use crate::config::GameConfig;
use crate::shapes::Shape;

/// Turn `id` into a bullet
///
/// The caller sets position and velocity. A bullet dies when it leaves the
/// arena, when its lifetime runs out, or as soon as a hit is acknowledged.
pub fn bullet(world: &mut World, id: EntityId, config: &GameConfig) {
    kill_when_exiting_screen(world, id, config.arena);
    world.renderer_mut().add(id, Shape::Bullet.id(), 1.0);
    world.add_collider(id, CollisionRole::Bullet, config.bullets.radius);

    world.subscribe(id, Message::Collide, move |world, hit| {
        if world.publish(id, hit, Message::Damage) {
            world.kill(id);
        }
        true
    });
    world.schedule(Some(id), config.bullets.lifetime, move |world| world.kill(id));
}

/// Fire a bullet from `shooter`'s position along its heading
///
/// Returns `None` when the shooter no longer exists.
pub fn fire_bullet(world: &mut World, shooter: EntityId, config: &GameConfig) -> Option<EntityId> {
    let (position, angle) = world
        .get(shooter)
        .map(|entity| (entity.position, entity.angle))?;

    let id = world.add_object();
    bullet(world, id, config);
    if let Some(entity) = world.get_mut(id) {
        entity.position = position;
        entity.angle = angle;
        entity.velocity = heading(angle) * config.bullets.speed;
    }

    log::debug!("{shooter:?} fired {id:?}");
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use roid_engine::ecs::EntityState;
    use roid_engine::foundation::math::Vec2;

    #[test]
    fn test_fire_along_heading() {
        let config = GameConfig::default();
        let mut world = World::seeded(2);
        let ship = world.add_object();
        {
            let entity = world.get_mut(ship).unwrap();
            entity.position = Vec2::new(1.0, 2.0);
            entity.angle = std::f32::consts::FRAC_PI_2;
        }

        let shot = fire_bullet(&mut world, ship, &config).unwrap();
        let entity = world.get(shot).unwrap();
        assert_eq!(entity.position, Vec2::new(1.0, 2.0));
        assert_relative_eq!(entity.velocity.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(entity.velocity.y, 16.0, epsilon = 1e-5);
        assert_eq!(world.collisions().colliders(CollisionRole::Bullet).len(), 1);
        assert_eq!(world.renderer().count_shape(Shape::Bullet.id()), 1);
    }

    #[test]
    fn test_fire_from_removed_shooter() {
        let config = GameConfig::default();
        let mut world = World::seeded(2);
        let ship = world.add_object();
        world.kill(ship);
        world.sweep_removals();

        assert_eq!(fire_bullet(&mut world, ship, &config), None);
        assert!(world.is_empty());
    }

    #[test]
    fn test_bullet_dies_when_damage_is_handled() {
        let config = GameConfig::default();
        let mut world = World::seeded(2);
        let target = world.add_object();
        world.add_collider(target, CollisionRole::Chaff, 1.0);
        world.subscribe(target, Message::Damage, |_, _| true);

        let shot = world.add_object();
        bullet(&mut world, shot, &config);
        world.tick(0.0);

        assert_eq!(world.state(shot), EntityState::Removed);
        assert!(world.is_alive(target));
    }

    #[test]
    fn test_bullet_survives_unhandled_hit_until_lifetime() {
        let config = GameConfig::default();
        let mut world = World::seeded(2);
        let target = world.add_object();
        world.add_collider(target, CollisionRole::Chaff, 1.0);

        let shot = world.add_object();
        bullet(&mut world, shot, &config);

        world.tick(0.25);
        assert!(world.is_alive(shot));
        world.tick(0.25);
        assert_eq!(world.state(shot), EntityState::Removed);
        assert!(world.timeouts().is_empty());
    }

    #[test]
    fn test_bullet_dies_leaving_the_arena() {
        let config = GameConfig::default();
        let mut world = World::seeded(2);
        let ship = world.add_object();
        world.get_mut(ship).unwrap().position = Vec2::new(15.0, 0.0);

        let shot = fire_bullet(&mut world, ship, &config).unwrap();
        world.tick(0.1);
        assert_eq!(world.state(shot), EntityState::Removed);
        assert!(world.is_alive(ship));
    }
}
