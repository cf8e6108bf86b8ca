//! The player ship: steering, thrust, firing and respawn after a crash

use roid_engine::ecs::{EntityId, World};
use roid_engine::events::Message;
use roid_engine::foundation::math::{heading, Vec2};
use roid_engine::input::KeyCode;
use roid_engine::physics::CollisionRole;

use super::bounds::wrap_screen;
use super::bullet::fire_bullet;
use crate::config::GameConfig;
use crate::shapes::Shape;

/// Turn `id` into the player ship, at rest in the middle of the arena
pub fn player(world: &mut World, id: EntityId, config: &GameConfig) {
    let Some(entity) = world.get_mut(id) else {
        log::warn!("Cannot make a player of removed {id:?}");
        return;
    };
    entity.position = Vec2::zeros();
    entity.velocity = Vec2::zeros();

    let tuning = config.player;
    wrap_screen(world, id, config.arena);
    world.add_collider(id, CollisionRole::Chaff, tuning.radius);
    world.renderer_mut().add(id, Shape::Ship.id(), 1.0);
    let flame = world.renderer_mut().add(id, Shape::Flame.id(), 0.0);

    world.on_tick(id, move |world| {
        let input = world.input();
        let thrusting = input.is_held(KeyCode::Up);
        let mut turn = 0.0;
        if input.is_held(KeyCode::Right) {
            turn -= tuning.turn_step;
        }
        if input.is_held(KeyCode::Left) {
            turn += tuning.turn_step;
        }

        if let Some(ship) = world.get_mut(id) {
            ship.angle += turn;
            if thrusting {
                ship.velocity += heading(ship.angle) * tuning.thrust_step;
            }
        }

        let scale = world.renderer().get(flame).map_or(0.0, |entry| entry.scale);
        let scale = if thrusting {
            (scale + tuning.flame_step).min(1.0)
        } else {
            (scale - tuning.flame_step).max(0.0)
        };
        world.renderer_mut().set_scale(flame, scale);
    });

    let game = *config;
    world.bind_key(KeyCode::Space, id, move |world| {
        fire_bullet(world, id, &game);
    });

    world.subscribe(id, Message::Crash, move |world, _| {
        log::info!("Player {id:?} crashed, respawning in {}s", game.player.respawn_delay);
        world.schedule(None, game.player.respawn_delay, move |world| {
            spawn_player(world, &game);
        });
        world.kill(id);
        true
    });

    log::debug!("Player {id:?} ready");
}

/// Spawn a fresh player ship
pub fn spawn_player(world: &mut World, config: &GameConfig) -> EntityId {
    let id = world.add_object();
    player(world, id, config);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use roid_engine::ecs::EntityState;
    use roid_engine::input::KeyEvent;

    fn flame_scale(world: &World) -> f32 {
        world
            .renderer()
            .iter()
            .find(|entry| entry.shape == Shape::Flame.id())
            .map_or(-1.0, |entry| entry.scale)
    }

    #[test]
    fn test_player_setup() {
        let config = GameConfig::default();
        let mut world = World::seeded(4);
        let ship = spawn_player(&mut world, &config);

        assert_eq!(world.get(ship).unwrap().position, Vec2::zeros());
        assert_eq!(world.renderer().count_shape(Shape::Ship.id()), 1);
        assert_eq!(flame_scale(&world), 0.0);
        assert_eq!(world.collisions().colliders(CollisionRole::Chaff)[0].radius, 0.5);
        assert!(world.messages().is_subscribed(ship, Message::Crash));
    }

    #[test]
    fn test_steering() {
        let config = GameConfig::default();
        let mut world = World::seeded(4);
        let ship = spawn_player(&mut world, &config);

        world.input_mut().set_held(KeyCode::Right, true);
        world.tick(0.0);
        assert_relative_eq!(world.get(ship).unwrap().angle, -0.1);

        world.input_mut().set_held(KeyCode::Right, false);
        world.input_mut().set_held(KeyCode::Left, true);
        world.tick(0.0);
        world.tick(0.0);
        assert_relative_eq!(world.get(ship).unwrap().angle, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_thrust_and_flame() {
        let config = GameConfig::default();
        let mut world = World::seeded(4);
        let ship = spawn_player(&mut world, &config);

        world.key_event(KeyEvent::press(KeyCode::Up));
        world.tick(0.0);
        world.tick(0.0);
        let velocity = world.get(ship).unwrap().velocity;
        assert_relative_eq!(velocity.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(velocity.y, 0.0);
        assert_relative_eq!(flame_scale(&world), 0.2, epsilon = 1e-6);

        for _ in 0..20 {
            world.tick(0.0);
        }
        assert_relative_eq!(flame_scale(&world), 1.0);

        world.key_event(KeyEvent::release(KeyCode::Up));
        world.tick(0.0);
        assert_relative_eq!(flame_scale(&world), 0.9, epsilon = 1e-6);
        for _ in 0..20 {
            world.tick(0.0);
        }
        assert_eq!(flame_scale(&world), 0.0);
    }

    #[test]
    fn test_space_fires_a_bullet() {
        let config = GameConfig::default();
        let mut world = World::seeded(4);
        spawn_player(&mut world, &config);

        world.key_event(KeyEvent::press(KeyCode::Space));
        world.key_event(KeyEvent::release(KeyCode::Space));
        assert_eq!(world.renderer().count_shape(Shape::Bullet.id()), 1);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_crash_respawns_after_delay() {
        let config = GameConfig::default();
        let mut world = World::seeded(4);
        let rock = world.add_object();
        let ship = spawn_player(&mut world, &config);

        world.tick(0.5);
        assert!(world.publish(rock, ship, Message::Crash));
        assert_eq!(world.state(ship), EntityState::Zombie);

        world.tick(1.0);
        assert_eq!(world.state(ship), EntityState::Removed);
        assert_eq!(world.renderer().count_shape(Shape::Ship.id()), 0);

        world.tick(1.0);
        assert_eq!(world.renderer().count_shape(Shape::Ship.id()), 1);
        assert_eq!(world.len(), 2);
    }
}
