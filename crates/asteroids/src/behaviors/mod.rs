//! Behavior composers
//!
//! A composer takes a fresh entity and wires it into the world's subsystems:
//! motion setup, tick handlers, colliders, render entries and message
//! listeners. Composers stack; `asteroid` and `player` both add
//! [`wrap_screen`] on top of their own wiring.

pub mod asteroid;
pub mod bounds;
pub mod bullet;
pub mod player;

pub use asteroid::{asteroid, spawn_asteroid};
pub use bounds::{kill_when_exiting_screen, wrap_screen};
pub use bullet::{bullet, fire_bullet};
pub use player::{player, spawn_player};

use roid_engine::ecs::{EntityId, World};

use crate::config::GameConfig;

/// Spawn the opening asteroids and the player ship
///
/// Returns the player's id.
pub fn spawn_initial_wave(world: &mut World, config: &GameConfig) -> EntityId {
    for _ in 0..config.initial_asteroids {
        spawn_asteroid(world, config.asteroids.initial_magnitude, config);
    }
    let ship = spawn_player(world, config);
    log::info!("Spawned {} asteroids and player {ship:?}", config.initial_asteroids);
    ship
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;

    #[test]
    fn test_initial_wave() {
        let config = GameConfig::default();
        let mut world = World::seeded(12);
        let ship = spawn_initial_wave(&mut world, &config);

        assert_eq!(world.len(), 6);
        assert!(world.is_alive(ship));
        assert_eq!(world.renderer().count_shape(Shape::Asteroid.id()), 5);
        assert_eq!(world.renderer().count_shape(Shape::Ship.id()), 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = GameConfig::default();
        let layout = |seed| {
            let mut world = World::seeded(seed);
            spawn_initial_wave(&mut world, &config);
            for _ in 0..30 {
                world.tick(1.0 / 60.0);
            }
            let mut positions: Vec<(f32, f32)> = world
                .iter()
                .map(|(_, entity)| (entity.position.x, entity.position.y))
                .collect();
            positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
            positions
        };

        assert_eq!(layout(21), layout(21));
        assert_ne!(layout(21), layout(22));
    }
}
