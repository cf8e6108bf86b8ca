//! Arena edges: wrap-around and kill-on-exit

use roid_engine::ecs::{EntityId, World};
use roid_engine::foundation::math::Vec2;

use crate::config::ArenaConfig;

/// Move a point that left the wrap zone to the opposite edge
///
/// Each axis is handled on its own; returns whether anything moved.
pub fn wrap_position(position: &mut Vec2, arena: &ArenaConfig) -> bool {
    let extent = arena.wrap_extent();
    let limit_x = arena.half_width + arena.wrap_margin;
    let limit_y = arena.half_height + arena.wrap_margin;
    let before = *position;

    if position.x < -limit_x {
        position.x += extent.x;
    } else if position.x > limit_x {
        position.x -= extent.x;
    }
    if position.y < -limit_y {
        position.y += extent.y;
    } else if position.y > limit_y {
        position.y -= extent.y;
    }

    *position != before
}

/// Whether a point is past the visible arena
pub fn is_outside(position: &Vec2, arena: &ArenaConfig) -> bool {
    !arena.contains(position)
}

/// Wrap `id` around the arena every tick
pub fn wrap_screen(world: &mut World, id: EntityId, arena: ArenaConfig) {
    world.on_tick(id, move |world| {
        if let Some(entity) = world.get_mut(id) {
            if wrap_position(&mut entity.position, &arena) {
                log::trace!("Wrapped {id:?} to {:?}", entity.position);
            }
        }
    });
}

/// Kill `id` once it leaves the arena
pub fn kill_when_exiting_screen(world: &mut World, id: EntityId, arena: ArenaConfig) {
    world.on_tick(id, move |world| {
        let outside = world
            .get(id)
            .is_some_and(|entity| is_outside(&entity.position, &arena));
        if outside {
            world.kill(id);
        }
    });
}
