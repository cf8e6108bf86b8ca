//! Wireframe models
//!
//! Each shape is a closed line loop in model space with the nose pointing
//! along +Y. A drawer rotates by `angle - π/2` so the nose follows the
//! entity's heading, then scales by the render entry's scale.

use roid_engine::render::ShapeId;

/// Line-loop models drawn by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Unit diamond, scaled by radius
    Asteroid,
    /// Player ship
    Ship,
    /// Short dash
    Bullet,
    /// Thruster flame behind the ship
    Flame,
}

const SHIP_HALF_WIDTH: f32 = 0.4;
const SHIP_NOSE: f32 = 0.8;
const SHIP_NOTCH: f32 = 0.2;
const SHIP_TAIL: f32 = 0.4;
const FLAME_LENGTH: f32 = 0.4;

const ASTEROID: [[f32; 2]; 4] = [[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]];

const SHIP: [[f32; 2]; 4] = [
    [-SHIP_HALF_WIDTH, -SHIP_TAIL],
    [0.0, SHIP_NOSE],
    [SHIP_HALF_WIDTH, -SHIP_TAIL],
    [0.0, -SHIP_NOTCH],
];

const BULLET: [[f32; 2]; 2] = [[0.0, -0.3], [0.0, 0.3]];

const FLAME: [[f32; 2]; 4] = [
    [-SHIP_HALF_WIDTH * 0.5, -SHIP_TAIL],
    [0.0, -SHIP_TAIL - FLAME_LENGTH],
    [SHIP_HALF_WIDTH * 0.5, -SHIP_TAIL],
    [0.0, -SHIP_TAIL - FLAME_LENGTH],
];

impl Shape {
    /// Every shape, in id order
    pub const ALL: [Self; 4] = [Self::Asteroid, Self::Ship, Self::Bullet, Self::Flame];

    /// Identifier stored in the render list
    pub const fn id(self) -> ShapeId {
        match self {
            Self::Asteroid => ShapeId(0),
            Self::Ship => ShapeId(1),
            Self::Bullet => ShapeId(2),
            Self::Flame => ShapeId(3),
        }
    }

    /// Shape behind a render-list identifier
    pub fn from_id(id: ShapeId) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| shape.id() == id)
    }

    /// Line-loop vertices in model space
    pub fn vertices(self) -> &'static [[f32; 2]] {
        match self {
            Self::Asteroid => &ASTEROID,
            Self::Ship => &SHIP,
            Self::Bullet => &BULLET,
            Self::Flame => &FLAME,
        }
    }
}
