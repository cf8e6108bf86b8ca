//! Physics module for collision detection
//!
//! Provides role-filtered circle overlap tests between registered colliders.

pub mod collision_layers;
pub mod collision_system;

pub use collision_layers::CollisionRole;
pub use collision_system::{circles_overlap, Collider, CollisionPair, CollisionSet};
