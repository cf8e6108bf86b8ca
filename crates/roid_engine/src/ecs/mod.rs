//! Entity registry and simulation runtime
//!
//! Entities carry only kinematic state. Behavior is attached from outside by
//! registering owner-tagged callbacks, colliders, message listeners and
//! timeouts against the entity's handle.

pub mod world;
pub mod entity;
pub mod callbacks;
pub mod timeouts;

#[cfg(test)]
mod tests;

pub use world::{KeyHandler, TickHandler, TickStats, World};
pub use entity::{Entity, EntityId, EntityState};
pub use callbacks::{CallbackId, CallbackRegistry, OwnedCallback};
pub use timeouts::{Timeout, TimeoutCallback, TimeoutScheduler};
