//! # Roid Engine
//!
//! A small entity/event runtime for frame-stepped 2D arcade games.
//!
//! ## Features
//!
//! - **Entity Registry**: generational handles with deferred, two-phase removal
//! - **Owner-Tagged Callbacks**: one registry type backing tick handlers, key
//!   bindings and message listeners
//! - **Message Bus**: synchronous entity-to-entity notifications
//! - **Timeouts**: one-shot delayed callbacks, optionally tied to an owner
//! - **Collision**: quadratic circle overlap between chaff and bullets
//!
//! ## Quick Start
//!
//! ```rust
//! use roid_engine::prelude::*;
//!
//! let mut world = World::seeded(7);
//! let rock = world.add_object();
//! world.add_collider(rock, CollisionRole::Chaff, 1.0);
//! world.on_tick(rock, move |world| {
//!     if let Some(entity) = world.get_mut(rock) {
//!         entity.angle += 0.1;
//!     }
//! });
//!
//! let stats = world.tick(1.0 / 60.0);
//! assert_eq!(stats.handlers_fired, 1);
//! ```
//!
//! Windowing, drawing and device polling stay outside the engine: a driver
//! feeds [`input::InputState`], reads [`render::RenderList`] and calls
//! [`ecs::World::tick`] once per frame.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod config;
pub mod foundation;
pub mod ecs;
pub mod events;
pub mod physics;
pub mod render;
pub mod input;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::EngineConfig,
        config::{Config, ConfigError, ConfigFormat},
        foundation::{
            math::{heading, Vec2},
            time::{SimClock, Timer},
        },
        ecs::{
            CallbackRegistry, Entity, EntityId, EntityState, KeyHandler, TickHandler, TickStats,
            TimeoutScheduler, World,
        },
        events::{Message, MessageBus, MessageHandler},
        physics::{CollisionPair, CollisionRole, CollisionSet},
        render::{RenderHandle, RenderList, ShapeId},
        input::{InputState, KeyAction, KeyCode, KeyEvent},
    };
}
