//! # Asteroids
//!
//! Wireframe Asteroids on top of Roid Engine. Everything the game does is
//! expressed as behavior composers that wire entities into the engine's
//! tick handlers, colliders, messages and timeouts.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod behaviors;
pub mod config;
pub mod shapes;

pub use app::{run, AppError, RunSummary};
pub use config::{AsteroidsConfig, GameConfig};
