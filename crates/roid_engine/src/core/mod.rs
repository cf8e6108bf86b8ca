//! # Core Engine Module
//!
//! Shared abstractions the other subsystems depend on.
//!
//! ## Organization
//!
//! - **Config**: engine-wide runtime settings
//! - **Foundation**: low-level utilities (math, time, logging)
//! - **ECS**: the entity registry and tick orchestration

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::ecs;

// Re-export commonly used config types
pub use config::EngineConfig;
pub use crate::config::{Config, ConfigError};
