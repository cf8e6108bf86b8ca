//! World-level scenarios spanning several subsystems
