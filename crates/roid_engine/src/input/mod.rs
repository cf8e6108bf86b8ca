//! Input state and key events
//!
//! The platform layer owns device polling. Each frame it records which keys
//! are held in [`InputState`] and forwards discrete presses to
//! [`World::key_event`](crate::ecs::World::key_event).

use std::collections::HashSet;

/// Key codes the games care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Up arrow
    Up,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Space bar
    Space,
}

/// What happened to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key went down
    Press,
    /// Key came up
    Release,
    /// Key held long enough to auto-repeat
    Repeat,
}

/// A discrete keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Key involved
    pub key: KeyCode,
    /// Press, release or repeat
    pub action: KeyAction,
}

impl KeyEvent {
    /// A press of `key`
    pub fn press(key: KeyCode) -> Self {
        Self { key, action: KeyAction::Press }
    }

    /// A release of `key`
    pub fn release(key: KeyCode) -> Self {
        Self { key, action: KeyAction::Release }
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
}

impl InputState {
    /// Create an input state with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether `key` is held
    pub fn set_held(&mut self, key: KeyCode, held: bool) {
        if held {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    /// Whether `key` is currently held
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Track a key event: press and repeat hold the key, release frees it
    pub fn apply(&mut self, event: KeyEvent) {
        self.set_held(event.key, event.action != KeyAction::Release);
    }
}
