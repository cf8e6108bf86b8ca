//! Entity-to-entity message bus
//!
//! Key principles:
//! - Closed vocabulary: every notification is a [`Message`] variant
//! - Directed delivery: a message goes from one sender to one target entity
//! - Handler returns bool (true = handled/consumed)
//! - Synchronous: delivery completes before `publish` returns
//!
//! Listeners are stored in a [`CallbackRegistry`] keyed by message kind, so
//! they are purged together with every other owner-tagged callback when the
//! listening entity is swept. Delivery itself needs the whole world and lives
//! in [`World::publish`](crate::ecs::World::publish).

use crate::ecs::{CallbackId, CallbackRegistry, EntityId, World};

/// Kinds of notification exchanged between entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    /// Two colliders overlapped; sent both ways for every overlapping pair
    Collide,
    /// The sender wants the target to take a hit
    Damage,
    /// The sender rammed the target
    Crash,
}

/// Listener invoked with the sender; returns whether it handled the message
pub type MessageHandler = dyn FnMut(&mut World, EntityId) -> bool;

/// Subscriptions keyed by (listener entity, message kind)
#[derive(Debug, Default)]
pub struct MessageBus {
    listeners: CallbackRegistry<MessageHandler, Message>,
}

impl MessageBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for messages of `kind` addressed to `listener`
    ///
    /// Only the first subscription per (listener, kind) is ever consulted.
    pub fn subscribe(&mut self, listener: EntityId, kind: Message, handler: Box<MessageHandler>) {
        if self.listener_for(listener, kind).is_some() {
            log::warn!("{listener:?} subscribed to {kind:?} twice; the later handler is shadowed");
        }
        self.listeners.register(listener, kind, handler);
    }

    /// First subscription matching (target, kind), even while it is running
    pub fn listener_for(&self, target: EntityId, kind: Message) -> Option<CallbackId> {
        self.listeners
            .find(|listener, subscribed| listener == target && *subscribed == kind)
    }

    /// Whether `target` listens for `kind`
    pub fn is_subscribed(&self, target: EntityId, kind: Message) -> bool {
        self.listener_for(target, kind).is_some()
    }

    /// Drop every subscription held by `listener`
    pub fn purge_owner(&mut self, listener: EntityId) -> usize {
        self.listeners.purge_owner(listener)
    }

    /// Number of subscriptions held by `listener`
    pub fn count_owned(&self, listener: EntityId) -> usize {
        self.listeners.count_owned(listener)
    }

    /// Total number of subscriptions
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether there are no subscriptions
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn checkout(&mut self, id: CallbackId) -> Option<Box<MessageHandler>> {
        self.listeners.checkout(id)
    }

    pub(crate) fn checkin(&mut self, id: CallbackId, handler: Box<MessageHandler>) {
        self.listeners.checkin(id, handler);
    }
}
