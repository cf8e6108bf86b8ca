//! Owner-tagged callback registry
//!
//! A single list type backs every place the engine stores closures on behalf
//! of an entity: tick handlers, key handlers and message listeners. Each entry
//! carries its owner, a trigger value (`()` when the handler filters for itself,
//! a [`Message`](crate::events::Message) for listeners) and the boxed handler.
//!
//! Handlers need `&mut World` while the registry itself lives inside the world,
//! so dispatch happens in two shapes:
//!
//! - **Bulk**: [`CallbackRegistry::detach`] moves the whole list out, the caller
//!   invokes each entry, and [`CallbackRegistry::reattach`] puts it back with
//!   anything registered in the meantime appended behind it.
//! - **Single**: [`CallbackRegistry::checkout`] borrows one handler out of its
//!   slot and [`CallbackRegistry::checkin`] returns it, so other entries stay
//!   reachable while it runs.

use std::fmt;

use super::EntityId;

/// Stable identifier of one registered callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

/// One registered handler and the entity it belongs to
pub struct OwnedCallback<H: ?Sized, T = ()> {
    id: CallbackId,
    owner: EntityId,
    trigger: T,
    handler: Option<Box<H>>,
}

impl<H: ?Sized, T> OwnedCallback<H, T> {
    /// Entity that owns this callback
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Handler, unless it is currently checked out
    pub fn handler_mut(&mut self) -> Option<&mut H> {
        self.handler.as_deref_mut()
    }
}

/// Ordered list of owner-tagged handlers
pub struct CallbackRegistry<H: ?Sized, T = ()> {
    entries: Vec<OwnedCallback<H, T>>,
    next_id: u64,
}

impl<H: ?Sized, T> CallbackRegistry<H, T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Append a handler owned by `owner`
    pub fn register(&mut self, owner: EntityId, trigger: T, handler: Box<H>) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.entries.push(OwnedCallback {
            id,
            owner,
            trigger,
            handler: Some(handler),
        });
        id
    }

    /// Remove every entry owned by `owner`, returning how many were removed
    pub fn purge_owner(&mut self, owner: EntityId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.owner != owner);
        before - self.entries.len()
    }

    /// Number of entries owned by `owner`
    pub fn count_owned(&self, owner: EntityId) -> usize {
        self.entries.iter().filter(|entry| entry.owner == owner).count()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose owner and trigger satisfy `matches`
    ///
    /// Checked-out entries still match, so a running handler keeps shadowing
    /// later registrations for the same trigger.
    pub fn find(&self, mut matches: impl FnMut(EntityId, &T) -> bool) -> Option<CallbackId> {
        self.entries
            .iter()
            .find(|entry| matches(entry.owner, &entry.trigger))
            .map(|entry| entry.id)
    }

    /// Take a handler out of its slot for the duration of a call
    pub fn checkout(&mut self, id: CallbackId) -> Option<Box<H>> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .and_then(|entry| entry.handler.take())
    }

    /// Return a checked-out handler; dropped if its entry was purged meanwhile
    pub fn checkin(&mut self, id: CallbackId, handler: Box<H>) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.handler = Some(handler);
        }
    }

    /// Move every entry out for bulk dispatch
    pub fn detach(&mut self) -> Vec<OwnedCallback<H, T>> {
        std::mem::take(&mut self.entries)
    }

    /// Restore detached entries ahead of anything registered since [`detach`](Self::detach)
    pub fn reattach(&mut self, detached: Vec<OwnedCallback<H, T>>) {
        let added = std::mem::replace(&mut self.entries, detached);
        self.entries.extend(added);
    }
}

impl<H: ?Sized, T> Default for CallbackRegistry<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized, T: fmt::Debug> fmt::Debug for CallbackRegistry<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| (entry.owner, &entry.trigger)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    type Counter = dyn FnMut(&mut Vec<u32>);

    fn owners(count: usize) -> Vec<EntityId> {
        let mut map: SlotMap<EntityId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    /// Run every handler the way the world does: detach, invoke, reattach
    fn run_all<T>(registry: &mut CallbackRegistry<Counter, T>) -> Vec<u32> {
        let mut log = Vec::new();
        let mut detached = registry.detach();
        for entry in &mut detached {
            if let Some(handler) = entry.handler_mut() {
                handler(&mut log);
            }
        }
        registry.reattach(detached);
        log
    }

    #[test]
    fn test_runs_in_insertion_order() {
        let ids = owners(2);
        let mut registry: CallbackRegistry<Counter> = CallbackRegistry::new();
        registry.register(ids[1], (), Box::new(|log: &mut Vec<u32>| log.push(1)));
        registry.register(ids[0], (), Box::new(|log: &mut Vec<u32>| log.push(2)));
        registry.register(ids[1], (), Box::new(|log: &mut Vec<u32>| log.push(3)));

        assert_eq!(run_all(&mut registry), vec![1, 2, 3]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_purge_owner_removes_only_that_owner() {
        let ids = owners(2);
        let mut registry: CallbackRegistry<Counter> = CallbackRegistry::new();
        registry.register(ids[0], (), Box::new(|log: &mut Vec<u32>| log.push(1)));
        registry.register(ids[1], (), Box::new(|log: &mut Vec<u32>| log.push(2)));
        registry.register(ids[0], (), Box::new(|log: &mut Vec<u32>| log.push(3)));

        assert_eq!(registry.purge_owner(ids[0]), 2);
        assert_eq!(registry.count_owned(ids[0]), 0);
        assert_eq!(registry.len(), 1);

        assert_eq!(run_all(&mut registry), vec![2]);
    }

    #[test]
    fn test_reattach_keeps_originals_first() {
        let ids = owners(1);
        let mut registry: CallbackRegistry<Counter> = CallbackRegistry::new();
        registry.register(ids[0], (), Box::new(|log: &mut Vec<u32>| log.push(1)));

        let detached = registry.detach();
        assert!(registry.is_empty());
        registry.register(ids[0], (), Box::new(|log: &mut Vec<u32>| log.push(2)));
        registry.reattach(detached);

        assert_eq!(run_all(&mut registry), vec![1, 2]);
    }

    #[test]
    fn test_checked_out_entry_keeps_shadowing_later_ones() {
        let ids = owners(1);
        let mut registry: CallbackRegistry<Counter, &'static str> = CallbackRegistry::new();
        let first = registry.register(ids[0], "ping", Box::new(|log: &mut Vec<u32>| log.push(1)));
        registry.register(ids[0], "ping", Box::new(|log: &mut Vec<u32>| log.push(2)));

        assert_eq!(registry.find(|owner, name| owner == ids[0] && *name == "ping"), Some(first));

        let handler = registry.checkout(first).unwrap();
        assert_eq!(registry.find(|_, name| *name == "ping"), Some(first));
        assert!(registry.checkout(first).is_none());
        registry.checkin(first, handler);
        assert!(registry.checkout(first).is_some());
    }

    #[test]
    fn test_checkin_after_purge_drops_handler() {
        let ids = owners(1);
        let mut registry: CallbackRegistry<Counter> = CallbackRegistry::new();
        let id = registry.register(ids[0], (), Box::new(|log: &mut Vec<u32>| log.push(1)));

        let handler = registry.checkout(id).unwrap();
        registry.purge_owner(ids[0]);
        registry.checkin(id, handler);
        assert!(registry.is_empty());
    }
}
