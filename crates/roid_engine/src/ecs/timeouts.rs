//! One-shot delayed callbacks
//!
//! Entries hold an absolute due time on the simulation clock. Once per tick
//! the world drains every due entry and runs it; nothing repeats.

use std::fmt;

use super::{EntityId, World};

/// Callback run when a timeout comes due
pub type TimeoutCallback = dyn FnOnce(&mut World);

/// A pending one-shot callback
pub struct Timeout {
    owner: Option<EntityId>,
    due: f64,
    callback: Box<TimeoutCallback>,
}

impl Timeout {
    /// Entity whose death cancels this timeout, if any
    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    /// Absolute simulation time at which the timeout fires
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Consume the timeout, yielding its callback
    pub fn into_callback(self) -> Box<TimeoutCallback> {
        self.callback
    }
}

impl fmt::Debug for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeout")
            .field("owner", &self.owner)
            .field("due", &self.due)
            .finish_non_exhaustive()
    }
}

/// Pending timeouts in scheduling order
#[derive(Debug, Default)]
pub struct TimeoutScheduler {
    entries: Vec<Timeout>,
}

impl TimeoutScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `callback` to run at absolute time `due`
    ///
    /// With `owner = None` the timeout survives every entity's death.
    pub fn schedule(&mut self, owner: Option<EntityId>, due: f64, callback: Box<TimeoutCallback>) {
        self.entries.push(Timeout { owner, due, callback });
    }

    /// Remove and return every entry due at or before `now`, in scheduling order
    pub fn take_due(&mut self, now: f64) -> Vec<Timeout> {
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.entries).into_iter().partition(|t| t.due <= now);
        self.entries = pending;
        due
    }

    /// Cancel every timeout owned by `owner`, returning how many were removed
    pub fn purge_owner(&mut self, owner: EntityId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|t| t.owner != Some(owner));
        before - self.entries.len()
    }

    /// Number of pending timeouts owned by `owner`
    pub fn count_owned(&self, owner: EntityId) -> usize {
        self.entries.iter().filter(|t| t.owner == Some(owner)).count()
    }

    /// Number of pending timeouts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending due time
    pub fn next_due(&self) -> Option<f64> {
        self.entries.iter().map(|t| t.due).reduce(f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn owner() -> EntityId {
        let mut map: SlotMap<EntityId, ()> = SlotMap::with_key();
        map.insert(())
    }

    #[test]
    fn test_take_due_is_inclusive_and_ordered() {
        let mut scheduler = TimeoutScheduler::new();
        scheduler.schedule(None, 2.0, Box::new(|_| {}));
        scheduler.schedule(None, 1.0, Box::new(|_| {}));
        scheduler.schedule(None, 3.0, Box::new(|_| {}));
        scheduler.schedule(None, 0.5, Box::new(|_| {}));

        let due = scheduler.take_due(2.0);
        let times: Vec<f64> = due.iter().map(Timeout::due).collect();
        assert_eq!(times, vec![2.0, 1.0, 0.5]);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_due(), Some(3.0));
    }

    #[test]
    fn test_take_due_removes_entries() {
        let mut scheduler = TimeoutScheduler::new();
        scheduler.schedule(None, 1.0, Box::new(|_| {}));
        assert_eq!(scheduler.take_due(1.5).len(), 1);
        assert!(scheduler.take_due(10.0).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_purge_owner_keeps_ownerless() {
        let id = owner();
        let mut scheduler = TimeoutScheduler::new();
        scheduler.schedule(Some(id), 1.0, Box::new(|_| {}));
        scheduler.schedule(None, 1.0, Box::new(|_| {}));
        scheduler.schedule(Some(id), 2.0, Box::new(|_| {}));

        assert_eq!(scheduler.count_owned(id), 2);
        assert_eq!(scheduler.purge_owner(id), 2);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.take_due(5.0)[0].owner(), None);
    }
}
