//! # Render List
//!
//! The engine never draws. Behaviors register what each entity looks like and
//! an external drawer walks the list once per frame, reading entity transforms
//! from the world.
//!
//! ## Architecture
//!
//! - **ShapeId**: game-defined identifier for a line-loop model
//! - **RenderEntry**: (entity, shape, uniform scale)
//! - **RenderHandle**: stable handle so a behavior can animate its own entry
//!   (e.g. a thruster flame growing and shrinking)

use slotmap::SlotMap;

use crate::ecs::EntityId;

slotmap::new_key_type! {
    /// Stable handle to one render entry
    pub struct RenderHandle;
}

/// Game-defined model identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u16);

/// One drawable attached to an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderEntry {
    /// Entity whose transform positions the shape
    pub owner: EntityId,
    /// Model to draw
    pub shape: ShapeId,
    /// Uniform scale; zero hides the shape
    pub scale: f32,
}

/// All drawables, keyed by stable handle
#[derive(Debug, Default)]
pub struct RenderList {
    entries: SlotMap<RenderHandle, RenderEntry>,
}

impl RenderList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `shape` to `owner`
    pub fn add(&mut self, owner: EntityId, shape: ShapeId, scale: f32) -> RenderHandle {
        self.entries.insert(RenderEntry { owner, shape, scale })
    }

    /// Entry behind `handle`, if it still exists
    pub fn get(&self, handle: RenderHandle) -> Option<&RenderEntry> {
        self.entries.get(handle)
    }

    /// Change the scale of an entry; stale handles are ignored
    pub fn set_scale(&mut self, handle: RenderHandle, scale: f32) {
        if let Some(entry) = self.entries.get_mut(handle) {
            entry.scale = scale;
        }
    }

    /// Drop every entry attached to `owner`
    pub fn purge_owner(&mut self, owner: EntityId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.owner != owner);
        before - self.entries.len()
    }

    /// Number of entries attached to `owner`
    pub fn count_owned(&self, owner: EntityId) -> usize {
        self.entries.values().filter(|e| e.owner == owner).count()
    }

    /// Number of entries drawing `shape`
    pub fn count_shape(&self, shape: ShapeId) -> usize {
        self.entries.values().filter(|e| e.shape == shape).count()
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = &RenderEntry> {
        self.entries.values()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
