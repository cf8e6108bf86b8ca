//! ECS World implementation
//!
//! The world owns entity storage and every subsystem that refers to entities:
//! tick handlers, key handlers, message listeners, timeouts, colliders and the
//! render list. It also owns the per-simulation resources handed to behaviors
//! (random source, input state, clock), so nothing is global.
//!
//! ## Tick order
//!
//! 1. Integrate motion of every living entity
//! 2. Run tick handlers
//! 3. Detect collisions, sending [`Message::Collide`] both ways per pair
//! 4. Run due timeouts
//! 5. Sweep entities killed during this tick (or between ticks)
//!
//! Removal is two-phase. [`World::kill`] only marks an entity as a zombie;
//! zombies are skipped by every phase and are purged from all subsystems by
//! the sweep at the end of the tick.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotmap::SlotMap;

use super::{CallbackRegistry, Entity, EntityId, EntityState, TimeoutScheduler};
use crate::core::config::EngineConfig;
use crate::events::{Message, MessageBus};
use crate::foundation::time::SimClock;
use crate::input::{InputState, KeyAction, KeyCode, KeyEvent};
use crate::physics::{CollisionRole, CollisionSet};
use crate::render::RenderList;

/// Handler run once per tick
pub type TickHandler = dyn FnMut(&mut World);

/// Handler run for every key event
pub type KeyHandler = dyn FnMut(&mut World, KeyEvent);

/// What happened during one [`World::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Entities whose motion was integrated
    pub integrated: usize,
    /// Tick handlers invoked
    pub handlers_fired: usize,
    /// Overlapping pairs dispatched as collide messages
    pub collisions: usize,
    /// Timeouts whose callbacks ran
    pub timeouts_fired: usize,
    /// Entities removed by the sweep
    pub removed: usize,
}

/// Entity registry plus the subsystems driven by [`World::tick`]
pub struct World {
    entities: SlotMap<EntityId, Entity>,
    kill_queue: Vec<EntityId>,
    tick_handlers: CallbackRegistry<TickHandler>,
    key_handlers: CallbackRegistry<KeyHandler>,
    messages: MessageBus,
    timeouts: TimeoutScheduler,
    collisions: CollisionSet,
    renderer: RenderList,
    input: InputState,
    clock: SimClock,
    rng: StdRng,
    tick_count: u64,
}

impl World {
    /// Create a world seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a world with a reproducible random source
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a world from engine settings
    pub fn from_config(config: &EngineConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    /// Create a world around an existing random source
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            entities: SlotMap::with_key(),
            kill_queue: Vec::new(),
            tick_handlers: CallbackRegistry::new(),
            key_handlers: CallbackRegistry::new(),
            messages: MessageBus::new(),
            timeouts: TimeoutScheduler::new(),
            collisions: CollisionSet::new(),
            renderer: RenderList::new(),
            input: InputState::new(),
            clock: SimClock::new(),
            rng,
            tick_count: 0,
        }
    }

    // ---------------------------------------------------------------------
    // Entity registry
    // ---------------------------------------------------------------------

    /// Create a new entity at rest at the origin
    pub fn add_object(&mut self) -> EntityId {
        let guid = self.rng.gen::<u64>();
        let id = self.entities.insert(Entity::new(guid));
        log::trace!("Spawned {id:?} (guid {guid:#018x})");
        id
    }

    /// Look up an entity by its random identity (linear scan)
    pub fn find_by_guid(&self, guid: u64) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, entity)| entity.guid() == guid)
            .map(|(id, _)| id)
    }

    /// Get an entity, zombies included
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Get an entity mutably, zombies included
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Lifecycle state; stale handles report [`EntityState::Removed`]
    pub fn state(&self, id: EntityId) -> EntityState {
        self.entities.get(id).map_or(EntityState::Removed, Entity::state)
    }

    /// Whether `id` refers to a living entity
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.state(id) == EntityState::Alive
    }

    /// Whether `id` is still in the registry (alive or zombie)
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of entities in the registry, zombies included
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over every entity, zombies included
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// Mark an entity for removal at the end of the tick
    ///
    /// Killing a zombie or a removed entity does nothing.
    pub fn kill(&mut self, id: EntityId) {
        match self.entities.get_mut(id) {
            Some(entity) if entity.is_alive() => {
                entity.mark_zombie();
                self.kill_queue.push(id);
                log::debug!("Killed {id:?}");
            }
            Some(_) => log::trace!("{id:?} already killed"),
            None => log::trace!("Ignoring kill of removed {id:?}"),
        }
    }

    /// Purge an entity from every subsystem, then remove it
    ///
    /// Normally called by the sweep; returns `false` if the entity was
    /// already gone.
    pub fn real_kill(&mut self, id: EntityId) -> bool {
        if !self.entities.contains_key(id) {
            return false;
        }

        let purged = self.tick_handlers.purge_owner(id)
            + self.key_handlers.purge_owner(id)
            + self.messages.purge_owner(id)
            + self.collisions.purge_owner(id)
            + self.timeouts.purge_owner(id)
            + self.renderer.purge_owner(id);
        self.entities.remove(id);

        log::debug!("Removed {id:?}, purged {purged} owned entries");
        true
    }

    /// Remove every entity killed since the last sweep
    pub fn sweep_removals(&mut self) -> usize {
        let queue = std::mem::take(&mut self.kill_queue);
        queue.into_iter().filter(|&id| self.real_kill(id)).count()
    }

    /// Number of entries any subsystem still holds for `id`
    pub fn owned_entries(&self, id: EntityId) -> usize {
        self.tick_handlers.count_owned(id)
            + self.key_handlers.count_owned(id)
            + self.messages.count_owned(id)
            + self.collisions.count_owned(id)
            + self.timeouts.count_owned(id)
            + self.renderer.count_owned(id)
    }

    // ---------------------------------------------------------------------
    // Callbacks
    // ---------------------------------------------------------------------

    /// Run `handler` every tick while `owner` lives
    pub fn on_tick(&mut self, owner: EntityId, handler: impl FnMut(&mut Self) + 'static) {
        self.tick_handlers.register(owner, (), Box::new(handler));
    }

    /// Run `handler` for every key event while `owner` lives
    pub fn on_key(&mut self, owner: EntityId, handler: impl FnMut(&mut Self, KeyEvent) + 'static) {
        self.key_handlers.register(owner, (), Box::new(handler));
    }

    /// Run `callback` whenever `key` is pressed, while `owner` lives
    pub fn bind_key(&mut self, key: KeyCode, owner: EntityId, mut callback: impl FnMut(&mut Self) + 'static) {
        self.on_key(owner, move |world, event| {
            if event.key == key && event.action == KeyAction::Press {
                callback(world);
            }
        });
    }

    /// Feed a key event: updates held state, then runs key handlers
    pub fn key_event(&mut self, event: KeyEvent) -> usize {
        self.input.apply(event);
        self.dispatch(Self::key_registry, |world, handler| handler(world, event))
    }

    fn tick_registry(&mut self) -> &mut CallbackRegistry<TickHandler> {
        &mut self.tick_handlers
    }

    fn key_registry(&mut self) -> &mut CallbackRegistry<KeyHandler> {
        &mut self.key_handlers
    }

    /// Invoke every handler of a registry whose owner is alive
    ///
    /// Handlers registered during dispatch run from the next dispatch on;
    /// entries whose owner was removed meanwhile are dropped.
    fn dispatch<H: ?Sized>(
        &mut self,
        registry: fn(&mut Self) -> &mut CallbackRegistry<H>,
        mut invoke: impl FnMut(&mut Self, &mut H),
    ) -> usize {
        let mut detached = registry(self).detach();
        let mut fired = 0;

        for entry in &mut detached {
            if !self.is_alive(entry.owner()) {
                continue;
            }
            if let Some(handler) = entry.handler_mut() {
                invoke(self, handler);
                fired += 1;
            }
        }

        detached.retain(|entry| self.entities.contains_key(entry.owner()));
        registry(self).reattach(detached);
        fired
    }

    // ---------------------------------------------------------------------
    // Messages
    // ---------------------------------------------------------------------

    /// Listen for `kind` messages addressed to `listener`
    pub fn subscribe(
        &mut self,
        listener: EntityId,
        kind: Message,
        handler: impl FnMut(&mut Self, EntityId) -> bool + 'static,
    ) {
        self.messages.subscribe(listener, kind, Box::new(handler));
    }

    /// Deliver `kind` from `sender` to `target`
    ///
    /// Returns the listener's verdict, or `false` when the target is not alive
    /// or does not listen for `kind`.
    pub fn publish(&mut self, sender: EntityId, target: EntityId, kind: Message) -> bool {
        if !self.is_alive(target) {
            log::trace!("Dropping {kind:?} to non-living {target:?}");
            return false;
        }
        self.deliver(sender, target, kind)
    }

    /// Run the target's listener without checking that the target is alive
    fn deliver(&mut self, sender: EntityId, target: EntityId, kind: Message) -> bool {
        let Some(listener) = self.messages.listener_for(target, kind) else {
            return false;
        };
        let Some(mut handler) = self.messages.checkout(listener) else {
            return false;
        };

        let handled = handler(self, sender);
        self.messages.checkin(listener, handler);

        log::trace!("{kind:?} {sender:?} -> {target:?} handled={handled}");
        handled
    }

    /// Message subscriptions
    pub fn messages(&self) -> &MessageBus {
        &self.messages
    }

    // ---------------------------------------------------------------------
    // Timeouts
    // ---------------------------------------------------------------------

    /// Run `callback` once, `delay` seconds of simulation time from now
    ///
    /// An owned timeout is cancelled when its owner dies; pass `None` for
    /// callbacks that must outlive every entity.
    pub fn schedule(
        &mut self,
        owner: Option<EntityId>,
        delay: f64,
        callback: impl FnOnce(&mut Self) + 'static,
    ) {
        let due = self.clock.now() + delay;
        self.timeouts.schedule(owner, due, Box::new(callback));
    }

    /// Pending timeouts
    pub fn timeouts(&self) -> &TimeoutScheduler {
        &self.timeouts
    }

    fn fire_timeouts(&mut self) -> usize {
        let mut fired = 0;
        for timeout in self.timeouts.take_due(self.clock.now()) {
            if let Some(owner) = timeout.owner() {
                if !self.is_alive(owner) {
                    continue;
                }
            }
            (timeout.into_callback())(self);
            fired += 1;
        }
        fired
    }

    // ---------------------------------------------------------------------
    // Collisions
    // ---------------------------------------------------------------------

    /// Register a circle collider for `owner`
    pub fn add_collider(&mut self, owner: EntityId, role: CollisionRole, radius: f32) {
        self.collisions.add(owner, role, radius);
    }

    /// Registered colliders
    pub fn collisions(&self) -> &CollisionSet {
        &self.collisions
    }

    fn run_collisions(&mut self) -> usize {
        let entities = &self.entities;
        let pairs = self.collisions.overlapping_pairs(|id| {
            entities
                .get(id)
                .filter(|entity| entity.is_alive())
                .map(|entity| entity.position)
        });

        let mut dispatched = 0;
        for pair in pairs {
            // An earlier pair this tick may have killed either side.
            if !(self.is_alive(pair.entity_a) && self.is_alive(pair.entity_b)) {
                continue;
            }
            // Both sides hear about the hit, even if the first leg kills one.
            self.deliver(pair.entity_a, pair.entity_b, Message::Collide);
            self.deliver(pair.entity_b, pair.entity_a, Message::Collide);
            dispatched += 1;
        }
        dispatched
    }

    // ---------------------------------------------------------------------
    // Resources
    // ---------------------------------------------------------------------

    /// Drawables registered by behaviors
    pub fn renderer(&self) -> &RenderList {
        &self.renderer
    }

    /// Drawables registered by behaviors, mutably
    pub fn renderer_mut(&mut self) -> &mut RenderList {
        &mut self.renderer
    }

    /// Currently held keys
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Currently held keys, for the platform layer to update
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// The simulation's random source
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Simulation time in seconds
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Number of ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ---------------------------------------------------------------------
    // Simulation
    // ---------------------------------------------------------------------

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> TickStats {
        let dt = dt.max(0.0);
        self.clock.advance(dt);
        self.tick_count += 1;

        let mut stats = TickStats::default();

        for entity in self.entities.values_mut().filter(|e| e.is_alive()) {
            entity.integrate(dt);
            stats.integrated += 1;
        }

        stats.handlers_fired = self.dispatch(Self::tick_registry, |world, handler| handler(world));
        stats.collisions = self.run_collisions();
        stats.timeouts_fired = self.fire_timeouts();
        stats.removed = self.sweep_removals();

        log::trace!("Tick {} at t={:.3}: {stats:?}", self.tick_count, self.clock.now());
        stats
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
