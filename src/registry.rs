use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use crate::entity::Entity;
use crate::pool::PoolStorage;
use crate::view::{ComponentSet, SceneView};

/// Default entity capacity for [`Registry::new`].
pub const DEFAULT_MAX_ENTITIES: usize = 1000;

/// The central ECS container: owns the entity slot table and one
/// [`ComponentPool`](crate::ComponentPool) per component type.
///
/// Component types need no registration call; a pool is created the first
/// time a type is used, keyed by a type map owned by this registry. Two
/// registries are fully independent; handles and type ids from one are
/// meaningless in the other.
///
/// # Failure policy
///
/// Contract violations (invalid handle, duplicate add, missing component,
/// capacity exhausted) panic with the component type name in the message.
/// The `try_*` accessors are the non-panicking query surface.
///
/// # Example
///
/// ```
/// use emberwood_ecs::Registry;
/// use emberwood_ecs::components::{Tag, Transform};
///
/// let mut registry = Registry::new();
/// let player = registry.create_entity();
/// registry.add_component(player, Transform::IDENTITY);
/// registry.add_component(player, Tag::new("Player"));
///
/// for entity in registry.view::<(Transform, Tag)>() {
///     let tag = registry.get_component::<Tag>(entity);
///     assert_eq!(tag.as_str(), "Player");
/// }
/// ```
pub struct Registry {
    /// Entity slot table. Slot `i` holds a handle with index `i`; its
    /// validity flag says whether the slot is live or free.
    entities: Vec<Entity>,
    /// Destroyed slot indices awaiting reuse (LIFO).
    free_entities: Vec<u32>,
    /// One type-erased pool per component type, indexed by `type_indices`.
    pools: Vec<PoolStorage>,
    /// Registry-scoped component type map, populated on first use.
    type_indices: HashMap<TypeId, usize>,
    max_entities: usize,
    /// Number of currently valid entities.
    alive: u32,
}

impl Registry {
    /// Creates a registry with the default entity capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTITIES)
    }

    /// Creates a registry that can hold up to `max_entities` entities.
    /// Component pools are lazily created with the same capacity.
    ///
    /// # Panics
    ///
    /// Panics if `max_entities` is zero.
    pub fn with_capacity(max_entities: usize) -> Self {
        assert!(max_entities > 0, "Registry capacity must be non-zero");
        Self {
            entities: Vec::new(),
            free_entities: Vec::new(),
            pools: Vec::new(),
            type_indices: HashMap::new(),
            max_entities,
            alive: 0,
        }
    }

    // ---- Entity lifecycle ----

    /// Creates a new entity, reusing a destroyed slot if one is free.
    /// The returned handle is always valid.
    ///
    /// # Panics
    ///
    /// Panics if the entity capacity is exhausted.
    pub fn create_entity(&mut self) -> Entity {
        if let Some(index) = self.free_entities.pop() {
            let entity = Entity::new(index);
            self.entities[index as usize] = entity;
            self.alive += 1;
            return entity;
        }
        assert!(
            self.entities.len() < self.max_entities,
            "Entity capacity exhausted ({} entities)",
            self.max_entities
        );
        let entity = Entity::new(self.entities.len() as u32);
        self.entities.push(entity);
        self.alive += 1;
        entity
    }

    /// Destroys an entity: removes its components from every pool,
    /// invalidates the slot and the caller's handle, and queues the index
    /// for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid or its slot is not live.
    pub fn destroy_entity(&mut self, entity: &mut Entity) {
        let index = self.check_alive(*entity);
        for pool in &mut self.pools {
            pool.remove_untyped(index);
        }
        self.entities[index as usize].invalidate();
        entity.invalidate();
        self.free_entities.push(index);
        self.alive -= 1;
    }

    /// Returns whether the handle refers to a currently live slot.
    pub fn is_alive(&self, entity: Entity) -> bool {
        entity.is_valid()
            && (entity.index() as usize) < self.entities.len()
            && self.entities[entity.index() as usize].is_valid()
    }

    /// Returns the number of live entities.
    pub fn entity_count(&self) -> u32 {
        self.alive
    }

    /// Returns the maximum number of entities this registry can hold.
    pub fn capacity(&self) -> usize {
        self.max_entities
    }

    /// Returns the live entity at a slot index, or `None` if the slot is
    /// free or was never allocated.
    pub fn entity_at(&self, index: u32) -> Option<Entity> {
        self.entities
            .get(index as usize)
            .copied()
            .filter(Entity::is_valid)
    }

    /// Calls `f` for every live entity, skipping destroyed slots.
    pub fn each(&self, mut f: impl FnMut(Entity)) {
        for entity in &self.entities {
            if entity.is_valid() {
                f(*entity);
            }
        }
    }

    /// Drops all entities, components, and pools. Component types must
    /// re-register on next use.
    pub fn clear(&mut self) {
        self.pools.clear();
        self.type_indices.clear();
        self.entities.clear();
        self.free_entities.clear();
        self.alive = 0;
    }

    // ---- Components ----

    /// Attaches a component to an entity and returns a mutable reference
    /// to it. Creates the pool for `T` on first use.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live or already has a `T`.
    pub fn add_component<T: Send + Sync + 'static>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> &mut T {
        let index = self.check_alive(entity);
        let pool_index = self.pool_index_or_create::<T>();
        let pool = self.pools[pool_index].typed_mut::<T>();
        assert!(
            !pool.contains(index),
            "Entity {index} already has a {} component",
            std::any::type_name::<T>()
        );
        pool.insert(index, component);
        pool.get_mut(index).expect("component was just inserted")
    }

    /// Returns a reference to an entity's component.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live or does not have a `T`.
    pub fn get_component<T: Send + Sync + 'static>(&self, entity: Entity) -> &T {
        let index = self.check_alive(entity);
        self.pool::<T>()
            .and_then(|pool| pool.typed::<T>().get(index))
            .unwrap_or_else(|| panic_missing::<T>(index))
    }

    /// Returns a mutable reference to an entity's component.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live or does not have a `T`.
    pub fn get_component_mut<T: Send + Sync + 'static>(&mut self, entity: Entity) -> &mut T {
        let index = self.check_alive(entity);
        let Some(&pool_index) = self.type_indices.get(&TypeId::of::<T>()) else {
            panic_missing::<T>(index)
        };
        match self.pools[pool_index].typed_mut::<T>().get_mut(index) {
            Some(component) => component,
            None => panic_missing::<T>(index),
        }
    }

    /// Returns a reference to an entity's component, or `None` if the
    /// entity is not live or does not have one.
    pub fn try_get_component<T: Send + Sync + 'static>(&self, entity: Entity) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.pool::<T>()?.typed::<T>().get(entity.index())
    }

    /// Returns a mutable reference to an entity's component, or `None` if
    /// the entity is not live or does not have one.
    pub fn try_get_component_mut<T: Send + Sync + 'static>(
        &mut self,
        entity: Entity,
    ) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        let pool_index = *self.type_indices.get(&TypeId::of::<T>())?;
        self.pools[pool_index].typed_mut::<T>().get_mut(entity.index())
    }

    /// Returns whether an entity has a component of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live.
    pub fn has_component<T: Send + Sync + 'static>(&self, entity: Entity) -> bool {
        let index = self.check_alive(entity);
        self.pool_contains_index::<T>(index)
    }

    /// Returns whether an entity has every component in the tuple `S`,
    /// e.g. `registry.has::<(Transform, Tag)>(entity)`.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live.
    pub fn has<S: ComponentSet>(&self, entity: Entity) -> bool {
        let index = self.check_alive(entity);
        S::all_contained(self, index)
    }

    /// Detaches and returns an entity's component. The last component in
    /// the pool's dense order moves into the vacated slot (swap-remove).
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live or does not have a `T`.
    pub fn remove_component<T: Send + Sync + 'static>(&mut self, entity: Entity) -> T {
        let index = self.check_alive(entity);
        let Some(&pool_index) = self.type_indices.get(&TypeId::of::<T>()) else {
            panic_missing::<T>(index)
        };
        self.pools[pool_index]
            .typed_mut::<T>()
            .remove(index)
            .unwrap_or_else(|| panic_missing::<T>(index))
    }

    // ---- Queries ----

    /// Returns a lazy view over all entities that have every component in
    /// the tuple `S`. The smallest requested pool drives the iteration;
    /// the other pools are membership-tested per candidate.
    ///
    /// Iteration order is the driver pool's dense order and is not stable
    /// across structural mutation.
    pub fn view<S: ComponentSet>(&self) -> SceneView<'_, S> {
        SceneView::new(self)
    }

    // ---- Internal plumbing ----

    /// Panics unless the handle is valid and its slot is live; returns the
    /// slot index.
    fn check_alive(&self, entity: Entity) -> u32 {
        assert!(
            entity.is_valid(),
            "Invalid entity handle passed to registry"
        );
        let index = entity.index();
        assert!(
            (index as usize) < self.entities.len() && self.entities[index as usize].is_valid(),
            "Entity {index} is not alive in this registry"
        );
        index
    }

    fn pool<T: 'static>(&self) -> Option<&PoolStorage> {
        self.type_indices
            .get(&TypeId::of::<T>())
            .map(|&i| &self.pools[i])
    }

    fn pool_index_or_create<T: Send + Sync + 'static>(&mut self) -> usize {
        if let Some(&index) = self.type_indices.get(&TypeId::of::<T>()) {
            return index;
        }
        let index = self.pools.len();
        self.pools.push(PoolStorage::new::<T>(self.max_entities));
        self.type_indices.insert(TypeId::of::<T>(), index);
        index
    }

    /// Membership test by entity index; `false` if `T` has no pool yet.
    pub(crate) fn pool_contains_index<T: 'static>(&self, entity_index: u32) -> bool {
        self.pool::<T>()
            .is_some_and(|pool| pool.contains_untyped(entity_index))
    }

    /// Dense entity indices of `T`'s pool, or `None` if `T` has no pool yet.
    pub(crate) fn pool_entities<T: 'static>(&self) -> Option<&[u32]> {
        self.pool::<T>().map(PoolStorage::entities)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Registry");
        s.field("entities", &self.alive);
        for pool in &self.pools {
            s.field(pool.type_name(), &pool.len());
        }
        s.finish()
    }
}

fn panic_missing<T>(index: u32) -> ! {
    panic!(
        "Entity {index} does not have a {} component",
        std::any::type_name::<T>()
    )
}
