//! ECS World implementation

use super::{Component, ComponentFilter, Entity};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// ECS World containing all entities and components
///
/// Components live in per-type storages keyed by entity. Entities are listed
/// in creation order, and queries iterate that list, so query results are
/// stable across frames as long as the entity set does not change.
pub struct World {
    next_entity_id: u32,
    entities: Vec<Entity>,
    storages: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 0,
            entities: Vec::new(),
            storages: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.push(entity);
        entity
    }

    /// Add a component to an entity, replacing any previous value of the
    /// same type
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(HashMap::<Entity, T>::new()));

        // The entry for TypeId::of::<T>() only ever holds HashMap<Entity, T>.
        if let Some(map) = storage.downcast_mut::<HashMap<Entity, T>>() {
            map.insert(entity, component);
        }
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storages
            .get(&TypeId::of::<T>())?
            .downcast_ref::<HashMap<Entity, T>>()?
            .get(&entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .downcast_mut::<HashMap<Entity, T>>()?
            .get_mut(&entity)
    }

    /// Remove a component from an entity, returning it if present
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .downcast_mut::<HashMap<Entity, T>>()?
            .remove(&entity)
    }

    /// Check whether an entity carries a component of the given type
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// Get an iterator over all entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Get the number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate entities matching a component-set filter, in creation order
    ///
    /// The filter is a tuple of component types; see
    /// [`ComponentFilter`](super::ComponentFilter).
    pub fn entities_with<F: ComponentFilter>(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities
            .iter()
            .copied()
            .filter(|&entity| F::matches(self, entity))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
