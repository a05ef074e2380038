//! Query filters for component access
//!
//! A filter is a tuple of component types; an entity matches when it carries
//! every component in the tuple.

use super::{Component, Entity, World};

/// Component-set filter used by [`World::entities_with`]
pub trait ComponentFilter {
    /// Check whether the entity carries every component in the filter
    fn matches(world: &World, entity: Entity) -> bool;
}

impl<A: Component> ComponentFilter for (A,) {
    fn matches(world: &World, entity: Entity) -> bool {
        world.has_component::<A>(entity)
    }
}

impl<A: Component, B: Component> ComponentFilter for (A, B) {
    fn matches(world: &World, entity: Entity) -> bool {
        world.has_component::<A>(entity) && world.has_component::<B>(entity)
    }
}

impl<A: Component, B: Component, C: Component> ComponentFilter for (A, B, C) {
    fn matches(world: &World, entity: Entity) -> bool {
        world.has_component::<A>(entity)
            && world.has_component::<B>(entity)
            && world.has_component::<C>(entity)
    }
}
