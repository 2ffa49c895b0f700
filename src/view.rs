use std::marker::PhantomData;

use crate::entity::Entity;
use crate::registry::Registry;

/// A set of component types requested together, e.g. by
/// [`Registry::view`](crate::Registry::view) or
/// [`Registry::has`](crate::Registry::has).
///
/// Implemented for tuples of 1 to 8 component types: `(Transform,)`,
/// `(Transform, Tag)`, and so on.
pub trait ComponentSet {
    /// Returns whether the entity at `entity_index` has every component
    /// in the set.
    fn all_contained(registry: &Registry, entity_index: u32) -> bool;

    /// Returns the dense entity indices of the smallest pool among the
    /// set, or `None` if any component type has no pool yet.
    fn driver_entities(registry: &Registry) -> Option<&[u32]>;
}

macro_rules! impl_component_set {
    ($($T:ident),+) => {
        impl<$($T: Send + Sync + 'static),+> ComponentSet for ($($T,)+) {
            fn all_contained(registry: &Registry, entity_index: u32) -> bool {
                true $(&& registry.pool_contains_index::<$T>(entity_index))+
            }

            fn driver_entities(registry: &Registry) -> Option<&[u32]> {
                let mut driver: Option<&[u32]> = None;
                $(
                    let entities = registry.pool_entities::<$T>()?;
                    if driver.map_or(true, |d| entities.len() < d.len()) {
                        driver = Some(entities);
                    }
                )+
                driver
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

/// A lazy query over all entities that have every component in `S`.
///
/// Created by [`Registry::view`](crate::Registry::view). Scans the dense
/// entity array of the smallest requested pool and membership-tests each
/// candidate against the remaining pools. Yields entity handles, not
/// component references; fetch data through the registry per entity.
///
/// The view borrows the registry shared for its whole lifetime, so
/// structural mutation during iteration is rejected at compile time.
/// If any requested type has no pool yet, the view is empty.
pub struct SceneView<'a, S: ComponentSet> {
    registry: &'a Registry,
    /// Dense entity indices of the driver pool.
    driver: &'a [u32],
    _marker: PhantomData<fn() -> S>,
}

impl<'a, S: ComponentSet> SceneView<'a, S> {
    pub(crate) fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            driver: S::driver_entities(registry).unwrap_or(&[]),
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over the qualifying entities.
    pub fn iter(&self) -> SceneViewIter<'a, S> {
        SceneViewIter {
            registry: self.registry,
            driver: self.driver,
            position: 0,
            _marker: PhantomData,
        }
    }
}

impl<'a, S: ComponentSet> IntoIterator for SceneView<'a, S> {
    type Item = Entity;
    type IntoIter = SceneViewIter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: ComponentSet> IntoIterator for &SceneView<'a, S> {
    type Item = Entity;
    type IntoIter = SceneViewIter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`SceneView`], yielding entity handles in the driver
/// pool's dense order.
pub struct SceneViewIter<'a, S: ComponentSet> {
    registry: &'a Registry,
    driver: &'a [u32],
    position: usize,
    _marker: PhantomData<fn() -> S>,
}

impl<'a, S: ComponentSet> Iterator for SceneViewIter<'a, S> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        while self.position < self.driver.len() {
            let index = self.driver[self.position];
            self.position += 1;
            if S::all_contained(self.registry, index) {
                // Pools only hold live entities, so the slot lookup cannot miss.
                return self.registry.entity_at(index);
            }
        }
        None
    }
}
