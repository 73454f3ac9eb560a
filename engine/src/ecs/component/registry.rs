use std::any::{TypeId, type_name};

use dashmap::DashMap;
use log::debug;

use crate::ecs::{
    component::{Component, ErasedStorage, Id, Storage},
    entity::Entity,
    error::{Error, Result},
};

/// A registered component type: its name and its backing storage.
struct Entry {
    /// The Rust type name, for diagnostics.
    name: &'static str,

    /// The packed storage for this component type.
    storage: Box<dyn ErasedStorage>,
}

/// The component type registry. Assigns each registered component type the next free [`Id`] and
/// owns the [`Storage`] backing it.
///
/// The id and the storage are created together in [`register`](Self::register), so a type is either
/// fully registered or not at all.
pub struct Registry {
    /// Map from TypeId to component Id. Lock-free reads via sharded concurrent hashmap.
    type_map: DashMap<TypeId, Id>,

    /// Registered component entries, indexed by component Id.
    entries: Vec<Entry>,

    /// Maximum number of component types this registry will accept.
    capacity: usize,
}

impl Registry {
    /// Create a new component registry accepting up to `capacity` component types.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            type_map: DashMap::new(),
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// The number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no component type has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a new component type and get its unique identifier. Ids are assigned in
    /// registration order starting at zero.
    ///
    /// # Errors
    /// - [`Error::DuplicateComponentType`] if `C` is already registered.
    /// - [`Error::ComponentTypeCapacity`] if every id is taken.
    pub fn register<C: Component>(&mut self) -> Result<Id> {
        match self.type_map.entry(TypeId::of::<C>()) {
            dashmap::Entry::Occupied(_) => Err(Error::DuplicateComponentType(type_name::<C>())),
            dashmap::Entry::Vacant(vacant) => {
                if self.entries.len() >= self.capacity {
                    return Err(Error::ComponentTypeCapacity { max: self.capacity });
                }
                let id = Id::from(self.entries.len());
                self.entries.push(Entry {
                    name: type_name::<C>(),
                    storage: Box::new(Storage::<C>::new()),
                });
                vacant.insert(id);
                debug!("registered component '{}' as {:?}", type_name::<C>(), id);
                Ok(id)
            }
        }
    }

    /// Get the component ID for a provided type `C`.
    ///
    /// # Errors
    /// - [`Error::UnregisteredComponentType`] if `C` was never registered.
    #[inline]
    pub fn id<C: Component>(&self) -> Result<Id> {
        self.type_map
            .get(&TypeId::of::<C>())
            .map(|entry| *entry.value())
            .ok_or(Error::UnregisteredComponentType(type_name::<C>()))
    }

    /// Get the type name registered under the given id, if any.
    #[inline]
    pub fn name(&self, id: Id) -> Option<&'static str> {
        self.entries.get(id.index()).map(|entry| entry.name)
    }

    /// Get the storage for a component type.
    ///
    /// # Errors
    /// - [`Error::UnregisteredComponentType`] if `C` was never registered.
    pub fn storage<C: Component>(&self) -> Result<&Storage<C>> {
        let id = self.id::<C>()?;
        self.entries[id.index()]
            .storage
            .as_any()
            .downcast_ref::<Storage<C>>()
            .ok_or(Error::UnregisteredComponentType(type_name::<C>()))
    }

    /// Get the storage for a component type mutably.
    ///
    /// # Errors
    /// - [`Error::UnregisteredComponentType`] if `C` was never registered.
    pub fn storage_mut<C: Component>(&mut self) -> Result<&mut Storage<C>> {
        let id = self.id::<C>()?;
        self.entries[id.index()]
            .storage
            .as_any_mut()
            .downcast_mut::<Storage<C>>()
            .ok_or(Error::UnregisteredComponentType(type_name::<C>()))
    }

    /// Tell every storage the entity is gone. Stores that hold a component for it drop the
    /// component; the rest do nothing.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for entry in &mut self.entries {
            entry.storage.entity_destroyed(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use triki_macros::Component;

    use super::*;

    #[derive(Component, Debug, PartialEq)]
    struct Position(i32);

    #[derive(Component, Debug, PartialEq)]
    struct Velocity(i32);

    #[derive(Component, Debug)]
    struct Health;

    #[test]
    fn component_registration() {
        // Given
        let mut registry = Registry::new(8);

        // When
        let pos_id = registry.register::<Position>().unwrap();
        let vel_id = registry.register::<Velocity>().unwrap();

        // Then - Ids are handed out from zero in order
        assert_eq!(pos_id, Id::new(0));
        assert_eq!(vel_id, Id::new(1));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.id::<Position>(), Ok(pos_id));
        assert_eq!(registry.id::<Velocity>(), Ok(vel_id));
        assert_eq!(registry.name(pos_id), Some(type_name::<Position>()));
    }

    #[test]
    fn duplicate_registration() {
        // Given
        let mut registry = Registry::new(8);
        let id = registry.register::<Position>().unwrap();

        // When
        let result = registry.register::<Position>();

        // Then - The first registration stands
        assert_eq!(
            result,
            Err(Error::DuplicateComponentType(type_name::<Position>()))
        );
        assert_eq!(registry.id::<Position>(), Ok(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregistered_lookup() {
        // Given
        let mut registry = Registry::new(8);

        // Then
        assert_eq!(
            registry.id::<Health>(),
            Err(Error::UnregisteredComponentType(type_name::<Health>()))
        );
        assert!(registry.storage::<Health>().is_err());
        assert!(registry.storage_mut::<Health>().is_err());
    }

    #[test]
    fn capacity_exceeded() {
        // Given
        let mut registry = Registry::new(2);
        registry.register::<Position>().unwrap();
        registry.register::<Velocity>().unwrap();

        // When
        let result = registry.register::<Health>();

        // Then - Nothing about Health is observable
        assert_eq!(result, Err(Error::ComponentTypeCapacity { max: 2 }));
        assert!(registry.id::<Health>().is_err());
        assert!(registry.storage::<Health>().is_err());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn storage_lookup_and_broadcast() {
        // Given
        let mut registry = Registry::new(8);
        registry.register::<Position>().unwrap();
        registry.register::<Velocity>().unwrap();
        let (e0, e1) = (Entity::new(0), Entity::new(1));
        registry
            .storage_mut::<Position>()
            .unwrap()
            .insert(e0, Position(1))
            .unwrap();
        registry
            .storage_mut::<Position>()
            .unwrap()
            .insert(e1, Position(2))
            .unwrap();
        registry
            .storage_mut::<Velocity>()
            .unwrap()
            .insert(e1, Velocity(3))
            .unwrap();

        // When
        registry.entity_destroyed(e1);

        // Then
        let positions = registry.storage::<Position>().unwrap();
        assert_eq!(positions.get(e0), Ok(&Position(1)));
        assert!(!positions.contains(e1));
        assert!(registry.storage::<Velocity>().unwrap().is_empty());
    }
}
