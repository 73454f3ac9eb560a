use std::any::{Any, type_name};

use crate::ecs::{
    component::Component,
    entity::Entity,
    error::{Error, Result},
};

/// Trait for defining a sparse index mapping into a dense collection.
pub trait Index {
    /// Insert a dense index into for the given sparse index.
    fn insert(&mut self, index: usize, value: usize);

    /// Get a dense index for the given sparse index if it exists.
    fn get(&self, index: usize) -> Option<usize>;

    /// Remove the dense index for the given sparse index, and return the existing dense index if it exists.
    fn remove(&mut self, index: usize) -> Option<usize>;

    /// Check if the index contains a value for the given sparse index.
    #[inline]
    fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }
}

/// Packed storage for one component type. This implements a sparse set that densely stores
/// components keyed by their owning entity.
///
/// For every stored entity `e` at dense slot `s`, the index maps `e -> s` and `entities[s] == e`.
/// Slots `0..len()` are always occupied; removal moves the last component into the vacated slot.
#[derive(Debug)]
pub struct Storage<T, I: Index = DynamicIndex> {
    /// The dense storage of component data.
    dense: Vec<T>,

    /// The sparse index mapping entity IDs to dense storage indexes.
    index: I,

    /// The list of entities corresponding to the dense storage. This must maintain the same order
    /// as the dense storage in order to aid in index updates during removals.
    entities: Vec<Entity>,
}

impl<T, I: Index> Storage<T, I> {
    /// Create a new storage with the given index.
    #[inline]
    pub const fn new_with_index(index: I) -> Self {
        Self {
            dense: Vec::new(),
            index,
            entities: Vec::new(),
        }
    }

    /// The number of stored components.
    #[inline]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Check if the storage holds no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Check if the given entity has a component in this storage.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains(entity.index())
    }

    /// Insert a component for the given entity at the end of the dense storage.
    ///
    /// # Errors
    /// - [`Error::DuplicateComponent`] if the entity already has a component here. The stored
    ///   value is left untouched.
    pub fn insert(&mut self, entity: Entity, component: T) -> Result<()> {
        if self.contains(entity) {
            return Err(Error::DuplicateComponent {
                entity,
                component: type_name::<T>(),
            });
        }
        let dense_index = self.dense.len();
        self.dense.push(component);
        self.index.insert(entity.index(), dense_index);
        self.entities.push(entity);
        Ok(())
    }

    /// Get the component for the given entity.
    ///
    /// # Errors
    /// - [`Error::MissingComponent`] if the entity has no component here.
    pub fn get(&self, entity: Entity) -> Result<&T> {
        let dense_index = self.dense_index(entity)?;
        Ok(&self.dense[dense_index])
    }

    /// Get the component for the given entity for in-place mutation.
    ///
    /// # Errors
    /// - [`Error::MissingComponent`] if the entity has no component here.
    pub fn get_mut(&mut self, entity: Entity) -> Result<&mut T> {
        let dense_index = self.dense_index(entity)?;
        Ok(&mut self.dense[dense_index])
    }

    /// Remove and return the component for the given entity.
    /// This uses a swap-remove to keep the dense storage compact.
    ///
    /// # Errors
    /// - [`Error::MissingComponent`] if the entity has no component here.
    pub fn remove(&mut self, entity: Entity) -> Result<T> {
        let dense_index = self.index.remove(entity.index()).ok_or(Error::MissingComponent {
            entity,
            component: type_name::<T>(),
        })?;

        let component = self.dense.swap_remove(dense_index);
        self.entities.swap_remove(dense_index);

        // Unless the removed slot was the last one, another entity now lives there.
        if let Some(moved) = self.entities.get(dense_index) {
            self.index.insert(moved.index(), dense_index);
        }
        Ok(component)
    }

    /// Iterate the stored components with their owning entity, in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    /// Look up the dense slot of an entity's component.
    #[inline]
    fn dense_index(&self, entity: Entity) -> Result<usize> {
        self.index
            .get(entity.index())
            .ok_or(Error::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }
}

impl<T> Storage<T, DynamicIndex> {
    /// Create a new storage with a dynamic index.
    #[inline]
    pub const fn new() -> Self {
        Self::new_with_index(DynamicIndex::new())
    }
}

impl<T> Default for Storage<T, DynamicIndex> {
    fn default() -> Self {
        Self::new()
    }
}

/// The type-erased face of a [`Storage`], used to broadcast entity destruction to every store
/// without knowing the component types involved.
pub trait ErasedStorage: Any {
    /// Drop the entity's component if it has one. Does nothing otherwise.
    fn entity_destroyed(&mut self, entity: Entity);

    /// Check if the entity has a component in this storage.
    fn contains(&self, entity: Entity) -> bool;

    /// The number of stored components.
    fn len(&self) -> usize;

    /// Upcast for downcasting to the concrete storage.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for downcasting to the concrete storage.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStorage for Storage<T> {
    fn entity_destroyed(&mut self, entity: Entity) {
        if Storage::contains(self, entity) {
            let _ = self.remove(entity);
        }
    }

    #[inline]
    fn contains(&self, entity: Entity) -> bool {
        Storage::contains(self, entity)
    }

    #[inline]
    fn len(&self) -> usize {
        Storage::len(self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// This storage dynamic Index is used to store a sparse set of (usize) indexes to (usize) indexes from another collection.
/// This can be dynamically grown by a specific block size. When adding a dense index it will use the sparse index to
/// determine which block it belongs. This can be optimized for either storage size or speed by changing the block size.
///
/// Entity ids are handed out from a bounded pool, so live ids stay clustered and most blocks are
/// either fully used or never allocated.
#[derive(Debug)]
pub struct DynamicIndex {
    /// The size of blocks to allocate when growing the index.
    block_size: usize,

    /// A collection of optional blocks, each block is a vector of optional usize indexes.
    maps: Vec<Option<Vec<Option<usize>>>>,
}

impl DynamicIndex {
    const DEFAULT_BLOCK_SIZE: usize = 256;

    /// Create a new DynamicIndex with the default block size.
    #[inline]
    pub const fn new() -> Self {
        Self::new_with_block_size(Self::DEFAULT_BLOCK_SIZE)
    }

    /// Create a new DynamicIndex with the given block size.
    #[inline]
    pub const fn new_with_block_size(block_size: usize) -> Self {
        Self {
            block_size,
            maps: Vec::new(),
        }
    }

    /// Get the block based indexes for an index.
    #[inline]
    fn indexes(&self, index: usize) -> (usize, usize) {
        (index / self.block_size, index % self.block_size)
    }
}

impl Default for DynamicIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Index for DynamicIndex {
    fn insert(&mut self, index: usize, value: usize) {
        let (block_index, within_block_index) = self.indexes(index);

        if block_index >= self.maps.len() {
            self.maps.resize_with(block_index + 1, || None);
        }

        let block_size = self.block_size;
        let block = self.maps[block_index].get_or_insert_with(|| vec![None; block_size]);
        block[within_block_index] = Some(value);
    }

    fn get(&self, index: usize) -> Option<usize> {
        let (block_index, within_block_index) = self.indexes(index);
        self.maps
            .get(block_index)?
            .as_ref()
            .and_then(|block| block[within_block_index])
    }

    fn remove(&mut self, index: usize) -> Option<usize> {
        let (block_index, within_block_index) = self.indexes(index);
        self.maps
            .get_mut(block_index)?
            .as_mut()
            .and_then(|block| block[within_block_index].take())
    }
}

#[cfg(test)]
mod tests {
    use triki_macros::Component;

    use super::*;

    #[derive(Component, Debug, PartialEq)]
    struct Position(i32, i32);

    #[test]
    fn dynamic_index_single_block() {
        // Given
        let mut index = DynamicIndex::new_with_block_size(10);

        // When
        index.insert(0, 10);
        index.insert(4, 40);
        index.insert(8, 80);

        // Then
        assert_eq!(index.maps.len(), 1);
        assert_eq!(index.get(0), Some(10));
        assert_eq!(index.get(4), Some(40));
        assert_eq!(index.get(5), None);
        assert_eq!(index.get(8), Some(80));
        assert_eq!(index.get(900), None);
    }

    #[test]
    fn dynamic_index_block_skipping() {
        // Given
        let mut index = DynamicIndex::new_with_block_size(4);

        // When
        index.insert(0, 10);
        index.insert(1, 30);
        index.insert(8, 80);

        // Then should grow to 3 blocks with the middle block being None
        assert_eq!(index.maps.len(), 3);
        assert_eq!(index.maps[1], None);

        // When
        let removed = index.remove(8);

        // Then
        assert_eq!(removed, Some(80));
        assert_eq!(index.get(8), None);
        assert_eq!(index.remove(8), None);
        assert_eq!(index.remove(5), None);
    }

    #[test]
    fn storage_insert_and_get() {
        // Given
        let mut storage: Storage<Position> = Storage::new();
        let (e1, e2, e3) = (Entity::new(0), Entity::new(1), Entity::new(2));

        // When
        storage.insert(e1, Position(1, 2)).unwrap();
        storage.insert(e2, Position(3, 4)).unwrap();

        // Then
        assert_eq!(storage.get(e1), Ok(&Position(1, 2)));
        assert_eq!(storage.get(e2), Ok(&Position(3, 4)));
        assert!(matches!(
            storage.get(e3),
            Err(Error::MissingComponent { entity, .. }) if entity == e3
        ));
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn storage_rejects_duplicate() {
        // Given
        let mut storage: Storage<Position> = Storage::new();
        let entity = Entity::new(5);
        storage.insert(entity, Position(1, 1)).unwrap();

        // When
        let result = storage.insert(entity, Position(9, 9));

        // Then - The first value is kept
        assert!(matches!(result, Err(Error::DuplicateComponent { .. })));
        assert_eq!(storage.get(entity), Ok(&Position(1, 1)));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn storage_get_mut_in_place() {
        // Given
        let mut storage: Storage<Position> = Storage::new();
        let entity = Entity::new(3);
        storage.insert(entity, Position(0, 0)).unwrap();

        // When
        storage.get_mut(entity).unwrap().1 = 7;

        // Then
        assert_eq!(storage.get(entity), Ok(&Position(0, 7)));
    }

    #[test]
    fn storage_remove_then_reinsert() {
        // Given
        let mut storage: Storage<Position> = Storage::new();
        let entity = Entity::new(0);
        storage.insert(entity, Position(1, 2)).unwrap();

        // When
        let removed = storage.remove(entity);

        // Then
        assert_eq!(removed, Ok(Position(1, 2)));
        assert!(storage.get(entity).is_err());
        assert!(storage.remove(entity).is_err());

        // When
        storage.insert(entity, Position(5, 6)).unwrap();

        // Then
        assert_eq!(storage.get(entity), Ok(&Position(5, 6)));
    }

    #[test]
    fn storage_remove_keeps_others_packed() {
        // Given - Entities inserted in scrambled order
        let order = [7u32, 2, 9, 0, 4, 3];
        for removed_at in 0..order.len() {
            let mut storage: Storage<Position> = Storage::new();
            for &id in &order {
                storage
                    .insert(Entity::new(id), Position(id as i32, -(id as i32)))
                    .unwrap();
            }

            // When
            let victim = Entity::new(order[removed_at]);
            storage.remove(victim).unwrap();

            // Then - Size dropped by one and every other value is intact
            assert_eq!(storage.len(), order.len() - 1);
            assert!(!storage.contains(victim));
            for &id in order.iter().filter(|&&id| id != victim.id()) {
                assert_eq!(
                    storage.get(Entity::new(id)),
                    Ok(&Position(id as i32, -(id as i32)))
                );
            }

            // Then - Both mappings agree for every remaining slot
            assert_eq!(storage.entities.len(), storage.dense.len());
            for (slot, entity) in storage.entities.iter().enumerate() {
                assert_eq!(storage.index.get(entity.index()), Some(slot));
            }
        }
    }

    #[test]
    fn erased_entity_destroyed() {
        // Given
        let mut storage: Storage<Position> = Storage::new();
        storage.insert(Entity::new(1), Position(1, 1)).unwrap();
        storage.insert(Entity::new(2), Position(2, 2)).unwrap();
        let erased: &mut dyn ErasedStorage = &mut storage;

        // When - One holder, one stranger
        erased.entity_destroyed(Entity::new(1));
        erased.entity_destroyed(Entity::new(40));

        // Then
        assert_eq!(erased.len(), 1);
        assert!(!erased.contains(Entity::new(1)));
        let storage = erased
            .as_any()
            .downcast_ref::<Storage<Position>>()
            .unwrap();
        assert_eq!(storage.get(Entity::new(2)), Ok(&Position(2, 2)));
    }
}
