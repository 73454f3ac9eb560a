//! Entity management for the ECS (Entity Component System).
//!
//! This module provides the entity identifier type and the registry that hands identifiers out,
//! takes them back, and records each entity's component [`Signature`].
//!
//! # Architecture
//!
//! - **[`Entity`]**: An opaque identifier in `0..max_entities`. It carries no data of its own;
//!   everything about an entity lives in the component stores and the signature table.
//!
//! - **[`Registry`]**: Owns the pool of free ids, the liveness of every id and a dense signature
//!   table indexed by entity id.
//!
//! # Id Recycling
//!
//! Every id starts out in the free pool in ascending order. Creation takes from the front of the
//! pool and destruction returns the id to the back, so a destroyed id is only handed out again once
//! the ids freed before it have been reused:
//!
//! ```rust,ignore
//! let mut registry = Registry::new(3);
//! let a = registry.create()?; // Entity(0)
//! registry.destroy(a)?;
//! let b = registry.create()?; // Entity(1), Entity(0) is now at the back of the pool
//! ```
//!
//! A live id is never handed out twice, and an id in the free pool never carries a signature.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use log::{trace, warn};

use crate::ecs::{
    error::{Error, Result},
    signature::Signature,
};

/// An entity in the ECS. A lightweight handle used as the key into component stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// Construct an entity from a raw id value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id of this entity.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }

    /// Get the index of this entity if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Entity {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// The collection of all entity slots. Tracks which ids are alive, which are free for reuse and
/// the component signature of each slot.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Ids available for creation, in the order they will be handed out.
    available: VecDeque<Entity>,

    /// Signature for every entity slot, indexed by entity id.
    signatures: Vec<Signature>,

    /// Bit `i` is set while entity `i` is alive.
    alive: FixedBitSet,

    /// Number of live entities.
    living: usize,
}

impl Registry {
    /// Construct a registry with `capacity` entity slots, all of them free.
    pub fn new(capacity: usize) -> Self {
        Self {
            available: (0..capacity as u32).map(Entity).collect(),
            signatures: vec![Signature::new(); capacity],
            alive: FixedBitSet::with_capacity(capacity),
            living: 0,
        }
    }

    /// The number of entity slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.signatures.len()
    }

    /// The number of currently live entities.
    #[inline]
    pub fn living(&self) -> usize {
        self.living
    }

    /// Create a new entity from the front of the free pool.
    ///
    /// # Errors
    /// - [`Error::EntityCapacity`] if every slot is alive.
    pub fn create(&mut self) -> Result<Entity> {
        let entity = self.available.pop_front().ok_or(Error::EntityCapacity {
            max: self.capacity(),
        })?;
        self.alive.insert(entity.index());
        self.living += 1;
        trace!("created {:?}", entity);
        Ok(entity)
    }

    /// Destroy a live entity. Its signature is cleared and the id returns to the back of the free
    /// pool.
    ///
    /// # Errors
    /// - [`Error::InvalidEntity`] if the entity is out of range or not alive.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        if !self.is_alive(entity) {
            warn!(
                "Attempted to destroy an entity that is not alive: {:?}",
                entity
            );
            return Err(Error::InvalidEntity(entity));
        }
        self.signatures[entity.index()].clear();
        self.alive.set(entity.index(), false);
        self.available.push_back(entity);
        self.living -= 1;
        trace!("destroyed {:?}", entity);
        Ok(())
    }

    /// Determine if the given entity is currently alive.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(entity.index())
    }

    /// Replace the signature of an entity slot.
    ///
    /// # Errors
    /// - [`Error::InvalidEntity`] if the entity is out of range.
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> Result<()> {
        let slot = self
            .signatures
            .get_mut(entity.index())
            .ok_or(Error::InvalidEntity(entity))?;
        *slot = signature;
        Ok(())
    }

    /// Get the signature of an entity slot.
    ///
    /// # Errors
    /// - [`Error::InvalidEntity`] if the entity is out of range.
    pub fn signature(&self, entity: Entity) -> Result<&Signature> {
        self.signatures
            .get(entity.index())
            .ok_or(Error::InvalidEntity(entity))
    }
}
