//! System registry for storing systems and maintaining their live entity sets.
//!
//! The [`Registry`] holds exactly one instance per system type together with the system's
//! required [`Signature`] and its live set. It never looks at component data; it only reacts to
//! the two events the coordinator forwards: an entity's signature changed, or an entity died.

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
};

use log::{debug, trace};

use crate::ecs::{
    entity::Entity,
    error::{Error, Result},
    signature::Signature,
    system::{Entities, System},
};

/// A system identifier, assigned in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Get the index of this system if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// One registered system.
struct Slot {
    /// The Rust type name, for diagnostics.
    name: &'static str,

    /// The system instance. `None` while the system is running its update.
    system: Option<Box<dyn Any>>,

    /// Components an entity must have to be in the live set.
    required: Signature,

    /// Entities currently satisfying `required`.
    entities: Entities,
}

/// A registry for storing systems and the entities each one applies to.
#[derive(Default)]
pub struct Registry {
    /// Map from the system's TypeId to its Id.
    type_map: HashMap<TypeId, Id>,

    /// All registered systems, indexed by their [`Id`].
    slots: Vec<Slot>,
}

impl Registry {
    /// Create a new, empty system registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of registered systems.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no system has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Register a system instance and return its identifier. The system starts with an empty
    /// required signature and an empty live set.
    ///
    /// # Errors
    /// - [`Error::DuplicateSystem`] if a system of type `S` is already registered.
    pub fn register<S: System>(&mut self, system: S) -> Result<Id> {
        let type_id = TypeId::of::<S>();
        if self.type_map.contains_key(&type_id) {
            return Err(Error::DuplicateSystem(type_name::<S>()));
        }

        let id = Id(self.slots.len() as u32);
        self.slots.push(Slot {
            name: type_name::<S>(),
            system: Some(Box::new(system)),
            required: Signature::new(),
            entities: Entities::new(),
        });
        self.type_map.insert(type_id, id);
        debug!("registered system '{}' as {:?}", type_name::<S>(), id);
        Ok(id)
    }

    /// Get the identifier of a registered system type.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    #[inline]
    pub fn id<S: System>(&self) -> Result<Id> {
        self.type_map
            .get(&TypeId::of::<S>())
            .copied()
            .ok_or(Error::UnregisteredSystem(type_name::<S>()))
    }

    /// Get the type name of the system registered under the given id, if any.
    #[inline]
    pub fn name(&self, id: Id) -> Option<&'static str> {
        self.slots.get(id.index()).map(|slot| slot.name)
    }

    /// Set the components an entity must have to be in the live set of `S`.
    ///
    /// Existing live sets are not recomputed; entities are re-evaluated against the new requirement
    /// the next time their signature changes.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    pub fn set_signature<S: System>(&mut self, signature: Signature) -> Result<()> {
        let slot = self.slot_mut::<S>()?;
        debug!("system '{}' requires {:?}", slot.name, signature);
        slot.required = signature;
        Ok(())
    }

    /// Get the required signature of `S`.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    pub fn signature<S: System>(&self) -> Result<&Signature> {
        Ok(&self.slot::<S>()?.required)
    }

    /// Get the live set of `S`.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    pub fn entities<S: System>(&self) -> Result<&Entities> {
        Ok(&self.slot::<S>()?.entities)
    }

    /// Get the live set of the system with the given id, if any.
    #[inline]
    pub fn entities_by_id(&self, id: Id) -> Option<&Entities> {
        self.slots.get(id.index()).map(|slot| &slot.entities)
    }

    /// Get the instance of `S`.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    /// - [`Error::SystemBusy`] if `S` is in the middle of its update.
    pub fn get<S: System>(&self) -> Result<&S> {
        self.slot::<S>()?
            .system
            .as_ref()
            .and_then(|system| system.downcast_ref::<S>())
            .ok_or(Error::SystemBusy(type_name::<S>()))
    }

    /// Get the instance of `S` mutably.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    /// - [`Error::SystemBusy`] if `S` is in the middle of its update.
    pub fn get_mut<S: System>(&mut self) -> Result<&mut S> {
        self.slot_mut::<S>()?
            .system
            .as_mut()
            .and_then(|system| system.downcast_mut::<S>())
            .ok_or(Error::SystemBusy(type_name::<S>()))
    }

    /// Take the instance of `S` out of the registry for an update, along with a snapshot of its
    /// live set. The instance must be handed back with [`restore`](Self::restore).
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    /// - [`Error::SystemBusy`] if the instance is already taken.
    pub(crate) fn take<S: System>(&mut self) -> Result<(Box<S>, Entities)> {
        let slot = self.slot_mut::<S>()?;
        let system = slot
            .system
            .take()
            .ok_or(Error::SystemBusy(type_name::<S>()))?;
        match system.downcast::<S>() {
            Ok(system) => Ok((system, slot.entities.clone())),
            Err(system) => {
                slot.system = Some(system);
                Err(Error::UnregisteredSystem(type_name::<S>()))
            }
        }
    }

    /// Return an instance taken with [`take`](Self::take).
    pub(crate) fn restore<S: System>(&mut self, system: Box<S>) -> Result<()> {
        self.slot_mut::<S>()?.system = Some(system);
        Ok(())
    }

    /// Drop the entity from every live set.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for slot in &mut self.slots {
            if slot.entities.remove(&entity) {
                trace!("{:?} left '{}'", entity, slot.name);
            }
        }
    }

    /// Re-evaluate the entity's membership in every system against its new signature.
    pub fn entity_signature_changed(&mut self, entity: Entity, signature: &Signature) {
        for slot in &mut self.slots {
            if signature.contains_all(&slot.required) {
                if slot.entities.insert(entity) {
                    trace!("{:?} joined '{}'", entity, slot.name);
                }
            } else if slot.entities.remove(&entity) {
                trace!("{:?} left '{}'", entity, slot.name);
            }
        }
    }

    fn slot<S: System>(&self) -> Result<&Slot> {
        let id = self.id::<S>()?;
        Ok(&self.slots[id.index()])
    }

    fn slot_mut<S: System>(&mut self) -> Result<&mut Slot> {
        let id = self.id::<S>()?;
        Ok(&mut self.slots[id.index()])
    }
}
