//! The Coordinator is the single entry point to the ECS.
//!
//! A `Coordinator` composes the entity registry, the component type registry and the system
//! registry, and is the only place that calls across them. Every signature-affecting operation
//! runs to completion in the order: component storage, entity signature, system live sets.
//!
//! # Architecture
//!
//! - **Entity Registry**: Allocates and recycles entity ids and stores each entity's signature
//! - **Component Registry**: Assigns component type ids and owns one packed store per type
//! - **System Registry**: Holds system instances, their required signatures and live sets
//!
//! # Example
//!
//! ```ignore
//! use triki_engine::ecs::Coordinator;
//!
//! let mut coordinator = Coordinator::new();
//! coordinator.register_component::<Position>()?;
//! coordinator.register_component::<Marker>()?;
//!
//! coordinator.register_system::<RenderSystem>()?;
//! let required = coordinator.signature_of::<Marker>()?;
//! coordinator.set_system_signature::<RenderSystem>(required)?;
//!
//! let entity = coordinator.create_entity()?;
//! coordinator.add_component(entity, Marker { symbol: 'X' })?;
//! assert!(coordinator.system_entities::<RenderSystem>()?.contains(&entity));
//!
//! coordinator.destroy_entity(entity)?;
//! ```
//!
//! The coordinator is owned by the host and passed explicitly, including into every
//! [`System::update`]; there is no global instance.

use crate::ecs::{
    component::{self, Component},
    config::Config,
    entity::{self, Entity},
    error::{Error, Result},
    signature::{IntoSignature, Signature},
    system::{self, Entities, System},
};

/// The central facade over entities, components and systems.
pub struct Coordinator {
    /// The configuration the coordinator was built with.
    config: Config,

    /// Entity ids and signatures.
    entities: entity::Registry,

    /// Component type ids and their stores.
    components: component::Registry,

    /// Systems and their live sets.
    systems: system::Registry,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    /// Create a coordinator with the default capacities.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a coordinator with the given capacities.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            entities: entity::Registry::new(config.max_entities),
            components: component::Registry::new(config.max_component_types),
            systems: system::Registry::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The number of live entities.
    #[inline]
    pub fn living_entities(&self) -> usize {
        self.entities.living()
    }

    /// Create a new entity with an empty signature.
    ///
    /// # Errors
    /// - [`Error::EntityCapacity`] if `max_entities` entities are alive.
    pub fn create_entity(&mut self) -> Result<Entity> {
        self.entities.create()
    }

    /// Destroy an entity: its signature is cleared, every component it has is dropped and it
    /// leaves every live set.
    ///
    /// # Errors
    /// - [`Error::InvalidEntity`] if the entity is out of range or not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<()> {
        self.entities.destroy(entity)?;
        self.components.entity_destroyed(entity);
        self.systems.entity_destroyed(entity);
        Ok(())
    }

    /// Check if the given entity is currently alive.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Get the signature of an entity.
    ///
    /// # Errors
    /// - [`Error::InvalidEntity`] if the entity is out of range.
    #[inline]
    pub fn signature(&self, entity: Entity) -> Result<&Signature> {
        self.entities.signature(entity)
    }

    /// Register a component type. Must happen before the type is used anywhere else.
    ///
    /// # Errors
    /// - [`Error::DuplicateComponentType`] if `C` is already registered.
    /// - [`Error::ComponentTypeCapacity`] if `max_component_types` types are registered.
    pub fn register_component<C: Component>(&mut self) -> Result<component::Id> {
        self.components.register::<C>()
    }

    /// Get the id assigned to a component type.
    ///
    /// # Errors
    /// - [`Error::UnregisteredComponentType`] if `C` was never registered.
    #[inline]
    pub fn component_id<C: Component>(&self) -> Result<component::Id> {
        self.components.id::<C>()
    }

    /// Build the signature of a component type or tuple of component types.
    ///
    /// # Errors
    /// - [`Error::UnregisteredComponentType`] if any of the types was never registered.
    #[inline]
    pub fn signature_of<S: IntoSignature>(&self) -> Result<Signature> {
        S::into_signature(&self.components)
    }

    /// Attach a component to a live entity and update every live set for its new signature.
    ///
    /// # Errors
    /// - [`Error::InvalidEntity`] if the entity is out of range or not alive.
    /// - [`Error::UnregisteredComponentType`] if `C` was never registered.
    /// - [`Error::DuplicateComponent`] if the entity already has a `C`.
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Result<()> {
        self.ensure_alive(entity)?;
        let id = self.components.id::<C>()?;
        self.components
            .storage_mut::<C>()?
            .insert(entity, component)?;

        let mut signature = self.entities.signature(entity)?.clone();
        signature.insert(id);
        self.signature_changed(entity, signature)
    }

    /// Detach and return a component from a live entity and update every live set for its new
    /// signature.
    ///
    /// # Errors
    /// - [`Error::InvalidEntity`] if the entity is out of range or not alive.
    /// - [`Error::UnregisteredComponentType`] if `C` was never registered.
    /// - [`Error::MissingComponent`] if the entity has no `C`.
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Result<C> {
        self.ensure_alive(entity)?;
        let id = self.components.id::<C>()?;
        let component = self.components.storage_mut::<C>()?.remove(entity)?;

        let mut signature = self.entities.signature(entity)?.clone();
        signature.remove(id);
        self.signature_changed(entity, signature)?;
        Ok(component)
    }

    /// Get a component of a live entity.
    ///
    /// # Errors
    /// - [`Error::InvalidEntity`] if the entity is out of range or not alive.
    /// - [`Error::UnregisteredComponentType`] if `C` was never registered.
    /// - [`Error::MissingComponent`] if the entity has no `C`.
    pub fn component<C: Component>(&self, entity: Entity) -> Result<&C> {
        self.ensure_alive(entity)?;
        self.components.storage::<C>()?.get(entity)
    }

    /// Get a component of a live entity for in-place mutation.
    ///
    /// # Errors
    /// Same as [`component`](Self::component).
    pub fn component_mut<C: Component>(&mut self, entity: Entity) -> Result<&mut C> {
        self.ensure_alive(entity)?;
        self.components.storage_mut::<C>()?.get_mut(entity)
    }

    /// Check if a live entity has a component of type `C`.
    ///
    /// # Errors
    /// - [`Error::InvalidEntity`] if the entity is out of range or not alive.
    /// - [`Error::UnregisteredComponentType`] if `C` was never registered.
    pub fn has_component<C: Component>(&self, entity: Entity) -> Result<bool> {
        self.ensure_alive(entity)?;
        Ok(self.components.storage::<C>()?.contains(entity))
    }

    /// Get the packed store of a component type, for iterating every instance.
    ///
    /// # Errors
    /// - [`Error::UnregisteredComponentType`] if `C` was never registered.
    #[inline]
    pub fn storage<C: Component>(&self) -> Result<&component::Storage<C>> {
        self.components.storage::<C>()
    }

    /// Register a system, constructing its instance with `Default`. The system starts with an
    /// empty required signature and an empty live set.
    ///
    /// # Errors
    /// - [`Error::DuplicateSystem`] if `S` is already registered.
    pub fn register_system<S: System + Default>(&mut self) -> Result<system::Id> {
        self.systems.register(S::default())
    }

    /// Register an already constructed system instance.
    ///
    /// # Errors
    /// - [`Error::DuplicateSystem`] if `S` is already registered.
    pub fn register_system_with<S: System>(&mut self, system: S) -> Result<system::Id> {
        self.systems.register(system)
    }

    /// Set the components an entity must have to be in the live set of `S`. Entities are not
    /// re-evaluated until their own signature changes, so set this before creating entities.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    pub fn set_system_signature<S: System>(&mut self, signature: Signature) -> Result<()> {
        self.systems.set_signature::<S>(signature)
    }

    /// Get the live set of `S`.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    #[inline]
    pub fn system_entities<S: System>(&self) -> Result<&Entities> {
        self.systems.entities::<S>()
    }

    /// Get the instance of `S`.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    /// - [`Error::SystemBusy`] if called from inside the update of `S`.
    #[inline]
    pub fn system<S: System>(&self) -> Result<&S> {
        self.systems.get::<S>()
    }

    /// Get the instance of `S` mutably.
    ///
    /// # Errors
    /// Same as [`system`](Self::system).
    #[inline]
    pub fn system_mut<S: System>(&mut self) -> Result<&mut S> {
        self.systems.get_mut::<S>()
    }

    /// Run one update of `S` over a snapshot of its live set, with the given per-frame input.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSystem`] if `S` was never registered.
    /// - [`Error::SystemBusy`] if `S` is already running (an update re-entering itself).
    pub fn update<S: System>(&mut self, input: S::Input<'_>) -> Result<()> {
        let (mut system, entities) = self.systems.take::<S>()?;
        system.update(&entities, self, input);
        self.systems.restore(system)
    }

    /// Fail unless the entity is alive.
    #[inline]
    fn ensure_alive(&self, entity: Entity) -> Result<()> {
        if self.entities.is_alive(entity) {
            Ok(())
        } else {
            Err(Error::InvalidEntity(entity))
        }
    }

    /// Store a new signature for the entity and re-evaluate its system memberships.
    fn signature_changed(&mut self, entity: Entity, signature: Signature) -> Result<()> {
        self.systems.entity_signature_changed(entity, &signature);
        self.entities.set_signature(entity, signature)
    }
}
