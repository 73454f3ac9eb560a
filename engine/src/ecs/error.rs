//! Errors raised by the ECS core.
//!
//! Every variant signals a fault in the calling sequence or startup configuration. None of them is
//! transient, so nothing in the core retries: the failing operation leaves all indices untouched
//! and reports immediately.

use thiserror::Error;

use crate::ecs::entity::Entity;

/// Errors that can occur while operating on a [`Coordinator`](crate::ecs::Coordinator) or one of
/// its registries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Every entity id is currently alive.
    #[error("too many entities in existence: capacity {max}")]
    EntityCapacity {
        /// The configured maximum number of live entities.
        max: usize,
    },

    /// No component type ids are left to assign.
    #[error("too many component types registered: capacity {max}")]
    ComponentTypeCapacity {
        /// The configured maximum number of component types.
        max: usize,
    },

    /// The entity is out of range or not alive.
    #[error("invalid entity: {0:?}")]
    InvalidEntity(Entity),

    /// The component type was registered twice.
    #[error("component type '{0}' registered more than once")]
    DuplicateComponentType(&'static str),

    /// The component type was used before it was registered.
    #[error("component type '{0}' used before registration")]
    UnregisteredComponentType(&'static str),

    /// The system type was registered twice.
    #[error("system '{0}' registered more than once")]
    DuplicateSystem(&'static str),

    /// The system type was used before it was registered.
    #[error("system '{0}' used before registration")]
    UnregisteredSystem(&'static str),

    /// The system's update was entered while it was already running.
    #[error("system '{0}' is already running")]
    SystemBusy(&'static str),

    /// The entity already has a component of this type.
    #[error("entity {entity:?} already has a '{component}' component")]
    DuplicateComponent {
        /// The entity the component was added to.
        entity: Entity,
        /// The component type name.
        component: &'static str,
    },

    /// The entity has no component of this type.
    #[error("entity {entity:?} has no '{component}' component")]
    MissingComponent {
        /// The entity the component was looked up on.
        entity: Entity,
        /// The component type name.
        component: &'static str,
    },
}

/// Result alias for fallible ECS operations.
pub type Result<T> = std::result::Result<T, Error>;
