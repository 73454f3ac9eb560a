//! Component management for the ECS.
//!
//! This module provides the infrastructure for registering, storing, and looking up component
//! types in the Entity Component System. Components are plain data values attached to entities.
//!
//! ## Architecture
//!
//! The component system consists of several key types:
//!
//! - [`Component`]: The marker trait all component types implement, usually through
//!   `#[derive(Component)]`
//! - [`Id`]: A small integer identifying a registered component type, assigned in registration
//!   order starting at zero
//! - [`Storage`]: A packed, type-homogeneous array of one component type, keyed by entity
//! - [`Registry`]: Assigns ids and owns one [`Storage`] per registered type
//!
//! ## Usage
//!
//! ```ignore
//! use triki_engine::ecs::component::Registry;
//! use triki_macros::Component;
//!
//! #[derive(Component)]
//! struct Position { row: usize, col: usize }
//!
//! let mut registry = Registry::new(32);
//! let pos_id = registry.register::<Position>()?;
//! ```

mod registry;
mod storage;

pub use registry::Registry;
pub use storage::{DynamicIndex, ErasedStorage, Index, Storage};

/// A component type identifier. Stable for the lifetime of the registry that assigned it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Construct a new component Id from a raw u32 value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this component if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Id {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<usize> for Id {
    #[inline]
    fn from(value: usize) -> Self {
        Self::new(value as u32)
    }
}

/// A trait representing a component in the ECS (Entity Component System).
///
/// At present this only sets the required trait bounds for a type to be used as a component.
pub trait Component: 'static {}
