//! Capacity configuration for a [`Coordinator`](crate::ecs::Coordinator).

/// Default maximum number of simultaneously live entities.
pub const MAX_ENTITIES: usize = 5000;

/// Default maximum number of distinct component types.
pub const MAX_COMPONENT_TYPES: usize = 32;

/// Startup configuration for the ECS. Capacities are fixed once a coordinator is built; exceeding
/// either one turns the offending operation into a capacity error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of live entities. Entity ids range over `0..max_entities`.
    pub max_entities: usize,

    /// Maximum number of registered component types. Type ids range over
    /// `0..max_component_types`.
    pub max_component_types: usize,
}

impl Config {
    /// Construct a configuration with the default capacities.
    #[inline]
    pub const fn new() -> Self {
        Self {
            max_entities: MAX_ENTITIES,
            max_component_types: MAX_COMPONENT_TYPES,
        }
    }

    /// Set the maximum number of live entities.
    #[inline]
    pub const fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Set the maximum number of component types.
    #[inline]
    pub const fn with_max_component_types(mut self, max_component_types: usize) -> Self {
        self.max_component_types = max_component_types;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
