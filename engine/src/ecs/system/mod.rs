//! Systems: per-frame logic routed to the entities that carry a required set of components.
//!
//! # Overview
//!
//! A system is a value implementing [`System`]. It is registered once with the
//! [`Coordinator`](crate::ecs::Coordinator), given a required [`Signature`](crate::ecs::Signature),
//! and from then on the coordinator keeps its live set current: an entity is in the set exactly
//! while its signature contains every required component.
//!
//! ```rust,ignore
//! use triki_engine::ecs::{Coordinator, Entities, System};
//!
//! #[derive(Default)]
//! struct Gravity;
//!
//! impl System for Gravity {
//!     type Input<'a> = f32;
//!
//!     fn update(&mut self, entities: &Entities, coordinator: &mut Coordinator, dt: f32) {
//!         for &entity in entities {
//!             if let Ok(velocity) = coordinator.component_mut::<Velocity>(entity) {
//!                 velocity.dy -= 9.8 * dt;
//!             }
//!         }
//!     }
//! }
//!
//! coordinator.register_system::<Gravity>()?;
//! let required = coordinator.signature_of::<Velocity>()?;
//! coordinator.set_system_signature::<Gravity>(required)?;
//!
//! // Once per frame
//! coordinator.update::<Gravity>(1.0 / 60.0)?;
//! ```
//!
//! # Live Sets
//!
//! Membership is re-evaluated per system for the one entity whose signature changed, never by
//! rescanning every entity. Changing a system's required signature does not revisit entities
//! that already exist; only later signature changes do.

pub mod registry;

use std::collections::BTreeSet;

use crate::ecs::{coordinator::Coordinator, entity::Entity};

pub use registry::{Id, Registry};

/// The live set of a system: every entity whose signature satisfies the system's requirement, in
/// ascending id order.
pub type Entities = BTreeSet<Entity>;

/// A piece of logic run once per frame over the entities matching its required signature.
pub trait System: 'static {
    /// External per-frame data supplied by the host loop, e.g. pointer state or a draw target.
    type Input<'a>;

    /// Run one frame of this system.
    ///
    /// `entities` is a snapshot of the live set taken when the update started. The coordinator is
    /// fully usable: components added or removed here update every live set immediately, including
    /// this system's own, without disturbing the snapshot.
    fn update(&mut self, entities: &Entities, coordinator: &mut Coordinator, input: Self::Input<'_>);
}
