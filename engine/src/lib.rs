//! A small entity-component-system runtime.
//!
//! Entities are plain ids, components live in packed per-type stores, and systems are handed the
//! set of entities whose component signature satisfies their requirement. Everything is reached
//! through an explicitly owned [`ecs::Coordinator`].

// Allow the derive macros to refer to `::triki_engine` from inside this crate.
extern crate self as triki_engine;

pub mod ecs;
pub mod logging;
