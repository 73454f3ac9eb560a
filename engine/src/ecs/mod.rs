pub mod component;
pub mod config;
pub mod coordinator;
pub mod entity;
pub mod error;
pub mod signature;
pub mod system;
pub(crate) mod util;

pub use component::Component;
pub use config::{Config, MAX_COMPONENT_TYPES, MAX_ENTITIES};
pub use coordinator::Coordinator;
pub use entity::Entity;
pub use error::{Error, Result};
pub use signature::{IntoSignature, Signature};
pub use system::{Entities, System};
