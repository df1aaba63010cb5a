//! [Entities](Entity) represent the individual "things" in your game or application.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.
//! Its [Identity] carries a generation so handles to despawned entities are detected in O(1).

mod identity;
mod entity_meta;

pub use identity::*;
pub use entity_meta::EntityMeta;

pub(crate) use entity_meta::EntityMetas;
