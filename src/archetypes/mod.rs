//! The [Archetypes] store: entity identity allocation, the table registry,
//! and the structural changes that move entities between [tables](crate::storage::Table).

mod config;
mod transition;
mod archetype_store;
mod archetype_macros;

pub use config::*;
pub use archetype_store::*;

pub(crate) use transition::*;
