//! An archetype-based entity/component store.
//!
//! Entities sharing the same set of component types live together in columnar [tables](storage::Table).
//! Adding or removing a component type migrates the entity's row to another table, while overwriting
//! a value never moves anything. [Queries](query::Query) cache the tables matching a [Mask](components::Mask)
//! and stay complete as new tables are created.

extern crate self as archetable;

pub mod data_structures;
pub mod components;
pub mod archetypes;
pub mod entities;
pub mod storage;
pub mod query;
mod error;

pub use lazy_static::lazy_static;
pub use error::{EcsError, Result};

pub mod prelude {
	pub use crate::components::*;
	pub use crate::error::{EcsError, Result};
	pub use crate::entities::{Entity, EntityMeta, Identity};
	pub use crate::archetypes::{Archetypes, ArchetypesConfig};
	pub use crate::query::{ComponentTuple, Query, QueryId, QueryIter};
	pub use crate::storage::{double_capacity, ExpandFn, Table, TableId, TableStorage};
}

#[cfg(test)]
mod tests;
