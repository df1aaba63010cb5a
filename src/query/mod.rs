//! Cached, mask-driven views over the tables of an [Archetypes](crate::archetypes::Archetypes) store.

mod query;
mod component_tuple;

pub use query::*;
pub use component_tuple::*;
