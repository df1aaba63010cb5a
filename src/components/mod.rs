//! Component types, their runtime descriptors, and the sets and masks built from them.

mod mask;
mod type_set;
mod component_id;
mod component_set;
mod storage_type;

pub use mask::*;
pub use type_set::*;
pub use component_id::*;
pub use component_set::*;
pub use storage_type::*;
pub use archetable_derive::{Component, ObjectComponent};
