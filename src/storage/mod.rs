//! Columnar row storage and the tables built on top of it.

mod table;
mod migration;
mod table_storage;
mod object_components;

pub use table::*;
pub use table_storage::*;
pub use object_components::{same_object, ObjectRef};

pub(crate) use migration::*;
pub(crate) use object_components::ObjectComponents;
