use crate::components::{register_value, Component, ComponentTypeInfo, StorageType};
use lazy_static::lazy_static;
use std::fmt;

/// A generation-tagged entity slot.
///
/// `index` is a dense slot id reused after despawn; `generation` changes on every despawn
/// of that slot, so a stale [Identity] is never reported alive again.
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Identity {
	pub(crate) index: u32,
	pub(crate) generation: u32,
}

impl Identity {
	pub const fn new(index: u32, generation: u32) -> Self {
		Self { index, generation }
	}

	pub const fn index(&self) -> u32 {
		self.index
	}

	pub const fn generation(&self) -> u32 {
		self.generation
	}
}

impl fmt::Display for Identity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}v{}", self.index, self.generation)
	}
}

/// A unique handle to an entity.
///
/// [Entity] is itself a component stored in every table,
/// so iterating a table's rows yields entities directly.
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Entity {
	identity: Identity,
}

impl Entity {
	pub const fn identity(&self) -> Identity {
		self.identity
	}

	pub const fn index(&self) -> u32 {
		self.identity.index
	}

	pub const fn generation(&self) -> u32 {
		self.identity.generation
	}
}

impl From<Identity> for Entity {
	fn from(identity: Identity) -> Self {
		Self { identity }
	}
}

impl From<Entity> for Identity {
	fn from(entity: Entity) -> Self {
		entity.identity
	}
}

impl fmt::Display for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Entity({})", self.identity)
	}
}

lazy_static! {
	static ref ENTITY_STORAGE_TYPE: StorageType = register_value::<Entity>();
}

impl ComponentTypeInfo for Entity {
	#[inline(always)]
	fn storage_type() -> StorageType {
		*ENTITY_STORAGE_TYPE
	}
}

impl Component for Entity {}
