use crate::storage::{double_capacity, ExpandFn};
use crate::error::{EcsError, Result};

/// Sizing knobs for an [Archetypes](crate::archetypes::Archetypes) store.
#[derive(Clone, Debug)]
pub struct ArchetypesConfig {
	pub(crate) entity_capacity: usize,
	pub(crate) table_capacity: usize,
	pub(crate) expand: ExpandFn,
}

impl ArchetypesConfig {
	pub const DEFAULT_ENTITY_CAPACITY: usize = 512;
	pub const DEFAULT_TABLE_CAPACITY: usize = 16;

	pub fn new() -> Self {
		Self::default()
	}

	/// Initial number of entity slots. Grows by doubling.
	pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
		self.entity_capacity = capacity;
		self
	}

	/// Initial number of rows of every new table storage.
	pub fn with_table_capacity(mut self, capacity: usize) -> Self {
		self.table_capacity = capacity;
		self
	}

	/// How table storages grow once their free rows run out.
	pub fn with_expand(mut self, expand: ExpandFn) -> Self {
		self.expand = expand;
		self
	}

	pub fn entity_capacity(&self) -> usize {
		self.entity_capacity
	}

	pub fn table_capacity(&self) -> usize {
		self.table_capacity
	}

	pub(crate) fn validate(&self) -> Result<()> {
		if self.entity_capacity == 0 {
			return Err(EcsError::invalid("entity capacity must be positive"));
		}
		if self.table_capacity == 0 {
			return Err(EcsError::invalid("table capacity must be positive"));
		}
		Ok(())
	}
}

impl Default for ArchetypesConfig {
	fn default() -> Self {
		Self {
			entity_capacity: Self::DEFAULT_ENTITY_CAPACITY,
			table_capacity: Self::DEFAULT_TABLE_CAPACITY,
			expand: double_capacity,
		}
	}
}
