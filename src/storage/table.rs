use crate::storage::{ObjectComponents, StorageId, TableStorage};
use crate::entities::{Entity, Identity};
use crate::error::{EcsError, Result};
use crate::data_structures::{BitField, BitFieldOnesIterator};
use crate::components::TypeSet;

/// A handle to a [Table] inside an [Archetypes](crate::archetypes::Archetypes) store.
#[derive(Default, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct TableId {
	pub(crate) index: usize,
}

impl TableId {
	/// The table of entities with no components besides [Entity].
	pub const EMPTY: TableId = TableId { index: 0 };

	pub const fn index(&self) -> usize {
		self.index
	}
}

/// Row bookkeeping for every entity sharing one exact shape.
///
/// The values themselves live in a [TableStorage], which tables whose shapes only differ by
/// column-less types (tags, object components) share. Each table tracks which of the storage's
/// rows it owns; the [Entity] column maps a row back to its identity.
pub struct Table {
	id: TableId,
	types: TypeSet,
	storage: StorageId,
	rows: BitField,
	len: usize,
	pub(crate) objects: ObjectComponents,
}

impl Table {
	pub(crate) fn new(id: TableId, types: TypeSet, storage: StorageId) -> Self {
		Self {
			id,
			types,
			storage,
			rows: BitField::new(),
			len: 0,
			objects: ObjectComponents::default(),
		}
	}

	pub fn id(&self) -> TableId {
		self.id
	}

	pub fn types(&self) -> &TypeSet {
		&self.types
	}

	pub fn storage_id(&self) -> StorageId {
		self.storage
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn owns_row(&self, row: usize) -> bool {
		self.rows.get(row)
	}

	/// The rows owned by this table, in ascending order.
	pub fn rows(&self) -> BitFieldOnesIterator<'_> {
		self.rows.iter_ones()
	}

	pub fn entity_at(&self, row: usize, storage: &TableStorage) -> Option<Entity> {
		debug_assert_eq!(storage.id(), self.storage);
		if !self.owns_row(row) {
			return None;
		}
		storage.read::<Entity>(row)
	}

	/// Allocate a row for `identity` and record it in the [Entity] column.
	pub(crate) fn add(&mut self, identity: Identity, storage: &mut TableStorage) -> Result<usize> {
		debug_assert_eq!(storage.id(), self.storage);
		let row = storage.allocate_row()?;
		storage.write(row, Entity::from(identity));
		self.adopt_row(row);
		Ok(row)
	}

	/// Release `row` back to the storage's free list.
	pub(crate) fn remove(&mut self, row: usize, storage: &mut TableStorage) -> Result<()> {
		debug_assert_eq!(storage.id(), self.storage);
		self.release_row(row)?;
		storage.free_row(row)
	}

	/// Take ownership of an allocated row of the shared storage.
	pub(crate) fn adopt_row(&mut self, row: usize) {
		debug_assert!(!self.owns_row(row));
		self.rows.set(row, true);
		self.len += 1;
	}

	/// Give up ownership of `row` without freeing it.
	pub(crate) fn release_row(&mut self, row: usize) -> Result<()> {
		if !self.owns_row(row) {
			return Err(EcsError::invalid(format!("row {} does not belong to table {}", row, self.id.index)));
		}
		self.rows.set(row, false);
		self.len -= 1;
		Ok(())
	}

	/// Drop every object component list held for `index`.
	pub(crate) fn clear_objects(&mut self, index: u32) {
		for ty in self.types.iter().filter(|t| t.is_object()) {
			self.objects.take(index, ty.id());
		}
	}
}
