use crate::components::{Component, ComponentId, StorageType, TypeSet};
use crate::data_structures::{Column, RangeAllocator};
use crate::error::{EcsError, Result};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;

type Hasher = BuildHasherDefault<NoHashHasher<usize>>;

/// Computes a new row capacity from `(current, requested, row_bytes)`.
/// The result must be at least `requested`.
pub type ExpandFn = fn(usize, usize, usize) -> usize;

/// The default [ExpandFn]: double the capacity, or jump straight to the request if that is larger.
pub fn double_capacity(current: usize, requested: usize, _row_bytes: usize) -> usize {
	usize::max(current.saturating_mul(2), requested)
}

#[derive(Default, Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct StorageId {
	pub(crate) index: usize,
}

/// Columnar byte storage for every table sharing one set of column types.
///
/// Each non-tag value component gets a [Column] of `capacity` items. A row keeps its offset
/// in every column for as long as it stays allocated, including across expansions.
pub struct TableStorage {
	id: StorageId,
	types: TypeSet,
	row_bytes: usize,
	rows: RangeAllocator,
	expand: ExpandFn,
	columns: HashMap<ComponentId, Column, Hasher>,
}

impl TableStorage {
	pub(crate) fn new(id: StorageId, types: &TypeSet, capacity: usize, expand: ExpandFn) -> Result<Self> {
		if capacity == 0 {
			return Err(EcsError::invalid("table capacity must be positive"));
		}

		let types = types.columns();
		let columns = types
			.iter()
			.map(|t| (t.id(), Column::with_capacity(t.byte_size(), t.align(), capacity)))
			.collect();

		Ok(Self {
			id,
			row_bytes: types.row_bytes(),
			types,
			rows: RangeAllocator::with_capacity(capacity),
			expand,
			columns,
		})
	}

	pub fn id(&self) -> StorageId {
		self.id
	}

	/// The column types of this storage.
	pub fn types(&self) -> &TypeSet {
		&self.types
	}

	pub fn capacity(&self) -> usize {
		self.rows.capacity()
	}

	/// Number of allocated rows, across every table sharing this storage.
	pub fn len(&self) -> usize {
		self.rows.used()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn row_bytes(&self) -> usize {
		self.row_bytes
	}

	pub fn is_row_allocated(&self, row: usize) -> bool {
		row < self.capacity() && !self.rows.is_free(row)
	}

	/// Take the lowest free row, expanding every column if none is left.
	pub(crate) fn allocate_row(&mut self) -> Result<usize> {
		match self.rows.try_allocate(1) {
			Ok(range) => Ok(range.start),
			Err(_) => {
				let requested = self.capacity() + 1;
				let capacity = (self.expand)(self.capacity(), requested, self.row_bytes);
				if capacity < requested {
					return Err(EcsError::invalid(format!(
						"expand function returned {} rows for a request of {}",
						capacity, requested
					)));
				}

				self.ensure_capacity(capacity);
				match self.rows.try_allocate(1) {
					Ok(range) => Ok(range.start),
					Err(_) => unreachable!("storage was just expanded"),
				}
			},
		}
	}

	/// Return a row to the free list. Its bytes are left as-is for the next writer.
	pub(crate) fn free_row(&mut self, row: usize) -> Result<()> {
		if !self.is_row_allocated(row) {
			return Err(EcsError::invalid(format!("row {} is not allocated", row)));
		}
		self.rows.free(row..row + 1);
		Ok(())
	}

	/// Grow every column to hold at least `capacity` rows.
	pub fn ensure_capacity(&mut self, capacity: usize) {
		if capacity <= self.capacity() {
			return;
		}

		log::debug!(
			"expanding table storage {} {:?} from {} to {} rows",
			self.id.index,
			self.types,
			self.capacity(),
			capacity
		);

		for column in self.columns.values_mut() {
			column.grow(capacity);
		}
		self.rows.ensure_capacity(capacity);
	}

	pub fn read<T: Component>(&self, row: usize) -> Option<T> {
		self.get::<T>(row).copied()
	}

	pub fn get<T: Component>(&self, row: usize) -> Option<&T> {
		let column = self.typed_column(T::storage_type(), row)?;
		// SAFETY: the column stores `T` with `T`'s alignment and the row is in bounds.
		unsafe { Some(&*(column.as_ptr() as *const T).add(row)) }
	}

	pub fn get_mut<T: Component>(&mut self, row: usize) -> Option<&mut T> {
		self.typed_column(T::storage_type(), row)?;
		let column = self.columns.get_mut(&T::storage_type().id())?;
		// SAFETY: the column stores `T` with `T`'s alignment and the row is in bounds.
		unsafe { Some(&mut *(column.as_mut_ptr() as *mut T).add(row)) }
	}

	/// Write `value` into `row`. Returns false if this storage has no column for `T` or the row is free.
	pub fn write<T: Component>(&mut self, row: usize, value: T) -> bool {
		match self.get_mut::<T>(row) {
			Some(slot) => {
				*slot = value;
				true
			},
			None => false,
		}
	}

	/// The raw bytes of one value.
	pub fn bytes(&self, ty: StorageType, row: usize) -> Option<&[u8]> {
		let column = self.columns.get(&ty.id())?;
		(row < column.capacity()).then(|| column.bytes(row))
	}

	/// Copy the bytes of every column both storages have in common from `src_row` into `dst_row`.
	pub(crate) fn copy_row(src: &TableStorage, src_row: usize, dst: &mut TableStorage, dst_row: usize) {
		for (id, column) in src.columns.iter() {
			if let Some(target) = dst.columns.get_mut(id) {
				target.bytes_mut(dst_row).copy_from_slice(column.bytes(src_row));
			}
		}
	}

	/// Base pointer of the column for `id`. Invalidated by any expansion.
	pub(crate) fn column_ptr(&mut self, id: ComponentId) -> Option<*mut u8> {
		self.columns.get_mut(&id).map(|c| c.as_mut_ptr())
	}

	fn typed_column(&self, ty: StorageType, row: usize) -> Option<&Column> {
		let column = self.columns.get(&ty.id())?;
		debug_assert_eq!(column.item_size(), ty.byte_size());
		// Free rows may never have been written; their zeroed bytes are not a valid `T` in general.
		self.is_row_allocated(row).then_some(column)
	}
}
