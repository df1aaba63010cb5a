use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

/// A growable, aligned byte column holding `capacity` items of `item_size` bytes each.
///
/// The column does not know the type it stores. Items are plain bytes,
/// so copying, growing and dropping never run any user code.
pub(crate) struct Column {
	ptr: NonNull<u8>,
	capacity: usize,
	item_size: usize,
	item_align: usize,
}

// SAFETY: a column owns its allocation exclusively and only stores `Send + Sync` components.
unsafe impl Send for Column {}
unsafe impl Sync for Column {}

impl Column {
	pub fn with_capacity(item_size: usize, item_align: usize, capacity: usize) -> Self {
		debug_assert!(item_size > 0, "Zero-sized components have no column");
		debug_assert!(item_align.is_power_of_two());

		let mut column = Self {
			ptr: NonNull::dangling(),
			capacity: 0,
			item_size,
			item_align,
		};
		column.grow(capacity);
		column
	}

	/// Reallocate the column to hold `capacity` items.
	/// Only the `[0, old capacity)` prefix is carried over; the remainder is zeroed.
	pub fn grow(&mut self, capacity: usize) {
		if capacity <= self.capacity {
			return;
		}

		let layout = self.layout(capacity);
		// SAFETY: the layout has a non-zero size since both item_size and capacity are non-zero.
		let ptr = unsafe { alloc_zeroed(layout) };
		let ptr = match NonNull::new(ptr) {
			Some(ptr) => ptr,
			None => std::alloc::handle_alloc_error(layout),
		};

		if self.capacity > 0 {
			// SAFETY: both allocations hold at least the old byte length and never overlap.
			unsafe {
				std::ptr::copy_nonoverlapping(self.ptr.as_ptr(), ptr.as_ptr(), self.byte_len());
				dealloc(self.ptr.as_ptr(), self.layout(self.capacity));
			}
		}

		self.ptr = ptr;
		self.capacity = capacity;
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn item_size(&self) -> usize {
		self.item_size
	}

	/// The bytes of the item stored at `index`.
	pub fn bytes(&self, index: usize) -> &[u8] {
		assert!(index < self.capacity, "Column index out of bounds");
		// SAFETY: index is in bounds and the allocation is zero-initialized.
		unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().add(index * self.item_size), self.item_size) }
	}

	pub fn bytes_mut(&mut self, index: usize) -> &mut [u8] {
		assert!(index < self.capacity, "Column index out of bounds");
		// SAFETY: index is in bounds and we hold the column mutably.
		unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().add(index * self.item_size), self.item_size) }
	}

	/// Raw pointer to the first item. Invalidated by [grow](Column::grow).
	pub fn as_mut_ptr(&mut self) -> *mut u8 {
		self.ptr.as_ptr()
	}

	pub fn as_ptr(&self) -> *const u8 {
		self.ptr.as_ptr()
	}

	fn byte_len(&self) -> usize {
		self.capacity * self.item_size
	}

	fn layout(&self, capacity: usize) -> Layout {
		let bytes = match self.item_size.checked_mul(capacity) {
			Some(bytes) => bytes,
			None => panic!("Column capacity overflow"),
		};
		match Layout::from_size_align(bytes, self.item_align) {
			Ok(layout) => layout,
			Err(_) => panic!("Column capacity overflow"),
		}
	}
}

impl Drop for Column {
	fn drop(&mut self) {
		if self.capacity > 0 {
			// SAFETY: the pointer was allocated with exactly this layout.
			unsafe { dealloc(self.ptr.as_ptr(), self.layout(self.capacity)) }
		}
	}
}
