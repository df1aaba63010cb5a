use std::collections::btree_map::Values;
use std::collections::BTreeMap;
use std::iter::Cloned;

type Range = std::ops::Range<usize>;

/// Tracks which slots of a fixed-capacity region are in use.
///
/// Free slots are kept as coalesced ranges ordered by their start,
/// so allocations always reuse the lowest free slots first.
#[derive(Default, Debug)]
pub struct RangeAllocator {
	used: usize,
	capacity: usize,
	ranges: BTreeMap<usize, Range>,
}

impl RangeAllocator {
	/// Create a new [RangeAllocator]
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new [RangeAllocator] with the specified capacity.
	///
	/// # Arguments
	/// * `capacity` - A usize representing the container's target capacity
	pub fn with_capacity(capacity: usize) -> Self {
		let mut allocator = Self::default();
		allocator.reserve(capacity);
		allocator
	}

	/// Allocate a continuous chunk of size \[size], growing the capacity if no free chunk is large enough.
	///
	/// # Arguments
	/// * `size` - The size of the chunk to allocate
	pub fn allocate(&mut self, size: usize) -> Range {
		match self.try_allocate(size) {
			Ok(range) => range,
			Err(_) => self.allocate_new(size),
		}
	}

	/// Conditionally allocate a continuous chunk of size \[size].
	/// On failure the function returns the amount of additional space required.
	///
	/// # Arguments
	/// * `size` - The size of the chunk to allocate
	pub fn try_allocate(&mut self, size: usize) -> Result<Range, usize> {
		let find = self.ranges.values().find(|r| r.len() >= size).map(|r| r.start);

		match find {
			Some(start) => {
				let mut range = match self.ranges.remove(&start) {
					Some(range) => range,
					None => unreachable!(),
				};

				let used_range = start..start + size;
				range.start += size;
				if !range.is_empty() {
					self.ranges.insert(range.start, range);
				}

				self.used += size;
				Ok(used_range)
			},
			None => Err(size.saturating_sub(self.available()).max(1)),
		}
	}

	/// Return a range to the allocator.
	///
	/// # Arguments
	/// * `range` - The range to be returned to the allocator. Ranges should never be returned twice.
	pub fn free(&mut self, range: Range) {
		if range.is_empty() {
			return;
		}
		debug_assert!(range.end <= self.capacity);
		self.used -= range.len();

		let mut merged = range;
		if let Some(next) = self.ranges.remove(&merged.end) {
			merged.end = next.end;
		}

		let previous = self.ranges.range(..merged.start).next_back().map(|(k, r)| (*k, r.end));
		match previous {
			Some((key, end)) if end == merged.start => {
				if let Some(previous) = self.ranges.get_mut(&key) {
					previous.end = merged.end;
				}
			},
			_ => {
				self.ranges.insert(merged.start, merged);
			},
		}
	}

	/// Check whether the slot at `index` is currently unallocated.
	/// Slots beyond the capacity are reported as not free.
	pub fn is_free(&self, index: usize) -> bool {
		self.ranges.range(..=index).next_back().map_or(false, |(_, r)| r.contains(&index))
	}

	/// Get the amount of available space left to the allocator.
	pub fn available(&self) -> usize {
		self.capacity - self.used
	}

	/// Get the amount of allocated space.
	pub fn used(&self) -> usize {
		self.used
	}

	/// Get the total capacity of the allocator.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Set the minimum capacity of the allocator.
	/// # Arguments
	/// * `capacity` - A usize representing the allocator's minimum capacity
	pub fn ensure_capacity(&mut self, capacity: usize) {
		if capacity > self.capacity {
			let count = capacity - self.capacity;
			self.reserve(count);
		}
	}

	/// Reserve an additional chunk of size \[size].
	/// # Arguments
	/// * `size` - The size of the chunk to reserve
	pub fn reserve(&mut self, size: usize) {
		let range = self.allocate_new(size);
		self.free(range);
	}

	/// Iterate over the unallocated chunks
	pub fn free_ranges(&self) -> Cloned<Values<'_, usize, Range>> {
		self.ranges.values().cloned()
	}

	/// Iterate over the allocated chunks
	pub fn used_ranges(&self) -> UsedRangeIterator<'_> {
		UsedRangeIterator {
			last: 0,
			capacity: self.capacity,
			free: self.ranges.values(),
		}
	}

	fn allocate_new(&mut self, size: usize) -> Range {
		let start = self.capacity;
		self.capacity += size;
		self.used += size;
		start..self.capacity
	}
}

/// Iterates over the allocated chunks of a [RangeAllocator]
pub struct UsedRangeIterator<'l> {
	last: usize,
	capacity: usize,
	free: Values<'l, usize, Range>,
}

impl Iterator for UsedRangeIterator<'_> {
	type Item = Range;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			match self.free.next() {
				None if self.last != self.capacity => {
					let range = self.last..self.capacity;
					self.last = self.capacity;
					return Some(range);
				},

				None => return None,

				Some(free) => {
					let range = self.last..free.start;
					self.last = free.end;

					if !range.is_empty() {
						return Some(range);
					}
				},
			}
		}
	}
}
