use std::hash::{Hash, Hasher};
use std::cmp::Ordering;
use std::iter::repeat;

const BITS: usize = 32;
const FIRST_BIT: u32 = 1 << (BITS - 1);

/// A dynamically sized bit-field.
///
/// Trailing zero words are not significant: two [BitFields](BitField) holding the same set bits
/// compare and hash equally regardless of their capacity.
#[derive(Default, Clone)]
pub struct BitField {
	values: Vec<u32>,
}

impl BitField {
	/// Create a new [BitField].
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new [BitField] with the specified capacity.
	///
	/// # Arguments
	/// * `capacity` - A usize representing the container's target capacity in bits
	pub fn with_capacity(capacity: usize) -> Self {
		let mut instance = Self { values: Vec::new() };
		instance.ensure_capacity(capacity);
		instance
	}

	/// Get the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to retrieve
	#[inline(always)]
	pub fn get(&self, i: usize) -> bool {
		let (position, shift) = Self::pos_shift(i);
		match self.values.get(position) {
			Some(value) => (value & (FIRST_BIT >> shift)) != 0,
			None => false,
		}
	}

	/// Set the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to modify
	#[inline(always)]
	pub fn set(&mut self, i: usize, value: bool) {
		let (position, shift) = Self::pos_shift(i);
		let bit = FIRST_BIT >> shift;

		match value {
			true => {
				if self.values.len() <= position {
					self.extend_to_position(position);
				}
				self.values[position] |= bit;
			},

			false => {
				if let Some(word) = self.values.get_mut(position) {
					*word &= !bit;
				}
			},
		}
	}

	/// Check if every bit set in this [BitField] is also set in `other`.
	/// The empty set is a subset of every set.
	///
	/// # Arguments
	/// * `other` - The bitfield to check against
	pub fn is_subset_of(&self, other: &BitField) -> bool {
		self.values.iter().enumerate().all(|(i, mask)| {
			let bits = other.values.get(i).copied().unwrap_or(0);
			(bits & *mask) == *mask
		})
	}

	/// Check if this [BitField] shares at least one set bit with `other`.
	///
	/// # Arguments
	/// * `other` - The bitfield to check against
	pub fn intersects(&self, other: &BitField) -> bool {
		self.values.iter().zip(other.values.iter()).any(|(a, b)| (a & b) != 0)
	}

	/// Check whether no bit is set.
	pub fn is_empty(&self) -> bool {
		self.values.iter().all(|v| *v == 0)
	}

	/// Count the set bits.
	pub fn count_ones(&self) -> usize {
		self.values.iter().map(|v| v.count_ones() as usize).sum()
	}

	/// Set all bits to 0.
	pub fn clear(&mut self) {
		self.values.fill(0);
	}

	/// Set the minimum capacity of the [BitField].
	/// # Arguments
	/// * `capacity` - A usize representing the container's minimum capacity in bits
	pub fn ensure_capacity(&mut self, capacity: usize) {
		let words = (capacity + BITS - 1) / BITS;
		if self.values.len() < words {
			let count = words - self.values.len();
			self.values.extend(repeat(0).take(count));
		}
	}

	/// Get the [BitField]'s capacity in bits.
	pub fn capacity(&self) -> usize {
		self.values.len() * BITS
	}

	/// Iterate over the indices of the set bits in ascending order.
	pub fn iter_ones(&self) -> BitFieldOnesIterator<'_> {
		BitFieldOnesIterator {
			index: 0,
			current: self.values.first().copied().unwrap_or(0),
			values: &self.values,
		}
	}

	#[inline(never)]
	fn extend_to_position(&mut self, position: usize) {
		let count = position - self.values.len() + 1;
		self.values.extend(repeat(0).take(count));
	}

	#[inline(always)]
	fn pos_shift(a: usize) -> (usize, usize) {
		(a / BITS, a % BITS)
	}

	fn significant_words(&self) -> &[u32] {
		let end = self.values.iter().rposition(|v| *v != 0).map_or(0, |i| i + 1);
		&self.values[..end]
	}
}

impl Eq for BitField {}

impl PartialEq<Self> for BitField {
	fn eq(&self, other: &Self) -> bool {
		self.significant_words() == other.significant_words()
	}
}

impl PartialOrd for BitField {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for BitField {
	fn cmp(&self, other: &Self) -> Ordering {
		self.significant_words().cmp(other.significant_words())
	}
}

impl Hash for BitField {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.significant_words().hash(state);
	}
}

impl std::fmt::Debug for BitField {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_set().entries(self.iter_ones()).finish()
	}
}

impl FromIterator<usize> for BitField {
	fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
		let mut bitfield = BitField::new();
		for i in iter {
			bitfield.set(i, true);
		}
		bitfield
	}
}

/// Iterates over the indices of the set bits of a [BitField].
pub struct BitFieldOnesIterator<'l> {
	index: usize,
	current: u32,
	values: &'l [u32],
}

impl Iterator for BitFieldOnesIterator<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		while self.current == 0 {
			self.index += 1;
			self.current = *self.values.get(self.index)?;
		}

		let shift = self.current.leading_zeros() as usize;
		self.current &= !(FIRST_BIT >> shift);
		Some(self.index * BITS + shift)
	}
}
