use crate::components::{ComponentId, ComponentSet, StorageType};
use crate::data_structures::BitField;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::fmt;

/// An immutable, ordered set of [StorageTypes](StorageType): the shape of a table.
///
/// Members are sorted by [ComponentId] and deduplicated on construction,
/// so two sets built from the same types in any order are equal and hash identically.
/// Cloning is cheap.
#[derive(Clone)]
pub struct TypeSet {
	types: Arc<[StorageType]>,
	bits: BitField,
}

impl TypeSet {
	pub fn new(types: impl IntoIterator<Item = StorageType>) -> Self {
		let mut types: Vec<_> = types.into_iter().collect();
		types.sort();
		types.dedup();

		let bits = types.iter().map(|t| t.id().value()).collect();
		Self { types: types.into(), bits }
	}

	pub fn empty() -> Self {
		Self::new([])
	}

	/// The [TypeSet] of a tuple of component types.
	pub fn of<S: ComponentSet>() -> Self {
		S::type_set()
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	pub fn contains(&self, ty: StorageType) -> bool {
		self.bits.get(ty.id().value())
	}

	pub fn contains_id(&self, id: ComponentId) -> bool {
		self.bits.get(id.value())
	}

	pub fn iter(&self) -> impl Iterator<Item = StorageType> + '_ {
		self.types.iter().copied()
	}

	pub fn as_slice(&self) -> &[StorageType] {
		&self.types
	}

	/// `self ⊇ other`
	pub fn is_superset_of(&self, other: &TypeSet) -> bool {
		other.bits.is_subset_of(&self.bits)
	}

	/// `self ∩ other ≠ ∅`
	pub fn intersects(&self, other: &TypeSet) -> bool {
		self.bits.intersects(&other.bits)
	}

	/// A new set holding every member of `self` plus `ty`.
	pub fn with(&self, ty: StorageType) -> TypeSet {
		if self.contains(ty) {
			return self.clone();
		}
		TypeSet::new(self.iter().chain([ty]))
	}

	/// A new set holding every member of `self` except `ty`.
	pub fn without(&self, ty: StorageType) -> TypeSet {
		if !self.contains(ty) {
			return self.clone();
		}
		TypeSet::new(self.iter().filter(|t| *t != ty))
	}

	pub fn union(&self, other: &TypeSet) -> TypeSet {
		TypeSet::new(self.iter().chain(other.iter()))
	}

	/// The members that own a [TableStorage](crate::storage::TableStorage) column.
	pub fn columns(&self) -> TypeSet {
		TypeSet::new(self.iter().filter(|t| t.has_column()))
	}

	/// Total bytes one row of this shape occupies across all columns.
	pub fn row_bytes(&self) -> usize {
		self.iter().filter(|t| t.has_column()).map(|t| t.byte_size()).sum()
	}
}

impl Default for TypeSet {
	fn default() -> Self {
		Self::empty()
	}
}

impl Eq for TypeSet {}

impl PartialEq<Self> for TypeSet {
	fn eq(&self, other: &Self) -> bool {
		self.bits == other.bits
	}
}

impl Hash for TypeSet {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.bits.hash(state)
	}
}

impl FromIterator<StorageType> for TypeSet {
	fn from_iter<I: IntoIterator<Item = StorageType>>(iter: I) -> Self {
		TypeSet::new(iter)
	}
}

impl fmt::Debug for TypeSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.types.iter().map(|t| t.name())).finish()
	}
}
