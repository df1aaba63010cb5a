use crate::components::ComponentId;
use std::hash::{Hash, Hasher};
use std::cmp::Ordering;
use std::fmt;

/// How a component type is stored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StorageKind {
	/// Plain `Copy` data stored in a table column, or tracked by shape alone when zero-sized.
	Value,
	/// Shared references kept in per-table lists, one or more per entity.
	Object,
}

/// A runtime representation of a registered component type.
///
/// Two [StorageTypes](StorageType) are equal iff they describe the same Rust type.
#[derive(Copy, Clone, Debug)]
pub struct StorageType {
	id: ComponentId,
	byte_size: usize,
	align: usize,
	kind: StorageKind,
	name: &'static str,
}

impl StorageType {
	pub(crate) const fn new(
		id: ComponentId, byte_size: usize, align: usize, kind: StorageKind, name: &'static str,
	) -> Self {
		Self { id, byte_size, align, kind, name }
	}

	/// Returns the canonical [StorageType] of the component `T`.
	#[inline(always)]
	pub fn of<T: ComponentTypeInfo>() -> Self {
		T::storage_type()
	}

	pub const fn id(&self) -> ComponentId {
		self.id
	}

	/// Size in bytes of a single value. Always 0 for tags and object components.
	pub const fn byte_size(&self) -> usize {
		self.byte_size
	}

	pub const fn align(&self) -> usize {
		self.align
	}

	pub const fn kind(&self) -> StorageKind {
		self.kind
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Zero-sized value components only take part in a table's shape.
	pub fn is_tag(&self) -> bool {
		self.kind == StorageKind::Value && self.byte_size == 0
	}

	pub fn is_unmanaged(&self) -> bool {
		self.kind == StorageKind::Value
	}

	pub fn is_object(&self) -> bool {
		self.kind == StorageKind::Object
	}

	/// Whether values of this type live in a [TableStorage](crate::storage::TableStorage) column.
	pub fn has_column(&self) -> bool {
		self.is_unmanaged() && !self.is_tag()
	}
}

impl Eq for StorageType {}

impl PartialEq<Self> for StorageType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Hash for StorageType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state)
	}
}

impl PartialOrd for StorageType {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for StorageType {
	fn cmp(&self, other: &Self) -> Ordering {
		self.id.cmp(&other.id)
	}
}

impl fmt::Display for StorageType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// Static facts about a registered component type.
///
/// This trait should only be implemented by #\[derive([Component])] or #\[derive([ObjectComponent])].
/// It gives [ComponentSet](crate::components::ComponentSet) and [Masks](crate::components::Mask)
/// a single way to name both kinds of components.
pub trait ComponentTypeInfo: 'static {
	fn storage_type() -> StorageType;
}

/// Plain data attachable to an [Entity](crate::entities::Entity).
///
/// Implement it through #\[derive(Component)], which memoizes the type's [StorageType].
/// Zero-sized components are tags: they are tracked by table shape and have no value to read.
pub trait Component: ComponentTypeInfo + Copy + Send + Sync {}

/// Reference-typed data attachable to an [Entity](crate::entities::Entity) as a shared `Arc<Self>`.
///
/// Implement it through #\[derive(ObjectComponent)].
pub trait ObjectComponent: ComponentTypeInfo + Send + Sync {}
