//! A unique runtime identifier tied to a component type, and the global registry issuing them.
//!
//! Developers shouldn't rely on [component ids](ComponentId), as they are not stable between program re-runs.
//! Ids are dense, which lets [TypeSets](crate::components::TypeSet) and [Masks](crate::components::Mask)
//! be compiled down to [bitfields](crate::data_structures::BitField).

use crate::components::{StorageKind, StorageType};
use std::collections::HashMap;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::any::TypeId;
use std::fmt;

lazy_static! {
	static ref REGISTRY: RwLock<Registry> = RwLock::new(Registry::default());
}

#[derive(Default)]
struct Registry {
	by_type: HashMap<TypeId, StorageType>,
	by_id: Vec<StorageType>,
}

/// A globally unique identifier for a registered component type.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct ComponentId {
	value: usize,
}

impl ComponentId {
	#[inline(always)]
	pub const fn value(&self) -> usize {
		self.value
	}
}

impl fmt::Display for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.value)
	}
}

/// Registers `T` as an unmanaged value component. **Should not be called from user code.**
///
/// Registration is idempotent: calling it again for the same type yields the same [StorageType].
/// Called from code generated by #\[derive([Component](crate::components::Component))].
pub fn register_value<T: 'static + Copy + Send + Sync>() -> StorageType {
	register::<T>(StorageKind::Value)
}

/// Registers `T` as a reference-typed object component. **Should not be called from user code.**
///
/// Called from code generated by #\[derive([ObjectComponent](crate::components::ObjectComponent))].
pub fn register_object<T: 'static + Send + Sync>() -> StorageType {
	register::<T>(StorageKind::Object)
}

/// Look up the [StorageType] registered for a Rust type, if any.
pub fn lookup(type_id: TypeId) -> Option<StorageType> {
	REGISTRY.read().by_type.get(&type_id).copied()
}

/// Look up the [StorageType] owning a [ComponentId].
pub fn lookup_id(id: ComponentId) -> Option<StorageType> {
	REGISTRY.read().by_id.get(id.value).copied()
}

fn register<T: 'static>(kind: StorageKind) -> StorageType {
	let key = TypeId::of::<T>();
	if let Some(ty) = REGISTRY.read().by_type.get(&key) {
		return *ty;
	}

	let mut registry = REGISTRY.write();
	if let Some(ty) = registry.by_type.get(&key) {
		return *ty;
	}

	let id = ComponentId { value: registry.by_id.len() };
	let ty = match kind {
		StorageKind::Value => StorageType::new(
			id,
			std::mem::size_of::<T>(),
			std::mem::align_of::<T>(),
			kind,
			std::any::type_name::<T>(),
		),
		StorageKind::Object => StorageType::new(id, 0, 1, kind, std::any::type_name::<T>()),
	};

	debug_assert!(
		id.value <= u32::MAX as usize,
		"This is an insane number of components. Please seek help."
	);
	log::trace!("registered component {} as {}", ty.name(), id);

	registry.by_id.push(ty);
	registry.by_type.insert(key, ty);
	ty
}
