use crate::components::ComponentId;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::any::Any;
use std::sync::Arc;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// A shared, type-erased object component value.
pub type ObjectRef = Arc<dyn Any + Send + Sync>;

/// Two object references are the same value iff they point at the same allocation.
pub fn same_object(a: &ObjectRef, b: &ObjectRef) -> bool {
	std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Ordered reference lists keyed by `(entity index, component id)`, owned by one table.
#[derive(Default)]
pub(crate) struct ObjectComponents {
	slots: HashMap<u64, Vec<ObjectRef>, Hasher>,
}

#[inline(always)]
fn key(index: u32, id: ComponentId) -> u64 {
	((index as u64) << 32) | id.value() as u64
}

impl ObjectComponents {
	pub fn get(&self, index: u32, id: ComponentId) -> Option<&[ObjectRef]> {
		self.slots.get(&key(index, id)).map(|v| v.as_slice())
	}

	/// Append `value` unless the same reference is already present.
	/// Returns whether the list changed.
	pub fn push_unique(&mut self, index: u32, id: ComponentId, value: ObjectRef) -> bool {
		let list = self.slots.entry(key(index, id)).or_default();
		if list.iter().any(|v| same_object(v, &value)) {
			return false;
		}
		list.push(value);
		true
	}

	/// Remove one reference. Returns the number of references left,
	/// or `None` if the reference was not in the list. Empty lists are dropped.
	pub fn remove_ref(&mut self, index: u32, id: ComponentId, value: &ObjectRef) -> Option<usize> {
		let k = key(index, id);
		let list = self.slots.get_mut(&k)?;
		let position = list.iter().position(|v| same_object(v, value))?;
		list.remove(position);

		let remaining = list.len();
		if remaining == 0 {
			self.slots.remove(&k);
		}
		Some(remaining)
	}

	pub fn take(&mut self, index: u32, id: ComponentId) -> Option<Vec<ObjectRef>> {
		self.slots.remove(&key(index, id))
	}

	pub fn put(&mut self, index: u32, id: ComponentId, values: Vec<ObjectRef>) {
		if !values.is_empty() {
			self.slots.insert(key(index, id), values);
		}
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}
}
