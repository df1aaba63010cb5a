use crate::components::{ComponentTypeInfo, StorageType, TypeSet};
use std::collections::HashMap;
use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::any::TypeId;

lazy_static! {
	static ref TYPE_TO_SET: Mutex<HashMap<TypeId, TypeSet>> = Mutex::new(HashMap::default());
}

/// A tuple of component types, used to build [TypeSets](TypeSet) and [Masks](crate::components::Mask).
///
/// Implemented for `()` and tuples of up to 12 [ComponentTypeInfo] types.
/// The resulting set is memoized per tuple type.
pub trait ComponentSet: 'static {
	fn type_set() -> TypeSet;
}

impl ComponentSet for () {
	fn type_set() -> TypeSet {
		TypeSet::empty()
	}
}

fn memoized(key: TypeId, make: impl FnOnce() -> Vec<StorageType>) -> TypeSet {
	if let Some(set) = TYPE_TO_SET.lock().get(&key) {
		return set.clone();
	}

	// Built outside the lock: registering a component type takes the registry lock.
	let set = TypeSet::new(make());
	TYPE_TO_SET.lock().entry(key).or_insert(set).clone()
}

macro_rules! impl_component_set {
    ($($t: ident),*) => {
        impl<$($t: ComponentTypeInfo),*> ComponentSet for ($($t,)*) {
            fn type_set() -> TypeSet {
                memoized(TypeId::of::<Self>(), || vec![$(<$t>::storage_type()),*])
            }
        }
    };
}

impl_component_set!(T0);
impl_component_set!(T0, T1);
impl_component_set!(T0, T1, T2);
impl_component_set!(T0, T1, T2, T3);
impl_component_set!(T0, T1, T2, T3, T4);
impl_component_set!(T0, T1, T2, T3, T4, T5);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
