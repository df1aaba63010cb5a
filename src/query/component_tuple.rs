use crate::components::{Component, ComponentTypeInfo, StorageType, TypeSet};
use crate::error::{EcsError, Result};
use crate::archetypes::Archetypes;
use crate::storage::TableStorage;
use rayon::prelude::*;
use crate::entities::Entity;
use crate::query::Query;
use paste::paste;

/// A tuple of value components that can be borrowed mutably, row by row, out of a table.
///
/// This trait is implemented for tuples of up to 12 [Component] types.
pub trait ComponentTuple: 'static {
	type Columns: Copy;
	type RefMut<'a>;

	fn storage_types() -> Vec<StorageType>;

	/// Resolve the column base pointers in `storage`.
	fn columns(storage: &mut TableStorage) -> Option<Self::Columns>;

	/// # Safety
	/// `columns` must come from a storage that has not been expanded since, `row` must be allocated,
	/// and no other reference to the same row of these columns may be alive.
	unsafe fn fetch<'a>(columns: Self::Columns, row: usize) -> Self::RefMut<'a>;
}

macro_rules! impl_component_tuple {
    ($($t: ident),*) => {
        paste! {
            impl<$($t: Component),*> ComponentTuple for ($($t,)*) {
                type Columns = ($(*mut $t,)*);
                type RefMut<'a> = ($(&'a mut $t,)*);

                fn storage_types() -> Vec<StorageType> {
                    vec![$(<$t>::storage_type()),*]
                }

                fn columns(storage: &mut TableStorage) -> Option<Self::Columns> {
                    $(let [<$t:lower>] = storage.column_ptr(<$t>::storage_type().id())? as *mut $t;)*
                    Some(($([<$t:lower>],)*))
                }

                unsafe fn fetch<'a>(columns: Self::Columns, row: usize) -> Self::RefMut<'a> {
                    let ($([<$t:lower>],)*) = columns;
                    ($(&mut *[<$t:lower>].add(row),)*)
                }
            }
        }
    };
}

impl_component_tuple!(T0);
impl_component_tuple!(T0, T1);
impl_component_tuple!(T0, T1, T2);
impl_component_tuple!(T0, T1, T2, T3);
impl_component_tuple!(T0, T1, T2, T3, T4);
impl_component_tuple!(T0, T1, T2, T3, T4, T5);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_component_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);

/// Raw column pointers handed to rayon workers; every worker touches distinct rows.
struct Shared<C>(C);

unsafe impl<C> Send for Shared<C> {}
unsafe impl<C> Sync for Shared<C> {}

impl<C: Copy> Shared<C> {
	fn get(&self) -> C {
		self.0
	}
}

impl Query {
	/// Visit every matching entity with mutable access to its `T` components.
	///
	/// Every type of `T` must be required by the query's mask, must carry a value (no tags),
	/// and may appear only once. [Entity] itself is passed separately and cannot be borrowed.
	pub fn for_each_mut<'w, T: ComponentTuple>(
		&self, archetypes: &'w mut Archetypes, mut func: impl FnMut(Entity, T::RefMut<'w>),
	) -> Result<()> {
		self.check_tuple::<T>()?;

		let (ids, tables, storages) = archetypes.iteration_parts(self.id());
		for id in ids {
			let table = &tables[id.index()];
			let storage = &mut storages[table.storage_id().index];

			let (columns, entities) = resolve::<T>(storage)?;
			for row in table.rows() {
				// SAFETY: the row is owned by exactly one table and visited once,
				// and the storage cannot expand while the store is mutably borrowed.
				unsafe { func(*entities.add(row), T::fetch(columns, row)) }
			}
		}
		Ok(())
	}

	/// Like [for_each_mut](Query::for_each_mut), with the rows of each table split across the rayon pool.
	pub fn par_for_each_mut<'w, T: ComponentTuple>(
		&self, archetypes: &'w mut Archetypes, func: impl Fn(Entity, T::RefMut<'w>) + Send + Sync,
	) -> Result<()> {
		self.check_tuple::<T>()?;

		let (ids, tables, storages) = archetypes.iteration_parts(self.id());
		for id in ids {
			let table = &tables[id.index()];
			let storage = &mut storages[table.storage_id().index];

			let (columns, entities) = resolve::<T>(storage)?;
			let columns = Shared(columns);
			let entities = Shared(entities);
			let func = &func;

			let rows: Vec<usize> = table.rows().collect();
			rows.into_par_iter().for_each(|row| {
				// SAFETY: see for_each_mut; each row is handed to exactly one worker.
				unsafe { func(*entities.get().add(row), T::fetch(columns.get(), row)) }
			});
		}
		Ok(())
	}

	fn check_tuple<T: ComponentTuple>(&self) -> Result<()> {
		let types = T::storage_types();
		let set = TypeSet::new(types.iter().copied());

		if set.len() != types.len() {
			return Err(EcsError::invalid("a component tuple cannot name a type twice"));
		}
		if let Some(ty) = set.iter().find(|t| !t.has_column() || *t == Entity::storage_type()) {
			return Err(EcsError::invalid(format!("{} cannot be borrowed from a table", ty.name())));
		}
		if !self.mask().has().is_superset_of(&set) {
			return Err(EcsError::invalid("every borrowed component must be required by the query"));
		}
		Ok(())
	}
}

fn resolve<T: ComponentTuple>(storage: &mut TableStorage) -> Result<(T::Columns, *const Entity)> {
	let entities = storage.column_ptr(Entity::storage_type().id());
	match (T::columns(storage), entities) {
		(Some(columns), Some(entities)) => Ok((columns, entities as *const Entity)),
		_ => Err(EcsError::invalid("table is missing a borrowed column")),
	}
}
