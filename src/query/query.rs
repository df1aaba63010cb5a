use crate::components::{Component, ComponentTypeInfo, Mask};
use crate::data_structures::BitFieldOnesIterator;
use crate::storage::{Table, TableId, TableStorage};
use crate::error::{EcsError, Result};
use crate::archetypes::Archetypes;
use crate::entities::Entity;

/// A handle to a cached query inside one [Archetypes] store.
#[derive(Debug, Hash, Copy, Clone, Eq, PartialEq)]
pub struct QueryId {
	pub(crate) store: u32,
	pub(crate) index: usize,
}

/// The set of tables compatible with a [Mask], kept complete as new tables appear.
///
/// A query is a live view: every method reads the store's current state,
/// so entities that changed shape since the query was built are seen as they are now.
#[derive(Debug, Clone)]
pub struct Query {
	id: QueryId,
	mask: Mask,
}

impl Query {
	pub(crate) fn new(id: QueryId, mask: Mask) -> Self {
		Self { id, mask }
	}

	pub fn id(&self) -> QueryId {
		self.id
	}

	pub fn mask(&self) -> &Mask {
		&self.mask
	}

	/// The compatible tables, in creation order.
	pub fn tables<'a>(&self, archetypes: &'a Archetypes) -> &'a [TableId] {
		archetypes.query_tables(self.id)
	}

	/// Whether the entity currently lives in one of the compatible tables.
	pub fn contains(&self, archetypes: &Archetypes, entity: Entity) -> bool {
		match archetypes.table_of(entity) {
			Ok(table) => self.tables(archetypes).contains(&table),
			Err(_) => false,
		}
	}

	pub fn has<T: ComponentTypeInfo>(&self, archetypes: &Archetypes, entity: Entity) -> bool {
		archetypes.has_component::<T>(entity)
	}

	pub fn get<T: Component>(&self, archetypes: &Archetypes, entity: Entity) -> Result<T> {
		archetypes.get_component::<T>(entity)
	}

	/// Iterate the matching entities: tables in creation order, then rows in slot order.
	pub fn iter<'a>(&self, archetypes: &'a Archetypes) -> QueryIter<'a> {
		QueryIter {
			archetypes,
			tables: self.tables(archetypes).iter(),
			current: None,
		}
	}

	pub fn count(&self, archetypes: &Archetypes) -> usize {
		self.tables(archetypes).iter().filter_map(|t| archetypes.table(*t)).map(|t| t.len()).sum()
	}

	pub fn is_empty(&self, archetypes: &Archetypes) -> bool {
		self.iter(archetypes).next().is_none()
	}

	pub fn first(&self, archetypes: &Archetypes) -> Result<Entity> {
		self.iter(archetypes).next().ok_or(EcsError::NoElements)
	}

	pub fn first_or_default(&self, archetypes: &Archetypes) -> Option<Entity> {
		self.iter(archetypes).next()
	}

	/// The only matching entity. Fails if there are none or several.
	pub fn single(&self, archetypes: &Archetypes) -> Result<Entity> {
		self.single_or_default(archetypes)?.ok_or(EcsError::NoElements)
	}

	/// The only matching entity, if any. Fails if there are several.
	pub fn single_or_default(&self, archetypes: &Archetypes) -> Result<Option<Entity>> {
		let mut iter = self.iter(archetypes);
		let first = iter.next();
		match iter.next() {
			Some(_) => Err(EcsError::MoreThanOneElements),
			None => Ok(first),
		}
	}
}

/// Lazily flattens a query's tables into their entities.
pub struct QueryIter<'a> {
	archetypes: &'a Archetypes,
	tables: std::slice::Iter<'a, TableId>,
	current: Option<(&'a TableStorage, BitFieldOnesIterator<'a>)>,
}

impl Iterator for QueryIter<'_> {
	type Item = Entity;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some((storage, rows)) = &mut self.current {
				if let Some(row) = rows.next() {
					return storage.read::<Entity>(row);
				}
			}

			let table: &Table = self.archetypes.table(*self.tables.next()?)?;
			self.current = Some((self.archetypes.storage_of(table.id()), table.rows()));
		}
	}
}
