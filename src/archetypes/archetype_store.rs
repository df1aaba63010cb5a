use crate::archetypes::{ArchetypeTransition, ArchetypeTransitionKind, ArchetypesConfig};
use crate::components::{Component, ComponentTypeInfo, Mask, ObjectComponent, StorageType, TypeSet};
use crate::storage::{move_entry, ObjectRef, StorageId, Table, TableId, TableStorage};
use crate::entities::{Entity, EntityMeta, EntityMetas, Identity};
use crate::query::{Query, QueryId};
use crate::error::{EcsError, Result};
use crate::data_structures::Pool;
use std::sync::atomic::{AtomicU32, Ordering};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::sync::Arc;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

pub(crate) struct QueryCache {
	pub mask: Mask,
	pub tables: Vec<TableId>,
}

/// A container for [entities](Entity) and their [components](Component), grouped into
/// [tables](Table) by the exact set of component types each entity carries.
///
/// Adding or removing a component type migrates the entity's row to the table of its new shape.
/// Overwriting the value of a component it already has never moves anything.
pub struct Archetypes {
	id: u32,
	config: ArchetypesConfig,
	entities: EntityMetas,

	tables: Vec<Table>,
	storages: Vec<TableStorage>,
	table_lookup: HashMap<TypeSet, TableId>,
	storage_lookup: HashMap<TypeSet, StorageId>,
	transitions: HashMap<ArchetypeTransition, TableId, Hasher>,

	queries: HashMap<Mask, QueryId>,
	query_caches: Vec<QueryCache>,

	entity_pool: Pool<Vec<Entity>>,
}

impl Archetypes {
	pub fn new() -> Self {
		match Self::with_config(ArchetypesConfig::default()) {
			Ok(archetypes) => archetypes,
			Err(_) => unreachable!("the default configuration is valid"),
		}
	}

	pub fn with_config(config: ArchetypesConfig) -> Result<Self> {
		config.validate()?;

		let mut archetypes = Self {
			id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
			entities: EntityMetas::with_capacity(config.entity_capacity),
			config,

			tables: Vec::new(),
			storages: Vec::new(),
			table_lookup: HashMap::default(),
			storage_lookup: HashMap::default(),
			transitions: HashMap::default(),

			queries: HashMap::default(),
			query_caches: Vec::new(),

			entity_pool: Pool::default(),
		};

		let empty = archetypes.create_table(TypeSet::new([Entity::storage_type()]))?;
		debug_assert_eq!(empty, TableId::EMPTY);
		Ok(archetypes)
	}

	pub fn config(&self) -> &ArchetypesConfig {
		&self.config
	}

	// -- Entity lifecycle --

	/// Creates a single [entity](Entity) with no [components](Component) attached.
	pub fn spawn(&mut self) -> Result<Entity> {
		let identity = self.entities.allocate();

		let table = &mut self.tables[TableId::EMPTY.index];
		let storage = &mut self.storages[table.storage_id().index];
		let row = match table.add(identity, storage) {
			Ok(row) => row,
			Err(error) => {
				self.entities.release(identity)?;
				return Err(error);
			},
		};

		self.entities.set(identity, EntityMeta::new(TableId::EMPTY, row));
		Ok(Entity::from(identity))
	}

	/// Destroys an [entity](Entity), dropping all of its components.
	/// Its index is recycled with a new generation.
	pub fn despawn(&mut self, entity: Entity) -> Result<()> {
		let identity = entity.identity();
		let meta = self.entities.get(identity)?;

		let table = &mut self.tables[meta.table().index];
		let storage = &mut self.storages[table.storage_id().index];
		table.remove(meta.row(), storage)?;
		table.clear_objects(identity.index);

		self.entities.release(identity)
	}

	/// Destroys every [entity](Entity) in `entities`.
	/// Fails without touching anything if one of them is not alive; duplicates are despawned once.
	pub fn despawn_batch(&mut self, entities: &[Entity]) -> Result<()> {
		let mut pending = self.entity_pool.take_one();
		pending.clear();

		for entity in entities {
			self.entities.get(entity.identity())?;
			pending.push(*entity);
		}

		pending.sort_unstable();
		pending.dedup();

		for entity in pending.iter() {
			self.despawn(*entity)?;
		}
		Ok(())
	}

	pub fn is_alive(&self, entity: Entity) -> bool {
		self.entities.is_alive(entity.identity())
	}

	/// Number of live entities.
	pub fn len(&self) -> usize {
		self.entities.alive()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Where the entity's row currently lives.
	pub fn meta(&self, entity: Entity) -> Result<EntityMeta> {
		self.entities.get(entity.identity())
	}

	pub fn table_of(&self, entity: Entity) -> Result<TableId> {
		Ok(self.meta(entity)?.table())
	}

	/// The full shape of the entity, [Entity] itself included.
	pub fn component_types(&self, entity: Entity) -> Result<TypeSet> {
		let meta = self.meta(entity)?;
		Ok(self.tables[meta.table().index].types().clone())
	}

	// -- Value components --

	/// Attach `value` to the entity. If the entity already has a `T`, the value is overwritten in place.
	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
		let ty = T::storage_type();
		let (meta, row) = self.ensure_component(entity, ty)?;
		self.write_value(meta.table(), row, value);
		Ok(())
	}

	/// Attach `value` to the entity, failing if it already has a `T`.
	pub fn add_unique_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
		let ty = T::storage_type();
		if self.has_component_type(entity, ty) {
			return Err(EcsError::DuplicateComponent {
				entity: entity.identity(),
				component: ty.name(),
			});
		}
		self.add_component(entity, value)
	}

	/// Overwrite an existing `T`, failing if the entity doesn't have one.
	pub fn set_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
		*self.get_component_mut::<T>(entity)? = value;
		Ok(())
	}

	/// Read a copy of the entity's `T`.
	/// Tags carry no value, so reading one always fails; use [has_component](Archetypes::has_component).
	pub fn get_component<T: Component>(&self, entity: Entity) -> Result<T> {
		self.get_component_ref::<T>(entity).copied()
	}

	pub fn get_component_ref<T: Component>(&self, entity: Entity) -> Result<&T> {
		let (meta, ty) = self.locate_value(entity, T::storage_type())?;
		let storage = self.storage_of(meta.table());
		storage.get::<T>(meta.row()).ok_or_else(|| not_found(entity, ty))
	}

	pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
		let (meta, ty) = self.locate_value(entity, T::storage_type())?;
		let storage_id = self.tables[meta.table().index].storage_id();
		self.storages[storage_id.index].get_mut::<T>(meta.row()).ok_or_else(|| not_found(entity, ty))
	}

	/// Detach the entity's `T`. For object components this drops every reference of that type.
	pub fn remove_component<T: ComponentTypeInfo>(&mut self, entity: Entity) -> Result<()> {
		self.remove_component_type(entity, T::storage_type())
	}

	pub fn remove_component_type(&mut self, entity: Entity, ty: StorageType) -> Result<()> {
		reject_entity_type(ty)?;
		let meta = self.meta(entity)?;
		if !self.tables[meta.table().index].types().contains(ty) {
			return Err(not_found(entity, ty));
		}

		let dst = self.transition(meta.table(), ty, ArchetypeTransitionKind::Remove)?;
		self.migrate(entity.identity(), meta, dst)?;
		Ok(())
	}

	/// Whether the entity's current shape contains `T`. A dead entity has no components.
	pub fn has_component<T: ComponentTypeInfo>(&self, entity: Entity) -> bool {
		self.has_component_type(entity, T::storage_type())
	}

	pub fn has_component_type(&self, entity: Entity, ty: StorageType) -> bool {
		match self.meta(entity) {
			Ok(meta) => self.tables[meta.table().index].types().contains(ty),
			Err(_) => false,
		}
	}

	// -- Object components --

	/// Attach a single shared reference of type `T`, failing if the entity already has one.
	pub fn add_object_component<T: ObjectComponent>(&mut self, entity: Entity, value: Arc<T>) -> Result<()> {
		let ty = T::storage_type();
		if self.has_component_type(entity, ty) {
			return Err(EcsError::DuplicateComponent {
				entity: entity.identity(),
				component: ty.name(),
			});
		}
		self.add_multiple_object_component(entity, value)
	}

	/// Append a shared reference of type `T` to the entity's list of them.
	/// Adding the same reference twice keeps a single entry.
	pub fn add_multiple_object_component<T: ObjectComponent>(
		&mut self, entity: Entity, value: Arc<T>,
	) -> Result<()> {
		let ty = T::storage_type();
		let (meta, _) = self.ensure_component(entity, ty)?;
		let value: ObjectRef = value;
		self.tables[meta.table().index].objects.push_unique(entity.index(), ty.id(), value);
		Ok(())
	}

	/// Remove one shared reference. Removing the last one removes `T` from the entity's shape.
	pub fn remove_object_component<T: ObjectComponent>(&mut self, entity: Entity, value: &Arc<T>) -> Result<()> {
		let ty = T::storage_type();
		let meta = self.meta(entity)?;
		let table = &mut self.tables[meta.table().index];
		if !table.types().contains(ty) {
			return Err(not_found(entity, ty));
		}

		let value: ObjectRef = value.clone();
		match table.objects.remove_ref(entity.index(), ty.id(), &value) {
			None => Err(not_found(entity, ty)),
			Some(0) => {
				let dst = self.transition(meta.table(), ty, ArchetypeTransitionKind::Remove)?;
				self.migrate(entity.identity(), meta, dst)?;
				Ok(())
			},
			Some(_) => Ok(()),
		}
	}

	/// The first reference of type `T` attached to the entity.
	pub fn get_object_component<T: ObjectComponent>(&self, entity: Entity) -> Result<Arc<T>> {
		let ty = T::storage_type();
		self.object_slot(entity, ty)?
			.first()
			.and_then(|v| v.clone().downcast::<T>().ok())
			.ok_or_else(|| not_found(entity, ty))
	}

	/// Every reference of type `T` attached to the entity, in insertion order.
	pub fn get_object_components<T: ObjectComponent>(&self, entity: Entity) -> Result<Vec<Arc<T>>> {
		let ty = T::storage_type();
		Ok(self.object_slot(entity, ty)?.iter().filter_map(|v| v.clone().downcast::<T>().ok()).collect())
	}

	// -- Tables --

	pub fn table(&self, id: TableId) -> Option<&Table> {
		self.tables.get(id.index)
	}

	/// Tables in creation order.
	pub fn tables(&self) -> &[Table] {
		&self.tables
	}

	pub fn table_count(&self) -> usize {
		self.tables.len()
	}

	pub fn storage(&self, id: StorageId) -> Option<&TableStorage> {
		self.storages.get(id.index)
	}

	pub fn storage_count(&self) -> usize {
		self.storages.len()
	}

	/// Get or create the table of exactly `types` ([Entity] is always implied).
	pub fn table_for(&mut self, types: &TypeSet) -> Result<TableId> {
		let types = types.with(Entity::storage_type());
		match self.table_lookup.get(&types) {
			Some(table) => Ok(*table),
			None => self.create_table(types),
		}
	}

	/// Make sure the table can hold at least `capacity` rows without expanding.
	pub fn reserve(&mut self, table: TableId, capacity: usize) -> Result<()> {
		let storage = match self.tables.get(table.index) {
			Some(table) => table.storage_id(),
			None => return Err(EcsError::invalid(format!("unknown table {}", table.index))),
		};
		self.storages[storage.index].ensure_capacity(capacity);
		Ok(())
	}

	// -- Queries --

	pub fn is_mask_compatible_with(&self, mask: &Mask, table: TableId) -> bool {
		self.tables.get(table.index).map_or(false, |t| mask.matches(t.types()))
	}

	/// Get the cached [Query] for `mask`, building its table list on first use.
	/// Tables created later are added to the cache as they appear.
	pub fn query(&mut self, mask: &Mask) -> Query {
		if let Some(id) = self.queries.get(mask) {
			return Query::new(*id, mask.clone());
		}

		let tables = self.tables.iter().filter(|t| mask.matches(t.types())).map(|t| t.id()).collect::<Vec<_>>();
		let id = QueryId {
			store: self.id,
			index: self.query_caches.len(),
		};
		log::debug!("created query {} over {} tables for {:?}", id.index, tables.len(), mask);

		self.query_caches.push(QueryCache { mask: mask.clone(), tables });
		self.queries.insert(mask.clone(), id);
		Query::new(id, mask.clone())
	}

	pub(crate) fn query_tables(&self, id: QueryId) -> &[TableId] {
		self.check_query(id);
		&self.query_caches[id.index].tables
	}

	/// Split borrows for iterating a query's rows while writing into their storages.
	pub(crate) fn iteration_parts(&mut self, id: QueryId) -> (&[TableId], &[Table], &mut [TableStorage]) {
		self.check_query(id);
		(self.query_caches[id.index].tables.as_slice(), self.tables.as_slice(), self.storages.as_mut_slice())
	}

	pub(crate) fn storage_of(&self, table: TableId) -> &TableStorage {
		&self.storages[self.tables[table.index].storage_id().index]
	}

	// -- Internals --

	fn check_query(&self, id: QueryId) {
		assert_eq!(id.store, self.id, "Query belongs to a different store");
	}

	fn create_table(&mut self, types: TypeSet) -> Result<TableId> {
		let columns = types.columns();
		let storage = match self.storage_lookup.get(&columns) {
			Some(storage) => *storage,
			None => {
				let id = StorageId { index: self.storages.len() };
				let storage = TableStorage::new(id, &columns, self.config.table_capacity, self.config.expand)?;
				self.storages.push(storage);
				self.storage_lookup.insert(columns, id);
				id
			},
		};

		let id = TableId { index: self.tables.len() };
		log::debug!("created table {} {:?} on storage {}", id.index, types, storage.index);

		for cache in self.query_caches.iter_mut() {
			if cache.mask.matches(&types) {
				cache.tables.push(id);
			}
		}

		self.table_lookup.insert(types.clone(), id);
		self.tables.push(Table::new(id, types, storage));
		Ok(id)
	}

	fn transition(&mut self, table: TableId, ty: StorageType, kind: ArchetypeTransitionKind) -> Result<TableId> {
		let transition = ArchetypeTransition {
			table,
			component: ty.id(),
			kind,
		};
		if let Some(dst) = self.transitions.get(&transition) {
			return Ok(*dst);
		}

		let src = self.tables[table.index].types();
		let types = match kind {
			ArchetypeTransitionKind::Add => src.with(ty),
			ArchetypeTransitionKind::Remove => src.without(ty),
		};

		let dst = match self.table_lookup.get(&types) {
			Some(dst) => *dst,
			None => self.create_table(types)?,
		};
		self.transitions.insert(transition, dst);
		Ok(dst)
	}

	/// Make sure the entity's shape contains `ty`, migrating if needed. Returns its location afterwards.
	fn ensure_component(&mut self, entity: Entity, ty: StorageType) -> Result<(EntityMeta, usize)> {
		reject_entity_type(ty)?;
		let meta = self.meta(entity)?;
		if self.tables[meta.table().index].types().contains(ty) {
			return Ok((meta, meta.row()));
		}

		let dst = self.transition(meta.table(), ty, ArchetypeTransitionKind::Add)?;
		let meta = self.migrate(entity.identity(), meta, dst)?;
		Ok((meta, meta.row()))
	}

	fn migrate(&mut self, identity: Identity, meta: EntityMeta, dst: TableId) -> Result<EntityMeta> {
		let row = move_entry(identity, meta.row(), meta.table(), dst, &mut self.tables, &mut self.storages)?;
		let meta = EntityMeta::new(dst, row);
		self.entities.set(identity, meta);
		Ok(meta)
	}

	fn write_value<T: Component>(&mut self, table: TableId, row: usize, value: T) {
		let storage = self.tables[table.index].storage_id();
		// Tags have no column; nothing to write.
		self.storages[storage.index].write(row, value);
	}

	fn locate_value(&self, entity: Entity, ty: StorageType) -> Result<(EntityMeta, StorageType)> {
		let meta = self.meta(entity)?;
		if ty.is_tag() {
			return Err(EcsError::invalid(format!("{} is a tag and carries no value", ty.name())));
		}
		if !self.tables[meta.table().index].types().contains(ty) {
			return Err(not_found(entity, ty));
		}
		Ok((meta, ty))
	}

	fn object_slot(&self, entity: Entity, ty: StorageType) -> Result<&[ObjectRef]> {
		let meta = self.meta(entity)?;
		self.tables[meta.table().index].objects.get(entity.index(), ty.id()).ok_or_else(|| not_found(entity, ty))
	}
}

impl Default for Archetypes {
	fn default() -> Self {
		Self::new()
	}
}

fn not_found(entity: Entity, ty: StorageType) -> EcsError {
	EcsError::ComponentNotFound {
		entity: entity.identity(),
		component: ty.name(),
	}
}

fn reject_entity_type(ty: StorageType) -> Result<()> {
	if ty == Entity::storage_type() {
		return Err(EcsError::invalid("the Entity component cannot be added or removed"));
	}
	Ok(())
}
